//! Anti-forgery token
//!
//! One random token per process; the views embed it in every
//! state-changing form and every POST handler checks the submitted value
//! before touching the store. There are no sessions, so a per-process
//! token is the whole scheme.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

#[derive(Debug, Clone)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches_itself() {
        let token = CsrfToken::generate();
        assert!(token.matches(token.value()));
        assert!(!token.matches(""));
        assert!(!token.matches("forged"));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let a = CsrfToken::generate();
        let b = CsrfToken::generate();
        assert_ne!(a.value(), b.value());
    }
}
