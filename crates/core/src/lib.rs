//! Core library for the tasklist web application
//!
//! This crate contains the domain logic, including:
//! - The Task record and its store
//! - Validation forms for the create and update paths

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
