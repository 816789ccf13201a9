//! HTML page rendering
//!
//! Pages are plain string substitution into a shared layout. User-supplied
//! text is escaped on output; every state-changing form carries the
//! anti-forgery token as a hidden field.

use tasklist_core::task::{
    FormErrors, NewTaskForm, Task, TaskFields, UpdateTaskForm, FORM_FIELDS,
};

/// Escape text for interpolation into HTML element content or a
/// double-quoted attribute value
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - Tasklist</title>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

fn errorlist(errors: &FormErrors, field: &str) -> String {
    let messages = errors.field(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|msg| format!("<li>{}</li>", escape(msg)))
        .collect();
    format!("<ul class=\"errorlist\">{items}</ul>\n")
}

/// One labeled widget for a recognized form field, preceded by its errors
fn field_widget(name: &str, fields: &TaskFields, errors: &FormErrors) -> String {
    let widget = match name {
        "title" => format!(
            "<input type=\"text\" id=\"id_title\" name=\"title\" value=\"{}\">",
            escape(&fields.title),
        ),
        "description" => format!(
            "<textarea id=\"id_description\" name=\"description\">{}</textarea>",
            escape(&fields.description),
        ),
        _ => return String::new(),
    };
    let label = {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    format!(
        "{errors}\
         <p>\n\
         <label for=\"id_{name}\">{label}</label>\n\
         {widget}\n\
         </p>\n",
        errors = errorlist(errors, name),
    )
}

/// The task form shared by the create and update pages, one widget per
/// entry in the field allowlist
fn task_form(action: &str, fields: &TaskFields, errors: &FormErrors, csrf: &str) -> String {
    let widgets: String = FORM_FIELDS
        .iter()
        .map(|name| field_widget(name, fields, errors))
        .collect();
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <input type=\"hidden\" name=\"csrf_token\" value=\"{csrf}\">\n\
         {widgets}\
         <button type=\"submit\">Save</button>\n\
         </form>",
        action = escape(action),
        csrf = escape(csrf),
    )
}

pub fn index_page(tasks: &[Task]) -> String {
    let items: String = tasks
        .iter()
        .map(|task| {
            format!(
                "<li><a href=\"/{id}/\">{title}</a></li>\n",
                id = task.id,
                title = escape(&task.title),
            )
        })
        .collect();
    let body = format!(
        "<h1>Tasks</h1>\n\
         <ul class=\"tasks\">\n{items}</ul>\n\
         <p><a href=\"/new/\">Add a task</a></p>",
    );
    layout("Tasks", &body)
}

pub fn detail_page(task: &Task) -> String {
    let body = format!(
        "<h1>{title}</h1>\n\
         <p>{description}</p>\n\
         <p>Created {created}</p>\n\
         <p>\n\
         <a href=\"/{id}/update/\">Edit</a>\n\
         <a href=\"/{id}/delete/\">Delete</a>\n\
         <a href=\"/\">Back</a>\n\
         </p>",
        title = escape(&task.title),
        description = escape(&task.description),
        created = task.created_at.format("%Y-%m-%d %H:%M"),
        id = task.id,
    );
    layout(&task.title, &body)
}

pub fn new_page(form: &NewTaskForm, csrf: &str) -> String {
    let body = format!(
        "<h1>New task</h1>\n{form}",
        form = task_form("/new/", &form.fields, &form.errors, csrf),
    );
    layout("New task", &body)
}

pub fn update_page(task: &Task, form: &UpdateTaskForm, csrf: &str) -> String {
    let action = format!("/{}/update/", task.id);
    let body = format!(
        "<h1>Edit {title}</h1>\n{form}",
        title = escape(&task.title),
        form = task_form(&action, &form.fields, &form.errors, csrf),
    );
    layout("Edit task", &body)
}

pub fn not_found_page(id: u64) -> String {
    layout(
        "Not found",
        &format!("<h1>Not found</h1>\n<p>No task with id {id}.</p>"),
    )
}

pub fn forbidden_page() -> String {
    layout(
        "Forbidden",
        "<h1>Forbidden</h1>\n<p>Anti-forgery check failed.</p>",
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server error",
        "<h1>Server error</h1>\n<p>Something went wrong.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#x27;b&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_index_lists_titles() {
        let tasks = vec![Task::new(1, "First task", "")];
        let html = index_page(&tasks);
        assert!(html.contains("First task"));
        assert!(html.contains("href=\"/1/\""));
    }

    #[test]
    fn test_new_page_has_form_csrf_and_labels() {
        let html = new_page(&NewTaskForm::empty(), "tok");
        assert!(html.contains("<form"));
        assert!(html.contains("name=\"csrf_token\" value=\"tok\""));
        assert!(html.contains("<label for"));
    }

    #[test]
    fn test_form_has_widget_per_recognized_field() {
        let html = new_page(&NewTaskForm::empty(), "tok");
        for name in FORM_FIELDS {
            assert!(html.contains(&format!("name=\"{name}\"")));
            assert!(html.contains(&format!("<label for=\"id_{name}\">")));
        }
    }

    #[test]
    fn test_task_titles_are_escaped() {
        let task = Task::new(1, "<script>alert(1)</script>", "");
        let html = detail_page(&task);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
