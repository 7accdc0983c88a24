//! Server-side rendering of the single todo page.
//!
//! Every control is a plain HTML form posting back to `/`. The checkbox
//! submits its form on change; without JavaScript a `<noscript>` button does
//! the same. The toggle form carries the completion state it was rendered
//! with.

use todo_core::{IntentKind, TodoItem};

const HEAD: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>Todo List</title>\n<style>\n\
     body{font-family:sans-serif;padding:6rem;display:flex;flex-direction:column;gap:1rem}\n\
     .error{color:#b91c1c}\n.done{text-decoration:line-through}\n\
     li{display:flex;align-items:center;gap:.5rem}\nform{display:inline}\n\
     </style>\n</head>\n<body>\n<h1>Todo List</h1>\n";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the page for `todos`, with an optional error banner on top.
pub fn render_page(todos: &[TodoItem], error: Option<&str>) -> String {
    let banner = error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape(message)))
        .unwrap_or_default();
    let items: String = todos.iter().map(render_item).collect();

    format!(
        "{HEAD}{banner}\
         <form method=\"post\" action=\"/\">\n\
         <input type=\"hidden\" name=\"_action\" value=\"{create}\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"New todo\" required>\n\
         <button type=\"submit\">Add Todo</button>\n</form>\n\
         <ul>\n{items}</ul>\n</body>\n</html>\n",
        create = IntentKind::Create,
    )
}

fn render_item(todo: &TodoItem) -> String {
    let checked = if todo.completed { " checked" } else { "" };
    let class = if todo.completed { " class=\"done\"" } else { "" };
    format!(
        "<li>\n\
         <form method=\"post\" action=\"/\">\
         <input type=\"hidden\" name=\"_action\" value=\"{update}\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <input type=\"hidden\" name=\"completed\" value=\"{completed}\">\
         <input type=\"checkbox\" onchange=\"this.form.submit()\"{checked}>\
         <noscript><button type=\"submit\">Toggle</button></noscript>\
         </form>\n\
         <span{class}>{title}</span>\n\
         <form method=\"post\" action=\"/\">\
         <input type=\"hidden\" name=\"_action\" value=\"{delete}\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\">Delete</button>\
         </form>\n</li>\n",
        update = IntentKind::Update,
        delete = IntentKind::Delete,
        id = todo.id,
        completed = todo.completed,
        title = escape(&todo.title),
    )
}
