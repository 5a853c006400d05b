//! HTML rendering for the list, about, and error pages.

use crate::models::Item;

const STYLESHEET: &str = "/css/styles.css";

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
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>To-Do List</title>
  <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
  <div class="box" id="heading">
    <h1>{title}</h1>
  </div>
{body}
  <footer class="footer">
    <a href="/">Today</a> &middot; <a href="/about">About</a>
  </footer>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Render a list with a delete checkbox per item and the add-item form.
///
/// The add form submits the list title verbatim as `list`; each delete form
/// submits it as `listName`.
pub fn list_page(title: &str, items: &[Item]) -> String {
    let title_attr = escape(title);
    let mut body = String::from("  <div class=\"box\">\n");

    for item in items {
        body.push_str(&format!(
            r#"    <form action="/delete" method="post">
      <div class="item">
        <input type="checkbox" name="deleteItem" value="{id}" onchange="this.form.submit()">
        <p>{name}</p>
      </div>
      <input type="hidden" name="listName" value="{title_attr}">
    </form>
"#,
            id = item.id,
            name = escape(&item.name),
        ));
    }

    body.push_str(&format!(
        r#"    <form class="item" action="/" method="post">
      <input type="text" name="newItem" placeholder="New Item" autocomplete="off">
      <button type="submit" name="list" value="{title_attr}">+</button>
    </form>
  </div>
"#
    ));

    layout(title, &body)
}

pub fn about_page() -> String {
    layout(
        "About",
        r#"  <div class="box about">
    <p>Keep a running list for today, or open any other list by visiting
    <code>/&lt;name&gt;</code>. New lists start with a few items to get you going.</p>
    <p>Tick an item to remove it.</p>
  </div>
"#,
    )
}

pub fn error_page(heading: &str, message: &str) -> String {
    layout(
        heading,
        &format!(
            "  <div class=\"box error\">\n    <p>{}</p>\n  </div>\n",
            escape(message)
        ),
    )
}
