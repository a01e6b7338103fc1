//! Minimal text-to-markup transform for agent replies, producing the HTML a
//! web frontend renders. `persona-chat` prints it under `/html`.
//!
//! Handles `**bold**`, `#` to `###` headers and `- ` / `* ` bullet lists.
//! Everything else becomes a paragraph. Input is HTML-escaped first, so
//! model output can never inject markup of its own.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

fn escape_html(text: &str) -> String {
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

fn inline(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

fn header(line: &str) -> Option<(usize, &str)> {
    for (level, prefix) in [(3, "### "), (2, "## "), (1, "# ")] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some((level, rest));
        }
    }
    None
}

pub fn to_html(text: &str) -> String {
    let escaped = escape_html(text);
    let mut html = String::new();
    let mut in_list = false;

    for raw in escaped.lines() {
        let line = raw.trim();

        let item = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "));
        if in_list && item.is_none() {
            html.push_str("</ul>");
            in_list = false;
        }

        if let Some(item) = item {
            if !in_list {
                html.push_str("<ul>");
                in_list = true;
            }
            html.push_str(&format!("<li>{}</li>", inline(item.trim())));
        } else if let Some((level, rest)) = header(line) {
            html.push_str(&format!("<h{0}>{1}</h{0}>", level, inline(rest.trim())));
        } else if !line.is_empty() {
            html.push_str(&format!("<p>{}</p>", inline(line)));
        }
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

/// Text shown for a reply: the HTML rendering, or the reply as-is
pub fn render(text: &str, as_html: bool) -> String {
    if as_html {
        to_html(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_bold() {
        assert_eq!(
            to_html("Try **chai** today.\n\nEnjoy!"),
            "<p>Try <strong>chai</strong> today.</p><p>Enjoy!</p>"
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            to_html("# Menu\n## Drinks\n### Hot"),
            "<h1>Menu</h1><h2>Drinks</h2><h3>Hot</h3>"
        );
    }

    #[test]
    fn test_bullet_list_is_grouped() {
        assert_eq!(
            to_html("Drinks:\n- Chai\n* **Coffee**\nDone"),
            "<p>Drinks:</p><ul><li>Chai</li><li><strong>Coffee</strong></li></ul><p>Done</p>"
        );
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            to_html("<script>alert('x')</script> & **<b>**"),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong></p>"
        );
    }

    #[test]
    fn test_render_switches_on_html_flag() {
        let reply = "# Menu\n- **Chai**";
        assert_eq!(render(reply, false), reply);
        assert_eq!(
            render(reply, true),
            "<h1>Menu</h1><ul><li><strong>Chai</strong></li></ul>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_html("\n \n"), "");
    }
}
