//! HTML pages for bucket and directory indexes.
//!
//! Pages are plain strings built per request; nothing is cached.

pub mod listing;
pub mod size;

pub use listing::{render_buckets, render_listing};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;min-width:40rem}\
th,td{text-align:left;padding:.3rem .8rem;border-bottom:1px solid #eee}\
td.size{text-align:right;font-variant-numeric:tabular-nums}\
nav{margin-bottom:1rem}a{color:#0b5cad;text-decoration:none}a:hover{text-decoration:underline}";

/// Wrap `body` in a complete HTML document.
fn page(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html><head><meta charset=\"utf-8\">",
            "<title>{title}</title><style>{style}</style></head>\n",
            "<body>\n{body}</body></html>\n"
        ),
        title = html_escape(title),
        style = STYLE,
        body = body
    )
}

fn link(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        html_escape(href),
        html_escape(text)
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn page_escapes_title_only() {
        let html = page("<b>", "<p>ok</p>");
        assert!(html.contains("<title>&lt;b&gt;</title>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
