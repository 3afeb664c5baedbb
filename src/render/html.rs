use super::{Block, DisplayDocument, Renderer};

/// HTML fragment for a result container. Every interpolated value is
/// escaped; markup comes only from the block kinds.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &DisplayDocument) -> String {
        let mut out = String::new();
        for block in &doc.blocks {
            match block {
                Block::Field { label, value } => out.push_str(&format!(
                    "<p><strong>{}:</strong> {}</p>\n",
                    escape(label),
                    escape(value)
                )),
                Block::Heading { text } => out.push_str(&format!("<h3>{}</h3>\n", escape(text))),
                Block::Rule => out.push_str("<hr>\n"),
                Block::List { items } => {
                    out.push_str("<ul>\n");
                    for item in items {
                        out.push_str(&format!("  <li>{}</li>\n", escape(item)));
                    }
                    out.push_str("</ul>\n");
                }
                Block::Paragraph { text } => out.push_str(&format!("<p>{}</p>\n", escape(text))),
                Block::Alert {
                    alert_type,
                    severity,
                    description,
                } => out.push_str(&format!(
                    "<p><strong>{}</strong> ({})<br>{}</p>\n",
                    escape(alert_type),
                    escape(severity),
                    escape(description)
                )),
                Block::Status { text } => {
                    out.push_str(&format!("<p class=\"status\">{}</p>\n", escape(text)));
                }
                Block::Error { message } => out.push_str(&format!(
                    "<p class=\"error\">Error: {}</p>\n",
                    escape(message)
                )),
            }
        }
        out
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
