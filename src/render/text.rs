use super::{Block, DisplayDocument, Renderer};
use console::style;

/// Plain terminal layout, one block per line.
pub struct TextRenderer {
    styled: bool,
}

impl TextRenderer {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn label(&self, text: &str) -> String {
        if self.styled {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.styled {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.styled {
            style(text).red().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, doc: &DisplayDocument) -> String {
        let mut lines = Vec::new();
        for block in &doc.blocks {
            match block {
                Block::Field { label, value } => {
                    lines.push(format!("{}: {value}", self.label(label)));
                }
                Block::Heading { text } => lines.push(self.heading(text)),
                Block::Rule => lines.push("-".repeat(32)),
                Block::List { items } => {
                    lines.extend(items.iter().map(|item| format!("  - {item}")));
                }
                Block::Paragraph { text } | Block::Status { text } => lines.push(text.clone()),
                Block::Alert {
                    alert_type,
                    severity,
                    description,
                } => {
                    lines.push(format!("{} ({severity})", self.label(alert_type)));
                    lines.push(format!("  {description}"));
                }
                Block::Error { message } => lines.push(self.error(&format!("Error: {message}"))),
            }
        }
        lines.join("\n")
    }
}
