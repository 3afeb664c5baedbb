use super::{DisplayDocument, Renderer};

/// The display document as pretty JSON, for scripting.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &DisplayDocument) -> String {
        match serde_json::to_string_pretty(doc) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize display document: {e}");
                String::new()
            }
        }
    }
}
