//! Display model and renderers.
//!
//! A [`DisplayDocument`] is a flat, ordered list of [`Block`]s built with
//! [`DisplayBuilder`]. Renderers turn it into text, HTML or JSON; none of
//! them see the wire types, and values are escaped by the renderer that
//! needs it rather than at build time.
//!
//! - [`text::TextRenderer`]: terminal output, optional ANSI styling
//! - [`html::HtmlRenderer`]: HTML fragment, every value escaped
//! - [`json::JsonRenderer`]: the document itself as JSON

pub mod html;
pub mod json;
pub mod text;

use crate::client::error::ClientError;
use crate::client::input::PROMPT_MESSAGE;
use crate::model::{format_fixed2, format_number, RecommendationResult};
use serde::{Deserialize, Serialize};

/// Status shown while a request is in flight.
pub const LOADING_MESSAGE: &str = "Loading…";
/// Shown in place of the alert list when there are none.
pub const NO_ALERTS_MESSAGE: &str = "No current alerts.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Field { label: String, value: String },
    Heading { text: String },
    Rule,
    List { items: Vec<String> },
    Paragraph { text: String },
    Alert {
        alert_type: String,
        severity: String,
        description: String,
    },
    Status { text: String },
    Error { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayDocument {
    pub blocks: Vec<Block>,
}

impl DisplayDocument {
    pub fn builder() -> DisplayBuilder {
        DisplayBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct DisplayBuilder {
    blocks: Vec<Block>,
}

impl DisplayBuilder {
    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.blocks.push(Block::Field {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading { text: text.into() });
        self
    }

    pub fn rule(mut self) -> Self {
        self.blocks.push(Block::Rule);
        self
    }

    pub fn list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks.push(Block::List {
            items: items.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph { text: text.into() });
        self
    }

    pub fn alert(
        mut self,
        alert_type: impl Into<String>,
        severity: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.blocks.push(Block::Alert {
            alert_type: alert_type.into(),
            severity: severity.into(),
            description: description.into(),
        });
        self
    }

    pub fn status(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Status { text: text.into() });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.blocks.push(Block::Error {
            message: message.into(),
        });
        self
    }

    pub fn build(self) -> DisplayDocument {
        DisplayDocument {
            blocks: self.blocks,
        }
    }
}

/// Lay out a decoded response in display order.
pub fn recommendation(result: &RecommendationResult) -> DisplayDocument {
    let pollutants = result
        .air_quality
        .pollutants
        .iter()
        .map(|p| format!("{}: {}", p.name, p.display_value()));

    let mut doc = DisplayDocument::builder()
        .field("Crop", result.recommended_crop.as_str())
        .field("Soil pH", format_fixed2(result.ph))
        .field("Temp", format!("{} °C", format_number(result.temperature)))
        .rule()
        .heading("Air Quality")
        .field("AQI", result.air_quality.aqi.to_string())
        .list(pollutants)
        .rule()
        .heading("Disaster Alerts");

    if result.disaster_alerts.is_empty() {
        doc = doc.paragraph(NO_ALERTS_MESSAGE);
    } else {
        for alert in &result.disaster_alerts {
            doc = doc.alert(
                alert.kind.as_str(),
                alert.severity.as_str(),
                alert.description.as_str(),
            );
        }
    }

    doc.build()
}

/// Validation failures become the prompt; everything else an error line.
pub fn failure(err: &ClientError) -> DisplayDocument {
    if err.is_validation() {
        return DisplayDocument::builder().status(PROMPT_MESSAGE).build();
    }
    DisplayDocument::builder().error(err.to_string()).build()
}

pub fn loading() -> DisplayDocument {
    DisplayDocument::builder().status(LOADING_MESSAGE).build()
}

pub trait Renderer: Send + Sync {
    fn render(&self, doc: &DisplayDocument) -> String;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    /// `styled` only affects the text renderer.
    pub fn renderer(self, styled: bool) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Text => Box::new(text::TextRenderer::new(styled)),
            OutputFormat::Html => Box::new(html::HtmlRenderer),
            OutputFormat::Json => Box::new(json::JsonRenderer),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{AirQuality, AqiReading, DisasterAlert, Pollutant};

    pub(crate) fn sample_result() -> RecommendationResult {
        RecommendationResult {
            recommended_crop: "rice".into(),
            ph: 6.5,
            temperature: 28.4,
            air_quality: AirQuality {
                aqi: AqiReading::Index(42.0),
                pollutants: vec![
                    Pollutant {
                        name: "pm25".into(),
                        value: Some(12.0),
                    },
                    Pollutant {
                        name: "pm10".into(),
                        value: None,
                    },
                ],
            },
            disaster_alerts: vec![],
        }
    }

    #[test]
    fn fields_come_in_fixed_order() {
        let doc = recommendation(&sample_result());
        let labels: Vec<&str> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Field { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["Crop", "Soil pH", "Temp", "AQI"]);
    }

    #[test]
    fn ph_rounds_to_two_places() {
        let doc = recommendation(&sample_result());
        assert!(doc.blocks.contains(&Block::Field {
            label: "Soil pH".into(),
            value: "6.50".into(),
        }));
    }

    #[test]
    fn pollutant_lines_use_placeholder() {
        let doc = recommendation(&sample_result());
        assert!(doc.blocks.contains(&Block::List {
            items: vec!["pm25: 12".into(), "pm10: N/A".into()],
        }));
    }

    #[test]
    fn empty_alerts_show_notice() {
        let doc = recommendation(&sample_result());
        assert_eq!(
            doc.blocks.last(),
            Some(&Block::Paragraph {
                text: NO_ALERTS_MESSAGE.into()
            })
        );
    }

    #[test]
    fn alerts_keep_input_order() {
        let mut result = sample_result();
        result.disaster_alerts = vec![
            DisasterAlert {
                kind: "Flood".into(),
                severity: "high".into(),
                description: "River overflow".into(),
            },
            DisasterAlert {
                kind: "Cyclone".into(),
                severity: "moderate".into(),
                description: "Coastal winds".into(),
            },
        ];
        let doc = recommendation(&result);
        let kinds: Vec<&str> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Alert { alert_type, .. } => Some(alert_type.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, ["Flood", "Cyclone"]);
    }

    #[test]
    fn validation_failure_is_a_prompt_not_an_error() {
        let doc = failure(&ClientError::Validation);
        assert_eq!(
            doc.blocks,
            vec![Block::Status {
                text: PROMPT_MESSAGE.into()
            }]
        );
    }

    #[test]
    fn transport_failure_is_an_error() {
        let doc = failure(&ClientError::Transport("connection refused".into()));
        assert_eq!(
            doc.blocks,
            vec![Block::Error {
                message: "connection refused".into()
            }]
        );
    }

    #[test]
    fn ph_ties_round_up() {
        let mut result = sample_result();
        for (ph, shown) in [(6.125, "6.13"), (6.625, "6.63")] {
            result.ph = ph;
            assert!(recommendation(&result).blocks.contains(&Block::Field {
                label: "Soil pH".into(),
                value: shown.into(),
            }));
        }
    }
}
