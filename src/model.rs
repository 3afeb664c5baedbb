//! Wire types for the `/recommend` endpoint.
//!
//! [`RecommendationResult`] is decoded straight from the response body and
//! lives only for one request cycle: it is rendered into a
//! [`crate::render::DisplayDocument`] and dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body sent to the endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest<'a> {
    pub city: &'a str,
}

/// Decoded `/recommend` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationResult {
    pub recommended_crop: String,
    pub ph: f64,
    pub temperature: f64,
    pub air_quality: AirQuality,
    #[serde(default)]
    pub disaster_alerts: Vec<DisasterAlert>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirQuality {
    pub aqi: AqiReading,
    #[serde(default, deserialize_with = "pollutants_in_order")]
    pub pollutants: Vec<Pollutant>,
}

/// AQI as reported upstream. The server falls back to a text label
/// ("Unavailable", "N/A") when its air quality provider fails.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AqiReading {
    Index(f64),
    Label(String),
}

impl fmt::Display for AqiReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AqiReading::Index(v) => write!(f, "{}", format_number(*v)),
            AqiReading::Label(s) => f.write_str(s),
        }
    }
}

/// One pollutant reading; `value` is `None` when the station had no reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Pollutant {
    pub name: String,
    pub value: Option<f64>,
}

impl Pollutant {
    /// Placeholder shown for a missing reading.
    pub const MISSING: &'static str = "N/A";

    pub fn display_value(&self) -> String {
        self.value
            .map(format_number)
            .unwrap_or_else(|| Self::MISSING.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisasterAlert {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub description: String,
}

/// Shortest decimal form: `12.0` prints as `12`, `12.5` as `12.5`.
pub fn format_number(v: f64) -> String {
    format!("{v}")
}

/// Two decimal places, exact ties rounded away from zero (`6.125` → `6.13`).
pub fn format_fixed2(v: f64) -> String {
    // A tie at the third decimal is an odd multiple of 1/8; scaling by 8 and
    // 100 is exact for those, so `round` sees the true midpoint.
    let eighths = v * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (v * 100.0).round() / 100.0);
    }
    format!("{v:.2}")
}

fn pollutants_in_order<'de, D>(deserializer: D) -> Result<Vec<Pollutant>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // serde_json is built with `preserve_order`, so the map keeps key order.
    let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(map
        .into_iter()
        .map(|(name, value)| Pollutant {
            name,
            value: value.as_f64(),
        })
        .collect())
}
