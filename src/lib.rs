//! Crop recommendation client.
//!
//! Sends a city name to a `/recommend` endpoint and renders the returned
//! crop, soil, air quality and disaster alert data. See
//! [`client::RecommendationClient`] for the activation pipeline.

pub mod client;
pub mod config;
pub mod interactive;
pub mod model;
pub mod region;
pub mod render;

pub use client::{Phase, RecommendationClient};
pub use config::Config;
