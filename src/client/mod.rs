//! Recommendation client: validate → dispatch → render, once per activation.
//!
//! Collaborators are injected: a [`Dispatcher`] for the network call, a
//! [`DisplayRegion`] for output and a [`Renderer`] for layout. Clones share
//! one [`RequestTracker`], so overlapping activations on clones of the same
//! client obey the configured [`ConcurrencyPolicy`].

pub mod dispatch;
pub mod error;
pub mod input;
pub mod tracker;

use crate::config::Config;
use crate::region::DisplayRegion;
use crate::render::{self, DisplayDocument, Renderer};
use dispatch::{Dispatcher, HttpDispatcher, HttpOptions};
use error::ClientError;
use input::InputSource;
use std::sync::Arc;
use tracker::{ConcurrencyPolicy, RequestTracker};

/// Per-activation state. `Rejected`, `Rendered`, `Failed` and `Superseded`
/// are terminal; the next activation starts again from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Rejected,
    Dispatching,
    Rendered,
    Failed,
    /// A newer activation started before this response settled; the
    /// response was dropped unwritten.
    Superseded,
}

#[derive(Clone)]
pub struct RecommendationClient {
    dispatcher: Arc<dyn Dispatcher>,
    region: Arc<dyn DisplayRegion>,
    renderer: Arc<dyn Renderer>,
    tracker: Arc<RequestTracker>,
    policy: ConcurrencyPolicy,
    show_loading: bool,
}

impl RecommendationClient {
    pub fn new(
        dispatcher: Arc<dyn Dispatcher>,
        region: Arc<dyn DisplayRegion>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            dispatcher,
            region,
            renderer,
            tracker: Arc::new(RequestTracker::new()),
            policy: ConcurrencyPolicy::default(),
            show_loading: true,
        }
    }

    /// HTTP-backed client built from resolved configuration.
    pub fn from_config(
        config: &Config,
        region: Arc<dyn DisplayRegion>,
        styled: bool,
    ) -> Result<Self, ClientError> {
        let mut options = HttpOptions::new(config.endpoint.clone());
        options.timeout = config.timeout();
        let dispatcher = HttpDispatcher::new(&options)?;
        tracing::info!(
            endpoint = dispatcher.endpoint(),
            policy = config.policy.as_str(),
            "Recommendation client ready"
        );

        let renderer: Arc<dyn Renderer> = Arc::from(config.format.renderer(styled));
        Ok(Self::new(Arc::new(dispatcher), region, renderer).with_policy(config.policy))
    }

    pub fn with_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether to write a "Loading…" status while the request is in flight.
    pub fn with_loading_status(mut self, enabled: bool) -> Self {
        self.show_loading = enabled;
        self
    }

    /// Run one activation against `source` and return its terminal phase.
    ///
    /// Errors never escape: they are written to the region and logged.
    pub async fn activate(&self, source: &(impl InputSource + ?Sized)) -> Phase {
        let mut phase = Phase::Idle;
        // Taken before validation so a rejected submission also supersedes
        // whatever is still in flight.
        let ticket = self.tracker.begin();
        phase = enter(phase, Phase::Validating);

        let city = match input::collect(source) {
            Ok(city) => city,
            Err(err) => {
                tracing::info!("Input rejected: {err}");
                self.show(&render::failure(&err));
                return enter(phase, Phase::Rejected);
            }
        };

        phase = enter(phase, Phase::Dispatching);
        if self.show_loading {
            self.show(&render::loading());
        }

        let outcome = self.dispatcher.dispatch(&city).await;

        if !self.tracker.may_write(ticket, self.policy) {
            tracing::debug!(
                ticket = ticket.id(),
                city = %city,
                "Discarding response superseded by a newer request"
            );
            return enter(phase, Phase::Superseded);
        }

        match outcome {
            Ok(result) => {
                self.show(&render::recommendation(&result));
                enter(phase, Phase::Rendered)
            }
            Err(err) => {
                tracing::error!(city = %city, error = ?err, "Recommendation request failed: {err}");
                self.show(&render::failure(&err));
                enter(phase, Phase::Failed)
            }
        }
    }

    fn show(&self, doc: &DisplayDocument) {
        let content = self.renderer.render(doc);
        if let Err(e) = self.region.write(&content) {
            tracing::warn!("Failed to update display region: {e:#}");
        }
    }
}

fn enter(from: Phase, to: Phase) -> Phase {
    tracing::trace!(?from, ?to, "phase transition");
    to
}
