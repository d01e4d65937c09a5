use std::sync::Arc;

use crate::assistant::{Assistant, LoadingTracker};
use crate::config::Config;
use crate::export::Exporter;
use crate::gate::GateConfig;
use crate::layout::TextMeasurer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub assistant: Assistant,
    /// Fields with an assistant request in flight.
    pub loading: LoadingTracker,
    pub exporter: Exporter,
    pub gate: GateConfig,
    /// Text measurement used for every composition pass.
    pub measurer: Arc<dyn TextMeasurer>,
    pub config: Config,
}
