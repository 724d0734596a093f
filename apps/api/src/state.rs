use std::sync::Arc;

use crate::extract::Extractor;

/// Shared application state injected into route handlers via Axum extractors.
/// The service is stateless beyond this: no database, no cache, no store.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable PDF extractor. Production wires `GeminiExtractor`; tests
    /// stub the trait.
    pub extractor: Arc<dyn Extractor>,
}
