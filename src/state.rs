// src/state.rs

use std::sync::Arc;

use crate::provider::Provider;

/// Shared application state.
///
/// The relay's one external dependency, the conversational-agent provider,
/// is injected here so handlers can run against a stub in tests. Nothing in
/// this struct is mutable: each request is independent.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }
}
