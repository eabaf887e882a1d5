//! Application state shared by every request handler
//!
//! Built once at startup around the data-access layer and handed to the
//! router. Cloning is cheap; all clones share the same store client.

use crate::dal::{InMemoryTodoDal, TodoDal};
use std::sync::Arc;

/// Context passed to handlers through axum's `State` extractor
#[derive(Clone)]
pub struct AppState {
    /// Data-access layer, shared across requests
    pub dal: Arc<dyn TodoDal>,
}

impl AppState {
    /// Create application state around a data-access layer
    pub fn new(dal: Arc<dyn TodoDal>) -> Self {
        Self { dal }
    }

    /// Application state over an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTodoDal::new()))
    }

    /// Release the store once the server has stopped
    pub async fn shutdown(&self) {
        self.dal.shutdown().await;
    }
}
