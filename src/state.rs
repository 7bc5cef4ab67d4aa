//! Shared application state for all routes.

use crate::store::ArtisanStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Initialized once at startup and shared by every request.
    pub store: Arc<dyn ArtisanStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArtisanStore>) -> Self {
        Self { store }
    }
}
