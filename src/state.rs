//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortLinkService;

/// Application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub short_link_service: Arc<ShortLinkService>,
}

impl AppState {
    pub fn new(short_link_service: Arc<ShortLinkService>) -> Self {
        Self { short_link_service }
    }
}
