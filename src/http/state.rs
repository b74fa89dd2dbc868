//! Application state for the HTTP server.

use crate::service::ListingService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ListingService,
}

impl AppState {
    pub fn new(service: ListingService) -> Self {
        Self { service }
    }
}
