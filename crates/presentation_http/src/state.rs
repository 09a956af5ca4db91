//! Application state shared by all handlers

use std::{fmt, sync::Arc};

use application::QueryFacade;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Facade over all registered network providers
    pub facade: Arc<QueryFacade>,
}

impl AppState {
    /// Wrap a facade for sharing across handlers
    #[must_use]
    pub fn new(facade: QueryFacade) -> Self {
        Self {
            facade: Arc::new(facade),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("providers", &self.facade.list_provider_ids())
            .field("limits", &self.facade.limits())
            .finish()
    }
}
