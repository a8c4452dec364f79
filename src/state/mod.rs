use std::sync::Arc;

use crate::dao::league_store::LeagueStore;

/// Handle to [`AppState`] shared by every handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the injected storage handle.
pub struct AppState {
    store: Arc<dyn LeagueStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The store is connected before the state exists; there is no degraded mode.
    pub fn new(store: Arc<dyn LeagueStore>) -> SharedState {
        Arc::new(Self { store })
    }

    /// Storage backend shared by every request.
    pub fn store(&self) -> Arc<dyn LeagueStore> {
        self.store.clone()
    }
}
