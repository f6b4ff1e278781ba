use crate::store::StoreClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
}
