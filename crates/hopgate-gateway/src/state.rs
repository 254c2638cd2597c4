use hopgate_core::KvStore;
use hopgate_redirector::{Dispatcher, TokioSpawner};
use std::sync::Arc;

/// The mapping store, type-erased so the backend is chosen at startup.
pub type SharedStore = Arc<dyn KvStore>;

pub type GatewayDispatcher = Dispatcher<SharedStore, TokioSpawner>;

#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<GatewayDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: GatewayDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &GatewayDispatcher {
        &self.dispatcher
    }
}
