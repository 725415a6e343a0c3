use crate::client::BackendClient;
use crate::storage::{is_no_collection, CollectionStore};
use crate::views::ViewBoard;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct CollectionContext {
    current: Arc<RwLock<Option<String>>>,
}

impl CollectionContext {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn from_stored(stored: &str) -> Self {
        if is_no_collection(stored) {
            Self::default()
        } else {
            Self::new(Some(stored.trim().to_string()))
        }
    }

    pub async fn current(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    pub async fn select(&self, name: &str) {
        *self.current.write().await = Some(name.to_string());
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: BackendClient,
    pub store: CollectionStore,
    pub collection: CollectionContext,
    pub views: Arc<ViewBoard>,
}

impl AppState {
    pub fn new(client: BackendClient, store: CollectionStore, collection: CollectionContext) -> Self {
        Self {
            client,
            store,
            collection,
            views: Arc::new(ViewBoard::default()),
        }
    }
}
