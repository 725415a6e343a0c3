use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const NO_COLLECTION: &str = "Nothing to worry about!";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredState {
    #[serde(rename = "currentCollectionName", default)]
    current_collection_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
}

impl CollectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> String {
        load_state(&self.path)
            .await
            .current_collection_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| NO_COLLECTION.to_string())
    }

    /// Persists `name`. Failures are logged and swallowed.
    pub async fn set(&self, name: &str) {
        let state = StoredState {
            current_collection_name: Some(name.to_string()),
        };
        if let Err(err) = persist_state(&self.path, &state).await {
            error!(path = %self.path.display(), "failed to persist collection name: {err}");
        }
    }
}

pub fn is_no_collection(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name == NO_COLLECTION
}

async fn load_state(path: &Path) -> StoredState {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                warn!("failed to parse state file: {err}");
                StoredState::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredState::default(),
        Err(err) => {
            error!("failed to read state file: {err}");
            StoredState::default()
        }
    }
}

async fn persist_state(path: &Path, state: &StoredState) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let payload = serde_json::to_vec_pretty(state)?;
    fs::write(path, payload).await
}
