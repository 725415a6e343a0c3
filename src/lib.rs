pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod recommend;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod views;

pub use app::router;
pub use client::BackendClient;
pub use config::AppConfig;
pub use errors::{AppError, ClientError};
pub use state::{AppState, CollectionContext};
pub use storage::{CollectionStore, NO_COLLECTION};
