use crate::errors::{backend_message, AppError, ClientError};
use crate::models::{IngestRequest, IntakeResponse};
use crate::state::AppState;
use tracing::{info, warn};

pub const RESULTS_LIMIT: u32 = 30;
pub const RESULTS_TYPE: &str = "posts";
pub const SEARCH_TYPE: &str = "user";
pub const SEARCH_LIMIT: u32 = 1;
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const GENERIC_FAILURE: &str = "Failed to analyze profile. Please try again.";

/// Trims whitespace and one leading `@`.
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}

pub fn profile_url(handle: &str) -> String {
    format!("https://www.instagram.com/{handle}/")
}

pub fn ingest_request(handle: &str) -> IngestRequest {
    IngestRequest {
        direct_urls: vec![profile_url(handle)],
        results_type: RESULTS_TYPE.to_string(),
        results_limit: RESULTS_LIMIT,
        search_type: SEARCH_TYPE.to_string(),
        search_limit: SEARCH_LIMIT,
        add_parent_data: false,
    }
}

pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::HttpStatus {
            payload: Some(payload),
            ..
        } => backend_message(payload),
        ClientError::Validation { payload } => backend_message(payload),
        _ => None,
    }
    .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

pub async fn submit(state: &AppState, raw_handle: &str) -> Result<IntakeResponse, AppError> {
    let handle = normalize_handle(raw_handle)
        .ok_or_else(|| AppError::bad_request("Please enter an Instagram username."))?;

    info!(handle = %handle, "starting ingestion");
    let ingested = state
        .client
        .run_ingestion(&ingest_request(&handle))
        .await
        .map_err(|err| {
            warn!(handle = %handle, "ingestion failed: {err}");
            AppError::bad_gateway(failure_message(&err))
        })?;

    let collection_name = ingested.collection_name.trim().to_string();
    if collection_name.is_empty() {
        return Err(AppError::bad_gateway(GENERIC_FAILURE));
    }

    state.store.set(&collection_name).await;
    state.collection.select(&collection_name).await;
    state.views.reset().await;
    state.views.seed_from_posts(&ingested.data).await;

    info!(
        collection = %collection_name,
        posts = ingested.data.len(),
        "ingestion complete"
    );
    Ok(IntakeResponse {
        collection_name,
        post_count: ingested.data.len(),
        redirect: DASHBOARD_PATH.to_string(),
    })
}
