use crate::errors::AppError;
use crate::intake;
use crate::models::{CollectionResponse, IntakeRequest, IntakeResponse, RefreshParams};
use crate::state::AppState;
use crate::stats::DEFAULT_HASHTAG_LIMIT;
use crate::ui::{render_dashboard, render_intake};
use crate::views::{self, ViewKind, ViewState};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};

pub async fn index() -> Html<String> {
    Html(render_intake())
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let collection = state.collection.current().await;
    Html(render_dashboard(collection.as_deref()))
}

pub async fn get_collection(State(state): State<AppState>) -> Json<CollectionResponse> {
    Json(CollectionResponse {
        collection_name: state.collection.current().await,
    })
}

pub async fn intake(
    State(state): State<AppState>,
    Json(payload): Json<IntakeRequest>,
) -> Result<Json<IntakeResponse>, AppError> {
    let response = intake::submit(&state, &payload.handle).await?;
    Ok(Json(response))
}

pub async fn get_view(
    State(state): State<AppState>,
    Path(kind): Path<ViewKind>,
) -> Json<ViewState> {
    Json(state.views.state(kind).await)
}

pub async fn refresh_view(
    State(state): State<AppState>,
    Path(kind): Path<ViewKind>,
    Query(params): Query<RefreshParams>,
) -> Result<Json<ViewState>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_HASHTAG_LIMIT);
    if limit == 0 {
        return Err(AppError::bad_request("limit must be at least 1"));
    }

    let collection = state.collection.current().await;
    if collection.is_none() {
        let no_collection = ViewState::no_collection();
        state.views.seed(kind, no_collection.clone()).await;
        return Ok(Json(no_collection));
    }

    let ticket = state.views.begin(kind).await;
    let result = views::load(&state.client, kind, collection.as_deref(), limit).await;
    let current = state
        .views
        .finish(ticket, ViewState::from_result(result))
        .await;
    Ok(Json(current))
}
