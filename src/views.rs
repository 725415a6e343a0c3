use crate::client::BackendClient;
use crate::errors::ClientError;
use crate::models::{DashboardSummary, HashtagCount, Post, TimeInsights, TopPost};
use crate::recommend::Recommendations;
use crate::stats::{self, DEFAULT_HASHTAG_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Engagement,
    Hashtags,
    TimeInsights,
    Recommendations,
    TopPosts,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Engagement,
        ViewKind::Hashtags,
        ViewKind::TimeInsights,
        ViewKind::Recommendations,
        ViewKind::TopPosts,
    ];
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ViewData {
    Engagement(DashboardSummary),
    Hashtags(Vec<HashtagCount>),
    TimeInsights(TimeInsights),
    Recommendations(Recommendations),
    TopPosts(Vec<TopPost>),
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success {
        data: ViewData,
    },
    Error {
        message: String,
        status: Option<u16>,
    },
    NoCollection {
        message: String,
    },
}

impl ViewState {
    pub fn from_result(result: Result<ViewData, ClientError>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(ClientError::NoCollectionSelected) => Self::no_collection(),
            Err(err) => {
                warn!("view request failed: {err}");
                Self::Error {
                    message: err.user_message(),
                    status: err.status(),
                }
            }
        }
    }

    pub fn no_collection() -> Self {
        Self::NoCollection {
            message: ClientError::NoCollectionSelected.user_message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: ViewKind,
    generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: ViewState,
}

#[derive(Debug, Default)]
pub struct ViewBoard {
    slots: Mutex<HashMap<ViewKind, Slot>>,
}

impl ViewBoard {
    pub async fn state(&self, kind: ViewKind) -> ViewState {
        let slots = self.slots.lock().await;
        slots
            .get(&kind)
            .map(|slot| slot.state.clone())
            .unwrap_or_default()
    }

    pub async fn begin(&self, kind: ViewKind) -> Ticket {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(kind).or_default();
        slot.generation += 1;
        slot.state = ViewState::Loading;
        Ticket {
            kind,
            generation: slot.generation,
        }
    }

    /// Applies `state` if `ticket` is still current. Returns the view's state afterwards.
    pub async fn finish(&self, ticket: Ticket, state: ViewState) -> ViewState {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(ticket.kind).or_default();
        if slot.generation == ticket.generation {
            slot.state = state;
        } else {
            debug!(
                view = ?ticket.kind,
                stale = ticket.generation,
                current = slot.generation,
                "discarding superseded view result"
            );
        }
        slot.state.clone()
    }

    pub async fn seed(&self, kind: ViewKind, state: ViewState) {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(kind).or_default();
        slot.generation += 1;
        slot.state = state;
    }

    pub async fn seed_from_posts(&self, posts: &[Post]) {
        for kind in [ViewKind::Engagement, ViewKind::Hashtags, ViewKind::TimeInsights] {
            let data = aggregate(kind, posts, DEFAULT_HASHTAG_LIMIT);
            if let Some(data) = data {
                self.seed(kind, ViewState::Success { data }).await;
            }
        }
    }

    pub async fn reset(&self) {
        let mut slots = self.slots.lock().await;
        for slot in slots.values_mut() {
            slot.generation += 1;
            slot.state = ViewState::Idle;
        }
    }
}

pub async fn load(
    client: &BackendClient,
    kind: ViewKind,
    collection: Option<&str>,
    hashtag_limit: usize,
) -> Result<ViewData, ClientError> {
    let collection = collection.ok_or(ClientError::NoCollectionSelected)?;

    match kind {
        ViewKind::Recommendations => {
            let payload = client.recommend(collection).await?;
            Ok(ViewData::Recommendations(payload.into_recommendations()))
        }
        ViewKind::TopPosts => Ok(ViewData::TopPosts(client.top_posts(collection).await?)),
        post_view => {
            let posts = client.fetch_posts(collection).await?;
            aggregate(post_view, &posts, hashtag_limit)
                .ok_or_else(|| ClientError::format("view", "view does not aggregate posts"))
        }
    }
}

fn aggregate(kind: ViewKind, posts: &[Post], hashtag_limit: usize) -> Option<ViewData> {
    match kind {
        ViewKind::Engagement => Some(ViewData::Engagement(stats::summarize(posts))),
        ViewKind::Hashtags => Some(ViewData::Hashtags(stats::by_hashtag(posts, hashtag_limit))),
        ViewKind::TimeInsights => Some(ViewData::TimeInsights(stats::time_insights(posts))),
        ViewKind::Recommendations | ViewKind::TopPosts => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashtags(tags: &[&str]) -> ViewState {
        ViewState::Success {
            data: ViewData::Hashtags(
                tags.iter()
                    .map(|tag| HashtagCount {
                        hashtag: tag.to_string(),
                        count: 1,
                        likes: 0,
                    })
                    .collect(),
            ),
        }
    }

    #[tokio::test]
    async fn views_start_idle() {
        let board = ViewBoard::default();
        for kind in ViewKind::ALL {
            assert_eq!(board.state(kind).await, ViewState::Idle);
        }
    }

    #[tokio::test]
    async fn superseded_result_is_discarded() {
        let board = ViewBoard::default();
        let first = board.begin(ViewKind::Hashtags).await;
        let second = board.begin(ViewKind::Hashtags).await;

        let applied = board.finish(second, hashtags(&["#new"])).await;
        assert_eq!(applied, hashtags(&["#new"]));

        let after_stale = board.finish(first, hashtags(&["#old"])).await;
        assert_eq!(after_stale, hashtags(&["#new"]));
        assert_eq!(board.state(ViewKind::Hashtags).await, hashtags(&["#new"]));
    }

    #[tokio::test]
    async fn retry_moves_error_back_to_loading() {
        let board = ViewBoard::default();
        let ticket = board.begin(ViewKind::TopPosts).await;
        let failed = ViewState::from_result(Err(ClientError::HttpStatus {
            status: 500,
            payload: None,
        }));
        board.finish(ticket, failed).await;
        assert!(matches!(
            board.state(ViewKind::TopPosts).await,
            ViewState::Error {
                status: Some(500),
                ..
            }
        ));

        board.begin(ViewKind::TopPosts).await;
        assert_eq!(board.state(ViewKind::TopPosts).await, ViewState::Loading);
    }

    #[tokio::test]
    async fn tickets_are_per_view() {
        let board = ViewBoard::default();
        let engagement = board.begin(ViewKind::Engagement).await;
        board.begin(ViewKind::Hashtags).await;

        let state = board.finish(engagement, hashtags(&["#a"])).await;
        assert_eq!(state, hashtags(&["#a"]));
    }

    #[tokio::test]
    async fn seeding_supersedes_in_flight_requests() {
        let board = ViewBoard::default();
        let ticket = board.begin(ViewKind::Engagement).await;
        board
            .seed_from_posts(&[Post {
                id: "1".to_string(),
                likes_count: 4,
                hashtags: Some(vec!["fresh".to_string()]),
                ..Post::default()
            }])
            .await;

        let state = board.finish(ticket, ViewState::Idle).await;
        assert!(matches!(state, ViewState::Success { .. }));
        assert_eq!(
            board.state(ViewKind::Hashtags).await,
            ViewState::Success {
                data: ViewData::Hashtags(vec![HashtagCount {
                    hashtag: "#fresh".to_string(),
                    count: 1,
                    likes: 4,
                }]),
            }
        );
        assert_eq!(board.state(ViewKind::TopPosts).await, ViewState::Idle);
    }

    #[test]
    fn missing_collection_maps_to_its_own_state() {
        let state = ViewState::from_result(Err(ClientError::NoCollectionSelected));
        assert!(matches!(state, ViewState::NoCollection { .. }));
    }

    #[test]
    fn view_kinds_use_kebab_case_paths() {
        let kind: ViewKind = serde_json::from_str("\"time-insights\"").unwrap();
        assert_eq!(kind, ViewKind::TimeInsights);
        assert_eq!(
            serde_json::to_string(&ViewKind::TopPosts).unwrap(),
            "\"top-posts\""
        );
    }
}
