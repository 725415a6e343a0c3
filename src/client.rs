use crate::errors::ClientError;
use crate::models::{
    CollectionRequest, IngestData, IngestRequest, IngestResponse, Post, TopPost, TopPostsResponse,
};
use crate::recommend::{self, RecommendationPayload};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PostsEnvelope {
    Bare(Vec<Post>),
    Wrapped { data: Vec<Post> },
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    posts_base: String,
    ingest_base: String,
    scoring_base: String,
    ingest_timeout: Duration,
}

impl BackendClient {
    pub fn new(
        posts_base: impl Into<String>,
        ingest_base: impl Into<String>,
        scoring_base: impl Into<String>,
        ingest_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            posts_base: posts_base.into().trim_end_matches('/').to_string(),
            ingest_base: ingest_base.into().trim_end_matches('/').to_string(),
            scoring_base: scoring_base.into().trim_end_matches('/').to_string(),
            ingest_timeout,
        })
    }

    /// `GET /connection/samples/{collection}`; accepts `[...]` or `{"data": [...]}`.
    pub async fn fetch_posts(&self, collection: &str) -> Result<Vec<Post>, ClientError> {
        let url = format!("{}/connection/samples/{collection}", self.posts_base);
        let body = send(self.http.get(&url)).await?;
        let envelope: PostsEnvelope = serde_json::from_slice(&body)
            .map_err(|err| ClientError::format("posts", err))?;

        let posts = match envelope {
            PostsEnvelope::Bare(posts) | PostsEnvelope::Wrapped { data: posts } => posts,
        };
        debug!(collection, count = posts.len(), "fetched posts");
        Ok(posts)
    }

    pub async fn run_ingestion(&self, request: &IngestRequest) -> Result<IngestData, ClientError> {
        let url = format!("{}/apify/run-actor", self.ingest_base);
        let builder = self
            .http
            .post(&url)
            .timeout(self.ingest_timeout)
            .json(request);
        let body = send(builder).await?;
        let response: IngestResponse = serde_json::from_slice(&body)
            .map_err(|err| ClientError::format("ingestion", err))?;
        Ok(response.data)
    }

    pub async fn recommend(&self, collection: &str) -> Result<RecommendationPayload, ClientError> {
        let url = format!("{}/recommend", self.scoring_base);
        let builder = self.http.post(&url).json(&CollectionRequest {
            collection_name: collection,
        });
        let body = send(builder).await?;
        Ok(recommend::decode(&String::from_utf8_lossy(&body)))
    }

    pub async fn top_posts(&self, collection: &str) -> Result<Vec<TopPost>, ClientError> {
        let url = format!("{}/top5_posts", self.scoring_base);
        let builder = self.http.post(&url).json(&CollectionRequest {
            collection_name: collection,
        });
        let body = send(builder).await?;
        let response: TopPostsResponse = serde_json::from_slice(&body)
            .map_err(|err| ClientError::format("top posts", err))?;
        if response.status != "success" {
            return Err(ClientError::format(
                "top posts",
                format!("backend reported status {:?}", response.status),
            ));
        }
        Ok(response.top_posts)
    }
}

async fn send(builder: RequestBuilder) -> Result<Vec<u8>, ClientError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(body.to_vec());
    }

    let payload = error_payload(&body);
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(ClientError::Validation {
            payload: payload.unwrap_or(Value::Null),
        });
    }
    Err(ClientError::HttpStatus {
        status: status.as_u16(),
        payload,
    })
}

fn error_payload(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}
