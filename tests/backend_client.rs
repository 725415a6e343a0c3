use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use insta_insights::intake::ingest_request;
use insta_insights::recommend::{PayloadSource, RecommendationPayload};
use insta_insights::stats;
use insta_insights::{BackendClient, ClientError};

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(
        server.uri(),
        server.uri(),
        format!("{}/", server.uri()),
        Duration::from_secs(5),
    )
    .expect("failed to build test client")
}

fn sample_posts() -> serde_json::Value {
    json!([
        {"_id": "p1", "type": "Video", "likesCount": 120, "commentsCount": 12,
         "hashtags": ["travel", "#sunset"], "timestamp": "2025-03-17T10:00:00.000Z"},
        {"_id": "p2", "type": "Image", "likesCount": 80, "commentsCount": 4,
         "hashtags": ["travel"], "timestamp": "2025-03-18T21:30:00.000Z"},
        {"_id": "p3", "likesCount": 5, "commentsCount": 0}
    ])
}

#[tokio::test]
async fn fetch_posts_accepts_bare_and_wrapped_bodies_identically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connection/samples/bare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_posts()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/connection/samples/wrapped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "count": 3, "data": sample_posts()})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bare = client.fetch_posts("bare").await.expect("bare body");
    let wrapped = client.fetch_posts("wrapped").await.expect("wrapped body");

    assert_eq!(bare.len(), 3);
    assert_eq!(bare, wrapped);
    assert_eq!(
        stats::summarize_in(&bare, &chrono::Utc),
        stats::summarize_in(&wrapped, &chrono::Utc)
    );
    assert_eq!(bare[2].post_type, None);
}

#[tokio::test]
async fn fetch_posts_keeps_records_with_duplicate_ids_and_null_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connection/samples/scraped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"_id": "65f0", "id": "3312", "type": "Image", "likesCount": 10, "commentsCount": 2,
             "displayUrl": "https://cdn/a.jpg", "media_url": "https://cdn/b.jpg"},
            {"_id": "65f1", "id": "3313", "likesCount": null, "commentsCount": null,
             "mentions": null, "timestamp": "2025-03-17T10:00:00.000Z"}
        ]})))
        .mount(&server)
        .await;

    let posts = client_for(&server)
        .fetch_posts("scraped")
        .await
        .expect("posts with both id keys");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "65f0");
    assert_eq!(posts[0].media_url.as_deref(), Some("https://cdn/a.jpg"));
    assert_eq!(posts[1].likes_count, 0);
    assert_eq!(posts[1].comments_count, 0);

    let summary = stats::summarize_in(&posts, &chrono::Utc);
    assert_eq!(summary.total_likes, 10);
    assert_eq!(summary.time_data.len(), 1);
}

#[tokio::test]
async fn fetch_posts_rejects_unknown_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connection/samples/odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_posts("odd").await.unwrap_err();
    assert!(matches!(err, ClientError::Format { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetch_posts_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connection/samples/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such collection"})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_posts("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "API error (404): no such collection");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = BackendClient::new(uri.clone(), uri.clone(), uri, Duration::from_secs(5))
        .expect("failed to build test client");
    let err = client.fetch_posts("anything").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn recommend_sends_collection_and_decodes_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .and(body_json(json!({"collection_name": "collection_a"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": {
                "Video": {"expected_average_likes": 150.0, "expected_average_comments": 10.0, "engagement_score": 0.9}
            }
        })))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .recommend("collection_a")
        .await
        .expect("recommendations");
    let RecommendationPayload::Wrapped(entries) = payload else {
        panic!("expected wrapped payload, got {payload:?}");
    };
    assert_eq!(entries[0].post_type, "Video");
    assert_eq!(entries[0].engagement_score, 0.9);
}

#[tokio::test]
async fn recommend_surfaces_validation_payload() {
    let server = MockServer::start().await;
    let detail = json!({"detail": [{"loc": ["body", "collection_name"], "msg": "field required"}]});
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(422).set_body_json(detail.clone()))
        .mount(&server)
        .await;

    let err = client_for(&server).recommend("x").await.unwrap_err();
    match &err {
        ClientError::Validation { payload } => assert_eq!(payload, &detail),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(err.user_message().contains("field required"));
}

#[tokio::test]
async fn recommend_reports_unparseable_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_string("model is warming up"))
        .mount(&server)
        .await;

    let payload = client_for(&server).recommend("x").await.expect("decoded");
    assert_eq!(payload.source(), PayloadSource::Unparseable);
}

#[tokio::test]
async fn top_posts_require_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/top5_posts"))
        .and(body_json(json!({"collection_name": "good"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "top_posts": [
                {"_id": "p1", "type": "Video", "engagement_score": 0.97, "likesCount": 120, "commentsCount": 12}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/top5_posts"))
        .and(body_json(json!({"collection_name": "bad"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let posts = client.top_posts("good").await.expect("top posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].likes_count, Some(120));

    let err = client.top_posts("bad").await.unwrap_err();
    assert!(matches!(err, ClientError::Format { .. }), "got {err:?}");
}

#[tokio::test]
async fn ingestion_posts_job_and_returns_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apify/run-actor"))
        .and(body_json(json!({
            "directUrls": ["https://www.instagram.com/natgeo/"],
            "resultsType": "posts",
            "resultsLimit": 30,
            "searchType": "user",
            "searchLimit": 1,
            "addParentData": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"collectionName": "collection_natgeo", "data": sample_posts()}
        })))
        .mount(&server)
        .await;

    let ingested = client_for(&server)
        .run_ingestion(&ingest_request("natgeo"))
        .await
        .expect("ingestion");
    assert_eq!(ingested.collection_name, "collection_natgeo");
    assert_eq!(ingested.data.len(), 3);
}

#[tokio::test]
async fn ingestion_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apify/run-actor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"data": {"collectionName": "late", "data": []}})),
        )
        .mount(&server)
        .await;

    let client = BackendClient::new(
        server.uri(),
        server.uri(),
        server.uri(),
        Duration::from_millis(200),
    )
    .expect("failed to build test client");
    let err = client
        .run_ingestion(&ingest_request("slow"))
        .await
        .unwrap_err();
    match err {
        ClientError::Network(inner) => assert!(inner.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}
