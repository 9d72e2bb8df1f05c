//! Integration tests for the catalog client against a mock HTTP server.

use serde_json::json;
use storydrop_catalog::{CatalogClient, CatalogConfig, CatalogError, CatalogSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig::new(server.uri(), "test-anon-key")).unwrap()
}

fn story_row(id: &str, narration: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Story {id}"),
        "script": "Speaker 1: hello",
        "ttsAudioUrl": narration,
        "updatedAt": "2025-06-20T05:05:25Z",
        "showSlug": "tiny-tales",
        "shows": {
            "name": "Tiny Tales",
            "image_url": "cover.png",
            "music_url": "https://cdn.example.com/bed.mp3"
        }
    })
}

#[tokio::test]
async fn fetch_stories_sends_credentials_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .and(header("apikey", "test-anon-key"))
        .and(query_param("ttsAudioUrl", "not.is.null"))
        .and(query_param("order", "updatedAt.desc"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            story_row("s1", Some("https://cdn.example.com/s1.mp3")),
            story_row("s2", Some("https://cdn.example.com/s2.mp3")),
        ])))
        .mount(&server)
        .await;

    let stories = client_for(&server).fetch_stories().await.unwrap();
    assert_eq!(stories.len(), 2);
    for story in &stories {
        assert_eq!(story.show.name, "Tiny Tales");
        assert!(story.has_music());
        assert!((10..=300).contains(&story.like_count));
    }
}

#[tokio::test]
async fn rows_without_narration_are_dropped_client_side() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            story_row("s1", Some("https://cdn.example.com/s1.mp3")),
            story_row("s2", None),
        ])))
        .mount(&server)
        .await;

    let stories = client_for(&server).fetch_stories().await.unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].id.as_str(), "s1");
}

#[tokio::test]
async fn empty_catalog_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_stories().await.unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_stories().await.unwrap_err();
    match err {
        CatalogError::CatalogError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn load_catalog_falls_back_to_demo_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let load = client_for(&server).load_catalog().await;
    assert_eq!(load.source, CatalogSource::Demo);
    assert!(!load.stories.is_empty());
    assert!(load.notice().is_some());
}

#[tokio::test]
async fn load_catalog_falls_back_to_demo_when_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let load = client_for(&server).load_catalog().await;
    assert_eq!(load.source, CatalogSource::Demo);
    assert!(!load.stories.is_empty());
}

#[tokio::test]
async fn unparseable_catalog_url_is_rejected_at_construction() {
    let err = CatalogClient::new(CatalogConfig::new("not a url", "key")).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidUrl(_)));

    let err = CatalogClient::new(CatalogConfig::new("ftp://catalog.example.com", "key"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidUrl(_)));
}

#[tokio::test]
async fn base_url_path_is_preserved_when_building_the_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proxy/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            story_row("s1", Some("https://cdn.example.com/s1.mp3")),
        ])))
        .mount(&server)
        .await;

    // Trailing slash or not, a path-carrying base keeps its prefix.
    let config = CatalogConfig::new(format!("{}/proxy", server.uri()), "test-anon-key");
    let stories = CatalogClient::new(config).unwrap().fetch_stories().await.unwrap();
    assert_eq!(stories.len(), 1);
}

#[tokio::test]
async fn missing_credentials_degrade_to_demo() {
    let client = CatalogClient::new(CatalogConfig::unconfigured()).unwrap();

    let err = client.fetch_stories().await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredentials));

    let load = client.load_catalog().await;
    assert_eq!(load.source, CatalogSource::Demo);
}

#[tokio::test]
async fn fetch_script_returns_caption_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .and(query_param("select", "script"))
        .and(query_param("id", "eq.s1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "script": "Speaker 1: hello again" }])),
        )
        .mount(&server)
        .await;

    let script = client_for(&server)
        .fetch_script(&storydrop_core::StoryId::new("s1"))
        .await
        .unwrap();
    assert_eq!(script.as_deref(), Some("Speaker 1: hello again"));
}

#[tokio::test]
async fn fetch_script_for_story_without_captions_is_none() {
    let server = MockServer::start().await;

    // The row exists; its script is null. Not the same as an unknown id.
    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .and(query_param("id", "eq.s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "script": null }])))
        .mount(&server)
        .await;

    let script = client_for(&server)
        .fetch_script(&storydrop_core::StoryId::new("s1"))
        .await
        .unwrap();
    assert_eq!(script, None);
}

#[tokio::test]
async fn fetch_script_for_unknown_story_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_script(&storydrop_core::StoryId::new("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::StoryNotFound(_)));
}
