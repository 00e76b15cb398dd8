//! Upstream clients against a local wiremock server: request shape, model fallback,
//! retry on 5xx, no retry on 4xx, image decoding.

mod init_logging;

use std::time::Duration;

use oneir::{
    DreamError, GeminiImageClient, GeminiTextClient, HuggingFaceImageClient, ImageGenerator,
    RetryPolicy, TextGenerator,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn text_answer(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::fixed(1, Duration::from_millis(10))
}

#[tokio::test]
async fn text_client_posts_prompt_and_reads_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({"contents": [{"parts": [{"text": "dream prompt"}]}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_answer("INTERPRETATION: ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(server.uri(), "test-key", "gemini-2.0-flash", TIMEOUT)
        .unwrap()
        .with_retry(RetryPolicy::none());
    assert_eq!(client.generate("dream prompt").await.unwrap(), "INTERPRETATION: ok");
}

#[tokio::test]
async fn text_client_falls_back_to_next_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_answer("from pro")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(server.uri(), "k", "gemini-2.0-flash", TIMEOUT)
        .unwrap()
        .with_fallback_models(vec!["gemini-pro".to_string()])
        .with_retry(fast_retry());
    assert_eq!(client.generate("p").await.unwrap(), "from pro");
}

#[tokio::test]
async fn server_error_is_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_answer("second try")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(server.uri(), "k", "m", TIMEOUT)
        .unwrap()
        .with_retry(fast_retry());
    assert_eq!(client.generate("p").await.unwrap(), "second try");
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(server.uri(), "k", "m", TIMEOUT)
        .unwrap()
        .with_retry(fast_retry());
    let err = client.generate("p").await.unwrap_err();
    match err {
        DreamError::UpstreamStatus { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn envelope_without_text_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(server.uri(), "k", "m", TIMEOUT)
        .unwrap()
        .with_retry(RetryPolicy::none());
    assert!(matches!(
        client.generate("p").await,
        Err(DreamError::UpstreamMalformed(_))
    ));
}

#[tokio::test]
async fn unreachable_upstream_is_unavailable() {
    let client = GeminiTextClient::new("http://127.0.0.1:1", "k", "m", TIMEOUT)
        .unwrap()
        .with_retry(RetryPolicy::none());
    assert!(matches!(
        client.generate("p").await,
        Err(DreamError::UpstreamUnavailable(_))
    ));
}

#[tokio::test]
async fn gemini_image_decodes_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/img-model:generateContent"))
        .and(body_partial_json(
            json!({"generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is your dream"},
                {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiImageClient::new(server.uri(), "k", "img-model", TIMEOUT).unwrap();
    let image = client.generate("a moonlit lake").await.unwrap();
    assert_eq!(image.bytes, vec![1, 2, 3]);
    assert_eq!(image.mime_type, "image/png");
}

#[tokio::test]
async fn gemini_image_without_inline_data_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_answer("only words")))
        .mount(&server)
        .await;

    let client = GeminiImageClient::new(server.uri(), "k", "img-model", TIMEOUT)
        .unwrap()
        .with_retry(RetryPolicy::none());
    assert!(matches!(
        client.generate("x").await,
        Err(DreamError::UpstreamMalformed(_))
    ));
}

#[tokio::test]
async fn huggingface_sends_bearer_and_returns_body_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/black-forest-labs/FLUX.1-schnell"))
        .and(header("authorization", "Bearer hf-token"))
        .and(body_partial_json(
            json!({"inputs": "a red door", "options": {"wait_for_model": true}}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xff, 0xd8, 0xff]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HuggingFaceImageClient::new(
        server.uri(),
        "hf-token",
        "black-forest-labs/FLUX.1-schnell",
        TIMEOUT,
    )
    .unwrap();
    let image = client.generate("a red door").await.unwrap();
    assert_eq!(image.bytes, vec![0xff, 0xd8, 0xff]);
    assert_eq!(image.mime_type, "image/jpeg");
}

#[tokio::test]
async fn huggingface_json_error_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": "Model is loading"})),
        )
        .mount(&server)
        .await;

    let client = HuggingFaceImageClient::new(server.uri(), "t", "m", TIMEOUT)
        .unwrap()
        .with_retry(RetryPolicy::none());
    assert!(matches!(
        client.generate("x").await,
        Err(DreamError::UpstreamMalformed(_))
    ));
}
