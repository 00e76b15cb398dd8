use std::sync::Arc;
use std::time::Duration;

use oneir::{DreamAnalyzer, GeminiTextClient, MockImageGenerator, MockTextGenerator, RetryPolicy};
use serde_json::json;

use crate::common::{analyzer, json_of, spawn_server, spawn_with};

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_backends() {
    let base = spawn_server().await;
    let (status, body) = json_of(reqwest::get(format!("{base}/health")).await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["textModel"], "mock");
    assert_eq!(body["imageProvider"], "mock");
}

#[tokio::test(flavor = "multi_thread")]
async fn health_without_image_backend_says_none() {
    let base = spawn_with(DreamAnalyzer::new(Arc::new(MockTextGenerator::canned()))).await;
    let (_, body) = json_of(reqwest::get(format!("{base}/health")).await.unwrap()).await;
    assert_eq!(body["imageProvider"], "none");
}

#[tokio::test(flavor = "multi_thread")]
async fn interpret_returns_all_sections_and_matched_symbols() {
    let base = spawn_server().await;
    let res = reqwest::Client::new()
        .post(format!("{base}/interpret"))
        .json(&json!({ "dreamText": "A snake swam through dark water", "mood": ["uneasy"] }))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(res).await;
    assert_eq!(status, 200);
    assert!(body["id"].as_str().unwrap().starts_with("interp-"));
    let parsed = &body["interpretation"];
    assert_eq!(
        parsed["overallMeaning"],
        "The snake stands for change you are resisting."
    );
    assert_eq!(parsed["keySymbols"][0]["symbol"], "Snake");
    assert_eq!(parsed["keySymbols"][1]["meaning"], "emotions");
    assert_eq!(parsed["emotionalThemes"], "Unease mixed with curiosity.");
    assert_eq!(parsed["actionableAdvice"], "Write down what you are avoiding.");

    let names: Vec<&str> = body["symbols"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["symbol"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Snake"));
    assert!(names.contains(&"Water"));
}

#[tokio::test(flavor = "multi_thread")]
async fn interpret_rejects_blank_and_malformed_bodies() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/interpret"))
        .json(&json!({ "dreamText": "   " }))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(res).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("missing input"));

    let res = client
        .post(format!("{base}/interpret"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(res).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_model_without_fallback_is_service_unavailable() {
    let client = GeminiTextClient::new("http://127.0.0.1:1", "key", "m", Duration::from_secs(2))
        .unwrap()
        .with_retry(RetryPolicy::none());
    let base = spawn_with(DreamAnalyzer::new(Arc::new(client))).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/interpret"))
        .json(&json!({ "description": "flying" }))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(res).await;
    assert_eq!(status, 503);
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn symbols_fall_back_to_generic_entries() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = json_of(
        client
            .post(format!("{base}/symbols"))
            .json(&json!({ "text": "I was FLYING over water" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["symbols"].as_array().unwrap().len(), 2);

    let (_, body) = json_of(
        client
            .post(format!("{base}/symbols"))
            .json(&json!({ "text": "nothing recognisable" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["symbols"][0]["symbol"], "Dream");
    assert_eq!(body["symbols"].as_array().unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn prompt_embeds_dream_text() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (status, body) = json_of(
        client
            .post(format!("{base}/prompt"))
            .json(&json!({ "dreamText": "a locked door" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("a locked door"));
    assert!(prompt.contains("INTERPRETATION:"));

    let res = client
        .post(format!("{base}/prompt"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn generate_image_returns_data_url() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (status, body) = json_of(
        client
            .post(format!("{base}/generate-image"))
            .json(&json!({ "image_prompt": "an owl in fog", "style": "watercolor" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    let vis = &body["visualization"];
    assert!(vis["id"].as_str().unwrap().starts_with("vis-"));
    assert!(vis["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert!(vis["title"].as_str().unwrap().contains("watercolor"));

    let res = client
        .post(format!("{base}/generate-image"))
        .json(&json!({ "style": "ink" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn generate_image_without_backend_is_service_unavailable() {
    let base = spawn_with(DreamAnalyzer::new(Arc::new(MockTextGenerator::canned()))).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/generate-image"))
        .json(&json!({ "description": "an owl" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 503);
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_survives_image_failure() {
    let base = spawn_with(
        analyzer().with_image_generator(Arc::new(MockImageGenerator::failing("quota exceeded"))),
    )
    .await;
    let (status, body) = json_of(
        reqwest::Client::new()
            .post(format!("{base}/analyze"))
            .json(&json!({ "dreamText": "a snake", "style": "ink" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["interpretation"]["id"].is_string());
    assert!(body.get("visualization").is_none());
    assert!(body["visualizationError"]
        .as_str()
        .unwrap()
        .contains("quota exceeded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn cors_allows_configured_origin() {
    let base = spawn_server().await;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/interpret"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_model_with_offline_fallback_still_answers() {
    let client = GeminiTextClient::new("http://127.0.0.1:1", "key", "m", Duration::from_secs(2))
        .unwrap()
        .with_retry(RetryPolicy::none());
    let analyzer = DreamAnalyzer::new(Arc::new(client))
        .with_offline_fallback(Arc::new(MockTextGenerator::canned()));
    let base = spawn_with(analyzer).await;
    let (status, body) = json_of(
        reqwest::Client::new()
            .post(format!("{base}/interpret"))
            .json(&json!({ "description": "falling from a tower" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["interpretation"]["keySymbols"].is_array());
    assert_ne!(body["interpretation"]["overallMeaning"], "No interpretation available");
}
