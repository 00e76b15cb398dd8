//! Shared helpers: spawn a server backed by mock generators and an in-memory journal.

use std::sync::Arc;

use oneir::{DreamAnalyzer, MockImageGenerator, MockTextGenerator};
use serve::AppState;
use tokio::net::TcpListener;

pub const LABELED_ANSWER: &str = "\
INTERPRETATION: The snake stands for change you are resisting.
SYMBOLS:
- Snake | transformation
- Water | emotions
EMOTIONS: Unease mixed with curiosity.
ADVICE: Write down what you are avoiding.";

pub fn analyzer() -> DreamAnalyzer {
    DreamAnalyzer::new(Arc::new(MockTextGenerator::fixed(LABELED_ANSWER)))
        .with_image_generator(Arc::new(MockImageGenerator::default()))
}

/// Spawns the server with `analyzer` and returns its base URL (`http://127.0.0.1:<port>`).
pub async fn spawn_with(analyzer: DreamAnalyzer) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(analyzer, journal::Store::in_memory().unwrap())
        .with_cors_origins(vec!["http://localhost:3000".to_string()]);
    tokio::spawn(serve::run_serve_on_listener(listener, state));
    format!("http://{}", addr)
}

pub async fn spawn_server() -> String {
    spawn_with(analyzer()).await
}

/// Returns (status, parsed JSON body) and logs the body with `[e2e] received:`.
pub async fn json_of(res: reqwest::Response) -> (u16, serde_json::Value) {
    let status = res.status().as_u16();
    let text = res.text().await.unwrap();
    eprintln!("[e2e] received: {}", text);
    let body = if text.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, body)
}
