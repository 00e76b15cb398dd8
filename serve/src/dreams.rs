//! Dream routes: health, interpretation, symbols, prompt preview, image, combined analysis.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use oneir::{
    build_prompt, DreamAnalysis, DreamError, DreamInterpretation, DreamInterpretationRequest,
    SymbolMatch, Visualization,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SymbolsRequest {
    #[serde(alias = "dreamText", alias = "description")]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub symbols: Vec<SymbolMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PromptRequest {
    #[serde(rename = "dreamText", alias = "description", alias = "text")]
    pub dream_text: String,
}

/// `image_prompt` is the name the web client sends; `description` is accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateImageRequest {
    #[serde(alias = "description", alias = "imagePrompt")]
    pub image_prompt: String,
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub visualization: Visualization,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub request: DreamInterpretationRequest,
    #[serde(default)]
    pub style: Option<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "textModel": state.analyzer.text_model(),
        "imageProvider": state.analyzer.image_provider().unwrap_or("none"),
    }))
}

pub async fn interpret(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DreamInterpretationRequest>, JsonRejection>,
) -> Result<Json<DreamInterpretation>, ApiError> {
    let Json(request) = payload?;
    let result = state.analyzer.interpret(&request).await?;
    Ok(Json(result))
}

pub async fn symbols(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SymbolsRequest>, JsonRejection>,
) -> Result<Json<SymbolsResponse>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(SymbolsResponse {
        symbols: state.analyzer.symbols(&body.text),
    }))
}

pub async fn prompt(
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    if body.dream_text.trim().is_empty() {
        return Err(DreamError::MissingInput("dream text").into());
    }
    Ok(Json(json!({ "prompt": build_prompt(&body.dream_text) })))
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(body) = payload?;
    let visualization = state
        .analyzer
        .visualize(&body.image_prompt, body.style.as_deref())
        .await?;
    tracing::info!(id = %visualization.id, "visualization generated");
    Ok(Json(GenerateImageResponse { visualization }))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<DreamAnalysis>, ApiError> {
    let Json(body) = payload?;
    let analysis = state
        .analyzer
        .analyze(&body.request, body.style.as_deref())
        .await?;
    Ok(Json(analysis))
}
