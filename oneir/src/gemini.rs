//! Wire types and transport for the Gemini `generateContent` endpoint, shared by the text
//! and image clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DreamError;

/// Builds the shared HTTP client with a bounded per-request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, DreamError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(DreamError::from_transport)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn text prompt.
    pub(crate) fn text(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: None,
        }
    }

    /// Prompt that asks for an image alongside text.
    pub(crate) fn image(prompt: &'a str) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            }),
            ..Self::text(prompt)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: String,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate; `None` when there is no text at all.
    pub(crate) fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First inline (base64) payload of the first candidate.
    pub(crate) fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}

/// POST `{base}/v1beta/models/{model}:generateContent?key=...`.
pub(crate) async fn generate_content(
    client: &reqwest::Client,
    base: &str,
    api_key: &str,
    model: &str,
    body: &GenerateContentRequest<'_>,
) -> Result<GenerateContentResponse, DreamError> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        base.trim_end_matches('/'),
        model
    );
    let res = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(body)
        .send()
        .await
        .map_err(DreamError::from_transport)?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(DreamError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }
    res.json::<GenerateContentResponse>()
        .await
        .map_err(|e| DreamError::UpstreamMalformed(e.to_string()))
}
