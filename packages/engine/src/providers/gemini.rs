//! Gemini generateContent adapter
//!
//! Unlike the other vendors, Gemini routes by model name in the URL path
//! and authenticates with a `key` query parameter instead of a header.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::providers::{CallParams, TEMPERATURE};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Instruction<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Instruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub(super) async fn call(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    params: &CallParams,
) -> Result<String> {
    let url = format!(
        "{base_url}/v1beta/models/{}:generateContent",
        params.model
    );

    let body = GenerateRequest {
        system_instruction: Instruction {
            parts: [TextPart {
                text: &params.system,
            }],
        },
        contents: [Content {
            role: "user",
            parts: [TextPart { text: &params.user }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
        },
    };

    let resp = http
        .post(&url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body_text = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body_text, "generateContent rejected");
        return Err(EngineError::ProviderApi {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let api_response: GenerateResponse = resp.json().await?;

    Ok(api_response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default())
}
