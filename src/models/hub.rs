//! Remote binary sentiment classifier (Source A).
//!
//! Talks to a Hugging Face style inference endpoint serving
//! `distilbert-base-uncased-finetuned-sst-2-english`. The model accepts a bounded
//! input length, so callers send one chunk per request.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{AnalyzeConfig, ChunkVote};
use crate::error::AppError;
use crate::models::BinaryClassifier;

pub struct HubClassifier {
    client: Client,
    endpoint: String,
    token: String,
    chunk_chars: usize,
}

impl HubClassifier {
    pub fn from_config(config: &AnalyzeConfig) -> Result<Self, AppError> {
        let token = config
            .hub_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::config("Missing HF_TOKEN in environment (.env) or --hub-token."))?;
        if config.chunk_chars == 0 {
            return Err(AppError::config("--chunk-chars must be >= 1."));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.hub_endpoint.clone(),
            token,
            chunk_chars: config.chunk_chars,
        })
    }
}

impl BinaryClassifier for HubClassifier {
    fn classify_chunk(&self, chunk: &str) -> Result<ChunkVote, AppError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&InferenceRequest { inputs: chunk })
            .send()
            .map_err(|e| AppError::classifier(format!("Binary classifier request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            tracing::warn!(%status, body = %detail, "binary classifier rejected request");
            return Err(AppError::classifier(format!(
                "Binary classifier request failed with status {status}."
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::classifier(format!("Failed to read binary classifier response: {e}")))?;
        parse_inference_response(&body)
    }

    fn max_chars(&self) -> usize {
        self.chunk_chars
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: Option<String>,
    score: f64,
}

/// Text-classification responses come either nested per input or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Parse an inference body and keep the highest-scoring label.
pub fn parse_inference_response(body: &str) -> Result<ChunkVote, AppError> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| AppError::contract(format!("Failed to parse binary classifier response: {e}")))?;

    let candidates = match parsed {
        InferenceResponse::Nested(mut outer) => {
            if outer.is_empty() {
                Vec::new()
            } else {
                outer.swap_remove(0)
            }
        }
        InferenceResponse::Flat(list) => list,
    };

    let best = candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or_else(|| AppError::contract("Binary classifier returned no labels."))?;

    if !(0.0..=1.0).contains(&best.score) {
        return Err(AppError::contract(format!(
            "Binary classifier score {} is outside [0, 1].",
            best.score
        )));
    }

    Ok(ChunkVote {
        label: best.label,
        score: best.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_nested_response() {
        let body = r#"[[{"label":"POSITIVE","score":0.9998},{"label":"NEGATIVE","score":0.0002}]]"#;
        let vote = parse_inference_response(body).unwrap();
        assert_eq!(vote.label.as_deref(), Some("POSITIVE"));
        assert!((vote.score - 0.9998).abs() < 1e-12);
    }

    #[test]
    fn parses_flat_response_and_picks_max() {
        let body = r#"[{"label":"POSITIVE","score":0.2},{"label":"NEGATIVE","score":0.8}]"#;
        let vote = parse_inference_response(body).unwrap();
        assert_eq!(vote.label.as_deref(), Some("NEGATIVE"));
    }

    #[test]
    fn missing_label_is_kept_absent() {
        let body = r#"[{"score":0.7}]"#;
        let vote = parse_inference_response(body).unwrap();
        assert_eq!(vote.label, None);
    }

    #[test]
    fn empty_or_malformed_is_contract_violation() {
        for body in ["[]", "[[]]", r#"{"error":"Model is loading"}"#, r#"[{"label":"POSITIVE"}]"#] {
            let err = parse_inference_response(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Contract, "body={body}");
        }
    }

    #[test]
    fn missing_token_is_config_error() {
        let config = AnalyzeConfig::default();
        let err = HubClassifier::from_config(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
