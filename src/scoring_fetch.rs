use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

/// Raw JSON returned by the scoring endpoint, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPayload(pub Value);

impl ScoringPayload {
    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("invalid scoring json: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Status code for HTTP-level failures, `None` for transport or parse errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RequestFailed { status } => Some(*status),
            FetchError::Network(err) => err.status().map(|s| s.as_u16()),
            FetchError::Parse(_) => None,
        }
    }
}

/// Make sure the endpoint carries the `output=json` hint.
pub fn scoring_url(base: &str) -> String {
    let base = base.trim();
    let has_hint = base
        .split_once('?')
        .map(|(_, query)| query.split('&').any(|pair| pair == "output=json"))
        .unwrap_or(false);
    if has_hint {
        return base.to_string();
    }
    if base.contains('?') {
        format!("{base}&output=json")
    } else {
        format!("{base}?output=json")
    }
}

pub fn fetch_scoring(client: &Client, url: &str) -> Result<ScoringPayload, FetchError> {
    let url = scoring_url(url);
    let resp = client.get(&url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::RequestFailed {
            status: status.as_u16(),
        });
    }
    let body = resp.text()?;
    parse_scoring_json(&body)
}

pub fn parse_scoring_json(raw: &str) -> Result<ScoringPayload, FetchError> {
    let value: Value = serde_json::from_str(raw.trim())?;
    Ok(ScoringPayload(value))
}
