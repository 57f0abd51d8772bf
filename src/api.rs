//! Fetch gateway for the landfall dashboard API.
//!
//! Every response from the collaborator arrives wrapped in a
//! `{success, data, error}` envelope; this module performs the request,
//! classifies the outcome, and hands back the unwrapped payload.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{ClientConfig, Hurricane};

/// Fallback message when the envelope is malformed or carries no error text.
pub const INVALID_RESPONSE: &str = "Invalid API response format.";

/// Failure taxonomy for one gateway call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connection refused, timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// A response arrived with a non-success status code.
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    /// The body is not the expected envelope, or the envelope reports failure.
    #[error("{message}")]
    Api { message: String },
}

/// Transport-level wrapper every collaborator response must use.
///
/// `success` is optional on purpose: a body without it is malformed and is
/// treated as a non-success rather than a crash on missing-field access.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or classify the envelope as a protocol failure.
    pub fn into_payload(self) -> Result<T, FetchError> {
        match self.success {
            Some(true) => self.data.ok_or_else(|| FetchError::Api {
                message: INVALID_RESPONSE.to_string(),
            }),
            Some(false) => Err(FetchError::Api {
                message: self.error.unwrap_or_else(|| INVALID_RESPONSE.to_string()),
            }),
            None => Err(FetchError::Api {
                message: INVALID_RESPONSE.to_string(),
            }),
        }
    }

    /// Success check only; the payload (if any) is discarded.
    pub fn into_ack(self) -> Result<(), FetchError> {
        match self.success {
            Some(true) => Ok(()),
            Some(false) => Err(FetchError::Api {
                message: self.error.unwrap_or_else(|| INVALID_RESPONSE.to_string()),
            }),
            None => Err(FetchError::Api {
                message: INVALID_RESPONSE.to_string(),
            }),
        }
    }
}

/// Stateless HTTP client bound to one collaborator base URL.
///
/// Safe to invoke concurrently; calls are independent, with no coalescing
/// and no retry policy of its own.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base_url}/{path}` and decode the response envelope.
    ///
    /// The body is read as text and decoded separately so that a non-envelope
    /// body classifies as a protocol failure, not a transport one.
    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|_| FetchError::Api {
            message: INVALID_RESPONSE.to_string(),
        })
    }

    /// Fetch the full ordered set of Florida landfall records.
    pub async fn fetch_florida_landfalls(&self) -> Result<Vec<Hurricane>, FetchError> {
        self.get_envelope::<Vec<Hurricane>>("hurricanes/landfall/florida")
            .await?
            .into_payload()
    }

    /// Trigger the server-side CSV export. Only the envelope's success flag
    /// matters; no file handle or URL comes back.
    pub async fn request_csv_export(&self) -> Result<(), FetchError> {
        self.get_envelope::<serde_json::Value>("export_csv")
            .await?
            .into_ack()
    }
}
