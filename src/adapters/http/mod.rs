//! HTTP adapter: Implementation of PredictionApi over reqwest.
//!
//! Blocking client; callers run it off the UI thread. One request per call,
//! no retry, default timeouts.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::domain::{PredictionRequest, RawHistory, RawPrediction};
use crate::ports::{ModelCatalog, PredictionApi};
use crate::PulmocheckError;

/// Longest response body kept in a transport error message.
const MAX_ERROR_BODY: usize = 512;

/// Client for the Flask prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    base_url: String,
    client: Client,
}

impl HttpPredictionClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Config` if the URL does not parse, or
    /// `PulmocheckError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PulmocheckError> {
        let base_url = base_url.into();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| PulmocheckError::Config(format!("invalid API URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PulmocheckError::Config(format!(
                "unsupported scheme '{}' in API URL",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| PulmocheckError::Transport {
                status: None,
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PulmocheckError> {
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while end > 0 && !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            tracing::warn!(status = status.as_u16(), "Prediction service returned an error status");
            return Err(PulmocheckError::Transport {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let text = response.text().map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Undecodable response body: {}", e);
            PulmocheckError::MalformedResponse(e.to_string())
        })
    }
}

fn transport_error(e: reqwest::Error) -> PulmocheckError {
    PulmocheckError::Transport {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

impl PredictionApi for HttpPredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<RawPrediction, PulmocheckError> {
        let url = self.url_for("/api/predict");
        tracing::debug!(model = %request.model, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(transport_error)?;
        Self::decode(response)
    }

    fn history(&self, limit: usize) -> Result<RawHistory, PulmocheckError> {
        let url = self.url_for("/api/predictions");
        tracing::debug!(limit, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .map_err(transport_error)?;
        Self::decode(response)
    }

    fn models(&self) -> Result<ModelCatalog, PulmocheckError> {
        let response = self
            .client
            .get(self.url_for("/api/models"))
            .send()
            .map_err(transport_error)?;
        Self::decode(response)
    }

    fn health(&self) -> bool {
        match self.client.get(self.url_for("/api/health")).send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}
