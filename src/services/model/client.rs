use crate::config::{GatewayConfig, RequestShape, ResponseShape};
use crate::error::{RelayError, Result};
use crate::scoring::{normalize, rank, RankedResult, RawModelResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::json;
use std::future::Future;
use tracing::{debug, warn};

/// Anything that can turn a query into a raw model response.
pub trait Classifier {
    fn classify(&self, query: &str) -> impl Future<Output = Result<RawModelResponse>> + Send;
}

/// Outbound client for the intent-classification model service.
#[derive(Clone)]
pub struct ModelGateway {
    client: Client,
    config: GatewayConfig,
}

impl ModelGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::gateway(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Same endpoint and timeout, but every classify is exactly one request.
    pub fn single_attempt(&self) -> Self {
        let mut config = self.config.clone();
        config.retry.max_retries = 0;
        Self { client: self.client.clone(), config }
    }

    /// Classify, normalize and rank in one step.
    pub async fn predict(&self, query: &str) -> Result<RankedResult> {
        let raw = self.classify(query).await?;
        let labels = normalize(&raw)?;
        rank(query, labels)
    }

    async fn classify_with_retry(&self, query: &str) -> Result<RawModelResponse> {
        let policy = &self.config.retry;
        let mut attempt = 0;
        loop {
            match self.classify_once(query).await {
                Ok(raw) => return Ok(raw),
                Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                    attempt += 1;
                    let delay = policy.backoff_for(attempt);
                    warn!("Model service attempt {} failed ({}), retrying in {:?}", attempt, e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn classify_once(&self, query: &str) -> Result<RawModelResponse> {
        let request = match &self.config.request_shape {
            RequestShape::QueryGet { param } => {
                self.client.get(query_url(&self.config.endpoint, param, query))
            }
            RequestShape::JsonPost { field } => {
                let mut body = serde_json::Map::new();
                body.insert(field.clone(), json!(query));
                self.client.post(&self.config.endpoint).json(&body)
            }
        };

        debug!("Querying model service at {}", self.config.endpoint);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(RelayError::gateway(format!("model service returned {}", response.status())));
        }

        read_body(response, self.config.response_shape, &self.config.request_shape).await
    }
}

impl Classifier for ModelGateway {
    fn classify(&self, query: &str) -> impl Future<Output = Result<RawModelResponse>> + Send {
        self.classify_with_retry(query)
    }
}

/// Percent-encodes with `%20` for spaces; the text proxy does not decode `+`.
fn query_url(endpoint: &str, param: &str, query: &str) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", endpoint, sep, urlencoding::encode(param), urlencoding::encode(query))
}

async fn read_body(
    response: Response,
    shape: ResponseShape,
    request_shape: &RequestShape,
) -> Result<RawModelResponse> {
    let is_json = match shape {
        ResponseShape::Json => true,
        ResponseShape::Text => false,
        // The JSON proxy replies without a content-type; fall back to what we sent.
        ResponseShape::Auto => match response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            Some(ct) => is_json_media_type(ct),
            None => matches!(request_shape, RequestShape::JsonPost { .. }),
        },
    };

    let text = response.text().await?;
    if is_json {
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| RelayError::MalformedResponse(format!("invalid JSON body: {}", e)))?;
        Ok(RawModelResponse::JsonRanking(value))
    } else {
        Ok(RawModelResponse::TextBlob(text))
    }
}

/// Media types compare case-insensitively and ignore parameters such as `charset`.
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
