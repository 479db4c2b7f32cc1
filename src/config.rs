use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How the query is put on the wire to the model service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestShape {
    /// `GET <endpoint>?<param>=<query>` (text REST proxy reads `doc`).
    QueryGet { param: String },
    /// `POST <endpoint>` with body `{"<field>": query}` (JSON proxy reads `text`).
    JsonPost { field: String },
}

impl RequestShape {
    pub fn query_get() -> Self {
        RequestShape::QueryGet { param: "doc".to_string() }
    }

    pub fn json_post() -> Self {
        RequestShape::JsonPost { field: "text".to_string() }
    }
}

impl Default for RequestShape {
    fn default() -> Self {
        Self::query_get()
    }
}

/// Which of the two documented response bodies to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseShape {
    /// Decide from the response `content-type`.
    #[default]
    Auto,
    Text,
    Json,
}

/// Bounded retry with exponential backoff. Zero retries reproduces the baseline behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): doubles each time, capped.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .map_or(self.max_backoff, |d| d.min(self.max_backoff))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub request_shape: RequestShape,
    pub response_shape: ResponseShape,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            request_shape: RequestShape::default(),
            response_shape: ResponseShape::default(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub bind_address: String,
    pub port: u16,
    pub gateway: GatewayConfig,
    pub data_file: PathBuf,
    /// Address of the public console, substituted into the landing page.
    pub console_address: String,
    pub static_dir: Option<PathBuf>,
    pub debug: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            gateway: GatewayConfig::default(),
            data_file: PathBuf::from("data.csv"),
            console_address: "http://localhost:5000".to_string(),
            static_dir: None,
            debug: false,
        }
    }
}

impl RelayConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub gateway: GatewayConfig,
    pub input_file: PathBuf,
    pub warmup: usize,
    /// Skip the first line of the input file.
    pub has_header: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            input_file: PathBuf::from("data.csv"),
            warmup: 1,
            has_header: false,
        }
    }
}
