use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Failures surfaced to the HTTP front door.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Transport failure talking to the model service (connect, timeout, non-2xx).
    #[error("model service error: {message}")]
    Gateway { message: String, timed_out: bool },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("no labels to rank")]
    EmptyResult,

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    pub fn gateway(message: impl Into<String>) -> Self {
        RelayError::Gateway { message: message.into(), timed_out: false }
    }

    /// Stable machine-readable name, used as the `error` field of response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Gateway { .. } => "gateway_error",
            RelayError::MalformedResponse(_) => "malformed_response",
            RelayError::EmptyResult => "empty_result",
            RelayError::InvalidRecord(_) => "invalid_record",
            RelayError::MissingParameter(_) => "missing_parameter",
            RelayError::InvalidQuery(_) => "invalid_query",
            RelayError::Io(_) => "io_error",
        }
    }

    /// Caller mistakes are 4xx; the model service or local disk misbehaving is 5xx.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidRecord(_) => 400,
            RelayError::MissingParameter(_) => 400,
            RelayError::InvalidQuery(_) => 400,
            RelayError::Gateway { timed_out: true, .. } => 504,
            RelayError::Gateway { .. } => 502,
            RelayError::MalformedResponse(_) => 502,
            RelayError::EmptyResult => 500,
            RelayError::Io(_) => 500,
        }
    }

    /// Only transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RelayError::Gateway { .. })
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Gateway {
            timed_out: e.is_timeout(),
            message: e.to_string(),
        }
    }
}
