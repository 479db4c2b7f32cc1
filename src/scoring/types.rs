use serde::{Deserialize, Serialize};

/// One intent label with the model's score for it. Scores are not clamped to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub name: String,
    pub confidence: f64,
}

impl ScoredLabel {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self { name: name.into(), confidence }
    }

    /// `[name, confidence]`, the pair shape served to browsers.
    pub fn as_pair(&self) -> (&str, f64) {
        (&self.name, self.confidence)
    }
}

/// Body returned by the model service, tagged at the gateway boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawModelResponse {
    /// Newline separated `<prefix>:<name>:<score>` lines.
    TextBlob(String),
    /// Object carrying an `intent_ranking` array of `{name, confidence}`.
    JsonRanking(serde_json::Value),
}

/// Per-request ranking. `all` is non-empty and `top == all[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub query: String,
    pub top: ScoredLabel,
    pub all: Vec<ScoredLabel>,
}
