use super::types::{RawModelResponse, ScoredLabel};
use crate::error::{RelayError, Result};
use serde::Deserialize;

const RANKING_FIELD: &str = "intent_ranking";

#[derive(Deserialize)]
struct RankingEntry {
    name: Option<String>,
    confidence: Option<f64>,
}

/// Flatten either response shape into labels, keeping the service's order.
pub fn normalize(raw: &RawModelResponse) -> Result<Vec<ScoredLabel>> {
    match raw {
        RawModelResponse::TextBlob(text) => normalize_text(text),
        RawModelResponse::JsonRanking(value) => normalize_json(value),
    }
}

pub fn normalize_text(text: &str) -> Result<Vec<ScoredLabel>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_score_line)
        .collect()
}

/// `in:flight_book:0.87` -> (`in:flight_book`, 0.87). Colons inside the name survive.
pub fn parse_score_line(line: &str) -> Result<ScoredLabel> {
    let line = line.trim_end_matches('\r');
    let (name, score) = line
        .rsplit_once(':')
        .ok_or_else(|| RelayError::MalformedResponse(format!("no score separator in {:?}", line)))?;

    let confidence: f64 = score
        .trim()
        .parse()
        .map_err(|_| RelayError::MalformedResponse(format!("bad score {:?} in {:?}", score, line)))?;

    checked_label(name.to_string(), confidence)
}

pub fn normalize_json(value: &serde_json::Value) -> Result<Vec<ScoredLabel>> {
    let ranking = value
        .get(RANKING_FIELD)
        .ok_or_else(|| RelayError::MalformedResponse(format!("missing `{}`", RANKING_FIELD)))?;

    let entries: Vec<RankingEntry> = serde_json::from_value(ranking.clone())
        .map_err(|e| RelayError::MalformedResponse(format!("bad `{}`: {}", RANKING_FIELD, e)))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let name = entry
                .name
                .ok_or_else(|| RelayError::MalformedResponse(format!("ranking entry {} has no name", i)))?;
            let confidence = entry
                .confidence
                .ok_or_else(|| RelayError::MalformedResponse(format!("ranking entry {} has no confidence", i)))?;
            checked_label(name, confidence)
        })
        .collect()
}

fn checked_label(name: String, confidence: f64) -> Result<ScoredLabel> {
    if name.is_empty() {
        return Err(RelayError::MalformedResponse("empty label name".to_string()));
    }
    if !confidence.is_finite() {
        return Err(RelayError::MalformedResponse(format!("non-finite score for {}", name)));
    }
    Ok(ScoredLabel { name, confidence })
}
