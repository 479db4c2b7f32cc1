use super::report::{LatencyReport, LatencySample};
use crate::error::RelayError;
use crate::services::model::Classifier;
use std::path::Path;
use thiserror::Error;
use tokio::time::Instant;
use tracing::info;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("{phase} pass: query {index} ({query:?}) failed: {source}")]
    QueryFailed {
        phase: &'static str,
        index: usize,
        query: String,
        #[source]
        source: RelayError,
    },

    #[error("no queries to run")]
    NoQueries,

    #[error("failed to read queries: {0}")]
    Io(#[from] std::io::Error),
}

/// Sequential latency benchmark against a classifier.
pub struct LatencyHarness<C> {
    classifier: C,
}

impl<C: Classifier> LatencyHarness<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Run `warmup` discarded passes, then one measured pass. Aborts on the first failure.
    pub async fn run(&self, queries: &[String], warmup: usize) -> Result<LatencyReport, HarnessError> {
        if queries.is_empty() {
            return Err(HarnessError::NoQueries);
        }

        for pass in 0..warmup {
            info!("Executing warmup iteration: {}", pass);
            self.execute_pass(queries, "warm-up").await?;
        }

        info!("Begin analysis over {} queries", queries.len());
        let samples = self.execute_pass(queries, "measured").await?;
        Ok(LatencyReport::from_samples(&samples))
    }

    async fn execute_pass(
        &self,
        queries: &[String],
        phase: &'static str,
    ) -> Result<Vec<LatencySample>, HarnessError> {
        let mut samples = Vec::with_capacity(queries.len());
        for (index, query) in queries.iter().enumerate() {
            let start = Instant::now();
            self.classifier
                .classify(query)
                .await
                .map_err(|source| HarnessError::QueryFailed {
                    phase,
                    index,
                    query: query.clone(),
                    source,
                })?;
            samples.push(LatencySample { index, elapsed: start.elapsed() });
        }
        Ok(samples)
    }
}

/// Queries are the first column of a tab-delimited file; blank lines are skipped.
pub fn parse_queries(content: &str, has_header: bool) -> Vec<String> {
    content
        .lines()
        .skip(usize::from(has_header))
        .filter_map(|line| line.split('\t').next())
        .map(|q| q.trim_end_matches('\r'))
        .filter(|q| !q.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn load_queries(path: &Path, has_header: bool) -> Result<Vec<String>, HarnessError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_queries(&content, has_header))
}
