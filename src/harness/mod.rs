pub mod report;
pub mod runner;

pub use report::{LatencyReport, LatencySample, percentile};
pub use runner::{HarnessError, LatencyHarness, load_queries, parse_queries};
