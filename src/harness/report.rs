use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Timing of one measured call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySample {
    pub index: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LatencyReport {
    pub count: usize,
    pub sum: Duration,
    pub mean: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl LatencyReport {
    /// Aggregate a measured pass. An empty pass yields an all-zero report.
    pub fn from_samples(samples: &[LatencySample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
        sorted.sort();

        let sum: Duration = sorted.iter().sum();
        let mean = Duration::from_nanos((sum.as_nanos() / sorted.len() as u128) as u64);

        Self {
            count: sorted.len(),
            sum,
            mean,
            p50: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }
}

/// Percentile of ascending `sorted`, linearly interpolated between the two
/// closest ranks: `rank = p / 100 * (n - 1)`.
pub fn percentile(sorted: &[Duration], p: f64) -> Duration {
    match sorted.len() {
        0 => Duration::ZERO,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let lo_ns = sorted[lo].as_nanos() as f64;
            let hi_ns = sorted[hi].as_nanos() as f64;
            let ns = lo_ns + (hi_ns - lo_ns) * (rank - lo as f64);
            Duration::from_nanos(ns.round() as u64)
        }
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

impl fmt::Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========================")?;
        writeln!(f, "Queries: {}", self.count)?;
        writeln!(f, "Total time: {:.2} ms", ms(self.sum))?;
        writeln!(f, "Mean time: {:.2} ms", ms(self.mean))?;
        writeln!(f, "P50: {:.2} ms", ms(self.p50))?;
        writeln!(f, "P90: {:.2} ms", ms(self.p90))?;
        writeln!(f, "P95: {:.2} ms", ms(self.p95))?;
        write!(f, "P99: {:.2} ms", ms(self.p99))
    }
}
