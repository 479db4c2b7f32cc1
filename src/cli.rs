//! Command line flags shared by the relay and the latency harness.

use crate::config::{GatewayConfig, HarnessConfig, RelayConfig, RequestShape, ResponseShape, RetryPolicy};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestShapeArg {
    /// GET with the query percent-encoded in the URL
    QueryGet,
    /// POST with a JSON body
    JsonPost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponseShapeArg {
    Auto,
    Text,
    Json,
}

impl From<ResponseShapeArg> for ResponseShape {
    fn from(arg: ResponseShapeArg) -> Self {
        match arg {
            ResponseShapeArg::Auto => ResponseShape::Auto,
            ResponseShapeArg::Text => ResponseShape::Text,
            ResponseShapeArg::Json => ResponseShape::Json,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct GatewayArgs {
    /// Model service request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries on transport failure (0 disables)
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Initial retry backoff in milliseconds, doubled per attempt
    #[arg(long, default_value_t = 100)]
    pub retry_backoff_ms: u64,

    #[arg(long, value_enum, default_value_t = RequestShapeArg::QueryGet)]
    pub request_shape: RequestShapeArg,

    /// Query-string parameter or JSON field carrying the query
    #[arg(long)]
    pub query_field: Option<String>,

    #[arg(long, value_enum, default_value_t = ResponseShapeArg::Auto)]
    pub response_shape: ResponseShapeArg,
}

impl GatewayArgs {
    pub fn into_config(self, endpoint: String) -> GatewayConfig {
        let request_shape = match (self.request_shape, self.query_field) {
            (RequestShapeArg::QueryGet, Some(param)) => RequestShape::QueryGet { param },
            (RequestShapeArg::QueryGet, None) => RequestShape::query_get(),
            (RequestShapeArg::JsonPost, Some(field)) => RequestShape::JsonPost { field },
            (RequestShapeArg::JsonPost, None) => RequestShape::json_post(),
        };
        let defaults = RetryPolicy::default();
        GatewayConfig {
            endpoint,
            request_shape,
            response_shape: self.response_shape.into(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                initial_backoff: Duration::from_millis(self.retry_backoff_ms),
                max_backoff: defaults.max_backoff,
            },
        }
    }
}

/// Run the intent relay server
#[derive(Debug, Parser)]
#[command(name = "intent_relay", version, about)]
pub struct RelayArgs {
    /// The port to launch the server on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Model service URL
    #[arg(long, default_value = "http://localhost:8080")]
    pub modelserver: String,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,

    /// The file labeled examples are appended to
    #[arg(long, default_value = "data.csv")]
    pub datafile: PathBuf,

    /// Public console address shown on the landing page
    #[arg(long, default_value = "http://localhost:5000")]
    pub console_address: String,

    /// Directory served under /static
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

impl From<RelayArgs> for RelayConfig {
    fn from(args: RelayArgs) -> Self {
        RelayConfig {
            bind_address: args.bind,
            port: args.port,
            gateway: args.gateway.into_config(args.modelserver),
            data_file: args.datafile,
            console_address: args.console_address,
            static_dir: args.static_dir,
            debug: args.debug,
        }
    }
}

/// Measure model service latency over a file of queries
#[derive(Debug, Parser)]
#[command(name = "latency_harness", version, about)]
pub struct HarnessArgs {
    #[arg(long, default_value = "http://localhost:8080")]
    pub model_server: String,

    /// Tab-delimited file; the first column holds the queries
    #[arg(long, default_value = "data.csv")]
    pub data_file: PathBuf,

    /// Number of iterations to warm up the server
    #[arg(long, default_value_t = 1)]
    pub warmup: usize,

    /// Skip the first line of the data file
    #[arg(long)]
    pub has_header: bool,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

impl From<HarnessArgs> for HarnessConfig {
    fn from(args: HarnessArgs) -> Self {
        let mut gateway = args.gateway.into_config(args.model_server);
        // A sample is one request; retries would fold backoff into the timing.
        gateway.retry.max_retries = 0;
        HarnessConfig {
            gateway,
            input_file: args.data_file,
            warmup: args.warmup,
            has_header: args.has_header,
        }
    }
}
