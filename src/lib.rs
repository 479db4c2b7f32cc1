pub mod cli;
pub mod config;
pub mod error;
pub mod scoring;
pub mod services;
pub mod store;
pub mod harness;
pub mod server;

pub use config::{GatewayConfig, HarnessConfig, RelayConfig};
pub use error::{RelayError, Result};
pub use services::model::{Classifier, ModelGateway};
pub use store::{LabelRecord, LabelStore};
