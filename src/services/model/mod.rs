pub mod client;

pub use client::{Classifier, ModelGateway};
