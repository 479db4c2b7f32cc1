//! HTTP front door: prediction, label submission and the landing page.

pub mod routes;

use crate::config::RelayConfig;
use crate::error::Result;
use crate::services::model::ModelGateway;
use crate::store::LabelStore;
use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: ModelGateway,
    pub store: LabelStore,
    pub console_address: Arc<str>,
}

impl AppState {
    /// Build the gateway and start the label writer for `config.data_file`.
    pub fn from_config(config: &RelayConfig) -> Result<(Self, JoinHandle<()>)> {
        let gateway = ModelGateway::new(config.gateway.clone())?;
        let (store, writer) = LabelStore::spawn(&config.data_file);
        let state = Self {
            gateway,
            store,
            console_address: Arc::from(config.console_address.as_str()),
        };
        Ok((state, writer))
    }
}

pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/model", get(routes::predict))
        .route("/model/", get(routes::predict))
        .route("/coronavirus_model", get(routes::predict))
        .route("/coronavirus_model/", get(routes::predict))
        .route("/add_data", get(routes::add_data))
        .route("/add_data/", get(routes::add_data))
        .route("/add_coronavirus_data", get(routes::add_data))
        .route("/add_coronavirus_data/", get(routes::add_data))
        .layer(CorsLayer::permissive());

    let mut app = Router::new()
        .route("/", get(routes::landing))
        .nest("/api", api);

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serve until `shutdown` is cancelled, then finish in-flight requests.
pub async fn serve(listener: TcpListener, app: Router, shutdown: CancellationToken) -> std::io::Result<()> {
    info!("Intent relay listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
