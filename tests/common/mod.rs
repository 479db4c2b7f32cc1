#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use intent_relay::config::{GatewayConfig, RequestShape};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Bind a fake model service on an ephemeral port and return its base URL.
pub async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn gateway_config(endpoint: String) -> GatewayConfig {
    GatewayConfig {
        endpoint,
        timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }
}

async fn text_scores(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
    match params.get("doc").map(String::as_str) {
        Some("book a flight") => (
            StatusCode::OK,
            "intent:cancel:0.05\nintent:book_flight:0.87\n\nintent:greet:0.08\n".to_string(),
        ),
        Some("tie") => (StatusCode::OK, "in:first:0.5\nin:second:0.5\n".to_string()),
        Some("nothing") => (StatusCode::OK, String::new()),
        Some("garbage") => (StatusCode::OK, "in:flight_book:notanumber\n".to_string()),
        Some(_) => (StatusCode::OK, "in:other:1\n".to_string()),
        None => (StatusCode::BAD_REQUEST, "Missing query parameter: doc\n".to_string()),
    }
}

/// Text REST proxy: `GET /?doc=...` -> `prefix:name:score` lines.
pub fn text_model() -> Router {
    Router::new().route("/", get(text_scores))
}

async fn json_scores(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let Some(text) = body.get("text").and_then(Value::as_str) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "missing text"})));
    };
    (
        StatusCode::OK,
        Json(json!({
            "text": text,
            "intent_ranking": [
                {"name": "greet", "confidence": 0.2},
                {"name": "book_flight", "confidence": 0.7},
                {"name": "cancel", "confidence": 0.1}
            ],
            "intent": {"name": "book_flight", "confidence": 0.7},
            "entities": []
        })),
    )
}

/// JSON proxy: `POST / {"text": ...}` -> `{"intent_ranking": [...]}`.
pub fn json_model() -> Router {
    Router::new().route("/", post(json_scores))
}

/// JSON proxy that, like the Pistache one, sends its body without a content-type.
pub fn bare_json_model() -> Router {
    Router::new().route(
        "/",
        post(|body: Json<Value>| async move {
            let (status, Json(value)) = json_scores(body).await;
            Response::builder()
                .status(status)
                .body(Body::from(value.to_string()))
                .unwrap()
        }),
    )
}

/// Fails with 503 for the first `failures` requests, then answers like `text_model`.
pub fn flaky_model(failures: usize) -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/",
            get(
                move |State(hits): State<Arc<AtomicUsize>>, query: Query<HashMap<String, String>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) < failures {
                        return (StatusCode::SERVICE_UNAVAILABLE, "warming up".to_string());
                    }
                    text_scores(query).await
                },
            ),
        )
        .with_state(hits.clone());
    (app, hits)
}

/// Never answers within any sane timeout.
pub fn slow_model(delay: Duration) -> Router {
    Router::new().route(
        "/",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "in:late:1\n"
        }),
    )
}

pub fn json_post_config(endpoint: String) -> GatewayConfig {
    GatewayConfig {
        request_shape: RequestShape::json_post(),
        ..gateway_config(endpoint)
    }
}

/// Text proxy reply with no content-type header at all.
pub fn bare_text_model() -> Router {
    Router::new().route(
        "/",
        get(|| async {
            Response::builder()
                .status(StatusCode::OK)
                .body(Body::from("in:bare:0.4\nin:other:0.1\n"))
                .unwrap()
        }),
    )
}
