use super::AppState;
use crate::error::RelayError;
use crate::scoring::ScoredLabel;
use crate::store::LabelRecord;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

const LANDING_TEMPLATE: &str = include_str!("index.html");

#[derive(Debug, Deserialize)]
pub struct PredictParams {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddDataParams {
    data_point: Option<String>,
}

impl From<QueryRejection> for RelayError {
    fn from(rejection: QueryRejection) -> Self {
        RelayError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// `GET /api/model/?query=...`
pub async fn predict(
    State(state): State<AppState>,
    params: Result<Query<PredictParams>, QueryRejection>,
) -> Result<Json<Value>, RelayError> {
    let Query(params) = params?;
    let query = params.query.ok_or(RelayError::MissingParameter("query"))?;
    let request_id = Uuid::new_v4();

    let ranked = state
        .gateway
        .predict(&query)
        .instrument(info_span!("predict", %request_id))
        .await
        .inspect_err(|e| warn!(%request_id, "Prediction for {:?} failed: {}", query, e))?;

    info!(%request_id, "Predicted {} ({:.4}) for {:?}", ranked.top.name, ranked.top.confidence, ranked.query);

    Ok(Json(json!({
        "query": ranked.query,
        "prediction": ranked.top.as_pair(),
        "raw_scores": ranked.all.iter().map(ScoredLabel::as_pair).collect::<Vec<_>>(),
    })))
}

/// `GET /api/add_data/?data_point=query,label[,language]`
pub async fn add_data(
    State(state): State<AppState>,
    params: Result<Query<AddDataParams>, QueryRejection>,
) -> Result<Json<LabelRecord>, RelayError> {
    let Query(params) = params?;
    let data_point = params.data_point.ok_or(RelayError::MissingParameter("data_point"))?;
    let record = LabelRecord::parse(&data_point)?;

    state
        .store
        .append(record.clone())
        .await
        .inspect_err(|e| warn!("Label append failed: {}", e))?;

    Ok(Json(record))
}

/// `GET /`
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(render_landing(&state.console_address))
}

pub fn render_landing(console_address: &str) -> String {
    LANDING_TEMPLATE.replace("{{console_address}}", &escape_html(console_address))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
