use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::display::EstimateView;
use super::form::RawValuationForm;
use super::service::ValuationService;
use super::tables::MultiplierTables;
use super::variation::VariationSource;
use crate::error::AppError;

/// Body of an estimate call: the raw form plus an optional breakdown switch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimatePayload {
    #[serde(flatten)]
    pub form: RawValuationForm,
    #[serde(default)]
    pub explain: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchPayload {
    pub csv: String,
}

/// Router builder exposing the estimator endpoints.
pub fn valuation_router<V>(service: Arc<ValuationService<V>>) -> Router
where
    V: VariationSource + Send + 'static,
{
    Router::new()
        .route("/api/v1/valuations/estimate", post(estimate_handler::<V>))
        .route("/api/v1/valuations/batch", post(batch_handler::<V>))
        .route("/api/v1/valuations/tables", get(tables_handler))
        .with_state(service)
}

pub(crate) async fn estimate_handler<V>(
    State(service): State<Arc<ValuationService<V>>>,
    Json(payload): Json<EstimatePayload>,
) -> Response
where
    V: VariationSource + Send + 'static,
{
    let EstimatePayload { form, explain } = payload;

    match service.estimate_form(&form).await {
        Ok((request, outcome)) => {
            let view = EstimateView::new(&request, outcome, explain);
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(rejection) => {
            let payload = json!({
                "error": rejection.to_string(),
                "rejected_fields": rejection.rejected,
                "incomplete_fields": rejection.incomplete,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler<V>(
    State(service): State<Arc<ValuationService<V>>>,
    Json(payload): Json<BatchPayload>,
) -> Result<Response, AppError>
where
    V: VariationSource + Send + 'static,
{
    let reader = Cursor::new(payload.csv.into_bytes());
    let report = service.estimate_batch(reader)?;
    Ok((StatusCode::OK, Json(report)).into_response())
}

pub(crate) async fn tables_handler() -> Json<MultiplierTables> {
    Json(MultiplierTables::snapshot())
}
