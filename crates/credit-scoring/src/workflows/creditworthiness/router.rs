use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::classifier::CreditClassifier;
use super::encoder::{numeric_catalog, ApplicantForm, NumericFieldView};
use super::options::{category_catalog, CategoryFieldView};
use super::record::ApplicantRecord;
use super::service::{CreditScoringService, ScoringError};

/// Everything an intake form needs to render its inputs.
#[derive(Debug, Clone, Serialize)]
pub struct FormCatalog {
    pub categorical: Vec<CategoryFieldView>,
    pub numeric: Vec<NumericFieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineeredRecordView {
    pub record: ApplicantRecord,
}

/// Router builder exposing the option catalog, feature preview, and scoring.
pub fn credit_router<C>(service: Arc<CreditScoringService<C>>) -> Router
where
    C: CreditClassifier + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/credit/options", get(options_handler))
        .route("/api/v1/credit/features", post(features_handler::<C>))
        .route("/api/v1/credit/predictions", post(predict_handler::<C>))
        .with_state(service)
}

pub(crate) async fn options_handler() -> axum::Json<FormCatalog> {
    axum::Json(FormCatalog {
        categorical: category_catalog(),
        numeric: numeric_catalog(),
    })
}

pub(crate) async fn features_handler<C>(
    State(service): State<Arc<CreditScoringService<C>>>,
    payload: Result<axum::Json<ApplicantForm>, JsonRejection>,
) -> Response
where
    C: CreditClassifier + ?Sized + 'static,
{
    let form = match payload {
        Ok(axum::Json(form)) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.engineer(&form) {
        Ok(record) => (StatusCode::OK, axum::Json(EngineeredRecordView { record })).into_response(),
        Err(err) => scoring_error_response(err),
    }
}

pub(crate) async fn predict_handler<C>(
    State(service): State<Arc<CreditScoringService<C>>>,
    payload: Result<axum::Json<ApplicantForm>, JsonRejection>,
) -> Response
where
    C: CreditClassifier + ?Sized + 'static,
{
    let form = match payload {
        Ok(axum::Json(form)) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.submit(&form) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.view())).into_response(),
        Err(err) => scoring_error_response(err),
    }
}

/// Malformed bodies get the same JSON error shape as encoder failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn scoring_error_response(err: ScoringError) -> Response {
    match err {
        ScoringError::Encode(error) => {
            let payload = json!({
                "error": error.to_string(),
                "column": error.column(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ScoringError::ClassifierUnavailable(_) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
