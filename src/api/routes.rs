//! HTTP route handlers for Axum.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, warn};

use crate::{
    api::types::{AnalyzeRequest, AnalyzeResponse, ComputeRequest, ErrorBody, HealthDto},
    error::DassError,
    model::PredictionResult,
    scoring::{
        questions::{self, Item},
        AnswerSet, SymptomCategory,
    },
};

use super::AppState;

type ApiError = (StatusCode, Json<ErrorBody>);
type ApiResult<T> = Result<Json<T>, ApiError>;

const INTERNAL_ERROR: &str = "internal server error";

fn internal() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR.to_string(),
        }),
    )
}

fn from_dass(err: DassError) -> ApiError {
    let status = match &err {
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        DassError::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(%err, "dass computation failed");
    }
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// Free-text analysis. Every failure collapses into one opaque 500.
pub async fn process_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    let extractor = state.extractor;
    let joined = tokio::task::spawn_blocking(move || extractor.analyze(&request.text)).await;
    match joined {
        Ok(Ok(analysis)) => Ok(Json(analysis.into())),
        Ok(Err(err)) => {
            error!(%err, "text analysis failed");
            Err(internal())
        }
        Err(join) => {
            error!(error = %join, "text analysis task aborted");
            Err(internal())
        }
    }
}

/// Questionnaire scoring plus the increase forecast. Loads the model on first use.
pub async fn compute_dass(
    State(state): State<AppState>,
    Json(request): Json<ComputeRequest>,
) -> ApiResult<PredictionResult> {
    let depression =
        AnswerSet::parse(SymptomCategory::Depression, &request.d_answers).map_err(from_dass)?;
    let anxiety =
        AnswerSet::parse(SymptomCategory::Anxiety, &request.a_answers).map_err(from_dass)?;
    let stress = AnswerSet::parse(SymptomCategory::Stress, &request.s_answers).map_err(from_dass)?;

    let model = state.model.clone();
    let joined = tokio::task::spawn_blocking(move || {
        model.load()?;
        model.predict(&depression, &anxiety, &stress)
    })
    .await;
    match joined {
        Ok(result) => result.map(Json).map_err(from_dass),
        Err(join) => {
            warn!(error = %join, "prediction task aborted");
            Err(internal())
        }
    }
}

pub async fn list_questions() -> Json<Vec<Item>> {
    Json(questions::ITEMS.to_vec())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok",
        model: state.model.state(),
    })
}
