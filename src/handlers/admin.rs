// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::assessment::load_assessment,
    models::assessment::CreateAssessmentRequest,
    store::DynStore,
};

/// Retrieves a full assessment including its answer key.
pub async fn get_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(load_assessment(&store, id).await?))
}

/// Creates a new assessment.
/// Rejects answer keys without exactly one correct choice per question.
pub async fn create_assessment(
    State(store): State<DynStore>,
    Json(payload): Json<CreateAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = store.create_assessment(payload).await?.id;
    tracing::info!("Created assessment {}", id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Deletes an assessment by ID.
pub async fn delete_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_assessment(id).await? {
        return Err(AppError::NotFound("Assessment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
