// src/handlers/assessment.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    grading::{calculate_assessment_score, validate_all_questions_answered},
    models::{
        assessment::{Assessment, AssessmentSummary, PublicAssessment},
        submission::{CompletenessRequest, SubmitAssessmentRequest, Submission, SubmissionResponse},
    },
    store::DynStore,
};

/// Loads an assessment or fails with 404.
pub(crate) async fn load_assessment(store: &DynStore, id: i64) -> Result<Assessment, AppError> {
    store
        .get_assessment(id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))
}

/// Lists the assessment catalog.
pub async fn list_assessments(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let summaries: Vec<AssessmentSummary> = store
        .list_assessments()
        .await?
        .iter()
        .map(AssessmentSummary::from)
        .collect();

    Ok(Json(summaries))
}

/// Retrieves an assessment for a student to sit. The answer key is stripped.
pub async fn get_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = load_assessment(&store, id).await?;
    Ok(Json(PublicAssessment::from(assessment)))
}

/// Reports which questions still lack an answer entry.
/// Lets the client warn the student before the final submit.
pub async fn check_completeness(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
    Json(req): Json<CompletenessRequest>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = load_assessment(&store, id).await?;
    Ok(Json(validate_all_questions_answered(&assessment, &req.answers)))
}

/// Grades and stores a submission.
///
/// * Manual submissions must carry an entry for every question (422 otherwise).
/// * Auto-submissions (timer expired) are graded as-is; blanks score zero.
pub async fn submit_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let assessment = load_assessment(&store, id).await?;

    if !req.auto_submit {
        let report = validate_all_questions_answered(&assessment, &req.answers);
        if !report.is_valid {
            tracing::debug!(
                "Student {} left {} questions unanswered on assessment {}",
                req.student_id,
                report.missing_questions.len(),
                id
            );
            return Err(AppError::IncompleteSubmission(report));
        }
    }

    let grade = calculate_assessment_score(&assessment, &req.answers);
    let percentage = grade.percentage();
    let submission = Submission::from_grade(id, req.student_id, req.auto_submit, grade);

    store.save_submission(submission.clone()).await?;

    tracing::info!(
        "Submission {} for assessment {}: {}/{}",
        submission.id,
        id,
        submission.score,
        submission.total_questions
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            submission,
            percentage,
        }),
    ))
}

/// Retrieves a stored submission with its per-question answers.
pub async fn get_submission(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let submission = store
        .get_submission(id)
        .await?
        .ok_or(AppError::NotFound("Submission not found".to_string()))?;

    Ok(Json(submission))
}

/// Lists a student's submissions, newest first.
pub async fn list_student_submissions(
    State(store): State<DynStore>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = store.list_submissions_for_student(&student_id).await?;
    Ok(Json(submissions))
}
