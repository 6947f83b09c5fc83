// src/models/submission.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::id::EntityId;

/// One answer as submitted by a student.
/// A missing or null `choiceId` means the question was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnswer {
    pub question_id: EntityId,
    #[serde(default)]
    pub choice_id: Option<EntityId>,
}

/// Graded outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: EntityId,
    pub choice_id: Option<EntityId>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub score: usize,
    pub total_questions: usize,
    pub answer_records: Vec<AnswerRecord>,
}

impl GradeResult {
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.score as f64 / self.total_questions as f64) * 100.0
    }
}

/// Result of checking that every question has an answer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub is_valid: bool,
    pub missing_questions: Vec<EntityId>,
    pub total_questions: usize,
    pub answered_questions: usize,
}

/// A graded submission as kept by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub assessment_id: i64,
    pub student_id: String,
    pub score: usize,
    pub total_questions: usize,
    pub auto_submitted: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub answers: Vec<StoredAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnswer {
    pub id: Uuid,
    pub question_id: EntityId,
    pub choice_id: Option<EntityId>,
    pub is_correct: bool,
}

impl From<AnswerRecord> for StoredAnswer {
    fn from(record: AnswerRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id: record.question_id,
            choice_id: record.choice_id,
            is_correct: record.is_correct,
        }
    }
}

impl Submission {
    pub fn from_grade(
        assessment_id: i64,
        student_id: String,
        auto_submitted: bool,
        grade: GradeResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            assessment_id,
            student_id,
            score: grade.score,
            total_questions: grade.total_questions,
            auto_submitted,
            submitted_at: chrono::Utc::now(),
            answers: grade.answer_records.into_iter().map(StoredAnswer::from).collect(),
        }
    }
}

/// DTO for the pre-submission completeness check.
#[derive(Debug, Deserialize)]
pub struct CompletenessRequest {
    #[serde(default)]
    pub answers: Vec<StudentAnswer>,
}

/// DTO for submitting an assessment attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    #[validate(length(min = 1, max = 64))]
    pub student_id: String,

    #[serde(default)]
    pub answers: Vec<StudentAnswer>,

    /// Set by the client when the timer ran out; skips the completeness gate.
    #[serde(default)]
    pub auto_submit: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub percentage: f64,
}
