// src/models/assessment.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{models::id::EntityId, utils::html::clean_html};

/// Whether an assessment is assigned as homework or sat as a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Homework,
    Test,
}

/// A homework or test: ordered passages, each with ordered questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub time_limit_minutes: Option<u32>,
    pub passages: Vec<Passage>,
}

/// A block of reading content grouping one or more questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: EntityId,
    #[serde(default)]
    pub prompt: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: EntityId,
    #[serde(default)]
    pub text: String,
    pub is_correct: bool,
}

impl Assessment {
    /// All questions, in passage order then question order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.passages.iter().flat_map(|p| p.questions.iter())
    }
}

impl Question {
    /// Id of the first choice marked correct, if any.
    pub fn correct_choice_id(&self) -> Option<&EntityId> {
        self.choices.iter().find(|c| c.is_correct).map(|c| &c.id)
    }
}

/// Row for the assessment catalog listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub time_limit_minutes: Option<u32>,
    pub question_count: usize,
}

impl From<&Assessment> for AssessmentSummary {
    fn from(a: &Assessment) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            kind: a.kind,
            time_limit_minutes: a.time_limit_minutes,
            question_count: a.questions().count(),
        }
    }
}

/// DTO for sending an assessment to a student (answer key stripped).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAssessment {
    pub id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub time_limit_minutes: Option<u32>,
    pub passages: Vec<PublicPassage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPassage {
    pub title: Option<String>,
    pub content: String,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: EntityId,
    pub prompt: String,
    pub choices: Vec<PublicChoice>,
}

#[derive(Debug, Serialize)]
pub struct PublicChoice {
    pub id: EntityId,
    pub text: String,
}

impl From<Assessment> for PublicAssessment {
    fn from(a: Assessment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            kind: a.kind,
            time_limit_minutes: a.time_limit_minutes,
            passages: a
                .passages
                .into_iter()
                .map(|p| PublicPassage {
                    title: p.title,
                    content: p.content,
                    questions: p
                        .questions
                        .into_iter()
                        .map(|q| PublicQuestion {
                            id: q.id,
                            prompt: q.prompt,
                            choices: q
                                .choices
                                .into_iter()
                                .map(|c| PublicChoice { id: c.id, text: c.text })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// DTO for creating a new assessment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub kind: AssessmentKind,
    #[validate(range(min = 1, max = 600))]
    pub time_limit_minutes: Option<u32>,
    #[validate(custom(function = validate_passages))]
    pub passages: Vec<Passage>,
}

impl CreateAssessmentRequest {
    /// Builds the stored assessment, sanitizing authored HTML.
    pub fn into_assessment(self, id: i64) -> Assessment {
        let passages = self
            .passages
            .into_iter()
            .map(|p| Passage {
                title: p.title,
                content: clean_html(&p.content),
                questions: p
                    .questions
                    .into_iter()
                    .map(|q| Question {
                        prompt: clean_html(&q.prompt),
                        ..q
                    })
                    .collect(),
            })
            .collect();

        Assessment {
            id,
            title: self.title,
            kind: self.kind,
            time_limit_minutes: self.time_limit_minutes,
            passages,
        }
    }
}

/// Enforces the answer-key rules: unique question ids, unique choice ids per
/// question, at least two choices and exactly one correct choice.
fn validate_passages(passages: &[Passage]) -> Result<(), validator::ValidationError> {
    let mut question_ids = HashSet::new();

    for question in passages.iter().flat_map(|p| p.questions.iter()) {
        if !question_ids.insert(&question.id) {
            return Err(validator::ValidationError::new("duplicate_question_id"));
        }
        if question.choices.len() < 2 {
            return Err(validator::ValidationError::new("too_few_choices"));
        }

        let mut choice_ids = HashSet::new();
        if !question.choices.iter().all(|c| choice_ids.insert(&c.id)) {
            return Err(validator::ValidationError::new("duplicate_choice_id"));
        }

        let correct = question.choices.iter().filter(|c| c.is_correct).count();
        if correct != 1 {
            return Err(validator::ValidationError::new(
                "exactly_one_correct_choice_required",
            ));
        }
    }
    Ok(())
}
