// src/grading.rs

use std::collections::{HashMap, HashSet};

use crate::models::{
    assessment::Assessment,
    id::EntityId,
    submission::{AnswerRecord, CompletenessReport, GradeResult, StudentAnswer},
};

/// Grades a submission against the assessment's answer key.
///
/// * Every question yields exactly one `AnswerRecord`, in passage then question order.
/// * Unanswered questions (absent or null choice) are recorded as incorrect.
/// * Answers for questions not in the assessment are ignored.
/// * A question with no correct choice can never be answered correctly.
pub fn calculate_assessment_score(
    assessment: &Assessment,
    student_answers: &[StudentAnswer],
) -> GradeResult {
    // Answer key in assessment order. A repeated question id keeps its first
    // position and takes the later key.
    let mut order: Vec<&EntityId> = Vec::new();
    let mut answer_key: HashMap<&EntityId, Option<&EntityId>> = HashMap::new();

    for question in assessment.questions() {
        let correct = question.correct_choice_id();
        if correct.is_none() {
            tracing::warn!(
                "Assessment {} question {} has no correct choice",
                assessment.id,
                question.id
            );
        }
        if answer_key.insert(&question.id, correct).is_none() {
            order.push(&question.id);
        }
    }

    let submitted: HashMap<&EntityId, Option<&EntityId>> = student_answers
        .iter()
        .map(|a| (&a.question_id, a.choice_id.as_ref()))
        .collect();

    let mut score = 0;
    let mut answer_records = Vec::with_capacity(order.len());

    for question_id in order {
        let correct = answer_key.get(question_id).copied().flatten();
        let choice = submitted.get(question_id).copied().flatten();

        let is_correct = matches!((choice, correct), (Some(c), Some(k)) if c == k);
        if is_correct {
            score += 1;
        }

        answer_records.push(AnswerRecord {
            question_id: question_id.clone(),
            choice_id: choice.cloned(),
            is_correct,
        });
    }

    GradeResult {
        score,
        total_questions: answer_records.len(),
        answer_records,
    }
}

/// Reports which assessment questions have no entry in `answers`.
///
/// Presence of the question id is what counts; a null choice still marks the
/// question as answered. `answered_questions` counts every distinct id in
/// `answers`, including ids the assessment does not contain.
pub fn validate_all_questions_answered(
    assessment: &Assessment,
    answers: &[StudentAnswer],
) -> CompletenessReport {
    let answered: HashSet<&EntityId> = answers.iter().map(|a| &a.question_id).collect();

    let mut seen = HashSet::new();
    let mut missing_questions = Vec::new();

    for question in assessment.questions() {
        if seen.insert(&question.id) && !answered.contains(&question.id) {
            missing_questions.push(question.id.clone());
        }
    }

    CompletenessReport {
        is_valid: missing_questions.is_empty(),
        missing_questions,
        total_questions: seen.len(),
        answered_questions: answered.len(),
    }
}
