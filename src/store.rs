// src/store.rs

use std::{collections::HashMap, path::Path, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        assessment::{Assessment, CreateAssessmentRequest},
        submission::Submission,
    },
};

/// Shared handle to whichever store backs the API.
pub type DynStore = Arc<dyn AssessmentStore>;

/// Storage seam for assessments and graded submissions.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn list_assessments(&self) -> Result<Vec<Assessment>, AppError>;

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>, AppError>;

    /// Stores a validated request and returns the assessment with its new id.
    async fn create_assessment(&self, req: CreateAssessmentRequest) -> Result<Assessment, AppError>;

    /// Returns `false` when no assessment had that id.
    async fn delete_assessment(&self, id: i64) -> Result<bool, AppError>;

    async fn save_submission(&self, submission: Submission) -> Result<(), AppError>;

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, AppError>;

    /// Newest first.
    async fn list_submissions_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Submission>, AppError>;
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    assessments: HashMap<i64, Assessment>,
    submissions: HashMap<Uuid, Submission>,
}

/// In-process store. Data lives for the lifetime of the server.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn list_assessments(&self) -> Result<Vec<Assessment>, AppError> {
        let inner = self.inner.read().await;
        let mut list: Vec<Assessment> = inner.assessments.values().cloned().collect();
        list.sort_by_key(|a| a.id);
        Ok(list)
    }

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>, AppError> {
        Ok(self.inner.read().await.assessments.get(&id).cloned())
    }

    async fn create_assessment(&self, req: CreateAssessmentRequest) -> Result<Assessment, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let assessment = req.into_assessment(inner.next_id);
        inner.assessments.insert(assessment.id, assessment.clone());
        Ok(assessment)
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.assessments.remove(&id).is_some())
    }

    async fn save_submission(&self, submission: Submission) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .submissions
            .insert(submission.id, submission);
        Ok(())
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, AppError> {
        Ok(self.inner.read().await.submissions.get(&id).cloned())
    }

    async fn list_submissions_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Submission>, AppError> {
        let inner = self.inner.read().await;
        let mut list: Vec<Submission> = inner
            .submissions
            .values()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(list)
    }
}

/// Loads a JSON array of assessments into the store.
/// Every entry is validated like an admin-created assessment before any is
/// stored, so a bad file seeds nothing.
pub async fn seed_assessments(store: &dyn AssessmentStore, path: &Path) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let requests: Vec<CreateAssessmentRequest> = serde_json::from_str(&raw)?;

    for (index, req) in requests.iter().enumerate() {
        req.validate().map_err(|e| {
            AppError::BadRequest(format!("seed entry {} ({}): {}", index, req.title, e))
        })?;
    }

    let mut count = 0;
    for req in requests {
        let assessment = store.create_assessment(req).await?;
        tracing::info!("Seeded assessment {} ({})", assessment.id, assessment.title);
        count += 1;
    }
    Ok(count)
}
