use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::step::EoiStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "volunteer_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VolunteerType {
    New,
    Returning,
    Corporate,
    Student,
    Family,
    Specialist,
}

impl VolunteerType {
    pub fn is_corporate(&self) -> bool {
        matches!(self, VolunteerType::Corporate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
}

/// An expression-of-interest submission. Owns zero-or-one row in each of the
/// three stage tables; the stage rows are deleted with the parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EoiSubmission {
    pub submission_id: Uuid,
    pub volunteer_type: VolunteerType,
    pub corporate_group_id: Option<Uuid>,
    pub current_step: EoiStep,
    pub completion_percentage: i16,
    pub status: SubmissionStatus,
    pub reference_number: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub submitted_at: Option<chrono::NaiveDateTime>,
}

impl EoiSubmission {
    pub fn is_draft(&self) -> bool {
        self.status == SubmissionStatus::Draft
    }
}
