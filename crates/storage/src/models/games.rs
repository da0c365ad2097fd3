use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "uniform_size", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UniformSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

/// Games-stage data: uniform, dietary/medical flags and consents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GamesInformation {
    pub submission_id: Uuid,
    pub uniform_size: UniformSize,
    pub dietary_requirements: Option<String>,
    pub has_medical_conditions: bool,
    pub medical_conditions: Option<String>,
    pub photo_consent: bool,
    pub social_media_consent: bool,
    pub testimonial_consent: bool,
    pub photo_reference: Option<String>,
    pub updated_at: chrono::NaiveDateTime,
}

impl GamesInformation {
    /// Photo and social media consents are mandatory for finalization;
    /// the testimonial consent is optional.
    pub fn required_consents_accepted(&self) -> bool {
        self.photo_consent && self.social_media_consent
    }
}
