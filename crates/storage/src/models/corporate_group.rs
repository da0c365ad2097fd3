use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A corporate volunteer group. Referenced (not owned) by submissions with
/// volunteer type `corporate`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CorporateVolunteerGroup {
    pub group_id: Uuid,
    pub name: String,
    pub contact_email: String,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}
