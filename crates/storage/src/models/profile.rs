use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Personal, contact, address and emergency-contact details for one
/// submission. Age is validated (>= 15 at time of save) before a row is
/// ever written, so persisted rows always satisfy the invariant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfileInformation {
    pub submission_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
    pub updated_at: chrono::NaiveDateTime,
}
