use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "experience_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    FirstTime,
    SomeExperience,
    Experienced,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Athletics,
    Swimming,
    Basketball,
    Cycling,
    Gymnastics,
    Hockey,
    Netball,
    Rowing,
    Triathlon,
    Volleyball,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    MainStadium,
    AquaticsCentre,
    Velodrome,
    IndoorArena,
    ConventionCentre,
    RiverfrontPrecinct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VolunteerRole {
    SpectatorServices,
    AthleteServices,
    Transport,
    MediaOperations,
    Ceremonies,
    Logistics,
    MedicalSupport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    LateNight,
}

/// Recruitment-stage data. The checkbox groups from the form map to fixed
/// enum sets stored as jsonb.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecruitmentPreferences {
    pub submission_id: Uuid,
    pub experience_level: ExperienceLevel,
    pub motivation: String,
    #[schema(value_type = Vec<Sport>)]
    pub preferred_sports: sqlx::types::Json<Vec<Sport>>,
    #[schema(value_type = Vec<Venue>)]
    pub preferred_venues: sqlx::types::Json<Vec<Venue>>,
    #[schema(value_type = Vec<VolunteerRole>)]
    pub preferred_roles: sqlx::types::Json<Vec<VolunteerRole>>,
    #[schema(value_type = Vec<TimeSlot>)]
    pub available_time_slots: sqlx::types::Json<Vec<TimeSlot>>,
    pub can_work_outdoors: bool,
    pub can_lift_20kg: bool,
    pub has_first_aid_certificate: bool,
    pub has_drivers_licence: bool,
    pub updated_at: chrono::NaiveDateTime,
}
