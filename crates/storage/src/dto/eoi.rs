use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::PaginationMeta;
use crate::models::{
    EoiStep, EoiSubmission, ExperienceLevel, Sport, SubmissionStatus, TimeSlot, UniformSize, Venue,
    VolunteerRole, VolunteerType,
};

/// Youngest permitted applicant age at the time the profile is saved.
pub const MIN_VOLUNTEER_AGE: u32 = 15;

/// Request payload for starting a new EOI
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartEoiRequest {
    pub volunteer_type: VolunteerType,
}

/// Request payload binding a corporate group to a submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectGroupRequest {
    pub corporate_group_id: Uuid,
}

/// Request payload for the profile stage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProfileStageRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,

    #[validate(custom(function = "validate_minimum_age"))]
    pub date_of_birth: NaiveDate,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 8, max = 20, message = "Phone number must be 8 to 20 characters"))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address_line1: String,

    #[validate(length(max = 255))]
    pub address_line2: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub suburb: String,

    #[validate(length(min = 1, max = 50))]
    pub state: String,

    #[validate(length(min = 3, max = 10))]
    pub postcode: String,

    #[validate(length(min = 1, max = 200))]
    pub emergency_contact_name: String,

    #[validate(length(min = 8, max = 20))]
    pub emergency_contact_phone: String,

    #[validate(length(min = 1, max = 100))]
    pub emergency_contact_relationship: String,
}

/// Request payload for the recruitment preferences stage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecruitmentStageRequest {
    pub experience_level: ExperienceLevel,

    #[validate(length(
        min = 50,
        max = 2000,
        message = "Motivation must be at least 50 characters"
    ))]
    pub motivation: String,

    #[validate(length(min = 1, message = "Select at least one sport"))]
    pub preferred_sports: Vec<Sport>,

    #[serde(default)]
    pub preferred_venues: Vec<Venue>,

    #[validate(length(min = 1, message = "Select at least one role"))]
    pub preferred_roles: Vec<VolunteerRole>,

    #[validate(length(min = 1, message = "Select at least one time slot"))]
    pub available_time_slots: Vec<TimeSlot>,

    #[serde(default)]
    pub can_work_outdoors: bool,
    #[serde(default)]
    pub can_lift_20kg: bool,
    #[serde(default)]
    pub has_first_aid_certificate: bool,
    #[serde(default)]
    pub has_drivers_licence: bool,
}

/// Request payload for the games information stage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_medical_detail"))]
pub struct GamesStageRequest {
    pub uniform_size: UniformSize,

    #[validate(length(max = 500))]
    pub dietary_requirements: Option<String>,

    #[serde(default)]
    pub has_medical_conditions: bool,

    #[validate(length(max = 500))]
    pub medical_conditions: Option<String>,

    #[serde(default)]
    pub photo_consent: bool,
    #[serde(default)]
    pub social_media_consent: bool,
    #[serde(default)]
    pub testimonial_consent: bool,

    #[validate(url(message = "Photo reference must be a URL"))]
    #[validate(length(max = 500))]
    pub photo_reference: Option<String>,
}

/// Snapshot of a submission returned after every workflow mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
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

impl From<EoiSubmission> for SubmissionResponse {
    fn from(submission: EoiSubmission) -> Self {
        Self {
            submission_id: submission.submission_id,
            volunteer_type: submission.volunteer_type,
            corporate_group_id: submission.corporate_group_id,
            current_step: submission.current_step,
            completion_percentage: submission.completion_percentage,
            status: submission.status,
            reference_number: submission.reference_number,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
            submitted_at: submission.submitted_at,
        }
    }
}

/// Paginated submission listing for staff review screens
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub data: Vec<SubmissionResponse>,
    pub pagination: PaginationMeta,
}

// Validation helpers

fn validate_minimum_age(date_of_birth: &NaiveDate) -> Result<(), validator::ValidationError> {
    let today = chrono::Utc::now().date_naive();
    match today.years_since(*date_of_birth) {
        Some(age) if age >= MIN_VOLUNTEER_AGE => Ok(()),
        _ => Err(validator::ValidationError::new("under_minimum_age")
            .with_message(format!("Applicants must be at least {MIN_VOLUNTEER_AGE} years old").into())),
    }
}

fn validate_medical_detail(req: &GamesStageRequest) -> Result<(), validator::ValidationError> {
    let detail_given = req
        .medical_conditions
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());

    if req.has_medical_conditions && !detail_given {
        return Err(validator::ValidationError::new("medical_detail_required")
            .with_message("Describe the medical conditions we should know about".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years_ago(years: u32) -> NaiveDate {
        let today = chrono::Utc::now().date_naive();
        today
            .checked_sub_months(chrono::Months::new(years * 12))
            .unwrap()
    }

    fn valid_profile() -> ProfileStageRequest {
        ProfileStageRequest {
            first_name: "Alex".to_string(),
            last_name: "Nguyen".to_string(),
            date_of_birth: years_ago(16),
            email: "alex.nguyen@example.com".to_string(),
            phone: "0400123456".to_string(),
            address_line1: "12 Wattle St".to_string(),
            address_line2: None,
            suburb: "Carlton".to_string(),
            state: "VIC".to_string(),
            postcode: "3053".to_string(),
            emergency_contact_name: "Thao Nguyen".to_string(),
            emergency_contact_phone: "0400654321".to_string(),
            emergency_contact_relationship: "Parent".to_string(),
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_underage_applicant_rejected() {
        let mut req = valid_profile();
        req.date_of_birth = years_ago(14);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date_of_birth"));
    }

    #[test]
    fn test_fifteenth_birthday_is_accepted() {
        let mut req = valid_profile();
        req.date_of_birth = years_ago(15);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_short_motivation_rejected() {
        let req = RecruitmentStageRequest {
            experience_level: ExperienceLevel::FirstTime,
            motivation: "Too short".to_string(),
            preferred_sports: vec![Sport::Athletics],
            preferred_venues: vec![],
            preferred_roles: vec![VolunteerRole::SpectatorServices],
            available_time_slots: vec![TimeSlot::Morning],
            can_work_outdoors: false,
            can_lift_20kg: false,
            has_first_aid_certificate: false,
            has_drivers_licence: false,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("motivation"));
    }

    #[test]
    fn test_empty_role_selection_rejected() {
        let req = RecruitmentStageRequest {
            experience_level: ExperienceLevel::Experienced,
            motivation: "I have volunteered at three previous national championships and \
                         want to help again."
                .to_string(),
            preferred_sports: vec![Sport::Swimming],
            preferred_venues: vec![Venue::AquaticsCentre],
            preferred_roles: vec![],
            available_time_slots: vec![TimeSlot::Evening],
            can_work_outdoors: true,
            can_lift_20kg: false,
            has_first_aid_certificate: true,
            has_drivers_licence: true,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("preferred_roles"));
    }

    #[test]
    fn test_medical_flag_requires_detail() {
        let req = GamesStageRequest {
            uniform_size: UniformSize::M,
            dietary_requirements: None,
            has_medical_conditions: true,
            medical_conditions: None,
            photo_consent: true,
            social_media_consent: true,
            testimonial_consent: false,
            photo_reference: None,
        };
        assert!(req.validate().is_err());

        let req = GamesStageRequest {
            medical_conditions: Some("Asthma, carries an inhaler".to_string()),
            ..req
        };
        assert!(req.validate().is_ok());
    }
}
