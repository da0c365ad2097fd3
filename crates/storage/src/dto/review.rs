use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::eoi::SubmissionResponse;
use crate::dto::group::CorporateGroupResponse;
use crate::models::{
    CorporateVolunteerGroup, EoiStep, EoiSubmission, GamesInformation, ProfileInformation,
    RecruitmentPreferences, VolunteerType,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileSection {
    pub completed: bool,
    pub data: Option<ProfileInformation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecruitmentSection {
    pub completed: bool,
    pub data: Option<RecruitmentPreferences>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GamesSection {
    pub completed: bool,
    pub data: Option<GamesInformation>,
}

/// Read model for the review step. Aggregates whatever stage data exists;
/// missing stages surface as incomplete sections pointing back at the step
/// to return to. Assembling it never mutates the submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub submission: SubmissionResponse,
    pub corporate_group: Option<CorporateGroupResponse>,
    pub profile: ProfileSection,
    pub recruitment: RecruitmentSection,
    pub games: GamesSection,
    pub missing_stages: Vec<EoiStep>,
    pub can_submit: bool,
}

impl ReviewResponse {
    pub fn assemble(
        submission: EoiSubmission,
        corporate_group: Option<CorporateVolunteerGroup>,
        profile: Option<ProfileInformation>,
        recruitment: Option<RecruitmentPreferences>,
        games: Option<GamesInformation>,
    ) -> Self {
        let mut missing_stages = Vec::new();
        if profile.is_none() {
            missing_stages.push(EoiStep::Profile);
        }
        if recruitment.is_none() {
            missing_stages.push(EoiStep::Recruitment);
        }
        if games.is_none() {
            missing_stages.push(EoiStep::Games);
        }

        let consents_accepted = games
            .as_ref()
            .is_some_and(GamesInformation::required_consents_accepted);
        let can_submit = missing_stages.is_empty() && consents_accepted && submission.is_draft();

        Self {
            corporate_group: corporate_group.map(CorporateGroupResponse::from),
            profile: ProfileSection {
                completed: profile.is_some(),
                data: profile,
            },
            recruitment: RecruitmentSection {
                completed: recruitment.is_some(),
                data: recruitment,
            },
            games: GamesSection {
                completed: games.is_some(),
                data: games,
            },
            missing_stages,
            can_submit,
            submission: SubmissionResponse::from(submission),
        }
    }
}

/// Terminal read-only view shown once a submission has been finalized
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmationResponse {
    pub submission_id: Uuid,
    pub volunteer_type: VolunteerType,
    pub reference_number: String,
    pub submitted_at: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubmissionStatus, UniformSize};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn draft_submission() -> EoiSubmission {
        EoiSubmission {
            submission_id: Uuid::new_v4(),
            volunteer_type: VolunteerType::New,
            corporate_group_id: None,
            current_step: EoiStep::Profile,
            completion_percentage: 0,
            status: SubmissionStatus::Draft,
            reference_number: None,
            created_at: ts(),
            updated_at: ts(),
            submitted_at: None,
        }
    }

    fn games(photo: bool, social: bool) -> GamesInformation {
        GamesInformation {
            submission_id: Uuid::new_v4(),
            uniform_size: UniformSize::M,
            dietary_requirements: None,
            has_medical_conditions: false,
            medical_conditions: None,
            photo_consent: photo,
            social_media_consent: social,
            testimonial_consent: false,
            photo_reference: None,
            updated_at: ts(),
        }
    }

    fn profile() -> ProfileInformation {
        ProfileInformation {
            submission_id: Uuid::new_v4(),
            first_name: "Alex".to_string(),
            last_name: "Nguyen".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2009, 5, 2).unwrap(),
            email: "alex@example.com".to_string(),
            phone: "0400123456".to_string(),
            address_line1: "12 Wattle St".to_string(),
            address_line2: None,
            suburb: "Carlton".to_string(),
            state: "VIC".to_string(),
            postcode: "3053".to_string(),
            emergency_contact_name: "Thao Nguyen".to_string(),
            emergency_contact_phone: "0400654321".to_string(),
            emergency_contact_relationship: "Parent".to_string(),
            updated_at: ts(),
        }
    }

    fn recruitment() -> RecruitmentPreferences {
        use crate::models::{ExperienceLevel, Sport, TimeSlot, VolunteerRole};

        RecruitmentPreferences {
            submission_id: Uuid::new_v4(),
            experience_level: ExperienceLevel::SomeExperience,
            motivation: "I want to support the games and my local community.".to_string(),
            preferred_sports: sqlx::types::Json(vec![Sport::Athletics]),
            preferred_venues: sqlx::types::Json(vec![]),
            preferred_roles: sqlx::types::Json(vec![VolunteerRole::Logistics]),
            available_time_slots: sqlx::types::Json(vec![TimeSlot::Morning]),
            can_work_outdoors: true,
            can_lift_20kg: false,
            has_first_aid_certificate: false,
            has_drivers_licence: true,
            updated_at: ts(),
        }
    }

    #[test]
    fn test_empty_review_has_three_incomplete_sections() {
        let review = ReviewResponse::assemble(draft_submission(), None, None, None, None);

        assert!(!review.profile.completed);
        assert!(!review.recruitment.completed);
        assert!(!review.games.completed);
        assert_eq!(
            review.missing_stages,
            vec![EoiStep::Profile, EoiStep::Recruitment, EoiStep::Games]
        );
        assert!(!review.can_submit);
    }

    #[test]
    fn test_complete_review_with_consents_can_submit() {
        let review = ReviewResponse::assemble(
            draft_submission(),
            None,
            Some(profile()),
            Some(recruitment()),
            Some(games(true, true)),
        );

        assert!(review.missing_stages.is_empty());
        assert!(review.can_submit);
    }

    #[test]
    fn test_missing_consents_block_submit() {
        let review = ReviewResponse::assemble(
            draft_submission(),
            None,
            Some(profile()),
            Some(recruitment()),
            Some(games(true, false)),
        );

        assert!(review.missing_stages.is_empty());
        assert!(!review.can_submit);
    }

    #[test]
    fn test_submitted_review_cannot_submit_again() {
        let mut submission = draft_submission();
        submission.status = SubmissionStatus::Submitted;
        submission.reference_number = Some("A1B2C3D4".to_string());

        let review = ReviewResponse::assemble(
            submission,
            None,
            Some(profile()),
            Some(recruitment()),
            Some(games(true, true)),
        );

        assert!(!review.can_submit);
    }
}
