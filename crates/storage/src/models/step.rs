use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A step in the EOI workflow. The sequence is linear:
/// (corporate group, corporate applicants only) -> profile -> recruitment ->
/// games -> review -> confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "eoi_step", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EoiStep {
    CorporateGroup,
    Profile,
    Recruitment,
    Games,
    Review,
    Confirmation,
}

impl EoiStep {
    /// URL path segment for the step, used when redirecting a caller that
    /// jumped ahead of its prerequisites.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EoiStep::CorporateGroup => "group",
            EoiStep::Profile => "profile",
            EoiStep::Recruitment => "recruitment",
            EoiStep::Games => "games",
            EoiStep::Review => "review",
            EoiStep::Confirmation => "confirmation",
        }
    }
}

/// What a submission has completed so far, independent of the persisted
/// `current_step` pointer. Derived from the submission row and the presence
/// of the three stage rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionProgress {
    pub corporate: bool,
    pub group_selected: bool,
    pub profile: bool,
    pub recruitment: bool,
    pub games: bool,
}

impl SubmissionProgress {
    pub fn stages_present(&self) -> u8 {
        self.profile as u8 + self.recruitment as u8 + self.games as u8
    }

    pub fn missing_stages(&self) -> Vec<EoiStep> {
        let mut missing = Vec::new();
        if !self.profile {
            missing.push(EoiStep::Profile);
        }
        if !self.recruitment {
            missing.push(EoiStep::Recruitment);
        }
        if !self.games {
            missing.push(EoiStep::Games);
        }
        missing
    }

    /// The earliest unmet prerequisite of `target`, if any. Accessing a stage
    /// out of order is not a validation failure; the caller is expected to
    /// redirect to the returned step.
    pub fn required_redirect(&self, target: EoiStep) -> Option<EoiStep> {
        let group_pending = self.corporate && !self.group_selected;

        match target {
            EoiStep::CorporateGroup => None,
            EoiStep::Profile => group_pending.then_some(EoiStep::CorporateGroup),
            EoiStep::Recruitment => {
                if group_pending {
                    Some(EoiStep::CorporateGroup)
                } else if !self.profile {
                    Some(EoiStep::Profile)
                } else {
                    None
                }
            }
            EoiStep::Games => {
                if group_pending {
                    Some(EoiStep::CorporateGroup)
                } else if !self.profile {
                    Some(EoiStep::Profile)
                } else if !self.recruitment {
                    Some(EoiStep::Recruitment)
                } else {
                    None
                }
            }
            // Review renders incomplete sections instead of redirecting, and
            // confirmation is gated on status rather than stage presence.
            EoiStep::Review | EoiStep::Confirmation => None,
        }
    }

    /// The furthest step the applicant can currently reach. Persisted as the
    /// submission's `current_step` so a draft is resumable across devices.
    pub fn furthest_step(&self) -> EoiStep {
        if self.corporate && !self.group_selected {
            EoiStep::CorporateGroup
        } else if !self.profile {
            EoiStep::Profile
        } else if !self.recruitment {
            EoiStep::Recruitment
        } else if !self.games {
            EoiStep::Games
        } else {
            EoiStep::Review
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SubmissionProgress {
        SubmissionProgress {
            corporate: false,
            group_selected: false,
            profile: true,
            recruitment: true,
            games: true,
        }
    }

    #[test]
    fn test_recruitment_before_profile_redirects_to_profile() {
        let progress = SubmissionProgress::default();
        assert_eq!(
            progress.required_redirect(EoiStep::Recruitment),
            Some(EoiStep::Profile)
        );
    }

    #[test]
    fn test_games_redirects_to_earliest_incomplete_stage() {
        let progress = SubmissionProgress {
            profile: true,
            ..Default::default()
        };
        assert_eq!(
            progress.required_redirect(EoiStep::Games),
            Some(EoiStep::Recruitment)
        );
    }

    #[test]
    fn test_corporate_without_group_blocks_profile() {
        let progress = SubmissionProgress {
            corporate: true,
            ..Default::default()
        };
        assert_eq!(
            progress.required_redirect(EoiStep::Profile),
            Some(EoiStep::CorporateGroup)
        );
        assert_eq!(progress.furthest_step(), EoiStep::CorporateGroup);
    }

    #[test]
    fn test_corporate_with_group_proceeds_to_profile() {
        let progress = SubmissionProgress {
            corporate: true,
            group_selected: true,
            ..Default::default()
        };
        assert_eq!(progress.required_redirect(EoiStep::Profile), None);
        assert_eq!(progress.furthest_step(), EoiStep::Profile);
    }

    #[test]
    fn test_complete_draft_has_no_redirects() {
        let progress = complete();
        for step in [
            EoiStep::Profile,
            EoiStep::Recruitment,
            EoiStep::Games,
            EoiStep::Review,
        ] {
            assert_eq!(progress.required_redirect(step), None);
        }
        assert_eq!(progress.furthest_step(), EoiStep::Review);
    }

    #[test]
    fn test_review_is_always_reachable() {
        let progress = SubmissionProgress::default();
        assert_eq!(progress.required_redirect(EoiStep::Review), None);
    }

    #[test]
    fn test_missing_stages_in_step_order() {
        let progress = SubmissionProgress {
            recruitment: true,
            ..Default::default()
        };
        assert_eq!(
            progress.missing_stages(),
            vec![EoiStep::Profile, EoiStep::Games]
        );
        assert!(complete().missing_stages().is_empty());
    }
}
