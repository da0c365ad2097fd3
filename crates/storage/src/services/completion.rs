use uuid::Uuid;

use crate::models::SubmissionProgress;

const STAGE_COUNT: u32 = 3;

/// Completion percentage of a submission: stages with saved data over the
/// three collection stages, rounded to the nearest whole percent. Reaches
/// 100 exactly when all three stage rows exist.
pub fn completion_percentage(progress: &SubmissionProgress) -> i16 {
    let present = progress.stages_present() as u32;
    ((present * 100 + STAGE_COUNT / 2) / STAGE_COUNT) as i16
}

/// The immutable reference number issued at finalization: the first 8 hex
/// characters of the submission id, uppercased.
pub fn reference_number(submission_id: Uuid) -> String {
    submission_id.simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(profile: bool, recruitment: bool, games: bool) -> SubmissionProgress {
        SubmissionProgress {
            profile,
            recruitment,
            games,
            ..Default::default()
        }
    }

    #[test]
    fn test_completion_steps() {
        assert_eq!(completion_percentage(&progress(false, false, false)), 0);
        assert_eq!(completion_percentage(&progress(true, false, false)), 33);
        assert_eq!(completion_percentage(&progress(true, true, false)), 67);
    }

    #[test]
    fn test_completion_is_100_iff_all_stages_present() {
        assert_eq!(completion_percentage(&progress(true, true, true)), 100);
        assert!(completion_percentage(&progress(true, true, false)) < 100);
        assert!(completion_percentage(&progress(false, true, true)) < 100);
        assert!(completion_percentage(&progress(true, false, true)) < 100);
    }

    #[test]
    fn test_reference_number_format() {
        let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        let reference = reference_number(id);
        assert_eq!(reference, "A1B2C3D4");
        assert_eq!(reference.len(), 8);
        assert!(reference.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_reference_number_is_stable() {
        let id = Uuid::new_v4();
        assert_eq!(reference_number(id), reference_number(id));
    }
}
