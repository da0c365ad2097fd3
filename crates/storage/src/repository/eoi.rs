use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::eoi::{GamesStageRequest, ProfileStageRequest, RecruitmentStageRequest};
use crate::error::{Result, StorageError};
use crate::models::{
    EoiStep, EoiSubmission, GamesInformation, ProfileInformation, RecruitmentPreferences,
    SubmissionProgress, SubmissionStatus, VolunteerType,
};
use crate::services::completion;

const SUBMISSION_COLUMNS: &str = "submission_id, volunteer_type, corporate_group_id, \
     current_step, completion_percentage, status, reference_number, \
     created_at, updated_at, submitted_at";

/// Result of a finalize call. `newly_submitted` is false when a concurrent
/// request won the draft -> submitted transition first; the caller then sees
/// the reference number that request assigned.
pub struct FinalizeOutcome {
    pub submission: EoiSubmission,
    pub newly_submitted: bool,
}

pub struct EoiRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EoiRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a draft submission at the first applicable step
    pub async fn create(&self, volunteer_type: VolunteerType) -> Result<EoiSubmission> {
        let first_step = if volunteer_type.is_corporate() {
            EoiStep::CorporateGroup
        } else {
            EoiStep::Profile
        };

        let submission = sqlx::query_as::<_, EoiSubmission>(&format!(
            r#"
            INSERT INTO eoi_submissions (volunteer_type, current_step)
            VALUES ($1, $2)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(volunteer_type)
        .bind(first_step)
        .fetch_one(self.pool)
        .await?;

        Ok(submission)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<EoiSubmission> {
        let submission = sqlx::query_as::<_, EoiSubmission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM eoi_submissions
            WHERE submission_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Stage presence and selection state for a submission
    pub async fn progress(&self, submission: &EoiSubmission) -> Result<SubmissionProgress> {
        let (profile, recruitment, games) =
            stage_flags(&mut *self.pool.acquire().await?, submission.submission_id).await?;

        Ok(SubmissionProgress {
            corporate: submission.volunteer_type.is_corporate(),
            group_selected: submission.corporate_group_id.is_some(),
            profile,
            recruitment,
            games,
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<Option<ProfileInformation>> {
        let profile = sqlx::query_as::<_, ProfileInformation>(
            r#"
            SELECT submission_id, first_name, last_name, date_of_birth, email, phone,
                   address_line1, address_line2, suburb, state, postcode,
                   emergency_contact_name, emergency_contact_phone,
                   emergency_contact_relationship, updated_at
            FROM profile_information
            WHERE submission_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn get_recruitment(&self, id: Uuid) -> Result<Option<RecruitmentPreferences>> {
        let recruitment = sqlx::query_as::<_, RecruitmentPreferences>(
            r#"
            SELECT submission_id, experience_level, motivation, preferred_sports,
                   preferred_venues, preferred_roles, available_time_slots,
                   can_work_outdoors, can_lift_20kg, has_first_aid_certificate,
                   has_drivers_licence, updated_at
            FROM recruitment_preferences
            WHERE submission_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(recruitment)
    }

    pub async fn get_games(&self, id: Uuid) -> Result<Option<GamesInformation>> {
        let games = sqlx::query_as::<_, GamesInformation>(
            r#"
            SELECT submission_id, uniform_size, dietary_requirements, has_medical_conditions,
                   medical_conditions, photo_consent, social_media_consent,
                   testimonial_consent, photo_reference, updated_at
            FROM games_information
            WHERE submission_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(games)
    }

    /// Upsert the profile stage and refresh the submission's completion
    /// percentage and step pointer, all in one transaction.
    pub async fn save_profile(
        &self,
        id: Uuid,
        req: &ProfileStageRequest,
    ) -> Result<EoiSubmission> {
        let mut tx = self.pool.begin().await?;
        let submission = lock_draft(&mut *tx, id).await?;

        sqlx::query(
            r#"
            INSERT INTO profile_information (
                submission_id, first_name, last_name, date_of_birth, email, phone,
                address_line1, address_line2, suburb, state, postcode,
                emergency_contact_name, emergency_contact_phone,
                emergency_contact_relationship
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (submission_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                date_of_birth = EXCLUDED.date_of_birth,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                address_line1 = EXCLUDED.address_line1,
                address_line2 = EXCLUDED.address_line2,
                suburb = EXCLUDED.suburb,
                state = EXCLUDED.state,
                postcode = EXCLUDED.postcode,
                emergency_contact_name = EXCLUDED.emergency_contact_name,
                emergency_contact_phone = EXCLUDED.emergency_contact_phone,
                emergency_contact_relationship = EXCLUDED.emergency_contact_relationship,
                updated_at = now()
            "#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.date_of_birth)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.address_line1)
        .bind(&req.address_line2)
        .bind(&req.suburb)
        .bind(&req.state)
        .bind(&req.postcode)
        .bind(&req.emergency_contact_name)
        .bind(&req.emergency_contact_phone)
        .bind(&req.emergency_contact_relationship)
        .execute(&mut *tx)
        .await?;

        let updated = refresh_progress(&mut *tx, &submission).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Upsert the recruitment preferences stage
    pub async fn save_recruitment(
        &self,
        id: Uuid,
        req: &RecruitmentStageRequest,
    ) -> Result<EoiSubmission> {
        let mut tx = self.pool.begin().await?;
        let submission = lock_draft(&mut *tx, id).await?;

        sqlx::query(
            r#"
            INSERT INTO recruitment_preferences (
                submission_id, experience_level, motivation, preferred_sports,
                preferred_venues, preferred_roles, available_time_slots,
                can_work_outdoors, can_lift_20kg, has_first_aid_certificate,
                has_drivers_licence
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (submission_id) DO UPDATE SET
                experience_level = EXCLUDED.experience_level,
                motivation = EXCLUDED.motivation,
                preferred_sports = EXCLUDED.preferred_sports,
                preferred_venues = EXCLUDED.preferred_venues,
                preferred_roles = EXCLUDED.preferred_roles,
                available_time_slots = EXCLUDED.available_time_slots,
                can_work_outdoors = EXCLUDED.can_work_outdoors,
                can_lift_20kg = EXCLUDED.can_lift_20kg,
                has_first_aid_certificate = EXCLUDED.has_first_aid_certificate,
                has_drivers_licence = EXCLUDED.has_drivers_licence,
                updated_at = now()
            "#,
        )
        .bind(id)
        .bind(req.experience_level)
        .bind(&req.motivation)
        .bind(sqlx::types::Json(&req.preferred_sports))
        .bind(sqlx::types::Json(&req.preferred_venues))
        .bind(sqlx::types::Json(&req.preferred_roles))
        .bind(sqlx::types::Json(&req.available_time_slots))
        .bind(req.can_work_outdoors)
        .bind(req.can_lift_20kg)
        .bind(req.has_first_aid_certificate)
        .bind(req.has_drivers_licence)
        .execute(&mut *tx)
        .await?;

        let updated = refresh_progress(&mut *tx, &submission).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Upsert the games information stage
    pub async fn save_games(&self, id: Uuid, req: &GamesStageRequest) -> Result<EoiSubmission> {
        let mut tx = self.pool.begin().await?;
        let submission = lock_draft(&mut *tx, id).await?;

        sqlx::query(
            r#"
            INSERT INTO games_information (
                submission_id, uniform_size, dietary_requirements, has_medical_conditions,
                medical_conditions, photo_consent, social_media_consent,
                testimonial_consent, photo_reference
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (submission_id) DO UPDATE SET
                uniform_size = EXCLUDED.uniform_size,
                dietary_requirements = EXCLUDED.dietary_requirements,
                has_medical_conditions = EXCLUDED.has_medical_conditions,
                medical_conditions = EXCLUDED.medical_conditions,
                photo_consent = EXCLUDED.photo_consent,
                social_media_consent = EXCLUDED.social_media_consent,
                testimonial_consent = EXCLUDED.testimonial_consent,
                photo_reference = EXCLUDED.photo_reference,
                updated_at = now()
            "#,
        )
        .bind(id)
        .bind(req.uniform_size)
        .bind(&req.dietary_requirements)
        .bind(req.has_medical_conditions)
        .bind(&req.medical_conditions)
        .bind(req.photo_consent)
        .bind(req.social_media_consent)
        .bind(req.testimonial_consent)
        .bind(&req.photo_reference)
        .execute(&mut *tx)
        .await?;

        let updated = refresh_progress(&mut *tx, &submission).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Bind a corporate group to a draft submission
    pub async fn bind_group(&self, id: Uuid, group_id: Uuid) -> Result<EoiSubmission> {
        let mut tx = self.pool.begin().await?;
        let mut submission = lock_draft(&mut *tx, id).await?;

        if !submission.volunteer_type.is_corporate() {
            return Err(StorageError::ConstraintViolation(
                "Only corporate submissions can select a group".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE eoi_submissions SET corporate_group_id = $2 WHERE submission_id = $1",
        )
        .bind(id)
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
        submission.corporate_group_id = Some(group_id);

        let updated = refresh_progress(&mut *tx, &submission).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Finalize a submission: a compare-and-set on status guarded by the
    /// completion invariant. Safe to call twice; the loser of a double-submit
    /// gets the reference number the winner assigned.
    pub async fn finalize(&self, id: Uuid) -> Result<FinalizeOutcome> {
        let reference = completion::reference_number(id);

        let submitted = sqlx::query_as::<_, EoiSubmission>(&format!(
            r#"
            UPDATE eoi_submissions
            SET status = 'submitted',
                reference_number = $2,
                submitted_at = now(),
                current_step = 'confirmation',
                updated_at = now()
            WHERE submission_id = $1
              AND status = 'draft'
              AND completion_percentage = 100
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&reference)
        .fetch_optional(self.pool)
        .await?;

        if let Some(submission) = submitted {
            return Ok(FinalizeOutcome {
                submission,
                newly_submitted: true,
            });
        }

        // Lost the race or preconditions failed; re-read to tell which.
        let existing = self.find_by_id(id).await?;
        match existing.status {
            SubmissionStatus::Submitted => Ok(FinalizeOutcome {
                submission: existing,
                newly_submitted: false,
            }),
            SubmissionStatus::Draft => Err(StorageError::ConstraintViolation(
                "Submission is not complete".to_string(),
            )),
        }
    }

    /// Paginated listing for staff review screens
    pub async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<EoiSubmission>, i64)> {
        let submissions = sqlx::query_as::<_, EoiSubmission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM eoi_submissions
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM eoi_submissions")
            .fetch_one(self.pool)
            .await?;

        Ok((submissions, total))
    }
}

/// Lock the submission row for the duration of a stage write. Rejects writes
/// to finalized submissions so SUBMITTED records stay immutable at the
/// storage layer, not just in the controller.
async fn lock_draft(conn: &mut PgConnection, id: Uuid) -> Result<EoiSubmission> {
    let submission = sqlx::query_as::<_, EoiSubmission>(&format!(
        r#"
        SELECT {SUBMISSION_COLUMNS}
        FROM eoi_submissions
        WHERE submission_id = $1
        FOR UPDATE
        "#
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    if submission.status != SubmissionStatus::Draft {
        return Err(StorageError::AlreadySubmitted);
    }

    Ok(submission)
}

async fn stage_flags(conn: &mut PgConnection, id: Uuid) -> Result<(bool, bool, bool)> {
    let flags = sqlx::query_as::<_, (bool, bool, bool)>(
        r#"
        SELECT
            EXISTS(SELECT 1 FROM profile_information WHERE submission_id = $1),
            EXISTS(SELECT 1 FROM recruitment_preferences WHERE submission_id = $1),
            EXISTS(SELECT 1 FROM games_information WHERE submission_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(flags)
}

/// Recompute completion percentage and the resumable step pointer after a
/// stage or group write.
async fn refresh_progress(
    conn: &mut PgConnection,
    submission: &EoiSubmission,
) -> Result<EoiSubmission> {
    let (profile, recruitment, games) = stage_flags(conn, submission.submission_id).await?;

    let progress = SubmissionProgress {
        corporate: submission.volunteer_type.is_corporate(),
        group_selected: submission.corporate_group_id.is_some(),
        profile,
        recruitment,
        games,
    };

    let updated = sqlx::query_as::<_, EoiSubmission>(&format!(
        r#"
        UPDATE eoi_submissions
        SET completion_percentage = $2,
            current_step = $3,
            updated_at = now()
        WHERE submission_id = $1
        RETURNING {SUBMISSION_COLUMNS}
        "#
    ))
    .bind(submission.submission_id)
    .bind(completion::completion_percentage(&progress))
    .bind(progress.furthest_step())
    .fetch_one(&mut *conn)
    .await?;

    Ok(updated)
}
