use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginationMeta, PaginationParams},
        eoi::{
            GamesStageRequest, ProfileStageRequest, RecruitmentStageRequest, SelectGroupRequest,
            StartEoiRequest, SubmissionListResponse, SubmissionResponse,
        },
        review::{
            ConfirmationResponse, GamesSection, ProfileSection, RecruitmentSection, ReviewResponse,
        },
    },
    error::StorageError,
    models::{EoiStep, EoiSubmission, GamesInformation},
    repository::{corporate_group::CorporateGroupRepository, eoi::EoiRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create a draft submission for the chosen volunteer type
pub async fn start(pool: &PgPool, req: &StartEoiRequest) -> WebResult<EoiSubmission> {
    let repo = EoiRepository::new(pool);
    Ok(repo.create(req.volunteer_type).await?)
}

pub async fn get_submission(pool: &PgPool, id: Uuid) -> WebResult<EoiSubmission> {
    let repo = EoiRepository::new(pool);
    Ok(repo.find_by_id(id).await?)
}

/// Bind a corporate group. Only corporate submissions carry a group, and
/// only active groups are selectable.
pub async fn select_group(
    pool: &PgPool,
    id: Uuid,
    req: &SelectGroupRequest,
) -> WebResult<EoiSubmission> {
    let repo = EoiRepository::new(pool);
    let submission = repo.find_by_id(id).await?;

    if !submission.volunteer_type.is_corporate() {
        return Err(WebError::BadRequest(
            "Only corporate submissions can select a group".to_string(),
        ));
    }

    let groups = CorporateGroupRepository::new(pool);
    groups
        .find_active_by_id(req.corporate_group_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => {
                WebError::BadRequest("Unknown or inactive corporate group".to_string())
            }
            other => WebError::Storage(other),
        })?;

    Ok(repo.bind_group(id, req.corporate_group_id).await?)
}

/// Redirect-guard shared by stage reads and writes: a stage may only be
/// touched once everything before it is complete.
async fn guard_step(pool: &PgPool, id: Uuid, step: EoiStep) -> WebResult<EoiSubmission> {
    let repo = EoiRepository::new(pool);
    let submission = repo.find_by_id(id).await?;
    let progress = repo.progress(&submission).await?;

    if let Some(redirect_to) = progress.required_redirect(step) {
        return Err(WebError::StepOrder {
            submission_id: id,
            redirect_to,
        });
    }

    Ok(submission)
}

pub async fn get_profile(pool: &PgPool, id: Uuid) -> WebResult<ProfileSection> {
    guard_step(pool, id, EoiStep::Profile).await?;

    let data = EoiRepository::new(pool).get_profile(id).await?;
    Ok(ProfileSection {
        completed: data.is_some(),
        data,
    })
}

pub async fn save_profile(
    pool: &PgPool,
    id: Uuid,
    req: &ProfileStageRequest,
) -> WebResult<EoiSubmission> {
    guard_step(pool, id, EoiStep::Profile).await?;
    Ok(EoiRepository::new(pool).save_profile(id, req).await?)
}

pub async fn get_recruitment(pool: &PgPool, id: Uuid) -> WebResult<RecruitmentSection> {
    guard_step(pool, id, EoiStep::Recruitment).await?;

    let data = EoiRepository::new(pool).get_recruitment(id).await?;
    Ok(RecruitmentSection {
        completed: data.is_some(),
        data,
    })
}

pub async fn save_recruitment(
    pool: &PgPool,
    id: Uuid,
    req: &RecruitmentStageRequest,
) -> WebResult<EoiSubmission> {
    guard_step(pool, id, EoiStep::Recruitment).await?;
    Ok(EoiRepository::new(pool).save_recruitment(id, req).await?)
}

pub async fn get_games(pool: &PgPool, id: Uuid) -> WebResult<GamesSection> {
    guard_step(pool, id, EoiStep::Games).await?;

    let data = EoiRepository::new(pool).get_games(id).await?;
    Ok(GamesSection {
        completed: data.is_some(),
        data,
    })
}

pub async fn save_games(
    pool: &PgPool,
    id: Uuid,
    req: &GamesStageRequest,
) -> WebResult<EoiSubmission> {
    guard_step(pool, id, EoiStep::Games).await?;
    Ok(EoiRepository::new(pool).save_games(id, req).await?)
}

/// Assemble the read model for the review step. Never mutates state;
/// missing stages come back as incomplete sections.
pub async fn review(pool: &PgPool, id: Uuid) -> WebResult<ReviewResponse> {
    let repo = EoiRepository::new(pool);
    let submission = repo.find_by_id(id).await?;

    let corporate_group = match submission.corporate_group_id {
        Some(group_id) => CorporateGroupRepository::new(pool).find_by_id(group_id).await?,
        None => None,
    };

    let profile = repo.get_profile(id).await?;
    let recruitment = repo.get_recruitment(id).await?;
    let games = repo.get_games(id).await?;

    Ok(ReviewResponse::assemble(
        submission,
        corporate_group,
        profile,
        recruitment,
        games,
    ))
}

/// Finalize a draft. Returns the confirmation view, whether this request won
/// the draft -> submitted transition, and the applicant email for the
/// notification dispatch.
pub async fn submit(
    pool: &PgPool,
    id: Uuid,
) -> WebResult<(ConfirmationResponse, bool, Option<String>)> {
    let repo = EoiRepository::new(pool);
    let submission = repo.find_by_id(id).await?;

    if submission.is_draft() {
        let progress = repo.progress(&submission).await?;
        let missing = progress.missing_stages();
        if !missing.is_empty() {
            return Err(WebError::IncompleteSubmission(missing));
        }

        let games = repo.get_games(id).await?;
        let consents_accepted = games
            .as_ref()
            .is_some_and(GamesInformation::required_consents_accepted);
        if !consents_accepted {
            return Err(WebError::BadRequest(
                "Photo and social media consents must be accepted before submitting".to_string(),
            ));
        }
    }

    let outcome = repo.finalize(id).await?;
    let email = repo.get_profile(id).await?.map(|p| p.email);
    let confirmation = confirmation_view(&outcome.submission)?;

    Ok((confirmation, outcome.newly_submitted, email))
}

/// Terminal read-only view; drafts are sent back to review instead.
pub async fn confirmation(pool: &PgPool, id: Uuid) -> WebResult<ConfirmationResponse> {
    let repo = EoiRepository::new(pool);
    let submission = repo.find_by_id(id).await?;

    if submission.is_draft() {
        return Err(WebError::StepOrder {
            submission_id: id,
            redirect_to: EoiStep::Review,
        });
    }

    confirmation_view(&submission)
}

fn confirmation_view(submission: &EoiSubmission) -> WebResult<ConfirmationResponse> {
    let reference_number = submission.reference_number.clone().ok_or_else(|| {
        WebError::InternalServerError("Finalized submission has no reference number".to_string())
    })?;
    let submitted_at = submission.submitted_at.ok_or_else(|| {
        WebError::InternalServerError("Finalized submission has no submission time".to_string())
    })?;

    Ok(ConfirmationResponse {
        submission_id: submission.submission_id,
        volunteer_type: submission.volunteer_type,
        reference_number,
        submitted_at,
    })
}

/// Paginated listing for staff review screens
pub async fn list_submissions(
    pool: &PgPool,
    params: &PaginationParams,
) -> WebResult<SubmissionListResponse> {
    params.validate().map_err(WebError::BadRequest)?;

    let repo = EoiRepository::new(pool);
    let (submissions, total) = repo.list(params.limit(), params.offset()).await?;

    Ok(SubmissionListResponse {
        data: submissions.into_iter().map(SubmissionResponse::from).collect(),
        pagination: PaginationMeta::new(params.page, params.page_size, total),
    })
}
