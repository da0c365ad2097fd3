use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginationParams,
        eoi::{
            GamesStageRequest, ProfileStageRequest, RecruitmentStageRequest, SelectGroupRequest,
            StartEoiRequest, SubmissionListResponse, SubmissionResponse,
        },
        review::{
            ConfirmationResponse, GamesSection, ProfileSection, RecruitmentSection, ReviewResponse,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/eoi/start",
    request_body = StartEoiRequest,
    responses(
        (status = 201, description = "Draft submission created", body = SubmissionResponse)
    ),
    tag = "eoi"
)]
pub async fn start_eoi(
    State(db): State<Database>,
    Json(req): Json<StartEoiRequest>,
) -> Result<Response, WebError> {
    let submission = services::start(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission snapshot", body = SubmissionResponse),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn get_submission(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission = services::get_submission(db.pool(), id).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/eoi/{id}/group",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    request_body = SelectGroupRequest,
    responses(
        (status = 200, description = "Corporate group bound", body = SubmissionResponse),
        (status = 400, description = "Not a corporate submission, or group unavailable"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn select_group(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectGroupRequest>,
) -> Result<Response, WebError> {
    let submission = services::select_group(db.pool(), id, &req).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}/profile",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Profile stage data, if saved", body = ProfileSection),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn get_profile(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let section = services::get_profile(db.pool(), id).await?;

    Ok(Json(section).into_response())
}

#[utoipa::path(
    post,
    path = "/api/eoi/{id}/profile",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    request_body = ProfileStageRequest,
    responses(
        (status = 200, description = "Profile stage saved", body = SubmissionResponse),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Submission already finalized")
    ),
    tag = "eoi"
)]
pub async fn save_profile(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProfileStageRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::save_profile(db.pool(), id, &req).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}/recruitment",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Recruitment stage data, if saved", body = RecruitmentSection),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn get_recruitment(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let section = services::get_recruitment(db.pool(), id).await?;

    Ok(Json(section).into_response())
}

#[utoipa::path(
    post,
    path = "/api/eoi/{id}/recruitment",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    request_body = RecruitmentStageRequest,
    responses(
        (status = 200, description = "Recruitment stage saved", body = SubmissionResponse),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Submission already finalized")
    ),
    tag = "eoi"
)]
pub async fn save_recruitment(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecruitmentStageRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::save_recruitment(db.pool(), id, &req).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}/games",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Games stage data, if saved", body = GamesSection),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn get_games(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let section = services::get_games(db.pool(), id).await?;

    Ok(Json(section).into_response())
}

#[utoipa::path(
    post,
    path = "/api/eoi/{id}/games",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    request_body = GamesStageRequest,
    responses(
        (status = 200, description = "Games stage saved", body = SubmissionResponse),
        (status = 303, description = "Prerequisite step incomplete"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Submission already finalized")
    ),
    tag = "eoi"
)]
pub async fn save_games(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<GamesStageRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::save_games(db.pool(), id, &req).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}/review",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Aggregated review of all stages", body = ReviewResponse),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn review(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let review = services::review(db.pool(), id).await?;

    Ok(Json(review).into_response())
}

#[utoipa::path(
    post,
    path = "/api/eoi/{id}/submit",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission finalized (idempotent)", body = ConfirmationResponse),
        (status = 400, description = "Stages missing or consents not accepted"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let (confirmation, newly_submitted, email) = services::submit(state.db.pool(), id).await?;

    if newly_submitted {
        state
            .notifier
            .send_confirmation(id, &confirmation.reference_number, email);
    }

    Ok(Json(confirmation).into_response())
}

#[utoipa::path(
    get,
    path = "/api/eoi/{id}/confirmation",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Confirmation details", body = ConfirmationResponse),
        (status = 303, description = "Submission still in draft"),
        (status = 404, description = "Submission not found")
    ),
    tag = "eoi"
)]
pub async fn confirmation(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let confirmation = services::confirmation(db.pool(), id).await?;

    Ok(Json(confirmation).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/eoi",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated submissions", body = SubmissionListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    let listing = services::list_submissions(db.pool(), &params).await?;

    Ok(Json(listing).into_response())
}
