use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::group::CorporateGroupResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Active corporate volunteer groups", body = Vec<CorporateGroupResponse>)
    ),
    tag = "groups"
)]
pub async fn list_groups(State(db): State<Database>) -> Result<Response, WebError> {
    let groups = services::list_active_groups(db.pool()).await?;

    let response: Vec<CorporateGroupResponse> = groups
        .into_iter()
        .map(CorporateGroupResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
