use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    confirmation, get_games, get_profile, get_recruitment, get_submission, list_submissions,
    review, save_games, save_profile, save_recruitment, select_group, start_eoi, submit,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_eoi))
        .route("/:id", get(get_submission))
        .route("/:id/group", post(select_group))
        .route("/:id/profile", get(get_profile).post(save_profile))
        .route("/:id/recruitment", get(get_recruitment).post(save_recruitment))
        .route("/:id/games", get(get_games).post(save_games))
        .route("/:id/review", get(review))
        .route("/:id/submit", post(submit))
        .route("/:id/confirmation", get(confirmation))
}

pub fn admin_routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
