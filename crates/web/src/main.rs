use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod notify;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use notify::Notifier;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::eoi::handlers::start_eoi,
        features::eoi::handlers::get_submission,
        features::eoi::handlers::select_group,
        features::eoi::handlers::get_profile,
        features::eoi::handlers::save_profile,
        features::eoi::handlers::get_recruitment,
        features::eoi::handlers::save_recruitment,
        features::eoi::handlers::get_games,
        features::eoi::handlers::save_games,
        features::eoi::handlers::review,
        features::eoi::handlers::submit,
        features::eoi::handlers::confirmation,
        features::eoi::handlers::list_submissions,
        features::groups::handlers::list_groups,
    ),
    components(
        schemas(
            storage::dto::eoi::StartEoiRequest,
            storage::dto::eoi::SelectGroupRequest,
            storage::dto::eoi::ProfileStageRequest,
            storage::dto::eoi::RecruitmentStageRequest,
            storage::dto::eoi::GamesStageRequest,
            storage::dto::eoi::SubmissionResponse,
            storage::dto::eoi::SubmissionListResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::group::CorporateGroupResponse,
            storage::dto::review::ProfileSection,
            storage::dto::review::RecruitmentSection,
            storage::dto::review::GamesSection,
            storage::dto::review::ReviewResponse,
            storage::dto::review::ConfirmationResponse,
            storage::models::EoiSubmission,
            storage::models::ProfileInformation,
            storage::models::RecruitmentPreferences,
            storage::models::GamesInformation,
            storage::models::CorporateVolunteerGroup,
            storage::models::VolunteerType,
            storage::models::SubmissionStatus,
            storage::models::EoiStep,
            storage::models::ExperienceLevel,
            storage::models::Sport,
            storage::models::Venue,
            storage::models::VolunteerRole,
            storage::models::TimeSlot,
            storage::models::UniformSize,
        )
    ),
    tags(
        (name = "eoi", description = "Expression-of-interest workflow endpoints"),
        (name = "groups", description = "Corporate volunteer group directory"),
        (name = "admin", description = "Staff review endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting EOI API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    let notifier = Notifier::new(config.notify_webhook_url.clone());
    let app_state = AppState { db, notifier };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = axum::Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .nest("/api/eoi", features::eoi::routes::routes())
        .nest("/api/admin/eoi", features::eoi::routes::admin_routes(api_keys))
        .nest("/api/groups", features::groups::routes::routes())
        .layer(cors)
        .with_state(app_state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    axum::serve(listener, app).await?;

    Ok(())
}
