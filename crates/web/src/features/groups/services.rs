use sqlx::PgPool;
use storage::{
    error::Result, models::CorporateVolunteerGroup,
    repository::corporate_group::CorporateGroupRepository,
};

/// List groups open for corporate volunteer selection
pub async fn list_active_groups(pool: &PgPool) -> Result<Vec<CorporateVolunteerGroup>> {
    let repo = CorporateGroupRepository::new(pool);
    repo.list_active().await
}
