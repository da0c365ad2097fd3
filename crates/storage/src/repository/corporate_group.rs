use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::CorporateVolunteerGroup;

pub struct CorporateGroupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CorporateGroupRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List groups currently open for corporate selection
    pub async fn list_active(&self) -> Result<Vec<CorporateVolunteerGroup>> {
        let groups = sqlx::query_as::<_, CorporateVolunteerGroup>(
            r#"
            SELECT group_id, name, contact_email, is_active, created_at
            FROM corporate_volunteer_groups
            WHERE is_active
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }

    /// Find an active group by id; inactive groups are not selectable
    pub async fn find_active_by_id(&self, id: Uuid) -> Result<CorporateVolunteerGroup> {
        let group = sqlx::query_as::<_, CorporateVolunteerGroup>(
            r#"
            SELECT group_id, name, contact_email, is_active, created_at
            FROM corporate_volunteer_groups
            WHERE group_id = $1 AND is_active
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(group)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CorporateVolunteerGroup>> {
        let group = sqlx::query_as::<_, CorporateVolunteerGroup>(
            r#"
            SELECT group_id, name, contact_email, is_active, created_at
            FROM corporate_volunteer_groups
            WHERE group_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(group)
    }
}
