use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::CorporateVolunteerGroup;

/// Response containing one selectable corporate volunteer group
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CorporateGroupResponse {
    pub group_id: Uuid,
    pub name: String,
    pub contact_email: String,
}

impl From<CorporateVolunteerGroup> for CorporateGroupResponse {
    fn from(group: CorporateVolunteerGroup) -> Self {
        Self {
            group_id: group.group_id,
            name: group.name,
            contact_email: group.contact_email,
        }
    }
}
