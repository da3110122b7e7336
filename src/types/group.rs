use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: Uuid,
    pub name: String,
    pub leader_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub member_count: u64,
}

impl GroupView {
    pub fn new(g: entity::group::Model, member_count: u64) -> Self {
        Self {
            id: g.id,
            name: g.name,
            leader_name: g.leader_name,
            created_at: g.created_at,
            member_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RGroupCreate {
    pub name: String,
    pub leader_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RGroupUpdate {
    pub name: Option<String>,
    pub leader_name: Option<String>,
}
