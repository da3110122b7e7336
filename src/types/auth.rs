use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::user::UserView;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RRegister {
    pub email: String,
    pub name: String,
    pub password: String,
    pub group_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RLogin {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthRes {
    pub user: UserView,
    pub access_token: String,
}
