use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Department, NamedValue, Role, UserRoles};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTokenInfoRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTokenInfoReply {
    pub user: String,
    pub valid: bool,
    pub expiry_time: DateTime<Utc>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInRequest {
    pub account: String,
    pub password: String,
    pub ad_user: bool,
    /// Overrides the default token lifetime when set.
    pub token_expired_after_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInReply {
    pub token: String,
    pub token_expiry: DateTime<Utc>,
    pub departments: Vec<Department>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePassword {
    pub new_password: String,
    pub old_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub user_id: String,
    pub roles: Vec<Role>,
    pub change_password: Option<ChangePassword>,
    pub reset_password: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRolesReply {
    pub roles: Vec<NamedValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUnauthorizedUsersRequest {
    pub department_id: String,
    pub exclude_users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUnauthorizedUsersReply {
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUserRolesRequest {
    pub department_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUserRolesReply {
    pub users: Vec<UserRoles>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub id: String,
    pub roles: Vec<Role>,
    pub password: String,
}

impl CreateAccountRequest {
    /// A new account whose initial password is its own ID.
    pub fn with_default_password(id: String, roles: Vec<Role>) -> Self {
        Self {
            password: id.clone(),
            id,
            roles,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountsRequest {
    pub accounts: Vec<CreateAccountRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    pub id: String,
}
