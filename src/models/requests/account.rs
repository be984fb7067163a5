//! Account request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::mcom::Role;

/// Request payload for signing in
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Employee ID or AD account
    #[validate(length(min = 1, message = "id is required"))]
    #[schema(example = "123456")]
    pub id: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// 1 signs in as an Active Directory user
    #[schema(example = 0)]
    pub login_type: i32,
}

impl LoginRequest {
    pub fn is_ad_user(&self) -> bool {
        self.login_type == 1
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "currentPassword is required"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "newPassword is required"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[serde(rename = "employeeID")]
    #[validate(length(min = 1, message = "employeeID is required"))]
    pub employee_id: String,
    #[schema(value_type = Vec<i32>)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[schema(value_type = Vec<i32>)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub reset_password: bool,
}
