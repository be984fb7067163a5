//! Account response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::{self, Role};

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    #[serde(rename = "OID")]
    pub oid: String,
    #[serde(rename = "ID")]
    pub id: String,
}

impl From<mcom::Department> for DepartmentResponse {
    fn from(d: mcom::Department) -> Self {
        Self { oid: d.oid, id: d.id }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_expiry: DateTime<Utc>,
    #[schema(value_type = Vec<i32>)]
    pub roles: Vec<Role>,
    pub authorized_departments: Vec<DepartmentResponse>,
}

impl From<mcom::SignInReply> for LoginResponse {
    fn from(reply: mcom::SignInReply) -> Self {
        Self {
            token: reply.token,
            token_expiry: reply.token_expiry,
            roles: reply.roles,
            authorized_departments: reply.departments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorizedAccount {
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    #[schema(value_type = Vec<i32>)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnauthorizedAccount {
    #[serde(rename = "employeeID")]
    pub employee_id: String,
}
