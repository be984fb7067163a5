//! Account service: sign in/out, passwords and role assignments.

use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::ApiError;
use crate::mcom::{
    self, CallContext, ChangePassword, DataManager, DeleteAccountRequest, ListUnauthorizedUsersRequest,
    ListUserRolesRequest, SignInRequest, SignOutRequest,
};
use crate::models::{
    AuthorizedAccount, ChangePasswordRequest, CreateAccountRequest, IdName, LoginRequest,
    LoginResponse, Principal, UnauthorizedAccount, UpdateAccountRequest,
};
use crate::utils::log_sanitizer::{mask_employee_id, mask_token};

pub struct AccountService {
    dm: Arc<dyn DataManager>,
    token_lifetime: Option<u64>,
}

impl AccountService {
    /// `token_expired_in_seconds` of zero keeps the data manager default.
    pub fn new(dm: Arc<dyn DataManager>, token_expired_in_seconds: u64) -> Self {
        Self {
            dm,
            token_lifetime: (token_expired_in_seconds > 0).then_some(token_expired_in_seconds),
        }
    }

    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        let ad_user = req.is_ad_user();
        let account = req.id;
        let reply = self
            .dm
            .sign_in(
                &CallContext::anonymous(),
                SignInRequest {
                    account: account.clone(),
                    password: req.password,
                    ad_user,
                    token_expired_after_seconds: self.token_lifetime,
                },
            )
            .await
            .map_err(|e| {
                warn!("Login failed for {}: {}", mask_employee_id(&account), e);
                e
            })?;

        info!("User {} signed in", mask_employee_id(&account));
        Ok(reply.into())
    }

    /// Failures are logged and never reported.
    pub async fn logout(&self, token: &str) {
        if let Err(e) = self
            .dm
            .sign_out(
                &CallContext::anonymous(),
                SignOutRequest {
                    token: token.to_string(),
                },
            )
            .await
        {
            if e.as_mcom().is_some() {
                warn!("logout failed, token={}: {}", mask_token(token), e);
            } else {
                error!("logout failed, token={}: {}", mask_token(token), e);
            }
        }
    }

    pub async fn change_password(
        &self,
        principal: &Principal,
        req: ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.dm
            .update_account(
                &CallContext::user(&principal.id),
                mcom::UpdateAccountRequest {
                    user_id: principal.id.clone(),
                    change_password: Some(ChangePassword {
                        new_password: req.new_password,
                        old_password: req.current_password,
                    }),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    pub async fn list_roles(&self, principal: &Principal) -> Result<Vec<IdName>, ApiError> {
        let reply = self.dm.list_roles(&CallContext::user(&principal.id)).await?;
        Ok(reply.roles.into_iter().map(IdName::from).collect())
    }

    pub async fn list_authorized(
        &self,
        principal: &Principal,
        department_oid: &str,
    ) -> Result<Vec<AuthorizedAccount>, ApiError> {
        let reply = self
            .dm
            .list_user_roles(
                &CallContext::user(&principal.id),
                ListUserRolesRequest {
                    department_id: department_oid.to_string(),
                },
            )
            .await?;
        Ok(reply
            .users
            .into_iter()
            .map(|u| AuthorizedAccount {
                employee_id: u.id,
                roles: u.roles,
            })
            .collect())
    }

    /// Lists users without roles in the department, never the caller.
    pub async fn list_unauthorized(
        &self,
        principal: &Principal,
        department_oid: &str,
    ) -> Result<Vec<UnauthorizedAccount>, ApiError> {
        let reply = self
            .dm
            .list_unauthorized_users(
                &CallContext::user(&principal.id),
                ListUnauthorizedUsersRequest {
                    department_id: department_oid.to_string(),
                    exclude_users: vec![principal.id.clone()],
                },
            )
            .await?;
        Ok(reply
            .users
            .into_iter()
            .map(|employee_id| UnauthorizedAccount { employee_id })
            .collect())
    }

    pub async fn create(
        &self,
        principal: &Principal,
        req: CreateAccountRequest,
    ) -> Result<(), ApiError> {
        let employee = mask_employee_id(&req.employee_id);
        self.dm
            .create_accounts(
                &CallContext::user(&principal.id),
                mcom::CreateAccountsRequest {
                    accounts: vec![mcom::CreateAccountRequest::with_default_password(
                        req.employee_id,
                        req.roles,
                    )],
                },
            )
            .await?;
        info!("Account {} created by {}", employee, principal.id);
        Ok(())
    }

    pub async fn update(
        &self,
        principal: &Principal,
        employee_id: &str,
        req: UpdateAccountRequest,
    ) -> Result<(), ApiError> {
        self.dm
            .update_account(
                &CallContext::user(&principal.id),
                mcom::UpdateAccountRequest {
                    user_id: employee_id.to_string(),
                    roles: req.roles,
                    change_password: None,
                    reset_password: req.reset_password,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, employee_id: &str) -> Result<(), ApiError> {
        self.dm
            .delete_account(
                &CallContext::user(&principal.id),
                DeleteAccountRequest {
                    id: employee_id.to_string(),
                },
            )
            .await?;
        info!(
            "Account {} deleted by {}",
            mask_employee_id(employee_id),
            principal.id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::mcom::Role;
    use crate::test_support::{client, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Administrator],
        }
    }

    #[actix_web::test]
    async fn test_login_passes_token_lifetime() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/SignIn").json_body(json!({
                    "account": "E1",
                    "password": "pw",
                    "ad_user": true,
                    "token_expired_after_seconds": 60
                }));
                then.status(200).json_body(json!({
                    "token": "tok",
                    "token_expiry": "2030-01-01T00:00:00Z",
                    "departments": [{"oid": "D-OID", "id": "D1"}],
                    "roles": [2]
                }));
            })
            .await;

        let service = AccountService::new(client(&server), 60);
        let reply = service
            .login(LoginRequest {
                id: "E1".into(),
                password: "pw".into(),
                login_type: 1,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        let body = serde_json::to_value(reply).unwrap();
        assert_eq!(body["token"], "tok");
        assert_eq!(body["roles"], json!([2]));
        assert_eq!(body["authorizedDepartments"], json!([{"OID": "D-OID", "ID": "D1"}]));
    }

    #[actix_web::test]
    async fn test_login_domain_error_is_bad_request() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/SignIn");
                then.status(400).json_body(json!({"code": 200, "details": "bad password"}));
            })
            .await;

        let err = AccountService::new(client(&server), 0)
            .login(LoginRequest {
                id: "E1".into(),
                password: "x".into(),
                login_type: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.details == "bad password"));
    }

    #[actix_web::test]
    async fn test_logout_swallows_failures() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/SignOut").json_body(json!({"token": "tok"}));
                then.status(500).body("boom");
            })
            .await;

        AccountService::new(client(&server), 0).logout("tok").await;
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_unauthorized_excludes_caller() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ListUnauthorizedUsers")
                    .json_body(json!({"department_id": "D", "exclude_users": [USER]}));
                then.status(200).json_body(json!({"users": ["E2"]}));
            })
            .await;

        let list = AccountService::new(client(&server), 0)
            .list_unauthorized(&principal(), "D")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(serde_json::to_value(list).unwrap(), json!([{"employeeID": "E2"}]));
    }

    #[actix_web::test]
    async fn test_create_uses_default_password() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateAccounts").json_body(json!({
                    "accounts": [{"id": "E9", "roles": [7], "password": "E9"}]
                }));
                then.status(200);
            })
            .await;

        AccountService::new(client(&server), 0)
            .create(
                &principal(),
                CreateAccountRequest {
                    employee_id: "E9".into(),
                    roles: vec![Role::Operator],
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_change_password_targets_caller() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/UpdateAccount").json_body(json!({
                    "user_id": USER,
                    "roles": [],
                    "change_password": {"new_password": "new", "old_password": "old"},
                    "reset_password": false
                }));
                then.status(200);
            })
            .await;

        AccountService::new(client(&server), 0)
            .change_password(
                &principal(),
                ChangePasswordRequest {
                    current_password: "old".into(),
                    new_password: "new".into(),
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
