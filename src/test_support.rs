//! Helpers shared by handler and service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{web, Error};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use crate::constants::AUTH_KEY_HEADER;
use crate::mcom::{CallContext, DataManager, McomClient};
use crate::permissions::PermissionTable;

pub const TOKEN: &str = "test-token";
pub const USER: &str = "tester";

pub fn ctx() -> CallContext {
    CallContext::user(USER)
}

pub fn client(server: &MockServer) -> Arc<dyn DataManager> {
    Arc::new(McomClient::new(&server.base_url(), None).unwrap())
}

pub fn dm_data(server: &MockServer) -> web::Data<dyn DataManager> {
    web::Data::from(client(server))
}

/// A table granting every listed function to ADMINISTRATOR.
pub fn permissions(functions: &[&str]) -> web::Data<PermissionTable> {
    let config: HashMap<String, Vec<String>> = functions
        .iter()
        .map(|f| (f.to_string(), vec!["ADMINISTRATOR".to_string()]))
        .collect();
    web::Data::new(PermissionTable::from_config(&config).unwrap())
}

/// Accepts [`TOKEN`] as a valid ADMINISTRATOR token of [`USER`].
pub async fn mock_login(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/GetTokenInfo");
            then.status(200).json_body(json!({
                "user": USER,
                "valid": true,
                "expiry_time": "2999-01-01T00:00:00Z",
                "roles": [1]
            }));
        })
        .await;
}

pub fn auth_header() -> (&'static str, &'static str) {
    (AUTH_KEY_HEADER, TOKEN)
}

/// Status and JSON body of a service call, rendering middleware errors the way the
/// server does.
pub async fn into_json<B: MessageBody + 'static>(
    result: Result<ServiceResponse<B>, Error>,
) -> (StatusCode, Value) {
    let response = match result {
        Ok(resp) => resp.into_parts().1.map_into_boxed_body(),
        Err(err) => err.error_response(),
    };
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.ok().unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Waits for calls made from a background task, then asserts their count.
pub async fn wait_for_hits(mock: &Mock<'_>, expected: usize) {
    for _ in 0..300 {
        if mock.hits_async().await >= expected {
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(10)).await;
    }
    mock.assert_hits_async(expected).await;
}
