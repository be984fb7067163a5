//! Outbound calls to the MES: agent notifications and the resource API.

pub mod models;

use std::time::Duration;

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use models::*;

/// Deadline of one agent notification, independent of the request deadline.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MesError {
    #[error("mes error")]
    Status(reqwest::StatusCode),
    #[error("mes request failed: {0}")]
    Transport(String),
}

/// Identity headers attached to MES resource API calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MesHeader {
    pub user_id: String,
    pub station: String,
    pub site: String,
    pub pid: String,
}

#[derive(Clone)]
pub struct MesClient {
    http: reqwest::Client,
}

impl MesClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, MesError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| MesError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Posts the notification in the background. The caller's response never waits
    /// on the agent; failures are only logged.
    pub fn notify_detached<T: Serialize + 'static>(&self, url: &str, body: T) {
        let client = self.clone();
        let url = url.to_string();
        actix_web::rt::spawn(async move {
            if let Err(e) = client.notify(&url, &body).await {
                error!("failed to send the request to MES Agent: {}", e);
            }
        });
    }

    /// Posts an agent notification.
    pub async fn notify<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<(), MesError> {
        debug!("Notifying MES agent at {}", url);
        let response = self
            .http
            .post(url)
            .timeout(NOTIFY_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| MesError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(MesError::Status(response.status()));
        }
        Ok(())
    }

    pub async fn send<T, R>(&self, url: &str, header: &MesHeader, body: &T) -> Result<R, MesError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("Sending MES request to {} for station {}", url, header.station);
        let response = self
            .http
            .post(url)
            .header("user-id", &header.user_id)
            .header("station", &header.station)
            .header("site", &header.site)
            .header("pid", &header.pid)
            .json(body)
            .send()
            .await
            .map_err(|e| MesError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(MesError::Status(response.status()));
        }
        response
            .json::<R>()
            .await
            .map_err(|e| MesError::Transport(format!("decode reply: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client() -> MesClient {
        MesClient::new(None).unwrap()
    }

    #[actix_web::test]
    async fn test_notify_posts_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/closed")
                    .json_body(json!({"workOrderID": "W1"}));
                then.status(200);
            })
            .await;

        let body = NotifyWorkOrderClosed {
            work_order_id: "W1".into(),
        };
        client().notify(&server.url("/closed"), &body).await.unwrap();
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_notify_reports_failure_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bind");
                then.status(503);
            })
            .await;

        let err = client()
            .notify(&server.url("/bind"), &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, MesError::Status(_)));
    }

    #[actix_web::test]
    async fn test_send_carries_headers_and_decodes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/mes/api/v2/resource/feed")
                    .header("user-id", "u1")
                    .header("station", "S1")
                    .header("site", "")
                    .header("pid", "rid-1");
                then.status(200)
                    .json_body(json!({"enforceable": true, "enforceDone": false}));
            })
            .await;

        let header = MesHeader {
            user_id: "u1".into(),
            station: "S1".into(),
            site: String::new(),
            pid: "rid-1".into(),
        };
        let reply: ResourceFeedReply = client()
            .send(&server.url("/mes/api/v2/resource/feed"), &header, &json!({}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(reply.enforceable);
        assert!(reply.results.is_none());
    }

    #[actix_web::test]
    async fn test_send_non_success_is_mes_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/collect");
                then.status(500);
            })
            .await;

        let err = client()
            .send::<_, CollectReply>(&server.url("/collect"), &MesHeader::default(), &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "mes error");
    }
}
