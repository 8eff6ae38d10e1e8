use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::remote::protocol::BackendCommand;

/// Transport to the chat backend.
///
/// Implementations only move JSON; envelope checks and typing happen in
/// [`call`](#method.call).
#[async_trait]
pub trait Backend: Send + Sync {
    async fn post(&self, path: &str, body: Value) -> BackendResult<Value>;
}

impl dyn Backend {
    /// Call a typed backend endpoint and return its decoded response.
    ///
    /// A body with `"success": false` is turned into `BackendError::Rejected`.
    pub async fn call<C: BackendCommand>(&self, cmd: &C) -> BackendResult<C::Response> {
        let path = C::path();
        let body = serde_json::to_value(cmd).map_err(|source| BackendError::Encode {
            path: path.to_string(),
            source,
        })?;

        let response = check_envelope(path, self.post(path, body).await?)?;

        serde_json::from_value(response).map_err(|e| BackendError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn check_envelope(path: &str, body: Value) -> BackendResult<Value> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("request was not successful")
            .to_string();

        return Err(BackendError::Rejected {
            path: path.to_string(),
            message,
        });
    }

    Ok(body)
}

/// HTTP client for the chat backend.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| BackendError::Transport {
                path: base_url.to_string(),
                source,
            })?;

        Ok(HttpBackend {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn post(&self, path: &str, body: Value) -> BackendResult<Value> {
        debug!(path, "POST to backend");

        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| BackendError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::remote::protocol::{ListEvents, RefreshToken};

    fn backend_for(server: &mockito::Server) -> Arc<dyn Backend> {
        Arc::new(HttpBackend::new(&server.url(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_call_decodes_success_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/refresh")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "refresh_token": "r-1" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "access_token": "a-2"}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let response = backend
            .call(&RefreshToken {
                refresh_token: "r-1".into(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.access_token, "a-2");
        assert_eq!(response.refresh_token, None);
    }

    #[tokio::test]
    async fn test_success_false_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "error": "invalid_grant"}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let result = backend
            .call(&ListEvents {
                access_token: "a".into(),
                time_min: "2025-03-01T00:00:00Z".into(),
                time_max: "2025-03-31T23:59:59Z".into(),
            })
            .await;

        match result {
            Err(BackendError::Rejected { message, .. }) => assert_eq!(message, "invalid_grant"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/refresh")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let backend = backend_for(&server);
        let result = backend
            .call(&RefreshToken {
                refresh_token: "r-1".into(),
            })
            .await;

        assert!(matches!(
            result,
            Err(BackendError::Status { status: 401, .. })
        ));
    }
}
