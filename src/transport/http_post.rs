//! JSON POST to the relay endpoint

use super::{MailSender, TransportError};
use crate::state::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Upper bound on a single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts the payload as JSON to a configured endpoint
pub struct HttpPostSender {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPostSender {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl MailSender for HttpPostSender {
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Endpoint {} answered {status}", self.endpoint);
            return Err(TransportError::RequestFailed(status));
        }

        // The body only has to be JSON; its content is not inspected
        response
            .json::<serde_json::Value>()
            .await
            .map_err(TransportError::InvalidResponse)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: String::new(),
            inquiry_type: "General".to_string(),
            message: "Hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_json_with_content_type() {
        let router = Router::new().route(
            "/sendmail",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let is_json = headers
                    .get(header::CONTENT_TYPE)
                    .is_some_and(|v| v == "application/json");
                if is_json && body["inquiryType"] == "General" && body["name"] == "Jo" {
                    (StatusCode::OK, Json(json!({"success": true})))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected"})))
                }
            }),
        );
        let base = serve(router).await;
        let sender = HttpPostSender::new(&format!("{base}/sendmail")).unwrap();

        sender.send(&payload()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let router = Router::new().route(
            "/sendmail",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Field 'message' is required"})),
                )
            }),
        );
        let base = serve(router).await;
        let sender = HttpPostSender::new(&format!("{base}/sendmail")).unwrap();

        let err = sender.send(&payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::RequestFailed(s) if s == 400));
        assert_eq!(err.to_string(), "request failed");
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let router = Router::new().route(
            "/sendmail",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await;
        let sender = HttpPostSender::new(&format!("{base}/sendmail")).unwrap();

        let err = sender.send(&payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::RequestFailed(s) if s == 500));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_failure() {
        let router = Router::new().route("/sendmail", post(|| async { "OK" }));
        let base = serve(router).await;
        let sender = HttpPostSender::new(&format!("{base}/sendmail")).unwrap();

        let err = sender.send(&payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let sender = HttpPostSender::new(&format!("http://{addr}/sendmail")).unwrap();

        let err = sender.send(&payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
