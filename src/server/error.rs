//! Error-to-HTTP response conversion.
//!
//! Every pipeline failure is answered with 500 and a JSON body carrying the
//! message, a machine-readable code, the cause chain and the request id.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: hls_edge_common::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: hls_edge_common::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: Option<String>) -> Self {
        self.request_id = id;
        self
    }
}

impl From<hls_edge_common::Error> for AppError {
    fn from(e: hls_edge_common::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let causes = self.inner.causes();

        tracing::error!(
            status = %status,
            code = self.inner.code(),
            error = %self.inner,
            causes = ?causes,
            "Request failed"
        );

        let body = json!({
            "error": self.inner.to_string(),
            "code": self.inner.code(),
            "causes": causes,
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn parse_error_produces_500() {
        let err = AppError::new(hls_edge_common::Error::parse("missing URI"))
            .with_request_id(Some("req-123".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "parse_error");
        assert_eq!(body["error"], "Malformed playlist: missing URI");
        assert_eq!(body["causes"][0], "missing URI");
        assert_eq!(body["request_id"], "req-123");
    }

    #[tokio::test]
    async fn runtime_error_has_no_causes() {
        let response = AppError::new(hls_edge_common::Error::runtime("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "runtime_error");
        assert_eq!(body["causes"], serde_json::json!([]));
        assert!(body["request_id"].is_null());
    }
}
