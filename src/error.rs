//! Handler error type and its JSON rendering.

use std::io;
use std::path::PathBuf;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::grid::GridError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Grid(#[from] GridError),

    #[error("Front page not found: {}", .0.display())]
    FrontPageMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Grid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FrontPageMissing(_) => StatusCode::NOT_FOUND,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Grid(_) => self.to_string(),
            AppError::FrontPageMissing(path) => {
                tracing::warn!(path = %path.display(), "Front page missing from static directory");
                "Not Found".to_string()
            }
            AppError::Io(_) => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
            AppError::Json(_) => {
                tracing::debug!(status = status.as_u16(), detail = %self, "Rejected request body");
                self.to_string()
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::{FromRequest, Request};
    use axum::http::header;

    use crate::routes::extract::AppJson;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        value: String,
    }

    async fn reject(content_type: &str, body: &'static str) -> AppError {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        AppJson::<Payload>::from_request(req, &()).await.unwrap_err()
    }

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_grid_error_is_unprocessable_with_message() {
        let (status, body) = render(AppError::Grid(GridError::MissingNumber)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "No numeric centre value found");
    }

    #[tokio::test]
    async fn test_missing_front_page_is_not_found() {
        let (status, body) =
            render(AppError::FrontPageMissing(PathBuf::from("/secret/static/index.html"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_io_error_hides_details() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "/etc/shadow");
        let (status, body) = render(AppError::Io(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn test_missing_field_rejection_is_json() {
        let (status, body) = render(reject("application/json", r#"{"other": 1}"#).await).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("missing field `value`"));
    }

    #[tokio::test]
    async fn test_syntax_error_rejection_is_json() {
        let (status, body) = render(reject("application/json", "{not json").await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_content_type_rejection_is_json() {
        let (status, body) = render(reject("text/plain", r#"{"value": "1"}"#).await).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["detail"].is_string());
    }
}
