//! APIエラーハンドリング
//!
//! すべてのエラーはJSON形式 `{"error": ..., "message": ...}` で返却する。
//! ストアのエラーメッセージは加工せずにそのまま`message`へ入れる。

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::http_response::json_response;
use super::request::RequestError;
use crate::domain::ItemError;
use crate::infrastructure::RepositoryError;

/// APIエラーレスポンスのボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// エラー種別（"bad_request", "not_found", "internal_error"）
    pub error: String,
    /// 詳細なエラーメッセージ
    pub message: String,
}

/// APIエラー（ステータスコード + JSONボディ）
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                message: message.into(),
            },
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// 500 Internal Server Error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &str {
        &self.body.error
    }

    pub fn message(&self) -> &str {
        &self.body.message
    }

    /// エラーをログに記録（5xxはerror、4xxはwarn）
    pub fn log(&self, operation: &str) {
        if self.status.is_server_error() {
            error!(
                operation = operation,
                status = self.status.as_u16(),
                error = %self.body.message,
                "ストア呼び出しに失敗"
            );
        } else {
            warn!(
                operation = operation,
                status = self.status.as_u16(),
                error = %self.body.message,
                "リクエストを処理できません"
            );
        }
    }

    /// HTTPレスポンスに変換
    pub fn into_response(self) -> Response<Body> {
        let body = serde_json::json!({
            "error": self.body.error,
            "message": self.body.message,
        });
        json_response(self.status, &body)
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::internal_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::http_response::tests::body_json;

    #[test]
    fn test_api_error_constructors() {
        let error = ApiError::bad_request("不正なリクエスト");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error(), "bad_request");
        assert_eq!(error.message(), "不正なリクエスト");

        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal_error("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_is_internal_with_raw_message() {
        let error: ApiError =
            RepositoryError::ReadError("ResourceNotFoundException: no table".to_string()).into();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error(), "internal_error");
        assert_eq!(
            error.message(),
            "Read error: ResourceNotFoundException: no table"
        );
    }

    #[test]
    fn test_item_error_is_bad_request() {
        let error: ApiError = ItemError::EmptyPatch.into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Patch must contain at least one attribute");
    }

    #[test]
    fn test_into_response() {
        let response = ApiError::not_found("Item not found: i-1").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ApiErrorBody = serde_json::from_value(body_json(&response)).unwrap();
        assert_eq!(
            body,
            ApiErrorBody {
                error: "not_found".to_string(),
                message: "Item not found: i-1".to_string(),
            }
        );
    }
}
