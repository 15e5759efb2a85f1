// API Gatewayリクエストの解析
//
// パスパラメータ`{id}`とJSONオブジェクトのボディを取り出す。

use lambda_http::{Body, Request, RequestExt};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{ItemId, into_object};

/// アイテムIDのパスパラメータ名
pub const ID_PATH_PARAMETER: &str = "id";

/// リクエスト解析エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    #[error("Missing request body")]
    MissingBody,

    #[error("Request body is not valid UTF-8")]
    InvalidEncoding,

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,
}

/// パスパラメータからアイテムIDを取得（空文字列も欠落として扱う）
pub fn path_item_id(request: &Request) -> Result<ItemId, RequestError> {
    request
        .path_parameters()
        .first(ID_PATH_PARAMETER)
        .and_then(|value| ItemId::new(value).ok())
        .ok_or(RequestError::MissingPathParameter(ID_PATH_PARAMETER))
}

/// ボディをJSONオブジェクトとして解析
pub fn json_object_body(request: &Request) -> Result<Map<String, Value>, RequestError> {
    let text = match request.body() {
        Body::Empty => return Err(RequestError::MissingBody),
        Body::Text(text) => text.as_str(),
        Body::Binary(bytes) => {
            std::str::from_utf8(bytes).map_err(|_| RequestError::InvalidEncoding)?
        }
        _ => return Err(RequestError::MissingBody),
    };

    if text.trim().is_empty() {
        return Err(RequestError::MissingBody);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| RequestError::InvalidJson(e.to_string()))?;
    into_object(value).map_err(|_| RequestError::NotAnObject)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;
    use std::collections::HashMap;

    /// テスト用リクエストを作成
    pub fn request(method: &str, id: Option<&str>, body: Option<&str>) -> Request {
        let uri = match id {
            Some(id) => format!("/items/{id}"),
            None => "/items".to_string(),
        };
        let body = match body {
            Some(text) => Body::Text(text.to_string()),
            None => Body::Empty,
        };
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap();

        match id {
            Some(id) => request.with_path_parameters(HashMap::from([(
                ID_PATH_PARAMETER.to_string(),
                id.to_string(),
            )])),
            None => request,
        }
    }

    #[test]
    fn test_path_item_id() {
        let request = request("GET", Some("i-1"), None);
        assert_eq!(path_item_id(&request).unwrap().as_str(), "i-1");
    }

    #[test]
    fn test_path_item_id_missing() {
        let request = request("GET", None, None);
        assert_eq!(
            path_item_id(&request),
            Err(RequestError::MissingPathParameter("id"))
        );
    }

    #[test]
    fn test_path_item_id_empty() {
        let request = request("GET", Some(""), None);
        assert_eq!(
            path_item_id(&request),
            Err(RequestError::MissingPathParameter("id"))
        );
    }

    #[test]
    fn test_json_object_body() {
        let request = request("POST", None, Some(r#"{"name": "pen"}"#));
        let body = json_object_body(&request).unwrap();
        assert_eq!(body["name"], "pen");
    }

    #[test]
    fn test_json_object_body_binary() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/items")
            .body(Body::Binary(br#"{"name": "pen"}"#.to_vec()))
            .unwrap();

        assert_eq!(json_object_body(&request).unwrap()["name"], "pen");
    }

    #[test]
    fn test_json_object_body_errors() {
        assert_eq!(
            json_object_body(&request("POST", None, None)),
            Err(RequestError::MissingBody)
        );
        assert_eq!(
            json_object_body(&request("POST", None, Some("  "))),
            Err(RequestError::MissingBody)
        );
        assert!(matches!(
            json_object_body(&request("POST", None, Some("{not json"))),
            Err(RequestError::InvalidJson(_))
        ));
        assert_eq!(
            json_object_body(&request("POST", None, Some("[1, 2]"))),
            Err(RequestError::NotAnObject)
        );
    }
}
