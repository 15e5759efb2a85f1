// CORSプリフライト（OPTIONS /items, OPTIONS /items/{id}）ハンドラー
//
// 固定のCORSヘッダーを付けた空の200レスポンスを返す。

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};

use super::http_response::preflight_headers;

#[derive(Debug, Clone, Copy, Default)]
pub struct PreflightHandler;

impl PreflightHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self) -> Response<Body> {
        let mut response = Response::new(Body::Empty);
        *response.status_mut() = StatusCode::OK;
        *response.headers_mut() = preflight_headers();
        response
    }
}
