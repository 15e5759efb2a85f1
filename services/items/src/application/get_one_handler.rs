/// GET /items/{id} ハンドラー
///
/// キー完全一致でアイテムを1件取得する。
/// 存在しない場合はエラーにせず、空ボディの200を返す（アイテムを合成することはない）。
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::Value;
use tracing::info;

use super::api_error::ApiError;
use super::http_response::{empty_response, json_response};
use super::request::path_item_id;
use crate::domain::Item;
use crate::infrastructure::ItemRepository;

pub struct GetOneHandler<R>
where
    R: ItemRepository,
{
    repository: R,
}

impl<R> GetOneHandler<R>
where
    R: ItemRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// リクエストを処理してレスポンスを生成
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        match self.get_one(request).await {
            Ok(Some(item)) => {
                let document = item.to_document(self.repository.partition_key());
                json_response(StatusCode::OK, &Value::Object(document))
            }
            Ok(None) => empty_response(StatusCode::OK),
            Err(err) => {
                err.log("get_one");
                err.into_response()
            }
        }
    }

    async fn get_one(&self, request: &Request) -> Result<Option<Item>, ApiError> {
        let id = path_item_id(request)?;
        let item = self.repository.get(&id).await?;

        info!(item_id = %id, found = item.is_some(), "アイテム取得");

        Ok(item)
    }
}
