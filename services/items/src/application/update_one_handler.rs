/// PATCH /items/{id} ハンドラー
///
/// パッチに含まれる属性だけを上書きし、それ以外の属性は保持する。
/// 対象アイテムが存在しない場合は404（upsertはしない）。
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::Value;
use tracing::info;

use super::api_error::ApiError;
use super::http_response::json_response;
use super::request::{json_object_body, path_item_id};
use crate::domain::{Item, ItemPatch};
use crate::infrastructure::ItemRepository;

pub struct UpdateOneHandler<R>
where
    R: ItemRepository,
{
    repository: R,
}

impl<R> UpdateOneHandler<R>
where
    R: ItemRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        match self.update_one(request).await {
            Ok(item) => {
                let document = item.to_document(self.repository.partition_key());
                json_response(StatusCode::OK, &Value::Object(document))
            }
            Err(err) => {
                err.log("update_one");
                err.into_response()
            }
        }
    }

    async fn update_one(&self, request: &Request) -> Result<Item, ApiError> {
        let id = path_item_id(request)?;
        let document = json_object_body(request)?;
        let patch = ItemPatch::from_document(document, self.repository.partition_key(), &id)?;

        match self.repository.update(&id, &patch).await? {
            Some(item) => {
                info!(item_id = %id, attribute_count = patch.len(), "アイテム更新");
                Ok(item)
            }
            None => Err(ApiError::not_found(format!("Item not found: {id}"))),
        }
    }
}
