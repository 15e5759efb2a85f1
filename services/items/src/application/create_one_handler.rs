/// POST /items ハンドラー
///
/// # 処理フロー
/// 1. ボディをJSONオブジェクトとして解析
/// 2. パーティションキーが無ければUUIDを生成
/// 3. 無条件に保存（同じキーのアイテムは上書き）
/// 4. 保存したアイテムを201で返却
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::Value;
use tracing::info;

use super::api_error::ApiError;
use super::http_response::json_response;
use super::request::json_object_body;
use crate::domain::Item;
use crate::infrastructure::ItemRepository;

pub struct CreateOneHandler<R>
where
    R: ItemRepository,
{
    repository: R,
}

impl<R> CreateOneHandler<R>
where
    R: ItemRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        match self.create_one(request).await {
            Ok(item) => {
                let document = item.to_document(self.repository.partition_key());
                json_response(StatusCode::CREATED, &Value::Object(document))
            }
            Err(err) => {
                err.log("create_one");
                err.into_response()
            }
        }
    }

    async fn create_one(&self, request: &Request) -> Result<Item, ApiError> {
        let document = json_object_body(request)?;
        let item = Item::from_new_document(document, self.repository.partition_key())?;

        // 数値の正規化後の形を返し、以後のGETと同じ表現にする
        let stored = self.repository.put(&item).await?;

        info!(
            item_id = %stored.id(),
            attribute_count = stored.attributes().len(),
            "アイテム作成"
        );

        Ok(stored)
    }
}
