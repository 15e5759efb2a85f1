/// GET /items ハンドラー
///
/// テーブル全体をスキャンして全アイテムを配列で返す。
/// ページング・フィルタ・並び順の保証はない。
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::Value;
use tracing::info;

use super::api_error::ApiError;
use super::http_response::json_response;
use crate::infrastructure::ItemRepository;

pub struct GetAllHandler<R>
where
    R: ItemRepository,
{
    repository: R,
}

impl<R> GetAllHandler<R>
where
    R: ItemRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// 全件取得してレスポンスを生成（リクエスト内容は使わない）
    pub async fn handle(&self) -> Response<Body> {
        match self.get_all().await {
            Ok(documents) => json_response(StatusCode::OK, &Value::Array(documents)),
            Err(err) => {
                err.log("get_all");
                err.into_response()
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Value>, ApiError> {
        let items = self.repository.scan_all().await?;
        info!(item_count = items.len(), "全アイテム取得");

        let key = self.repository.partition_key();
        Ok(items
            .iter()
            .map(|item| Value::Object(item.to_document(key)))
            .collect())
    }
}
