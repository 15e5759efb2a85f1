/// DELETE /items/{id} ハンドラー
///
/// 冪等: 存在しないIDの削除も200を返す。
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use tracing::info;

use super::api_error::ApiError;
use super::http_response::empty_response;
use super::request::path_item_id;
use crate::infrastructure::ItemRepository;

pub struct DeleteOneHandler<R>
where
    R: ItemRepository,
{
    repository: R,
}

impl<R> DeleteOneHandler<R>
where
    R: ItemRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        match self.delete_one(request).await {
            Ok(()) => empty_response(StatusCode::OK),
            Err(err) => {
                err.log("delete_one");
                err.into_response()
            }
        }
    }

    async fn delete_one(&self, request: &Request) -> Result<(), ApiError> {
        let id = path_item_id(request)?;
        self.repository.delete(&id).await?;
        info!(item_id = %id, "アイテム削除");
        Ok(())
    }
}
