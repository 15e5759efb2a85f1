/// PATCH /items/{id} Lambdaエントリポイント
///
/// 既存アイテムの属性を部分更新する。
use items::application::UpdateOneHandler;
use items::infrastructure::{DynamoDbConfig, DynamoItemRepository, init_logging};
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントはコールドスタート時に1回だけ作成し、以降の呼び出しで共有する
    let config = DynamoDbConfig::from_env().await?;
    let handler = UpdateOneHandler::new(DynamoItemRepository::from_config(&config));

    info!(table_name = config.table_name(), "update_one Lambda関数を初期化");

    run(service_fn(|request: Request| handle(&handler, request))).await
}

async fn handle(
    handler: &UpdateOneHandler<DynamoItemRepository>,
    request: Request,
) -> Result<Response<Body>, Error> {
    Ok(handler.handle(&request).await)
}
