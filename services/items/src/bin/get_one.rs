/// GET /items/{id} Lambdaエントリポイント
///
/// 指定IDのアイテムを1件返す。存在しなければ404。
use items::application::GetOneHandler;
use items::infrastructure::{DynamoDbConfig, DynamoItemRepository, init_logging};
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントはコールドスタート時に1回だけ作成し、以降の呼び出しで共有する
    let config = DynamoDbConfig::from_env().await?;
    let handler = GetOneHandler::new(DynamoItemRepository::from_config(&config));

    info!(table_name = config.table_name(), "get_one Lambda関数を初期化");

    run(service_fn(|request: Request| handle(&handler, request))).await
}

async fn handle(
    handler: &GetOneHandler<DynamoItemRepository>,
    request: Request,
) -> Result<Response<Body>, Error> {
    Ok(handler.handle(&request).await)
}
