/// POST /items Lambdaエントリポイント
///
/// リクエストボディのJSONオブジェクトを新しいアイテムとして保存する。
use items::application::CreateOneHandler;
use items::infrastructure::{DynamoDbConfig, DynamoItemRepository, init_logging};
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントはコールドスタート時に1回だけ作成し、以降の呼び出しで共有する
    let config = DynamoDbConfig::from_env().await?;
    let handler = CreateOneHandler::new(DynamoItemRepository::from_config(&config));

    info!(table_name = config.table_name(), "create_one Lambda関数を初期化");

    run(service_fn(|request: Request| handle(&handler, request))).await
}

async fn handle(
    handler: &CreateOneHandler<DynamoItemRepository>,
    request: Request,
) -> Result<Response<Body>, Error> {
    Ok(handler.handle(&request).await)
}
