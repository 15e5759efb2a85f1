/// DynamoDB Streams変更ロガー Lambdaエントリポイント
///
/// テーブルのストリーム（NEW_AND_OLD_IMAGES）を受け取り、各レコードを構造化ログに出力する。
/// デコードできないレコードはスキップするだけなので、バッチを失敗させることはない。
use aws_lambda_events::event::dynamodb::Event;
use items::application::ChangeFeedHandler;
use items::infrastructure::init_logging;
use lambda_runtime::{Error, LambdaEvent, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

async fn handler(event: LambdaEvent<Event>) -> Result<(), Error> {
    ChangeFeedHandler::new().process_event(&event.payload);
    Ok(())
}
