/// CORSプリフライト Lambdaエントリポイント
///
/// OPTIONS /items と OPTIONS /items/{id} に固定のCORSヘッダーを返す。
/// ストアにはアクセスしないので環境変数は不要。
use items::application::PreflightHandler;
use items::infrastructure::init_logging;
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    run(service_fn(handler)).await
}

async fn handler(request: Request) -> Result<Response<Body>, Error> {
    debug!(path = request.uri().path(), "プリフライトリクエスト受信");
    Ok(PreflightHandler::new().handle())
}
