/// ログ基盤モジュール
///
/// Lambda（CloudWatch Logs）向けにJSON形式の構造化ログを出力する。
use std::sync::Once;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// 既定のログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

static INIT: Once = Once::new();

/// `RUST_LOG`からフィルターを作成（未設定・不正値なら既定レベル）
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// CloudWatch向けのJSONレイヤー（イベントのフィールドをトップレベルに展開）
fn json_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(make_writer)
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 各イベントのフィールドをトップレベルに展開したJSONを1行ずつ標準出力に書く。
/// 複数回呼び出しても最初の1回だけが有効。
///
/// ```ignore
/// use items::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!(item_id = "i-1", "アイテム取得");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(env_filter(DEFAULT_LOG_LEVEL))
            .with(json_layer(std::io::stdout))
            .init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter("debug"))
            .with(fmt_layer)
            .try_init();
    });
}
