/// 変更フィード（DynamoDB Streams）ロガー
///
/// バッチ内の各レコードを構造化ログとして1行ずつ出力する。
/// 副作用はログ出力だけなので、重複配信されても`event_id`で識別できる。
///
/// JSONに変換できないレコード（未知のeventName、バイナリ属性を含むイメージ等）は、
/// ストリームから届いた形のままwarnで出力する。
/// 再配信しても同じ結果になり、シャードの処理が止まるだけなのでバッチは失敗させない。
use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use tracing::{info, warn};

use crate::infrastructure::{StreamRecordError, decode_stream_record};

/// バッチ処理の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFeedResult {
    /// JSONイメージに変換して出力したレコード数
    pub logged_count: usize,
    /// 変換できず、受信した形のまま出力したレコード数
    pub raw_logged_count: usize,
    /// 出力できなかったレコード数
    pub skipped_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeFeedHandler;

impl ChangeFeedHandler {
    pub fn new() -> Self {
        Self
    }

    /// ストリームイベント（1バッチ）を処理
    pub fn process_event(&self, event: &Event) -> ChangeFeedResult {
        info!(
            record_count = event.records.len(),
            "DynamoDB Streamsイベントを受信"
        );

        let mut result = ChangeFeedResult::default();

        for record in &event.records {
            match decode_stream_record(record) {
                Ok(decoded) => {
                    info!(
                        event_id = %decoded.event_id,
                        sequence_number = decoded.sequence_number.as_deref().unwrap_or(""),
                        kind = %decoded.change.kind,
                        record = %decoded.to_log_value(),
                        "ストリームレコード"
                    );
                    result.logged_count += 1;
                }
                Err(err) => self.log_raw_record(record, &err, &mut result),
            }
        }

        info!(
            logged_count = result.logged_count,
            raw_logged_count = result.raw_logged_count,
            skipped_count = result.skipped_count,
            "DynamoDB Streamsイベント処理完了"
        );

        result
    }

    fn log_raw_record(
        &self,
        record: &EventRecord,
        error: &StreamRecordError,
        result: &mut ChangeFeedResult,
    ) {
        match serde_json::to_value(record) {
            Ok(raw) => {
                warn!(
                    event_id = %record.event_id,
                    event_name = %record.event_name,
                    error = %error,
                    record = %raw,
                    "ストリームレコード（未変換）"
                );
                result.raw_logged_count += 1;
            }
            Err(serialize_error) => {
                warn!(
                    event_id = %record.event_id,
                    event_name = %record.event_name,
                    error = %error,
                    serialize_error = %serialize_error,
                    "ストリームレコードをスキップ"
                );
                result.skipped_count += 1;
            }
        }
    }
}
