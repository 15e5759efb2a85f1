// DynamoDB Streamsレコードのデコード
//
// aws_lambda_eventsのEventRecordを、JSONイメージを持つChangeRecordに変換する。
// 空のイメージ（INSERTのOldImage、REMOVEのNewImage）は「存在しない」として扱う。

use aws_lambda_events::event::dynamodb::EventRecord;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::domain::{ChangeKind, ChangeRecord};

/// ストリームレコードのデコードエラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StreamRecordError {
    /// INSERT/MODIFY/REMOVE以外のeventName
    #[error("Unknown event name: {0}")]
    UnknownEventName(String),

    /// イメージをJSONに変換できない
    #[error("Failed to decode {image}: {message}")]
    ImageDecode {
        image: &'static str,
        message: String,
    },
}

/// デコード済みのストリームレコード（配信メタデータ付き）
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStreamRecord {
    /// ストリームイベントID（重複配信の識別に使う）
    pub event_id: String,
    /// シャード内のシーケンス番号
    pub sequence_number: Option<String>,
    /// ストリームへの書き込み時刻（概算）
    pub approximate_creation_time: DateTime<Utc>,
    pub change: ChangeRecord,
}

impl DecodedStreamRecord {
    /// ログ出力用の構造化表現
    pub fn to_log_value(&self) -> Value {
        let mut value = self.change.to_log_value();
        if let Value::Object(map) = &mut value {
            map.insert("eventId".to_string(), json!(self.event_id));
            map.insert("sequenceNumber".to_string(), json!(self.sequence_number));
            map.insert(
                "approximateCreationTime".to_string(),
                json!(self.approximate_creation_time.to_rfc3339()),
            );
        }
        value
    }
}

/// EventRecordをデコード
pub fn decode_stream_record(
    record: &EventRecord,
) -> Result<DecodedStreamRecord, StreamRecordError> {
    let kind = ChangeKind::from_event_name(&record.event_name)
        .ok_or_else(|| StreamRecordError::UnknownEventName(record.event_name.clone()))?;

    let keys = decode_image(&record.change.keys, "Keys")?.unwrap_or_default();
    let old_image = decode_image(&record.change.old_image, "OldImage")?;
    let new_image = decode_image(&record.change.new_image, "NewImage")?;

    Ok(DecodedStreamRecord {
        event_id: record.event_id.clone(),
        sequence_number: record.change.sequence_number.clone(),
        approximate_creation_time: record.change.approximate_creation_date_time,
        change: ChangeRecord {
            kind,
            keys,
            old_image,
            new_image,
        },
    })
}

/// 属性値のイメージをJSONオブジェクトに変換（空なら`None`）
fn decode_image(
    image: &serde_dynamo::Item,
    name: &'static str,
) -> Result<Option<Map<String, Value>>, StreamRecordError> {
    if image.is_empty() {
        return Ok(None);
    }

    serde_dynamo::from_item(image.clone())
        .map(Some)
        .map_err(|e| StreamRecordError::ImageDecode {
            image: name,
            message: e.to_string(),
        })
}
