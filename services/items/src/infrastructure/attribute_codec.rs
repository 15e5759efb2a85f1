// JSONドキュメントとDynamoDB属性値の相互変換
//
// serde_dynamoでJSONの値をDynamoDBネイティブの型（S/N/BOOL/NULL/L/M）として保存する。
// N型は整数と小数を区別しないので、小数部が0の数値は整数として読み戻される。
// 部分更新用のUpdateExpressionもここで組み立てる。

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{ItemPatch, PartitionKey};

/// DynamoDB SDKのアイテム表現
pub type DynamoItem = HashMap<String, AttributeValue>;

/// 変換エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("Failed to encode attributes: {0}")]
    Encode(String),

    #[error("Failed to decode attributes: {0}")]
    Decode(String),
}

/// JSONドキュメントをDynamoDBアイテムに変換
pub fn encode_document(document: &Map<String, Value>) -> Result<DynamoItem, CodecError> {
    serde_dynamo::to_item(document).map_err(|e| CodecError::Encode(e.to_string()))
}

/// DynamoDBアイテムをJSONドキュメントに変換
pub fn decode_document(item: DynamoItem) -> Result<Map<String, Value>, CodecError> {
    serde_dynamo::from_item(item).map_err(|e| CodecError::Decode(e.to_string()))
}

/// 単一のJSON値をDynamoDB属性値に変換
pub fn encode_value(value: &Value) -> Result<AttributeValue, CodecError> {
    serde_dynamo::to_attribute_value(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// 条件付き部分更新のパラメータ
#[derive(Debug, Clone, PartialEq)]
pub struct PatchUpdate {
    /// `SET #a0 = :v0, #a1 = :v1, ...`
    pub update_expression: String,
    /// 既存アイテムが存在する場合のみ更新する条件
    pub condition_expression: String,
    pub attribute_names: HashMap<String, String>,
    pub attribute_values: DynamoItem,
}

/// キー属性のプレースホルダー
const KEY_NAME_PLACEHOLDER: &str = "#pk";

/// パッチからUpdateItemのパラメータを組み立てる
///
/// 属性名は予約語と衝突しないよう全てプレースホルダーに置き換える。
pub fn build_patch_update(
    patch: &ItemPatch,
    key: &PartitionKey,
) -> Result<PatchUpdate, CodecError> {
    let mut assignments = Vec::with_capacity(patch.len());
    let mut attribute_names = HashMap::new();
    let mut attribute_values = HashMap::new();

    attribute_names.insert(KEY_NAME_PLACEHOLDER.to_string(), key.name().to_string());

    for (index, (name, value)) in patch.attributes().iter().enumerate() {
        let name_placeholder = format!("#a{index}");
        let value_placeholder = format!(":v{index}");

        assignments.push(format!("{name_placeholder} = {value_placeholder}"));
        attribute_names.insert(name_placeholder, name.clone());
        attribute_values.insert(value_placeholder, encode_value(value)?);
    }

    Ok(PatchUpdate {
        update_expression: format!("SET {}", assignments.join(", ")),
        condition_expression: format!("attribute_exists({KEY_NAME_PLACEHOLDER})"),
        attribute_names,
        attribute_values,
    })
}
