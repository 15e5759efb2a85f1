/// アイテムの部分更新
///
/// パッチに含まれる属性だけを上書きし、含まれない属性は保持する。
use serde_json::{Map, Value};

use super::item::{ItemError, ItemId, PartitionKey};

/// 既存アイテムに適用する属性マップ（1属性以上）
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPatch {
    attributes: Map<String, Value>,
}

impl ItemPatch {
    /// 更新リクエストのドキュメントからパッチを作成
    ///
    /// パーティションキーは更新対象IDと同じ値の場合だけ許容し、パッチからは取り除く。
    /// 異なる値なら`ItemError::KeyMismatch`、残りが空なら`ItemError::EmptyPatch`。
    pub fn from_document(
        mut document: Map<String, Value>,
        key: &PartitionKey,
        target: &ItemId,
    ) -> Result<Self, ItemError> {
        if let Some(value) = document.remove(key.name()) {
            let matches = matches!(&value, Value::String(s) if s == target.as_str());
            if !matches {
                return Err(ItemError::KeyMismatch {
                    attribute: key.name().to_string(),
                    expected: target.as_str().to_string(),
                    actual: value.to_string(),
                });
            }
        }

        if document.is_empty() {
            return Err(ItemError::EmptyPatch);
        }

        Ok(Self {
            attributes: document,
        })
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}
