/// アイテムのドメインモデル
///
/// パーティションキー（既定では`itemId`）だけを静的に必須とし、
/// それ以外の属性は呼び出し元が自由に定義する不透明なJSON値として扱う。
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// パーティションキー属性名の既定値
pub const DEFAULT_PARTITION_KEY: &str = "itemId";

/// アイテムの検証エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemError {
    /// アイテムIDが空文字列
    #[error("Item id must not be empty")]
    EmptyId,

    /// ドキュメントにパーティションキーが存在しない
    #[error("Missing partition key attribute: {0}")]
    MissingKey(String),

    /// パーティションキーが空でない文字列ではない
    #[error("Partition key attribute '{0}' must be a non-empty string")]
    InvalidKey(String),

    /// ドキュメントがJSONオブジェクトではない
    #[error("Item document must be a JSON object")]
    NotAnObject,

    /// パッチに属性が1つも含まれていない
    #[error("Patch must contain at least one attribute")]
    EmptyPatch,

    /// パッチがパーティションキーを別の値に書き換えようとした
    #[error("Patch cannot change partition key '{attribute}' from '{expected}' to {actual}")]
    KeyMismatch {
        attribute: String,
        expected: String,
        actual: String,
    },
}

/// アイテムを一意に識別する空でない文字列
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// 文字列からItemIdを作成
    ///
    /// 空文字列は`ItemError::EmptyId`になる。前後の空白は取り除かない（完全一致で検索するため）。
    pub fn new(value: impl Into<String>) -> Result<Self, ItemError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ItemError::EmptyId);
        }
        Ok(Self(value))
    }

    /// ランダムなUUID v4からItemIdを生成
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// パーティションキーとして使う属性名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// 属性名からPartitionKeyを作成（空文字列は不可）
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for PartitionKey {
    fn default() -> Self {
        Self(DEFAULT_PARTITION_KEY.to_string())
    }
}

/// ストアに保存される1件のアイテム
///
/// `attributes`にはパーティションキー属性を含めない。
/// ドキュメント（JSONオブジェクト）に戻すときに`id`を書き戻す。
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    attributes: Map<String, Value>,
}

impl Item {
    pub fn new(id: ItemId, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }

    /// パーティションキーを含むドキュメントからItemを作成
    pub fn from_document(
        mut document: Map<String, Value>,
        key: &PartitionKey,
    ) -> Result<Self, ItemError> {
        let id = match document.remove(key.name()) {
            Some(Value::String(value)) => ItemId::new(value)
                .map_err(|_| ItemError::InvalidKey(key.name().to_string()))?,
            Some(_) => return Err(ItemError::InvalidKey(key.name().to_string())),
            None => return Err(ItemError::MissingKey(key.name().to_string())),
        };

        Ok(Self {
            id,
            attributes: document,
        })
    }

    /// 新規作成用ドキュメントからItemを作成
    ///
    /// パーティションキーが無い場合はUUIDを生成して補う。
    /// キーが存在する場合は`from_document`と同じ検証を行う。
    pub fn from_new_document(
        mut document: Map<String, Value>,
        key: &PartitionKey,
    ) -> Result<Self, ItemError> {
        if !document.contains_key(key.name()) {
            document.insert(
                key.name().to_string(),
                Value::String(ItemId::generate().into_string()),
            );
        }
        Self::from_document(document, key)
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// 属性値を取得
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// パッチを適用（パッチの属性で上書きし、それ以外は保持）
    pub fn apply_patch(&mut self, patch: &super::ItemPatch) {
        for (name, value) in patch.attributes() {
            self.attributes.insert(name.clone(), value.clone());
        }
    }

    /// パーティションキーを含むドキュメントに変換
    pub fn to_document(&self, key: &PartitionKey) -> Map<String, Value> {
        let mut document = self.attributes.clone();
        document.insert(
            key.name().to_string(),
            Value::String(self.id.as_str().to_string()),
        );
        document
    }

    /// キー属性だけのドキュメント（ストリームレコードの`Keys`相当）
    pub fn key_document(&self, key: &PartitionKey) -> Map<String, Value> {
        let mut keys = Map::new();
        keys.insert(
            key.name().to_string(),
            Value::String(self.id.as_str().to_string()),
        );
        keys
    }
}

/// JSON値がオブジェクトであることを確認して取り出す
pub fn into_object(value: Value) -> Result<Map<String, Value>, ItemError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ItemError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        into_object(value).unwrap()
    }

    #[test]
    fn test_item_id_rejects_empty() {
        assert_eq!(ItemId::new(""), Err(ItemError::EmptyId));
        assert_eq!(ItemId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_item_id_keeps_whitespace() {
        // 完全一致で検索するため空白は保持する
        assert_eq!(ItemId::new(" a ").unwrap().as_str(), " a ");
    }

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_partition_key_default_and_empty() {
        assert_eq!(PartitionKey::default().name(), "itemId");
        assert!(PartitionKey::new("").is_none());
        assert_eq!(PartitionKey::new("id").unwrap().name(), "id");
    }

    #[test]
    fn test_from_document_extracts_key() {
        let key = PartitionKey::default();
        let item =
            Item::from_document(object(json!({"itemId": "i-1", "name": "pen"})), &key).unwrap();

        assert_eq!(item.id().as_str(), "i-1");
        assert_eq!(item.get("name"), Some(&json!("pen")));
        // キー属性はattributesに残らない
        assert!(item.get("itemId").is_none());
    }

    #[test]
    fn test_from_document_missing_key() {
        let key = PartitionKey::default();
        let result = Item::from_document(object(json!({"name": "pen"})), &key);
        assert_eq!(result, Err(ItemError::MissingKey("itemId".to_string())));
    }

    #[test]
    fn test_from_document_rejects_non_string_or_empty_key() {
        let key = PartitionKey::default();
        assert_eq!(
            Item::from_document(object(json!({"itemId": 42})), &key),
            Err(ItemError::InvalidKey("itemId".to_string()))
        );
        assert_eq!(
            Item::from_document(object(json!({"itemId": ""})), &key),
            Err(ItemError::InvalidKey("itemId".to_string()))
        );
    }

    #[test]
    fn test_from_new_document_generates_missing_key() {
        let key = PartitionKey::default();
        let item = Item::from_new_document(object(json!({"name": "pen"})), &key).unwrap();

        assert!(!item.id().as_str().is_empty());
        assert_eq!(item.get("name"), Some(&json!("pen")));
    }

    #[test]
    fn test_from_new_document_keeps_supplied_key() {
        let key = PartitionKey::default();
        let item =
            Item::from_new_document(object(json!({"itemId": "mine", "name": "pen"})), &key)
                .unwrap();
        assert_eq!(item.id().as_str(), "mine");
    }

    #[test]
    fn test_custom_partition_key() {
        let key = PartitionKey::new("sku").unwrap();
        let item = Item::from_document(object(json!({"sku": "A-1", "itemId": "x"})), &key).unwrap();

        assert_eq!(item.id().as_str(), "A-1");
        // 別名のitemIdは通常の属性として扱う
        assert_eq!(item.get("itemId"), Some(&json!("x")));
        assert_eq!(item.to_document(&key), object(json!({"sku": "A-1", "itemId": "x"})));
    }

    #[test]
    fn test_to_document_round_trips_nested_values() {
        let key = PartitionKey::default();
        let document = object(json!({
            "itemId": "i-1",
            "tags": ["a", "b"],
            "dimensions": {"w": 1.5, "h": 2},
            "discontinued": false,
            "note": null
        }));

        let item = Item::from_document(document.clone(), &key).unwrap();
        assert_eq!(item.to_document(&key), document);
    }

    #[test]
    fn test_key_document() {
        let key = PartitionKey::default();
        let item = Item::new(ItemId::new("i-1").unwrap(), Map::new());
        assert_eq!(item.key_document(&key), object(json!({"itemId": "i-1"})));
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        assert_eq!(into_object(json!([1, 2])), Err(ItemError::NotAnObject));
        assert_eq!(into_object(json!("x")), Err(ItemError::NotAnObject));
    }
}
