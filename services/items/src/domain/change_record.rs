/// 変更レコード
///
/// ストアへの変更（挿入・更新・削除）1件を、変更前後のイメージ付きで表す。
/// 挿入では変更前イメージが、削除では変更後イメージが存在しない。
use serde_json::{Map, Value, json};
use std::fmt;

use super::item::{Item, PartitionKey};

/// 変更種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
}

impl ChangeKind {
    /// DynamoDB Streamsの`eventName`から変更種別を判定
    pub fn from_event_name(event_name: &str) -> Option<Self> {
        match event_name {
            "INSERT" => Some(Self::Insert),
            "MODIFY" => Some(Self::Modify),
            "REMOVE" => Some(Self::Remove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Modify => "MODIFY",
            Self::Remove => "REMOVE",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 変更レコード本体
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    /// 変更種別
    pub kind: ChangeKind,
    /// 変更されたアイテムのキー属性
    pub keys: Map<String, Value>,
    /// 変更前イメージ（INSERTでは存在しない）
    pub old_image: Option<Map<String, Value>>,
    /// 変更後イメージ（REMOVEでは存在しない）
    pub new_image: Option<Map<String, Value>>,
}

impl ChangeRecord {
    /// 変更前後のアイテムから変更レコードを導出
    ///
    /// 変更前後が同一、または両方存在しない場合は変更なしとして`None`を返す。
    /// （DynamoDB Streamsも実際に値が変わらない書き込みではレコードを出さない）
    pub fn from_mutation(
        key: &PartitionKey,
        before: Option<&Item>,
        after: Option<&Item>,
    ) -> Option<Self> {
        match (before, after) {
            (None, Some(after)) => Some(Self {
                kind: ChangeKind::Insert,
                keys: after.key_document(key),
                old_image: None,
                new_image: Some(after.to_document(key)),
            }),
            (Some(before), Some(after)) if before != after => Some(Self {
                kind: ChangeKind::Modify,
                keys: after.key_document(key),
                old_image: Some(before.to_document(key)),
                new_image: Some(after.to_document(key)),
            }),
            (Some(before), None) => Some(Self {
                kind: ChangeKind::Remove,
                keys: before.key_document(key),
                old_image: Some(before.to_document(key)),
                new_image: None,
            }),
            _ => None,
        }
    }

    /// ログ出力用の構造化表現
    pub fn to_log_value(&self) -> Value {
        json!({
            "kind": self.kind.as_str(),
            "keys": self.keys,
            "oldImage": self.old_image,
            "newImage": self.new_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::into_object;

    fn item(value: Value) -> Item {
        Item::from_document(into_object(value).unwrap(), &PartitionKey::default()).unwrap()
    }

    #[test]
    fn test_change_kind_from_event_name() {
        assert_eq!(ChangeKind::from_event_name("INSERT"), Some(ChangeKind::Insert));
        assert_eq!(ChangeKind::from_event_name("MODIFY"), Some(ChangeKind::Modify));
        assert_eq!(ChangeKind::from_event_name("REMOVE"), Some(ChangeKind::Remove));
        assert_eq!(ChangeKind::from_event_name("insert"), None);
        assert_eq!(ChangeKind::from_event_name(""), None);
    }

    #[test]
    fn test_change_kind_display() {
        assert_eq!(ChangeKind::Modify.to_string(), "MODIFY");
    }

    #[test]
    fn test_insert_has_no_old_image() {
        let key = PartitionKey::default();
        let after = item(json!({"itemId": "i-1", "name": "pen"}));

        let record = ChangeRecord::from_mutation(&key, None, Some(&after)).unwrap();

        assert_eq!(record.kind, ChangeKind::Insert);
        assert!(record.old_image.is_none());
        assert_eq!(record.new_image, Some(after.to_document(&key)));
        assert_eq!(record.keys, into_object(json!({"itemId": "i-1"})).unwrap());
    }

    #[test]
    fn test_modify_carries_both_images() {
        let key = PartitionKey::default();
        let before = item(json!({"itemId": "i-1", "name": "pen"}));
        let after = item(json!({"itemId": "i-1", "name": "pencil"}));

        let record = ChangeRecord::from_mutation(&key, Some(&before), Some(&after)).unwrap();

        assert_eq!(record.kind, ChangeKind::Modify);
        assert_eq!(record.old_image, Some(before.to_document(&key)));
        assert_eq!(record.new_image, Some(after.to_document(&key)));
    }

    #[test]
    fn test_remove_has_no_new_image() {
        let key = PartitionKey::default();
        let before = item(json!({"itemId": "i-1", "name": "pen"}));

        let record = ChangeRecord::from_mutation(&key, Some(&before), None).unwrap();

        assert_eq!(record.kind, ChangeKind::Remove);
        assert_eq!(record.old_image, Some(before.to_document(&key)));
        assert!(record.new_image.is_none());
    }

    #[test]
    fn test_no_record_without_change() {
        let key = PartitionKey::default();
        let same = item(json!({"itemId": "i-1", "name": "pen"}));

        assert!(ChangeRecord::from_mutation(&key, Some(&same), Some(&same)).is_none());
        assert!(ChangeRecord::from_mutation(&key, None, None).is_none());
    }

    #[test]
    fn test_to_log_value() {
        let key = PartitionKey::default();
        let after = item(json!({"itemId": "i-1", "name": "pen"}));
        let record = ChangeRecord::from_mutation(&key, None, Some(&after)).unwrap();

        let value = record.to_log_value();

        assert_eq!(value["kind"], "INSERT");
        assert_eq!(value["keys"]["itemId"], "i-1");
        assert!(value["oldImage"].is_null());
        assert_eq!(value["newImage"]["name"], "pen");
    }
}
