/// DynamoDBアイテムテーブルのリポジトリ
///
/// 全ての呼び出しは1回限りで、ハンドラー側では再試行しない。
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use thiserror::Error;
use tracing::debug;

use super::attribute_codec::{self, CodecError, DynamoItem};
use super::config::DynamoDbConfig;
use crate::domain::{Item, ItemId, ItemPatch, PartitionKey};

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<CodecError> for RepositoryError {
    fn from(err: CodecError) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// アイテム永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用のインメモリ実装を差し替えられるようにする。
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// パーティションキー属性名
    fn partition_key(&self) -> &PartitionKey;

    /// キー完全一致でアイテムを取得
    ///
    /// 存在しない場合は`Ok(None)`
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError>;

    /// 全アイテムを取得（順序は不定）
    async fn scan_all(&self) -> Result<Vec<Item>, RepositoryError>;

    /// アイテムを無条件に保存（同じキーのアイテムは上書き）
    ///
    /// ストアに保存された形のアイテムを返す。
    /// 数値はDynamoDBのN型に正規化されるため、`21.0`は`21`として読み戻される。
    async fn put(&self, item: &Item) -> Result<Item, RepositoryError>;

    /// 既存アイテムにパッチを適用し、更新後のアイテムを返す
    ///
    /// アイテムが存在しない場合は何も書き込まず`Ok(None)`
    async fn update(
        &self,
        id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<Option<Item>, RepositoryError>;

    /// アイテムを削除（存在しない場合も成功）
    async fn delete(&self, id: &ItemId) -> Result<(), RepositoryError>;
}

/// ItemRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoItemRepository {
    client: DynamoDbClient,
    table_name: String,
    partition_key: PartitionKey,
}

impl DynamoItemRepository {
    pub fn new(client: DynamoDbClient, table_name: String, partition_key: PartitionKey) -> Self {
        Self {
            client,
            table_name,
            partition_key,
        }
    }

    /// 設定からリポジトリを作成（クライアントは共有される）
    pub fn from_config(config: &DynamoDbConfig) -> Self {
        Self::new(
            config.client().clone(),
            config.table_name().to_string(),
            config.partition_key().clone(),
        )
    }

    /// キー属性値
    fn key_value(id: &ItemId) -> AttributeValue {
        AttributeValue::S(id.as_str().to_string())
    }

    /// DynamoDBアイテムをドメインのItemに変換
    fn decode_item(&self, raw: DynamoItem) -> Result<Item, RepositoryError> {
        let document = attribute_codec::decode_document(raw)?;
        Item::from_document(document, &self.partition_key)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl ItemRepository for DynamoItemRepository {
    fn partition_key(&self) -> &PartitionKey {
        &self.partition_key
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError> {
        // 作成直後の読み取りでも最新値を返すため強い整合性で読む
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(self.partition_key.name(), Self::key_value(id))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        result.item.map(|raw| self.decode_item(raw)).transpose()
    }

    async fn scan_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let mut items = Vec::new();
        let mut exclusive_start_key: Option<DynamoItem> = None;
        let mut page_count = 0usize;

        // 1MBごとのページをLastEvaluatedKeyが無くなるまで辿る
        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            page_count += 1;

            for raw in response.items.unwrap_or_default() {
                items.push(self.decode_item(raw)?);
            }

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        debug!(
            item_count = items.len(),
            page_count = page_count,
            "スキャン完了"
        );

        Ok(items)
    }

    async fn put(&self, item: &Item) -> Result<Item, RepositoryError> {
        let raw = attribute_codec::encode_document(&item.to_document(&self.partition_key))?;
        let stored = self.decode_item(raw.clone())?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(raw))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(stored)
    }

    async fn update(
        &self,
        id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<Option<Item>, RepositoryError> {
        let update = attribute_codec::build_patch_update(patch, &self.partition_key)?;

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(self.partition_key.name(), Self::key_value(id))
            .update_expression(update.update_expression)
            .condition_expression(update.condition_expression)
            .set_expression_attribute_names(Some(update.attribute_names))
            .set_expression_attribute_values(Some(update.attribute_values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let raw = output.attributes.ok_or_else(|| {
                    RepositoryError::SerializationError(
                        "UpdateItem returned no attributes".to_string(),
                    )
                })?;
                self.decode_item(raw).map(Some)
            }
            Err(err) => {
                let service_error = err.into_service_error();
                // attribute_exists条件に失敗 = 対象アイテムが存在しない
                if service_error.is_conditional_check_failed_exception() {
                    return Ok(None);
                }
                Err(RepositoryError::WriteError(service_error.to_string()))
            }
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(self.partition_key.name(), Self::key_value(id))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
