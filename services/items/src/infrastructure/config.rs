/// DynamoDB接続設定
///
/// 環境変数:
/// - DDB_TABLE_NAME: アイテムテーブル名（必須）
/// - PRIMARY_KEY: パーティションキー属性名（省略時は`itemId`）
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

use crate::domain::PartitionKey;

/// テーブル名の環境変数名
pub const TABLE_NAME_ENV: &str = "DDB_TABLE_NAME";

/// パーティションキー属性名の環境変数名
pub const PRIMARY_KEY_ENV: &str = "PRIMARY_KEY";

/// DynamoDB設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Environment variable must not be empty: {0}")]
    EmptyEnvVar(String),
}

/// 環境変数から読み取ったテーブル設定
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    pub table_name: String,
    pub partition_key: PartitionKey,
}

impl TableSettings {
    /// プロセス環境変数から読み込み
    pub fn from_env() -> Result<Self, DynamoDbConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込み
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DynamoDbConfigError> {
        let table_name = lookup(TABLE_NAME_ENV)
            .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))?;
        if table_name.is_empty() {
            return Err(DynamoDbConfigError::EmptyEnvVar(TABLE_NAME_ENV.to_string()));
        }

        // PRIMARY_KEYは省略可能だが、設定されている場合は空文字列を許さない
        let partition_key = match lookup(PRIMARY_KEY_ENV) {
            Some(name) => PartitionKey::new(name)
                .ok_or_else(|| DynamoDbConfigError::EmptyEnvVar(PRIMARY_KEY_ENV.to_string()))?,
            None => PartitionKey::default(),
        };

        Ok(Self {
            table_name,
            partition_key,
        })
    }
}

/// DynamoDBクライアントとテーブル設定
///
/// プロセス起動時（コールドスタート時）に1度だけ構築し、ハンドラーに渡す。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    client: DynamoDbClient,
    table_name: String,
    partition_key: PartitionKey,
}

impl DynamoDbConfig {
    /// 環境からAWS設定とテーブル設定を読み込んでDynamoDbConfigを作成
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        let settings = TableSettings::from_env()?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self::new(client, settings.table_name, settings.partition_key))
    }

    /// 明示的な値でDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String, partition_key: PartitionKey) -> Self {
        Self {
            client,
            table_name,
            partition_key,
        }
    }

    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn partition_key(&self) -> &PartitionKey {
        &self.partition_key
    }
}
