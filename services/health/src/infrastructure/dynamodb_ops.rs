//! DynamoDBテーブル存在チェックモジュール
//!
//! ヘルスチェックのファンアウトから呼び出され、サービスが依存する
//! テーブルが存在しアクセス可能かをDescribeTableで確認する。

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::warn;

/// テーブルチェックのエラー型
#[derive(Debug, Error)]
pub enum TableCheckError {
    /// AWS SDK エラー（未存在・権限不足を含む）
    #[error("AWS DynamoDB APIエラー: {0}")]
    AwsSdkError(String),
}

/// テーブル存在チェックトレイト（テスト用の抽象化）
#[async_trait]
pub trait TableCheckOps: Send + Sync {
    /// テーブルが存在しアクセス可能かを確認する
    async fn check_table(&self, table_name: &str) -> Result<(), TableCheckError>;
}

/// 実際のAWS DynamoDB SDKを使用した実装
pub struct AwsTableCheck {
    client: DynamoDbClient,
}

impl AwsTableCheck {
    /// 新しいAwsTableCheckを作成
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableCheckOps for AwsTableCheck {
    async fn check_table(&self, table_name: &str) -> Result<(), TableCheckError> {
        self.client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|err| {
                warn!(table_name = %table_name, error = %err, "DescribeTable失敗");
                TableCheckError::AwsSdkError(err.to_string())
            })?;

        Ok(())
    }
}
