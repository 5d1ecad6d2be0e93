//! SQSキュー存在チェックモジュール
//!
//! サービスが依存するジョブキューが存在しアクセス可能かを
//! GetQueueAttributesで確認する。

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use aws_sdk_sqs::types::QueueAttributeName;
use thiserror::Error;
use tracing::warn;

/// キューチェックのエラー型
#[derive(Debug, Error)]
pub enum QueueCheckError {
    /// AWS SDK エラー（未存在・権限不足を含む）
    #[error("AWS SQS APIエラー: {0}")]
    AwsSdkError(String),
}

/// キュー存在チェックトレイト（テスト用の抽象化）
#[async_trait]
pub trait QueueCheckOps: Send + Sync {
    /// キューが存在しアクセス可能かを確認する
    async fn check_queue(&self, queue_url: &str) -> Result<(), QueueCheckError>;
}

/// 実際のAWS SQS SDKを使用した実装
pub struct AwsQueueCheck {
    client: SqsClient,
}

impl AwsQueueCheck {
    /// 新しいAwsQueueCheckを作成
    pub fn new(client: SqsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueueCheckOps for AwsQueueCheck {
    async fn check_queue(&self, queue_url: &str) -> Result<(), QueueCheckError> {
        self.client
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .map_err(|err| {
                warn!(queue_url = %queue_url, error = %err, "GetQueueAttributes失敗");
                QueueCheckError::AwsSdkError(err.to_string())
            })?;

        Ok(())
    }
}
