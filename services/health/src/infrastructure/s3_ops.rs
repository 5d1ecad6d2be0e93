//! S3バケット存在チェックモジュール
//!
//! サービスが依存するアセットバケットが存在しアクセス可能かを
//! HeadBucketで確認する。

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;
use tracing::warn;

/// バケットチェックのエラー型
#[derive(Debug, Error)]
pub enum BucketCheckError {
    /// AWS SDK エラー（未存在・権限不足を含む）
    #[error("AWS S3 APIエラー: {0}")]
    AwsSdkError(String),
}

/// バケット存在チェックトレイト（テスト用の抽象化）
#[async_trait]
pub trait BucketCheckOps: Send + Sync {
    /// バケットが存在しアクセス可能かを確認する
    async fn check_bucket(&self, bucket_name: &str) -> Result<(), BucketCheckError>;
}

/// 実際のAWS S3 SDKを使用した実装
pub struct AwsBucketCheck {
    client: S3Client,
}

impl AwsBucketCheck {
    /// 新しいAwsBucketCheckを作成
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BucketCheckOps for AwsBucketCheck {
    async fn check_bucket(&self, bucket_name: &str) -> Result<(), BucketCheckError> {
        self.client
            .head_bucket()
            .bucket(bucket_name)
            .send()
            .await
            .map_err(|err| {
                warn!(bucket_name = %bucket_name, error = %err, "HeadBucket失敗");
                BucketCheckError::AwsSdkError(err.to_string())
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_check_error_display() {
        let error = BucketCheckError::AwsSdkError("NoSuchBucket".to_string());
        assert_eq!(error.to_string(), "AWS S3 APIエラー: NoSuchBucket");
    }

    /// テスト用のモックバケットチェック
    struct MockBucketCheck {
        existing_buckets: Vec<String>,
    }

    #[async_trait]
    impl BucketCheckOps for MockBucketCheck {
        async fn check_bucket(&self, bucket_name: &str) -> Result<(), BucketCheckError> {
            if self.existing_buckets.iter().any(|b| b == bucket_name) {
                Ok(())
            } else {
                Err(BucketCheckError::AwsSdkError(format!(
                    "バケット {bucket_name} が見つかりません"
                )))
            }
        }
    }

    #[tokio::test]
    async fn test_mock_bucket_check() {
        let mock = MockBucketCheck {
            existing_buckets: vec!["nightingale-assets".to_string()],
        };

        assert!(mock.check_bucket("nightingale-assets").await.is_ok());
        assert!(mock.check_bucket("other-bucket").await.is_err());
    }
}
