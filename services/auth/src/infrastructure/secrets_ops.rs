//! Secrets Manager操作モジュール
//!
//! 共有APIキー等の期待値を保持するシークレットへの読み取りを提供する。
//! シークレット本体はフラットなキー→文字列のJSONマップとして格納されて
//! いる前提で、指定キーの値のみを取り出す。キャッシュはこの層では行わない
//! （必要ならホスト側ハンドラーが持つ）。

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use thiserror::Error;

/// Secrets Manager操作のエラー型
#[derive(Debug, Error)]
pub enum SecretsOpsError {
    /// AWS SDK エラー
    #[error("AWS Secrets Manager APIエラー: {0}")]
    AwsSdkError(String),
    /// シークレットペイロードがJSONマップとして解析できない
    #[error("シークレットペイロードの解析失敗: {0}")]
    MalformedPayload(String),
}

/// シークレット読み取りトレイト（テスト用の抽象化）
#[async_trait]
pub trait SecretsOps: Send + Sync {
    /// シークレットのペイロードから指定キーの値を取得する
    ///
    /// # 引数
    /// * `secret_path` - シークレットのパス（例: "aviary/nightingale/api-keys"）
    /// * `key_name` - ペイロード内のキー名（例: "AVIARY_SHARED_API_KEY"）
    ///
    /// # 戻り値
    /// * `Ok(Some(value))` - キーに対応する文字列値
    /// * `Ok(None)` - シークレットまたはキーが存在しない
    /// * `Err(SecretsOpsError)` - ストアエラー（呼び出し側は未発見と同一に扱う）
    async fn get_secret_value(
        &self,
        secret_path: &str,
        key_name: &str,
    ) -> Result<Option<String>, SecretsOpsError>;
}

/// 実際のAWS Secrets Manager SDKを使用した実装
pub struct AwsSecretsManagerOps {
    client: SecretsManagerClient,
}

impl AwsSecretsManagerOps {
    /// 新しいAwsSecretsManagerOpsを作成
    pub fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = SecretsManagerClient::new(&config);
        Self::new(client)
    }
}

#[async_trait]
impl SecretsOps for AwsSecretsManagerOps {
    async fn get_secret_value(
        &self,
        secret_path: &str,
        key_name: &str,
    ) -> Result<Option<String>, SecretsOpsError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_path)
            .send()
            .await
            .map_err(|err| SecretsOpsError::AwsSdkError(err.to_string()))?;

        let Some(payload) = response.secret_string() else {
            return Ok(None);
        };

        let parsed: serde_json::Value = serde_json::from_str(payload)
            .map_err(|err| SecretsOpsError::MalformedPayload(err.to_string()))?;

        // 文字列以外の値（数値、ネスト等）は未発見として扱う
        Ok(parsed
            .get(key_name)
            .and_then(|value| value.as_str())
            .map(str::to_string))
    }
}
