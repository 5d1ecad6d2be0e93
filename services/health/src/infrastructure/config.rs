//! ヘルスチェックLambdaの設定
//!
//! 環境変数からルーティング・認可・チェック対象リソースの設定を読み込む。
//! チェック対象（テーブル・キュー・バケット）は未設定ならスキップされる。

use thiserror::Error;

/// 設定のエラー型
#[derive(Debug, Error)]
pub enum HealthConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// 非推奨シグナル設定
///
/// レガシー認証メソッドで認可されたレスポンスに付与するSunset日時と
/// 移行ドキュメントURL。両方の環境変数が設定されている場合のみ有効。
#[derive(Debug, Clone)]
pub struct DeprecationConfig {
    /// 提供終了日時（ISO-8601、DEPRECATION_SUNSET環境変数）
    pub sunset: String,
    /// 移行ドキュメントURL（DEPRECATION_DOCS_URL環境変数）
    pub docs_url: String,
}

/// ヘルスチェックLambdaの設定
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// ゲートウェイが付与するサービスプレフィックス（SERVICE_PREFIX環境変数、
    /// 未設定は空＝除去しない）
    pub service_prefix: String,
    /// 受け付けるAPIバージョン（API_VERSION環境変数、デフォルト: v1）
    pub api_version: String,
    /// 認可用シークレットのパス（AUTH_SECRET_PATH環境変数、必須）
    pub secret_path: String,
    /// 非推奨シグナル設定（DEPRECATION_SUNSET + DEPRECATION_DOCS_URL）
    pub deprecation: Option<DeprecationConfig>,
    /// 存在チェック対象のDynamoDBテーブル名（HEALTH_EVENTS_TABLE環境変数）
    pub events_table: Option<String>,
    /// 存在チェック対象のSQSキューURL（HEALTH_JOBS_QUEUE_URL環境変数）
    pub jobs_queue_url: Option<String>,
    /// 存在チェック対象のS3バケット名（HEALTH_ASSETS_BUCKET環境変数）
    pub assets_bucket: Option<String>,
}

impl HealthConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, HealthConfigError> {
        // 空文字は未設定として扱うヘルパー
        let get_optional = |key: &str| -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.trim().is_empty())
        };

        let secret_path = get_optional("AUTH_SECRET_PATH")
            .ok_or_else(|| HealthConfigError::MissingEnvVar("AUTH_SECRET_PATH".to_string()))?;

        let deprecation = match (
            get_optional("DEPRECATION_SUNSET"),
            get_optional("DEPRECATION_DOCS_URL"),
        ) {
            (Some(sunset), Some(docs_url)) => Some(DeprecationConfig { sunset, docs_url }),
            _ => None,
        };

        Ok(Self {
            service_prefix: get_optional("SERVICE_PREFIX").unwrap_or_default(),
            api_version: get_optional("API_VERSION")
                .unwrap_or_else(|| auth::domain::DEFAULT_API_VERSION.to_string()),
            secret_path,
            deprecation,
            events_table: get_optional("HEALTH_EVENTS_TABLE"),
            jobs_queue_url: get_optional("HEALTH_JOBS_QUEUE_URL"),
            assets_bucket: get_optional("HEALTH_ASSETS_BUCKET"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup_env() {
        unsafe {
            remove_env("SERVICE_PREFIX");
            remove_env("API_VERSION");
            remove_env("AUTH_SECRET_PATH");
            remove_env("DEPRECATION_SUNSET");
            remove_env("DEPRECATION_DOCS_URL");
            remove_env("HEALTH_EVENTS_TABLE");
            remove_env("HEALTH_JOBS_QUEUE_URL");
            remove_env("HEALTH_ASSETS_BUCKET");
        }
    }

    #[test]
    fn test_health_config_error_display() {
        let error = HealthConfigError::MissingEnvVar("AUTH_SECRET_PATH".to_string());
        assert_eq!(
            error.to_string(),
            "Missing environment variable: AUTH_SECRET_PATH"
        );
    }

    #[test]
    #[serial(health_env)]
    fn test_from_env_requires_secret_path() {
        unsafe { cleanup_env() };

        let result = HealthConfig::from_env();

        assert!(result.is_err());
        match result.unwrap_err() {
            HealthConfigError::MissingEnvVar(var) => assert_eq!(var, "AUTH_SECRET_PATH"),
        }
    }

    #[test]
    #[serial(health_env)]
    fn test_from_env_defaults() {
        unsafe {
            cleanup_env();
            set_env("AUTH_SECRET_PATH", "aviary/nightingale/api-keys");
        }

        let config = HealthConfig::from_env().unwrap();

        assert_eq!(config.secret_path, "aviary/nightingale/api-keys");
        assert_eq!(config.service_prefix, "");
        assert_eq!(config.api_version, "v1");
        assert!(config.deprecation.is_none());
        assert!(config.events_table.is_none());
        assert!(config.jobs_queue_url.is_none());
        assert!(config.assets_bucket.is_none());

        unsafe { cleanup_env() };
    }

    #[test]
    #[serial(health_env)]
    fn test_from_env_full_configuration() {
        unsafe {
            cleanup_env();
            set_env("AUTH_SECRET_PATH", "aviary/nightingale/api-keys");
            set_env("SERVICE_PREFIX", "nightingale");
            set_env("API_VERSION", "v2");
            set_env("DEPRECATION_SUNSET", "2025-06-15T14:30:00Z");
            set_env("DEPRECATION_DOCS_URL", "https://docs.example.com/migration");
            set_env("HEALTH_EVENTS_TABLE", "nightingale-events");
            set_env("HEALTH_JOBS_QUEUE_URL", "https://sqs.example.com/jobs");
            set_env("HEALTH_ASSETS_BUCKET", "nightingale-assets");
        }

        let config = HealthConfig::from_env().unwrap();

        assert_eq!(config.service_prefix, "nightingale");
        assert_eq!(config.api_version, "v2");
        let deprecation = config.deprecation.unwrap();
        assert_eq!(deprecation.sunset, "2025-06-15T14:30:00Z");
        assert_eq!(deprecation.docs_url, "https://docs.example.com/migration");
        assert_eq!(config.events_table.as_deref(), Some("nightingale-events"));
        assert_eq!(
            config.jobs_queue_url.as_deref(),
            Some("https://sqs.example.com/jobs")
        );
        assert_eq!(config.assets_bucket.as_deref(), Some("nightingale-assets"));

        unsafe { cleanup_env() };
    }

    #[test]
    #[serial(health_env)]
    fn test_deprecation_requires_both_env_vars() {
        // Sunset日時のみでは非推奨シグナルを有効にしない
        unsafe {
            cleanup_env();
            set_env("AUTH_SECRET_PATH", "aviary/nightingale/api-keys");
            set_env("DEPRECATION_SUNSET", "2025-06-15T14:30:00Z");
        }

        let config = HealthConfig::from_env().unwrap();
        assert!(config.deprecation.is_none());

        unsafe { cleanup_env() };
    }

    #[test]
    #[serial(health_env)]
    fn test_blank_optional_env_vars_are_ignored() {
        unsafe {
            cleanup_env();
            set_env("AUTH_SECRET_PATH", "aviary/nightingale/api-keys");
            set_env("SERVICE_PREFIX", "   ");
            set_env("HEALTH_EVENTS_TABLE", "");
        }

        let config = HealthConfig::from_env().unwrap();

        assert_eq!(config.service_prefix, "");
        assert!(config.events_table.is_none());

        unsafe { cleanup_env() };
    }
}
