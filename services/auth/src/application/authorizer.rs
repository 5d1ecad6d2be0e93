//! リクエスト認可モジュール
//!
//! 受信リクエストのヘッダー・リクエストコンテキストを検査し、固定の
//! 優先順位でいずれかの認証メソッドに合致するか判定する。
//! 1. 共有APIキー（X-API-Keyヘッダー）
//! 2. レガシー: API GatewayネイティブAPIキーID（非推奨）
//! 3. レガシー: Bearerトークン（非推奨）
//!
//! この判定は決して失敗を伝播しない。シークレットストアのエラー、
//! 不正なシークレットパス、資格情報の不一致はすべて一様な
//! `{authorized: false, method: none}` に収束する（フェイルクローズ）。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AuthMethod, AuthRequest, AuthResult};
use crate::infrastructure::SecretsOps;

/// 共有APIキーのペイロード内デフォルトキー名
pub const DEFAULT_SHARED_KEY_NAME: &str = "AVIARY_SHARED_API_KEY";
/// レガシーAPI Gatewayキーのペイロード内デフォルトキー名
pub const DEFAULT_LEGACY_GATEWAY_KEY_NAME: &str = "AVIARY_LEGACY_GATEWAY_KEY";
/// レガシーBearerトークンのペイロード内デフォルトキー名
pub const DEFAULT_LEGACY_BEARER_KEY_NAME: &str = "AVIARY_LEGACY_BEARER_TOKEN";

/// シークレット参照
///
/// 期待される資格情報が格納されているシークレットのパスと、
/// ペイロード内のキー名を指定する。呼び出しごとに渡される読み取り専用の値。
#[derive(Debug, Clone)]
pub struct SecretReference {
    secret_path: String,
    key_name: String,
}

impl SecretReference {
    /// デフォルトのキー名（AVIARY_SHARED_API_KEY）で参照を作成
    pub fn new(secret_path: impl Into<String>) -> Self {
        Self {
            secret_path: secret_path.into(),
            key_name: DEFAULT_SHARED_KEY_NAME.to_string(),
        }
    }

    /// ペイロード内のキー名を指定
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    pub fn secret_path(&self) -> &str {
        &self.secret_path
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// パスがストアの構造（スラッシュ区切り）を持つかどうか
    ///
    /// 空文字列や区切りのないパスは不正として扱い、認可は即座に拒否される。
    pub fn is_well_formed(&self) -> bool {
        !self.secret_path.trim().is_empty() && self.secret_path.contains('/')
    }
}

/// 認可オプション
///
/// レガシーメソッドの期待値が格納されているペイロード内キー名の上書き。
/// 共有キーのキー名は`SecretReference`側で指定する。
#[derive(Debug, Clone)]
pub struct AuthorizeOptions {
    /// レガシーAPI Gatewayキーのペイロード内キー名
    pub legacy_gateway_key_name: String,
    /// レガシーBearerトークンのペイロード内キー名
    pub legacy_bearer_key_name: String,
}

impl Default for AuthorizeOptions {
    fn default() -> Self {
        Self {
            legacy_gateway_key_name: DEFAULT_LEGACY_GATEWAY_KEY_NAME.to_string(),
            legacy_bearer_key_name: DEFAULT_LEGACY_BEARER_KEY_NAME.to_string(),
        }
    }
}

/// リクエスト認可ハンドラー
///
/// シークレットストアへの読み取り1回を除き、状態を持たない。
/// 判定はリクエスト単位で独立しており、並行呼び出しに調整は不要。
pub struct RequestAuthorizer {
    secrets: Arc<dyn SecretsOps>,
}

impl RequestAuthorizer {
    /// 新しいRequestAuthorizerを作成
    pub fn new(secrets: Arc<dyn SecretsOps>) -> Self {
        Self { secrets }
    }

    /// デフォルトオプションで認可判定を行う
    pub async fn authorize(
        &self,
        request: &AuthRequest,
        secret_ref: &SecretReference,
    ) -> AuthResult {
        self.authorize_with_options(request, secret_ref, &AuthorizeOptions::default())
            .await
    }

    /// 認可判定を行う
    ///
    /// 優先順位: 共有キー → レガシーAPI Gateway → レガシーBearer。
    /// 共有キーが欠落または不一致の場合のみレガシーメソッドを試行する。
    /// どのメソッドも成功しなければ拒否結果を返す。エラーは返さない。
    pub async fn authorize_with_options(
        &self,
        request: &AuthRequest,
        secret_ref: &SecretReference,
        options: &AuthorizeOptions,
    ) -> AuthResult {
        if !secret_ref.is_well_formed() {
            warn!(
                secret_path = %secret_ref.secret_path(),
                "シークレットパスが不正なため認可を拒否"
            );
            return AuthResult::denied();
        }

        // 1. 共有APIキー（X-API-Key、ヘッダー名は大文字小文字を区別しない）
        if let Some(presented) = request.header("x-api-key") {
            let presented = presented.trim();
            if !presented.is_empty() {
                if let Some(expected) = self
                    .lookup(secret_ref.secret_path(), secret_ref.key_name())
                    .await
                {
                    if presented == expected {
                        debug!(method = %AuthMethod::SharedKey, "認可成功");
                        return AuthResult::granted(AuthMethod::SharedKey);
                    }
                    warn!("共有APIキーが一致しません");
                }
            }
        }

        // 2. レガシー: API GatewayネイティブAPIキーID（非推奨）
        if let Some(marker) = request.legacy_api_key() {
            if !marker.trim().is_empty() {
                if let Some(expected) = self
                    .lookup(secret_ref.secret_path(), &options.legacy_gateway_key_name)
                    .await
                {
                    if marker == expected {
                        debug!(method = %AuthMethod::LegacyApiGateway, "認可成功（非推奨メソッド）");
                        return AuthResult::granted(AuthMethod::LegacyApiGateway);
                    }
                }
            }
        }

        // 3. レガシー: Bearerトークン（非推奨）
        if let Some(auth_header) = request.header("authorization") {
            if let Some(token) = auth_header.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    if let Some(expected) = self
                        .lookup(secret_ref.secret_path(), &options.legacy_bearer_key_name)
                        .await
                    {
                        if token == expected {
                            debug!(method = %AuthMethod::LegacyBearer, "認可成功（非推奨メソッド）");
                            return AuthResult::granted(AuthMethod::LegacyBearer);
                        }
                    }
                }
            }
        }

        debug!("いずれの認証メソッドも成立しませんでした");
        AuthResult::denied()
    }

    /// シークレット値を取得する。未発見とストアエラーを同一に扱う
    async fn lookup(&self, secret_path: &str, key_name: &str) -> Option<String> {
        match self.secrets.get_secret_value(secret_path, key_name).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!(secret_path = %secret_path, key_name = %key_name, "シークレット未発見");
                None
            }
            Err(err) => {
                // 詳細はログのみに残し、呼び出し側には未発見として返す
                warn!(
                    secret_path = %secret_path,
                    key_name = %key_name,
                    error = %err,
                    "シークレット取得失敗"
                );
                None
            }
        }
    }
}
