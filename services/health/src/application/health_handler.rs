//! ヘルスチェックハンドラー
//!
//! ホスト側リクエストハンドラーとして、受信パスの正規化・認可ゲート・
//! 依存リソース存在チェックのファンアウトを行う。
//!
//! # ルーティング（プレフィックス正規化後）
//! - `/health` - 認証なしの生存確認。設定済みチェックを並行実行し、
//!   すべて成功なら200、いずれか失敗なら503を返す
//! - `/<version>/health/details` - 認可ゲート付きの詳細レポート。
//!   未認可は401、レガシーメソッド認可時は非推奨ヘッダーを付与
//! - その他のパスは404

use lambda_http::request::RequestContext;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use serde::Serialize;
use tracing::{info, warn};

use auth::application::{RequestAuthorizer, SecretReference};
use auth::domain::{AuthRequest, add_deprecation_headers, is_valid_api_version, normalize_api_path};

use crate::infrastructure::{BucketCheckOps, HealthConfig, QueueCheckOps, TableCheckOps};

/// 個別チェックの結果
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// チェック種別（dynamodb / sqs / s3）
    pub name: &'static str,
    /// チェック対象（テーブル名、キューURL、バケット名）
    pub target: String,
    /// チェックが成功したかどうか
    pub healthy: bool,
    /// 失敗時の詳細メッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckReport {
    fn healthy(name: &'static str, target: impl Into<String>) -> Self {
        Self {
            name,
            target: target.into(),
            healthy: true,
            detail: None,
        }
    }

    fn unhealthy(name: &'static str, target: impl Into<String>, detail: String) -> Self {
        Self {
            name,
            target: target.into(),
            healthy: false,
            detail: Some(detail),
        }
    }
}

/// ファンアウト全体の集約結果
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// 設定済みチェックがすべて成功したかどうか（チェックなしは成功扱い）
    pub healthy: bool,
    pub checks: Vec<CheckReport>,
}

/// ヘルスチェックリクエストを処理するハンドラー
pub struct HealthHandler<T, Q, B>
where
    T: TableCheckOps,
    Q: QueueCheckOps,
    B: BucketCheckOps,
{
    config: HealthConfig,
    authorizer: RequestAuthorizer,
    tables: T,
    queues: Q,
    buckets: B,
}

impl<T, Q, B> HealthHandler<T, Q, B>
where
    T: TableCheckOps,
    Q: QueueCheckOps,
    B: BucketCheckOps,
{
    /// 新しいHealthHandlerを作成
    pub fn new(
        config: HealthConfig,
        authorizer: RequestAuthorizer,
        tables: T,
        queues: Q,
        buckets: B,
    ) -> Self {
        Self {
            config,
            authorizer,
            tables,
            queues,
            buckets,
        }
    }

    /// HTTPリクエストを処理する
    pub async fn handle(&self, request: &Request) -> Result<Response<Body>, Error> {
        let raw_path = request.uri().path();
        let path = normalize_api_path(raw_path, &self.config.service_prefix);

        info!(raw_path = %raw_path, path = %path, "リクエスト受信");

        if path == "/health" {
            // 生存確認は認証をバイパス
            let report = self.run_checks().await;
            let status = if report.healthy { 200 } else { 503 };
            return json_response(status, &report);
        }

        if !is_valid_api_version(&path, &self.config.api_version) {
            warn!(path = %path, expected = %self.config.api_version, "未対応のAPIバージョン");
            return json_response(404, &ErrorBody::new("unsupported API version"));
        }

        if path == format!("/{}/health/details", self.config.api_version) {
            return self.handle_details(request).await;
        }

        json_response(404, &ErrorBody::new("not found"))
    }

    /// 認可ゲート付きの詳細レポート
    async fn handle_details(&self, request: &Request) -> Result<Response<Body>, Error> {
        let auth_request = build_auth_request(request);
        let secret_ref = SecretReference::new(&self.config.secret_path);
        let auth_result = self.authorizer.authorize(&auth_request, &secret_ref).await;

        if !auth_result.authorized() {
            warn!("認可されていないリクエストを拒否");
            return json_response(401, &ErrorBody::new("unauthorized"));
        }

        info!(method = %auth_result.method(), "認可成功");

        let report = self.run_checks().await;
        let status = if report.healthy { 200 } else { 503 };
        let mut response = json_response(status, &report)?;

        // レガシーメソッドで認可された場合のみ非推奨ヘッダーを付与
        if let Some(deprecation) = &self.config.deprecation {
            let headers = std::mem::take(response.headers_mut());
            *response.headers_mut() = add_deprecation_headers(
                headers,
                &auth_result,
                &deprecation.sunset,
                &deprecation.docs_url,
            );
        }

        Ok(response)
    }

    /// 設定済みチェックを並行実行して集約する
    ///
    /// 各チェックは独立しており、1つの失敗が他を中断しない。
    async fn run_checks(&self) -> HealthReport {
        let (table, queue, bucket) =
            tokio::join!(self.check_table(), self.check_queue(), self.check_bucket());

        let checks: Vec<CheckReport> = [table, queue, bucket].into_iter().flatten().collect();
        let healthy = checks.iter().all(|check| check.healthy);

        HealthReport { healthy, checks }
    }

    async fn check_table(&self) -> Option<CheckReport> {
        let table_name = self.config.events_table.as_deref()?;
        Some(match self.tables.check_table(table_name).await {
            Ok(()) => CheckReport::healthy("dynamodb", table_name),
            Err(err) => CheckReport::unhealthy("dynamodb", table_name, err.to_string()),
        })
    }

    async fn check_queue(&self) -> Option<CheckReport> {
        let queue_url = self.config.jobs_queue_url.as_deref()?;
        Some(match self.queues.check_queue(queue_url).await {
            Ok(()) => CheckReport::healthy("sqs", queue_url),
            Err(err) => CheckReport::unhealthy("sqs", queue_url, err.to_string()),
        })
    }

    async fn check_bucket(&self) -> Option<CheckReport> {
        let bucket_name = self.config.assets_bucket.as_deref()?;
        Some(match self.buckets.check_bucket(bucket_name).await {
            Ok(()) => CheckReport::healthy("s3", bucket_name),
            Err(err) => CheckReport::unhealthy("s3", bucket_name, err.to_string()),
        })
    }
}

/// エラーレスポンスのJSONボディ
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ErrorBody {
    fn new(error: &'static str) -> Self {
        Self { error }
    }
}

/// 受信リクエストから認可判定用のビューを構築する
///
/// ヘッダーに加えて、API Gateway v1のリクエストコンテキストが運ぶ
/// レガシーAPIキーIDを取り込む。
fn build_auth_request(request: &Request) -> AuthRequest {
    let auth_request = AuthRequest::from_header_map(request.headers());

    match request.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(context)) => match &context.identity.api_key {
            Some(api_key) => auth_request.with_legacy_api_key(api_key.clone()),
            None => auth_request,
        },
        _ => auth_request,
    }
}

/// JSONボディ付きのレスポンスを構築する
fn json_response(status: u16, body: &impl Serialize) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}
