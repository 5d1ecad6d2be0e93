//! aviaryサービス用ヘルスチェックLambda
//!
//! 共有API Gateway配下でサービスの稼働状態を返すHTTPハンドラー。
//! - ゲートウェイが付与するサービスプレフィックスを正規化
//! - `/health` は認証なしの生存確認（依存リソースの存在チェックをファンアウト）
//! - `/v1/health/details` は認可ゲート付きの詳細レポート
//!   （レガシー認証メソッドには非推奨ヘッダーを付与）

// Application layer modules
pub mod application;

// Infrastructure layer modules
pub mod infrastructure;
