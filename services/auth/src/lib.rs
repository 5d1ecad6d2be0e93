//! aviaryマイクロサービス共通の認証・パス正規化ライブラリ
//!
//! API Gateway配下のLambdaサービスが共有する2つの独立した機能を提供する。
//! - リクエスト認可: 共有APIキー / レガシー認証メソッドの優先順位付き判定
//! - パス正規化: ゲートウェイが付与するサービスプレフィックスの除去と
//!   APIバージョンの抽出・検証

// Domain layer modules
pub mod domain;

// Application layer modules
pub mod application;

// Infrastructure layer modules
pub mod infrastructure;
