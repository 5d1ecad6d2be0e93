/// ヘルスチェックHTTP Lambdaエントリポイント
///
/// API Gateway経由のHTTPリクエストを処理し、サービスの稼働状態を返す。
/// 認可用のSecrets Managerクライアントと各チェック用のAWSクライアントを
/// 初期化時に一度だけ構築し、リクエストごとに共有する。
use std::sync::Arc;

use lambda_http::{Error, Request, run, service_fn};
use tracing::info;

use auth::application::RequestAuthorizer;
use auth::infrastructure::{AwsSecretsManagerOps, init_logging};
use health::application::HealthHandler;
use health::infrastructure::{AwsBucketCheck, AwsQueueCheck, AwsTableCheck, HealthConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ヘルスチェックLambda関数を初期化");

    // 環境変数から設定を読み込み
    let config = HealthConfig::from_env()?;

    // 環境からAWS設定を読み込み（認証情報、リージョンなど）
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let authorizer = RequestAuthorizer::new(Arc::new(AwsSecretsManagerOps::new(
        aws_sdk_secretsmanager::Client::new(&aws_config),
    )));

    let handler = Arc::new(HealthHandler::new(
        config,
        authorizer,
        AwsTableCheck::new(aws_sdk_dynamodb::Client::new(&aws_config)),
        AwsQueueCheck::new(aws_sdk_sqs::Client::new(&aws_config)),
        AwsBucketCheck::new(aws_sdk_s3::Client::new(&aws_config)),
    ));

    // Lambda関数を実行
    run(service_fn(move |request: Request| {
        let handler = handler.clone();
        async move { handler.handle(&request).await }
    }))
    .await
}
