// Infrastructure layer modules
pub mod logging;
pub mod secrets_ops;

// Re-exports
pub use logging::init_logging;
pub use secrets_ops::{AwsSecretsManagerOps, SecretsOps, SecretsOpsError};
