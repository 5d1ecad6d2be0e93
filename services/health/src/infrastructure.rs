// Infrastructure layer modules
pub mod config;
pub mod dynamodb_ops;
pub mod s3_ops;
pub mod sqs_ops;

// Re-exports
pub use config::{DeprecationConfig, HealthConfig, HealthConfigError};
pub use dynamodb_ops::{AwsTableCheck, TableCheckError, TableCheckOps};
pub use s3_ops::{AwsBucketCheck, BucketCheckError, BucketCheckOps};
pub use sqs_ops::{AwsQueueCheck, QueueCheckError, QueueCheckOps};
