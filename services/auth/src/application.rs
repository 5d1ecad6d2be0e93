// Application layer modules
pub mod authorizer;

// Re-exports
pub use authorizer::{
    AuthorizeOptions, DEFAULT_LEGACY_BEARER_KEY_NAME, DEFAULT_LEGACY_GATEWAY_KEY_NAME,
    DEFAULT_SHARED_KEY_NAME, RequestAuthorizer, SecretReference,
};
