// Domain layer modules
pub mod auth_request;
pub mod auth_result;
pub mod deprecation;
pub mod path_normalizer;

// Re-exports
pub use auth_request::AuthRequest;
pub use auth_result::{AuthMethod, AuthResult};
pub use deprecation::add_deprecation_headers;
pub use path_normalizer::{
    DEFAULT_API_VERSION, extract_api_version, is_valid_api_version, normalize_api_path,
};
