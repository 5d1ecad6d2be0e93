//! Gateway path normalization
//!
//! The shared API Gateway routes to backend services by inserting a service
//! prefix segment (`/nightingale/v1/...`). Backends must see their canonical
//! local path (`/v1/...`), so the prefix is stripped here before any routing
//! logic runs. Stripping is segment-exact: a segment that merely starts with
//! the prefix characters (`/nightingale-extra/...`) is left alone.

/// API version accepted when a path carries no explicit version segment
pub const DEFAULT_API_VERSION: &str = "v1";

/// Strip the gateway service prefix from a raw request path
///
/// - empty path => `"/"`
/// - empty prefix => path with a leading `/` guaranteed, nothing stripped
/// - `"/" + prefix` exactly => `"/"`
/// - `"/" + prefix + "/..."` => the remainder starting at that `/`, verbatim
/// - anything else is returned unchanged
///
/// Idempotent: normalizing an already-normalized path is a no-op.
pub fn normalize_api_path(raw_path: &str, service_prefix: &str) -> String {
    if raw_path.is_empty() {
        return "/".to_string();
    }

    let path = if raw_path.starts_with('/') {
        raw_path.to_string()
    } else {
        format!("/{raw_path}")
    };

    if service_prefix.is_empty() {
        return path;
    }

    let pattern = format!("/{service_prefix}");
    if path == pattern {
        return "/".to_string();
    }

    // Segment boundary: the character after the prefix must be '/'
    if let Some(rest) = path.strip_prefix(&pattern) {
        if rest.starts_with('/') {
            return rest.to_string();
        }
    }

    path
}

/// Extract a leading `/v<digits>/` version segment
///
/// Returns `None` for non-versioned paths, versions not at position 0, and
/// malformed markers (`/v/`, `/vX/`, `/v1test`).
pub fn extract_api_version(path: &str) -> Option<String> {
    let rest = path.strip_prefix("/v")?;

    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_len == 0 {
        return None;
    }

    // The version segment must be terminated by a path separator
    if rest.as_bytes().get(digits_len) != Some(&b'/') {
        return None;
    }

    Some(format!("v{}", &rest[..digits_len]))
}

/// Check whether a path's version segment matches the expected version
///
/// Non-versioned paths (health checks and the like) are always valid.
pub fn is_valid_api_version(path: &str, expected_version: &str) -> bool {
    match extract_api_version(path) {
        None => true,
        Some(version) => version == expected_version,
    }
}
