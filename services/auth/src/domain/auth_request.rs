use std::collections::HashMap;

/// Inbound request view inspected by the authorizer
///
/// Header names are lower-cased once at construction, so lookups are
/// case-insensitive without depending on any runtime-specific container
/// (`X-API-Key` and `x-api-key` collapse to one logical header).
/// The optional legacy identity marker is the API-key identity the hosting
/// platform's request context carries for the deprecated gateway scheme.
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    headers: HashMap<String, String>,
    legacy_api_key: Option<String>,
}

impl AuthRequest {
    /// Empty request (no headers, no legacy identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any iterator of header name/value pairs
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();

        Self {
            headers,
            legacy_api_key: None,
        }
    }

    /// Build from an `http::HeaderMap` (non-UTF-8 values are skipped)
    pub fn from_header_map(map: &http::HeaderMap) -> Self {
        Self::from_headers(
            map.iter()
                .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?))),
        )
    }

    /// Attach the legacy API Gateway identity marker
    pub fn with_legacy_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.legacy_api_key = Some(api_key.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn legacy_api_key(&self) -> Option<&str> {
        self.legacy_api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = AuthRequest::from_headers([("X-API-Key", "secret-value")]);

        assert_eq!(request.header("x-api-key"), Some("secret-value"));
        assert_eq!(request.header("X-API-Key"), Some("secret-value"));
        assert_eq!(request.header("X-Api-Key"), Some("secret-value"));
    }

    #[test]
    fn test_mixed_case_spellings_collapse_to_one_header() {
        // 大文字・小文字の両表記は同一の論理ヘッダーとして扱う
        let request =
            AuthRequest::from_headers([("X-API-Key", "value-a"), ("x-api-key", "value-b")]);

        let value = request.header("x-api-key");
        assert!(value == Some("value-a") || value == Some("value-b"));
    }

    #[test]
    fn test_missing_header_returns_none() {
        let request = AuthRequest::new();

        assert_eq!(request.header("x-api-key"), None);
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn test_from_header_map() {
        let mut map = HeaderMap::new();
        map.insert("X-API-Key", HeaderValue::from_static("from-map"));
        map.insert("Authorization", HeaderValue::from_static("Bearer token"));

        let request = AuthRequest::from_header_map(&map);

        assert_eq!(request.header("x-api-key"), Some("from-map"));
        assert_eq!(request.header("authorization"), Some("Bearer token"));
    }

    #[test]
    fn test_legacy_api_key_marker() {
        let request = AuthRequest::new().with_legacy_api_key("gateway-key-123");

        assert_eq!(request.legacy_api_key(), Some("gateway-key-123"));
        assert_eq!(AuthRequest::new().legacy_api_key(), None);
    }
}
