/// Authorization method classification
///
/// Closed set of credential schemes the request authorizer can decide on.
/// The two legacy variants are kept for backward compatibility during the
/// migration window and always carry a deprecation marker on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Shared key presented via the X-API-Key header
    SharedKey,

    /// Deprecated: API Gateway native API-key identity from the request context
    LegacyApiGateway,

    /// Deprecated: Bearer token in the Authorization header
    LegacyBearer,

    /// No method succeeded
    None,
}

impl AuthMethod {
    /// Wire string used in logs and the X-Auth-Method debug header
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::SharedKey => "shared-key",
            AuthMethod::LegacyApiGateway => "legacy-api-gateway",
            AuthMethod::LegacyBearer => "legacy-bearer",
            AuthMethod::None => "none",
        }
    }

    /// Whether this method is scheduled for removal
    pub fn is_legacy(&self) -> bool {
        matches!(self, AuthMethod::LegacyApiGateway | AuthMethod::LegacyBearer)
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorization attempt
///
/// Invariants, enforced by the constructors:
/// - `method == None` if and only if `authorized == false`
/// - `deprecated == true` only for the legacy methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResult {
    authorized: bool,
    method: AuthMethod,
    deprecated: bool,
}

impl AuthResult {
    /// Successful result for a concrete method
    ///
    /// The deprecation marker is derived from the method; callers cannot
    /// attach one to the shared-key path.
    pub fn granted(method: AuthMethod) -> Self {
        debug_assert!(
            method != AuthMethod::None,
            "granted requires a concrete method"
        );
        Self {
            authorized: method != AuthMethod::None,
            method,
            deprecated: method.is_legacy(),
        }
    }

    /// The uniform failure result: every failure mode collapses to this
    pub fn denied() -> Self {
        Self {
            authorized: false,
            method: AuthMethod::None,
            deprecated: false,
        }
    }

    pub fn authorized(&self) -> bool {
        self.authorized
    }

    pub fn method(&self) -> AuthMethod {
        self.method
    }

    /// Whether the successful method is scheduled for removal
    pub fn deprecated(&self) -> bool {
        self.deprecated
    }
}
