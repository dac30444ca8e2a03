//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    /// Reject login for accounts whose email or phone is unverified.
    /// Off by default: only refresh and protected routes require verification.
    pub require_verification_on_login: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            require_verification_on_login: false,
        }
    }
}
