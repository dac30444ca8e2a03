//! Business services containing domain logic and use cases.

pub mod auth;
pub mod gate;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Registration};
pub use gate::{AuthenticatedSubject, Authenticator, RequestGate};
pub use password::PasswordHasher;
pub use token::{TokenService, TokenServiceConfig};
