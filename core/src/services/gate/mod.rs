//! Request gate: turns a bearer credential into an authenticated subject
//!
//! The HTTP layer holds the gate as `Arc<dyn Authenticator>` so that
//! middleware stays independent of the concrete repositories.

mod service;


pub use service::{extract_bearer_token, AuthenticatedSubject, Authenticator, RequestGate};
