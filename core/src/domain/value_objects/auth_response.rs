//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserProfile};

/// Returned by registration and login: the public user record and a fresh token pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Public projection of the authenticated user
    pub user: UserProfile,

    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,
}

impl AuthResponse {
    pub fn new(user: &User, tokens: TokenPair) -> Self {
        Self {
            user: user.profile(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
