//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Signing material for one token class
struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for issuing and verifying access and refresh tokens
///
/// The two token classes are signed with distinct secrets and carry a type
/// tag, so a token of one class is never accepted where the other is required.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    access_keys: TokenKeys,
    refresh_keys: TokenKeys,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Denylist for revoked access tokens
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            repository,
            access_keys: TokenKeys::from_secret(&config.access_secret),
            refresh_keys: TokenKeys::from_secret(&config.refresh_secret),
            config,
            validation,
        }
    }

    fn keys(&self, token_type: TokenType) -> &TokenKeys {
        match token_type {
            TokenType::Access => &self.access_keys,
            TokenType::Refresh => &self.refresh_keys,
        }
    }

    /// Builds a fresh claim set for `user`
    pub fn claims_for(&self, user: &User, token_type: TokenType) -> Claims {
        let lifetime = match token_type {
            TokenType::Access => self.config.access_token_expiry,
            TokenType::Refresh => self.config.refresh_token_expiry,
        };
        Claims::new(
            user.id,
            user.email.clone(),
            token_type,
            self.config.issuer.clone(),
            self.config.audience.clone(),
            Utc::now(),
            lifetime,
        )
    }

    /// Signs claims with the secret belonging to their type tag
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.keys(claims.token_type).encoding,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Issues a short-lived access token
    pub fn issue_access_token(&self, user: &User) -> Result<String, DomainError> {
        self.encode_claims(&self.claims_for(user, TokenType::Access))
    }

    /// Issues a long-lived refresh token
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, DomainError> {
        self.encode_claims(&self.claims_for(user, TokenType::Refresh))
    }

    /// Issues a new access/refresh pair
    pub fn generate_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        Ok(TokenPair::new(
            self.issue_access_token(user)?,
            self.issue_refresh_token(user)?,
        ))
    }

    /// Verifies a token against the class it is expected to be
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience, expiry and type tag all check out
    /// * `Err(TokenError::TokenExpired)` - Signature is valid but the token is past its expiry
    /// * `Err(TokenError::WrongTokenType)` - The token belongs to the other class
    /// * `Err(TokenError::InvalidToken)` - Anything else
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, DomainError> {
        match decode::<Claims>(token, &self.keys(expected).decoding, &self.validation) {
            Ok(data) if data.claims.token_type == expected => Ok(data.claims),
            Ok(_) => Err(TokenError::WrongTokenType.into()),
            Err(e) => Err(self.classify_failure(token, expected, e.kind()).into()),
        }
    }

    fn classify_failure(&self, token: &str, expected: TokenType, kind: &ErrorKind) -> TokenError {
        match kind {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => {
                let other = match expected {
                    TokenType::Access => TokenType::Refresh,
                    TokenType::Refresh => TokenType::Access,
                };
                match decode::<Claims>(token, &self.keys(other).decoding, &self.validation) {
                    Ok(_) => TokenError::WrongTokenType,
                    Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                        TokenError::WrongTokenType
                    }
                    Err(_) => TokenError::InvalidToken,
                }
            }
            _ => TokenError::InvalidToken,
        }
    }

    /// Verifies an access token and rejects revoked ones
    ///
    /// A denylist lookup failure is logged and treated as not revoked.
    pub async fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify(token, TokenType::Access)?;

        match self.repository.is_token_blacklisted(&claims.jti).await {
            Ok(true) => Err(TokenError::TokenRevoked.into()),
            Ok(false) => Ok(claims),
            Err(e) => {
                tracing::warn!(error = %e, "Token denylist lookup failed, accepting token");
                Ok(claims)
            }
        }
    }

    /// Verifies a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenType::Refresh)
    }

    /// Adds the token identified by `claims` to the denylist until it expires
    pub async fn revoke(&self, claims: &Claims) -> Result<(), DomainError> {
        self.repository
            .blacklist_token(&claims.jti, claims.expires_at())
            .await
    }
}
