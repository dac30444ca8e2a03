//! Main authentication service implementation

use std::sync::Arc;

use bomato_shared::utils::validation::{check_password_strength, mask_email, normalize_email};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::{ProfileUpdate, User};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::persistence::prepare_user_for_save;

const DECOY_PASSWORD: &str = "bomato-decoy-password";

/// Input for account registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Authentication service orchestrating the credential store, hasher and tokens
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    /// Password hasher
    password_hasher: PasswordHasher,
    /// Service configuration
    config: AuthServiceConfig,
    /// Hash checked when a login names an unknown email
    decoy_hash: OnceCell<String>,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `password_hasher` - Hasher for stored credentials
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        password_hasher: PasswordHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            config,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Checks the password policy
    /// 2. Runs a single existence query on email or phone and reports which collided
    /// 3. Hashes the password and stores the user with both verification flags false
    /// 4. Issues an access/refresh token pair
    ///
    /// # Errors
    ///
    /// * `AuthError::WeakPassword` - Password fails the policy
    /// * `AuthError::DuplicateEmail` / `AuthError::DuplicatePhone` - Already registered
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is currently disabled".to_string(),
            });
        }
        ensure_password_policy(&registration.password)?;

        let email = normalize_email(&registration.email);
        let phone = registration.phone.trim().to_string();

        if let Some(existing) = self
            .user_repository
            .find_by_email_or_phone(&email, &phone)
            .await?
        {
            let error = if existing.email == email {
                AuthError::DuplicateEmail
            } else {
                AuthError::DuplicatePhone
            };
            tracing::info!(email = %mask_email(&email), error = %error, "Registration rejected");
            return Err(error.into());
        }

        let mut user = User::new(
            registration.name.trim().to_string(),
            email,
            phone,
            String::new(),
        );
        prepare_user_for_save(&mut user, Some(&registration.password), &self.password_hasher)
            .await?;
        let user = self.user_repository.create(user).await?;

        let tokens = self.token_service.generate_tokens(&user)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthResponse::new(&user, tokens))
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password fail with the same
    /// `AuthError::InvalidCredentials`. Verification flags are only checked
    /// when `require_verification_on_login` is set.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let Some(mut user) = self.user_repository.find_by_email(&email).await? else {
            self.verify_decoy(password).await;
            tracing::warn!(email = %mask_email(&email), "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await
        {
            tracing::warn!(email = %mask_email(&email), "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        if self.config.require_verification_on_login && !user.is_fully_verified() {
            return Err(AuthError::VerificationRequired.into());
        }

        user.touch();
        let user = self.user_repository.update(user).await?;

        let tokens = self.token_service.generate_tokens(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthResponse::new(&user, tokens))
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// A new refresh token is issued on every call.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingRefreshToken` - Empty token
    /// * `TokenError::*` - Token invalid, expired or not a refresh token
    /// * `AuthError::UserNotFound` - Subject deleted after issuance
    /// * `AuthError::VerificationRequired` - Email or phone not verified
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(AuthError::MissingRefreshToken.into());
        }

        let claims = self
            .token_service
            .verify_refresh_token(refresh_token)
            .inspect_err(|e| tracing::warn!(error = %e, "Refresh token rejected"))?;

        let user = self
            .user_repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_fully_verified() {
            return Err(AuthError::VerificationRequired.into());
        }

        self.token_service.generate_tokens(&user)
    }

    /// Replace the password after checking the current one
    ///
    /// The new password is checked against the policy before the store is read.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        ensure_password_policy(new_password)?;

        let mut user = self.load_user(user_id).await?;

        if !self
            .password_hasher
            .verify(current_password, &user.password_hash)
            .await
        {
            return Err(AuthError::InvalidCurrentPassword.into());
        }

        prepare_user_for_save(&mut user, Some(new_password), &self.password_hasher).await?;
        self.user_repository.update(user).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Merge name, avatar and preferences into the user record
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> DomainResult<User> {
        let mut user = self.load_user(user_id).await?;

        user.apply_profile_update(update);
        prepare_user_for_save(&mut user, None, &self.password_hasher).await?;

        self.user_repository.update(user).await
    }

    /// Revoke the access token described by `claims`
    ///
    /// Always succeeds from the caller's view; a denylist failure is logged.
    pub async fn logout(&self, claims: &Claims) -> DomainResult<()> {
        if let Err(e) = self.token_service.revoke(claims).await {
            tracing::error!(user_id = %claims.user_id, error = %e, "Failed to revoke access token");
        } else {
            tracing::info!(user_id = %claims.user_id, "User logged out");
        }
        Ok(())
    }

    /// Spend one bcrypt verification so unknown emails cost as much as wrong passwords
    async fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.password_hasher.hash(DECOY_PASSWORD))
            .await;
        match decoy {
            Ok(hash) => {
                self.password_hasher.verify(password, hash).await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to prepare decoy password hash"),
        }
    }

    #[cfg(test)]
    pub(crate) fn has_decoy_hash(&self) -> bool {
        self.decoy_hash.initialized()
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

fn ensure_password_policy(password: &str) -> DomainResult<()> {
    check_password_strength(password).map_err(|rule| {
        AuthError::WeakPassword {
            reason: rule.message().to_string(),
        }
        .into()
    })
}
