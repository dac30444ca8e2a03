//! User repository trait defining the interface for user data persistence.
//!
//! Implementations enforce uniqueness of email and phone and report
//! violations as `AuthError::DuplicateEmail` / `AuthError::DuplicatePhone`,
//! so callers never see store-specific error shapes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email, including the password hash
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find any user holding either the email or the phone number
    ///
    /// Used as a single existence query during registration; the caller
    /// inspects the returned record to tell which field collided. When the
    /// email and phone belong to different users, the email holder is returned.
    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Errors
    /// * `AuthError::DuplicateEmail` / `AuthError::DuplicatePhone` on a unique violation
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user record
    ///
    /// # Errors
    /// * `DomainError::NotFound` if no user has this id
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
