//! Pre-persistence transformation for user records

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::services::password::PasswordHasher;

/// Prepares a user record for a save call.
///
/// - hashes `new_password` when one is given; the stored hash is untouched otherwise
/// - keeps only the first address flagged default
/// - refreshes `updated_at`
pub async fn prepare_user_for_save(
    user: &mut User,
    new_password: Option<&str>,
    hasher: &PasswordHasher,
) -> Result<(), DomainError> {
    if let Some(password) = new_password {
        user.password_hash = hasher.hash(password).await?;
    }
    user.normalize_default_address();
    user.touch();
    Ok(())
}
