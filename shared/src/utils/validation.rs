//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length accepted by the password policy
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Display name length bounds (inclusive)
pub const NAME_LENGTH: (usize, usize) = (2, 50);

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("phone regex is valid"));

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex is valid"));

/// Password policy failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    TooShort,
    MissingCharacterClass,
}

impl PasswordRule {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::TooShort => "Password must be at least 8 characters long",
            PasswordRule::MissingCharacterClass => {
                "Password must contain at least one uppercase letter, one lowercase letter, and one number"
            }
        }
    }
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Check a password against the policy: at least 8 characters with one
/// uppercase letter, one lowercase letter and one digit.
pub fn check_password_strength(password: &str) -> Result<(), PasswordRule> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordRule::TooShort);
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(PasswordRule::MissingCharacterClass)
    }
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone.trim())
}

pub fn is_valid_url(url: &str) -> bool {
    URL_REGEX.is_match(url.trim())
}

/// Check the trimmed length of a display name
pub fn is_valid_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (NAME_LENGTH.0..=NAME_LENGTH.1).contains(&len)
}

/// Mask an email for logging: `ann@example.com` -> `a**@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match chars.next() {
                Some(first) => format!("{}{}@{}", first, "*".repeat(chars.count()), domain),
                None => format!("@{}", domain),
            }
        }
        None => "***".to_string(),
    }
}
