//! Request and response bodies for the auth routes
//!
//! Every request field defaults when absent so that missing input is
//! reported as a field validation failure rather than a JSON parse error.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use bomato_core::domain::entities::user::{PreferencesPatch, ProfileUpdate, UserProfile};
use bomato_core::services::auth::Registration;
use bomato_shared::utils::validation::{
    check_password_strength, is_valid_email, is_valid_name, is_valid_phone, is_valid_url,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_avatar"))]
    pub avatar: Option<String>,
    pub preferences: Option<PreferencesPatch>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            avatar: request.avatar,
            preferences: request.preferences,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(custom(function = "validate_new_password"))]
    pub new_password: String,
}

/// `data` payload for routes that return the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user: UserProfile,
}

impl From<UserProfile> for UserData {
    fn from(user: UserProfile) -> Self {
        Self { user }
    }
}

fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(invalid("length", "Name must be between 2 and 50 characters"))
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid("email", "Please provide a valid email address"))
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(invalid("phone", "Please provide a valid phone number"))
    }
}

fn validate_avatar(avatar: &str) -> Result<(), ValidationError> {
    if is_valid_url(avatar) {
        Ok(())
    } else {
        Err(invalid("url", "Avatar must be a valid URL"))
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_password_strength(password).map_err(|rule| invalid("password", rule.message()))
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    check_password_strength(password)
        .map_err(|rule| invalid("password", format!("New {}", rule.message().to_lowercase())))
}
