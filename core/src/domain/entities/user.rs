//! User entity representing a customer account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag describing what kind of place an address is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

/// A saved delivery address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub is_default: bool,
}

/// Free-form ordering preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,
}

/// Partial preferences; present fields replace, absent fields are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub cuisine: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub default_payment_method: Option<String>,
}

/// Profile fields a user may change about themselves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub preferences: Option<PreferencesPatch>,
}

/// Represents a user in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Lower-cased email address, globally unique
    pub email: String,

    /// Phone number, globally unique
    pub phone: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Avatar URL
    pub avatar: Option<String>,

    /// Saved addresses, at most one flagged default
    #[serde(default)]
    pub addresses: Vec<Address>,

    #[serde(default)]
    pub preferences: UserPreferences,

    pub email_verified: bool,

    pub phone_verified: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with an already hashed password
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            avatar: None,
            addresses: Vec::new(),
            preferences: UserPreferences::default(),
            email_verified: false,
            phone_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Both email and phone have been confirmed
    pub fn is_fully_verified(&self) -> bool {
        self.email_verified && self.phone_verified
    }

    /// The address flagged default, else the first address
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|address| address.is_default)
            .or_else(|| self.addresses.first())
    }

    /// Clears the default flag on every address after the first flagged one
    pub fn normalize_default_address(&mut self) {
        let mut seen_default = false;
        for address in &mut self.addresses {
            if address.is_default {
                if seen_default {
                    address.is_default = false;
                }
                seen_default = true;
            }
        }
    }

    /// Merges name, avatar and preferences; preferences merge shallowly
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(patch) = update.preferences {
            if let Some(cuisine) = patch.cuisine {
                self.preferences.cuisine = cuisine;
            }
            if let Some(dietary_restrictions) = patch.dietary_restrictions {
                self.preferences.dietary_restrictions = dietary_restrictions;
            }
            if let Some(method) = patch.default_payment_method {
                self.preferences.default_payment_method = Some(method);
            }
        }
    }

    /// Updates the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Public projection without credentials
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Outward-facing view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub addresses: Vec<Address>,
    pub preferences: UserPreferences,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
            addresses: user.addresses.clone(),
            preferences: user.preferences.clone(),
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
