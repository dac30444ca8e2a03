//! MySQL implementation of the UserRepository trait.
//!
//! Addresses and preferences are stored as JSON columns; the unique keys
//! `uk_users_email` and `uk_users_phone` enforce account uniqueness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, types::Json, MySqlPool, Row};
use uuid::Uuid;

use bomato_core::domain::entities::user::{Address, User, UserPreferences};
use bomato_core::errors::{AuthError, DomainError, ValidationError};
use bomato_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, name, email, phone, password_hash, avatar, addresses, preferences,
    email_verified, phone_verified, created_at, updated_at
"#;

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = column(row, "id")?;
        let addresses: Json<Vec<Address>> = column(row, "addresses")?;
        let preferences: Json<UserPreferences> = column(row, "preferences")?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| {
                tracing::error!("Invalid UUID in users.id '{}': {}", id, e);
                DomainError::from(ValidationError::InvalidId)
            })?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            password_hash: column(row, "password_hash")?,
            avatar: column(row, "avatar")?,
            addresses: addresses.0,
            preferences: preferences.0,
            email_verified: column(row, "email_verified")?,
            phone_verified: column(row, "phone_verified")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        binds: &[&str],
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, condition);

        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }

        let row = query.fetch_optional(&self.pool).await.map_err(map_sqlx_error)?;
        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Translate a SQLx error into the domain error callers expect
fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return duplicate_key_error(db_error.message());
        }
    }

    tracing::error!("Database query failed: {}", error);
    DomainError::internal(format!("Database query failed: {}", error))
}

/// Pick the duplicate error from a MySQL "Duplicate entry ... for key ..." message
pub(crate) fn duplicate_key_error(message: &str) -> DomainError {
    let key = message.rsplit("for key").next().unwrap_or_default();

    if key.contains("uk_users_email") {
        AuthError::DuplicateEmail.into()
    } else if key.contains("uk_users_phone") {
        AuthError::DuplicatePhone.into()
    } else {
        ValidationError::DuplicateValue {
            field: String::from("value"),
        }
        .into()
    }
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<Json<serde_json::Value>, DomainError> {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| DomainError::internal(format!("Failed to encode JSON column: {}", e)))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ?", &[email]).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let id = id.to_string();
        self.fetch_one_where("id = ?", &[id.as_str()]).await
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        self.fetch_one_where(
            "email = ? OR phone = ? ORDER BY (email = ?) DESC",
            &[email, phone, email],
        )
        .await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, phone, password_hash, avatar, addresses, preferences,
                email_verified, phone_verified, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(&user.avatar)
            .bind(encode_json(&user.addresses)?)
            .bind(encode_json(&user.preferences)?)
            .bind(user.email_verified)
            .bind(user.phone_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, phone = ?, password_hash = ?, avatar = ?,
                addresses = ?, preferences = ?, email_verified = ?, phone_verified = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(&user.avatar)
            .bind(encode_json(&user.addresses)?)
            .bind(encode_json(&user.preferences)?)
            .bind(user.email_verified)
            .bind(user.phone_verified)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows when nothing changed, so confirm the row exists
            if self.find_by_id(user.id).await?.is_none() {
                return Err(DomainError::NotFound {
                    resource: format!("User {}", user.id),
                });
            }
        }

        Ok(user)
    }
}
