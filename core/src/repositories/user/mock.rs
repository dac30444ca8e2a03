//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository backed by a map
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    calls: Arc<AtomicUsize>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with users
    pub fn with_users(users: Vec<User>) -> Self {
        let map = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of repository operations performed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Directly read a stored user, bypassing the call counter
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Directly mutate a stored user, bypassing the call counter
    pub async fn modify<F>(&self, id: Uuid, f: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        }
    }

    /// Remove a stored user, bypassing the call counter
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().await.remove(&id)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.record_call();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.record_call();
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        self.record_call();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email)
            .or_else(|| users.values().find(|u| u.phone == phone))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.record_call();
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail.into());
        }
        if users.values().any(|u| u.phone == user.phone) {
            return Err(AuthError::DuplicatePhone.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.record_call();
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AuthError::DuplicateEmail.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
