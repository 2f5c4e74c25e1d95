/**
 * User Model and Credential Store
 *
 * This module defines the user record and the `UserStore` trait the rest
 * of the backend goes through for create/read/update operations.
 *
 * Two backends exist:
 * - `PgUserStore` - PostgreSQL via sqlx, the production backend
 * - `MemoryUserStore` - in-process HashMap, used in tests and as the
 *   fallback when no `DATABASE_URL` is configured
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

/// User record as persisted in the credential store
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Favorite driver identifiers
    pub favorite_driver_ids: Vec<String>,
    /// Favorite team identifiers
    pub favorite_team_ids: Vec<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for crate::shared::types::UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            favorite_driver_ids: user.favorite_driver_ids,
            favorite_team_ids: user.favorite_team_ids,
        }
    }
}

/// Fields for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub favorite_driver_ids: Vec<String>,
    pub favorite_team_ids: Vec<String>,
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub favorite_driver_ids: Option<Vec<String>>,
    pub favorite_team_ids: Option<Vec<String>>,
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique field collision; carries the human-readable field name
    #[error("{0} already exists")]
    Duplicate(&'static str),

    /// No user matched the lookup
    #[error("user not found")]
    NotFound,

    /// Backend failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create/read/update access to persisted user records.
///
/// The store performs no credential logic itself; password hashing and
/// verification stay in the handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, StoreError>;
}

/// PostgreSQL-backed credential store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at
            "#
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.favorite_driver_ids)
        .bind(&new_user.favorite_team_ids)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // Handlers pre-check both unique fields; this covers the
                // race between check and insert.
                Err(StoreError::Duplicate("Username or email"))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at
            FROM users
            WHERE username = $1
            "#
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at
            FROM users
            WHERE email = $1
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, StoreError> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                favorite_driver_ids = COALESCE($5, favorite_driver_ids),
                favorite_team_ids = COALESCE($6, favorite_team_ids),
                updated_at = $7
            WHERE id = $1
            RETURNING id, username, email, password_hash, favorite_driver_ids, favorite_team_ids, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(update.username)
        .bind(update.email)
        .bind(update.password_hash)
        .bind(update.favorite_driver_ids)
        .bind(update.favorite_team_ids)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(StoreError::NotFound)
    }
}

/// In-memory credential store
///
/// Mirrors the PostgreSQL backend's uniqueness rules so handler behavior
/// is identical across backends.
pub struct MemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate("Username"));
        }
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate("Email"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            favorite_driver_ids: new_user.favorite_driver_ids,
            favorite_team_ids: new_user.favorite_team_ids,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if let Some(username) = &update.username {
            if users.values().any(|u| u.id != id && &u.username == username) {
                return Err(StoreError::Duplicate("Username"));
            }
        }
        if let Some(email) = &update.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Duplicate("Email"));
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(ids) = update.favorite_driver_ids {
            user.favorite_driver_ids = ids;
        }
        if let Some(ids) = update.favorite_team_ids {
            user.favorite_team_ids = ids;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(name: &str, email: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            favorite_driver_ids: vec![],
            favorite_team_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryUserStore::new();
        let user = store.create_user(sample_user("alice", "a@x.com")).await.unwrap();
        assert_eq!(user.id, 1);

        let by_name = store.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        let by_email = store.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryUserStore::new();
        store.create_user(sample_user("alice", "a@x.com")).await.unwrap();

        let result = store.create_user(sample_user("alice", "other@x.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate("Username"))));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.create_user(sample_user("alice", "a@x.com")).await.unwrap();

        let result = store.create_user(sample_user("bob", "a@x.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate("Email"))));
    }

    #[tokio::test]
    async fn test_update_favorites() {
        let store = MemoryUserStore::new();
        let user = store.create_user(sample_user("alice", "a@x.com")).await.unwrap();

        let updated = store
            .update_user(
                user.id,
                UserUpdate {
                    favorite_driver_ids: Some(vec!["alonso".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.favorite_driver_ids, vec!["alonso".to_string()]);
        // Untouched fields survive a partial update
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let store = MemoryUserStore::new();
        let result = store.update_user(99, UserUpdate::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_to_taken_username_rejected() {
        let store = MemoryUserStore::new();
        store.create_user(sample_user("alice", "a@x.com")).await.unwrap();
        let bob = store.create_user(sample_user("bob", "b@x.com")).await.unwrap();

        let result = store
            .update_user(
                bob.id,
                UserUpdate {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate("Username"))));
    }

    #[tokio::test]
    async fn test_update_own_username_to_itself_allowed() {
        let store = MemoryUserStore::new();
        let alice = store.create_user(sample_user("alice", "a@x.com")).await.unwrap();

        let result = store
            .update_user(
                alice.id,
                UserUpdate {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_ok());
    }
}
