// src/infrastructure/repositories/sqlite_user.rs
use super::audit_entries::{insert_entries, insert_entry};
use super::map_sqlx;
use crate::domain::audit::NewAuditEntry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    NewUser, PasswordHash, User, UserId, UserRepository, UserUpdate, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse()?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, new_user: NewUser, creation: NewAuditEntry) -> DomainResult<User> {
        let NewUser {
            username,
            password_hash,
            role,
            is_active,
            created_at,
        } = new_user;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password_hash, role, is_active, created_at)
             VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, password_hash, role, is_active, created_at",
        )
        .bind(username.as_str())
        .bind(password_hash.as_str())
        .bind(role.as_str())
        .bind(is_active)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        insert_entry(&mut tx, &creation.with_entity_id(row.id))
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        User::try_from(row)
    }

    async fn update(&self, update: UserUpdate, changes: Vec<NewAuditEntry>) -> DomainResult<User> {
        let UserUpdate {
            id,
            username,
            role,
            is_active,
            password_hash,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users
                SET username = ?, role = ?, is_active = ?, password_hash = COALESCE(?, password_hash)
              WHERE id = ?
            RETURNING id, username, password_hash, role, is_active, created_at",
        )
        .bind(username.as_str())
        .bind(role.as_str())
        .bind(is_active)
        .bind(password_hash.as_ref().map(|hash| hash.as_str()))
        .bind(i64::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        insert_entries(&mut tx, &changes).await.map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        User::try_from(row)
    }

    async fn delete(&self, id: UserId, deletion: NewAuditEntry) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        insert_entry(&mut tx, &deletion).await.map_err(map_sqlx)?;

        // created_by / updated_by / audit_log.user_id are ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("user not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, is_active, created_at
             FROM users WHERE username = ?",
        )
        .bind(username.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, is_active, created_at
             FROM users WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, is_active, created_at
             FROM users ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }
}
