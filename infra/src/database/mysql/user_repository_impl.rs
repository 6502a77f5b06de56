//! MySQL implementation of the UserRepository trait.
//!
//! The password reset is a single conditional `UPDATE` matching both the
//! token and an unexpired expiry, so concurrent redemptions of one token can
//! affect at most one row in total.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sm_core::domain::entities::user::{NewUser, Role, User};
use sm_core::errors::DomainError;
use sm_core::repositories::UserRepository;

use super::db_error;

const USER_COLUMNS: &str =
    "id, name, email, password, role, reset_token, reset_token_expiry, created_at";

/// MySQL implementation of UserRepository
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
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| db_error("Failed to get role", e))?;

        Ok(User {
            id: row.try_get("id").map_err(|e| db_error("Failed to get id", e))?,
            name: row
                .try_get("name")
                .map_err(|e| db_error("Failed to get name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| db_error("Failed to get email", e))?,
            password_hash: row
                .try_get("password")
                .map_err(|e| db_error("Failed to get password", e))?,
            role: role
                .parse::<Role>()
                .map_err(|message| DomainError::Internal { message })?,
            reset_token: row
                .try_get("reset_token")
                .map_err(|e| db_error("Failed to get reset_token", e))?,
            reset_token_expiry: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_expiry")
                .map_err(|e| db_error("Failed to get reset_token_expiry", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }

    async fn fetch_one_where(&self, condition: &str, value: impl ToString) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, condition);

        let result = sqlx::query(&query)
            .bind(value.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Database query failed", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (name, email, password, role)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Conflict {
                    message: "Email already exists".to_string(),
                },
                other => db_error("Failed to create user", other),
            })?;

        Ok(User {
            id: result.last_insert_id() as i64,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            reset_token: None,
            reset_token_expiry: None,
            created_at: Utc::now(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email", email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Database query failed", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY created_at DESC, id DESC", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list users", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET reset_token = ?, reset_token_expiry = ?
            WHERE email = ?
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .bind(expires_at)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store reset token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn reset_password(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password = ?, reset_token = NULL, reset_token_expiry = NULL
            WHERE reset_token = ? AND reset_token_expiry > ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(token)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to reset password", e))?;

        Ok(result.rows_affected() > 0)
    }
}
