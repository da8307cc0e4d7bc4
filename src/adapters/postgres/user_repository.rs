//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access::Tier;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::users::User;
use crate::ports::UserRepository;

use super::{parse_role, parse_tier};

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    role: String,
    tier: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            role: parse_role(&row.role)?,
            tier: parse_tier(&row.tier)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, role, tier, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.tier.as_str())
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if matches!(
                    db_err.constraint(),
                    Some("users_username_key") | Some("users_email_key")
                ) {
                    return DomainError::validation(
                        "username",
                        "Username or email already taken",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save user: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET username = $2, email = $3, role = $4, tier = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.tier.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update user: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, tier, created_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load user: {}", e))
        })?;

        row.map(User::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, tier, created_at
            FROM users ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list users: {}", e))
        })?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn count_by_tier(&self, tier: Tier) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE tier = $1"#)
            .bind(tier.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count users: {}", e),
                )
            })?;

        Ok(count as u64)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete user: {}", e),
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::Role;

    #[test]
    fn row_with_unknown_role_fails_conversion() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            role: "superuser".to_string(),
            tier: "free".to_string(),
            created_at: Utc::now(),
        };
        assert!(User::try_from(row).is_err());
    }

    #[test]
    fn row_converts_to_user() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            role: "admin".to_string(),
            tier: "premium".to_string(),
            created_at: Utc::now(),
        };
        let user = User::try_from(row).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.tier, Tier::Premium);
    }
}
