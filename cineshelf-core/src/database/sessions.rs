use chrono::{DateTime, Utc};
use cineshelf_model::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Server-side sessions keyed by the SHA-256 hash of the opaque token.
///
/// The raw token only ever lives in the client's cookie; a database leak
/// does not leak usable sessions.
#[derive(Clone, Debug)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Resolve a token hash to its user, ignoring revoked and expired rows.
    pub async fn resolve_user(&self, token_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.display_name, u.password_hash, \
                    u.is_admin, u.created_at \
             FROM sessions s \
             JOIN users u ON u.id = s.user_id \
             WHERE s.token_hash = $1 AND NOT s.revoked AND s.expires_at > now()",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Revoking an unknown or already revoked token is a no-op.
    pub async fn revoke(&self, token_hash: &str) -> Result<()> {
        sqlx::query("UPDATE sessions SET revoked = TRUE WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
