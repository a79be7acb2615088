use chrono::{DateTime, Duration, Utc};
use cineshelf_model::{RoleClaim, User};
use sqlx::PgPool;
use tracing::info;

use super::{password, session};
use crate::database::{SessionRepository, UserRepository};
use crate::error::{CatalogError, Result};

/// Session issued on a successful login. The raw token goes into the
/// client's cookie and is never stored.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: PgPool, session_ttl_days: i64) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            session_ttl: Duration::days(session_ttl_days),
        }
    }

    /// Verify credentials, then the role claim, then open a session.
    ///
    /// The credential check always runs first: a wrong password on an admin
    /// claim reports `InvalidCredentials`, not the admin gate message.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        claim: RoleClaim,
    ) -> Result<(User, IssuedSession)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(CatalogError::InvalidCredentials);
        }

        authorize_claim(user.is_admin, claim)?;

        let token = session::generate_token();
        let expires_at = Utc::now() + self.session_ttl;
        self.sessions
            .create(user.id, &session::hash_token(&token), expires_at)
            .await?;

        info!(user = %user.email, role = claim.as_str(), "login succeeded");
        Ok((user, IssuedSession { token, expires_at }))
    }

    /// Resolve a presented session token to its user, if the session is
    /// still live.
    pub async fn resolve(&self, token: &str) -> Result<Option<User>> {
        self.sessions
            .resolve_user(&session::hash_token(token))
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.revoke(&session::hash_token(token)).await
    }
}

/// The deliberate extra gate on top of credential verification: claiming
/// the admin role without the admin flag is an authorization failure even
/// though the password was right.
pub fn authorize_claim(is_admin: bool, claim: RoleClaim) -> Result<()> {
    match claim {
        RoleClaim::Admin if !is_admin => Err(CatalogError::NotAuthorizedAsAdmin),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_claim_requires_admin_flag() {
        assert!(matches!(
            authorize_claim(false, RoleClaim::Admin),
            Err(CatalogError::NotAuthorizedAsAdmin)
        ));
        assert!(authorize_claim(true, RoleClaim::Admin).is_ok());
    }

    #[test]
    fn user_claim_is_always_accepted() {
        assert!(authorize_claim(false, RoleClaim::User).is_ok());
        // Admins may log in with the plain user role.
        assert!(authorize_claim(true, RoleClaim::User).is_ok());
    }
}
