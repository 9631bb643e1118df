//! Session-based authentication over the users table.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use db::{DBService, models::user::User};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Session {
    pub token: Uuid,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-memory session store keyed by bearer token. Expired entries are
/// evicted on access and swept on each sign-in.
#[derive(Clone)]
pub struct AuthService {
    db: DBService,
    sessions: Arc<DashMap<Uuid, Session>>,
    ttl: Duration,
}

impl AuthService {
    pub fn new(db: DBService, ttl_minutes: i64) -> Self {
        Self {
            db,
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn hash_password(password: &str) -> String {
        let digest = Sha256::digest(password.as_bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = User::find_by_email(&self.db.pool, email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if Self::hash_password(password) != user.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        // Drop tokens that expired and were never looked up again
        self.sessions.retain(|_, session| session.expires_at > now);

        let session = Session {
            token: Uuid::new_v4(),
            user_email: user.email,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(session.token, session.clone());
        info!("user {} signed in", session.user_email);

        Ok(session)
    }

    /// Always succeeds; signing out an unknown token is a no-op.
    pub fn sign_out(&self, token: Uuid) {
        self.sessions.remove(&token);
    }

    pub fn session(&self, token: Uuid) -> Option<Session> {
        let session = self.sessions.get(&token).map(|entry| entry.clone())?;
        if session.expires_at <= Utc::now() {
            self.sessions.remove(&token);
            return None;
        }
        Some(session)
    }

    /// Create the initial admin account when the users table is empty.
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<(), sqlx::Error> {
        if User::count(&self.db.pool).await? > 0 {
            return Ok(());
        }
        User::create(&self.db.pool, email, &Self::hash_password(password)).await?;
        info!("seeded admin user {email}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service_with_user(ttl_minutes: i64) -> AuthService {
        let db = DBService::new_in_memory().await.unwrap();
        User::create(
            &db.pool,
            "admin@selectx.com.br",
            &AuthService::hash_password("s3cret"),
        )
        .await
        .unwrap();
        AuthService::new(db, ttl_minutes)
    }

    #[tokio::test]
    async fn sign_in_with_valid_credentials_yields_session() {
        let auth = service_with_user(60).await;
        let session = auth.sign_in("admin@selectx.com.br", "s3cret").await.unwrap();

        assert_eq!(session.user_email, "admin@selectx.com.br");
        assert!(auth.session(session.token).is_some());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = service_with_user(60).await;
        let err = auth
            .sign_in("admin@selectx.com.br", "nope")
            .await
            .expect_err("must reject");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let auth = service_with_user(60).await;
        let err = auth
            .sign_in("ghost@selectx.com.br", "s3cret")
            .await
            .expect_err("must reject");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_out_invalidates_the_token() {
        let auth = service_with_user(60).await;
        let session = auth.sign_in("admin@selectx.com.br", "s3cret").await.unwrap();

        auth.sign_out(session.token);
        assert!(auth.session(session.token).is_none());

        // Unknown token is a no-op
        auth.sign_out(Uuid::new_v4());
    }

    #[tokio::test]
    async fn expired_sessions_are_evicted_on_access() {
        let auth = service_with_user(0).await;
        let session = auth.sign_in("admin@selectx.com.br", "s3cret").await.unwrap();
        assert!(auth.session(session.token).is_none());
    }

    #[tokio::test]
    async fn sign_in_sweeps_sessions_that_expired_unobserved() {
        let auth = service_with_user(0).await;
        let stale = auth.sign_in("admin@selectx.com.br", "s3cret").await.unwrap();

        // A later sign-in removes the stale entry without anyone looking it up.
        auth.sign_in("admin@selectx.com.br", "s3cret").await.unwrap();
        assert!(!auth.sessions.contains_key(&stale.token));
        assert_eq!(auth.sessions.len(), 1);
    }

    #[tokio::test]
    async fn seed_admin_only_runs_on_an_empty_table() {
        let db = DBService::new_in_memory().await.unwrap();
        let auth = AuthService::new(db.clone(), 60);

        auth.seed_admin("admin@selectx.com.br", "s3cret").await.unwrap();
        assert_eq!(User::count(&db.pool).await.unwrap(), 1);

        // Second call must not duplicate or overwrite
        auth.seed_admin("other@selectx.com.br", "x").await.unwrap();
        assert_eq!(User::count(&db.pool).await.unwrap(), 1);
    }
}
