// ============================
// credgate-backend-lib/src/storage.rs
// ============================
//! User store abstraction with flat-file implementation.
use std::{fs, path::{Path, PathBuf}};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{fs as tokio_fs, io::AsyncWriteExt};
use uuid::Uuid;

use credgate_common::UserView;
use crate::error::AppError;

/// A persisted user record. The password hash never leaves the backend;
/// clients only ever see [`UserView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Derived once at registration from the email local part,
    /// never re-derived afterwards
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Client-facing projection, without the password hash
    pub fn to_view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user ready to persist. The store assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Trait for user store backends.
/// Email uniqueness is enforced here: the store is the single source of
/// truth, and concurrent creates for the same email must resolve to exactly
/// one winner.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with [`AppError::EmailTaken`] when the
    /// email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Look up a user by exact email match
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Flat-file implementation of the `UserStore` trait.
/// One JSON document per user under `users/`, with the filename derived
/// from the email so lookups stay a single path probe.
#[derive(Clone)]
pub struct FlatFileUserStore {
    root: PathBuf,
}

impl FlatFileUserStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users"))?;
        Ok(Self { root })
    }

    // emails are case-preserved and matched exactly; the encoding only
    // keeps arbitrary addresses filesystem-safe
    fn user_path(&self, email: &str) -> PathBuf {
        let key = URL_SAFE_NO_PAD.encode(email.as_bytes());
        self.root.join("users").join(format!("{key}.json"))
    }
}

#[async_trait]
impl UserStore for FlatFileUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };

        let path = self.user_path(&user.email);

        // create_new is the uniqueness constraint: when two registrations
        // race on one email, exactly one open succeeds
        let mut file = match tokio_fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(AppError::EmailTaken);
            },
            Err(e) => return Err(AppError::from(e)),
        };

        let json = serde_json::to_string_pretty(&user)?;
        file.write_all(json.as_bytes()).await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let path = self.user_path(email);

        if !path.exists() {
            return Ok(None);
        }

        let content = tokio_fs::read_to_string(&path).await?;
        let user: User = serde_json::from_str(&content)?;

        Ok(Some(user))
    }
}
