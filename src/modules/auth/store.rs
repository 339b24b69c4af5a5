//! In-memory credential store.
//!
//! Holds a single account seeded at startup. Records never change after the
//! store is built, so it is shared behind an `Arc` without locking.

use anyhow::anyhow;
use tracing::info;

use tokengate_auth::{Role, User};
use tokengate_config::SeedConfig;
use tokengate_core::{AppError, hash_password};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl UserRecord {
    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            role: self.role.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<UserRecord>,
}

impl UserStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Builds a store holding the account described by `seed`, with id 1.
    ///
    /// # Errors
    ///
    /// Fails if the seeded role is unknown or the password cannot be hashed.
    pub fn seeded(seed: &SeedConfig) -> Result<Self, AppError> {
        let role: Role = seed
            .role
            .parse()
            .map_err(|e| AppError::internal(anyhow!("Invalid SEED_ROLE: {}", e)))?;

        let record = UserRecord {
            id: 1,
            username: seed.username.clone(),
            password_hash: hash_password(&seed.password)?,
            role,
        };

        info!(username = %record.username, role = %record.role, "Seeded credential store");

        Ok(Self::new(vec![record]))
    }

    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }
}
