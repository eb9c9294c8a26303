use thiserror::Error;

use crate::model::{Role, User};
use crate::store::SessionStore;

/// Shared demo password for every directory account. Deliberately fixed
/// and visible on the login screen; this is a demo, not an account system.
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Login/logout state machine over a static user directory. One gate is
/// constructed at startup and handed to the UI; there is no global session.
#[derive(Debug)]
pub struct SessionGate {
    directory: Vec<User>,
    store: SessionStore,
    current: Option<User>,
}

impl SessionGate {
    /// Builds the gate and restores the persisted session if one exists.
    /// A malformed record is cleared by the store and treated as signed out.
    pub fn restore(directory: Vec<User>, store: SessionStore) -> Self {
        let current = store.load();
        Self {
            directory,
            store,
            current,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }

    /// Exact, case-sensitive email match plus the demo password. Both
    /// failure modes report the same error; nothing changes on failure.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.directory.iter().find(|u| u.email == email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }

        let user = user.clone();
        self.store.save(&user);
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Signs out and drops the persisted record. Safe to call while
    /// already signed out.
    pub fn logout(&mut self) {
        self.current = None;
        self.store.clear();
    }
}
