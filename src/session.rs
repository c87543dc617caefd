//! Signed-in user, as persisted by the login flow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use crate::error::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore};

pub const USER_KEY: &str = "food_store_user";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Usuario,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "celular", default)]
    pub phone: Option<i64>,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "activo")]
    pub active: bool,
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self { Self { store } }

    /// The stored user, if it is active. A record that cannot be read counts as
    /// signed out.
    pub fn current_user(&self) -> Option<User> {
        match read_json::<User>(self.store.as_ref(), USER_KEY) {
            Ok(Some(user)) if user.active => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session record");
                None
            }
        }
    }

    pub fn current_user_id(&self) -> Option<i64> { self.current_user().map(|u| u.id) }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|u| u.role == Role::Admin)
    }

    pub fn sign_in(&self, user: &User) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), USER_KEY, user)?;
        tracing::info!(user_id = user.id, "signed in");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.store.remove(USER_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }
}
