// SPDX-License-Identifier: MPL-2.0
//! User account store.
//!
//! Accounts are keyed by email (case-insensitive). The recover token column
//! mirrors the signed token most recently issued for a password recovery;
//! the new-password flow requires the presented token to match it exactly.

use crate::app::paths;
use crate::auth::{PasswordDigest, SignedToken};
use crate::domain::newtypes::EmailAddress;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Store file name within the app data directory.
const USERS_FILE: &str = "users.cbor";

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password: PasswordDigest,
    /// Last issued recovery token, cleared once consumed.
    pub recover_token: Option<String>,
    pub created_at: i64,
}

/// All user accounts, persisted as one CBOR file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStore {
    users: Vec<User>,
    next_id: u64,
}

impl UserStore {
    /// Loads the store from the default location.
    ///
    /// Returns a tuple of (store, optional_warning). A missing file yields an
    /// empty store; a damaged file yields an empty store plus a warning key
    /// for the notification area.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the store from a custom directory (tests, portable installs).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::store_file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(store) => (store, None),
                Err(_) => (
                    Self::default(),
                    Some("notification-users-parse-error".to_string()),
                ),
            },
            Err(_) => (
                Self::default(),
                Some("notification-users-read-error".to_string()),
            ),
        }
    }

    /// Saves the store, creating the data directory if needed.
    /// Returns an optional warning key if saving failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves the store to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::store_file_path(base_dir) else {
            return Some("notification-users-save-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-users-save-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("notification-users-save-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-users-save-error".to_string()),
        }
    }

    fn store_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(USERS_FILE);
            path
        })
    }

    /// Finds an account by email, case-insensitively.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    /// Creates a new account. Returns `None` when the email is already taken.
    pub fn create(&mut self, email: &EmailAddress, password: PasswordDigest) -> Option<&User> {
        if self.find_by_email(email.as_str()).is_some() {
            return None;
        }
        self.next_id += 1;
        self.users.push(User {
            id: self.next_id,
            email: email.as_str().to_string(),
            password,
            recover_token: None,
            created_at: Utc::now().timestamp(),
        });
        self.users.last()
    }

    /// Records the recovery token issued for `email`.
    /// Returns `false` when no such account exists.
    pub fn set_recover_token(&mut self, email: &str, token: &SignedToken) -> bool {
        match self.find_by_email_mut(email) {
            Some(user) => {
                user.recover_token = Some(token.as_str().to_string());
                true
            }
            None => false,
        }
    }

    /// Checks that `token` is the one most recently issued for `email`.
    #[must_use]
    pub fn recover_token_matches(&self, email: &str, token: &SignedToken) -> bool {
        self.find_by_email(email)
            .and_then(|user| user.recover_token.as_deref())
            .is_some_and(|stored| stored == token.as_str())
    }

    /// Replaces the password digest and consumes the recovery token.
    /// Returns `false` when no such account exists.
    pub fn update_password(&mut self, email: &str, password: PasswordDigest) -> bool {
        match self.find_by_email_mut(email) {
            Some(user) => {
                user.password = password;
                user.recover_token = None;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_by_email_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }
}
