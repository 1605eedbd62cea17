use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ProviderKind;
use crate::error::AuthError;

/// Key of the auth object inside the shared config document.
const AUTH_KEY: &str = "auth";

/// Identity of the signed-in user, as shown by `whoami` and `account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The persisted authentication record.
///
/// `user_info` is `Some` exactly when `is_authenticated` is true. The raw
/// access token is never part of this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user_info: Option<UserInfo>,
    pub tenant_id: Option<String>,
    pub expires_on: Option<DateTime<Utc>>,
    pub provider: Option<ProviderKind>,
}

/// Extra facts recorded alongside a successful login.
#[derive(Debug, Clone, Default)]
pub struct SessionDetails {
    pub expires_on: Option<DateTime<Utc>>,
    pub provider: Option<ProviderKind>,
}

/// Authentication cache backed by the `auth` object of a JSON document.
///
/// Other top-level keys of that document belong to someone else and are
/// carried through every write untouched. There is no locking; the last
/// writer wins.
#[derive(Debug)]
pub struct AuthStore {
    path: PathBuf,
    state: AuthState,
}

impl AuthStore {
    /// A store with default (signed-out) state that has not read `path` yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: AuthState::default(),
        }
    }

    /// Create a store and immediately [`load`](Self::load) it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.state.user_info.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Merge the `auth` object of the backing file over the in-memory state.
    ///
    /// Keys missing from the file keep their current values. A missing file,
    /// unreadable file, or malformed JSON leaves the state untouched.
    pub fn load(&mut self) {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) => {
                tracing::debug!(%error, path = %self.path.display(), "no auth state loaded");
                return;
            }
        };

        let document: Value = match serde_json::from_str(&contents) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "ignoring malformed state file");
                return;
            }
        };

        let Some(auth) = document.get(AUTH_KEY).and_then(Value::as_object) else {
            return;
        };

        merge_field(auth, "is_authenticated", &mut self.state.is_authenticated);
        merge_field(auth, "user_info", &mut self.state.user_info);
        merge_field(auth, "tenant_id", &mut self.state.tenant_id);
        merge_field(auth, "expires_on", &mut self.state.expires_on);
        merge_field(auth, "provider", &mut self.state.provider);
        self.normalize();
    }

    /// Write the `auth` object back, preserving every other top-level key.
    ///
    /// Creates the parent directory if it is missing.
    pub fn save(&self) -> Result<(), AuthError> {
        let mut document = self.read_document();
        document.insert(AUTH_KEY.to_string(), serde_json::to_value(&self.state)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut contents = serde_json::to_string_pretty(&Value::Object(document))?;
        contents.push('\n');
        fs::write(&self.path, contents)?;

        tracing::debug!(path = %self.path.display(), "auth state saved");
        Ok(())
    }

    /// [`save`](Self::save), logging instead of failing.
    ///
    /// The in-memory state stays authoritative for this process either way.
    pub fn persist(&self) {
        if let Err(error) = self.save() {
            tracing::warn!(%error, path = %self.path.display(), "failed to persist auth state");
        }
    }

    /// Record a successful login and persist it.
    pub fn set_authenticated(
        &mut self,
        user_info: UserInfo,
        tenant_id: Option<String>,
        details: SessionDetails,
    ) {
        self.state = AuthState {
            is_authenticated: true,
            user_info: Some(user_info),
            tenant_id,
            expires_on: details.expires_on,
            provider: details.provider,
        };
        self.persist();
    }

    /// Forget the current session and persist the empty state.
    pub fn clear(&mut self) {
        self.state = AuthState::default();
        self.persist();
    }

    fn read_document(&self) -> Map<String, Value> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "replacing unreadable state file");
                Map::new()
            }
        }
    }

    /// Restore the `user_info` iff `is_authenticated` invariant after a merge.
    fn normalize(&mut self) {
        if !self.state.is_authenticated || self.state.user_info.is_none() {
            if self.state.is_authenticated || self.state.user_info.is_some() {
                tracing::warn!("inconsistent auth state on disk; treating as signed out");
            }
            self.state = AuthState::default();
        }
    }
}

fn merge_field<T: DeserializeOwned>(auth: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(value) = auth.get(key) else {
        return;
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => *slot = parsed,
        Err(error) => tracing::warn!(%error, key, "ignoring invalid auth field"),
    }
}
