//! Opaque key/value persistence for the profile and budget blobs.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::{BudgetState, UserProfile};
use crate::errors::BudgetError;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Key under which the validated user profile is stored.
pub const PROFILE_KEY: &str = "spendrUserData";
/// Key under which the budget record is stored.
pub const BUDGET_KEY: &str = "budgetData";

/// Abstraction over string blob stores. Reads and writes are whole-value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Typed access to the two persisted records.
pub struct BudgetRepository<S> {
    store: S,
}

impl<S: KeyValueStore> BudgetRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the budget record; an absent or malformed blob yields the zero default.
    pub fn load_state(&self) -> BudgetState {
        let mut state: BudgetState = self.read_blob(BUDGET_KEY).unwrap_or_default();
        state.normalize();
        state
    }

    pub fn save_state(&self, state: &BudgetState) -> Result<()> {
        self.write_blob(BUDGET_KEY, state)
    }

    /// Loads the profile; an absent or malformed blob yields `None`.
    pub fn load_profile(&self) -> Option<UserProfile> {
        self.read_blob(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write_blob(PROFILE_KEY, profile)
    }

    /// Forgets both records.
    pub fn reset(&self) -> Result<()> {
        self.store.remove(PROFILE_KEY)?;
        self.store.remove(BUDGET_KEY)?;
        debug!("stored profile and budget cleared");
        Ok(())
    }

    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "stored blob unreadable; starting fresh");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored blob malformed; starting fresh");
                None
            }
        }
    }

    fn write_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        debug!(key, bytes = json.len(), "blob persisted");
        Ok(())
    }
}
