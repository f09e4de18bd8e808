#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use spendr_budget::{
    cli::Dashboard,
    config::{Config, ConfigManager},
    storage::JsonFileStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh base directory that outlives the calling test.
pub fn test_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a dashboard over the JSON store under `base`.
pub fn open_dashboard(base: &PathBuf) -> Dashboard {
    let store = JsonFileStore::in_base(Some(base.clone())).expect("create json store");
    let config = ConfigManager::with_base_dir(base.clone())
        .and_then(|manager| manager.load())
        .unwrap_or_else(|_| Config::default());
    Dashboard::open(Box::new(store), config)
}
