#![doc(test(attr(deny(warnings))))]

//! Spendr budget core: income-based category allocation, period rollups of
//! spending history, and the persistence, charting and assistant plumbing
//! around them.

pub mod assistant;
pub mod charts;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod simulation;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendr budget core tracing initialized.");
    });
}
