//! Category-gated diagnostic logging
//!
//! Read paths on the public API ask for a [`Log`] before doing any
//! formatting work. When the category is off, [`api_log`] costs one relaxed
//! atomic load and returns `None`; nothing is formatted.
//!
//! Records go out through `tracing` at DEBUG level under the
//! [`API_TARGET`] target. Installing a subscriber is up to the binary.
//!
//! # Environment Variables
//!
//! - `GST_LOG_API=1` - enable the API category at startup
//!
//! # Usage
//!
//! ```ignore
//! use gstatus_core::log::api_log;
//!
//! if let Some(log) = api_log() {
//!     log.printf(format_args!("ErrorHandle({:p})::fail () => {}", ptr, ret));
//! }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::env::{env_get_bool_opt, ENV_LOG_API};

/// `tracing` target for API read-path records.
pub const API_TARGET: &str = "gstatus::api";

static API_ENABLED: AtomicBool = AtomicBool::new(false);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the category gate from the environment.
///
/// Called automatically on first query, but can be called explicitly for
/// deterministic initialization.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Some(on) = env_get_bool_opt(ENV_LOG_API) {
        API_ENABLED.store(on, Ordering::Relaxed);
    }
}

/// Whether the API category is on.
#[inline]
pub fn api_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    API_ENABLED.load(Ordering::Relaxed)
}

/// Turn the API category on or off. Takes precedence over `GST_LOG_API`.
pub fn set_api_logging(enabled: bool) {
    INITIALIZED.store(true, Ordering::SeqCst);
    API_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Handle to an enabled log category.
///
/// Only obtainable through [`api_log`], so holding one means the category
/// was on at the time of the check.
#[derive(Debug, Clone, Copy)]
pub struct Log {
    _gate: (),
}

impl Log {
    /// Emit one record.
    #[inline]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: API_TARGET, "{}", args);
    }
}

/// `Some(Log)` if the API category is enabled.
#[inline]
pub fn api_log() -> Option<Log> {
    api_enabled().then_some(Log { _gate: () })
}
