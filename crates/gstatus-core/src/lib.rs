//! # gstatus-core
//!
//! The error state behind a `gstatus::ErrorHandle`.
//!
//! ## Modules
//!
//! - `error_type` - Error domain tags (`POSIX`, `Generic`, ...)
//! - `status` - `Status`: code + domain + optional message
//! - `errno` - Thread-local last OS error access
//! - `log` - Category-gated diagnostic logging over `tracing`
//! - `env` - Environment variable configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use gstatus_core::{ErrorType, Status};
//!
//! let mut st = Status::new();
//! st.set_error_string("bad fd");
//! assert!(st.fail());
//! assert_eq!(st.error_type(), ErrorType::Generic);
//! ```

mod convert;
mod error_type;
mod status;

pub mod env;
pub mod errno;
pub mod log;

// ── Public API ────────────────────────────────────────────────────

pub use error_type::{ErrorType, ParseErrorTypeError};
pub use log::{api_log, set_api_logging, Log};
pub use status::{Status, GENERIC_ERROR};
