//! # gstatus
//!
//! A copyable error-status handle for stable API boundaries.
//!
//! [`ErrorHandle`] wraps an optional, exclusively owned [`Status`]. Callers
//! that never hit an error never allocate: an empty handle reads as success.
//! The first mutating call allocates the backing status.
//!
//! ## Quick Start
//!
//! ```rust
//! use gstatus::{set_error_fmt, ErrorHandle, Stream};
//!
//! fn open_config(path: &str, err: &mut ErrorHandle) {
//!     set_error_fmt!(err, "cannot open {}", path);
//! }
//!
//! let mut err = ErrorHandle::new();
//! open_config("app.toml", &mut err);
//!
//! let mut out = Stream::new();
//! err.describe(&mut out);
//! assert_eq!(out.data(), "error: cannot open app.toml");
//! ```
//!
//! ## Logging
//!
//! `success`, `fail`, `error_code` and `error_type` emit one DEBUG record
//! each under the `gstatus::api` tracing target when the API category is on
//! (`GST_LOG_API=1` or [`set_api_logging`]).

mod handle;
mod stream;
#[macro_use]
mod macros;

// ── Public API ────────────────────────────────────────────────────

pub use handle::ErrorHandle;
pub use stream::Stream;

pub use gstatus_core::{set_api_logging, ErrorType, ParseErrorTypeError, Status, GENERIC_ERROR};
