//! Environment variable helpers
//!
//! Configuration switches are plain environment variables:
//!
//! - `GST_LOG_API` - enable the API log category (`1`, `true`, `yes`, `on`)

/// Environment variable that turns on API read-path logging.
pub const ENV_LOG_API: &str = "GST_LOG_API";

/// Get environment variable as boolean
///
/// Accepts: "1", "true", "yes", "on" (case-insensitive) as true.
/// Any other value is false; unset returns the default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => parse_bool(&val),
        Err(_) => default,
    }
}

/// Get environment variable as boolean, `None` if unset.
#[inline]
pub fn env_get_bool_opt(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|v| parse_bool(&v))
}

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
