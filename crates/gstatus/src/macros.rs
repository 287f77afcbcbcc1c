/// printf-style message setter for an [`ErrorHandle`](crate::ErrorHandle)
/// or a [`Status`](crate::Status).
///
/// Expands to `set_error_string_with_format(format_args!(...))` and
/// evaluates to the returned `i32` byte count.
///
/// ```
/// use gstatus::{set_error_fmt, ErrorHandle};
///
/// let mut err = ErrorHandle::new();
/// let n = set_error_fmt!(err, "open {} failed: {}", "/etc/app.toml", 13);
/// assert_eq!(n, 29);
/// assert_eq!(err.message().as_deref(), Some("open /etc/app.toml failed: 13"));
/// ```
#[macro_export]
macro_rules! set_error_fmt {
    ($target:expr, $($arg:tt)+) => {
        $target.set_error_string_with_format(::core::format_args!($($arg)+))
    };
}
