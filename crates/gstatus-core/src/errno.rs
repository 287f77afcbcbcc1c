//! Access to the calling thread's last OS error.
//!
//! Unix reads `errno` through `nix`; other targets fall back to
//! `GetLastError()` via `std::io::Error::last_os_error`.

use std::borrow::Cow;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        use nix::errno::Errno;

        /// The thread's current `errno`. `0` means no error is recorded.
        #[inline]
        pub fn last_errno() -> i32 {
            Errno::last() as i32
        }

        /// Human-readable description of an errno value.
        pub fn errno_description(errno: i32) -> Cow<'static, str> {
            Cow::Borrowed(Errno::from_raw(errno).desc())
        }
    } else {
        /// The thread's last OS error code. `0` means no error is recorded.
        #[inline]
        pub fn last_errno() -> i32 {
            std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
        }

        /// Human-readable description of an OS error code.
        pub fn errno_description(errno: i32) -> Cow<'static, str> {
            Cow::Owned(std::io::Error::from_raw_os_error(errno).to_string())
        }
    }
}
