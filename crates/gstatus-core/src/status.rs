use std::borrow::Cow;
use std::fmt;

use crate::errno::{errno_description, last_errno};
use crate::ErrorType;

/// Code stored by [`Status::set_error_to_generic_error`].
pub const GENERIC_ERROR: u32 = u32::MAX;

/// Backing error state: a numeric code, the domain it belongs to, and an
/// optional message.
///
/// A status with code `0` is a success regardless of its type or message.
/// The message is stored as a `String`; empty means "not set".
///
/// ```
/// use gstatus_core::{ErrorType, Status};
///
/// let mut st = Status::new();
/// assert!(st.success());
///
/// st.set_error(2, ErrorType::Posix);
/// assert!(st.fail());
/// assert_eq!(st.message().as_deref(), Some("No such file or directory"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    code: u32,
    ty: ErrorType,
    message: String,
}

// ── Constructors ──────────────────────────────────────────────────

impl Status {
    /// A successful status with no message.
    #[inline]
    pub const fn new() -> Self {
        Self {
            code: 0,
            ty: ErrorType::Invalid,
            message: String::new(),
        }
    }

    /// A status holding `code` in domain `ty`.
    pub fn with_error(code: u32, ty: ErrorType) -> Self {
        let mut st = Self::new();
        st.set_error(code, ty);
        st
    }

    /// A POSIX status for `errno`. `0` yields a success.
    pub fn from_errno(errno: i32) -> Self {
        Self::with_error(errno as u32, ErrorType::Posix)
    }

    /// A generic failure carrying `text`.
    pub fn with_message(text: &str) -> Self {
        let mut st = Self::new();
        st.set_error_string(text);
        st
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Status {
    #[inline]
    pub fn success(&self) -> bool {
        self.code == 0
    }

    #[inline]
    pub fn fail(&self) -> bool {
        self.code != 0
    }

    #[inline]
    pub fn error_code(&self) -> u32 {
        self.code
    }

    #[inline]
    pub fn error_type(&self) -> ErrorType {
        self.ty
    }

    /// The error message, if one is available.
    ///
    /// - success: always `None`
    /// - explicit message set: that message
    /// - `Posix` failure without a message: the errno description
    /// - anything else: `None`
    pub fn message(&self) -> Option<Cow<'_, str>> {
        if self.success() {
            return None;
        }
        if !self.message.is_empty() {
            return Some(Cow::Borrowed(&self.message));
        }
        match self.ty {
            ErrorType::Posix => Some(errno_description(self.code as i32)),
            _ => None,
        }
    }

    /// Whether an explicit message string was stored.
    #[inline]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

// ── Mutators ──────────────────────────────────────────────────────

impl Status {
    /// Reset to the "no error" value.
    pub fn clear(&mut self) {
        self.code = 0;
        self.ty = ErrorType::Invalid;
        self.message.clear();
    }

    /// Set code and domain. Drops any stored message.
    pub fn set_error(&mut self, code: u32, ty: ErrorType) {
        self.code = code;
        self.ty = ty;
        self.message.clear();
    }

    /// Capture the calling thread's last OS error.
    ///
    /// A zero errno still produces a failure: the generic error.
    pub fn set_error_to_errno(&mut self) {
        self.set_errno(last_errno());
    }

    /// Store an errno value captured earlier. `0` becomes the generic error.
    pub fn set_errno(&mut self, errno: i32) {
        match errno {
            0 => self.set_error(GENERIC_ERROR, ErrorType::Generic),
            errno => self.set_error(errno as u32, ErrorType::Posix),
        }
    }

    pub fn set_error_to_generic_error(&mut self) {
        self.set_error(GENERIC_ERROR, ErrorType::Generic);
    }

    /// Store `text` as the message.
    ///
    /// Non-empty text on a successful status first turns it into the
    /// generic error so the message is never attached to a success. Empty
    /// text only clears the message.
    pub fn set_error_string(&mut self, text: &str) {
        if !text.is_empty() && self.success() {
            self.set_error_to_generic_error();
        }
        self.message.clear();
        self.message.push_str(text);
    }

    /// Format `args` into the message.
    ///
    /// Returns the message length in bytes, `0` when the output is empty
    /// (the message is cleared), or `-1` if a `Display` impl failed (the
    /// status is left untouched).
    pub fn set_error_string_with_format(&mut self, args: fmt::Arguments<'_>) -> i32 {
        let mut text = String::new();
        if fmt::write(&mut text, args).is_err() {
            return -1;
        }
        if text.is_empty() {
            self.message.clear();
            return 0;
        }
        if self.success() {
            self.set_error_to_generic_error();
        }
        self.message = text;
        i32::try_from(self.message.len()).unwrap_or(i32::MAX)
    }
}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success() {
            return f.write_str("success");
        }
        write!(f, "{} error {}", self.ty, self.code)?;
        if let Some(msg) = self.message() {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}
