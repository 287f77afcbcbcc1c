//! Error domain tags.
//!
//! An `ErrorType` says which numbering space a `Status` code belongs to.
//! Code `2` means "No such file or directory" under `Posix` and something
//! else entirely under `MachKernel`.

use core::fmt;
use core::str::FromStr;

/// Domain tag for a status code.
///
/// | Tag          | Name          | Code space                          |
/// |--------------|---------------|-------------------------------------|
/// | `Invalid`    | `Invalid`     | no code set (cleared / empty)       |
/// | `Generic`    | `Generic`     | catch-all, see `GENERIC_ERROR`      |
/// | `MachKernel` | `MachKernel`  | Mach `kern_return_t`                |
/// | `Posix`      | `POSIX`       | `errno`                             |
/// | `Expression` | `Expression`  | expression evaluation results       |
/// | `Win32`      | `Win32`       | `GetLastError()`                    |
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorType {
    #[default]
    Invalid = 0,
    Generic = 1,
    MachKernel = 2,
    Posix = 3,
    Expression = 4,
    Win32 = 5,
}

impl ErrorType {
    pub const ALL: [ErrorType; 6] = [
        ErrorType::Invalid,
        ErrorType::Generic,
        ErrorType::MachKernel,
        ErrorType::Posix,
        ErrorType::Expression,
        ErrorType::Win32,
    ];

    /// Stable, human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorType::Invalid => "Invalid",
            ErrorType::Generic => "Generic",
            ErrorType::MachKernel => "MachKernel",
            ErrorType::Posix => "POSIX",
            ErrorType::Expression => "Expression",
            ErrorType::Win32 => "Win32",
        }
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(ErrorType::Invalid),
            1 => Some(ErrorType::Generic),
            2 => Some(ErrorType::MachKernel),
            3 => Some(ErrorType::Posix),
            4 => Some(ErrorType::Expression),
            5 => Some(ErrorType::Win32),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known `ErrorType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorTypeError(pub String);

impl fmt::Display for ParseErrorTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error type: {:?}", self.0)
    }
}

impl std::error::Error for ParseErrorTypeError {}

impl FromStr for ErrorType {
    type Err = ParseErrorTypeError;

    /// Case-insensitive match on [`ErrorType::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseErrorTypeError(s.to_string()))
    }
}
