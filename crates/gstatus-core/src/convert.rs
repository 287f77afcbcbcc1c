use std::io;

use crate::{ErrorType, Status};

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Status {
    /// Raw OS errors keep their code under `Posix`; custom io errors become
    /// the generic error carrying the error text.
    fn from(err: io::Error) -> Self {
        Status::from(&err)
    }
}

impl From<&io::Error> for Status {
    fn from(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Status::with_error(code as u32, ErrorType::Posix),
            None => Status::with_message(&err.to_string()),
        }
    }
}

// ── From<Errno> ───────────────────────────────────────────────────

#[cfg(unix)]
impl From<nix::errno::Errno> for Status {
    fn from(errno: nix::errno::Errno) -> Self {
        Status::from_errno(errno as i32)
    }
}
