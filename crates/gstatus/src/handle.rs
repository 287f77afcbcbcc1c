use std::borrow::Cow;
use std::fmt;
use std::io;
use std::ptr;

use gstatus_core::errno::last_errno;
use gstatus_core::log::api_log;
use gstatus_core::{ErrorType, Status};

use crate::stream::Stream;

/// Error status handle for API boundaries.
///
/// Owns zero or one [`Status`]. A fresh handle is *empty*: nothing is
/// allocated and the read accessors report success. The first mutating call
/// allocates the backing status, after which the handle is *populated* for
/// the rest of its life unless it is assigned from an empty handle.
///
/// | Read op         | Empty               | Populated                 |
/// |-----------------|---------------------|---------------------------|
/// | `success()`     | `true`              | `Status::success()`       |
/// | `fail()`        | `false`             | `Status::fail()`          |
/// | `error_code()`  | `0`                 | `Status::error_code()`    |
/// | `error_type()`  | `ErrorType::Invalid`| `Status::error_type()`    |
/// | `message()`     | `None`              | `Status::message()`       |
///
/// `success`, `fail`, `error_code` and `error_type` each emit one record
/// through [`gstatus_core::log`] when the API category is on.
///
/// Cloning deep-copies the backing status; two handles never share one.
///
/// ```
/// use gstatus::{ErrorHandle, ErrorType};
///
/// let mut err = ErrorHandle::new();
/// assert!(err.success() && !err.is_valid());
///
/// err.set_error(2, ErrorType::Posix);
/// assert!(err.fail());
/// assert_eq!(err.error_code(), 2);
/// assert_eq!(err.error_type().name(), "POSIX");
/// ```
#[derive(Debug, Default)]
pub struct ErrorHandle {
    backing: Option<Box<Status>>,
}

// ── Lifecycle ─────────────────────────────────────────────────────

impl ErrorHandle {
    /// An empty handle. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { backing: None }
    }

    /// Whether a backing status exists.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.backing.is_some()
    }

    /// Assign from `rhs` and return `self` for chaining.
    ///
    /// Same semantics as [`Clone::clone_from`]: a populated `rhs` is copied
    /// into the existing allocation when there is one; an empty `rhs`
    /// releases ours.
    pub fn assign(&mut self, rhs: &ErrorHandle) -> &mut Self {
        self.clone_from(rhs);
        self
    }

    fn create_if_needed(&mut self) -> &mut Status {
        self.backing.get_or_insert_with(Box::default)
    }

    /// Address of the backing status, null when empty. Used as the handle
    /// identity in log records.
    fn identity(&self) -> *const Status {
        self.backing.as_deref().map_or(ptr::null(), |st| st as *const Status)
    }
}

impl Clone for ErrorHandle {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
        }
    }

    fn clone_from(&mut self, rhs: &Self) {
        match &rhs.backing {
            Some(src) => match &mut self.backing {
                Some(dst) => Status::clone_from(dst, src),
                None => self.backing = Some(src.clone()),
            },
            None => self.backing = None,
        }
    }
}

// ── Mutators ──────────────────────────────────────────────────────

impl ErrorHandle {
    /// Set code and domain; any previous message is dropped.
    pub fn set_error(&mut self, code: u32, ty: ErrorType) {
        self.create_if_needed().set_error(code, ty);
    }

    /// Overwrite the backing status with a copy of `status`.
    pub fn set_error_status(&mut self, status: &Status) {
        Status::clone_from(self.create_if_needed(), status);
    }

    /// Capture the calling thread's last OS error.
    pub fn set_error_to_errno(&mut self) {
        // Read before allocating; the allocator may touch errno.
        let errno = last_errno();
        self.create_if_needed().set_errno(errno);
    }

    /// Identical to [`set_error_to_errno`](Self::set_error_to_errno).
    ///
    /// This does *not* store [`gstatus_core::GENERIC_ERROR`]; it records the
    /// thread's errno exactly like `set_error_to_errno`. Callers that want
    /// the generic code should use
    /// `get_or_create().set_error_to_generic_error()`.
    pub fn set_error_to_generic_error(&mut self) {
        let errno = last_errno();
        self.create_if_needed().set_errno(errno);
    }

    /// Store a copy of `text` as the message.
    pub fn set_error_string(&mut self, text: &str) {
        self.create_if_needed().set_error_string(text);
    }

    /// Format into the message. See [`crate::set_error_fmt!`] for the
    /// printf-style form.
    ///
    /// Returns the message length in bytes, `0` for empty output, or `-1`
    /// when formatting failed.
    pub fn set_error_string_with_format(&mut self, args: fmt::Arguments<'_>) -> i32 {
        self.create_if_needed().set_error_string_with_format(args)
    }

    /// Reset the backing status to success. The handle stays populated;
    /// an empty handle stays empty.
    pub fn clear(&mut self) {
        if let Some(st) = self.backing.as_deref_mut() {
            st.clear();
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl ErrorHandle {
    /// The error message, `None` when empty or when none is available.
    pub fn message(&self) -> Option<Cow<'_, str>> {
        self.backing.as_deref().and_then(Status::message)
    }

    pub fn fail(&self) -> bool {
        let log = api_log();

        let ret = self.backing.as_deref().is_some_and(Status::fail);

        if let Some(log) = log {
            log.printf(format_args!(
                "ErrorHandle({:p})::fail () => {}",
                self.identity(),
                ret as i32
            ));
        }
        ret
    }

    pub fn success(&self) -> bool {
        let log = api_log();

        let ret = self.backing.as_deref().map_or(true, Status::success);

        if let Some(log) = log {
            log.printf(format_args!(
                "ErrorHandle({:p})::success () => {}",
                self.identity(),
                ret as i32
            ));
        }
        ret
    }

    /// Numeric code, `0` when empty.
    pub fn error_code(&self) -> u32 {
        let log = api_log();

        let err = self.backing.as_deref().map_or(0, Status::error_code);

        if let Some(log) = log {
            log.printf(format_args!(
                "ErrorHandle({:p})::error_code () => {:#010x}",
                self.identity(),
                err
            ));
        }
        err
    }

    /// Domain tag, [`ErrorType::Invalid`] when empty.
    pub fn error_type(&self) -> ErrorType {
        let log = api_log();

        let ty = self
            .backing
            .as_deref()
            .map_or(ErrorType::Invalid, Status::error_type);

        if let Some(log) = log {
            log.printf(format_args!(
                "ErrorHandle({:p})::error_type () => {}",
                self.identity(),
                ty.as_u32()
            ));
        }
        ty
    }
}

// ── Direct access ─────────────────────────────────────────────────

impl ErrorHandle {
    /// The backing status, if any. Never allocates.
    #[inline]
    pub fn get(&self) -> Option<&Status> {
        self.backing.as_deref()
    }

    /// Mutable backing status, if any. Never allocates.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut Status> {
        self.backing.as_deref_mut()
    }

    /// The backing status, allocating a successful one first if empty.
    pub fn get_or_create(&mut self) -> &mut Status {
        self.create_if_needed()
    }

    /// The backing status of a handle known to be populated.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty. Check [`is_valid`](Self::is_valid)
    /// first, or use [`get`](Self::get).
    pub fn status(&self) -> &Status {
        match self.backing.as_deref() {
            Some(st) => st,
            None => panic!("ErrorHandle::status() called on an empty handle"),
        }
    }
}

// ── Description ───────────────────────────────────────────────────

impl ErrorHandle {
    /// Render a one-line description into `stream`. Always returns `true`.
    ///
    /// - empty: `error: <NULL>`
    /// - success: `success`
    /// - failure: `error: <message>` (empty message when none is available)
    pub fn describe(&self, stream: &mut Stream) -> bool {
        let _ = self.write_description(stream);
        true
    }

    fn write_description<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self.backing.as_deref() {
            Some(st) if st.success() => out.write_str("success"),
            Some(_) => {
                let msg = self.message();
                write!(out, "error: {}", msg.as_deref().unwrap_or(""))
            }
            None => out.write_str("error: <NULL>"),
        }
    }
}

impl fmt::Display for ErrorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_description(f)
    }
}

// ── Conversions ───────────────────────────────────────────────────

impl From<Status> for ErrorHandle {
    fn from(status: Status) -> Self {
        Self {
            backing: Some(Box::new(status)),
        }
    }
}

impl From<io::Error> for ErrorHandle {
    fn from(err: io::Error) -> Self {
        Self::from(Status::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gstatus_core::GENERIC_ERROR;

    fn backing_addr(h: &ErrorHandle) -> *const Status {
        h.identity()
    }

    #[test]
    fn fresh_handle_reads_as_success() {
        let h = ErrorHandle::new();
        assert!(!h.is_valid());
        assert!(h.success());
        assert!(!h.fail());
        assert_eq!(h.error_code(), 0);
        assert_eq!(h.error_type(), ErrorType::Invalid);
        assert!(h.message().is_none());
        assert!(h.get().is_none());
    }

    #[test]
    fn set_error_string_populates() {
        let mut h = ErrorHandle::new();
        h.set_error_string("x");
        assert!(h.is_valid());
        assert!(h.fail());
        assert_eq!(h.message().as_deref(), Some("x"));
        assert_eq!(h.error_code(), GENERIC_ERROR);
        assert_eq!(h.error_type(), ErrorType::Generic);
    }

    #[test]
    fn clone_is_independent() {
        let mut h = ErrorHandle::new();
        h.set_error_string("original");

        let mut copy = h.clone();
        assert_ne!(backing_addr(&copy), backing_addr(&h));
        copy.set_error(5, ErrorType::Expression);
        copy.set_error_string("changed");

        assert_eq!(h.message().as_deref(), Some("original"));
        assert_eq!(h.error_code(), GENERIC_ERROR);
        assert_eq!(copy.error_code(), 5);
    }

    #[test]
    fn clone_of_empty_is_empty() {
        let h = ErrorHandle::new();
        let copy = h.clone();
        assert!(!copy.is_valid());
    }

    #[test]
    fn assign_from_empty_releases() {
        let mut h = ErrorHandle::new();
        h.set_error(1, ErrorType::Posix);
        let e = ErrorHandle::new();
        h.clone_from(&e);
        assert!(!h.is_valid());
        assert!(h.success());
    }

    #[test]
    fn assign_into_populated_reuses_allocation() {
        let mut dst = ErrorHandle::new();
        dst.set_error(1, ErrorType::Posix);
        let before = backing_addr(&dst);

        let mut src = ErrorHandle::new();
        src.set_error_string("from src");
        dst.assign(&src);

        assert_eq!(backing_addr(&dst), before);
        assert_eq!(dst.get(), src.get());
        assert_ne!(backing_addr(&dst), backing_addr(&src));
    }

    #[test]
    fn assign_into_empty_allocates_copy() {
        let mut src = ErrorHandle::new();
        src.set_error(22, ErrorType::Posix);
        let mut dst = ErrorHandle::new();
        dst.assign(&src);
        assert!(dst.is_valid());
        assert_eq!(dst.error_code(), 22);
        assert_ne!(backing_addr(&dst), backing_addr(&src));
    }

    #[test]
    fn assign_chains() {
        let mut src = ErrorHandle::new();
        src.set_error_string("chained");
        let mut a = ErrorHandle::new();
        let mut b = ErrorHandle::new();
        b.assign(a.assign(&src));
        assert_eq!(a.message().as_deref(), Some("chained"));
        assert_eq!(b.message().as_deref(), Some("chained"));
    }

    #[test]
    fn clear_keeps_handle_populated() {
        let mut h = ErrorHandle::new();
        h.set_error_string("boom");
        h.clear();
        assert!(h.is_valid());
        assert!(h.success());
        assert!(h.message().is_none());
        assert_eq!(h.error_type(), ErrorType::Invalid);
    }

    #[test]
    fn clear_on_empty_is_noop() {
        let mut h = ErrorHandle::new();
        h.clear();
        assert!(!h.is_valid());
    }

    #[test]
    fn repeated_mutation_keeps_one_allocation() {
        let mut h = ErrorHandle::new();
        h.set_error_string("first");
        let addr = backing_addr(&h);
        h.set_error_string("second");
        h.set_error(3, ErrorType::Posix);
        let _ = h.get_or_create();
        assert_eq!(backing_addr(&h), addr);
        assert_eq!(h.error_code(), 3);
    }

    #[test]
    fn posix_error_scenario() {
        let mut h = ErrorHandle::new();
        h.set_error(2, "POSIX".parse().unwrap());
        assert_eq!(h.error_code(), 2);
        assert_eq!(h.error_type(), ErrorType::Posix);
        assert_eq!(h.error_type().name(), "POSIX");
        assert!(h.fail());
    }

    #[test]
    fn set_error_status_copies_value() {
        let st = Status::with_error(13, ErrorType::Posix);
        let mut h = ErrorHandle::new();
        h.set_error_status(&st);
        assert_eq!(h.get(), Some(&st));
    }

    #[test]
    fn format_sets_message() {
        let mut h = ErrorHandle::new();
        let n = h.set_error_string_with_format(format_args!("fd {}", 7));
        assert_eq!(n, 4);
        assert_eq!(h.message().as_deref(), Some("fd 7"));
        assert!(h.fail());
    }

    #[cfg(unix)]
    #[test]
    fn errno_capture() {
        let mut h = ErrorHandle::new();
        unsafe { libc::close(-1) };
        h.set_error_to_errno();
        assert_eq!(h.error_code(), libc::EBADF as u32);
        assert_eq!(h.error_type(), ErrorType::Posix);
    }

    #[cfg(unix)]
    #[test]
    fn generic_error_follows_errno_path() {
        let mut h = ErrorHandle::new();
        unsafe { libc::close(-1) };
        h.set_error_to_generic_error();
        assert_eq!(h.error_code(), libc::EBADF as u32);
        assert_eq!(h.error_type(), ErrorType::Posix);
    }

    #[test]
    fn direct_access() {
        let mut h = ErrorHandle::new();
        assert!(h.get_mut().is_none());
        assert!(!h.is_valid());

        h.get_or_create().set_error(9, ErrorType::Win32);
        assert!(h.is_valid());
        assert_eq!(h.status().error_code(), 9);

        h.get_mut().unwrap().clear();
        assert!(h.status().success());
    }

    #[test]
    #[should_panic(expected = "empty handle")]
    fn status_on_empty_panics() {
        let h = ErrorHandle::new();
        let _ = h.status();
    }

    #[test]
    fn describe_each_state() {
        let mut out = Stream::new();
        let mut h = ErrorHandle::new();
        assert!(h.describe(&mut out));
        assert_eq!(out.data(), "error: <NULL>");

        out.clear();
        h.get_or_create();
        assert!(h.describe(&mut out));
        assert_eq!(out.data(), "success");

        out.clear();
        h.set_error_string("bad fd");
        assert!(h.describe(&mut out));
        assert_eq!(out.data(), "error: bad fd");
    }

    #[test]
    fn describe_failure_without_message() {
        let mut out = Stream::new();
        let mut h = ErrorHandle::new();
        h.set_error(4, ErrorType::Expression);
        h.describe(&mut out);
        assert_eq!(out.data(), "error: ");
    }

    #[test]
    fn display_matches_describe() {
        let mut h = ErrorHandle::new();
        assert_eq!(h.to_string(), "error: <NULL>");
        h.set_error_string("bad fd");
        assert_eq!(h.to_string(), "error: bad fd");
    }

    #[test]
    fn from_conversions() {
        let h = ErrorHandle::from(Status::new());
        assert!(h.is_valid());
        assert!(h.success());

        let h = ErrorHandle::from(io::Error::from_raw_os_error(2));
        assert_eq!(h.error_type(), ErrorType::Posix);
        assert_eq!(h.error_code(), 2);
    }

    // ── Logging ───────────────────────────────────────────────

    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn captured<F: FnOnce()>(f: F) -> String {
        let cap = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(cap.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        cap.contents()
    }

    // Leaves the API category on: other tests only read, and records from
    // their threads never reach this thread-scoped subscriber.
    #[test]
    fn read_ops_log_one_record_each() {
        gstatus_core::set_api_logging(true);

        let out = captured(|| {
            let h = ErrorHandle::new();
            assert!(h.success());
            assert!(!h.fail());
            assert_eq!(h.error_code(), 0);
            assert_eq!(h.error_type(), ErrorType::Invalid);
            // Unlogged.
            assert!(!h.is_valid());
            assert!(h.message().is_none());
        });

        assert_eq!(out.lines().count(), 4, "records:\n{}", out);
        assert!(out.contains("ErrorHandle(0x0)::success () => 1"), "{}", out);
        assert!(out.contains("ErrorHandle(0x0)::fail () => 0"), "{}", out);
        assert!(out.contains("ErrorHandle(0x0)::error_code () => 0x00000000"), "{}", out);
        assert!(out.contains("ErrorHandle(0x0)::error_type () => 0"), "{}", out);
        assert!(out.contains(gstatus_core::log::API_TARGET), "{}", out);
    }

    #[test]
    fn logged_reads_return_same_values() {
        gstatus_core::set_api_logging(true);

        let mut h = ErrorHandle::new();
        h.set_error(2, ErrorType::Posix);
        let addr = format!("{:p}", h.identity());

        let out = captured(|| {
            assert!(h.fail());
            assert!(!h.success());
            assert_eq!(h.error_code(), 2);
            assert_eq!(h.error_type(), ErrorType::Posix);
        });

        assert_eq!(out.lines().count(), 4, "records:\n{}", out);
        assert!(out.contains(&format!("ErrorHandle({})::fail () => 1", addr)), "{}", out);
        assert!(out.contains("error_code () => 0x00000002"), "{}", out);
        assert!(out.contains("error_type () => 3"), "{}", out);
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorHandle>();
    }
}
