//! Append-only text sink used by description rendering.

use std::fmt;

/// Growable text buffer. Every write appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stream {
    data: String,
}

impl Stream {
    pub const fn new() -> Self {
        Self { data: String::new() }
    }

    /// Append formatted text. Returns the number of bytes appended.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> usize {
        let before = self.data.len();
        // A failing Display impl leaves whatever it wrote before failing.
        let _ = fmt::write(&mut self.data, args);
        self.data.len() - before
    }

    /// Everything written so far.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn into_string(self) -> String {
        self.data
    }
}

impl fmt::Write for Stream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.data.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
