//! The redaction buffer.
//!
//! [`RedactionBuffer`] is an append-only byte accumulator that produces
//! redactable text. Every write goes through the current [`OutputMode`]:
//!
//! - [`OutputMode::UnsafeEscaped`] wraps content in `‹…›` spans and escapes
//!   delimiters found inside it.
//! - [`OutputMode::SafeEscaped`] escapes delimiters but adds no span.
//! - [`OutputMode::SafeRaw`] appends bytes untouched.
//!
//! Escaped writes may be fragmented arbitrarily. A trailing character that
//! is still missing bytes, `‹` or `›` cut short included, is held as a
//! *pending tail* past [`RedactionBuffer::valid_boundary`] until the next
//! write settles it. If input ends first, the finalized view appends `?`
//! after those bytes so a reader can never splice them into a real delimiter.
//!
//! ```
//! use redactable_text::{OutputMode, RedactionBuffer};
//!
//! let mut buf = RedactionBuffer::new();
//! buf.write_str("a\n\nb");
//! buf.set_mode(OutputMode::SafeEscaped);
//! buf.write_str(" ok");
//! assert_eq!(buf.redactable_string().as_str(), "‹a›\n\n‹b› ok");
//! assert_eq!(buf.plain_string(), "a\n\nb ok");
//! ```

mod scan;

use std::{fmt, io};

use scan::Step;

use crate::{
    markers::{END_BYTES, ESCAPE_BYTES, Marker, START_BYTES},
    text::{self, RedactableBytes, RedactableString},
};

/// How future writes to a [`RedactionBuffer`] are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Sensitive content: wrapped in spans, delimiters escaped.
    #[default]
    UnsafeEscaped,
    /// Non-sensitive content: delimiters escaped, no span.
    SafeEscaped,
    /// Trusted redactable text: bytes pass through unmodified.
    SafeRaw,
}

impl OutputMode {
    /// Returns `true` for the two modes that escape delimiters.
    #[must_use]
    pub const fn is_escaped(self) -> bool {
        matches!(self, OutputMode::UnsafeEscaped | OutputMode::SafeEscaped)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::UnsafeEscaped => "unsafe-escaped",
            OutputMode::SafeEscaped => "safe-escaped",
            OutputMode::SafeRaw => "safe-raw",
        })
    }
}

/// Accumulates redactable text.
///
/// The buffer is a plain value: cloning it yields an independent copy, and
/// reading the finalized view never changes it, so callers can take a
/// snapshot mid-stream and keep writing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedactionBuffer {
    buf: Vec<u8>,
    /// Bytes before this offset are settled; bytes after it are an
    /// incomplete character waiting for more input.
    valid_until: usize,
    mode: OutputMode,
    span_open: bool,
}

impl RedactionBuffer {
    /// Creates an empty buffer in [`OutputMode::UnsafeEscaped`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Uses a specific starting mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Returns the current output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Returns the number of bytes written so far, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written since creation or the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns `true` while an unsafe span has been opened but not closed.
    #[must_use]
    pub fn is_span_open(&self) -> bool {
        self.span_open
    }

    /// Offset up to which the stored bytes are settled.
    #[must_use]
    pub fn valid_boundary(&self) -> usize {
        self.valid_until
    }

    /// Returns the unsettled tail of the store, if any.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.valid_until..]
    }

    /// Changes the mode for subsequent writes.
    ///
    /// Leaving [`OutputMode::UnsafeEscaped`] closes the current span.
    /// Entering it opens nothing; the next unsafe write starts a new span.
    /// A pending tail is settled (kept, followed by `?`) before the switch.
    pub fn set_mode(&mut self, mode: OutputMode) {
        if mode == self.mode {
            return;
        }
        self.commit_pending();
        if self.span_open {
            self.buf.extend_from_slice(END_BYTES);
            self.span_open = false;
        }
        self.valid_until = self.buf.len();
        self.mode = mode;
    }

    /// Empties the buffer. The mode is kept.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.valid_until = 0;
        self.span_open = false;
    }

    /// Writes one already-decoded character.
    ///
    /// `‹` and `›` are written as `?` in the escaped modes.
    pub fn write_char(&mut self, c: char) {
        if self.mode == OutputMode::SafeRaw {
            let mut utf8 = [0; 4];
            self.write_raw(c.encode_utf8(&mut utf8).as_bytes());
            return;
        }
        if Marker::from_char(c).is_some_and(Marker::is_delimiter) {
            self.write_escaped(ESCAPE_BYTES);
        } else {
            let mut utf8 = [0; 4];
            self.write_escaped(c.encode_utf8(&mut utf8).as_bytes());
        }
    }

    /// Writes a single byte as a character of its own.
    ///
    /// In the escaped modes a non-ASCII byte cannot be a complete character
    /// by itself, so it is written as `?` instead of being held for
    /// lookahead.
    pub fn write_byte(&mut self, b: u8) {
        match self.mode {
            OutputMode::SafeRaw => self.write_raw(&[b]),
            _ if !b.is_ascii() => self.write_escaped(ESCAPE_BYTES),
            _ => self.write_escaped(&[b]),
        }
    }

    /// Writes an arbitrary chunk of bytes.
    ///
    /// Invalid or incomplete encodings are accepted. A chunk may end in the
    /// middle of a character; the next write picks up where it left off.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        match self.mode {
            OutputMode::SafeRaw => self.write_raw(bytes),
            OutputMode::UnsafeEscaped | OutputMode::SafeEscaped => {
                if bytes.is_empty() {
                    // An empty unsafe value still gets its (empty) span. A
                    // pending tail means the span is already open.
                    if self.valid_until == self.buf.len() {
                        self.open_span();
                        self.valid_until = self.buf.len();
                    }
                } else {
                    self.write_escaped(bytes);
                }
            }
        }
    }

    /// Writes a string slice.
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Returns the finalized redactable form without modifying the buffer.
    ///
    /// A pending tail is followed by `?` and an open span gets its closing
    /// `›` in the returned copy only.
    #[must_use]
    pub fn redactable_bytes(&self) -> RedactableBytes {
        let mut out =
            Vec::with_capacity(self.buf.len() + ESCAPE_BYTES.len() + END_BYTES.len());
        out.extend_from_slice(&self.buf);
        if self.valid_until < self.buf.len() {
            out.extend_from_slice(ESCAPE_BYTES);
        }
        if self.span_open {
            out.extend_from_slice(END_BYTES);
        }
        RedactableBytes::from_raw(out)
    }

    /// Returns the finalized redactable form as a string.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with U+FFFD.
    #[must_use]
    pub fn redactable_string(&self) -> RedactableString {
        self.redactable_bytes().into_redactable_string()
    }

    /// Returns the finalized form with span delimiters removed.
    ///
    /// Escaped occurrences (`?`) stay: they stand for content.
    #[must_use]
    pub fn plain_bytes(&self) -> Vec<u8> {
        text::strip_delimiters(self.redactable_bytes().as_bytes())
    }

    /// Returns the plain view as a string, replacing invalid UTF-8 with U+FFFD.
    #[must_use]
    pub fn plain_string(&self) -> String {
        text::lossy_string(self.plain_bytes())
    }

    fn open_span(&mut self) {
        if self.mode == OutputMode::UnsafeEscaped && !self.span_open {
            self.buf.extend_from_slice(START_BYTES);
            self.span_open = true;
        }
    }

    fn close_span(&mut self) {
        if self.span_open {
            self.buf.extend_from_slice(END_BYTES);
            self.span_open = false;
        }
    }

    fn commit_pending(&mut self) {
        if self.valid_until < self.buf.len() {
            self.buf.extend_from_slice(ESCAPE_BYTES);
        }
        self.valid_until = self.buf.len();
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.valid_until = self.buf.len();
    }

    /// Appends `input` in one of the escaped modes, re-examining any pending
    /// tail together with the new bytes.
    fn write_escaped(&mut self, input: &[u8]) {
        if self.valid_until == self.buf.len() {
            self.scan(input);
            return;
        }
        let mut joined = self.buf.split_off(self.valid_until);
        joined.extend_from_slice(input);
        self.scan(&joined);
    }

    fn scan(&mut self, input: &[u8]) {
        let (mut rest, tail) = input.split_at(input.len() - scan::pending_len(input));
        while let Some(step) = scan::step(rest) {
            match step {
                Step::Newlines(n) => {
                    // Newlines never sit inside a span.
                    if self.mode == OutputMode::UnsafeEscaped {
                        self.close_span();
                    }
                    self.buf.extend_from_slice(&rest[..n]);
                }
                Step::Delimiter(_) => {
                    self.open_span();
                    self.buf.extend_from_slice(ESCAPE_BYTES);
                }
                Step::Content(n) => {
                    self.open_span();
                    self.buf.extend_from_slice(&rest[..n]);
                }
            }
            rest = &rest[step.len()..];
        }
        if !tail.is_empty() {
            self.open_span();
        }
        self.valid_until = self.buf.len();
        self.buf.extend_from_slice(tail);
        debug_assert!(
            self.pending().len() <= scan::MAX_PENDING
                && scan::pending_len(self.pending()) == self.pending().len(),
            "pending tail must be a single incomplete character"
        );
    }
}

impl fmt::Display for RedactionBuffer {
    /// Formats the plain view (markers removed).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_string())
    }
}

impl fmt::Write for RedactionBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        RedactionBuffer::write_char(self, c);
        Ok(())
    }
}

impl io::Write for RedactionBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
