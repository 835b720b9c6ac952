//! [`StringBuilder`]: a redaction buffer with a value-level API.

use std::{fmt, fmt::Write as _, sync::Arc};

use super::{Arg, ErrorFormatter, FormatError, SafeFormat, SafeValue};
use crate::{
    buffer::{OutputMode, RedactionBuffer},
    text::{RedactableBytes, RedactableString},
};

// =============================================================================
// PrintConfig
// =============================================================================

/// Settings shared by everything printed through one [`StringBuilder`].
#[derive(Clone)]
pub struct PrintConfig {
    error_formatter: Option<Arc<dyn ErrorFormatter>>,
    trim_unsafe_trailing_whitespace: bool,
}

impl PrintConfig {
    /// Uses `formatter` for [`Arg::Error`] arguments.
    #[must_use]
    pub fn with_error_formatter<F>(mut self, formatter: F) -> Self
    where
        F: ErrorFormatter + 'static,
    {
        self.error_formatter = Some(Arc::new(formatter));
        self
    }

    /// Whether trailing whitespace is trimmed from unsafe strings. On by default.
    #[must_use]
    pub fn trim_unsafe_trailing_whitespace(mut self, trim: bool) -> Self {
        self.trim_unsafe_trailing_whitespace = trim;
        self
    }

    /// Returns `true` if an error formatter is installed.
    pub fn has_error_formatter(&self) -> bool {
        self.error_formatter.is_some()
    }

    /// Returns `true` if trailing whitespace is trimmed from unsafe strings.
    pub fn trims_unsafe_trailing_whitespace(&self) -> bool {
        self.trim_unsafe_trailing_whitespace
    }
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            error_formatter: None,
            trim_unsafe_trailing_whitespace: true,
        }
    }
}

impl fmt::Debug for PrintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintConfig")
            .field("error_formatter", &self.error_formatter.is_some())
            .field(
                "trim_unsafe_trailing_whitespace",
                &self.trim_unsafe_trailing_whitespace,
            )
            .finish()
    }
}

// =============================================================================
// StringBuilder
// =============================================================================

/// Builds redactable text one piece at a time.
///
/// Each method picks the output mode for what it writes, so safe and unsafe
/// pieces can be interleaved freely.
///
/// ```
/// use redactable_text::StringBuilder;
///
/// let mut b = StringBuilder::new();
/// b.safe_str("user ");
/// b.unsafe_str("alice  ");
/// b.safe_char('\n');
/// assert_eq!(b.redactable_string().as_str(), "user ‹alice›\n");
/// assert_eq!(b.to_string(), "user alice\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct StringBuilder {
    buf: RedactionBuffer,
    config: PrintConfig,
}

impl StringBuilder {
    /// Creates an empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with `config`.
    #[must_use]
    pub fn with_config(config: PrintConfig) -> Self {
        Self {
            buf: RedactionBuffer::new(),
            config,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Returns the underlying buffer.
    pub fn buffer(&self) -> &RedactionBuffer {
        &self.buf
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards everything written so far. The configuration is kept.
    pub fn reset(&mut self) {
        self.buf.reset();
    }

    /// Writes a safe string.
    pub fn safe_str(&mut self, s: &str) {
        self.buf.set_mode(OutputMode::SafeEscaped);
        self.buf.write_str(s);
    }

    /// Writes a safe character.
    pub fn safe_char(&mut self, c: char) {
        self.buf.set_mode(OutputMode::SafeEscaped);
        self.buf.write_char(c);
    }

    /// Writes the `Display` output of a safe value.
    pub fn safe_value<T: SafeValue + ?Sized>(&mut self, value: &T) {
        self.safe_display(value);
    }

    /// Writes an unsafe string inside a span.
    ///
    /// Trailing whitespace is dropped unless disabled in the [`PrintConfig`].
    pub fn unsafe_str(&mut self, s: &str) {
        let s = if self.config.trim_unsafe_trailing_whitespace {
            s.trim_end()
        } else {
            s
        };
        self.buf.set_mode(OutputMode::UnsafeEscaped);
        self.buf.write_str(s);
    }

    /// Writes an unsafe character inside a span.
    pub fn unsafe_char(&mut self, c: char) {
        self.buf.set_mode(OutputMode::UnsafeEscaped);
        self.buf.write_char(c);
    }

    /// Writes one unsafe byte inside a span.
    ///
    /// A non-ASCII byte is written as `?`.
    pub fn unsafe_byte(&mut self, b: u8) {
        self.buf.set_mode(OutputMode::UnsafeEscaped);
        self.buf.write_byte(b);
    }

    /// Writes unsafe bytes inside a span. The bytes are not trimmed.
    pub fn unsafe_bytes(&mut self, bytes: &[u8]) {
        self.buf.set_mode(OutputMode::UnsafeEscaped);
        self.buf.write_bytes(bytes);
    }

    /// Appends text that is already redactable, markers included.
    pub fn print_redactable(&mut self, s: &RedactableString) {
        self.print_redactable_bytes(s.as_str().as_bytes());
    }

    fn print_redactable_bytes(&mut self, bytes: &[u8]) {
        self.buf.set_mode(OutputMode::SafeRaw);
        self.buf.write_bytes(bytes);
    }

    /// Prints one argument.
    pub fn print<'a>(&mut self, arg: impl Into<Arg<'a>>) {
        match arg.into() {
            Arg::Safe(value) => self.safe_display(value),
            Arg::Unsafe(value) | Arg::Plain(value) => self.unsafe_display(value),
            Arg::SelfDescribing(value) => {
                if let Err(err) = value.safe_format(self) {
                    self.write_failure("SafeFormat method", &err);
                }
            }
            Arg::Redactable(bytes) => self.print_redactable_bytes(bytes),
            Arg::Error(err) => match self.config.error_formatter.clone() {
                Some(formatter) => {
                    if let Err(failure) = formatter.format_error(err, self) {
                        self.write_failure("error formatter", &failure);
                    }
                }
                None => self.unsafe_display(&err),
            },
        }
    }

    /// Prints several arguments separated by single safe spaces.
    pub fn print_all<'a, I>(&mut self, args: I)
    where
        I: IntoIterator<Item = Arg<'a>>,
    {
        for (i, arg) in args.into_iter().enumerate() {
            if i > 0 {
                self.safe_char(' ');
            }
            self.print(arg);
        }
    }

    /// Returns the redactable form of everything written.
    pub fn redactable_string(&self) -> RedactableString {
        self.buf.redactable_string()
    }

    /// Returns the redactable form as bytes.
    pub fn redactable_bytes(&self) -> RedactableBytes {
        self.buf.redactable_bytes()
    }

    /// Consumes the builder and returns its redactable form.
    pub fn into_redactable_string(self) -> RedactableString {
        self.buf.redactable_string()
    }

    fn safe_display(&mut self, value: &(impl fmt::Display + ?Sized)) {
        self.buf.set_mode(OutputMode::SafeEscaped);
        if write!(self.buf, "{value}").is_err() {
            self.write_failure("Display", &FormatError::Fmt(fmt::Error));
        }
    }

    fn unsafe_display(&mut self, value: &(impl fmt::Display + ?Sized)) {
        let mut rendered = String::new();
        let result = write!(rendered, "{value}");
        self.unsafe_str(&rendered);
        if result.is_err() {
            self.write_failure("Display", &FormatError::Fmt(fmt::Error));
        }
    }

    /// Appends `%!v(FAILED=<source>: <message>)` as unsafe text.
    fn write_failure(&mut self, source: &str, err: &FormatError) {
        #[cfg(feature = "tracing")]
        tracing::debug!(source, "redactable formatting callback failed");
        let diagnostic = format!("%!v(FAILED={source}: {err})");
        self.unsafe_str(&diagnostic);
    }
}

impl fmt::Display for StringBuilder {
    /// Formats the plain text, markers removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.buf, f)
    }
}

impl fmt::Write for StringBuilder {
    /// Writes as unsafe text. No trimming is applied to streamed writes.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.set_mode(OutputMode::UnsafeEscaped);
        self.buf.write_str(s);
        Ok(())
    }
}
