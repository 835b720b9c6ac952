//! The traits that let values describe their own safety.

use std::{error::Error as StdError, fmt};

use super::StringBuilder;

// =============================================================================
// SafeValue - Types whose rendering never carries sensitive data
// =============================================================================

/// Marker for types whose [`Display`](fmt::Display) output is always safe.
///
/// Safe values are written without a span. Delimiters in their output are
/// still escaped, so a `SafeValue` cannot forge markers.
///
/// Derive it with `#[derive(SafeValue)]` on your own types. The type must
/// implement `Display`:
///
/// ```compile_fail
/// use redactable_text::SafeValue;
///
/// #[derive(SafeValue)]
/// struct NoDisplay(u16);
/// ```
pub trait SafeValue: fmt::Display {}

impl<T: SafeValue + ?Sized> SafeValue for &T {}

// =============================================================================
// SafeFormat - Types that print themselves
// =============================================================================

/// Types that know which of their parts are sensitive.
///
/// The implementation writes into the builder with the safe and unsafe
/// methods as appropriate. If it returns an error, the output written so far
/// is kept and a failure diagnostic is appended.
///
/// ```
/// use redactable_text::{Arg, FormatError, SafeFormat, StringBuilder};
///
/// struct Login<'a> {
///     user: &'a str,
///     attempts: u32,
/// }
///
/// impl SafeFormat for Login<'_> {
///     fn safe_format(&self, w: &mut StringBuilder) -> Result<(), FormatError> {
///         w.safe_str("login user=");
///         w.unsafe_str(self.user);
///         w.safe_str(" attempts=");
///         w.safe_value(&self.attempts);
///         Ok(())
///     }
/// }
///
/// let mut w = StringBuilder::new();
/// w.print(Arg::formatted(&Login { user: "bob", attempts: 3 }));
/// assert_eq!(w.redactable_string().as_str(), "login user=‹bob› attempts=3");
/// ```
pub trait SafeFormat {
    /// Writes `self` into `w`.
    fn safe_format(&self, w: &mut StringBuilder) -> Result<(), FormatError>;
}

impl<T: SafeFormat + ?Sized> SafeFormat for &T {
    fn safe_format(&self, w: &mut StringBuilder) -> Result<(), FormatError> {
        (**self).safe_format(w)
    }
}

// =============================================================================
// ErrorFormatter - Caller-supplied error rendering
// =============================================================================

/// Strategy for printing error values.
///
/// Without one, errors print as unsafe text. Any
/// `Fn(&(dyn Error + 'static), &mut StringBuilder) -> Result<(), FormatError>`
/// closure that is `Send + Sync` is an `ErrorFormatter`.
pub trait ErrorFormatter: Send + Sync {
    /// Writes `err` into `w`.
    fn format_error(
        &self,
        err: &(dyn StdError + 'static),
        w: &mut StringBuilder,
    ) -> Result<(), FormatError>;
}

impl<F> ErrorFormatter for F
where
    F: Fn(&(dyn StdError + 'static), &mut StringBuilder) -> Result<(), FormatError> + Send + Sync,
{
    fn format_error(
        &self,
        err: &(dyn StdError + 'static),
        w: &mut StringBuilder,
    ) -> Result<(), FormatError> {
        self(err, w)
    }
}

// =============================================================================
// FormatError
// =============================================================================

/// Failure reported by a [`SafeFormat`] or [`ErrorFormatter`] callback.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A free-form failure description.
    #[error("{0}")]
    Message(String),
    /// A `Display` implementation returned an error.
    #[error("formatter error")]
    Fmt(#[from] fmt::Error),
}

impl FormatError {
    /// Creates a [`FormatError::Message`].
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
