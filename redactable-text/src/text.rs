//! Finalized redactable text and the stateless passes over it.
//!
//! [`RedactableString`] and [`RedactableBytes`] hold output whose unsafe
//! spans are delimited by `‹` and `›`. Two passes consume them:
//!
//! - **Redact** replaces each span with `‹×›` (or with the output of a
//!   [`SpanPolicy`]).
//! - **Strip** drops the delimiters and keeps the content.
//!
//! Neither pass needs the code that produced the text.
//!
//! ```
//! use redactable_text::RedactableString;
//!
//! let s = RedactableString::from_raw("user ‹alice› logged in");
//! assert_eq!(s.redact().as_str(), "user ‹×› logged in");
//! assert_eq!(s.strip_markers(), "user alice logged in");
//! ```

use std::{borrow::Cow, fmt};

use bstr::ByteSlice;

use crate::{
    buffer::{OutputMode, RedactionBuffer},
    markers::{self, END_BYTES, ESCAPE_BYTES, Marker, REDACTED_BYTES, START_BYTES},
    policy::SpanPolicy,
};

/// Two-byte lead shared by the `‹` and `›` encodings.
const DELIMITER_LEAD: &[u8] = &[0xe2, 0x80];

/// Iterates over the positions of every `‹` and `›` in `bytes`.
pub(crate) fn delimiter_positions(bytes: &[u8]) -> impl Iterator<Item = (usize, Marker)> + '_ {
    bytes
        .find_iter(DELIMITER_LEAD)
        .filter_map(move |pos| markers::delimiter_at(&bytes[pos..]).map(|marker| (pos, marker)))
}

/// Removes every `‹` and `›` from `bytes`.
pub(crate) fn strip_delimiters(bytes: &[u8]) -> Vec<u8> {
    replace_delimiters(bytes, b"")
}

fn replace_delimiters(bytes: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut copied = 0;
    for (pos, marker) in delimiter_positions(bytes) {
        out.extend_from_slice(&bytes[copied..pos]);
        out.extend_from_slice(with);
        copied = pos + marker.encoding().len();
    }
    out.extend_from_slice(&bytes[copied..]);
    out
}

/// Rewrites every balanced `‹…›` span, passing its interior to `interior`.
///
/// A `‹` followed by another `‹` before any `›` is left in place, as is a
/// `›` with no opening `‹`.
fn rewrite_spans<F>(bytes: &[u8], mut interior: F) -> Vec<u8>
where
    F: FnMut(&[u8], &mut Vec<u8>),
{
    let mut out = Vec::with_capacity(bytes.len());
    let mut copied = 0;
    let mut open: Option<usize> = None;
    for (pos, marker) in delimiter_positions(bytes) {
        match (marker, open) {
            (Marker::Start, _) => open = Some(pos),
            (Marker::End, Some(start)) => {
                out.extend_from_slice(&bytes[copied..start]);
                out.extend_from_slice(START_BYTES);
                interior(&bytes[start + START_BYTES.len()..pos], &mut out);
                out.extend_from_slice(END_BYTES);
                copied = pos + END_BYTES.len();
                open = None;
            }
            _ => {}
        }
    }
    out.extend_from_slice(&bytes[copied..]);
    out
}

fn is_balanced_bytes(bytes: &[u8]) -> bool {
    let mut open = false;
    for (_, marker) in delimiter_positions(bytes) {
        match marker {
            Marker::Start if open => return false,
            Marker::End if !open => return false,
            Marker::Start | Marker::End => open = !open,
            Marker::Redacted | Marker::Escape => {}
        }
    }
    !open
}

/// Converts bytes to a `String`, replacing invalid sequences with U+FFFD.
pub(crate) fn lossy_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => err.as_bytes().to_str_lossy().into_owned(),
    }
}

/// Replaces every `‹` and `›` in `s` with `?`.
///
/// ```
/// assert_eq!(redactable_text::escape_markers("a ‹ b › c"), "a ? b ? c");
/// ```
#[must_use]
pub fn escape_markers(s: &str) -> String {
    lossy_string(escape_marker_bytes(s.as_bytes()))
}

/// Replaces every `‹` and `›` in `bytes` with `?`.
#[must_use]
pub fn escape_marker_bytes(bytes: &[u8]) -> Vec<u8> {
    replace_delimiters(bytes, ESCAPE_BYTES)
}

/// Renders `bytes` as a single unsafe value.
///
/// ```
/// use redactable_text::escape_bytes;
///
/// assert_eq!(escape_bytes(b"abc\n\ncde").as_bytes(), "‹abc›\n\n‹cde›".as_bytes());
/// ```
#[must_use]
pub fn escape_bytes(bytes: &[u8]) -> RedactableBytes {
    let mut buf = RedactionBuffer::new();
    buf.write_bytes(bytes);
    buf.redactable_bytes()
}

/// Renders `s` as a single unsafe value.
#[must_use]
pub fn escape_str(s: &str) -> RedactableString {
    escape_bytes(s.as_bytes()).into_redactable_string()
}

// =============================================================================
// RedactableString
// =============================================================================

/// A string whose unsafe spans are delimited by `‹` and `›`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RedactableString(String);

impl RedactableString {
    /// Wraps text that already is well-formed redactable text.
    ///
    /// Nothing is escaped: markers in `s` are taken as structure.
    #[must_use]
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Wraps non-sensitive text, escaping any delimiters it contains.
    #[must_use]
    pub fn safe(s: &str) -> Self {
        Self(escape_markers(s))
    }

    /// Wraps sensitive text as one unsafe value.
    #[must_use]
    pub fn unsafe_value(s: &str) -> Self {
        escape_str(s)
    }

    /// Returns `‹` as redactable text.
    #[must_use]
    pub fn start_marker() -> Self {
        Self(markers::START.to_string())
    }

    /// Returns `›` as redactable text.
    #[must_use]
    pub fn end_marker() -> Self {
        Self(markers::END.to_string())
    }

    /// Returns a redacted span, `‹×›`.
    #[must_use]
    pub fn redacted_marker() -> Self {
        Self(format!("{}{}{}", markers::START, markers::REDACTED, markers::END))
    }

    /// Returns the text, markers included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the text, markers included.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the length in bytes, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every unsafe span with `‹×›`.
    #[must_use]
    pub fn redact(&self) -> Self {
        Self(lossy_string(redact_bytes(self.0.as_bytes())))
    }

    /// Replaces the interior of every unsafe span with the output of `policy`.
    ///
    /// The result is still redactable text: each span stays delimited.
    #[must_use]
    pub fn redact_with(&self, policy: &SpanPolicy) -> Self {
        Self(lossy_string(redact_bytes_with(self.0.as_bytes(), policy)))
    }

    /// Removes the span delimiters and keeps their content.
    #[must_use]
    pub fn strip_markers(&self) -> String {
        lossy_string(strip_delimiters(self.0.as_bytes()))
    }

    /// Returns `true` if every `‹` is closed by a later `›` with no nesting.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        is_balanced_bytes(self.0.as_bytes())
    }

    /// Converts to the byte form.
    #[must_use]
    pub fn to_bytes(&self) -> RedactableBytes {
        RedactableBytes(self.0.as_bytes().to_vec())
    }

    /// Writes the text into `buf` without re-escaping it.
    ///
    /// The buffer's mode is restored afterwards.
    pub fn write_into(&self, buf: &mut RedactionBuffer) {
        let mode = buf.mode();
        buf.set_mode(OutputMode::SafeRaw);
        buf.write_str(&self.0);
        buf.set_mode(mode);
    }
}

impl fmt::Display for RedactableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RedactableString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RedactableString> for String {
    fn from(value: RedactableString) -> Self {
        value.0
    }
}

impl From<RedactableBytes> for RedactableString {
    fn from(value: RedactableBytes) -> Self {
        value.into_redactable_string()
    }
}

impl PartialEq<str> for RedactableString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RedactableString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// RedactableBytes
// =============================================================================

/// A byte string whose unsafe spans are delimited by `‹` and `›`.
///
/// Unlike [`RedactableString`], the content is not required to be UTF-8.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RedactableBytes(Vec<u8>);

impl RedactableBytes {
    /// Wraps bytes that already are well-formed redactable text.
    #[must_use]
    pub fn from_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the bytes, markers included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the wrapper and returns the bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length in bytes, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every unsafe span with `‹×›`.
    #[must_use]
    pub fn redact(&self) -> Self {
        Self(redact_bytes(&self.0))
    }

    /// Replaces the interior of every unsafe span with the output of `policy`.
    #[must_use]
    pub fn redact_with(&self, policy: &SpanPolicy) -> Self {
        Self(redact_bytes_with(&self.0, policy))
    }

    /// Removes the span delimiters and keeps their content.
    #[must_use]
    pub fn strip_markers(&self) -> Vec<u8> {
        strip_delimiters(&self.0)
    }

    /// Returns `true` if every `‹` is closed by a later `›` with no nesting.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        is_balanced_bytes(&self.0)
    }

    /// Converts to the string form, borrowing when the bytes are valid UTF-8.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        self.0.to_str_lossy()
    }

    /// Converts to [`RedactableString`], replacing invalid UTF-8 with U+FFFD.
    ///
    /// The replacement character is not a marker, so balance is preserved.
    #[must_use]
    pub fn into_redactable_string(self) -> RedactableString {
        RedactableString(lossy_string(self.0))
    }
}

impl fmt::Display for RedactableBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0.as_bstr(), f)
    }
}

impl AsRef<[u8]> for RedactableBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<RedactableString> for RedactableBytes {
    fn from(value: RedactableString) -> Self {
        Self(value.0.into_bytes())
    }
}

impl From<RedactableBytes> for Vec<u8> {
    fn from(value: RedactableBytes) -> Self {
        value.0
    }
}

fn redact_bytes(bytes: &[u8]) -> Vec<u8> {
    rewrite_spans(bytes, |_, out| out.extend_from_slice(REDACTED_BYTES))
}

fn redact_bytes_with(bytes: &[u8], policy: &SpanPolicy) -> Vec<u8> {
    rewrite_spans(bytes, |interior, out| {
        let replaced = policy.apply_to(&interior.to_str_lossy());
        out.extend_from_slice(escape_markers(&replaced).as_bytes());
    })
}

#[cfg(feature = "json")]
mod serde_impls {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::RedactableString;

    impl Serialize for RedactableString {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for RedactableString {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            String::deserialize(deserializer).map(RedactableString::from_raw)
        }
    }
}
