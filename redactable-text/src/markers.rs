//! The reserved marker alphabet.
//!
//! Redactable text reserves four code points:
//!
//! - [`Marker::Start`] (`‹`) opens an unsafe span.
//! - [`Marker::End`] (`›`) closes an unsafe span.
//! - [`Marker::Redacted`] (`×`) replaces the interior of a span once it has
//!   been redacted, so a redacted span reads `‹×›`.
//! - [`Marker::Escape`] (`?`) stands in for any `‹` or `›` that came from
//!   caller content rather than from span structure.
//!
//! `Start` and `End` are the *delimiters*: they are the only markers that are
//! structural, and the only ones escaped when they occur in content.
//!
//! Everything here is a constant or a pure function over byte slices.

/// Start-of-span character.
pub const START: char = '\u{2039}';
/// End-of-span character.
pub const END: char = '\u{203A}';
/// Placeholder for the interior of a redacted span.
pub const REDACTED: char = '\u{00D7}';
/// Placeholder for a delimiter found inside caller content.
pub const ESCAPE: char = '?';

/// UTF-8 encoding of [`START`].
pub const START_BYTES: &[u8] = "\u{2039}".as_bytes();
/// UTF-8 encoding of [`END`].
pub const END_BYTES: &[u8] = "\u{203A}".as_bytes();
/// UTF-8 encoding of [`REDACTED`].
pub const REDACTED_BYTES: &[u8] = "\u{00D7}".as_bytes();
/// UTF-8 encoding of [`ESCAPE`].
pub const ESCAPE_BYTES: &[u8] = b"?";

/// Length in bytes of the longest marker encoding.
pub const MAX_MARKER_LEN: usize = 3;

/// One of the four reserved code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Opens an unsafe span.
    Start,
    /// Closes an unsafe span.
    End,
    /// Replaces the interior of a redacted span.
    Redacted,
    /// Replaces a delimiter that occurred in content.
    Escape,
}

impl Marker {
    /// All markers, in a fixed order.
    pub const ALL: [Marker; 4] = [Marker::Start, Marker::End, Marker::Redacted, Marker::Escape];

    /// The two structural markers.
    pub const DELIMITERS: [Marker; 2] = [Marker::Start, Marker::End];

    /// Returns the fixed byte encoding of the marker.
    #[must_use]
    pub const fn encoding(self) -> &'static [u8] {
        match self {
            Marker::Start => START_BYTES,
            Marker::End => END_BYTES,
            Marker::Redacted => REDACTED_BYTES,
            Marker::Escape => ESCAPE_BYTES,
        }
    }

    /// Returns the marker as a character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Marker::Start => START,
            Marker::End => END,
            Marker::Redacted => REDACTED,
            Marker::Escape => ESCAPE,
        }
    }

    /// Returns `true` for [`Marker::Start`] and [`Marker::End`].
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        matches!(self, Marker::Start | Marker::End)
    }

    /// Returns `true` if `bytes` is exactly this marker's encoding.
    #[must_use]
    pub fn matches(self, bytes: &[u8]) -> bool {
        self.encoding() == bytes
    }

    /// Returns `true` if `bytes` is a non-empty proper prefix of this marker's encoding.
    #[must_use]
    pub fn has_proper_prefix(self, bytes: &[u8]) -> bool {
        let encoding = self.encoding();
        !bytes.is_empty() && bytes.len() < encoding.len() && encoding.starts_with(bytes)
    }

    /// Maps a character back to the marker it encodes, if any.
    #[must_use]
    pub fn from_char(c: char) -> Option<Marker> {
        Marker::ALL.into_iter().find(|marker| marker.as_char() == c)
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        f.write_char(self.as_char())
    }
}

/// Returns the marker whose encoding is exactly `bytes`.
#[must_use]
pub fn matches_marker(bytes: &[u8]) -> Option<Marker> {
    Marker::ALL.into_iter().find(|marker| marker.matches(bytes))
}

/// Returns `true` if `bytes` is a non-empty proper prefix of any marker encoding.
#[must_use]
pub fn is_marker_prefix(bytes: &[u8]) -> bool {
    Marker::ALL
        .into_iter()
        .any(|marker| marker.has_proper_prefix(bytes))
}

/// Returns `true` if `bytes` is a non-empty proper prefix of `‹` or `›`.
///
/// Such bytes are why the buffer holds an incomplete trailing character and
/// flags it with `?` if input stops there. A partial `×` is harmless; it is
/// never escaped.
#[must_use]
pub fn is_delimiter_prefix(bytes: &[u8]) -> bool {
    Marker::DELIMITERS
        .into_iter()
        .any(|marker| marker.has_proper_prefix(bytes))
}

/// Returns the delimiter that `bytes` starts with, if any.
#[must_use]
pub(crate) fn delimiter_at(bytes: &[u8]) -> Option<Marker> {
    Marker::DELIMITERS
        .into_iter()
        .find(|marker| bytes.starts_with(marker.encoding()))
}

/// Returns the length of the longest marker encoding.
#[must_use]
pub fn max_marker_len() -> usize {
    Marker::ALL
        .into_iter()
        .map(|marker| marker.encoding().len())
        .max()
        .unwrap_or(MAX_MARKER_LEN)
}
