//! Classification of the bytes at the head of an escaped write.
//!
//! The scanner answers one question per position: is this the start of a
//! delimiter, a newline, or a run of ordinary content? Before that,
//! [`pending_len`] splits off a trailing character that is still missing
//! bytes, so the settled part never ends mid-encoding.

use bstr::ByteSlice;

use crate::markers::{self, Marker};

/// Longest incomplete UTF-8 sequence: a four-byte lead and two continuations.
pub(super) const MAX_PENDING: usize = 3;

/// Bytes that end a run of ordinary content: a newline, or the lead byte
/// shared by both delimiter encodings.
const RUN_STOPS: &[u8] = &[b'\n', 0xe2];

/// What the scanner found at the head of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Step {
    /// A complete delimiter encoding that came from content.
    Delimiter(Marker),
    /// A run of `n` newline bytes.
    Newlines(usize),
    /// `n` bytes that cannot be part of any delimiter.
    Content(usize),
}

impl Step {
    /// Number of input bytes consumed by this step.
    pub(super) fn len(self) -> usize {
        match self {
            Step::Delimiter(marker) => marker.encoding().len(),
            Step::Newlines(n) | Step::Content(n) => n,
        }
    }
}

/// Length of the incomplete character at the end of `bytes`, or 0.
///
/// Only a well-formed prefix counts: a lead byte followed by fewer
/// continuation bytes than it announces. Bytes that can never decode are not
/// held; waiting for more input would not change them.
pub(super) fn pending_len(bytes: &[u8]) -> usize {
    let window = &bytes[bytes.len().saturating_sub(MAX_PENDING)..];
    let Some(lead) = window.iter().rposition(|&b| !is_continuation(b)) else {
        return 0;
    };
    let tail = &window[lead..];
    match std::str::from_utf8(tail) {
        // `error_len() == None` means the input ended inside a character.
        Err(err) if err.valid_up_to() == 0 && err.error_len().is_none() => tail.len(),
        _ => 0,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

/// Classifies the head of `bytes`. Returns `None` once the input is exhausted.
///
/// `bytes` must not end in an incomplete character; see [`pending_len`].
pub(super) fn step(bytes: &[u8]) -> Option<Step> {
    let &first = bytes.first()?;
    if first == b'\n' {
        let n = bytes.iter().take_while(|&&b| b == b'\n').count();
        return Some(Step::Newlines(n));
    }
    if let Some(marker) = markers::delimiter_at(bytes) {
        return Some(Step::Delimiter(marker));
    }
    // The first byte is settled; extend the run up to the next byte that
    // needs a closer look.
    let run = bytes[1..]
        .find_byteset(RUN_STOPS)
        .map_or(bytes.len(), |offset| offset + 1);
    Some(Step::Content(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{END_BYTES, START_BYTES};

    #[test]
    fn empty_input_has_no_step() {
        assert_eq!(step(b""), None);
    }

    #[test]
    fn ascii_is_one_content_run() {
        assert_eq!(step(b"hello"), Some(Step::Content(5)));
    }

    #[test]
    fn content_run_stops_before_newline_and_lead_byte() {
        assert_eq!(step(b"ab\ncd"), Some(Step::Content(2)));
        assert_eq!(step("ab‹".as_bytes()), Some(Step::Content(2)));
    }

    #[test]
    fn newlines_are_grouped() {
        assert_eq!(step(b"\n\n\nx"), Some(Step::Newlines(3)));
    }

    #[test]
    fn delimiters_are_recognised() {
        assert_eq!(step(START_BYTES), Some(Step::Delimiter(Marker::Start)));
        assert_eq!(step("›abc".as_bytes()), Some(Step::Delimiter(Marker::End)));
    }

    #[test]
    fn delimiter_prefixes_are_pending() {
        assert_eq!(pending_len(&START_BYTES[..1]), 1);
        assert_eq!(pending_len(&END_BYTES[..2]), 2);
        assert_eq!(pending_len(&[b'a', b'b', 0xe2, 0x80]), 2);
    }

    #[test]
    fn other_incomplete_characters_are_pending() {
        // Prefix of 䬦.
        assert_eq!(pending_len(&[0xe4, 0xac]), 2);
        // First three bytes of U+1F600.
        assert_eq!(pending_len(&[b'x', 0xf0, 0x9f, 0x98]), 3);
    }

    #[test]
    fn complete_or_undecodable_tails_are_not_pending() {
        assert_eq!(pending_len(b""), 0);
        assert_eq!(pending_len(b"hello"), 0);
        assert_eq!(pending_len("a䬦".as_bytes()), 0);
        assert_eq!(pending_len(START_BYTES), 0);
        // Lead cut off by ASCII.
        assert_eq!(pending_len(&[0xe2, 0x80, b'h']), 0);
        // Never valid as a lead byte.
        assert_eq!(pending_len(&[b'a', 0xff]), 0);
        // E0 must be followed by A0..=BF.
        assert_eq!(pending_len(&[0xe0, 0x80]), 0);
        // Stray continuation bytes.
        assert_eq!(pending_len(&[0x80, 0x80, 0x80]), 0);
    }

    #[test]
    fn broken_prefix_is_content() {
        // E2 80 followed by ASCII can never become a delimiter.
        assert_eq!(step(&[0xe2, 0x80, b'h', b'i']), Some(Step::Content(4)));
        // A lead byte followed by another lead byte settles only the first.
        assert_eq!(step(&[0xe2, 0xe2]), Some(Step::Content(1)));
    }

    #[test]
    fn other_multibyte_characters_are_content() {
        assert_eq!(step("䬦".as_bytes()), Some(Step::Content(3)));
        // U+2020 (dagger) shares the E2 80 lead with the delimiters.
        assert_eq!(step("†x".as_bytes()), Some(Step::Content(4)));
    }

    #[test]
    fn step_len_matches_consumption() {
        assert_eq!(Step::Delimiter(Marker::End).len(), 3);
        assert_eq!(Step::Newlines(2).len(), 2);
        assert_eq!(Step::Content(7).len(), 7);
    }
}
