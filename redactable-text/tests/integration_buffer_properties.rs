//! Property tests for the redaction buffer.
//!
//! These tests drive `RedactionBuffer` with random write sequences and check
//! that:
//! - the finalized view always has well-formed, non-nested spans
//! - no delimiter survives in content (stripping the view leaves none)
//! - the result does not depend on how bytes are chunked
//! - split UTF-8 input never leaves a broken character in the settled region
//! - unsafe content never survives redaction

use quickcheck::{Arbitrary, Gen, QuickCheck};
use redactable_text::{OutputMode, RedactableString, RedactionBuffer, markers};

/// Bytes that exercise every interesting scanner path: delimiter encodings
/// and their fragments, the other markers, newlines, and invalid UTF-8.
const ALPHABET: &[u8] = &[
    b'a', b'z', b' ', b'\n', b'?', 0xe2, 0x80, 0xb9, 0xba, 0xa0, 0xc3, 0x97, 0xe4, 0xff,
];

#[derive(Clone, Debug)]
struct Chunk(Vec<u8>);

impl Arbitrary for Chunk {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 8;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            match usize::arbitrary(g) % 6 {
                0 => bytes.extend_from_slice(markers::START_BYTES),
                1 => bytes.extend_from_slice(markers::END_BYTES),
                _ => bytes.push(*g.choose(ALPHABET).unwrap_or(&b'a')),
            }
        }
        Chunk(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Chunk))
    }
}

#[derive(Clone, Debug)]
enum Op {
    Mode(OutputMode),
    Bytes(Chunk),
    Str(String),
    Char(char),
    Byte(u8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 6 {
            0 => Op::Mode(
                *g.choose(&[
                    OutputMode::UnsafeEscaped,
                    OutputMode::SafeEscaped,
                    OutputMode::SafeRaw,
                ])
                .unwrap_or(&OutputMode::UnsafeEscaped),
            ),
            1 | 2 => Op::Bytes(Chunk::arbitrary(g)),
            3 => Op::Str(
                (*g.choose(&["", "hello", "a‹b", "›", "x\ny", "\n\n", "秘密", "×?"])
                    .unwrap_or(&""))
                .to_owned(),
            ),
            4 => Op::Char(*g.choose(&['a', '‹', '›', '\n', '×', '䬦']).unwrap_or(&'a')),
            _ => Op::Byte(*g.choose(ALPHABET).unwrap_or(&b'a')),
        }
    }
}

/// Applies `op`. Raw writes are cut down to ASCII: raw mode trusts its input
/// to be well-formed redactable text.
fn apply(buf: &mut RedactionBuffer, op: &Op) {
    let raw = buf.mode() == OutputMode::SafeRaw;
    match op {
        Op::Mode(mode) => buf.set_mode(*mode),
        Op::Bytes(Chunk(bytes)) if raw => buf.write_bytes(&ascii_only(bytes)),
        Op::Bytes(Chunk(bytes)) => buf.write_bytes(bytes),
        Op::Str(s) if raw => buf.write_bytes(&ascii_only(s.as_bytes())),
        Op::Str(s) => buf.write_str(s),
        Op::Char(c) if raw && !c.is_ascii() => {}
        Op::Char(c) => buf.write_char(*c),
        Op::Byte(b) if raw && !b.is_ascii() => {}
        Op::Byte(b) => buf.write_byte(*b),
    }
}

fn ascii_only(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(u8::is_ascii).collect()
}

fn run(ops: &[Op]) -> RedactionBuffer {
    let mut buf = RedactionBuffer::new();
    for op in ops {
        apply(&mut buf, op);
    }
    buf
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn spans_are_always_balanced() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let buf = run(&ops);
        buf.redactable_bytes().is_balanced() && buf.valid_boundary() <= buf.len()
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn content_never_contains_delimiters() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let plain = run(&ops).plain_bytes();
        !contains(&plain, markers::START_BYTES) && !contains(&plain, markers::END_BYTES)
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn pending_tail_is_one_incomplete_character() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let buf = run(&ops);
        let pending = buf.pending();
        if pending.is_empty() {
            return true;
        }
        // The input ended inside the first character: nothing invalid, nothing complete.
        pending.len() <= 3
            && matches!(
                std::str::from_utf8(pending),
                Err(err) if err.valid_up_to() == 0 && err.error_len().is_none()
            )
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn chunking_does_not_change_the_result() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(chunks: Vec<Chunk>, safe: bool) -> bool {
        let mode = if safe {
            OutputMode::SafeEscaped
        } else {
            OutputMode::UnsafeEscaped
        };
        let chunks: Vec<Vec<u8>> = chunks
            .into_iter()
            .map(|Chunk(bytes)| bytes)
            .filter(|bytes| !bytes.is_empty())
            .collect();
        if chunks.is_empty() {
            return true;
        }

        let mut split = RedactionBuffer::new().with_mode(mode);
        for chunk in &chunks {
            split.write_bytes(chunk);
        }
        let mut bulk = RedactionBuffer::new().with_mode(mode);
        bulk.write_bytes(&chunks.concat());

        let mut bytewise = RedactionBuffer::new().with_mode(mode);
        for byte in chunks.concat() {
            bytewise.write_bytes(&[byte]);
        }

        split.redactable_bytes() == bulk.redactable_bytes()
            && bytewise.redactable_bytes() == bulk.redactable_bytes()
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<Chunk>, bool) -> bool);
}

#[test]
fn split_utf8_keeps_the_settled_region_valid() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, cuts: Vec<usize>, safe: bool) -> bool {
        let mode = if safe {
            OutputMode::SafeEscaped
        } else {
            OutputMode::UnsafeEscaped
        };
        let bytes = text.as_bytes();
        let mut offsets: Vec<usize> = cuts.iter().map(|c| c % (bytes.len() + 1)).collect();
        offsets.push(bytes.len());
        offsets.sort_unstable();

        let mut buf = RedactionBuffer::new().with_mode(mode);
        let mut start = 0;
        for end in offsets {
            buf.write_bytes(&bytes[start..end]);
            start = end;
            let view = buf.redactable_bytes();
            if std::str::from_utf8(&view.as_bytes()[..buf.valid_boundary()]).is_err() {
                return false;
            }
        }
        buf.pending().is_empty()
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String, Vec<usize>, bool) -> bool);
}

#[test]
fn empty_unsafe_writes_keep_spans_balanced() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let mut buf = RedactionBuffer::new();
        for op in &ops {
            apply(&mut buf, op);
            buf.set_mode(OutputMode::UnsafeEscaped);
            buf.write_str("");
            if !buf.redactable_bytes().is_balanced() {
                return false;
            }
        }
        true
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn finalize_does_not_disturb_later_writes() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(before: Vec<Op>, after: Vec<Op>) -> bool {
        let mut observed = run(&before);
        let first = observed.redactable_bytes();
        let second = observed.redactable_bytes();

        let mut untouched = run(&before);
        for op in &after {
            apply(&mut observed, op);
            apply(&mut untouched, op);
        }
        first == second && observed.redactable_bytes() == untouched.redactable_bytes()
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<Op>, Vec<Op>) -> bool);
}

#[test]
fn reset_always_empties() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let mut buf = run(&ops);
        let mode = buf.mode();
        buf.reset();
        buf.redactable_bytes().is_empty() && buf.mode() == mode && !buf.is_span_open()
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn stripping_the_view_gives_the_plain_view() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let buf = run(&ops);
        buf.redactable_bytes().strip_markers() == buf.plain_bytes()
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn redaction_removes_all_unsafe_content() {
    // Safe pieces use digits only and unsafe pieces letters only, so any
    // letter left after redaction is a leak.
    #[allow(clippy::needless_pass_by_value)]
    fn prop(pieces: Vec<(bool, u32, String)>) -> bool {
        let mut buf = RedactionBuffer::new();
        for (unsafe_piece, number, text) in &pieces {
            if *unsafe_piece {
                buf.set_mode(OutputMode::UnsafeEscaped);
                let letters: String = text
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic() || *c == '\n')
                    .collect();
                buf.write_str(&letters);
            } else {
                buf.set_mode(OutputMode::SafeEscaped);
                buf.write_str(&number.to_string());
            }
        }
        let redacted: RedactableString = buf.redactable_string().redact();
        redacted.is_balanced() && !redacted.as_str().chars().any(|c| c.is_ascii_alphabetic())
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<(bool, u32, String)>) -> bool);
}
