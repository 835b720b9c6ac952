//! Span redaction policies.
//!
//! A [`SpanPolicy`] decides what the interior of an unsafe span becomes when
//! redactable text is redacted with [`RedactableString::redact_with`]. The
//! default policy replaces the whole interior with `×`, which is what
//! [`RedactableString::redact`] does.
//!
//! Policies count characters (Unicode scalar values), not bytes.
//!
//! ```
//! use redactable_text::{RedactableString, SpanPolicy};
//!
//! let line = RedactableString::from_raw("token=‹sk_live_abc123›");
//! assert_eq!(line.redact_with(&SpanPolicy::keep_last(3)).as_str(), "token=‹***********123›");
//! assert_eq!(line.redact_with(&SpanPolicy::default()).as_str(), "token=‹×›");
//! ```
//!
//! [`RedactableString::redact_with`]: crate::RedactableString::redact_with
//! [`RedactableString::redact`]: crate::RedactableString::redact

use std::borrow::Cow;

/// Placeholder used for full redaction of a span interior.
pub const REDACTED_PLACEHOLDER: &str = "\u{00D7}";

/// Character written in place of each hidden character of a span.
pub const MASK_CHAR: char = '*';

/// Shows the first `head` and last `tail` characters of a span and masks the
/// middle.
///
/// A span too short to have a middle is left as written.
#[derive(Clone, Copy, Debug)]
pub struct KeepConfig {
    head: usize,
    tail: usize,
    mask_char: char,
}

impl KeepConfig {
    /// Shows the first `head` characters.
    #[must_use]
    pub fn first(head: usize) -> Self {
        Self::ends(head, 0)
    }

    /// Shows the last `tail` characters, e.g. the end of a card number.
    #[must_use]
    pub fn last(tail: usize) -> Self {
        Self::ends(0, tail)
    }

    #[must_use]
    pub fn ends(head: usize, tail: usize) -> Self {
        Self {
            head,
            tail,
            mask_char: MASK_CHAR,
        }
    }

    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    fn apply_to(&self, interior: &str) -> String {
        mask_where(interior, self.mask_char, |i, count| {
            self.head.saturating_add(self.tail) < count
                && i >= self.head
                && i < count - self.tail
        })
    }
}

/// Masks the first `head` and last `tail` characters of a span and shows the
/// middle.
///
/// When the two ends meet, the whole span is masked.
#[derive(Clone, Copy, Debug)]
pub struct MaskConfig {
    head: usize,
    tail: usize,
    mask_char: char,
}

impl MaskConfig {
    /// Masks the first `head` characters.
    #[must_use]
    pub fn first(head: usize) -> Self {
        Self::ends(head, 0)
    }

    /// Masks the last `tail` characters.
    #[must_use]
    pub fn last(tail: usize) -> Self {
        Self::ends(0, tail)
    }

    #[must_use]
    pub fn ends(head: usize, tail: usize) -> Self {
        Self {
            head,
            tail,
            mask_char: MASK_CHAR,
        }
    }

    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    fn apply_to(&self, interior: &str) -> String {
        mask_where(interior, self.mask_char, |i, count| {
            i < self.head || i >= count.saturating_sub(self.tail)
        })
    }
}

/// Rewrites a span interior, replacing the characters at indices selected by
/// `masked(index, count)`. An empty interior becomes [`REDACTED_PLACEHOLDER`]
/// so the span stays visibly redacted.
fn mask_where(interior: &str, mask_char: char, masked: impl Fn(usize, usize) -> bool) -> String {
    let count = interior.chars().count();
    if count == 0 {
        return REDACTED_PLACEHOLDER.to_owned();
    }
    interior
        .chars()
        .enumerate()
        .map(|(i, c)| if masked(i, count) { mask_char } else { c })
        .collect()
}

/// What the interior of a span becomes on redaction.
#[derive(Clone, Debug)]
pub enum SpanPolicy {
    /// The whole interior becomes `placeholder`.
    Full { placeholder: Cow<'static, str> },
    /// The ends stay readable; see [`KeepConfig`].
    Keep(KeepConfig),
    /// The ends are hidden; see [`MaskConfig`].
    Mask(MaskConfig),
}

impl SpanPolicy {
    /// Full redaction with [`REDACTED_PLACEHOLDER`].
    #[must_use]
    pub fn default_full() -> Self {
        Self::Full {
            placeholder: Cow::Borrowed(REDACTED_PLACEHOLDER),
        }
    }

    /// Full redaction with a custom placeholder.
    ///
    /// Delimiters inside the placeholder are escaped when it is written.
    #[must_use]
    pub fn full_with<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Full {
            placeholder: placeholder.into(),
        }
    }

    /// Shorthand for [`KeepConfig::first`].
    #[must_use]
    pub fn keep_first(head: usize) -> Self {
        Self::Keep(KeepConfig::first(head))
    }

    /// Shorthand for [`KeepConfig::last`].
    #[must_use]
    pub fn keep_last(tail: usize) -> Self {
        Self::Keep(KeepConfig::last(tail))
    }

    /// Shorthand for [`MaskConfig::first`].
    #[must_use]
    pub fn mask_first(head: usize) -> Self {
        Self::Mask(MaskConfig::first(head))
    }

    /// Shorthand for [`MaskConfig::last`].
    #[must_use]
    pub fn mask_last(tail: usize) -> Self {
        Self::Mask(MaskConfig::last(tail))
    }

    /// Overrides the masking character. No effect on [`SpanPolicy::Full`].
    #[must_use]
    pub fn with_mask_char(self, mask_char: char) -> Self {
        match self {
            SpanPolicy::Full { .. } => self,
            SpanPolicy::Keep(config) => SpanPolicy::Keep(config.with_mask_char(mask_char)),
            SpanPolicy::Mask(config) => SpanPolicy::Mask(config.with_mask_char(mask_char)),
        }
    }

    /// Applies the policy to a span interior.
    ///
    /// Empty interiors become [`REDACTED_PLACEHOLDER`] for keep/mask policies.
    #[must_use]
    pub fn apply_to(&self, interior: &str) -> String {
        match self {
            SpanPolicy::Full { placeholder } => placeholder.clone().into_owned(),
            SpanPolicy::Keep(config) => config.apply_to(interior),
            SpanPolicy::Mask(config) => config.apply_to(interior),
        }
    }
}

impl Default for SpanPolicy {
    fn default() -> Self {
        Self::default_full()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeepConfig, MaskConfig, REDACTED_PLACEHOLDER, SpanPolicy};
    use crate::markers;

    #[test]
    fn placeholder_is_the_redacted_marker() {
        assert_eq!(REDACTED_PLACEHOLDER, markers::REDACTED.to_string());
    }

    #[test]
    fn full_policy_uses_redacted_marker() {
        assert_eq!(SpanPolicy::default().apply_to("secret"), "×");
        assert_eq!(SpanPolicy::default().apply_to(""), REDACTED_PLACEHOLDER);
    }

    #[test]
    fn full_policy_uses_custom_placeholder() {
        let policy = SpanPolicy::full_with("<redacted>");
        assert_eq!(policy.apply_to("secret"), "<redacted>");
    }

    #[test]
    fn keep_policy_allows_full_visibility() {
        let policy = SpanPolicy::Keep(KeepConfig::first(3));
        assert_eq!(policy.apply_to("ab"), "ab");
    }

    #[test]
    fn keep_policy_respects_mask_char() {
        let policy = SpanPolicy::keep_first(2).with_mask_char('#');
        assert_eq!(policy.apply_to("abcdef"), "ab####");
    }

    #[test]
    fn keep_ends_without_overlap() {
        let policy = SpanPolicy::Keep(KeepConfig::ends(2, 2));
        assert_eq!(policy.apply_to("abcdef"), "ab**ef");
        assert_eq!(policy.apply_to("abcd"), "abcd");
    }

    #[test]
    fn keep_is_overflow_safe() {
        let policy = SpanPolicy::Keep(KeepConfig::ends(usize::MAX, usize::MAX));
        assert_eq!(policy.apply_to("abcd"), "abcd");
    }

    #[test]
    fn mask_policy_masks_first_and_last_segments() {
        assert_eq!(SpanPolicy::mask_first(2).apply_to("abcdef"), "**cdef");
        assert_eq!(SpanPolicy::mask_last(3).apply_to("abcdef"), "abc***");
        assert_eq!(
            SpanPolicy::Mask(MaskConfig::ends(2, 2)).apply_to("abcdef"),
            "**cd**"
        );
    }

    #[test]
    fn mask_overlap_masks_everything() {
        let policy = SpanPolicy::Mask(MaskConfig::ends(usize::MAX, usize::MAX));
        assert_eq!(policy.apply_to("abcd"), "****");
    }

    #[test]
    fn empty_interior_uses_placeholder() {
        assert_eq!(SpanPolicy::keep_first(4).apply_to(""), REDACTED_PLACEHOLDER);
        assert_eq!(SpanPolicy::mask_first(4).apply_to(""), REDACTED_PLACEHOLDER);
    }

    #[test]
    fn policies_count_characters_not_bytes() {
        assert_eq!(SpanPolicy::keep_last(1).apply_to("秘密数据"), "***据");
        assert_eq!(SpanPolicy::mask_first(1).apply_to("🔒ab"), "*ab");
    }
}
