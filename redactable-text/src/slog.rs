//! Adapters for emitting redactable text through `slog`.
//!
//! Two shapes are supported:
//!
//! - [`RedactableString`] and [`RedactableBytes`] are `slog::Value`s that emit
//!   the marker-bearing text, for pipelines that redact at read time.
//! - [`SlogRedactableExt::slog_redacted`] emits the redacted form, for sinks
//!   that must never see sensitive data.
//!
//! ```ignore
//! use redactable_text::SlogRedactableExt;
//!
//! info!(logger, "request"; "line" => line.slog_redacted());
//! ```
//!
//! Nothing here configures `slog`.

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    policy::SpanPolicy,
    text::{RedactableBytes, RedactableString},
};

/// Marker trait for values whose `slog` output never contains span content.
///
/// ```compile_fail
/// use redactable_text::slog::SlogRedacted;
///
/// fn assert_slog_redacted<T: SlogRedacted>() {}
///
/// assert_slog_redacted::<redactable_text::RedactableString>();
/// ```
pub trait SlogRedacted: SlogValue {}

impl<T: SlogRedacted + ?Sized> SlogRedacted for &T {}

impl SlogValue for RedactableString {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, self.as_str())
    }
}

impl SlogValue for RedactableBytes {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.to_str_lossy())
    }
}

#[cfg(feature = "printer")]
impl SlogValue for crate::StringBuilder {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, self.redactable_string().as_str())
    }
}

/// Redacted text, ready to log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedactedText(String);

impl RedactedText {
    /// Returns the redacted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SlogValue for RedactedText {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.0)
    }
}

impl SlogRedacted for RedactedText {}

/// Extension trait for logging the redacted form of redactable text.
pub trait SlogRedactableExt {
    /// Redacts every span to `‹×›`.
    fn slog_redacted(&self) -> RedactedText {
        self.slog_redacted_with(&SpanPolicy::default())
    }

    /// Redacts every span with `policy`.
    fn slog_redacted_with(&self, policy: &SpanPolicy) -> RedactedText;
}

impl SlogRedactableExt for RedactableString {
    fn slog_redacted_with(&self, policy: &SpanPolicy) -> RedactedText {
        RedactedText(self.redact_with(policy).into_string())
    }
}

impl SlogRedactableExt for RedactableBytes {
    fn slog_redacted_with(&self, policy: &SpanPolicy) -> RedactedText {
        RedactedText(self.redact_with(policy).to_str_lossy().into_owned())
    }
}
