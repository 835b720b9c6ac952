//! Adapters for emitting redactable text through `tracing`.
//!
//! `tracing` fields are flat strings here. Use `tracing_redacted` when the
//! subscriber writes somewhere sensitive data must not reach, and
//! `tracing_redactable` when redaction happens downstream.
//!
//! ```ignore
//! use redactable_text::TracingRedactableExt;
//!
//! tracing::info!(line = %line.tracing_redacted());
//! ```

use tracing::field::{DisplayValue, display};

use crate::text::{RedactableBytes, RedactableString};

/// Extension trait for logging redactable text as a display value.
pub trait TracingRedactableExt {
    /// The text with every span redacted to `‹×›`.
    fn tracing_redacted(&self) -> DisplayValue<String>;

    /// The text with its markers, for deferred redaction.
    fn tracing_redactable(&self) -> DisplayValue<String>;
}

impl TracingRedactableExt for RedactableString {
    fn tracing_redacted(&self) -> DisplayValue<String> {
        display(self.redact().into_string())
    }

    fn tracing_redactable(&self) -> DisplayValue<String> {
        display(self.as_str().to_owned())
    }
}

impl TracingRedactableExt for RedactableBytes {
    fn tracing_redacted(&self) -> DisplayValue<String> {
        display(self.redact().to_str_lossy().into_owned())
    }

    fn tracing_redactable(&self) -> DisplayValue<String> {
        display(self.to_str_lossy().into_owned())
    }
}

#[cfg(feature = "printer")]
impl TracingRedactableExt for crate::StringBuilder {
    fn tracing_redacted(&self) -> DisplayValue<String> {
        self.redactable_string().tracing_redacted()
    }

    fn tracing_redactable(&self) -> DisplayValue<String> {
        self.redactable_string().tracing_redactable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_value_hides_span_content() {
        let line = RedactableString::from_raw("user ‹alice› logged in");
        let value = line.tracing_redacted();
        assert_eq!(format!("{value:?}"), "user ‹×› logged in");
    }

    #[test]
    fn redactable_value_keeps_markers() {
        let line = RedactableString::from_raw("user ‹alice›");
        let value = line.tracing_redactable();
        assert_eq!(format!("{value:?}"), "user ‹alice›");
    }

    #[test]
    fn bytes_are_decoded_lossily() {
        let line = RedactableBytes::from_raw(b"id=\xff \xe2\x80\xb9x\xe2\x80\xba".to_vec());
        let value = line.tracing_redacted();
        assert_eq!(format!("{value:?}"), "id=\u{FFFD} ‹×›");
    }
}
