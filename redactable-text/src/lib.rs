//! Redactable text: strings that carry their own sensitive spans.
//!
//! A log line is built once, with every piece of sensitive data enclosed
//! between `‹` and `›`. The result can be stored or shipped as is and redacted
//! later, by whoever reads it, with [`RedactableString::redact`]:
//!
//! ```
//! use redactable_text::{OutputMode, RedactionBuffer};
//!
//! let mut buf = RedactionBuffer::new().with_mode(OutputMode::SafeEscaped);
//! buf.write_str("login failed for ");
//! buf.set_mode(OutputMode::UnsafeEscaped);
//! buf.write_str("alice@example.com");
//!
//! let line = buf.redactable_string();
//! assert_eq!(line.as_str(), "login failed for ‹alice@example.com›");
//! assert_eq!(line.redact().as_str(), "login failed for ‹×›");
//! assert_eq!(line.strip_markers(), "login failed for alice@example.com");
//! ```
//!
//! What this crate does:
//! - defines the marker alphabet ([`markers`])
//! - accumulates redactable text with delimiter escaping ([`RedactionBuffer`])
//! - redacts and strips redactable text, optionally with a [`SpanPolicy`]
//! - prints values by their declared safety (`printer` feature, on by default)
//! - provides sink adapters behind feature flags (`tracing`, `slog`, `json`)
//!
//! What it does not do:
//! - perform I/O or install logging subscribers
//! - decide which of your values are sensitive
//!
//! The `SafeValue` derive macro lives in `redactable-text-derive` and is
//! re-exported from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "printer")]
pub use redactable_text_derive::SafeValue;

#[allow(unused_extern_crates)]
extern crate self as redactable_text;

// Module declarations
mod buffer;
pub mod markers;
pub mod policy;
#[cfg(feature = "printer")]
mod printer;
#[cfg(feature = "slog")]
pub mod slog;
mod text;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use buffer::{OutputMode, RedactionBuffer};
pub use markers::Marker;
pub use policy::{KeepConfig, MASK_CHAR, MaskConfig, REDACTED_PLACEHOLDER, SpanPolicy};
#[cfg(feature = "printer")]
pub use printer::{
    Arg, ErrorFormatter, FormatError, PrintConfig, Safe, SafeFormat, SafeValue, StringBuilder,
    Unsafe, sprint, sprint_with,
};
#[cfg(feature = "slog")]
pub use slog::{RedactedText, SlogRedactableExt};
pub use text::{
    RedactableBytes, RedactableString, escape_bytes, escape_marker_bytes, escape_markers,
    escape_str,
};
#[cfg(feature = "tracing")]
pub use tracing::TracingRedactableExt;
