//! Printing values into redactable text.
//!
//! The buffer layer knows nothing about values; this module decides, per
//! argument, which [`OutputMode`](crate::OutputMode) a value is written in:
//!
//! - [`SafeValue`] types and [`Safe`] wrappers are written safe-escaped.
//! - [`SafeFormat`] types write themselves through a [`StringBuilder`].
//! - [`RedactableString`](crate::RedactableString) and
//!   [`RedactableBytes`](crate::RedactableBytes) are copied verbatim.
//! - Errors go through the configured [`ErrorFormatter`], if any.
//! - Everything else is unsafe and lands inside a `‹…›` span.
//!
//! ```
//! use redactable_text::{Arg, Safe, sprint};
//!
//! let user = "alice";
//! let line = sprint([Arg::from(&Safe("login")), Arg::plain(&user)]);
//! assert_eq!(line.as_str(), "login ‹alice›");
//! assert_eq!(line.redact().as_str(), "login ‹×›");
//! ```

mod args;
mod builder;
mod traits;
mod values;

pub use args::{Arg, Safe, Unsafe};
pub use builder::{PrintConfig, StringBuilder};
pub use traits::{ErrorFormatter, FormatError, SafeFormat, SafeValue};

use crate::text::RedactableString;

/// Prints `args` separated by single safe spaces and returns the result.
pub fn sprint<'a, I>(args: I) -> RedactableString
where
    I: IntoIterator<Item = Arg<'a>>,
{
    sprint_with(PrintConfig::default(), args)
}

/// Like [`sprint`], with an explicit configuration.
pub fn sprint_with<'a, I>(config: PrintConfig, args: I) -> RedactableString
where
    I: IntoIterator<Item = Arg<'a>>,
{
    let mut builder = StringBuilder::with_config(config);
    builder.print_all(args);
    builder.into_redactable_string()
}
