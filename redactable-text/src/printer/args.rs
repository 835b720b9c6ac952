//! Print arguments and the safety wrappers.

use std::{error::Error as StdError, fmt};

use super::{SafeFormat, SafeValue};
use crate::text::{RedactableBytes, RedactableString};

/// Marks a value as safe regardless of its type.
///
/// Use this for values you know carry no sensitive data but whose type does
/// not implement [`SafeValue`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Safe<T>(pub T);

impl<T: fmt::Display> fmt::Display for Safe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Display> SafeValue for Safe<T> {}

/// Marks a value as unsafe, even if its type is a [`SafeValue`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unsafe<T>(pub T);

impl<T: fmt::Display> fmt::Display for Unsafe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One argument to [`StringBuilder::print`](super::StringBuilder::print).
///
/// The variant is chosen once, when the argument is built, and decides how
/// the value is written.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    /// Written safe-escaped.
    Safe(&'a dyn fmt::Display),
    /// Written inside a span.
    Unsafe(&'a dyn fmt::Display),
    /// Writes itself.
    SelfDescribing(&'a dyn SafeFormat),
    /// Already redactable; copied verbatim.
    Redactable(&'a [u8]),
    /// Rendered by the configured error formatter, or as unsafe text.
    Error(&'a (dyn StdError + 'static)),
    /// A value with no safety information. Treated as unsafe.
    Plain(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// A value whose type is known to be safe.
    pub fn safe<T: SafeValue>(value: &'a T) -> Self {
        Arg::Safe(value)
    }

    /// A value to be written inside a span.
    pub fn unsafe_value<T: fmt::Display>(value: &'a T) -> Self {
        Arg::Unsafe(value)
    }

    /// A value that writes itself.
    pub fn formatted<T: SafeFormat>(value: &'a T) -> Self {
        Arg::SelfDescribing(value)
    }

    /// Already-redactable text.
    pub fn redactable(value: &'a RedactableString) -> Self {
        Arg::Redactable(value.as_str().as_bytes())
    }

    /// Already-redactable bytes.
    pub fn redactable_bytes(value: &'a RedactableBytes) -> Self {
        Arg::Redactable(value.as_bytes())
    }

    /// An error value.
    pub fn error<E: StdError + 'static>(err: &'a E) -> Self {
        Arg::Error(err)
    }

    /// A value with no safety information.
    pub fn plain<T: fmt::Display>(value: &'a T) -> Self {
        Arg::Plain(value)
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the payload.
        let kind = match self {
            Arg::Safe(_) => "Safe",
            Arg::Unsafe(_) => "Unsafe",
            Arg::SelfDescribing(_) => "SelfDescribing",
            Arg::Redactable(_) => "Redactable",
            Arg::Error(_) => "Error",
            Arg::Plain(_) => "Plain",
        };
        f.debug_tuple("Arg").field(&kind).finish()
    }
}

impl<'a, T: fmt::Display> From<&'a Safe<T>> for Arg<'a> {
    fn from(value: &'a Safe<T>) -> Self {
        Arg::Safe(value)
    }
}

impl<'a, T: fmt::Display> From<&'a Unsafe<T>> for Arg<'a> {
    fn from(value: &'a Unsafe<T>) -> Self {
        Arg::Unsafe(value)
    }
}

impl<'a> From<&'a RedactableString> for Arg<'a> {
    fn from(value: &'a RedactableString) -> Self {
        Arg::redactable(value)
    }
}

impl<'a> From<&'a RedactableBytes> for Arg<'a> {
    fn from(value: &'a RedactableBytes) -> Self {
        Arg::redactable_bytes(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Plain(value)
    }
}
