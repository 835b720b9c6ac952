//! Derive macros for `redactable-text`.
//!
//! `#[derive(SafeValue)]` marks a type as safe to print without a span. It
//! emits nothing but the marker impl: the type's own `Display` decides what is
//! printed, and delimiters in that output are still escaped at runtime.
//!
//! It does **not** inspect fields or generate `Display`.

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

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, parse_quote, spanned::Spanned};

/// Derives `redactable_text::SafeValue`.
///
/// The type must implement `Display`. Every type parameter is bounded by
/// `SafeValue`, the same way `#[derive(Clone)]` bounds parameters by `Clone`:
/// a generic wrapper is only safe if what it wraps is.
///
/// Unions are rejected at compile time.
///
/// ```ignore
/// use std::fmt;
///
/// use redactable_text::SafeValue;
///
/// #[derive(SafeValue)]
/// enum Phase {
///     Starting,
///     Running,
/// }
///
/// impl fmt::Display for Phase {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(match self {
///             Phase::Starting => "starting",
///             Phase::Running => "running",
///         })
///     }
/// }
/// ```
#[proc_macro_derive(SafeValue)]
pub fn derive_safe_value(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_safe_value(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand_safe_value(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        mut generics,
        data,
        ..
    } = input;

    if let Data::Union(u) = &data {
        return Err(syn::Error::new(
            u.union_token.span(),
            "`SafeValue` cannot be derived for unions",
        ));
    }

    let crate_root = crate_root();
    let type_params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: #crate_root::SafeValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::SafeValue for #ident #ty_generics #where_clause {}
    })
}

/// Returns the token stream to reference the redactable-text crate root.
///
/// Handles crate renaming (e.g., `rt = { package = "redactable-text", ... }`)
/// and internal usage (when derive is used inside the crate itself).
fn crate_root() -> TokenStream {
    match crate_name("redactable-text") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::redactable_text },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(src: &str) -> Result<String> {
        let input: DeriveInput = syn::parse_str(src)?;
        expand_safe_value(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn plain_struct_gets_marker_impl() {
        let out = expand("struct Port(u16);").unwrap();
        assert!(out.contains("SafeValue for Port"), "{out}");
    }

    #[test]
    fn type_parameters_are_bounded() {
        let out = expand("struct Pair<A, B: Copy> { a: A, b: B }").unwrap();
        assert!(out.contains("A : :: redactable_text :: SafeValue"), "{out}");
        assert!(out.contains("B : :: redactable_text :: SafeValue"), "{out}");
    }

    #[test]
    fn lifetimes_are_kept() {
        let out = expand("struct Label<'a>(&'a str);").unwrap();
        assert!(out.contains("for Label < 'a >"), "{out}");
    }

    #[test]
    fn unions_are_rejected() {
        let err = expand("union Bits { a: u32, b: f32 }").unwrap_err();
        assert_eq!(err.to_string(), "`SafeValue` cannot be derived for unions");
    }
}
