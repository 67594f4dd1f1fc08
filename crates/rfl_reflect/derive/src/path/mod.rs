//! Paths of the items generated code refers to.
//!
//! Everything is reached through `rfl_reflect::__macro_exports`, so the
//! library can move items around without touching the macros.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `rfl_reflect` crate.
///
/// 1. For crates that depend on `rfl_reflect`, `::rfl_reflect` is returned.
/// 2. For crates that depend on `reflector`, `::reflector::reflect` is returned.
/// 3. Otherwise `::rfl_reflect` is returned, which may be incorrect.
///
/// This reads the invoking crate's `Cargo.toml`, so the result is passed
/// around rather than recomputed.
pub(crate) fn rfl_reflect() -> syn::Path {
    rfl_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("rfl_reflect"))
}

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn macro_exports_(rfl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #rfl_reflect_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(rfl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #rfl_reflect_path::__macro_exports::auto_register
    }
}
