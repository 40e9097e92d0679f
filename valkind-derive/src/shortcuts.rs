//! Implementation of the `#[shortcuts]` attribute macro.
//!
//! The macro strips every `#[shortcut]` marker from the annotated impl block,
//! re-emits the block unchanged otherwise, and appends a second impl block
//! holding the generated delegations.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Meta, ReturnType, parse_macro_input};

const MARKER: &str = "shortcut";
const PREFIX: &str = "get_";

/// Main implementation of the shortcuts attribute macro.
pub fn shortcuts_impl(attribute: TokenStream, item: TokenStream) -> TokenStream {
    if !attribute.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[shortcuts] does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    let mut block = parse_macro_input!(item as ItemImpl);

    let expanded = match expand(&mut block) {
        Ok(delegations) => quote! {
            #block
            #delegations
        },
        Err(error) => error.to_compile_error(),
    };

    TokenStream::from(expanded)
}

/// Removes the markers from `block` and returns the generated impl block.
fn expand(block: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &block.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[shortcuts] must be placed on an inherent impl block, not a trait impl",
        ));
    }

    let mut delegations = Vec::new();
    for item in &mut block.items {
        let ImplItem::Fn(function) = item else {
            continue;
        };
        if take_marker(function)? {
            delegations.push(generate_delegation(function)?);
        }
    }

    let self_type = &block.self_ty;
    let (impl_generics, _, where_clause) = block.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #self_type #where_clause {
            #(#delegations)*
        }
    })
}

/// Strips the `#[shortcut]` marker, reporting whether it was present.
fn take_marker(function: &mut ImplItemFn) -> syn::Result<bool> {
    let Some(position) = function
        .attrs
        .iter()
        .position(|attribute| attribute.path().is_ident(MARKER))
    else {
        return Ok(false);
    };

    let marker = function.attrs.remove(position);
    if !matches!(marker.meta, Meta::Path(_)) {
        return Err(syn::Error::new_spanned(
            marker,
            "#[shortcut] does not take arguments",
        ));
    }

    Ok(true)
}

/// Generates the `get_*_from` / `try_get_*_from` pair for one accessor.
fn generate_delegation(function: &ImplItemFn) -> syn::Result<TokenStream2> {
    let signature = &function.sig;
    let accessor = &signature.ident;

    let accessor_name = accessor.to_string();
    let Some(suffix) = accessor_name
        .strip_prefix(PREFIX)
        .filter(|suffix| !suffix.is_empty())
    else {
        return Err(syn::Error::new_spanned(
            accessor,
            "shortcut accessors must be named `get_<name>`",
        ));
    };

    if signature.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &signature.inputs,
            "shortcut accessors take exactly one argument: the value object",
        ));
    }
    if let Some(FnArg::Receiver(receiver)) = signature.inputs.first() {
        return Err(syn::Error::new_spanned(
            receiver,
            "shortcut accessors take the value object as an argument, not `self`",
        ));
    }
    if let Some(asyncness) = &signature.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "shortcut accessors cannot be async",
        ));
    }

    let output = match &signature.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, output) => quote! { #output },
    };
    let visibility = &function.vis;
    let get_from = format_ident!("get_{}_from", suffix);
    let try_get_from = format_ident!("try_get_{}_from", suffix);
    let get_from_doc = format!(
        "Constructs a value object from `input` and returns [`Self::{accessor_name}`] of it."
    );
    let try_get_from_doc = format!(
        "Like [`Self::{get_from}`], but a rejected input yields `Ok(None)`."
    );

    Ok(quote! {
        #[doc = #get_from_doc]
        ///
        /// # Errors
        ///
        /// Returns the construction error when the input is rejected or the
        /// kind is broken.
        #visibility fn #get_from(
            input: impl ::core::convert::Into<::valkind::Datum>,
        ) -> ::core::result::Result<#output, ::valkind::Error> {
            let value = ::valkind::ValueObject::<Self>::from(input)?;
            ::core::result::Result::Ok(Self::#accessor(&value))
        }

        #[doc = #try_get_from_doc]
        ///
        /// # Errors
        ///
        /// Returns the definition error when the kind is broken.
        #visibility fn #try_get_from(
            input: impl ::core::convert::Into<::valkind::Datum>,
        ) -> ::core::result::Result<::core::option::Option<#output>, ::valkind::DefinitionError> {
            let value = ::valkind::ValueObject::<Self>::try_from(input)?;
            ::core::result::Result::Ok(value.as_ref().map(|value| Self::#accessor(value)))
        }
    })
}
