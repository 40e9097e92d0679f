//! Procedural macros for valkind.
//!
//! # Available Attribute Macros
//!
//! - [`macro@shortcuts`]: Generates `get_*_from` / `try_get_*_from`
//!   delegations for accessors marked `#[shortcut]`
//!
//! # Example
//!
//! ```rust,ignore
//! use valkind::prelude::*;
//!
//! struct Url;
//!
//! impl Kind for Url {
//!     fn validate(datum: &Datum) -> bool {
//!         datum.as_str().is_some_and(|text| text.contains("://"))
//!     }
//! }
//!
//! #[shortcuts]
//! impl Url {
//!     #[shortcut]
//!     pub fn get_scheme(url: &ValueObject<Self>) -> String {
//!         url.as_str().and_then(|text| text.split_once("://")).map(|(scheme, _)| scheme.to_owned()).unwrap_or_default()
//!     }
//! }
//!
//! // Generated associated functions:
//! // - Url::get_scheme_from(input) -> Result<String, valkind::Error>
//! // - Url::try_get_scheme_from(input) -> Result<Option<String>, valkind::DefinitionError>
//!
//! assert_eq!(Url::get_scheme_from("https://example.com").unwrap(), "https");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod shortcuts;

use proc_macro::TokenStream;

/// Attribute macro generating shortcut delegations for a kind.
///
/// Place it on an inherent `impl` block of a type implementing
/// `valkind::Kind`. Every associated function in the block marked
/// `#[shortcut]` must be named `get_<name>` and take the value object by
/// reference as its only argument.
///
/// # Generated Code
///
/// For each `#[shortcut] fn get_foo(value: &ValueObject<Self>) -> T`,
/// generates:
///
/// ```rust,ignore
/// impl Kind {
///     pub fn get_foo_from(input: impl Into<Datum>) -> Result<T, Error> { ... }
///     pub fn try_get_foo_from(input: impl Into<Datum>) -> Result<Option<T>, DefinitionError> { ... }
/// }
/// ```
///
/// `get_foo_from` constructs the value object with `ValueObject::from` and
/// calls `get_foo` on it; `try_get_foo_from` uses `ValueObject::try_from` and
/// yields `None` for rejected inputs. Unmarked functions are left alone.
///
/// # Requirements
///
/// - `T` must not borrow from the value object, since the value object is a
///   temporary inside the generated function
/// - The generated functions take the visibility of the accessor
#[proc_macro_attribute]
pub fn shortcuts(attribute: TokenStream, item: TokenStream) -> TokenStream {
    shortcuts::shortcuts_impl(attribute, item)
}
