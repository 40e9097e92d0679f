//! # valkind
//!
//! Immutable value objects built through a transform-then-validate
//! construction pipeline.
//!
//! ## Overview
//!
//! A *kind* describes one family of values: an optional transform that
//! normalizes the raw input, a mandatory predicate that accepts or rejects
//! the normalized result, and an optional list of base kinds that must
//! accept the input first. A [`ValueObject`] of that kind can only be
//! obtained by running the pipeline, so holding one proves the value passed.
//!
//! - **Datum**: the dynamically typed input and resolved value ([`Datum`])
//! - **Kinds**: the [`Kind`] capability trait and [`BaseKind`] chaining
//! - **Value objects**: [`ValueObject`] and its factory surface
//!   (`from`, `try_from`, `get_from`, `try_get_from`, `is_valid`)
//! - **Errors**: recoverable [`InvalidValue`] vs. [`DefinitionError`]
//!
//! ## Feature Flags
//!
//! - `kinds`: Built-in example kinds (`Email`, `TrimmedString`, `SquishedString`)
//! - `derive`: The `#[shortcuts]` attribute for generated `get_*_from` delegations
//! - `serde`: `Deserialize` for [`Datum`] and `Serialize` for [`ValueObject`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use valkind::prelude::*;
//!
//! struct Shout;
//!
//! impl Kind for Shout {
//!     fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
//!         Ok(Datum::from(datum.into_string()?.to_uppercase()))
//!     }
//!
//!     fn validate(datum: &Datum) -> bool {
//!         datum.as_str().is_some_and(|text| !text.is_empty())
//!     }
//! }
//!
//! let shout = ValueObject::<Shout>::from("hello").unwrap();
//! assert_eq!(shout.get(), &Datum::from("HELLO"));
//! assert_eq!(shout.original(), &Datum::from("hello"));
//!
//! assert!(!ValueObject::<Shout>::is_valid("").unwrap());
//! assert!(ValueObject::<Shout>::try_from(42).unwrap().is_none());
//! ```
//!
//! A kind must supply `validate`; leaving it out does not compile:
//!
//! ```rust,compile_fail
//! use valkind::prelude::*;
//!
//! struct Unchecked;
//!
//! impl Kind for Unchecked {}
//! ```
//!
//! Nor does marking an accessor that is not named `get_<name>` as a shortcut:
//!
//! ```rust,compile_fail
//! use valkind::prelude::*;
//!
//! struct Tag;
//!
//! impl Kind for Tag {
//!     fn validate(datum: &Datum) -> bool {
//!         datum.as_str().is_some()
//!     }
//! }
//!
//! #[shortcuts]
//! impl Tag {
//!     #[shortcut]
//!     fn length(tag: &ValueObject<Self>) -> usize {
//!         tag.as_str().map_or(0, str::len)
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Generated shortcut code names this crate by its absolute path.
extern crate self as valkind;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use valkind::prelude::*;
/// ```
pub mod prelude {
    pub use crate::datum::{Datum, Opaque, Resource};
    pub use crate::error::{DefinitionError, Error, InvalidValue, Reason, TypeMismatch};
    pub use crate::kind::{BaseKind, Kind, Stringable};
    pub use crate::value::ValueObject;

    #[cfg(feature = "kinds")]
    pub use crate::kinds::*;

    #[cfg(feature = "derive")]
    pub use valkind_derive::shortcuts;
}

pub mod datum;
pub mod error;
mod factory;
pub mod kind;
pub mod value;

#[cfg(feature = "kinds")]
pub mod kinds;

pub use datum::{Datum, Opaque, Resource, Wrapped};
pub use error::{DefinitionError, Error, InvalidValue, Reason, TypeMismatch, describe};
pub use kind::{BaseKind, Kind, Stringable};
pub use value::ValueObject;

#[cfg(feature = "derive")]
pub use valkind_derive::shortcuts;

static_assertions::assert_impl_all!(Datum: Send, Sync, Clone);
static_assertions::assert_impl_all!(Error: Send, Sync, std::error::Error);

#[cfg(feature = "kinds")]
static_assertions::assert_impl_all!(kinds::Email: Send, Sync, Clone);
