//! The `Kind` capability trait.
//!
//! A kind is a zero-sized marker type that declares, at compile time, the
//! capabilities the construction pipeline uses:
//!
//! | Capability | Required | Default |
//! |------------|----------|---------|
//! | [`Kind::validate`] | yes | none; omitting it does not compile |
//! | [`Kind::transform`] | no | identity |
//! | [`Kind::BASES`] | no | no base kinds |
//! | [`Kind::name`] | no | the type's path |
//!
//! A kind that also implements [`Stringable`] renders its value objects with
//! `Display`.
//!
//! # Base kinds
//!
//! Base kinds run in declaration order before the kind's own transform. Each
//! one receives the output of the previous one:
//!
//! ```rust
//! use valkind::prelude::*;
//!
//! struct Lowercase;
//!
//! impl Kind for Lowercase {
//!     fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
//!         Ok(Datum::from(datum.into_string()?.to_lowercase()))
//!     }
//!
//!     fn validate(_: &Datum) -> bool {
//!         true
//!     }
//! }
//!
//! struct Handle;
//!
//! impl Kind for Handle {
//!     const BASES: &'static [BaseKind] = &[BaseKind::of::<Lowercase>()];
//!
//!     fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
//!         Ok(Datum::from(format!("@{}", datum.into_string()?)))
//!     }
//!
//!     fn validate(datum: &Datum) -> bool {
//!         datum.as_str().is_some_and(|text| text.len() > 1)
//!     }
//! }
//!
//! let handle = ValueObject::<Handle>::from("Ferris").unwrap();
//! assert_eq!(handle.as_str(), Some("@ferris"));
//! ```

use std::any::TypeId;
use std::fmt;

use crate::datum::Datum;
use crate::error::{InvalidValue, TypeMismatch};
use crate::value;

/// A family of values defined by an optional transform and a mandatory
/// validation predicate.
///
/// Implementors are marker types; the value itself lives in
/// [`ValueObject<Self>`](crate::ValueObject). All functions are pure: the
/// pipeline may call them from any thread and relies on them producing the
/// same result for the same input.
pub trait Kind: Sized + 'static {
    /// Kinds that must accept and resolve the input before this kind runs.
    ///
    /// Listing a kind among its own bases, directly or through other kinds,
    /// is a [`DefinitionError`](crate::DefinitionError). The whole base graph
    /// is checked before any base runs, so the error does not depend on the
    /// input.
    const BASES: &'static [BaseKind] = &[];

    /// The name used in diagnostics.
    #[must_use]
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Normalizes the input before validation.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] when the input has a shape this kind cannot
    /// handle. The pipeline reports that as an ordinary rejection.
    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(datum)
    }

    /// Decides whether the transformed value is acceptable.
    fn validate(datum: &Datum) -> bool;
}

/// Marker for kinds whose value objects render as text.
///
/// Implementing it gives `ValueObject<Self>` a `Display` impl that prints the
/// resolved value.
pub trait Stringable: Kind {}

/// A reference to a kind, used to declare [`Kind::BASES`].
///
/// # Examples
///
/// ```rust
/// use valkind::prelude::*;
///
/// struct Anything;
///
/// impl Kind for Anything {
///     fn validate(_: &Datum) -> bool {
///         true
///     }
/// }
///
/// let base = BaseKind::of::<Anything>();
/// assert!(base.name().ends_with("Anything"));
/// assert!(base.is::<Anything>());
/// ```
#[derive(Clone, Copy)]
pub struct BaseKind {
    id: fn() -> TypeId,
    name: fn() -> &'static str,
    bases: fn() -> &'static [BaseKind],
    resolve: fn(Datum) -> Result<Datum, InvalidValue>,
}

const fn bases_of<K: Kind>() -> &'static [BaseKind] {
    K::BASES
}

impl BaseKind {
    /// Refers to the kind `K`.
    #[must_use]
    pub const fn of<K: Kind>() -> Self {
        Self {
            id: TypeId::of::<K>,
            name: K::name,
            bases: bases_of::<K>,
            resolve: value::resolve_as::<K>,
        }
    }

    /// Returns the name of the referenced kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Returns the base kinds of the referenced kind.
    #[must_use]
    pub fn bases(&self) -> &'static [Self] {
        (self.bases)()
    }

    /// Returns `true` if this refers to the kind `K`.
    #[must_use]
    pub fn is<K: Kind>(&self) -> bool {
        self.id() == TypeId::of::<K>()
    }

    pub(crate) fn id(&self) -> TypeId {
        (self.id)()
    }

    pub(crate) fn resolve(&self, datum: Datum) -> Result<Datum, InvalidValue> {
        (self.resolve)(datum)
    }
}

impl PartialEq for BaseKind {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for BaseKind {}

impl fmt::Debug for BaseKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("BaseKind").field(&self.name()).finish()
    }
}
