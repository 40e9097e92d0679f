//! Value objects and the construction pipeline.
//!
//! [`ValueObject<K>`] holds the input a caller supplied alongside the value
//! kind `K` resolved it to. The only way to obtain one is the pipeline below,
//! reached through the factories (`from`, `try_from`, ...):
//!
//! 0. The base graph of `K` is checked for self-references and cycles. A
//!    broken graph fails every construction, whatever the input.
//! 1. An input that already is a `ValueObject<K>` is copied as is.
//! 2. An input that is a value object of another kind is unwrapped to its
//!    resolved value, which becomes the new object's original input.
//! 3. Each of `K::BASES` resolves the current value in order; the first
//!    rejection stops the pipeline.
//! 4. `K::transform` normalizes the result.
//! 5. `K::validate` accepts or rejects it.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::datum::{Datum, ErasedValue};
use crate::error::{DefinitionError, Error, InvalidValue, Reason};
use crate::kind::{BaseKind, Kind, Stringable};

/// An immutable, validated value of kind `K`.
///
/// # Examples
///
/// ```rust
/// use valkind::prelude::*;
///
/// struct Even;
///
/// impl Kind for Even {
///     fn validate(datum: &Datum) -> bool {
///         datum.as_i64().is_some_and(|number| number % 2 == 0)
///     }
/// }
///
/// let even = ValueObject::<Even>::from(4).unwrap();
/// assert_eq!(even.get(), &Datum::from(4));
///
/// // Re-wrapping a value of the same kind is a no-op copy.
/// let again = ValueObject::<Even>::from(even.clone()).unwrap();
/// assert_eq!(again, even);
/// ```
pub struct ValueObject<K: Kind> {
    original: Datum,
    resolved: Datum,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> ValueObject<K> {
    const fn assemble(original: Datum, resolved: Datum) -> Self {
        Self {
            original,
            resolved,
            kind: PhantomData,
        }
    }

    /// Returns the resolved value.
    #[must_use]
    pub const fn get(&self) -> &Datum {
        &self.resolved
    }

    /// Returns the input this value was constructed from.
    #[must_use]
    pub const fn original(&self) -> &Datum {
        &self.original
    }

    /// Returns the resolved value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.resolved.as_str()
    }

    /// Consumes the value object, returning the resolved value.
    #[must_use]
    pub fn into_resolved(self) -> Datum {
        self.resolved
    }

    /// Consumes the value object, returning `(original, resolved)`.
    #[must_use]
    pub fn into_parts(self) -> (Datum, Datum) {
        (self.original, self.resolved)
    }

    /// Returns the name of kind `K`.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        K::name()
    }
}

impl<K: Kind> Clone for ValueObject<K> {
    fn clone(&self) -> Self {
        Self::assemble(self.original.clone(), self.resolved.clone())
    }
}

impl<K: Kind> PartialEq for ValueObject<K> {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original && self.resolved == other.resolved
    }
}

impl<K: Kind> fmt::Debug for ValueObject<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ValueObject")
            .field("kind", &K::name())
            .field("original", &self.original)
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl<K: Stringable> fmt::Display for ValueObject<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.resolved)
    }
}

#[cfg(feature = "serde")]
impl<K: Kind> serde::Serialize for ValueObject<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.resolved, serializer)
    }
}

impl<K: Kind> ErasedValue for ValueObject<K> {
    fn kind_id(&self) -> TypeId {
        TypeId::of::<K>()
    }

    fn kind_name(&self) -> &'static str {
        K::name()
    }

    fn original(&self) -> &Datum {
        &self.original
    }

    fn resolved(&self) -> &Datum {
        &self.resolved
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Depth-first walk over a base graph.
#[derive(Debug, Default)]
struct Chain {
    frames: SmallVec<[(TypeId, &'static str); 4]>,
    settled: SmallVec<[TypeId; 8]>,
}

impl Chain {
    fn visit(&mut self, kind: BaseKind) -> Result<(), DefinitionError> {
        let id = kind.id();
        if self.settled.contains(&id) {
            return Ok(());
        }

        let bases = kind.bases();
        if bases.iter().any(|base| base.id() == id) {
            return Err(DefinitionError::SelfReference { kind: kind.name() });
        }

        self.enter(id, kind.name())?;
        for base in bases {
            self.visit(*base)?;
        }
        self.frames.pop();
        self.settled.push(id);
        Ok(())
    }

    fn enter(&mut self, id: TypeId, name: &'static str) -> Result<(), DefinitionError> {
        if let Some(position) = self.frames.iter().position(|(frame, _)| *frame == id) {
            let mut path: Vec<&'static str> =
                self.frames[position..].iter().map(|(_, name)| *name).collect();
            path.push(name);
            return Err(DefinitionError::Cycle { path });
        }
        self.frames.push((id, name));
        Ok(())
    }
}

/// Checks the base graph of `K` for self-references and cycles.
fn check_definition<K: Kind>() -> Result<(), DefinitionError> {
    Chain::default().visit(BaseKind::of::<K>())
}

pub(crate) fn construct<K: Kind>(input: Datum) -> Result<ValueObject<K>, Error> {
    check_definition::<K>()?;
    Ok(build::<K>(input)?)
}

/// Runs the pipeline for a kind whose definition has been checked.
fn build<K: Kind>(input: Datum) -> Result<ValueObject<K>, InvalidValue> {
    let input = match input {
        Datum::Value(wrapped) => {
            if let Some(same) = wrapped.downcast_ref::<K>() {
                trace!(kind = K::name(), "re-wrapping value of the same kind");
                return Ok(same.clone());
            }
            trace!(kind = K::name(), from = wrapped.kind_name(), "unwrapping value of another kind");
            wrapped.resolved().clone()
        }
        other => other,
    };

    match resolve::<K>(input.clone()) {
        Ok(resolved) => Ok(ValueObject::assemble(input, resolved)),
        Err(reason) => {
            let error = InvalidValue::new(K::name(), &input, reason);
            debug!(
                kind = error.kind(),
                reason = %error.reason(),
                attempted = error.attempted(),
                "value rejected"
            );
            Err(error)
        }
    }
}

fn resolve<K: Kind>(input: Datum) -> Result<Datum, Reason> {
    let mut current = input;
    for base in K::BASES {
        trace!(kind = K::name(), base = base.name(), "applying base kind");
        current = base
            .resolve(current)
            .map_err(|_| Reason::Base { kind: base.name() })?;
    }

    let transformed = K::transform(current).map_err(Reason::Mismatch)?;

    if K::validate(&transformed) {
        Ok(transformed)
    } else {
        Err(Reason::Rejected)
    }
}

pub(crate) fn resolve_as<K: Kind>(datum: Datum) -> Result<Datum, InvalidValue> {
    build::<K>(datum).map(ValueObject::into_resolved)
}
