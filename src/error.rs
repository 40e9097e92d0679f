//! Error types for value construction.
//!
//! Construction can fail in two disjoint ways:
//!
//! - [`InvalidValue`]: the input was rejected. This is expected and
//!   data-dependent; the `try_*` factories turn it into `None`.
//! - [`DefinitionError`]: the kind itself is broken, for example because its
//!   base kinds form a cycle. No factory ever suppresses it.
//!
//! [`Error`] is the union returned by `from` and `get_from`.

use std::fmt;

use thiserror::Error;

use crate::datum::Datum;

/// Any failure of the construction pipeline.
///
/// # Examples
///
/// ```rust
/// use valkind::prelude::*;
///
/// struct Positive;
///
/// impl Kind for Positive {
///     fn validate(datum: &Datum) -> bool {
///         datum.as_i64().is_some_and(|number| number > 0)
///     }
/// }
///
/// let error = ValueObject::<Positive>::from(-3).unwrap_err();
/// assert!(error.is_invalid());
/// assert!(error.to_string().ends_with(r#"was attempted: integer of "-3""#));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input was rejected.
    #[error(transparent)]
    Invalid(#[from] InvalidValue),
    /// The kind's definition is broken.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl Error {
    /// Returns `true` if the input was rejected.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns `true` if the kind's definition is broken.
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self, Self::Definition(_))
    }

    /// Returns the rejection, if this is one.
    #[must_use]
    pub const fn as_invalid(&self) -> Option<&InvalidValue> {
        match self {
            Self::Invalid(invalid) => Some(invalid),
            Self::Definition(_) => None,
        }
    }
}

/// An input rejected by a kind.
///
/// Carries the kind's name, a human-readable description of the attempted
/// input (see [`describe`]) and the [`Reason`] for the rejection. The
/// description is for diagnostics only.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("An invalid value ({kind}) was attempted: {attempted}")]
pub struct InvalidValue {
    kind: &'static str,
    attempted: String,
    reason: Reason,
}

impl InvalidValue {
    /// Creates a rejection of `input` by the kind named `kind`.
    #[must_use]
    pub fn new(kind: &'static str, input: &Datum, reason: Reason) -> Self {
        Self {
            kind,
            attempted: describe(input),
            reason,
        }
    }

    /// Returns the name of the rejecting kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the description of the rejected input.
    #[must_use]
    pub fn attempted(&self) -> &str {
        &self.attempted
    }

    /// Returns why the input was rejected.
    #[must_use]
    pub const fn reason(&self) -> &Reason {
        &self.reason
    }
}

/// Why a kind rejected its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The validation predicate returned `false`.
    Rejected,
    /// The transform could not handle the input's shape.
    Mismatch(TypeMismatch),
    /// A base kind rejected the input before this kind ran.
    Base {
        /// Name of the rejecting base kind.
        kind: &'static str,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => formatter.write_str("validation returned false"),
            Self::Mismatch(mismatch) => write!(formatter, "transform failed: {mismatch}"),
            Self::Base { kind } => write!(formatter, "base kind {kind} rejected the input"),
        }
    }
}

/// A broken kind definition.
///
/// These describe defects in how a kind was declared, never problems with a
/// particular input, and propagate through every factory including the
/// `try_*` family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The kind lists itself among its own base kinds.
    #[error("The value '{kind}' contains itself as a base value.")]
    SelfReference {
        /// Name of the offending kind.
        kind: &'static str,
    },
    /// The base kinds of several kinds refer back to one another.
    #[error("The base values form a cycle: {}", .path.join(" -> "))]
    Cycle {
        /// The kinds along the cycle, starting and ending with the same kind.
        path: Vec<&'static str>,
    },
}

/// A transform received a datum of the wrong shape.
///
/// # Examples
///
/// ```rust
/// use valkind::TypeMismatch;
///
/// let mismatch = TypeMismatch::new("string", "integer");
/// assert_eq!(mismatch.to_string(), "expected string, found integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// The shape the transform needed.
    pub expected: &'static str,
    /// The shape it was given.
    pub found: &'static str,
}

impl TypeMismatch {
    /// Creates a new `TypeMismatch`.
    #[must_use]
    pub const fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
}

/// Describes a datum for diagnostics.
///
/// Each shape gets a distinguishable description: `null`, `resource`,
/// `boolean of "true"`, `integer of "42"`, `string of "text"`,
/// `instance of T` (with its string value when it has one), and
/// `array of <json>` for aggregates.
///
/// # Examples
///
/// ```rust
/// use valkind::{Datum, describe};
///
/// assert_eq!(describe(&Datum::Null), "null");
/// assert_eq!(describe(&Datum::from(false)), r#"boolean of "false""#);
/// assert_eq!(describe(&Datum::from("x")), r#"string of "x""#);
/// assert_eq!(describe(&Datum::from(vec![1, 2])), "array of [1,2]");
/// ```
#[must_use]
pub fn describe(datum: &Datum) -> String {
    match datum {
        Datum::Resource(_) => "resource".to_owned(),
        Datum::Null => "null".to_owned(),
        Datum::Bool(flag) => format!("boolean of \"{flag}\""),
        Datum::Int(_) | Datum::Float(_) | Datum::Str(_) => {
            format!("{} of \"{datum}\"", datum.type_name())
        }
        Datum::Object(object) => match object.text() {
            Some(text) => format!(
                "instance of {} with string value of \"{text}\"",
                object.type_name()
            ),
            None => format!("instance of {}", object.type_name()),
        },
        Datum::Value(wrapped) => format!(
            "instance of {} with resolved value {}",
            wrapped.kind_name(),
            describe(wrapped.resolved())
        ),
        Datum::List(_) | Datum::Map(_) => {
            let json = serde_json::to_string(datum).unwrap_or_else(|_| format!("{datum:?}"));
            format!("array of {json}")
        }
    }
}
