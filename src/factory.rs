//! Factory and query surface of [`ValueObject`].
//!
//! Every function here is a thin composition over the construction pipeline;
//! none of them validates anything on its own.

use crate::datum::Datum;
use crate::error::{DefinitionError, Error};
use crate::kind::Kind;
use crate::value::{self, ValueObject};

impl<K: Kind> ValueObject<K> {
    /// Constructs a value object of kind `K` from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] when `K` (or one of its base kinds) rejects
    /// the input, and [`Error::Definition`] when `K` is broken.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valkind::prelude::*;
    ///
    /// struct NonEmpty;
    ///
    /// impl Kind for NonEmpty {
    ///     fn validate(datum: &Datum) -> bool {
    ///         datum.as_str().is_some_and(|text| !text.is_empty())
    ///     }
    /// }
    ///
    /// assert!(ValueObject::<NonEmpty>::from("x").is_ok());
    /// assert!(ValueObject::<NonEmpty>::from("").unwrap_err().is_invalid());
    /// ```
    pub fn from(input: impl Into<Datum>) -> Result<Self, Error> {
        value::construct::<K>(input.into())
    }

    /// Like [`from`](Self::from), but a rejected input yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when `K` is broken. Those are never
    /// turned into `None`.
    pub fn try_from(input: impl Into<Datum>) -> Result<Option<Self>, DefinitionError> {
        match Self::from(input) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Invalid(_)) => Ok(None),
            Err(Error::Definition(error)) => Err(error),
        }
    }

    /// Constructs a value object and returns only its resolved value.
    ///
    /// # Errors
    ///
    /// Same as [`from`](Self::from).
    pub fn get_from(input: impl Into<Datum>) -> Result<Datum, Error> {
        Self::from(input).map(Self::into_resolved)
    }

    /// Like [`get_from`](Self::get_from), but a rejected input yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`try_from`](Self::try_from).
    pub fn try_get_from(input: impl Into<Datum>) -> Result<Option<Datum>, DefinitionError> {
        Ok(Self::try_from(input)?.map(Self::into_resolved))
    }

    /// Returns whether `K` accepts `input`.
    ///
    /// # Errors
    ///
    /// Same as [`try_from`](Self::try_from).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valkind::prelude::*;
    ///
    /// struct Flag;
    ///
    /// impl Kind for Flag {
    ///     fn validate(datum: &Datum) -> bool {
    ///         datum.as_bool().is_some()
    ///     }
    /// }
    ///
    /// assert_eq!(ValueObject::<Flag>::is_valid(true), Ok(true));
    /// assert_eq!(ValueObject::<Flag>::is_valid("true"), Ok(false));
    /// ```
    pub fn is_valid(input: impl Into<Datum>) -> Result<bool, DefinitionError> {
        Ok(Self::try_from(input)?.is_some())
    }
}
