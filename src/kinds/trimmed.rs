//! Strings with surrounding whitespace removed.

use crate::datum::Datum;
use crate::error::TypeMismatch;
use crate::kind::{Kind, Stringable};
use crate::value::ValueObject;

/// Characters stripped from both ends: space, tab, line feed, carriage
/// return, NUL and vertical tab.
const TRIMMED_CHARACTERS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Kind of strings without leading or trailing whitespace.
///
/// Inner whitespace is left untouched. Any string is accepted; inputs that
/// are not strings are rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrimmedKind;

/// A string without leading or trailing whitespace.
///
/// # Examples
///
/// ```rust
/// use valkind::kinds::TrimmedString;
///
/// let trimmed = TrimmedString::from("  This \r\t\nis a Test \r\t\n  ").unwrap();
/// assert_eq!(trimmed.to_string(), "This \r\t\nis a Test");
///
/// assert!(!TrimmedString::is_valid(vec![1, 2]).unwrap());
/// ```
pub type TrimmedString = ValueObject<TrimmedKind>;

impl Kind for TrimmedKind {
    fn name() -> &'static str {
        "TrimmedString"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        let text = datum.into_string()?;
        Ok(Datum::from(text.trim_matches(&TRIMMED_CHARACTERS[..])))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some()
    }
}

impl Stringable for TrimmedKind {}
