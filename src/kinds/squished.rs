//! Strings with every run of whitespace collapsed to a single space.

use std::sync::LazyLock;

use regex::Regex;

use crate::datum::Datum;
use crate::error::TypeMismatch;
use crate::kind::{Kind, Stringable};
use crate::value::ValueObject;

/// Unicode whitespace and byte order marks at either end of the string.
static EDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\x{FEFF}]+|[\s\x{FEFF}]+$").expect("Invalid edge whitespace pattern")
});

/// Runs of Unicode whitespace, including the Hangul filler.
static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{3164}]+").expect("Invalid whitespace run pattern"));

/// Kind of strings trimmed at both ends with inner whitespace runs collapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquishedKind;

/// A trimmed string whose inner whitespace runs are single spaces.
///
/// # Examples
///
/// ```rust
/// use valkind::kinds::SquishedString;
///
/// let squished =
///     SquishedString::from("  This \n\nis\n  a  \r\t\n\r\t\n Test  \r\t\n").unwrap();
/// assert_eq!(squished.to_string(), "This is a Test");
/// ```
pub type SquishedString = ValueObject<SquishedKind>;

fn squish(text: &str) -> String {
    let trimmed = EDGES.replace_all(text, "");
    RUNS.replace_all(&trimmed, " ").into_owned()
}

impl Kind for SquishedKind {
    fn name() -> &'static str {
        "SquishedString"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(squish(&datum.into_string()?)))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some()
    }
}

impl Stringable for SquishedKind {}
