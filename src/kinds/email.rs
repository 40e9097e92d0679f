//! E-mail addresses.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use crate::datum::Datum;
use crate::error::TypeMismatch;
use crate::kind::{Kind, Stringable};
use crate::shortcuts;
use crate::value::ValueObject;

/// Characters other than ASCII letters and digits that survive sanitizing.
const ALLOWED_PUNCTUATION: &str = "!#$%&'*+-=?^_`{|}~@.[]";

const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_ADDRESS_LENGTH: usize = 254;
const MAX_LABEL_LENGTH: usize = 63;

/// Dot-atom local part.
static LOCAL_PART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("Invalid local part pattern")
});

/// Dotted host name whose top-level label starts with a letter or is an
/// IDNA `xn--` label.
static HOST_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:xn--)?[a-z0-9]+(?:-+[a-z0-9]+)*\.)+(?:[a-z][a-z0-9]*|xn--[a-z0-9]+)(?:-+[a-z0-9]+)*$",
    )
    .expect("Invalid host name pattern")
});

/// Kind of syntactically valid e-mail addresses.
///
/// The transform drops every character that cannot appear in an address,
/// which also removes surrounding and embedded whitespace. The case of the
/// address is preserved.
///
/// An accepted address has a dot-atom local part of at most 64 bytes and a
/// domain that is either a dotted host name or a bracketed IPv4 or
/// `IPv6:` literal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmailKind;

/// A syntactically valid e-mail address.
///
/// # Examples
///
/// ```rust
/// use valkind::kinds::{Email, EmailKind};
///
/// let email = Email::from("  test@example.com  ").unwrap();
/// assert_eq!(email.as_str(), Some("test@example.com"));
///
/// assert!(Email::from("non-email").is_err());
/// assert!(Email::from(42).is_err());
/// assert_eq!(Email::is_valid("test@example.com@"), Ok(false));
///
/// assert_eq!(EmailKind::get_domain_from("ann@example.org").unwrap(), "example.org");
/// assert_eq!(EmailKind::try_get_local_part_from("nope"), Ok(None));
/// ```
pub type Email = ValueObject<EmailKind>;

fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|character| {
            character.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(*character)
        })
        .collect()
}

fn is_address(text: &str) -> bool {
    let Some((local_part, domain)) = text.rsplit_once('@') else {
        return false;
    };

    text.len() <= MAX_ADDRESS_LENGTH
        && local_part.len() <= MAX_LOCAL_PART_LENGTH
        && LOCAL_PART_PATTERN.is_match(local_part)
        && (is_host_name(domain) || is_address_literal(domain))
}

fn is_host_name(domain: &str) -> bool {
    domain.split('.').all(|label| label.len() <= MAX_LABEL_LENGTH)
        && HOST_NAME_PATTERN.is_match(domain)
}

/// `[192.0.2.1]` or `[IPv6:2001:db8::1]`.
fn is_address_literal(domain: &str) -> bool {
    let Some(literal) = domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return false;
    };

    match literal.strip_prefix("IPv6:") {
        Some(address) => address.parse::<Ipv6Addr>().is_ok(),
        None => literal.parse::<Ipv4Addr>().is_ok(),
    }
}

impl Kind for EmailKind {
    fn name() -> &'static str {
        "Email"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(sanitize(&datum.into_string()?)))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some_and(is_address)
    }
}

impl Stringable for EmailKind {}

#[shortcuts]
impl EmailKind {
    /// Returns the part of the address after the `@`.
    #[shortcut]
    pub fn get_domain(email: &Email) -> String {
        email
            .as_str()
            .and_then(|address| address.rsplit_once('@'))
            .map(|(_, domain)| domain.to_owned())
            .unwrap_or_default()
    }

    /// Returns the part of the address before the `@`.
    #[shortcut]
    pub fn get_local_part(email: &Email) -> String {
        email
            .as_str()
            .and_then(|address| address.rsplit_once('@'))
            .map(|(local_part, _)| local_part.to_owned())
            .unwrap_or_default()
    }
}
