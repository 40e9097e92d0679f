//! Built-in example kinds.
//!
//! Each kind is a marker type paired with a type alias for its value object,
//! so the factory surface reads naturally:
//!
//! ```rust
//! use valkind::kinds::{Email, SquishedString, TrimmedString};
//!
//! assert_eq!(TrimmedString::get_from("  a  ").unwrap().as_str(), Some("a"));
//! assert_eq!(SquishedString::get_from(" a \n b ").unwrap().as_str(), Some("a b"));
//! assert!(!Email::is_valid("test@example.com@").unwrap());
//! ```

mod email;
mod squished;
mod trimmed;

pub use email::{Email, EmailKind};
pub use squished::{SquishedKind, SquishedString};
pub use trimmed::{TrimmedKind, TrimmedString};
