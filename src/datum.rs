//! Dynamically typed values flowing through the construction pipeline.
//!
//! Every kind consumes and produces a [`Datum`]. Keeping the pipeline over a
//! single dynamic type is what lets base kinds feed their resolved output
//! into the next kind, and what lets callers hand any raw input to any kind
//! and get back a typed rejection instead of a compile error.
//!
//! # Examples
//!
//! ```rust
//! use valkind::Datum;
//!
//! assert_eq!(Datum::from("text").type_name(), "string");
//! assert_eq!(Datum::from(42).type_name(), "integer");
//! assert_eq!(Datum::from(vec![1, 2]).type_name(), "array");
//! assert_eq!(Datum::from(Option::<bool>::None), Datum::Null);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::TypeMismatch;
use crate::kind::Kind;
use crate::value::ValueObject;

/// A dynamically typed value.
///
/// Aggregates keep insertion order. Host objects, handles and already
/// constructed value objects are carried opaquely so the pipeline can
/// recognize them and describe them in diagnostics.
#[derive(Clone, Debug)]
pub enum Datum {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    List(Vec<Datum>),
    /// An ordered string-keyed mapping.
    Map(IndexMap<String, Datum>),
    /// A foreign host object.
    Object(Opaque),
    /// An opaque handle such as a file or socket.
    Resource(Resource),
    /// A value object of some kind.
    Value(Wrapped),
}

impl Datum {
    /// Returns the name of this datum's shape, as used in diagnostics.
    ///
    /// Lists and maps are both reported as `"array"`; value objects and host
    /// objects are both reported as `"object"`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) | Self::Map(_) => "array",
            Self::Object(_) | Self::Value(_) => "object",
            Self::Resource(_) => "resource",
        }
    }

    /// Returns `true` for [`Datum::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean if this is a [`Datum::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Datum::Int`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Datum::Float`] or a [`Datum::Int`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            Self::Int(number) => Some(*number as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Datum::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Datum::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Datum::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the wrapped value object if this is a [`Datum::Value`].
    #[must_use]
    pub const fn as_value(&self) -> Option<&Wrapped> {
        match self {
            Self::Value(wrapped) => Some(wrapped),
            _ => None,
        }
    }

    /// Takes the string out of a [`Datum::Str`].
    ///
    /// This is the usual first line of a string kind's transform: any other
    /// shape is reported as a [`TypeMismatch`], which the pipeline turns into
    /// an ordinary rejection.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] when the datum is not a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valkind::{Datum, TypeMismatch};
    ///
    /// assert_eq!(Datum::from("a").into_string(), Ok("a".to_string()));
    /// assert_eq!(
    ///     Datum::from(1).into_string(),
    ///     Err(TypeMismatch::new("string", "integer"))
    /// );
    /// ```
    pub fn into_string(self) -> Result<String, TypeMismatch> {
        match self {
            Self::Str(text) => Ok(text),
            other => Err(TypeMismatch::new("string", other.type_name())),
        }
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left == right,
            (Self::Resource(left), Self::Resource(right)) => left == right,
            (Self::Value(left), Self::Value(right)) => left == right,
            _ => false,
        }
    }
}

/// Renders the datum the way a loosely typed host casts values to text:
/// `null` is empty, booleans are `1` or empty, aggregates are JSON, and
/// floats of very large or very small magnitude use `1.0E+20` notation.
impl fmt::Display for Datum {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => formatter.write_str("1"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write_float(formatter, *number),
            Self::Str(text) => formatter.write_str(text),
            Self::List(_) | Self::Map(_) => match serde_json::to_string(self) {
                Ok(json) => formatter.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
            Self::Object(object) => formatter.write_str(object.text().unwrap_or(object.type_name())),
            Self::Resource(_) => formatter.write_str("resource"),
            Self::Value(wrapped) => write!(formatter, "{}", wrapped.resolved()),
        }
    }
}

fn write_float(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_nan() {
        return formatter.write_str("NAN");
    }
    if number.is_infinite() {
        return formatter.write_str(if number > 0.0 { "INF" } else { "-INF" });
    }

    let magnitude = number.abs();
    if magnitude >= 1e15 || (magnitude > 0.0 && magnitude < 1e-4) {
        let scientific = format!("{number:E}");
        let (mantissa, exponent) = scientific
            .split_once('E')
            .unwrap_or((scientific.as_str(), "0"));
        let fraction = if mantissa.contains('.') { "" } else { ".0" };
        let sign = if exponent.starts_with('-') { "" } else { "+" };
        return write!(formatter, "{mantissa}{fraction}E{sign}{exponent}");
    }

    write!(formatter, "{number}")
}

impl Serialize for Datum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null | Self::Resource(_) => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::Str(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Object(object) => {
                serializer.serialize_str(object.text().unwrap_or(object.type_name()))
            }
            Self::Value(wrapped) => wrapped.resolved().serialize(serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Datum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <serde_json::Value as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Datum {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for Datum {
                fn from(number: $integer) -> Self {
                    Self::Int(i64::from(number))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Integers wider than `i64` become a [`Datum::Float`] when out of range.
macro_rules! impl_from_wide_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for Datum {
                #[allow(clippy::cast_precision_loss)]
                fn from(number: $integer) -> Self {
                    i64::try_from(number).map_or(Self::Float(number as f64), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize, isize, i128, u128);

impl From<f32> for Datum {
    fn from(number: f32) -> Self {
        Self::Float(f64::from(number))
    }
}

impl From<f64> for Datum {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Datum {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Datum {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<&String> for Datum {
    fn from(text: &String) -> Self {
        Self::Str(text.clone())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Datum {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Datum {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Self>> for Datum {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Map(entries)
    }
}

impl From<Opaque> for Datum {
    fn from(object: Opaque) -> Self {
        Self::Object(object)
    }
}

impl From<Resource> for Datum {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl<K: Kind> From<ValueObject<K>> for Datum {
    fn from(value: ValueObject<K>) -> Self {
        Self::Value(Wrapped(Arc::new(value)))
    }
}

impl<K: Kind> From<&ValueObject<K>> for Datum {
    fn from(value: &ValueObject<K>) -> Self {
        Self::from(value.clone())
    }
}

impl From<serde_json::Value> for Datum {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(text) => Self::Str(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

// =============================================================================
// Opaque host values
// =============================================================================

/// A foreign host object carried through the pipeline untouched.
///
/// An `Opaque` remembers the type name of the value it was built from and,
/// when built with [`Opaque::with_text`], its string form. Equality is
/// identity: two `Opaque`s are equal only if they share the same allocation.
///
/// # Examples
///
/// ```rust
/// use valkind::Opaque;
///
/// struct Socket;
///
/// let socket = Opaque::new(Socket);
/// assert!(socket.type_name().ends_with("Socket"));
/// assert_eq!(socket.text(), None);
///
/// let port = Opaque::with_text(8080_u16);
/// assert_eq!(port.text(), Some("8080"));
/// assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
/// ```
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    text: Option<String>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps a host value that has no string form.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            text: None,
            inner: Arc::new(value),
        }
    }

    /// Wraps a host value and records its string form.
    pub fn with_text<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            text: Some(value.to_string()),
            inner: Arc::new(value),
        }
    }

    /// Returns the type name of the wrapped value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the recorded string form, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// An opaque handle, such as an open file or a socket.
///
/// Handles are never inspected; diagnostics only ever print `resource`.
#[derive(Clone)]
pub struct Resource(Arc<dyn Any + Send + Sync>);

impl Resource {
    /// Wraps a handle.
    pub fn new<T: Any + Send + Sync>(handle: T) -> Self {
        Self(Arc::new(handle))
    }

    /// Returns the handle if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Resource(..)")
    }
}

// =============================================================================
// Wrapped value objects
// =============================================================================

/// Object-safe view of a [`ValueObject`] of any kind.
pub(crate) trait ErasedValue: Send + Sync + fmt::Debug {
    fn kind_id(&self) -> TypeId;
    fn kind_name(&self) -> &'static str;
    fn original(&self) -> &Datum;
    fn resolved(&self) -> &Datum;
    fn as_any(&self) -> &dyn Any;
}

/// A value object of some kind, stored inside a [`Datum`].
///
/// Handing a `Wrapped` to a kind's factory either re-wraps it unchanged
/// (same kind) or unwraps it to its resolved value (any other kind).
#[derive(Clone, Debug)]
pub struct Wrapped(Arc<dyn ErasedValue>);

impl Wrapped {
    /// Returns the name of the wrapped value's kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.0.kind_name()
    }

    /// Returns `true` if the wrapped value is of kind `K`.
    #[must_use]
    pub fn is_kind<K: Kind>(&self) -> bool {
        self.0.kind_id() == TypeId::of::<K>()
    }

    /// Returns the wrapped value's original input.
    #[must_use]
    pub fn original(&self) -> &Datum {
        self.0.original()
    }

    /// Returns the wrapped value's resolved value.
    #[must_use]
    pub fn resolved(&self) -> &Datum {
        self.0.resolved()
    }

    /// Returns the wrapped value if it is of kind `K`.
    #[must_use]
    pub fn downcast_ref<K: Kind>(&self) -> Option<&ValueObject<K>> {
        self.0.as_any().downcast_ref()
    }
}

impl PartialEq for Wrapped {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind_id() == other.0.kind_id()
            && self.original() == other.original()
            && self.resolved() == other.resolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Datum::Null, "null")]
    #[case(Datum::from(true), "boolean")]
    #[case(Datum::from(7_u8), "integer")]
    #[case(Datum::from(1.5), "float")]
    #[case(Datum::from("text"), "string")]
    #[case(Datum::from(vec!["a", "b"]), "array")]
    #[case(Datum::Map(IndexMap::new()), "array")]
    #[case(Datum::from(Opaque::new(())), "object")]
    #[case(Datum::from(Resource::new(3_i32)), "resource")]
    fn test_type_name(#[case] datum: Datum, #[case] expected: &str) {
        assert_eq!(datum.type_name(), expected);
    }

    #[rstest]
    #[case(Datum::Null, "")]
    #[case(Datum::from(true), "1")]
    #[case(Datum::from(false), "")]
    #[case(Datum::from(-12), "-12")]
    #[case(Datum::from(2.5), "2.5")]
    #[case(Datum::from(2.0), "2")]
    #[case(Datum::from(0.0001), "0.0001")]
    #[case(Datum::from(1e20), "1.0E+20")]
    #[case(Datum::from(-1.5e20), "-1.5E+20")]
    #[case(Datum::from(1.5e-7), "1.5E-7")]
    #[case(Datum::from(f64::NAN), "NAN")]
    #[case(Datum::from(f64::INFINITY), "INF")]
    #[case(Datum::from(f64::NEG_INFINITY), "-INF")]
    #[case(Datum::from("plain"), "plain")]
    #[case(Datum::from(vec![1, 2, 3]), "[1,2,3]")]
    #[case(Datum::from(Opaque::with_text(9_u8)), "9")]
    #[case(Datum::from(Resource::new(())), "resource")]
    fn test_display(#[case] datum: Datum, #[case] expected: &str) {
        assert_eq!(datum.to_string(), expected);
    }

    #[rstest]
    fn test_map_keeps_insertion_order() {
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), Datum::from(1));
        entries.insert("alpha".to_string(), Datum::from(2));

        assert_eq!(Datum::from(entries).to_string(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[rstest]
    fn test_into_string_rejects_other_shapes() {
        let error = Datum::from(vec![1]).into_string().unwrap_err();

        assert_eq!(error, TypeMismatch::new("string", "array"));
    }

    #[rstest]
    #[case(Datum::from(3_usize), Datum::Int(3))]
    #[case(Datum::from(-3_isize), Datum::Int(-3))]
    #[case(Datum::from(u64::from(u32::MAX)), Datum::Int(i64::from(u32::MAX)))]
    #[case(Datum::from(i128::from(i64::MIN)), Datum::Int(i64::MIN))]
    #[case(Datum::from(u64::MAX), Datum::Float(2_f64.powi(64)))]
    #[case(Datum::from(-(1_i128 << 70)), Datum::Float(-(2_f64.powi(70))))]
    fn test_wide_integers(#[case] datum: Datum, #[case] expected: Datum) {
        assert_eq!(datum, expected);
    }

    #[rstest]
    fn test_option_converts_none_to_null() {
        assert_eq!(Datum::from(Option::<&str>::None), Datum::Null);
        assert_eq!(Datum::from(Some("x")), Datum::from("x"));
    }

    #[rstest]
    fn test_from_json() {
        let json = serde_json::json!({ "name": "a", "tags": [1, 2.5, null], "ok": true });
        let datum = Datum::from(json);

        let entries = datum.as_map().unwrap();
        assert_eq!(entries["name"], Datum::from("a"));
        assert_eq!(
            entries["tags"],
            Datum::List(vec![Datum::Int(1), Datum::Float(2.5), Datum::Null])
        );
        assert_eq!(entries["ok"], Datum::Bool(true));
    }

    #[rstest]
    fn test_opaque_equality_is_identity() {
        let first = Opaque::new(5_i32);
        let copy = first.clone();
        let second = Opaque::new(5_i32);

        assert_eq!(first, copy);
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_float_and_int_are_distinct() {
        assert_ne!(Datum::from(1), Datum::from(1.0));
        assert_eq!(Datum::from(1).as_f64(), Some(1.0));
    }
}
