#![cfg(feature = "kinds")]

//! Integration tests for the construction pipeline.
//!
//! Covers the same-kind and cross-kind input rules, base-kind chaining,
//! transform-before-validate ordering and definition errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;
use valkind::prelude::*;

// =============================================================================
// Test Kinds
// =============================================================================

struct NonBlank;

impl Kind for NonBlank {
    fn name() -> &'static str {
        "NonBlank"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()?.trim()))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some_and(|text| !text.is_empty())
    }
}

struct AppendA;

impl Kind for AppendA {
    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()? + "a"))
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct AppendB;

impl Kind for AppendB {
    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()? + "b"))
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct Sequenced;

impl Kind for Sequenced {
    const BASES: &'static [BaseKind] = &[
        BaseKind::of::<NonBlank>(),
        BaseKind::of::<AppendA>(),
        BaseKind::of::<AppendB>(),
    ];

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()? + "!"))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some_and(|text| text.ends_with("ab!"))
    }
}

static GUARDED_TRANSFORMS: AtomicUsize = AtomicUsize::new(0);
static GUARDED_VALIDATIONS: AtomicUsize = AtomicUsize::new(0);

struct Guarded;

impl Kind for Guarded {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<NonBlank>()];

    fn name() -> &'static str {
        "Guarded"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        GUARDED_TRANSFORMS.fetch_add(1, Ordering::SeqCst);
        Ok(datum)
    }

    fn validate(_: &Datum) -> bool {
        GUARDED_VALIDATIONS.fetch_add(1, Ordering::SeqCst);
        true
    }
}

struct Shouting;

impl Kind for Shouting {
    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()?.to_uppercase()))
    }

    fn validate(datum: &Datum) -> bool {
        datum
            .as_str()
            .is_some_and(|text| text.chars().all(|character| !character.is_lowercase()))
    }
}

struct Looping;

impl Kind for Looping {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<Self>()];

    fn name() -> &'static str {
        "Looping"
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct OnTopOfLooping;

impl Kind for OnTopOfLooping {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<Looping>()];

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct Ping;

impl Kind for Ping {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<Pong>()];

    fn name() -> &'static str {
        "Ping"
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct Pong;

impl Kind for Pong {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<Ping>()];

    fn name() -> &'static str {
        "Pong"
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct SelfListedLast;

impl Kind for SelfListedLast {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<NonBlank>(), BaseKind::of::<Self>()];

    fn name() -> &'static str {
        "SelfListedLast"
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

struct CycleListedLast;

impl Kind for CycleListedLast {
    const BASES: &'static [BaseKind] = &[BaseKind::of::<NonBlank>(), BaseKind::of::<Ping>()];

    fn name() -> &'static str {
        "CycleListedLast"
    }

    fn validate(_: &Datum) -> bool {
        true
    }
}

// =============================================================================
// Same-kind and Cross-kind Inputs
// =============================================================================

#[rstest]
fn test_rewrapping_same_kind_keeps_original_input() {
    let first = TrimmedString::from("  padded  ").unwrap();
    let second = TrimmedString::from(first.clone()).unwrap();

    assert_eq!(second.original(), &Datum::from("  padded  "));
    assert_eq!(second.get(), first.get());
    assert_eq!(second, first);
}

#[rstest]
fn test_rewrapping_by_reference_is_equivalent() {
    let first = Email::from(" a@b.io ").unwrap();

    assert_eq!(Email::from(&first).unwrap(), first);
}

#[rstest]
fn test_other_kind_input_is_unwrapped_to_its_resolved_value() {
    let trimmed = TrimmedString::from("  a \n\n b  ").unwrap();
    let squished = SquishedString::from(trimmed).unwrap();

    assert_eq!(squished.original(), &Datum::from("a \n\n b"));
    assert_eq!(squished.as_str(), Some("a b"));
}

#[rstest]
fn test_unwrapped_input_is_validated_again() {
    let trimmed = TrimmedString::from("  not an address ").unwrap();

    assert_eq!(Email::try_from(trimmed), Ok(None));
}

#[rstest]
fn test_wrapped_value_exposes_its_kind() {
    let datum = Datum::from(TrimmedString::from(" x ").unwrap());
    let wrapped = datum.as_value().unwrap();

    assert_eq!(wrapped.kind_name(), "TrimmedString");
    assert!(wrapped.is_kind::<valkind::kinds::TrimmedKind>());
    assert!(!wrapped.is_kind::<valkind::kinds::EmailKind>());
    assert_eq!(wrapped.original(), &Datum::from(" x "));
    assert_eq!(wrapped.resolved(), &Datum::from("x"));
}

// =============================================================================
// Base Kinds
// =============================================================================

#[rstest]
fn test_base_kinds_apply_in_declaration_order() {
    let value = ValueObject::<Sequenced>::from("  x  ").unwrap();

    assert_eq!(value.original(), &Datum::from("  x  "));
    assert_eq!(value.as_str(), Some("xab!"));
}

#[rstest]
fn test_rejection_by_a_base_kind_stops_the_pipeline() {
    let error = ValueObject::<Guarded>::from("   ").unwrap_err();

    let invalid = error.as_invalid().unwrap();
    assert_eq!(invalid.kind(), "Guarded");
    assert_eq!(invalid.reason(), &Reason::Base { kind: "NonBlank" });
    assert_eq!(invalid.attempted(), r#"string of "   ""#);
    assert_eq!(GUARDED_TRANSFORMS.load(Ordering::SeqCst), 0);
    assert_eq!(GUARDED_VALIDATIONS.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_base_kind_type_mismatch_is_reported_as_base_rejection() {
    let error = ValueObject::<Sequenced>::from(3).unwrap_err();

    assert_eq!(
        error.as_invalid().map(InvalidValue::reason),
        Some(&Reason::Base { kind: "NonBlank" })
    );
}

// =============================================================================
// Transform and Validate
// =============================================================================

#[rstest]
fn test_validation_observes_the_transformed_value() {
    let value = ValueObject::<Shouting>::from("quiet").unwrap();

    assert_eq!(value.as_str(), Some("QUIET"));
    assert_eq!(value.original(), &Datum::from("quiet"));
}

#[rstest]
#[case(Datum::Null, "null")]
#[case(Datum::from(false), r#"boolean of "false""#)]
#[case(Datum::from(1.5), r#"float of "1.5""#)]
#[case(Datum::from(vec!["a"]), r#"array of ["a"]"#)]
#[case(Datum::from(Resource::new(0_u8)), "resource")]
fn test_rejection_describes_the_attempted_input(#[case] input: Datum, #[case] expected: &str) {
    let error = Email::from(input).unwrap_err();

    assert_eq!(
        error.to_string(),
        format!("An invalid value (Email) was attempted: {expected}")
    );
}

#[rstest]
fn test_rejection_describes_host_objects_with_text() {
    let error = Email::from(Opaque::with_text("not-an-email")).unwrap_err();

    assert_eq!(
        error.as_invalid().unwrap().attempted(),
        r#"instance of &str with string value of "not-an-email""#
    );
}

// =============================================================================
// Definition Errors
// =============================================================================

#[rstest]
fn test_self_referencing_kind_is_a_definition_error() {
    let error = ValueObject::<Looping>::from("x").unwrap_err();

    assert_eq!(
        error,
        Error::Definition(DefinitionError::SelfReference { kind: "Looping" })
    );
}

#[rstest]
fn test_definition_error_of_a_base_kind_is_not_a_rejection() {
    let expected = DefinitionError::SelfReference { kind: "Looping" };

    assert_eq!(
        ValueObject::<OnTopOfLooping>::from("x"),
        Err(Error::Definition(expected.clone()))
    );
    assert_eq!(ValueObject::<OnTopOfLooping>::try_from("x"), Err(expected.clone()));
    assert_eq!(ValueObject::<OnTopOfLooping>::is_valid("x"), Err(expected));
}

#[rstest]
fn test_cyclic_base_kinds_are_a_definition_error() {
    let expected = DefinitionError::Cycle {
        path: vec!["Ping", "Pong", "Ping"],
    };

    assert_eq!(
        ValueObject::<Ping>::get_from("x"),
        Err(Error::Definition(expected.clone()))
    );
    assert_eq!(ValueObject::<Ping>::try_get_from("x"), Err(expected));
}

#[rstest]
#[case(Datum::from("x"))]
#[case(Datum::from("   "))]
#[case(Datum::from(42))]
#[case(Datum::Null)]
fn test_self_reference_after_a_rejecting_base_fails_for_every_input(#[case] input: Datum) {
    let expected = DefinitionError::SelfReference {
        kind: "SelfListedLast",
    };

    assert_eq!(
        ValueObject::<SelfListedLast>::from(input.clone()),
        Err(Error::Definition(expected.clone()))
    );
    assert_eq!(ValueObject::<SelfListedLast>::try_from(input.clone()), Err(expected.clone()));
    assert_eq!(ValueObject::<SelfListedLast>::try_get_from(input.clone()), Err(expected.clone()));
    assert_eq!(ValueObject::<SelfListedLast>::is_valid(input), Err(expected));
}

#[rstest]
#[case(Datum::from("x"))]
#[case(Datum::from("   "))]
#[case(Datum::from(42))]
fn test_cycle_after_a_rejecting_base_fails_for_every_input(#[case] input: Datum) {
    let expected = DefinitionError::Cycle {
        path: vec!["Ping", "Pong", "Ping"],
    };

    assert_eq!(ValueObject::<CycleListedLast>::try_from(input.clone()), Err(expected.clone()));
    assert_eq!(ValueObject::<CycleListedLast>::is_valid(input), Err(expected));
}

#[rstest]
fn test_definition_errors_surface_even_for_inputs_of_the_wrong_shape() {
    assert!(ValueObject::<Pong>::try_from(Datum::Null).is_err());
}

// =============================================================================
// Sharing
// =============================================================================

#[rstest]
fn test_value_objects_are_shared_across_threads() {
    let email = Email::from("shared@example.com").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| Email::from(email.clone()).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), email);
        }
    });
}
