//! Custom assertion utilities for tests.
//!
//! Provides assertion helpers that give better error messages and
//! standardize common assertion patterns.

use safe_nav::{NavError, Value, Wrapper};

/// Assert that a result is Ok and return the inner value.
///
/// # Panics
///
/// Panics with a descriptive message if the result is `Err`.
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that an error message (including its context chain) contains
/// expected text, case-insensitively.
pub fn assert_error_contains(error: &anyhow::Error, expected_text: &str, context: &str) {
    let error_str = format!("{:#}", error).to_lowercase();
    let expected_lower = expected_text.to_lowercase();

    assert!(
        error_str.contains(&expected_lower),
        "{}: error message should contain '{}', got: {:#}",
        context,
        expected_text,
        error
    );
}

/// Assert that an error is (or wraps) the expected [`NavError`].
pub fn assert_nav_error(error: &anyhow::Error, expected: &NavError, context: &str) {
    match error.downcast_ref::<NavError>() {
        Some(actual) => assert_eq!(actual, expected, "{}", context),
        None => panic!("{}: expected {:?}, got: {:#}", context, expected, error),
    }
}

/// Assert that a value is a wrapper declared as `type_name`, and return it.
pub fn assert_wrapper_of(value: Value, type_name: &str, context: &str) -> Wrapper {
    match value {
        Value::Nav(wrapper) => {
            assert_eq!(
                wrapper.declared_type().name(),
                type_name,
                "{}: wrong declared type",
                context
            );
            wrapper
        }
        other => panic!("{}: expected a {} wrapper, got {:?}", context, type_name, other),
    }
}

/// Assert that no real object stands behind a wrapper.
pub fn assert_absent(wrapper: &Wrapper, context: &str) {
    assert!(
        !wrapper.is_present(),
        "{}: expected an absent wrapper, got {:?}",
        context,
        wrapper
    );
}

/// Assert that a real object stands behind a wrapper.
pub fn assert_present(wrapper: &Wrapper, context: &str) {
    assert!(
        wrapper.is_present(),
        "{}: expected a present wrapper, got {:?}",
        context,
        wrapper
    );
}
