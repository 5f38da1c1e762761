#![allow(dead_code, unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: fixture types, real objects and typed adapters
//! - `setup`: engine and object-graph setup helpers
//! - `assertions`: custom assertion helpers

pub mod assertions;
pub mod fixtures;
pub mod setup;

// Re-export commonly used items for convenience
pub use fixtures::{
    account_type, container_type, foo_type, money_type, user_type, Account, AccountError,
    AccountNav, Container, Foo, Money, User, UserNav,
};
pub use setup::{as_object, engine, engine_builder, sample_user};

// Re-export assertion helpers for better test error messages
pub use assertions::{
    assert_absent, assert_error_contains, assert_nav_error, assert_ok, assert_present,
    assert_wrapper_of,
};
