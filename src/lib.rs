//! Safe-Nav
//!
//! Null-safe navigation over possibly-absent object graphs:
//!
//! - **Absorbing absence**: an operation on an absent value yields a safe
//!   default instead of failing
//! - **Chained navigation**: object-returning operations always yield a
//!   further wrapper, present or absent, so chains never break
//! - **Generic resolution**: `Container<Foo>::get()` yields a wrapper
//!   declared as `Foo`, `Container<Foo>::items()` one declared as `List<Foo>`
//!
//! The free functions here use the process-wide engine
//! ([`DispatchEngine::global`]). Build a dedicated engine with
//! [`DispatchEngine::builder`] to register your own navigable types.
//!
//! ```
//! use safe_nav::{Value, ListNav};
//!
//! let list: ListNav = safe_nav::wrap_as(None);
//! assert!(list.is_empty()?);
//! assert_eq!(list.index_of(Value::I32(4))?, -1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use safe_nav_core::{
    adapter, arg, catalog, collections, config, dispatch, errors, nav_adapter, policy, registry,
    resolver, value, well_known, wrapper, DefaultLiteral, DefaultOverride, DefaultPolicy,
    DispatchEngine, DispatchEngineBuilder, DispatchPath, EngineConfig, FromValue, ListNav, MapNav,
    NavAdapter, NavError, NavList, NavMap, Navigable, ObjectRef, Resolver, TypeCatalog, Value,
    ValueTypeRegistry, Wrapper,
};
pub use safe_nav_types::{
    BindingEnvironment, Capability, PrimitiveKind, ResolvedType, TypeDescriptor,
    TypeDescriptorBuilder, TypeKind, TypeShape,
};

use anyhow::Result;

/// Wrap a real object with the global engine, declared as its runtime type.
pub fn wrap(value: ObjectRef) -> Result<Wrapper> {
    DispatchEngine::global().wrap(value)
}

/// Wrap a possibly-absent value of a known type with the global engine.
pub fn wrap_typed(ty: &TypeDescriptor, value: Option<ObjectRef>) -> Wrapper {
    DispatchEngine::global().wrap_typed(ty, value)
}

/// Wrap a possibly-absent value of a parameterized type with the global
/// engine, e.g. `wrap_shape("List<i32>", None)`.
pub fn wrap_shape(shape: &str, value: Option<ObjectRef>) -> Result<Wrapper> {
    DispatchEngine::global().wrap_shape(shape, value)
}

/// Wrap a possibly-absent value behind a typed adapter with the global engine.
pub fn wrap_as<A: NavAdapter>(value: Option<ObjectRef>) -> A {
    DispatchEngine::global().wrap_as(value)
}
