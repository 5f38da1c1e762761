//! Safe-Nav Core
//!
//! Dispatch engine for null-safe navigation over possibly-absent object
//! graphs.
//!
//! A [`Wrapper`] stands in for a value of a declared type that may be
//! absent. Every operation invoked on it either delegates to the real object
//! or, when there is none, synthesizes a safe result: the default policy's
//! literal for value-like returns, a further absent wrapper for object-like
//! returns. Generic return types are resolved through per-wrapper bindings,
//! so `Container<Foo>::get()` yields a wrapper declared as `Foo`.
//!
//! # Core Modules
//!
//! - [`dispatch`]: [`DispatchEngine`], the interception point and factory
//! - [`wrapper`]: [`Wrapper`], the safe-navigation handle
//! - [`resolver`]: return-shape resolution against the [`catalog`]
//! - [`policy`]: default values on the absent path
//! - [`registry`]: designated non-wrappable value types
//! - [`adapter`]: typed adapters declared with [`nav_adapter!`]
//! - [`collections`]: built-in `List<E>` and `Map<K, V>`
//! - [`config`]: engine configuration from JSON and the environment
//!
//! # Example
//!
//! ```
//! use safe_nav_core::{DispatchEngine, Value};
//! use safe_nav_types::TypeDescriptor;
//!
//! let engine = DispatchEngine::builder()
//!     .register(
//!         TypeDescriptor::builder("User")
//!             .operation("login", "String")
//!             .operation("age", "i32")
//!             .operation("manager", "User")
//!             .operation("accounts", "List<User>")
//!             .build(),
//!     )
//!     .build();
//!
//! let user = engine.wrap_shape("User", None)?;
//! let manager = user.nav("manager", &[])?;
//! assert_eq!(manager.invoke("age", &[])?, Value::I32(0));
//! assert_eq!(manager.invoke("login", &[])?, Value::Absent);
//! assert_eq!(manager.nav("accounts", &[])?.invoke("is_empty", &[])?, Value::Bool(true));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod adapter;
pub mod catalog;
pub mod collections;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod value;
pub mod well_known;
pub mod wrapper;

// Re-export commonly used types at crate root
pub use adapter::{FromValue, NavAdapter};
pub use catalog::TypeCatalog;
pub use collections::{ListNav, MapNav, NavList, NavMap};
pub use config::{DefaultLiteral, DefaultOverride, EngineConfig};
pub use dispatch::{DispatchEngine, DispatchEngineBuilder, DispatchPath};
pub use errors::NavError;
pub use policy::DefaultPolicy;
pub use registry::ValueTypeRegistry;
pub use resolver::Resolver;
pub use value::{arg, Navigable, ObjectRef, Value};
pub use wrapper::Wrapper;

/// Paths used by [`nav_adapter!`]. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use anyhow;
    pub use safe_nav_types::TypeDescriptor;
    pub use smallvec;
}
