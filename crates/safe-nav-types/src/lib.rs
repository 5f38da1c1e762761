//! Shared types for the safe-nav workspace.
//!
//! This crate holds the pure type metadata the dispatch engine works from.
//! Nothing in here touches a real object:
//!
//! - [`descriptor`]: [`TypeDescriptor`], the ahead-of-time description of a
//!   navigable type (formal type parameters, capability tags, operations)
//! - [`shape`]: [`TypeShape`], the declared return shape of an operation
//! - [`bindings`]: [`BindingEnvironment`], generic-parameter bindings scoped
//!   to one wrapper
//! - [`env_utils`]: environment variable helpers used by configuration

pub mod bindings;
pub mod descriptor;
pub mod env_utils;
pub mod shape;

// Re-export commonly used types at crate root
pub use bindings::{BindingEnvironment, ResolvedType};
pub use descriptor::{Capability, PrimitiveKind, TypeDescriptor, TypeDescriptorBuilder, TypeKind};
pub use shape::{split_type_params, TypeShape};
