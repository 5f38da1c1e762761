//! Well-known descriptors.
//!
//! Built once at first use; every engine's catalog starts from these.
//!
//! # Usage
//!
//! ```
//! use safe_nav_core::well_known;
//! use safe_nav_types::PrimitiveKind;
//!
//! let int = well_known::primitive(PrimitiveKind::I32);
//! assert_eq!(int.name(), "i32");
//! assert_eq!(well_known::list_type().name(), "List");
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use safe_nav_types::{PrimitiveKind, TypeDescriptor};

pub use crate::collections::{list_type, map_type, LIST_TYPE_NAME, MAP_TYPE_NAME};

static PRIMITIVES: LazyLock<BTreeMap<PrimitiveKind, TypeDescriptor>> = LazyLock::new(|| {
    PrimitiveKind::ALL
        .into_iter()
        .map(|kind| (kind, TypeDescriptor::primitive(kind)))
        .collect()
});

/// Shared descriptor for a primitive kind.
pub fn primitive(kind: PrimitiveKind) -> TypeDescriptor {
    PRIMITIVES[&kind].clone()
}

/// Every built-in descriptor: primitives and the built-in containers.
pub fn builtin_types() -> Vec<TypeDescriptor> {
    PRIMITIVES
        .values()
        .cloned()
        .chain([list_type(), map_type()])
        .collect()
}
