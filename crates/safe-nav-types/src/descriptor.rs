//! Type descriptors.
//!
//! A [`TypeDescriptor`] is built once per navigable type, ahead of time, and
//! replaces runtime reflection: it lists the type's formal parameter names,
//! whether it is a primitive value type, its capability tags, and the
//! declared return shape of every operation it supports.
//!
//! # Example
//!
//! ```
//! use safe_nav_types::{Capability, TypeDescriptor, TypeShape};
//!
//! let list = TypeDescriptor::builder("List")
//!     .type_param("E")
//!     .capability(Capability::SEQUENCE)
//!     .operation("size", "i32")
//!     .operation("get", "E")
//!     .build();
//!
//! assert_eq!(list.type_params(), ["E".to_string()]);
//! assert_eq!(list.operation("get"), Some(&TypeShape::param("E")));
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shape::TypeShape;

// =============================================================================
// Primitive kinds
// =============================================================================

/// Kinds of built-in value types.
///
/// Values of these kinds are never wrapped: they are returned as-is on the
/// present path and replaced by a zero value (or the absence marker) on the
/// absent path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Text,
}

impl PrimitiveKind {
    pub const ALL: [Self; 10] = [
        Self::Unit,
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Char,
        Self::Text,
    ];

    /// Canonical type name used in shapes and in the catalog.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "()",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::Text => "String",
        }
    }

    /// Parse a primitive type name, accepting a few common aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "()" | "unit" => Some(Self::Unit),
            "bool" => Some(Self::Bool),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            "char" => Some(Self::Char),
            "String" | "str" | "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Numeric and boolean kinds have a zero value; unit has the unit value.
    /// Text and char fall back to the absence marker.
    pub fn has_zero_value(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Bool | Self::Unit)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// A label selecting default-value policy, independent of any type hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// Ordered, indexable collections (lists, vectors).
    pub const SEQUENCE: Capability = Capability(Cow::Borrowed("sequence-like"));
    /// Key/value collections.
    pub const MAPPING: Capability = Capability(Cow::Borrowed("mapping-like"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Type descriptors
// =============================================================================

/// Whether a type is a built-in primitive or an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Object,
}

#[derive(Debug)]
struct DescriptorInner {
    name: String,
    type_params: Vec<String>,
    kind: TypeKind,
    capabilities: BTreeSet<Capability>,
    operations: BTreeMap<String, TypeShape>,
}

/// Immutable description of a navigable type.
///
/// Cloning is cheap (shared `Arc`). Two descriptors are equal when they carry
/// the same name: the name is the identity key used by the catalog and the
/// value-type registry.
#[derive(Clone)]
pub struct TypeDescriptor(Arc<DescriptorInner>);

impl TypeDescriptor {
    /// Start describing an object type.
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name)
    }

    /// Descriptor for a primitive kind. Primitives have no operations.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self(Arc::new(DescriptorInner {
            name: kind.as_str().to_string(),
            type_params: Vec::new(),
            kind: TypeKind::Primitive(kind),
            capabilities: BTreeSet::new(),
            operations: BTreeMap::new(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Formal type-parameter names, in declaration order.
    pub fn type_params(&self) -> &[String] {
        &self.0.type_params
    }

    pub fn is_generic(&self) -> bool {
        !self.0.type_params.is_empty()
    }

    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.0.kind {
            TypeKind::Primitive(kind) => Some(kind),
            TypeKind::Object => None,
        }
    }

    pub fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.0.capabilities
    }

    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.0.capabilities.contains(capability)
    }

    /// Declared return shape of an operation, if the type declares it.
    pub fn operation(&self, name: &str) -> Option<&TypeShape> {
        self.0.operations.get(name)
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &TypeShape)> {
        self.0.operations.iter().map(|(name, shape)| (name.as_str(), shape))
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.0.name)
            .field("type_params", &self.0.type_params)
            .field("kind", &self.0.kind)
            .field("capabilities", &self.0.capabilities)
            .field("operations", &self.0.operations.len())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)?;
        if !self.0.type_params.is_empty() {
            write!(f, "<{}>", self.0.type_params.join(", "))?;
        }
        Ok(())
    }
}

// =============================================================================
// Builder
// =============================================================================

enum PendingShape {
    Text(String),
    Shape(TypeShape),
}

/// Builder for object-type descriptors.
///
/// Shapes given as text are parsed in [`build`](Self::build), once every
/// formal parameter is known, so the order of `type_param` and `operation`
/// calls does not matter.
pub struct TypeDescriptorBuilder {
    name: String,
    type_params: Vec<String>,
    capabilities: BTreeSet<Capability>,
    operations: Vec<(String, PendingShape)>,
}

impl TypeDescriptorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            capabilities: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn type_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Declare an operation with its return shape written as text,
    /// e.g. `"List<Account>"`, `"T"` or `"i32"`.
    pub fn operation(mut self, name: impl Into<String>, returns: impl Into<String>) -> Self {
        self.operations
            .push((name.into(), PendingShape::Text(returns.into())));
        self
    }

    /// Declare an operation with an already-built return shape.
    pub fn operation_shape(mut self, name: impl Into<String>, returns: TypeShape) -> Self {
        self.operations
            .push((name.into(), PendingShape::Shape(returns)));
        self
    }

    /// Finish the descriptor. A later declaration of the same operation
    /// name replaces an earlier one.
    pub fn build(self) -> TypeDescriptor {
        let operations = self
            .operations
            .into_iter()
            .map(|(name, pending)| {
                let shape = match pending {
                    PendingShape::Text(text) => TypeShape::parse(&text, &self.type_params),
                    PendingShape::Shape(shape) => shape,
                };
                (name, shape)
            })
            .collect();

        TypeDescriptor(Arc::new(DescriptorInner {
            name: self.name,
            type_params: self.type_params,
            kind: TypeKind::Object,
            capabilities: self.capabilities,
            operations,
        }))
    }
}
