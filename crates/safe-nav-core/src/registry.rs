//! Non-wrappable value types.
//!
//! Results whose concrete type is a value type are returned as-is on the
//! present path and replaced by a policy default on the absent path; they
//! are never wrapped. Primitives are always value types. Further types are
//! designated by exact name, never by prefix.

use std::collections::BTreeSet;

use safe_nav_types::TypeDescriptor;

#[derive(Debug, Default, Clone)]
pub struct ValueTypeRegistry {
    designated: BTreeSet<String>,
}

impl ValueTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate a non-primitive type as a value type.
    pub fn designate(&mut self, name: impl Into<String>) -> bool {
        self.designated.insert(name.into())
    }

    pub fn is_designated(&self, name: &str) -> bool {
        self.designated.contains(name)
    }

    /// Whether results of this type are returned unwrapped.
    pub fn is_value_type(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.primitive_kind().is_some() || self.designated.contains(descriptor.name())
    }

    pub fn designated(&self) -> impl Iterator<Item = &str> {
        self.designated.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ValueTypeRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            designated: iter.into_iter().map(Into::into).collect(),
        }
    }
}
