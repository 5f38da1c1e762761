//! Generic-parameter bindings.
//!
//! A [`BindingEnvironment`] maps the formal parameter names of a wrapped
//! generic type to concrete [`ResolvedType`]s. It is created when a wrapper
//! is built for a parameterized type and handed, unchanged, to wrappers
//! created from its accessor results. It is never mutated in place.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;

/// A concrete type together with the bindings that apply inside it.
///
/// For `List<Account>` the descriptor is `List` and the bindings are
/// `{E = Account}`.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedType {
    descriptor: TypeDescriptor,
    bindings: BindingEnvironment,
}

impl ResolvedType {
    pub fn new(descriptor: TypeDescriptor, bindings: BindingEnvironment) -> Self {
        Self {
            descriptor,
            bindings,
        }
    }

    /// A type with no bindings of its own.
    pub fn concrete(descriptor: TypeDescriptor) -> Self {
        Self::new(descriptor, BindingEnvironment::empty())
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn bindings(&self) -> &BindingEnvironment {
        &self.bindings
    }

    pub fn into_parts(self) -> (TypeDescriptor, BindingEnvironment) {
        (self.descriptor, self.bindings)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor.name())?;
        let params = self.descriptor.type_params();
        if params.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.bindings.get(param) {
                Some(bound) => write!(f, "{}", bound)?,
                None => f.write_str(param)?,
            }
        }
        f.write_str(">")
    }
}

impl fmt::Debug for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResolvedType({})", self)
    }
}

/// Immutable mapping from generic-parameter name to concrete type.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BindingEnvironment(Arc<BTreeMap<String, ResolvedType>>);

impl BindingEnvironment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an environment from (formal name, concrete type) pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, ResolvedType)>,
    {
        Self(Arc::new(pairs.into_iter().collect()))
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedType> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Bound parameter names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BindingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, ty)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", name, ty)?;
        }
        f.write_str("}")
    }
}
