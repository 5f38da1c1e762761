//! Return-type resolution.
//!
//! Turns an operation's declared [`TypeShape`] plus the wrapper's current
//! [`BindingEnvironment`] into a concrete [`ResolvedType`]: the descriptor to
//! dispatch on next, and the bindings the next wrapper carries.
//!
//! | Shape                     | Descriptor            | Next bindings                 |
//! |---------------------------|-----------------------|-------------------------------|
//! | `Named(Account)`          | `Account`             | current bindings, unchanged   |
//! | `Parameterized(List<A>)`  | `List`                | fresh `{E = A}` only          |
//! | `Param(T)`                | whatever `T` is bound | the bound type's own bindings |
//! | `Opaque(..)`              | error                 |                               |
//!
//! The resolver is a pure function of type metadata. It never sees a real
//! object.

use safe_nav_types::{BindingEnvironment, ResolvedType, TypeDescriptor, TypeShape};

use crate::catalog::TypeCatalog;
use crate::errors::NavError;

/// Resolves shapes against a catalog.
pub struct Resolver<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve a declared return shape under `bindings`.
    pub fn resolve(
        &self,
        shape: &TypeShape,
        bindings: &BindingEnvironment,
    ) -> Result<ResolvedType, NavError> {
        match shape {
            TypeShape::Named(name) => {
                let descriptor = self.lookup(name, shape)?;
                Ok(ResolvedType::new(descriptor, bindings.clone()))
            }
            TypeShape::Param(name) => bindings.get(name).cloned().ok_or_else(|| {
                NavError::UnresolvedGenericParameter {
                    parameter: name.clone(),
                    bound: bindings.names().map(str::to_string).collect(),
                }
            }),
            TypeShape::Parameterized { base, args } => {
                let descriptor = self.lookup(base, shape)?;
                let formals = descriptor.type_params();
                if formals.len() != args.len() {
                    return Err(NavError::GenericArityMismatch {
                        base: base.clone(),
                        expected: formals.len(),
                        got: args.len(),
                    });
                }

                let resolved_args = args
                    .iter()
                    .map(|arg| self.resolve_argument(arg, bindings))
                    .collect::<Result<Vec<_>, _>>()?;

                let next = BindingEnvironment::from_pairs(formals.iter().cloned().zip(resolved_args));
                Ok(ResolvedType::new(descriptor, next))
            }
            TypeShape::Opaque(text) => Err(NavError::UnsupportedReturnShape {
                shape: text.clone(),
                reason: "not a concrete type, parameterized type, or type parameter reference"
                    .to_string(),
            }),
        }
    }

    /// A type argument binds to exactly what it names: a concrete argument
    /// carries no bindings of its own.
    fn resolve_argument(
        &self,
        shape: &TypeShape,
        bindings: &BindingEnvironment,
    ) -> Result<ResolvedType, NavError> {
        match shape {
            TypeShape::Named(name) => Ok(ResolvedType::concrete(self.lookup(name, shape)?)),
            other => self.resolve(other, bindings),
        }
    }

    fn lookup(&self, name: &str, shape: &TypeShape) -> Result<TypeDescriptor, NavError> {
        self.catalog
            .get(name)
            .cloned()
            .ok_or_else(|| NavError::UnsupportedReturnShape {
                shape: shape.to_string(),
                reason: format!("type `{}` is not registered", name),
            })
    }
}
