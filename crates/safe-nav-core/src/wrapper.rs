//! The safe-navigation handle.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use safe_nav_types::{BindingEnvironment, ResolvedType, TypeDescriptor};

use crate::adapter::FromValue;
use crate::dispatch::DispatchEngine;
use crate::value::{ObjectRef, Value};

/// Stand-in for a possibly-absent value of a declared type.
///
/// A wrapper never hands out the value it holds. Every access is an
/// operation routed through [`invoke`](Self::invoke), which either delegates
/// to the real object or synthesizes a safe default. Cloning is cheap and
/// shares the same real object.
#[derive(Clone)]
pub struct Wrapper {
    engine: Arc<DispatchEngine>,
    declared_type: TypeDescriptor,
    bindings: BindingEnvironment,
    target: Option<ObjectRef>,
}

impl Wrapper {
    pub(crate) fn with_bindings(
        engine: Arc<DispatchEngine>,
        declared_type: TypeDescriptor,
        bindings: BindingEnvironment,
        target: Option<ObjectRef>,
    ) -> Self {
        Self {
            engine,
            declared_type,
            bindings,
            target,
        }
    }

    pub(crate) fn from_resolved(
        engine: Arc<DispatchEngine>,
        resolved: ResolvedType,
        target: Option<ObjectRef>,
    ) -> Self {
        let (declared_type, bindings) = resolved.into_parts();
        Self::with_bindings(engine, declared_type, bindings, target)
    }

    pub(crate) fn target(&self) -> Option<&ObjectRef> {
        self.target.as_ref()
    }

    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    pub fn bindings(&self) -> &BindingEnvironment {
        &self.bindings
    }

    /// Whether a real object stands behind this wrapper.
    pub fn is_present(&self) -> bool {
        self.target.is_some()
    }

    /// Invoke `operation` with `args` through the dispatch engine.
    pub fn invoke(&self, operation: &str, args: &[Value]) -> Result<Value> {
        self.engine.invoke(self, operation, args)
    }

    /// Invoke and convert the result.
    pub fn call<T: FromValue>(&self, operation: &str, args: &[Value]) -> Result<T> {
        let value = self.invoke(operation, args)?;
        T::from_value(operation, value)
    }

    /// Invoke an object-returning operation and keep navigating.
    pub fn nav(&self, operation: &str, args: &[Value]) -> Result<Wrapper> {
        self.call(operation, args)
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = ResolvedType::new(self.declared_type.clone(), self.bindings.clone());
        f.debug_struct("Wrapper")
            .field("declared_type", &format_args!("{}", resolved))
            .field("state", &if self.is_present() { "present" } else { "absent" })
            .finish()
    }
}
