//! The dispatch engine.
//!
//! Every operation invoked on a [`Wrapper`] lands in
//! [`DispatchEngine::invoke`], which:
//!
//! 1. looks the operation up on the wrapper's declared type and resolves its
//!    return shape under the wrapper's bindings
//! 2. classifies the concrete return type as value-like (primitive or a
//!    designated value type) or object-like
//! 3. on an absent wrapper, answers from the default policy (value-like) or
//!    with a fresh absent wrapper (object-like), without any side effect
//! 4. on a present wrapper, delegates to the real object, returns
//!    value-like results unchanged and wraps object-like results, whether
//!    the result itself is present or absent
//!
//! Delegated errors propagate unchanged, before any wrapping. Nothing is
//! cached between calls: every invocation re-reads the real object.
//!
//! # Example
//!
//! ```
//! use safe_nav_core::{DispatchEngine, Value};
//! use safe_nav_core::well_known::list_type;
//!
//! let engine = DispatchEngine::builder().build();
//! let absent = engine.wrap_typed(&list_type(), None);
//!
//! assert_eq!(absent.invoke("is_empty", &[])?, Value::Bool(true));
//! assert_eq!(absent.invoke("size", &[])?, Value::I32(0));
//! assert_eq!(absent.invoke("index_of", &[Value::I32(3)])?, Value::I32(-1));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::{Arc, OnceLock};

use anyhow::{anyhow, Context, Result};
use safe_nav_types::{BindingEnvironment, ResolvedType, TypeDescriptor, TypeShape};
use tracing::{debug, trace, warn};

use crate::adapter::NavAdapter;
use crate::catalog::TypeCatalog;
use crate::config::EngineConfig;
use crate::errors::NavError;
use crate::policy::{literal_fits, DefaultPolicy};
use crate::registry::ValueTypeRegistry;
use crate::resolver::Resolver;
use crate::value::{ObjectRef, Value};
use crate::wrapper::Wrapper;

static GLOBAL: OnceLock<Arc<DispatchEngine>> = OnceLock::new();

/// The four outcomes of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPath {
    /// Absent wrapper, value-like return: answered by the default policy.
    AbsentDefault,
    /// Absent wrapper, object-like return: a further absent wrapper.
    AbsentWrapNext,
    /// Present wrapper, value-like return: the real result as-is.
    PresentDelegateValue,
    /// Present wrapper, object-like return: the real result, wrapped.
    PresentDelegateWrap,
}

impl DispatchPath {
    pub fn classify(present: bool, value_like: bool) -> Self {
        match (present, value_like) {
            (false, true) => Self::AbsentDefault,
            (false, false) => Self::AbsentWrapNext,
            (true, true) => Self::PresentDelegateValue,
            (true, false) => Self::PresentDelegateWrap,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AbsentDefault => "absent_default",
            Self::AbsentWrapNext => "absent_wrap_next",
            Self::PresentDelegateValue => "present_delegate_value",
            Self::PresentDelegateWrap => "present_delegate_wrap",
        }
    }
}

/// Owns the catalog, the value-type registry and the default policy, and
/// decides how every wrapped operation is answered.
///
/// All three tables are fixed once the engine is built.
#[derive(Debug)]
pub struct DispatchEngine {
    catalog: TypeCatalog,
    value_types: ValueTypeRegistry,
    policy: DefaultPolicy,
}

impl DispatchEngine {
    pub fn builder() -> DispatchEngineBuilder {
        DispatchEngineBuilder::new()
    }

    /// The process-wide engine.
    ///
    /// Uses the engine passed to [`install_global`](Self::install_global) if
    /// one was installed before first use; otherwise builds one from the
    /// built-in types and [`EngineConfig::from_env`].
    pub fn global() -> Arc<DispatchEngine> {
        GLOBAL
            .get_or_init(|| {
                let config = EngineConfig::from_env().unwrap_or_else(|e| {
                    warn!(error = %e, "ignoring unreadable safe-nav configuration");
                    EngineConfig::default()
                });
                DispatchEngine::builder().config(config).build()
            })
            .clone()
    }

    /// Install the process-wide engine. Fails if one is already in use.
    pub fn install_global(engine: Arc<DispatchEngine>) -> Result<()> {
        GLOBAL
            .set(engine)
            .map_err(|_| anyhow!("global dispatch engine is already initialized"))
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn value_types(&self) -> &ValueTypeRegistry {
        &self.value_types
    }

    pub fn policy(&self) -> &DefaultPolicy {
        &self.policy
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog)
    }

    /// Whether results of this type are returned unwrapped.
    pub fn is_value_like(&self, descriptor: &TypeDescriptor) -> bool {
        self.value_types.is_value_type(descriptor)
    }

    // =========================================================================
    // Factory entry points
    // =========================================================================

    /// Wrap a real object, inferring the declared type from its runtime type.
    pub fn wrap(self: &Arc<Self>, value: ObjectRef) -> Result<Wrapper> {
        let declared = self
            .catalog
            .get(value.type_name())
            .cloned()
            .ok_or_else(|| NavError::UnregisteredType {
                name: value.type_name().to_string(),
            })?;
        Ok(Wrapper::with_bindings(
            self.clone(),
            declared,
            BindingEnvironment::empty(),
            Some(value),
        ))
    }

    /// Wrap a possibly-absent value of a known type.
    pub fn wrap_typed(self: &Arc<Self>, ty: &TypeDescriptor, value: Option<ObjectRef>) -> Wrapper {
        if ty.is_generic() {
            let unbound: Vec<&str> = ty
                .operations()
                .filter(|(_, returns)| returns.mentions_param())
                .map(|(name, _)| name)
                .collect();
            if !unbound.is_empty() {
                debug!(
                    type_name = ty.name(),
                    operations = ?unbound,
                    "wrapped generic type without bindings"
                );
            }
        }
        Wrapper::with_bindings(self.clone(), ty.clone(), BindingEnvironment::empty(), value)
    }

    /// Wrap a possibly-absent value of a parameterized type written as text,
    /// e.g. `"Container<Foo>"`. The bindings come from the type arguments.
    pub fn wrap_shape(self: &Arc<Self>, shape: &str, value: Option<ObjectRef>) -> Result<Wrapper> {
        let parsed = TypeShape::parse(shape, &[]);
        let resolved = self
            .resolver()
            .resolve(&parsed, &BindingEnvironment::empty())
            .with_context(|| format!("resolving wrapped type `{}`", shape))?;
        Ok(Wrapper::from_resolved(self.clone(), resolved, value))
    }

    /// Wrap a possibly-absent value behind a typed adapter, declared as the
    /// adapter's type.
    pub fn wrap_as<A: NavAdapter>(self: &Arc<Self>, value: Option<ObjectRef>) -> A {
        A::from_wrapper(self.wrap_typed(&A::descriptor(), value))
    }

    /// Wrap a real object behind a typed adapter, declared as its runtime type.
    pub fn adapt<A: NavAdapter>(self: &Arc<Self>, value: ObjectRef) -> Result<A> {
        self.wrap(value).map(A::from_wrapper)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Answer `operation` invoked on `wrapper`.
    pub fn invoke(self: &Arc<Self>, wrapper: &Wrapper, operation: &str, args: &[Value]) -> Result<Value> {
        let declared = wrapper.declared_type();
        let shape = declared
            .operation(operation)
            .ok_or_else(|| NavError::UnknownOperation {
                type_name: declared.name().to_string(),
                operation: operation.to_string(),
            })?;

        let resolved = self
            .resolver()
            .resolve(shape, wrapper.bindings())
            .with_context(|| {
                format!(
                    "resolving return type of `{}::{}`",
                    declared.name(),
                    operation
                )
            })?;

        let value_like = self.is_value_like(resolved.descriptor());
        let path = DispatchPath::classify(wrapper.is_present(), value_like);
        trace!(
            declared = declared.name(),
            operation,
            returns = %resolved,
            path = path.as_str(),
            "dispatch"
        );

        let Some(target) = wrapper.target() else {
            return Ok(match path {
                DispatchPath::AbsentDefault => {
                    self.policy
                        .default_for(declared, operation, resolved.descriptor())
                }
                _ => Value::Nav(Wrapper::from_resolved(self.clone(), resolved, None)),
            });
        };

        // Delegated errors propagate before anything is wrapped
        let result = target.call(operation, args)?;
        if value_like {
            Ok(result)
        } else {
            self.wrap_result(operation, resolved, result)
        }
    }

    fn wrap_result(self: &Arc<Self>, operation: &str, resolved: ResolvedType, result: Value) -> Result<Value> {
        let target = match result {
            Value::Object(obj) => Some(obj),
            Value::Absent => None,
            Value::Nav(inner) => inner.target().cloned(),
            other => {
                return Err(NavError::UnexpectedValue {
                    operation: operation.to_string(),
                    expected: resolved.to_string(),
                    found: other.kind_name().to_string(),
                }
                .into())
            }
        };
        Ok(Value::Nav(Wrapper::from_resolved(self.clone(), resolved, target)))
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`DispatchEngine`].
///
/// ```
/// use safe_nav_core::DispatchEngine;
/// use safe_nav_types::TypeDescriptor;
///
/// let engine = DispatchEngine::builder()
///     .register(TypeDescriptor::builder("Money").build())
///     .value_type("Money")
///     .build();
/// assert!(engine.value_types().is_designated("Money"));
/// ```
pub struct DispatchEngineBuilder {
    catalog: TypeCatalog,
    value_types: ValueTypeRegistry,
    policy: DefaultPolicy,
}

impl DispatchEngineBuilder {
    pub fn new() -> Self {
        Self {
            catalog: TypeCatalog::with_builtins(),
            value_types: ValueTypeRegistry::new(),
            policy: DefaultPolicy::builtin(),
        }
    }

    /// Register a navigable type.
    pub fn register(mut self, descriptor: TypeDescriptor) -> Self {
        if let Some(previous) = self.catalog.register(descriptor) {
            debug!(type_name = previous.name(), "replaced registered type");
        }
        self
    }

    pub fn register_all<I: IntoIterator<Item = TypeDescriptor>>(self, descriptors: I) -> Self {
        descriptors
            .into_iter()
            .fold(self, |builder, desc| builder.register(desc))
    }

    /// Designate a type as a non-wrappable value type.
    pub fn value_type(mut self, name: impl Into<String>) -> Self {
        self.value_types.designate(name);
        self
    }

    /// Add or replace a (capability, operation) default.
    pub fn default_value(
        mut self,
        capability: safe_nav_types::Capability,
        operation: impl Into<String>,
        value: Value,
    ) -> Self {
        self.policy.insert(capability, operation, value);
        self
    }

    /// Apply a configuration: designated value types and policy overrides.
    pub fn config(mut self, config: EngineConfig) -> Self {
        for name in config.value_types {
            self.value_types.designate(name);
        }
        for entry in config.defaults {
            self.policy
                .insert(entry.capability, entry.operation, entry.value.into());
        }
        self
    }

    pub fn build(self) -> Arc<DispatchEngine> {
        for name in self.value_types.designated() {
            if !self.catalog.contains(name) {
                warn!(type_name = name, "designated value type is not registered");
            }
        }
        self.check_default_literals();
        debug!(
            types = self.catalog.len(),
            value_types = self.value_types.designated().count(),
            defaults = self.policy.len(),
            "built dispatch engine"
        );
        Arc::new(DispatchEngine {
            catalog: self.catalog,
            value_types: self.value_types,
            policy: self.policy,
        })
    }
}

impl DispatchEngineBuilder {
    /// Warn about policy literals that cannot answer a registered operation
    /// with a concrete primitive return. Dispatch falls back to the zero of
    /// the declared kind for those.
    fn check_default_literals(&self) {
        for (capability, operation, literal) in self.policy.entries() {
            for declared in self.catalog.iter() {
                if !declared.has_capability(capability) {
                    continue;
                }
                let Some(TypeShape::Named(returns)) = declared.operation(operation) else {
                    continue;
                };
                let Some(kind) = self.catalog.get(returns).and_then(|t| t.primitive_kind()) else {
                    continue;
                };
                if !literal_fits(&literal.clone().coerce_to(kind), kind) {
                    warn!(
                        capability = %capability,
                        type_name = declared.name(),
                        operation,
                        returns = kind.as_str(),
                        literal = literal.kind_name(),
                        "default literal does not fit the declared return kind"
                    );
                }
            }
        }
    }
}

impl Default for DispatchEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
