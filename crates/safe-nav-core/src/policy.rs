//! Default-value policy for the absent path.
//!
//! When a value-like operation is invoked on an absent wrapper the engine
//! asks the policy for a literal, in order:
//!
//! 1. an exact (capability, operation) entry of the declaring type,
//!    e.g. `sequence-like` + `is_empty` -> `true`
//! 2. the zero value of the declared return kind (`false`, `0`, `0.0`, unit)
//! 3. the value-absence marker
//!
//! The built-in table is static. Engines extend it from configuration when
//! they are built and never change it afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use safe_nav_types::{Capability, PrimitiveKind, TypeDescriptor};

use tracing::warn;

use crate::value::Value;

static BUILTIN: LazyLock<DefaultPolicy> = LazyLock::new(|| {
    let mut policy = DefaultPolicy::empty();
    policy.insert(Capability::SEQUENCE, "is_empty", Value::Bool(true));
    policy.insert(Capability::SEQUENCE, "index_of", Value::I32(-1));
    policy.insert(Capability::SEQUENCE, "last_index_of", Value::I32(-1));
    policy.insert(Capability::MAPPING, "is_empty", Value::Bool(true));
    policy
});

/// Whether `value` is a valid result for an operation returning `kind`.
/// The absence marker stands in only for kinds without a zero value.
pub fn literal_fits(value: &Value, kind: PrimitiveKind) -> bool {
    match value.primitive_kind() {
        Some(actual) => actual == kind,
        None => value.is_absent() && !kind.has_zero_value(),
    }
}

/// Table of (capability, operation) defaults.
#[derive(Debug, Clone, Default)]
pub struct DefaultPolicy {
    by_capability: HashMap<Capability, HashMap<String, Value>>,
}

impl DefaultPolicy {
    /// A policy with no capability entries; only zero values and the
    /// absence marker apply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, capability: Capability, operation: impl Into<String>, value: Value) {
        self.by_capability
            .entry(capability)
            .or_default()
            .insert(operation.into(), value);
    }

    /// Exact (capability, operation) entry for any capability of `declared`.
    /// Capabilities are tried in their sorted order.
    pub fn lookup(&self, declared: &TypeDescriptor, operation: &str) -> Option<&Value> {
        declared.capabilities().iter().find_map(|capability| {
            self.by_capability
                .get(capability)
                .and_then(|ops| ops.get(operation))
        })
    }

    /// Default for `operation` declared on `declared` and returning `returns`.
    ///
    /// An entry whose literal does not fit a primitive return kind, even
    /// after numeric coercion, is skipped in favour of the kind's zero.
    pub fn default_for(
        &self,
        declared: &TypeDescriptor,
        operation: &str,
        returns: &TypeDescriptor,
    ) -> Value {
        let kind = returns.primitive_kind();
        if let Some(value) = self.lookup(declared, operation) {
            match kind {
                None => return value.clone(),
                Some(kind) => {
                    let value = value.clone().coerce_to(kind);
                    if literal_fits(&value, kind) {
                        return value;
                    }
                    warn!(
                        declared = declared.name(),
                        operation,
                        returns = kind.as_str(),
                        literal = value.kind_name(),
                        "default literal does not fit the declared return kind"
                    );
                }
            }
        }

        kind.map(Value::zero).unwrap_or(Value::Absent)
    }

    /// Every (capability, operation, literal) entry.
    pub fn entries(&self) -> impl Iterator<Item = (&Capability, &str, &Value)> {
        self.by_capability.iter().flat_map(|(capability, ops)| {
            ops.iter()
                .map(move |(operation, value)| (capability, operation.as_str(), value))
        })
    }

    /// Number of (capability, operation) entries.
    pub fn len(&self) -> usize {
        self.by_capability.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
