//! Engine error types.
//!
//! Every variant signals a setup defect (incomplete catalog, missing
//! bindings, a real object that contradicts its descriptor). None of them is
//! produced because a value was absent: absence is absorbed by defaults.
//!
//! Errors raised by a real object during delegation are not represented
//! here. They travel through the engine untouched, as the same
//! `anyhow::Error`.

/// Structured errors raised by the resolver and the dispatch engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// A return shape refers to a generic parameter the wrapper has no
    /// binding for.
    UnresolvedGenericParameter {
        /// Name of the formal parameter
        parameter: String,
        /// Parameters the wrapper does have bindings for
        bound: Vec<String>,
    },

    /// A return shape is neither a concrete type, a parameterized type, nor
    /// a recognised parameter reference, or it names an unregistered type.
    UnsupportedReturnShape {
        /// The shape as declared
        shape: String,
        /// Why it could not be resolved
        reason: String,
    },

    /// A parameterized shape supplies the wrong number of type arguments.
    GenericArityMismatch {
        base: String,
        expected: usize,
        got: usize,
    },

    /// The declared type has no operation with this name.
    UnknownOperation { type_name: String, operation: String },

    /// A real object reports a runtime type missing from the catalog.
    UnregisteredType { name: String },

    /// A value's kind contradicts the declared return type.
    UnexpectedValue {
        operation: String,
        expected: String,
        found: String,
    },
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::UnresolvedGenericParameter { parameter, bound } => {
                write!(f, "unresolved generic parameter `{}`", parameter)?;
                if bound.is_empty() {
                    write!(f, " (wrapper has no generic bindings)")
                } else {
                    write!(f, " (bound: {})", bound.join(", "))
                }
            }
            NavError::UnsupportedReturnShape { shape, reason } => {
                write!(f, "unsupported return shape `{}`: {}", shape, reason)
            }
            NavError::GenericArityMismatch {
                base,
                expected,
                got,
            } => write!(
                f,
                "type `{}` expects {} type arguments, got {}",
                base, expected, got
            ),
            NavError::UnknownOperation {
                type_name,
                operation,
            } => write!(f, "type `{}` declares no operation `{}`", type_name, operation),
            NavError::UnregisteredType { name } => {
                write!(f, "type `{}` is not registered in the catalog", name)
            }
            NavError::UnexpectedValue {
                operation,
                expected,
                found,
            } => write!(
                f,
                "operation `{}` returned {} where {} was declared",
                operation, found, expected
            ),
        }
    }
}

impl std::error::Error for NavError {}
