//! Dynamic values crossing the interception boundary.
//!
//! Every operation invoked through a [`Wrapper`] takes and returns
//! [`Value`]s. Real objects plug in by implementing [`Navigable`].

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use safe_nav_types::PrimitiveKind;

use crate::wrapper::Wrapper;

/// Shared handle to a real object.
pub type ObjectRef = Arc<dyn Navigable>;

/// A real object the engine can delegate to.
///
/// Implementations own their interior mutability: the engine adds no
/// locking, so `call` must be safe to run from several threads if the object
/// is shared across threads.
pub trait Navigable: Send + Sync {
    /// Runtime type name, looked up in the catalog when a wrapper infers its
    /// declared type from the value.
    fn type_name(&self) -> &str;

    /// Perform `operation` with `args`. Errors are handed back to the
    /// wrapper's caller unchanged.
    fn call(&self, operation: &str, args: &[Value]) -> Result<Value>;
}

/// Runtime representation of a value passed to or returned from an
/// operation.
#[derive(Clone, Default)]
pub enum Value {
    /// The value-absence marker.
    #[default]
    Absent,
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    /// A real object.
    Object(ObjectRef),
    /// A wrapper produced by the engine.
    Nav(Wrapper),
}

static ABSENT: Value = Value::Absent;

/// Positional argument access for [`Navigable`] implementations. Missing
/// arguments read as [`Value::Absent`].
pub fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&ABSENT)
}

impl Value {
    /// Wrap a real object into a value.
    pub fn object<N: Navigable + 'static>(object: N) -> Self {
        Value::Object(Arc::new(object))
    }

    /// The safe default for a primitive kind: `false`, numeric zero or unit.
    /// Text and char have no zero value and yield the absence marker.
    pub fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Unit => Value::Unit,
            PrimitiveKind::Bool => Value::Bool(false),
            PrimitiveKind::I8 => Value::I8(0),
            PrimitiveKind::I16 => Value::I16(0),
            PrimitiveKind::I32 => Value::I32(0),
            PrimitiveKind::I64 => Value::I64(0),
            PrimitiveKind::F32 => Value::F32(0.0),
            PrimitiveKind::F64 => Value::F64(0.0),
            PrimitiveKind::Char | PrimitiveKind::Text => Value::Absent,
        }
    }

    /// Convert a numeric literal to another numeric kind, so a policy entry
    /// written as `-1` fits an operation declared to return `i64`.
    /// Values that do not convert are returned unchanged.
    pub fn coerce_to(self, kind: PrimitiveKind) -> Self {
        if kind.is_integer() {
            if let Some(n) = self.as_i64() {
                return match kind {
                    PrimitiveKind::I8 => i8::try_from(n).map(Value::I8).unwrap_or(self),
                    PrimitiveKind::I16 => i16::try_from(n).map(Value::I16).unwrap_or(self),
                    PrimitiveKind::I32 => i32::try_from(n).map(Value::I32).unwrap_or(self),
                    _ => Value::I64(n),
                };
            }
        } else if kind.is_float() {
            if let Some(x) = self.as_f64() {
                return match kind {
                    PrimitiveKind::F32 => Value::F32(x as f32),
                    _ => Value::F64(x),
                };
            }
        }
        self
    }

    /// Primitive kind of this value, if it is one.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Value::Unit => Some(PrimitiveKind::Unit),
            Value::Bool(_) => Some(PrimitiveKind::Bool),
            Value::I8(_) => Some(PrimitiveKind::I8),
            Value::I16(_) => Some(PrimitiveKind::I16),
            Value::I32(_) => Some(PrimitiveKind::I32),
            Value::I64(_) => Some(PrimitiveKind::I64),
            Value::F32(_) => Some(PrimitiveKind::F32),
            Value::F64(_) => Some(PrimitiveKind::F64),
            Value::Char(_) => Some(PrimitiveKind::Char),
            Value::Text(_) => Some(PrimitiveKind::Text),
            Value::Absent | Value::Object(_) | Value::Nav(_) => None,
        }
    }

    /// Short description of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Object(_) => "object",
            Value::Nav(_) => "wrapper",
            other => other.primitive_kind().map(PrimitiveKind::as_str).unwrap_or("value"),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integer value, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(n) => Some(i64::from(*n)),
            Value::I16(n) => Some(i64::from(*n)),
            Value::I32(n) => Some(i64::from(*n)),
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric value, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(x) => Some(f64::from(*x)),
            Value::F64(x) => Some(*x),
            other => other.as_i64().map(|n| n as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_nav(&self) -> Option<&Wrapper> {
        match self {
            Value::Nav(w) => Some(w),
            _ => None,
        }
    }
}

/// Primitive values compare by value, objects by identity. Wrappers never
/// compare equal, since their content is not observable.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) | (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Unit => f.write_str("Unit"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::I8(n) => write!(f, "I8({})", n),
            Value::I16(n) => write!(f, "I16({})", n),
            Value::I32(n) => write!(f, "I32({})", n),
            Value::I64(n) => write!(f, "I64({})", n),
            Value::F32(x) => write!(f, "F32({})", x),
            Value::F64(x) => write!(f, "F64({})", x),
            Value::Char(c) => write!(f, "Char({:?})", c),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
            Value::Nav(w) => write!(f, "Nav({:?})", w),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Text,
    ObjectRef => Object,
    Wrapper => Nav,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Absent)
    }
}
