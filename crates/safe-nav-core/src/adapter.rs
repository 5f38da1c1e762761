//! Typed adapters over [`Wrapper`].
//!
//! A wrapper speaks [`Value`]. An adapter gives it the method surface of the
//! navigable type it stands in for, so callers write
//! `user.manager()?.login()?` instead of string-keyed `invoke` calls.
//! Adapters are declared with [`nav_adapter!`](crate::nav_adapter); results
//! are converted with [`FromValue`].

use anyhow::Result;
use safe_nav_types::TypeDescriptor;

use crate::errors::NavError;
use crate::value::Value;
use crate::wrapper::Wrapper;

/// A typed view of a [`Wrapper`].
pub trait NavAdapter: Sized {
    /// Declared type of the wrapped value.
    fn descriptor() -> TypeDescriptor;

    fn from_wrapper(wrapper: Wrapper) -> Self;

    fn wrapper(&self) -> &Wrapper;
}

/// Conversion of an operation result into a Rust type.
///
/// `operation` only feeds the error message.
pub trait FromValue: Sized {
    fn from_value(operation: &str, value: Value) -> Result<Self>;
}

fn unexpected(operation: &str, expected: &str, found: &Value) -> anyhow::Error {
    NavError::UnexpectedValue {
        operation: operation.to_string(),
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
    .into()
}

impl FromValue for Value {
    fn from_value(_operation: &str, value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for () {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::Unit | Value::Absent => Ok(()),
            other => Err(unexpected(operation, "()", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| unexpected(operation, "bool", &value))
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(operation: &str, value: Value) -> Result<Self> {
                    value
                        .as_i64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| unexpected(operation, stringify!($ty), &value))
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64);

impl FromValue for f64 {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| unexpected(operation, "f64", &value))
    }
}

impl FromValue for f32 {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::F32(x) => Ok(x),
            other => f64::from_value(operation, other).map(|x| x as f32),
        }
    }
}

impl FromValue for String {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(unexpected(operation, "String", &other)),
        }
    }
}

impl FromValue for char {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(unexpected(operation, "char", &other)),
        }
    }
}

impl FromValue for Wrapper {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::Nav(wrapper) => Ok(wrapper),
            other => Err(unexpected(operation, "wrapper", &other)),
        }
    }
}

/// The absence marker reads as `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(operation: &str, value: Value) -> Result<Self> {
        match value {
            Value::Absent => Ok(None),
            other => T::from_value(operation, other).map(Some),
        }
    }
}

/// Declare a typed adapter.
///
/// Each method forwards its arguments to the named operation and converts
/// the result with [`FromValue`]. Object-returning methods name another
/// adapter (or [`Wrapper`]) as their return type.
///
/// ```
/// use safe_nav_core::{nav_adapter, DispatchEngine, NavAdapter};
/// use safe_nav_core::well_known::list_type;
///
/// nav_adapter! {
///     /// Untyped list view.
///     pub struct Items(descriptor = list_type());
///     fn size() -> i32 = "size";
///     fn index_of(value: i32) -> i32 = "index_of";
/// }
///
/// let engine = DispatchEngine::builder().build();
/// let items: Items = engine.wrap_as(None);
/// assert_eq!(items.size()?, 0);
/// assert_eq!(items.index_of(7)?, -1);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[macro_export]
macro_rules! nav_adapter {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(descriptor = $desc:expr);
        $(
            $(#[$fmeta:meta])*
            fn $method:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty = $op:literal;
        )*
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name($crate::Wrapper);

        impl $name {
            $(
                $(#[$fmeta])*
                pub fn $method(&self $(, $arg: $ty)*) -> $crate::__private::anyhow::Result<$ret> {
                    let args: $crate::__private::smallvec::SmallVec<[$crate::Value; 4]> =
                        $crate::__private::smallvec::smallvec![$($crate::Value::from($arg)),*];
                    self.0.call::<$ret>($op, &args)
                }
            )*
        }

        impl $crate::NavAdapter for $name {
            fn descriptor() -> $crate::__private::TypeDescriptor {
                $desc
            }

            fn from_wrapper(wrapper: $crate::Wrapper) -> Self {
                Self(wrapper)
            }

            fn wrapper(&self) -> &$crate::Wrapper {
                &self.0
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                operation: &str,
                value: $crate::Value,
            ) -> $crate::__private::anyhow::Result<Self> {
                <$crate::Wrapper as $crate::FromValue>::from_value(operation, value).map(Self)
            }
        }
    };
}
