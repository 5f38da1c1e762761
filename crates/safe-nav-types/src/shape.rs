//! Declared return shapes.
//!
//! A [`TypeShape`] is what an operation declares it returns, before any
//! generic bindings are applied. Shapes name types instead of holding
//! descriptors so that recursive type graphs (a `User` returning a list of
//! `Account`s, each returning its owning `User`) can be described with
//! immutable descriptors.
//!
//! Supported forms:
//! - Concrete types: `Account`, `i32`, `String`, `demo::User`
//! - Parameterized types: `List<Account>`, `Map<String, List<T>>`
//! - Bare references to a formal parameter of the declaring type: `T`
//!
//! Anything else is kept as [`TypeShape::Opaque`] and rejected when resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared return shape of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// A concrete, non-parameterized type.
    Named(String),
    /// A generic type applied to arguments.
    Parameterized { base: String, args: Vec<TypeShape> },
    /// A bare reference to a formal parameter of the declaring type.
    Param(String),
    /// Text the parser could not classify.
    Opaque(String),
}

impl TypeShape {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    pub fn parameterized(base: impl Into<String>, args: Vec<TypeShape>) -> Self {
        Self::Parameterized {
            base: base.into(),
            args,
        }
    }

    /// Parse a shape string.
    ///
    /// `type_params` are the formal parameters of the declaring type: a bare
    /// name found there becomes [`TypeShape::Param`].
    ///
    /// # Examples
    ///
    /// ```
    /// use safe_nav_types::TypeShape;
    ///
    /// let params = vec!["T".to_string()];
    /// assert_eq!(TypeShape::parse("T", &params), TypeShape::param("T"));
    /// assert_eq!(
    ///     TypeShape::parse("List<T>", &params),
    ///     TypeShape::parameterized("List", vec![TypeShape::param("T")])
    /// );
    /// assert!(matches!(TypeShape::parse("[T]", &params), TypeShape::Opaque(_)));
    /// ```
    pub fn parse(text: &str, type_params: &[String]) -> Self {
        parse_shape(text.trim(), type_params).unwrap_or_else(|| Self::Opaque(text.trim().to_string()))
    }

    /// Whether the shape mentions a formal parameter anywhere.
    pub fn mentions_param(&self) -> bool {
        match self {
            Self::Param(_) => true,
            Self::Parameterized { args, .. } => args.iter().any(Self::mentions_param),
            Self::Named(_) | Self::Opaque(_) => false,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) | Self::Param(name) | Self::Opaque(name) => f.write_str(name),
            Self::Parameterized { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
        }
    }
}

fn parse_shape(text: &str, type_params: &[String]) -> Option<TypeShape> {
    if text == "()" {
        return Some(TypeShape::Named(text.to_string()));
    }

    // Handle parameterized types: <base><args>
    if let Some(angle_pos) = text.find('<') {
        let base = text[..angle_pos].trim();
        let inner = text[angle_pos..].strip_prefix('<')?.strip_suffix('>')?;

        // A formal parameter cannot itself be applied to arguments
        if !is_type_name(base) || type_params.iter().any(|p| p == base) {
            return None;
        }
        if !balanced(inner) {
            return None;
        }

        let parts = split_type_params(inner);
        if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        let args = parts
            .into_iter()
            .map(|part| parse_shape(part, type_params))
            .collect::<Option<Vec<_>>>()?;

        return Some(TypeShape::Parameterized {
            base: base.to_string(),
            args,
        });
    }

    if !is_type_name(text) {
        return None;
    }

    if type_params.iter().any(|p| p == text) {
        Some(TypeShape::Param(text.to_string()))
    } else {
        Some(TypeShape::Named(text.to_string()))
    }
}

/// Identifiers, optionally qualified with `::` segments.
fn is_type_name(s: &str) -> bool {
    !s.is_empty()
        && s.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

fn balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"] by tracking bracket depth.
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        result.push(s[start..].trim());
    } else if start > 0 {
        // Trailing comma leaves an empty last argument
        result.push("");
    }

    result
}
