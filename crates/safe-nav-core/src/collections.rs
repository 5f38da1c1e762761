//! Built-in navigable containers.
//!
//! `List<E>` is sequence-like and `Map<K, V>` is mapping-like, so absent
//! instances of either answer from the capability defaults (`is_empty` is
//! `true`, `index_of` is `-1`). [`NavList`] and [`NavMap`] are the real
//! objects behind them; [`ListNav`] and [`MapNav`] are their typed adapters.

use std::sync::{Arc, LazyLock};

use anyhow::{bail, Result};
use parking_lot::RwLock;
use safe_nav_types::{Capability, TypeDescriptor};

use crate::value::{arg, Navigable, Value};

pub const LIST_TYPE_NAME: &str = "List";
pub const MAP_TYPE_NAME: &str = "Map";

static LIST_TYPE: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::builder(LIST_TYPE_NAME)
        .type_param("E")
        .capability(Capability::SEQUENCE)
        .operation("size", "i32")
        .operation("is_empty", "bool")
        .operation("get", "E")
        .operation("first", "E")
        .operation("add", "bool")
        .operation("set", "E")
        .operation("remove", "E")
        .operation("index_of", "i32")
        .operation("last_index_of", "i32")
        .operation("contains", "bool")
        .operation("clear", "()")
        .build()
});

static MAP_TYPE: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::builder(MAP_TYPE_NAME)
        .type_params(["K", "V"])
        .capability(Capability::MAPPING)
        .operation("size", "i32")
        .operation("is_empty", "bool")
        .operation("get", "V")
        .operation("put", "V")
        .operation("contains_key", "bool")
        .operation("remove", "V")
        .operation("keys", "List<K>")
        .operation("values", "List<V>")
        .operation("clear", "()")
        .build()
});

/// Descriptor of `List<E>`.
pub fn list_type() -> TypeDescriptor {
    LIST_TYPE.clone()
}

/// Descriptor of `Map<K, V>`.
pub fn map_type() -> TypeDescriptor {
    MAP_TYPE.clone()
}

fn index(args: &[Value], len: usize) -> Result<usize> {
    let raw = arg(args, 0);
    let Some(n) = raw.as_i64() else {
        bail!("list index must be an integer, got {}", raw.kind_name());
    };
    match usize::try_from(n) {
        Ok(i) if i < len => Ok(i),
        _ => bail!("index {} out of bounds for length {}", n, len),
    }
}

fn len_value(len: usize) -> Value {
    Value::I32(i32::try_from(len).unwrap_or(i32::MAX))
}

fn position_value(position: Option<usize>) -> Value {
    position.map(len_value).unwrap_or(Value::I32(-1))
}

// =============================================================================
// NavList
// =============================================================================

/// A growable list of values, safe to share across threads.
#[derive(Debug, Default)]
pub struct NavList {
    items: RwLock<Vec<Value>>,
}

impl NavList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self {
            items: RwLock::new(values.into_iter().collect()),
        }
    }

    /// Convenience for `Arc::new(NavList::from_values(..))`.
    pub fn shared<I: IntoIterator<Item = Value>>(values: I) -> Arc<Self> {
        Arc::new(Self::from_values(values))
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn push(&self, value: Value) {
        self.items.write().push(value);
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Value> {
        self.items.read().clone()
    }
}

impl Navigable for NavList {
    fn type_name(&self) -> &str {
        LIST_TYPE_NAME
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value> {
        match operation {
            "size" => Ok(len_value(self.len())),
            "is_empty" => Ok(Value::Bool(self.is_empty())),
            "get" => {
                let items = self.items.read();
                let i = index(args, items.len())?;
                Ok(items[i].clone())
            }
            "first" => Ok(self.items.read().first().cloned().unwrap_or(Value::Absent)),
            "add" => {
                self.push(arg(args, 0).clone());
                Ok(Value::Bool(true))
            }
            "set" => {
                let mut items = self.items.write();
                let i = index(args, items.len())?;
                Ok(std::mem::replace(&mut items[i], arg(args, 1).clone()))
            }
            "remove" => {
                let mut items = self.items.write();
                let i = index(args, items.len())?;
                Ok(items.remove(i))
            }
            "index_of" => {
                let needle = arg(args, 0);
                Ok(position_value(self.items.read().iter().position(|v| v == needle)))
            }
            "last_index_of" => {
                let needle = arg(args, 0);
                Ok(position_value(self.items.read().iter().rposition(|v| v == needle)))
            }
            "contains" => {
                let needle = arg(args, 0);
                Ok(Value::Bool(self.items.read().iter().any(|v| v == needle)))
            }
            "clear" => {
                self.items.write().clear();
                Ok(Value::Unit)
            }
            other => bail!("List has no operation `{}`", other),
        }
    }
}

// =============================================================================
// NavMap
// =============================================================================

/// An insertion-ordered map of values. Keys compare with [`Value`] equality.
#[derive(Debug, Default)]
pub struct NavMap {
    entries: RwLock<Vec<(Value, Value)>>,
}

impl NavMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        let map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Insert or replace, returning the previous value or the absence marker.
    pub fn insert(&self, key: Value, value: Value) -> Value {
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => std::mem::replace(slot, value),
            None => {
                entries.push((key, value));
                Value::Absent
            }
        }
    }

    pub fn get(&self, key: &Value) -> Value {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Absent)
    }
}

impl Navigable for NavMap {
    fn type_name(&self) -> &str {
        MAP_TYPE_NAME
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value> {
        match operation {
            "size" => Ok(len_value(self.len())),
            "is_empty" => Ok(Value::Bool(self.is_empty())),
            "get" => Ok(self.get(arg(args, 0))),
            "put" => Ok(self.insert(arg(args, 0).clone(), arg(args, 1).clone())),
            "contains_key" => {
                let key = arg(args, 0);
                Ok(Value::Bool(self.entries.read().iter().any(|(k, _)| k == key)))
            }
            "remove" => {
                let key = arg(args, 0);
                let mut entries = self.entries.write();
                Ok(match entries.iter().position(|(k, _)| k == key) {
                    Some(i) => entries.remove(i).1,
                    None => Value::Absent,
                })
            }
            "keys" => {
                let keys = self.entries.read().iter().map(|(k, _)| k.clone()).collect::<Vec<_>>();
                Ok(Value::Object(NavList::shared(keys)))
            }
            "values" => {
                let values = self.entries.read().iter().map(|(_, v)| v.clone()).collect::<Vec<_>>();
                Ok(Value::Object(NavList::shared(values)))
            }
            "clear" => {
                self.entries.write().clear();
                Ok(Value::Unit)
            }
            other => bail!("Map has no operation `{}`", other),
        }
    }
}

// =============================================================================
// Typed adapters
// =============================================================================

crate::nav_adapter! {
    /// Typed view of a `List<E>` wrapper. Element results stay dynamic.
    pub struct ListNav(descriptor = list_type());
    fn size() -> i32 = "size";
    fn is_empty() -> bool = "is_empty";
    fn get(index: i32) -> Value = "get";
    fn first() -> Value = "first";
    fn add(value: Value) -> bool = "add";
    fn remove(index: i32) -> Value = "remove";
    fn index_of(value: Value) -> i32 = "index_of";
    fn last_index_of(value: Value) -> i32 = "last_index_of";
    fn contains(value: Value) -> bool = "contains";
    fn clear() -> () = "clear";
}

crate::nav_adapter! {
    /// Typed view of a `Map<K, V>` wrapper.
    pub struct MapNav(descriptor = map_type());
    fn size() -> i32 = "size";
    fn is_empty() -> bool = "is_empty";
    fn get(key: Value) -> Value = "get";
    fn put(key: Value, value: Value) -> Value = "put";
    fn contains_key(key: Value) -> bool = "contains_key";
    fn keys() -> ListNav = "keys";
    fn values() -> ListNav = "values";
}
