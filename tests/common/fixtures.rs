//! Fixture object graph for integration tests.
//!
//! A small banking model: users with a manager and a list of accounts,
//! accounts holding a balance of `Money` (a designated value type), plus a
//! generic `Container<T>` and a plain `Foo` for generic resolution tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::Mutex;
use safe_nav::{
    arg, nav_adapter, FromValue, ListNav, NavList, Navigable, ObjectRef, TypeDescriptor, Value,
};

// =============================================================================
// Descriptors
// =============================================================================

pub fn user_type() -> TypeDescriptor {
    TypeDescriptor::builder("User")
        .operation("login", "String")
        .operation("age", "i32")
        .operation("is_active", "bool")
        .operation("manager", "User")
        .operation("accounts", "List<Account>")
        .operation("set_age", "()")
        .operation("set_accounts", "()")
        .build()
}

pub fn account_type() -> TypeDescriptor {
    TypeDescriptor::builder("Account")
        .operation("id", "i64")
        .operation("balance", "Money")
        .operation("owner", "User")
        .operation("close", "()")
        .operation("credit", "Money")
        .build()
}

pub fn money_type() -> TypeDescriptor {
    TypeDescriptor::builder("Money").operation("cents", "i64").build()
}

pub fn container_type() -> TypeDescriptor {
    TypeDescriptor::builder("Container")
        .type_param("T")
        .operation("get", "T")
        .operation("items", "List<T>")
        .operation("label", "String")
        .build()
}

pub fn foo_type() -> TypeDescriptor {
    TypeDescriptor::builder("Foo")
        .operation("name", "String")
        .operation("rank", "i32")
        .build()
}

// =============================================================================
// Real objects
// =============================================================================

struct UserState {
    age: i32,
    active: bool,
}

pub struct User {
    login: Option<String>,
    state: Mutex<UserState>,
    manager: Option<ObjectRef>,
    accounts: Mutex<Option<ObjectRef>>,
    calls: AtomicUsize,
}

impl User {
    pub fn new(login: &str, age: i32) -> Self {
        Self {
            login: Some(login.to_string()),
            state: Mutex::new(UserState { age, active: true }),
            manager: None,
            accounts: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A user whose login was never set.
    pub fn anonymous(age: i32) -> Self {
        Self {
            login: None,
            ..Self::new("", age)
        }
    }

    pub fn with_manager(mut self, manager: Arc<User>) -> Self {
        self.manager = Some(manager as ObjectRef);
        self
    }

    /// Append to the account list, creating it on first use.
    pub fn with_account(self, account: Arc<Account>) -> Self {
        let list = self
            .accounts
            .lock()
            .get_or_insert_with(|| Arc::new(NavList::new()) as ObjectRef)
            .clone();
        list.call("add", &[Value::Object(account)])
            .expect("a list accepts any element");
        self
    }

    /// Replace the account list. `None` leaves the user without one.
    pub fn set_accounts(&self, accounts: Option<ObjectRef>) {
        *self.accounts.lock() = accounts;
    }

    pub fn age(&self) -> i32 {
        self.state.lock().age
    }

    /// Number of operations delegated to this object so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Navigable for User {
    fn type_name(&self) -> &str {
        "User"
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match operation {
            "login" => Ok(self.login.clone().into()),
            "age" => Ok(Value::I32(self.state.lock().age)),
            "is_active" => Ok(Value::Bool(self.state.lock().active)),
            "manager" => Ok(self.manager.clone().into()),
            "accounts" => Ok(self.accounts.lock().clone().into()),
            "set_age" => {
                self.state.lock().age = i32::from_value(operation, arg(args, 0).clone())?;
                Ok(Value::Unit)
            }
            "set_accounts" => {
                self.set_accounts(arg(args, 0).as_object().cloned());
                Ok(Value::Unit)
            }
            other => bail!("User has no operation `{}`", other),
        }
    }
}

/// Errors raised by [`Account`] itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    NonZeroBalance { id: i64, cents: i64 },
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::NonZeroBalance { id, cents } => {
                write!(f, "account {} still holds {} cents", id, cents)
            }
        }
    }
}

impl std::error::Error for AccountError {}

pub struct Account {
    id: i64,
    cents: Mutex<i64>,
    owner: Option<ObjectRef>,
}

impl Account {
    pub fn new(id: i64, cents: i64) -> Self {
        Self {
            id,
            cents: Mutex::new(cents),
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: Arc<User>) -> Self {
        self.owner = Some(owner as ObjectRef);
        self
    }

    pub fn cents(&self) -> i64 {
        *self.cents.lock()
    }
}

impl Navigable for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value> {
        match operation {
            "id" => Ok(Value::I64(self.id)),
            "balance" => Ok(Value::object(Money::new(self.cents()))),
            "owner" => Ok(self.owner.clone().into()),
            "close" => {
                let cents = self.cents();
                if cents != 0 {
                    return Err(AccountError::NonZeroBalance { id: self.id, cents }.into());
                }
                Ok(Value::Unit)
            }
            "credit" => {
                let amount = i64::from_value(operation, arg(args, 0).clone())?;
                let mut cents = self.cents.lock();
                *cents += amount;
                Ok(Value::object(Money::new(*cents)))
            }
            other => bail!("Account has no operation `{}`", other),
        }
    }
}

/// An amount of money. Designated as a value type, so it is never wrapped.
pub struct Money {
    cents: i64,
}

impl Money {
    pub fn new(cents: i64) -> Self {
        Self { cents }
    }
}

impl Navigable for Money {
    fn type_name(&self) -> &str {
        "Money"
    }

    fn call(&self, operation: &str, _args: &[Value]) -> Result<Value> {
        match operation {
            "cents" => Ok(Value::I64(self.cents)),
            other => bail!("Money has no operation `{}`", other),
        }
    }
}

/// Generic holder: one item plus a list of items, both of type `T`.
pub struct Container {
    item: Option<ObjectRef>,
    items: Arc<NavList>,
    label: String,
}

impl Container {
    pub fn new(label: &str, item: Option<ObjectRef>) -> Self {
        Self {
            item,
            items: Arc::new(NavList::new()),
            label: label.to_string(),
        }
    }

    pub fn with_items<I: IntoIterator<Item = Value>>(mut self, items: I) -> Self {
        self.items = NavList::shared(items);
        self
    }
}

impl Navigable for Container {
    fn type_name(&self) -> &str {
        "Container"
    }

    fn call(&self, operation: &str, _args: &[Value]) -> Result<Value> {
        match operation {
            "get" => Ok(self.item.clone().into()),
            "items" => Ok(Value::Object(self.items.clone())),
            "label" => Ok(Value::Text(self.label.clone())),
            other => bail!("Container has no operation `{}`", other),
        }
    }
}

pub struct Foo {
    name: String,
    rank: i32,
}

impl Foo {
    pub fn new(name: &str, rank: i32) -> Self {
        Self {
            name: name.to_string(),
            rank,
        }
    }
}

impl Navigable for Foo {
    fn type_name(&self) -> &str {
        "Foo"
    }

    fn call(&self, operation: &str, _args: &[Value]) -> Result<Value> {
        match operation {
            "name" => Ok(Value::Text(self.name.clone())),
            "rank" => Ok(Value::I32(self.rank)),
            other => bail!("Foo has no operation `{}`", other),
        }
    }
}

// =============================================================================
// Typed adapters
// =============================================================================

nav_adapter! {
    pub struct UserNav(descriptor = user_type());
    fn login() -> Option<String> = "login";
    fn age() -> i32 = "age";
    fn is_active() -> bool = "is_active";
    fn manager() -> UserNav = "manager";
    fn accounts() -> ListNav = "accounts";
    fn set_age(age: i32) -> () = "set_age";
    /// A list object, or `Value::Absent` to clear.
    fn set_accounts(accounts: Value) -> () = "set_accounts";
}

nav_adapter! {
    pub struct AccountNav(descriptor = account_type());
    fn id() -> i64 = "id";
    /// `Money` is a value type: the real object, or absent.
    fn balance() -> Value = "balance";
    fn owner() -> UserNav = "owner";
    fn close() -> () = "close";
    fn credit(cents: i64) -> Value = "credit";
}
