//! High-level test setup helpers.

use std::sync::Arc;

use safe_nav::{DispatchEngine, DispatchEngineBuilder, ObjectRef};

use super::fixtures::{
    account_type, container_type, foo_type, money_type, user_type, Account, User,
};

/// Builder with every fixture type registered and `Money` designated as a
/// value type.
pub fn engine_builder() -> DispatchEngineBuilder {
    DispatchEngine::builder()
        .register_all([
            user_type(),
            account_type(),
            money_type(),
            container_type(),
            foo_type(),
        ])
        .value_type("Money")
}

pub fn engine() -> Arc<DispatchEngine> {
    engine_builder().build()
}

/// `ada` (36) managed by `grace` (52), holding accounts 1 (250 cents) and
/// 2 (0 cents).
pub fn sample_user() -> Arc<User> {
    let grace = Arc::new(User::new("grace", 52));
    Arc::new(
        User::new("ada", 36)
            .with_manager(grace)
            .with_account(Arc::new(Account::new(1, 250)))
            .with_account(Arc::new(Account::new(2, 0))),
    )
}

pub fn as_object<T: safe_nav::Navigable + 'static>(value: Arc<T>) -> ObjectRef {
    value
}
