//! Wrappers and engines shared across threads.

mod common;

use std::sync::Arc;
use std::thread;

use common::*;
use safe_nav::{ListNav, NavList, Value, Wrapper};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_wrapper_is_send_and_sync() {
    assert_send_sync::<Wrapper>();
    assert_send_sync::<UserNav>();
    assert_send_sync::<safe_nav::DispatchEngine>();
}

#[test]
fn test_shared_wrapper_sees_concurrent_mutation() {
    let engine = engine();
    let user = sample_user();
    let adapter: UserNav = engine.adapt(user.clone()).unwrap();

    thread::scope(|s| {
        for age in 40..48 {
            let adapter = adapter.clone();
            s.spawn(move || {
                adapter.set_age(age).unwrap();
                let seen = adapter.age().unwrap();
                assert!((40..48).contains(&seen));
            });
        }
    });

    assert!((40..48).contains(&user.age()));
    assert_eq!(adapter.age().unwrap(), user.age());
}

#[test]
fn test_concurrent_list_appends_through_wrappers() {
    let engine = engine();
    let list = Arc::new(NavList::new());
    let wrapper = engine.wrap_shape("List<i32>", Some(list.clone())).unwrap();
    let items: ListNav = safe_nav::NavAdapter::from_wrapper(wrapper);

    thread::scope(|s| {
        for worker in 0..4 {
            let items = items.clone();
            s.spawn(move || {
                for i in 0..25 {
                    assert!(items.add(Value::I32(worker * 100 + i)).unwrap());
                }
            });
        }
    });

    assert_eq!(list.len(), 100);
    assert_eq!(items.size().unwrap(), 100);
    assert!(items.contains(Value::I32(324)).unwrap());
}

#[test]
fn test_absent_navigation_from_many_threads() {
    let engine = engine();

    thread::scope(|s| {
        for _ in 0..8 {
            let engine = engine.clone();
            s.spawn(move || {
                let user: UserNav = engine.wrap_as(None);
                for _ in 0..50 {
                    let accounts = user.manager().unwrap().accounts().unwrap();
                    assert!(accounts.is_empty().unwrap());
                    assert_eq!(accounts.index_of(Value::I32(0)).unwrap(), -1);
                }
            });
        }
    });
}
