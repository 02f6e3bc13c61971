use std::thread::sleep;
use std::time::Duration;

use tableside::auth::{Principal, SessionStore};
use tableside::models::user::Role;

#[test]
fn tokens_resolve_until_destroyed() {
    let store = SessionStore::new(Duration::from_secs(60));
    let token = store.create(7, Role::Customer);

    assert_eq!(
        store.resolve(&token),
        Some(Principal {
            user_id: 7,
            role: Role::Customer
        })
    );
    assert_eq!(store.resolve("some-other-token"), None);

    store.destroy(&token);
    assert_eq!(store.resolve(&token), None);
    // Destroying again is a no-op.
    store.destroy(&token);
}

#[test]
fn expired_tokens_behave_like_unknown_ones() {
    let store = SessionStore::new(Duration::from_millis(20));
    let token = store.create(3, Role::Restaurant);
    assert!(store.resolve(&token).is_some());

    sleep(Duration::from_millis(30));
    assert_eq!(store.resolve(&token), None);
    // Lazy expiry already dropped the entry, so the sweep finds nothing.
    assert_eq!(store.purge_expired(), 0);
}

#[test]
fn purge_drops_only_expired_entries() {
    let store = SessionStore::new(Duration::from_millis(20));
    let short_lived = store.create(1, Role::Customer);

    sleep(Duration::from_millis(30));
    let store_long = SessionStore::new(Duration::from_secs(60));
    let long_lived = store_long.create(2, Role::Customer);

    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.resolve(&short_lived), None);
    assert_eq!(store_long.purge_expired(), 0);
    assert!(store_long.resolve(&long_lived).is_some());
}

#[test]
fn sessions_are_independent_per_token() {
    let store = SessionStore::new(Duration::from_secs(60));
    let customer = store.create(1, Role::Customer);
    let restaurant = store.create(2, Role::Restaurant);

    let p1 = store.resolve(&customer).expect("customer session");
    let p2 = store.resolve(&restaurant).expect("restaurant session");
    assert_ne!(customer, restaurant);
    assert_eq!(p1.role, Role::Customer);
    assert_eq!(p2.role, Role::Restaurant);

    store.destroy(&customer);
    assert!(store.resolve(&restaurant).is_some());
}
