use tokio::sync::oneshot;

use super::WaiterRegistry;
use crate::test_utils::member;
use crate::Error;
use crate::WatchError;

/// # Case 1: A leadership change drains every waiter exactly once
///
/// ## Setup
/// 1. Two waiters registered
///
/// ## Validation criteria
/// 1. Both receive the new leader
/// 2. The registry is empty afterwards, so nothing can resolve twice
#[tokio::test]
async fn test_resolve_all_case1() {
    let mut registry = WaiterRegistry::default();
    let (tx1, rx1) = oneshot::channel();
    let (tx2, rx2) = oneshot::channel();
    registry.register(tx1);
    registry.register(tx2);
    assert_eq!(registry.len(), 2);

    let new_leader = Some(member(5));
    registry.resolve_all(&new_leader);

    assert_eq!(registry.len(), 0);
    assert_eq!(rx1.await.expect("should succeed").expect("should succeed"), Some(member(5)));
    assert_eq!(rx2.await.expect("should succeed").expect("should succeed"), Some(member(5)));

    // A second drain has nothing left to touch.
    registry.resolve_all(&None);
    assert_eq!(registry.len(), 0);
}

/// # Case 2: A watch failure fails every waiter with the error
#[tokio::test]
async fn test_fail_all_case2() {
    let mut registry = WaiterRegistry::default();
    let (tx1, rx1) = oneshot::channel();
    let (tx2, rx2) = oneshot::channel();
    registry.register(tx1);
    registry.register(tx2);

    registry.fail_all(&WatchError::SessionExpired("session expired".to_string()));

    for rx in [rx1, rx2] {
        let outcome = rx.await.expect("should succeed");
        assert!(matches!(outcome, Err(Error::Watch(WatchError::SessionExpired(_)))));
    }
}

/// # Case 3: Teardown cancels waiters, never succeeds or fails them
#[tokio::test]
async fn test_cancel_all_case3() {
    let mut registry = WaiterRegistry::default();
    let (tx, rx) = oneshot::channel();
    registry.register(tx);

    registry.cancel_all();

    let outcome = rx.await.expect("should succeed");
    assert!(matches!(outcome, Err(Error::Canceled)));
}

/// # Case 4: A waiter whose caller gave up does not poison the drain
#[tokio::test]
async fn test_resolve_with_gone_receiver_case4() {
    let mut registry = WaiterRegistry::default();
    let (tx1, rx1) = oneshot::channel();
    let (tx2, _) = oneshot::channel();
    registry.register(tx1);
    registry.register(tx2); // receiver already dropped

    registry.resolve_all(&Some(member(3)));

    assert_eq!(rx1.await.expect("should succeed").expect("should succeed"), Some(member(3)));
    assert_eq!(registry.len(), 0);
}
