// Tests for the debounced search listener.
//
// Time is paused, so the debounce window elapses instantly whenever every
// task is idle.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::{sample_source, user};
use tokio::sync::mpsc;
use userlens::state::search::{spawn_search_listener, DEFAULT_DEBOUNCE};
use userlens::state::service::UserDataService;

#[tokio::test(start_paused = true)]
async fn burst_of_terms_dispatches_only_the_last() {
    let source = Arc::new(sample_source());
    let service = Arc::new(UserDataService::new(source.clone()));
    let (tx, rx) = mpsc::channel(16);
    let handle = spawn_search_listener(service.clone(), rx, DEFAULT_DEBOUNCE);

    for term in ["c", "cl", "cle"] {
        tx.send(term.to_string()).await.unwrap();
    }
    drop(tx);
    handle.await.unwrap();

    assert_eq!(source.user_calls.load(Ordering::SeqCst), 1);
    let view = service.snapshot();
    assert_eq!(view.search_term, "cle");
    assert_eq!(view.users, vec![user(3, "Clementine Bauch")]);
}

#[tokio::test(start_paused = true)]
async fn repeated_term_is_not_dispatched_twice() {
    let source = Arc::new(sample_source());
    let service = Arc::new(UserDataService::new(source.clone()));
    let (tx, rx) = mpsc::channel(16);
    let handle = spawn_search_listener(service.clone(), rx, DEFAULT_DEBOUNCE);

    tx.send("le".to_string()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    tx.send("le".to_string()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    tx.send("er".to_string()).await.unwrap();
    drop(tx);
    handle.await.unwrap();

    assert_eq!(source.user_calls.load(Ordering::SeqCst), 2);
    assert_eq!(service.snapshot().search_term, "er");
}

#[tokio::test(start_paused = true)]
async fn terms_spaced_beyond_debounce_are_each_dispatched() {
    let source = Arc::new(sample_source());
    let service = Arc::new(UserDataService::new(source.clone()));
    let (tx, rx) = mpsc::channel(16);
    let handle = spawn_search_listener(service.clone(), rx, Duration::from_millis(50));

    for term in ["a", "b", "c"] {
        tx.send(term.to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    drop(tx);
    handle.await.unwrap();

    assert_eq!(source.user_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn listener_survives_failed_search() {
    let source = Arc::new(sample_source());
    let service = Arc::new(UserDataService::new(source.clone()));
    let (tx, rx) = mpsc::channel(16);
    let handle = spawn_search_listener(service.clone(), rx, DEFAULT_DEBOUNCE);

    source.fail_users.store(true, Ordering::SeqCst);
    tx.send("le".to_string()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    source.fail_users.store(false, Ordering::SeqCst);
    tx.send("erv".to_string()).await.unwrap();
    drop(tx);
    handle.await.unwrap();

    let view = service.snapshot();
    assert_eq!(view.search_term, "erv");
    assert_eq!(view.users, vec![user(2, "Ervin Howell")]);
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn listener_exits_when_channel_closes_without_terms() {
    let source = Arc::new(sample_source());
    let service = Arc::new(UserDataService::new(source.clone()));
    let (tx, rx) = mpsc::channel::<String>(1);
    let handle = spawn_search_listener(service, rx, DEFAULT_DEBOUNCE);

    drop(tx);
    handle.await.unwrap();

    assert_eq!(source.user_calls.load(Ordering::SeqCst), 0);
}
