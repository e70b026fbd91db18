//! Lifecycle scenarios for the promise tracker.
//!
//! Promises are driven by hand through `oneshot` channels and time is paused,
//! so every ordering below is deterministic.

use promised::core::Phase;
use promised::tracker::PromiseTracker;
use promised::view::{select_view, View};
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Clone, Debug, PartialEq)]
struct Failure {
    message: String,
}

impl Failure {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

type Settle = oneshot::Sender<Result<String, Failure>>;

fn fake_promise() -> (impl Future<Output = Result<String, Failure>> + Send + 'static, Settle) {
    let (tx, rx) = oneshot::channel();
    let promise = async move {
        rx.await
            .unwrap_or_else(|_| Err(Failure::new("settler dropped")))
    };
    (promise, tx)
}

fn tracker(delay_ms: u64) -> PromiseTracker<String, Failure> {
    PromiseTracker::builder()
        .pending_delay(Duration::from_millis(delay_ms))
        .build()
        .unwrap()
}

async fn flush() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn positive_delay_starts_suppressed_then_elapses() {
    let tracker = tracker(50);
    let (promise, _settle) = fake_promise();

    tracker.track(promise);
    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(!snapshot.is_delay_over);

    tokio::time::advance(Duration::from_millis(49)).await;
    flush().await;
    assert!(!tracker.snapshot().is_delay_over);

    tokio::time::advance(Duration::from_millis(1)).await;
    flush().await;
    let snapshot = tracker.snapshot();
    assert!(snapshot.is_delay_over);
    assert!(snapshot.is_pending);
}

#[tokio::test(start_paused = true)]
async fn zero_delay_is_over_immediately() {
    let tracker = tracker(0);
    let (promise, _settle) = fake_promise();

    tracker.track(promise);
    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.is_delay_over);
    assert!(!tracker.is_delay_scheduled());
}

#[tokio::test(start_paused = true)]
async fn resolve_sets_data() {
    let tracker = tracker(0);
    let (promise, settle) = fake_promise();

    tracker.track(promise);
    settle.send(Ok("foo".to_string())).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(!snapshot.is_pending);
    assert!(snapshot.is_delay_over);
    assert_eq!(snapshot.data.as_deref(), Some("foo"));
    assert!(snapshot.error.is_none());
    assert_eq!(select_view(&snapshot), View::Resolved(Some(&"foo".to_string())));
}

#[tokio::test(start_paused = true)]
async fn reject_sets_error_and_keeps_data() {
    let tracker = tracker(0);

    let (first, settle_first) = fake_promise();
    tracker.track(first);
    settle_first.send(Ok("foo".to_string())).unwrap();
    flush().await;

    let (second, settle_second) = fake_promise();
    tracker.track(second);
    settle_second.send(Err(Failure::new("hello"))).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(!snapshot.is_pending);
    assert_eq!(snapshot.error.as_ref().map(|e| e.message.as_str()), Some("hello"));
    assert_eq!(snapshot.data.as_deref(), Some("foo"));
    assert_eq!(tracker.phase(), Phase::Rejected);
}

#[tokio::test(start_paused = true)]
async fn stale_resolution_is_ignored() {
    let tracker = tracker(1);
    let (first, settle_first) = fake_promise();
    let (second, _settle_second) = fake_promise();

    tracker.track(first);
    tracker.track(second);
    settle_first.send(Ok("foo".to_string())).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.data.is_none());
    assert!(snapshot.error.is_none());
    assert_eq!(tracker.phase(), Phase::Pending);

    tokio::time::advance(Duration::from_millis(1)).await;
    flush().await;
    assert_eq!(select_view(&tracker.snapshot()), View::Pending(None));
}

#[tokio::test(start_paused = true)]
async fn stale_rejection_is_ignored() {
    let tracker = tracker(0);
    let (first, settle_first) = fake_promise();
    let (second, _settle_second) = fake_promise();

    tracker.track(first);
    tracker.track(second);
    settle_first.send(Err(Failure::new("failed"))).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn settlement_after_clear_is_ignored() {
    let tracker = tracker(0);
    let (promise, settle) = fake_promise();

    tracker.track(promise);
    tracker.clear();
    settle.send(Ok("late".to_string())).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.data.is_none());
    assert_eq!(tracker.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn clear_resets_and_cancels_timer() {
    let tracker = tracker(10);

    let (first, settle) = fake_promise();
    tracker.track(first);
    settle.send(Ok("foo".to_string())).unwrap();
    flush().await;
    assert_eq!(tracker.snapshot().data.as_deref(), Some("foo"));

    let (second, _settle_second) = fake_promise();
    tracker.track(second);
    assert!(tracker.is_delay_scheduled());

    tracker.clear();
    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.data.is_none());
    assert!(snapshot.error.is_none());
    assert!(!snapshot.is_delay_over);
    assert!(!tracker.is_delay_scheduled());

    tokio::time::advance(Duration::from_millis(100)).await;
    flush().await;
    assert!(!tracker.snapshot().is_delay_over);
}

#[tokio::test(start_paused = true)]
async fn only_latest_timer_fires() {
    let tracker = tracker(10);
    let mut updates = tracker.subscribe();

    let (first, _a) = fake_promise();
    tracker.track(first);
    tokio::time::advance(Duration::from_millis(6)).await;
    flush().await;

    let (second, _b) = fake_promise();
    tracker.track(second);
    updates.borrow_and_update();

    // The first timer would have fired at 10ms.
    tokio::time::advance(Duration::from_millis(6)).await;
    flush().await;
    assert!(!tracker.snapshot().is_delay_over);
    assert!(!updates.has_changed().unwrap());

    tokio::time::advance(Duration::from_millis(4)).await;
    flush().await;
    assert!(tracker.snapshot().is_delay_over);
}

#[tokio::test(start_paused = true)]
async fn data_is_kept_between_promises() {
    let tracker = tracker(0);

    let (first, settle_first) = fake_promise();
    tracker.track(first);
    settle_first.send(Ok("foo".to_string())).unwrap();
    flush().await;

    let (second, settle_second) = fake_promise();
    tracker.track(second);
    let snapshot = tracker.snapshot();
    assert!(snapshot.is_pending);
    assert!(snapshot.is_delay_over);
    assert_eq!(snapshot.data.as_deref(), Some("foo"));
    assert_eq!(select_view(&snapshot), View::Pending(Some(&"foo".to_string())));

    settle_second.send(Ok("bar".to_string())).unwrap();
    flush().await;
    let snapshot = tracker.snapshot();
    assert!(!snapshot.is_pending);
    assert_eq!(snapshot.data.as_deref(), Some("bar"));
}

#[tokio::test(start_paused = true)]
async fn delay_update_applies_to_next_promise_only() {
    let tracker = tracker(10);

    let (first, _a) = fake_promise();
    tracker.track(first);
    tracker.set_pending_delay(Duration::ZERO);
    assert_eq!(tracker.pending_delay(), Duration::ZERO);
    assert!(!tracker.snapshot().is_delay_over);

    tokio::time::advance(Duration::from_millis(10)).await;
    flush().await;
    assert!(tracker.snapshot().is_delay_over);

    let (second, _b) = fake_promise();
    tracker.track(second);
    assert!(tracker.snapshot().is_delay_over);
}

#[tokio::test(start_paused = true)]
async fn delay_timer_fires_after_settlement() {
    let tracker = tracker(20);
    let (promise, settle) = fake_promise();

    tracker.track(promise);
    settle.send(Ok("quick".to_string())).unwrap();
    flush().await;

    let snapshot = tracker.snapshot();
    assert!(!snapshot.is_pending);
    assert!(!snapshot.is_delay_over);

    tokio::time::advance(Duration::from_millis(20)).await;
    flush().await;
    assert!(tracker.snapshot().is_delay_over);
}

#[tokio::test(start_paused = true)]
async fn already_resolved_future_settles() {
    let tracker = tracker(0);
    let mut updates = tracker.subscribe();

    tracker.track(async { Ok("hello".to_string()) });
    updates.wait_for(|s| !s.is_pending).await.unwrap();

    let snapshot = tracker.snapshot();
    assert!(snapshot.is_delay_over);
    assert_eq!(snapshot.data.as_deref(), Some("hello"));
}

#[tokio::test(start_paused = true)]
async fn generation_counts_every_set() {
    let tracker = tracker(0);
    assert_eq!(tracker.generation(), 0);

    tracker.track(async { Ok("a".to_string()) });
    tracker.clear();
    tracker.set(None);
    assert_eq!(tracker.generation(), 3);
}

#[test]
fn tracker_works_on_multi_thread_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();

    let tracker: PromiseTracker<String, Failure> = PromiseTracker::builder()
        .pending_delay(Duration::ZERO)
        .handle(runtime.handle().clone())
        .build()
        .unwrap();

    let mut updates = tracker.subscribe();
    tracker.track(async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok("threaded".to_string())
    });

    runtime.block_on(async {
        updates.wait_for(|s| !s.is_pending).await.unwrap();
    });
    assert_eq!(tracker.snapshot().data.as_deref(), Some("threaded"));
}
