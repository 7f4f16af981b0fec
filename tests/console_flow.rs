//! End-to-end console behaviour against mock backends.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scale_console::actions::{notification, EnqueueHandler, JobRequest, NotificationKind};
use scale_console::config::ResultOrdering;
use scale_console::http::ConsoleClient;
use scale_console::lifecycle::Console;
use scale_console::poll::{refresh, PollScheduler};
use scale_console::state::{CycleOutcome, StatusModel};

mod common;
use common::MockResponse;

#[tokio::test]
async fn poll_success_then_failure_keeps_last_snapshot() {
    let healthy = Arc::new(AtomicBool::new(true));
    let flag = healthy.clone();
    let addr = common::start_programmable_backend(move |_| {
        let flag = flag.clone();
        async move {
            if flag.load(Ordering::SeqCst) {
                MockResponse::json(200, common::status_body("web-1", 1, 1))
            } else {
                MockResponse::json(500, "{}")
            }
        }
    })
    .await;

    let config = common::config_for(addr, 100);
    let client = ConsoleClient::from_config(&config).unwrap();
    let handle = PollScheduler::new(client, &config.poll).mount();

    tokio::time::sleep(Duration::from_millis(250)).await;
    let state = handle.state();
    assert_eq!(state.snapshot.as_ref().map(|s| s.served_by.as_str()), Some("web-1"));
    assert_eq!(state.last_error, None);

    healthy.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = handle.state();
    assert_eq!(state.snapshot.as_ref().map(|s| s.served_by.as_str()), Some("web-1"));
    assert_eq!(state.last_error.as_deref(), Some("Request failed"));

    healthy.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(handle.state().last_error, None);

    handle.unmount().await;
}

#[tokio::test]
async fn reordered_responses_leave_the_last_resolved_payload() {
    // Request 1 answers "A" slowly, request 2 answers "B" at once,
    // later requests hang past the end of the test.
    let counter = Arc::new(AtomicU64::new(0));
    let c = counter.clone();
    let addr = common::start_programmable_backend(move |_| {
        let c = c.clone();
        async move {
            match c.fetch_add(1, Ordering::SeqCst) {
                0 => {
                    tokio::time::sleep(Duration::from_millis(600)).await;
                    MockResponse::json(200, common::status_body("A", 1, 1))
                }
                1 => MockResponse::json(200, common::status_body("B", 2, 2)),
                _ => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    MockResponse::json(200, common::status_body("C", 3, 3))
                }
            }
        }
    })
    .await;

    let config = common::config_for(addr, 200);
    let client = ConsoleClient::from_config(&config).unwrap();
    let handle = PollScheduler::new(client, &config.poll).mount();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(handle.state().snapshot.map(|s| s.served_by), Some("B".to_string()));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(handle.state().snapshot.map(|s| s.served_by), Some("A".to_string()));

    handle.unmount().await;
}

#[tokio::test]
async fn unmount_stops_requests() {
    let hits = Arc::new(AtomicU64::new(0));
    let h = hits.clone();
    let addr = common::start_programmable_backend(move |_| {
        let h = h.clone();
        async move {
            h.fetch_add(1, Ordering::SeqCst);
            MockResponse::json(200, common::status_body("web-1", 1, 1))
        }
    })
    .await;

    let config = common::config_for(addr, 100);
    let client = ConsoleClient::from_config(&config).unwrap();
    let handle = PollScheduler::new(client, &config.poll).mount();
    let model = handle.model().clone();

    tokio::time::sleep(Duration::from_millis(350)).await;
    handle.unmount().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let after_teardown = hits.load(Ordering::SeqCst);
    let frozen = model.current();
    assert!(after_teardown >= 3);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(hits.load(Ordering::SeqCst), after_teardown);
    assert_eq!(model.current(), frozen);
}

#[tokio::test]
async fn enqueue_success_and_failure_notify_without_touching_status() {
    let status_up = Arc::new(AtomicBool::new(true));
    let enqueue_up = Arc::new(AtomicBool::new(true));
    let (s, e) = (status_up.clone(), enqueue_up.clone());
    let addr = common::start_programmable_backend(move |req| {
        let (s, e) = (s.clone(), e.clone());
        async move {
            if req.path() == "/api/enqueue" {
                if e.load(Ordering::SeqCst) {
                    assert_eq!(req.query_param("job").as_deref(), Some("demo-job"));
                    MockResponse::json(200, r#"{"enqueued":"job-42"}"#)
                } else {
                    MockResponse::json(500, "{}")
                }
            } else if s.load(Ordering::SeqCst) {
                MockResponse::json(200, common::status_body("web-1", 1, 1))
            } else {
                MockResponse::json(502, "{}")
            }
        }
    })
    .await;

    let config = common::config_for(addr, 100);
    let client = ConsoleClient::from_config(&config).unwrap();

    // Drive cycles by hand so nothing else writes the model during the submits:
    // one success, then one failure, leaving a stale snapshot plus an error.
    let model = StatusModel::new(ResultOrdering::Completion);
    assert_eq!(refresh(&client, &model).await, CycleOutcome::Applied);
    status_up.store(false, Ordering::SeqCst);
    assert_eq!(refresh(&client, &model).await, CycleOutcome::Failed);

    let seeded = model.current();
    assert_eq!(seeded.snapshot.as_ref().map(|s| s.served_by.as_str()), Some("web-1"));
    assert_eq!(seeded.last_error.as_deref(), Some("Request failed"));

    let (notifier, mut queue) = notification::channel();
    let enqueue = EnqueueHandler::new(client, notifier);

    enqueue.submit(JobRequest::new("demo-job")).await;
    let note = queue.next().await.unwrap();
    assert_eq!(note.kind, NotificationKind::Success);
    assert!(note.message.contains("job-42"));
    assert_eq!(model.current(), seeded);

    enqueue_up.store(false, Ordering::SeqCst);
    enqueue.submit(JobRequest::new("demo-job")).await;
    let note = queue.next().await.unwrap();
    assert_eq!(note.kind, NotificationKind::Failure);
    assert!(note.message.contains("Request failed"));
    assert_eq!(model.current(), seeded);
}

#[tokio::test]
async fn console_start_and_stop() {
    let addr = common::start_programmable_backend(|req| async move {
        match req.path() {
            "/api/healthz" => MockResponse { status: 200, body: "ok".into(), headers: vec![] },
            "/api/enqueue" => MockResponse::json(200, r#"{"enqueued":9}"#),
            _ => MockResponse::json(200, common::status_body("web-3", 5, 50)),
        }
    })
    .await;

    let mut console = Console::start(common::config_for(addr, 100)).await.unwrap();
    let mut view = console.poller.subscribe();
    view.wait_for(|s| s.snapshot.is_some()).await.unwrap();
    assert_eq!(console.poller.state().snapshot.unwrap().served_by, "web-3");

    console.enqueue.spawn_submit(JobRequest::new("x")).await.unwrap();
    let note = console.notifications.next().await.unwrap();
    assert_eq!(note.message, "Enqueued: 9");

    console.enqueue.spawn_submit(JobRequest::new("y")).await.unwrap();
    let leftover = console.stop().await;
    assert_eq!(leftover.len(), 1);
}
