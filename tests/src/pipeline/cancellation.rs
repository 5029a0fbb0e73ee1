use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chk_common::config::{Config, PartialPolicy};
use chk_common::error::{CancelReason, ChkError};
use chk_common::network::target::Target;
use chk_core::cancel::{CancellationController, RunPhase};
use chk_core::pipeline;

use crate::mocks::{self, MockDns, MockInfo, RecordingSink, ip};

const THREE: [&str; 3] = ["192.0.2.10", "192.0.2.11", "192.0.2.12"];

/// Every lookup hangs until it is cancelled.
fn stalled() -> (Arc<MockDns>, Arc<MockInfo>) {
    let mut dns = MockDns::default().with_name("slow.example.test", &THREE);
    let mut info = MockInfo::default();
    for addr in THREE {
        dns = dns.stalling(addr);
        info = info.stalling(addr);
    }
    (Arc::new(dns), Arc::new(info))
}

#[tokio::test]
async fn interrupt_mid_run_discards_and_leaks_nothing() {
    let (dns, info) = stalled();
    let controller = Arc::new(CancellationController::new());
    let sink = Arc::new(RecordingSink::default());

    let run = {
        let services = mocks::services(&dns, &info);
        let controller = controller.clone();
        let sink = sink.clone();
        tokio::spawn(async move {
            pipeline::run(
                &Target::from_str("slow.example.test").unwrap(),
                &services,
                &mocks::config(),
                &controller,
                sink,
            )
            .await
        })
    };

    while info.started() < 2 {
        tokio::task::yield_now().await;
    }
    assert!(controller.request_cancel(CancelReason::Interrupted));

    let outcome = run.await.unwrap();

    assert_eq!(outcome.unwrap_err(), ChkError::Cancelled(CancelReason::Interrupted));
    assert_eq!(controller.phase(), RunPhase::Done);
    assert_eq!(sink.cleared.load(Ordering::SeqCst), 1);

    // every pending sub-lookup has been dropped
    assert_eq!(Arc::strong_count(&dns.in_flight), 1);
    assert_eq!(Arc::strong_count(&info.in_flight), 1);
}

#[tokio::test(start_paused = true)]
async fn deadline_with_partial_policy_prints_finished_results() {
    let dns = Arc::new(
        MockDns::default()
            .with_name("mixed.example.test", &THREE)
            .with_ptr("192.0.2.10", &["a.example.test."])
            .with_ptr("192.0.2.11", &["b.example.test."])
            .stalling("192.0.2.12"),
    );
    let info = Arc::new(MockInfo::default().stalling("192.0.2.12"));
    let cfg = Config {
        partial: PartialPolicy::Print,
        ..mocks::config()
    };

    let controller = Arc::new(CancellationController::new());
    let watcher = controller.watch_signals(Some(Duration::from_secs(2)));

    let report = pipeline::run(
        &Target::from_str("mixed.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &cfg,
        &controller,
        Arc::new(RecordingSink::default()),
    )
    .await
    .unwrap();
    watcher.await.unwrap();

    assert_eq!(report.interrupted, Some(CancelReason::DeadlineExceeded));
    let mut finished: Vec<_> = report.results.iter().map(|r| r.address.ip).collect();
    finished.sort();
    assert_eq!(finished, vec![ip("192.0.2.10"), ip("192.0.2.11")]);
    assert!(report.results.iter().all(|r| r.error.is_none()));

    assert_eq!(Arc::strong_count(&dns.in_flight), 1);
    assert_eq!(Arc::strong_count(&info.in_flight), 1);
}

#[tokio::test(start_paused = true)]
async fn deadline_with_discard_policy_reports_cancellation() {
    let (dns, info) = stalled();
    let controller = Arc::new(CancellationController::new());
    let watcher = controller.watch_signals(Some(Duration::from_secs(1)));

    let err = pipeline::run(
        &Target::from_str("slow.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &controller,
        Arc::new(RecordingSink::default()),
    )
    .await
    .unwrap_err();
    watcher.await.unwrap();

    assert_eq!(err, ChkError::Cancelled(CancelReason::DeadlineExceeded));
    assert_eq!(controller.reason(), Some(CancelReason::DeadlineExceeded));
}

#[tokio::test]
async fn cancelled_before_resolution_starts_no_work() {
    let (dns, info) = stalled();
    let controller = CancellationController::new();
    controller.request_cancel(CancelReason::Interrupted);

    let err = pipeline::run(
        &Target::from_str("slow.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &controller,
        Arc::new(RecordingSink::default()),
    )
    .await
    .unwrap_err();

    assert_eq!(err, ChkError::Cancelled(CancelReason::Interrupted));
    assert_eq!(dns.forward_calls.load(Ordering::SeqCst), 0);
    assert_eq!(info.started(), 0);
}
