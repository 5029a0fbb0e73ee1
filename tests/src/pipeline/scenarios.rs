use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use chk_common::error::{ChkError, LookupFailure};
use chk_common::network::address::{Family, FamilyFilter};
use chk_common::network::target::Target;
use chk_core::cancel::{CancellationController, RunPhase};
use chk_core::pipeline;
use chk_core::progress::{NoProgress, ProgressSink, RunState};

use crate::mocks::{self, MockDns, MockInfo, RecordingSink, ip, record_for};

#[tokio::test]
async fn literal_address_all_lookups_succeed() {
    let dns = Arc::new(MockDns::default().with_ptr("8.8.8.8", &["dns.google."]));
    let info = Arc::new(MockInfo::default());
    let controller = CancellationController::new();
    let target = Target::from_str("8.8.8.8").unwrap();

    let report = pipeline::run(
        &target,
        &mocks::services(&dns, &info),
        &mocks::config(),
        &controller,
        Arc::new(NoProgress),
    )
    .await
    .unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.family(), Family::V4);
    assert_eq!(result.address.ip, ip("8.8.8.8"));
    assert_eq!(result.ptr, vec!["dns.google.".to_string()]);
    assert_eq!(result.metadata, Some(record_for(ip("8.8.8.8"))));
    assert!(result.error.is_none());
    assert!(report.interrupted.is_none());

    assert_eq!(dns.forward_calls.load(Ordering::SeqCst), 0);
    assert_eq!(controller.phase(), RunPhase::Done);
}

#[tokio::test]
async fn ipv4_filter_launches_one_enricher() {
    let dns = Arc::new(
        MockDns::default()
            .with_name("example.test", &["192.0.2.7", "2001:db8::7"])
            .with_ptr("192.0.2.7", &["www.example.test."])
            .with_ptr("2001:db8::7", &["www.example.test."]),
    );
    let info = Arc::new(MockInfo::default());
    let cfg = chk_common::config::Config {
        filter: FamilyFilter::V4Only,
        ..mocks::config()
    };

    let report = pipeline::run(
        &Target::from_str("example.test").unwrap(),
        &mocks::services(&dns, &info),
        &cfg,
        &CancellationController::new(),
        Arc::new(NoProgress),
    )
    .await
    .unwrap();

    assert_eq!(info.started(), 1);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].family(), Family::V4);
    assert_eq!(report.results[0].address.ip, ip("192.0.2.7"));
}

#[tokio::test]
async fn every_selected_address_yields_one_result() {
    let addresses = ["192.0.2.1", "192.0.2.2", "192.0.2.3", "2001:db8::1", "2001:db8::2"];
    let dns = Arc::new(MockDns::default().with_name("many.example.test", &addresses));
    let info = Arc::new(MockInfo::default());

    for (filter, expected) in [
        (FamilyFilter::Both, 5),
        (FamilyFilter::V4Only, 3),
        (FamilyFilter::V6Only, 2),
    ] {
        let cfg = chk_common::config::Config {
            filter,
            channel_capacity: 1,
            ..mocks::config()
        };
        let report = pipeline::run(
            &Target::from_str("many.example.test").unwrap(),
            &mocks::services(&dns, &info),
            &cfg,
            &CancellationController::new(),
            Arc::new(NoProgress),
        )
        .await
        .unwrap();

        assert_eq!(report.results.len(), expected);
        assert!(report.results.iter().all(|r| filter.selects(r.family())));

        let mut seen: Vec<_> = report.results.iter().map(|r| r.address).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), expected);
    }
}

#[tokio::test]
async fn reverse_failure_keeps_metadata() {
    let dns = Arc::new(MockDns::default().with_ptr_error("198.51.100.4", "NXDOMAIN"));
    let info = Arc::new(MockInfo::default());

    let report = pipeline::run(
        &Target::from_str("198.51.100.4").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &CancellationController::new(),
        Arc::new(NoProgress),
    )
    .await
    .unwrap();

    let result = &report.results[0];
    assert!(result.ptr.is_empty());
    assert!(result.metadata.is_some());

    let error = result.error.as_ref().unwrap();
    assert_eq!(error.failures().len(), 1);
    assert!(matches!(error.failures()[0], LookupFailure::ReverseLookup(_)));
    assert!(error.to_string().contains("NXDOMAIN"));
    assert!(!error.to_string().contains("IP info"));
}

#[tokio::test]
async fn both_failures_are_reported_reverse_first() {
    let dns = Arc::new(MockDns::default().with_ptr_error("198.51.100.9", "SERVFAIL"));
    let info = Arc::new(MockInfo::default().failing("198.51.100.9", "HTTP 503"));

    let report = pipeline::run(
        &Target::from_str("198.51.100.9").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &CancellationController::new(),
        Arc::new(NoProgress),
    )
    .await
    .unwrap();

    let result = &report.results[0];
    assert!(result.ptr.is_empty());
    assert!(result.metadata.is_none());
    assert_eq!(
        result.error.as_ref().unwrap().to_string(),
        "error looking up PTR records: SERVFAIL; error fetching IP info: HTTP 503"
    );
}

#[tokio::test]
async fn unresolvable_name_aborts_before_fan_out() {
    let dns = Arc::new(MockDns::default());
    let info = Arc::new(MockInfo::default());
    let controller = CancellationController::new();

    let err = pipeline::run(
        &Target::from_str("nowhere.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &controller,
        Arc::new(NoProgress),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ChkError::Resolution { .. }));
    assert_eq!(info.started(), 0);
    assert_eq!(controller.phase(), RunPhase::Done);
}

#[tokio::test]
async fn filter_can_select_nothing() {
    let dns = Arc::new(MockDns::default());
    let info = Arc::new(MockInfo::default());
    let cfg = chk_common::config::Config {
        filter: FamilyFilter::V6Only,
        ..mocks::config()
    };

    let report = pipeline::run(
        &Target::from_str("203.0.113.5").unwrap(),
        &mocks::services(&dns, &info),
        &cfg,
        &CancellationController::new(),
        Arc::new(NoProgress),
    )
    .await
    .unwrap();

    assert!(report.results.is_empty());
    assert_eq!(info.started(), 0);
}

#[tokio::test]
async fn progress_is_cleared_after_completion() {
    let dns = Arc::new(MockDns::default().with_name("two.example.test", &["192.0.2.1", "192.0.2.2"]));
    let info = Arc::new(MockInfo::default());
    let sink = Arc::new(RecordingSink::default());

    let report = pipeline::run(
        &Target::from_str("two.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &CancellationController::new(),
        sink.clone(),
    )
    .await
    .unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(sink.cleared.load(Ordering::SeqCst), 1);
    assert!(
        sink.frames
            .lock()
            .unwrap()
            .iter()
            .all(|frame| frame.total == 2 && frame.completed <= 2)
    );
}

struct BrokenSink;

impl ProgressSink for BrokenSink {
    fn render(&self, _state: RunState) {
        panic!("terminal went away");
    }

    fn clear(&self) {}
}

#[tokio::test]
async fn failing_progress_reporter_does_not_lose_results() {
    let dns = Arc::new(MockDns::default().with_name("two.example.test", &["192.0.2.1", "192.0.2.2"]));
    let info = Arc::new(MockInfo::default());
    let controller = CancellationController::new();

    let report = pipeline::run(
        &Target::from_str("two.example.test").unwrap(),
        &mocks::services(&dns, &info),
        &mocks::config(),
        &controller,
        Arc::new(BrokenSink),
    )
    .await
    .unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.interrupted.is_none());
    assert_eq!(controller.phase(), RunPhase::Done);
}
