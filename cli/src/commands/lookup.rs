use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chk_common::config::Config;
use chk_common::error::ChkError;
use chk_common::network::target::Target;
use chk_core::cancel::CancellationController;
use chk_core::pipeline::{self, Report, Services};
use tracing::{Instrument, error, info_span};

use crate::terminal::format::Style;
use crate::terminal::print;
use crate::terminal::spinner::SpinnerSink;

pub async fn lookup(raw_target: &str, cfg: &Config) -> anyhow::Result<()> {
    let target: Target = Target::from_str(raw_target)?;
    let style: Style = Style::new(cfg.colorize);

    let services = Services::from_config(cfg)?;
    let controller = Arc::new(CancellationController::new());
    let watcher = controller.watch_signals(cfg.deadline);
    let sink = Arc::new(SpinnerSink::new(style));

    let start_time: Instant = Instant::now();
    let outcome = pipeline::run(&target, &services, cfg, &controller, sink)
        .instrument(info_span!("lookup", target = %target))
        .await;
    if let Err(e) = watcher.await {
        error!("Signal watcher failed: {e}");
    }

    let mut report: Report = outcome?;
    report.results.sort_by_key(|result| result.address);
    lookup_ends(&report, start_time.elapsed(), style);

    match report.interrupted {
        Some(reason) => Err(ChkError::Cancelled(reason).into()),
        None => Ok(()),
    }
}

fn lookup_ends(report: &Report, total_time: Duration, style: Style) {
    if report.interrupted.is_some() {
        print::header("partial results", style);
    }

    if report.results.is_empty() {
        print::no_results(style);
        return;
    }

    print::results(&report.results, style);
    print::summary(report.results.len(), total_time, style);
}
