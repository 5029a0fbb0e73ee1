//! Entry point of a lookup run: resolve, fan out, collect.
//!
//! Target-level errors are returned before any concurrent work starts.
//! Per-address errors are carried inside each [`LookupResult`].

use std::sync::Arc;

use chk_common::config::{Config, PartialPolicy};
use chk_common::error::{CancelReason, ChkError};
use chk_common::network::target::Target;
use chk_common::record::LookupResult;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::cancel::CancellationController;
use crate::coordinator::{Coordinator, Outcome};
use crate::enricher::Enricher;
use crate::metadata::MetadataSource;
use crate::metadata::ipinfo::IpInfoClient;
use crate::progress::{self, ProgressSink, RunState};
use crate::resolver::hickory::HickoryResolver;
use crate::resolver::{self, NameResolver, ReverseResolver};

/// The external collaborators of a run.
pub struct Services {
    pub names: Arc<dyn NameResolver>,
    pub reverse: Arc<dyn ReverseResolver>,
    pub metadata: Arc<dyn MetadataSource>,
}

impl Services {
    /// Real DNS through the system resolver and metadata from the configured API.
    pub fn from_config(cfg: &Config) -> Result<Self, ChkError> {
        let dns = Arc::new(HickoryResolver::from_system_conf(cfg.timeout));
        let metadata = IpInfoClient::new(&cfg.api_url, cfg.api_token.clone(), cfg.timeout)
            .map_err(|e| ChkError::Client(e.to_string()))?;

        Ok(Self {
            names: dns.clone(),
            reverse: dns,
            metadata: Arc::new(metadata),
        })
    }
}

/// What a run hands to the renderer.
#[derive(Debug)]
pub struct Report {
    pub results: Vec<LookupResult>,
    /// Set when the run was cancelled and the partial policy is `Print`.
    pub interrupted: Option<CancelReason>,
}

/// Runs one full lookup for `target`.
///
/// On cancellation the collected results are dropped, unless `cfg.partial`
/// is [`PartialPolicy::Print`], in which case they come back in a report with
/// `interrupted` set. The controller always ends in `Done`.
pub async fn run(
    target: &Target,
    services: &Services,
    cfg: &Config,
    controller: &CancellationController,
    sink: Arc<dyn ProgressSink>,
) -> Result<Report, ChkError> {
    let outcome = execute(target, services, cfg, controller, sink).await;
    controller.finish();
    outcome
}

async fn execute(
    target: &Target,
    services: &Services,
    cfg: &Config,
    controller: &CancellationController,
    sink: Arc<dyn ProgressSink>,
) -> Result<Report, ChkError> {
    let cancel = controller.token();

    let candidates = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ChkError::Cancelled(cancel_reason(controller))),
        resolved = resolver::resolve_target(target, services.names.as_ref()) => resolved?,
    };

    let selected = Coordinator::select(&candidates, cfg.filter);
    info!(
        "{target}: {} candidate addresses, {} selected",
        candidates.len(),
        selected.len()
    );

    if selected.is_empty() {
        return Ok(Report {
            results: Vec::new(),
            interrupted: None,
        });
    }

    let enricher = Enricher::new(services.reverse.clone(), services.metadata.clone(), cfg.timeout);
    let coordinator = Coordinator::new(Arc::new(enricher), cfg.channel_capacity);

    let (state_tx, state_rx) = watch::channel(RunState::new(selected.len()));
    let reporter = progress::spawn_reporter(cfg.progress_interval, state_rx, sink, cancel.clone());

    let outcome = coordinator.run(selected, &cancel, state_tx).await;
    if let Err(e) = reporter.await {
        error!("Progress reporter failed: {e}");
    }

    match outcome {
        Outcome::Completed(results) => Ok(Report {
            results,
            interrupted: None,
        }),
        Outcome::Cancelled(results) => {
            let reason = cancel_reason(controller);
            debug!("Run cancelled ({reason}) with {} results", results.len());
            match cfg.partial {
                PartialPolicy::Discard => Err(ChkError::Cancelled(reason)),
                PartialPolicy::Print => Ok(Report {
                    results,
                    interrupted: Some(reason),
                }),
            }
        }
    }
}

// A token cancelled without going through the controller counts as an interrupt.
fn cancel_reason(controller: &CancellationController) -> CancelReason {
    controller.reason().unwrap_or(CancelReason::Interrupted)
}
