//! # Fan-Out Coordinator
//!
//! Launches one enrichment task per selected address and drains their results
//! through a bounded channel into a single collector.
//!
//! The channel closing is the "all work finished" signal: every task owns a
//! sender clone and drops it when it is done, so `recv()` yields `None`
//! exactly once, after the last result.
//!
//! The collector is the only writer of the [`RunState`].

use std::sync::Arc;

use chk_common::network::address::{Address, FamilyFilter};
use chk_common::record::LookupResult;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::enricher::Enricher;
use crate::progress::RunState;

/// How a coordinated run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Every selected address produced its result.
    Completed(Vec<LookupResult>),
    /// Cancelled before the end. Holds the results collected up to that point.
    Cancelled(Vec<LookupResult>),
}

pub struct Coordinator {
    enricher: Arc<Enricher>,
    capacity: usize,
}

impl Coordinator {
    pub fn new(enricher: Arc<Enricher>, capacity: usize) -> Self {
        Self {
            enricher,
            capacity: capacity.max(1),
        }
    }

    /// Keeps the addresses the filter asks for, in their original order.
    pub fn select(addresses: &[Address], filter: FamilyFilter) -> Vec<Address> {
        addresses
            .iter()
            .filter(|address| filter.selects(address.family))
            .copied()
            .collect()
    }

    /// Enriches every address concurrently and collects the results.
    ///
    /// `progress` must have been created with `RunState::new(addresses.len())`.
    /// On cancellation every enrichment task is aborted and awaited before
    /// this returns, so nothing keeps running in the background.
    pub async fn run(
        &self,
        addresses: Vec<Address>,
        cancel: &CancellationToken,
        progress: watch::Sender<RunState>,
    ) -> Outcome {
        let total = addresses.len();
        let (tx, mut rx) = mpsc::channel::<LookupResult>(self.capacity);
        let mut tasks: JoinSet<()> = JoinSet::new();

        for address in addresses {
            let tx = tx.clone();
            let enricher = self.enricher.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let result = enricher.enrich(address, &cancel).await;
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        debug!("Launched {total} enrichment tasks");

        let mut results: Vec<LookupResult> = Vec::with_capacity(total);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tasks.shutdown().await;
                    debug!("Cancelled with {}/{total} results collected", results.len());
                    return Outcome::Cancelled(results);
                }
                received = rx.recv() => match received {
                    Some(result) => {
                        results.push(result);
                        progress.send_modify(|state| state.completed += 1);
                    }
                    None => break,
                },
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("Enrichment task failed: {e}");
            }
        }

        Outcome::Completed(results)
    }
}
