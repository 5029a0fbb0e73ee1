//! # Per-Address Enricher
//!
//! Produces exactly one [`LookupResult`] for one [`Address`] by running the
//! reverse lookup and the metadata fetch side by side.
//!
//! Both halves are polled inside a single `join!`, so neither can outlive the
//! enricher: when the enricher future finishes or is dropped, so are they.
//! A failed half never discards the other half's data.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chk_common::error::{CompositeError, FailureCause, LookupFailure};
use chk_common::network::address::Address;
use chk_common::record::LookupResult;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::metadata::MetadataSource;
use crate::resolver::ReverseResolver;

pub struct Enricher {
    reverse: Arc<dyn ReverseResolver>,
    metadata: Arc<dyn MetadataSource>,
    timeout: Duration,
}

impl Enricher {
    pub fn new(
        reverse: Arc<dyn ReverseResolver>,
        metadata: Arc<dyn MetadataSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            reverse,
            metadata,
            timeout,
        }
    }

    pub async fn enrich(&self, address: Address, cancel: &CancellationToken) -> LookupResult {
        let ip = address.ip;
        let (ptr, metadata) = tokio::join!(
            bounded(cancel, self.timeout, self.reverse.reverse_lookup(ip)),
            bounded(cancel, self.timeout, self.metadata.fetch(ip)),
        );

        let mut error = CompositeError::default();

        let ptr = ptr.unwrap_or_else(|cause| {
            error.push(LookupFailure::ReverseLookup(cause));
            Vec::new()
        });

        let metadata = metadata
            .map_err(|cause| error.push(LookupFailure::MetadataFetch(cause)))
            .ok();

        debug!(
            "Enriched {address}: {} PTR, metadata: {}, failures: {}",
            ptr.len(),
            metadata.is_some(),
            error.failures().len()
        );

        LookupResult {
            address,
            ptr,
            metadata,
            error: error.into_option(),
        }
    }
}

/// Runs one sub-lookup until it finishes, times out or the run is cancelled.
async fn bounded<T, F>(
    cancel: &CancellationToken,
    timeout: Duration,
    operation: F,
) -> Result<T, FailureCause>
where
    F: Future<Output = Result<T, FailureCause>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FailureCause::Cancelled),
        outcome = tokio::time::timeout(timeout, operation) => {
            outcome.unwrap_or(Err(FailureCause::TimedOut(timeout)))
        }
    }
}
