//! Error taxonomy shared by the pipeline and the command line.
//!
//! [`ChkError`] covers failures that end the whole run. [`LookupFailure`]
//! covers failures of a single sub-lookup; those never end the run and are
//! folded into the owning result as a [`CompositeError`].

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Why the run was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user pressed Ctrl-C.
    Interrupted,
    /// The configured overall deadline elapsed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Interrupted => f.write_str("interrupted by user"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Run-level failures. Each one aborts the run and exits non-zero.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChkError {
    #[error("invalid target '{0}': not an IP address or domain name")]
    InvalidTarget(String),

    #[error("error looking up IP for domain {target}: {reason}")]
    Resolution { target: String, reason: String },

    #[error("lookup cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("could not set up the HTTP client: {0}")]
    Client(String),
}

/// What went wrong inside one sub-lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Failed(String),
    TimedOut(Duration),
    Cancelled,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Failed(reason) => f.write_str(reason),
            FailureCause::TimedOut(after) => {
                write!(f, "timed out after {:.1}s", after.as_secs_f64())
            }
            FailureCause::Cancelled => f.write_str("operation cancelled"),
        }
    }
}

/// A failed sub-lookup for one address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("error looking up PTR records: {0}")]
    ReverseLookup(FailureCause),

    #[error("error fetching IP info: {0}")]
    MetadataFetch(FailureCause),
}

impl LookupFailure {
    pub fn cause(&self) -> &FailureCause {
        match self {
            LookupFailure::ReverseLookup(cause) | LookupFailure::MetadataFetch(cause) => cause,
        }
    }
}

/// Every sub-lookup failure of one address, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeError {
    failures: Vec<LookupFailure>,
}

impl CompositeError {
    pub fn push(&mut self, failure: LookupFailure) {
        self.failures.push(failure);
    }

    pub fn failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `None` when nothing failed.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, failure) in self.failures.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}
