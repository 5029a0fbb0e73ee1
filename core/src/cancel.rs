//! # Cancellation Controller
//!
//! Tracks the run through `Running -> CancelRequested -> Done` and owns the
//! [`CancellationToken`] every in-flight lookup listens to.
//!
//! Cancellation is requested either by Ctrl-C or by an optional deadline.
//! Only the first request counts; its reason is kept for reporting.

use std::sync::{Arc, OnceLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use chk_common::error::CancelReason;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunPhase {
    Running = 0,
    CancelRequested = 1,
    Done = 2,
}

impl RunPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => RunPhase::Running,
            1 => RunPhase::CancelRequested,
            _ => RunPhase::Done,
        }
    }
}

pub struct CancellationController {
    token: CancellationToken,
    finished: CancellationToken,
    phase: AtomicU8,
    reason: OnceLock<CancelReason>,
}

impl Default for CancellationController {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationController {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            finished: CancellationToken::new(),
            phase: AtomicU8::new(RunPhase::Running as u8),
            reason: OnceLock::new(),
        }
    }

    /// The token lookups observe. Cloning is cheap.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn phase(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn reason(&self) -> Option<CancelReason> {
        self.reason.get().copied()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Moves `Running -> CancelRequested` and cancels the token.
    ///
    /// Returns `false` if the run was already cancelled or done.
    pub fn request_cancel(&self, reason: CancelReason) -> bool {
        let moved = self
            .phase
            .compare_exchange(
                RunPhase::Running as u8,
                RunPhase::CancelRequested as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if moved {
            let _ = self.reason.set(reason);
            debug!("Cancellation requested: {reason}");
            self.token.cancel();
        }
        moved
    }

    /// Moves to `Done` from any phase and stops the signal watcher.
    pub fn finish(&self) {
        self.phase.store(RunPhase::Done as u8, Ordering::Release);
        self.finished.cancel();
    }

    /// Spawns the task that turns Ctrl-C or the deadline into a cancellation.
    ///
    /// The task ends on its own once [`finish`](Self::finish) is called.
    pub fn watch_signals(self: &Arc<Self>, deadline: Option<Duration>) -> JoinHandle<()> {
        let controller = self.clone();

        tokio::spawn(async move {
            let deadline = async {
                match deadline {
                    Some(after) => tokio::time::sleep(after).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                _ = controller.finished.cancelled() => {}
                signal = tokio::signal::ctrl_c() => match signal {
                    Ok(()) => {
                        controller.request_cancel(CancelReason::Interrupted);
                    }
                    Err(e) => warn!("Could not listen for Ctrl-C: {e}"),
                },
                _ = deadline => {
                    controller.request_cancel(CancelReason::DeadlineExceeded);
                }
            }
        })
    }
}
