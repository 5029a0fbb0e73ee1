//! Live "completed/total" reporting.
//!
//! The collector owns the only [`watch::Sender`] of the [`RunState`]; the
//! reporter holds a receiver and never writes. Rendering is delegated to a
//! [`ProgressSink`] so the terminal code stays in the binary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Counters of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub total: usize,
    pub completed: usize,
}

impl RunState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

/// Where progress ends up. Must be cheap, it is called from the reporter task.
pub trait ProgressSink: Send + Sync {
    fn render(&self, state: RunState);

    /// Erase whatever `render` left behind.
    fn clear(&self);
}

/// A sink that shows nothing.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn render(&self, _state: RunState) {}

    fn clear(&self) {}
}

/// Starts the reporter task.
///
/// It renders on every `period` tick and stops as soon as all work is
/// finished, the collector goes away or the run is cancelled. The sink is
/// always cleared before the task ends.
pub fn spawn_reporter(
    period: Duration,
    mut state: watch::Receiver<RunState>,
    sink: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                changed = state.changed() => {
                    if changed.is_err() || state.borrow_and_update().is_finished() {
                        break;
                    }
                }
                _ = ticker.tick() => sink.render(*state.borrow()),
            }
        }

        sink.clear();
    })
}
