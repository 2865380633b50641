//! Background Clearing Cycle
//!
//! Every period the log is reset to the clear notice and the notice is
//! queued for mirroring. The cycle runs as its own tokio task, independent
//! of request serving, until its cancellation token fires.

use crate::application::config::CLEAR_NOTICE;
use crate::application::reset_history::ResetHistoryUseCase;
use crate::domain::entities::ChatMessage;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Periodic history clearing task
pub struct ClearingCycle {
    reset: ResetHistoryUseCase,
    period: Duration,
}

impl ClearingCycle {
    pub fn new(reset: ResetHistoryUseCase, period: Duration) -> Self {
        Self { reset, period }
    }

    /// Perform one clear immediately
    pub async fn tick(&self) {
        self.reset.execute(ChatMessage::system(CLEAR_NOTICE)).await;
    }

    /// Run until `cancel` fires
    ///
    /// The first clear happens one full period after the call. Cancellation
    /// is only observed between ticks, so a clear in progress completes.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(period_secs = self.period.as_secs(), "Clearing cycle started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Clearing cycle stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
