//! Timed reveal of an assembled reply.
//!
//! Drives [`TurnController::tick`] with a fixed delay after every revealed
//! character, approximating live typing. The reveal cannot be cancelled or
//! interrupted once started.

use std::time::Duration;

use suki_types::error::TurnError;

use super::controller::{RevealStep, TurnController};

/// Runs a reveal to completion at a fixed pace.
#[derive(Debug, Clone, Copy)]
pub struct RevealDriver {
    delay: Duration,
}

impl RevealDriver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Tick the controller until the assistant turn is committed.
    ///
    /// `on_update` sees the pending reveal after every character.
    pub async fn run(
        &self,
        controller: &mut TurnController,
        mut on_update: impl FnMut(&str),
    ) -> Result<(), TurnError> {
        loop {
            match controller.tick()? {
                RevealStep::Typed(_) => {
                    on_update(controller.pending_reveal());
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                RevealStep::Committed => return Ok(()),
            }
        }
    }
}

impl Default for RevealDriver {
    fn default() -> Self {
        Self::from_millis(25)
    }
}
