use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/// One unit of periodic work.
#[async_trait]
pub trait Cycle: Send {
    async fn run_once(&mut self);
}

/// Fixed-interval retry policy: unbounded attempts, no backoff.
///
/// The interval is slept after every cycle, whatever its outcome.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn fixed(interval: Duration) -> Self {
        Self { interval }
    }

    /// Never returns; the loop ends only with the process.
    pub async fn run_forever<C: Cycle + ?Sized>(&self, cycle: &mut C) {
        loop {
            self.step(cycle).await;
        }
    }

    /// Run `times` cycles (each followed by the interval sleep).
    pub async fn run_times<C: Cycle + ?Sized>(&self, cycle: &mut C, times: usize) {
        for _ in 0..times {
            self.step(cycle).await;
        }
    }

    async fn step<C: Cycle + ?Sized>(&self, cycle: &mut C) {
        cycle.run_once().await;
        sleep(self.interval).await;
    }
}
