//! Blocking readiness polling.

use crate::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    Timeout(Duration),
    Attempts(u32),
}

/// Poll a check at a fixed interval until it yields a value or the limit runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poll {
    interval: Duration,
    limit: Limit,
}

impl Poll {
    /// Stop once `timeout` has elapsed since the first check.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Poll {
            interval,
            limit: Limit::Timeout(timeout),
        }
    }

    /// Stop after `max_attempts` checks.
    pub fn attempts(interval: Duration, max_attempts: u32) -> Self {
        Poll {
            interval,
            limit: Limit::Attempts(max_attempts),
        }
    }

    /// Longest time the poll may block.
    pub fn budget(&self) -> Duration {
        match self.limit {
            Limit::Timeout(timeout) => timeout,
            Limit::Attempts(n) => self.interval * n.saturating_sub(1),
        }
    }

    /// Run `check` until it returns `Some`.
    ///
    /// The check always runs at least once. `Ok(None)` means the limit ran
    /// out; errors from `check` stop the poll immediately.
    pub fn until<T>(
        &self,
        what: &str,
        mut check: impl FnMut() -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        let start = Instant::now();
        if let Ok(budget) = chrono::TimeDelta::from_std(self.budget()) {
            log::info!(
                "Waiting for {what} (until {})",
                (chrono::Local::now() + budget).format("%H:%M:%S")
            );
        }
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            if let Some(value) = check()? {
                log::debug!("{what} ready after {attempt} check(s)");
                return Ok(Some(value));
            }
            let exhausted = match self.limit {
                Limit::Timeout(timeout) => start.elapsed() >= timeout,
                Limit::Attempts(max) => attempt >= max,
            };
            if exhausted {
                log::warn!("Gave up waiting for {what} after {attempt} check(s)");
                return Ok(None);
            }
            log::debug!("{what} not ready, sleeping {:?}", self.interval);
            std::thread::sleep(self.interval);
        }
    }
}
