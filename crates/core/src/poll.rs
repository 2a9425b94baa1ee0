//! Bounded polling against a page we do not control.

use std::{future::Future, time::Duration};

use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poll {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Consecutive unchanged samples that count as settled.
    pub stable_after: u32,
    pub backoff: f64,
    pub max_interval: Duration,
}

impl Poll {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            stable_after: 4,
            backoff: 1.0,
            max_interval: interval,
        }
    }

    pub const fn stable_after(mut self, samples: u32) -> Self {
        self.stable_after = samples;
        self
    }

    pub fn with_backoff(mut self, factor: f64, max_interval: Duration) -> Self {
        self.backoff = factor.max(1.0);
        self.max_interval = max_interval.max(self.interval);
        self
    }

    fn next_interval(&self, current: Duration) -> Duration {
        if self.backoff <= 1.0 {
            return current;
        }
        current.mul_f64(self.backoff).min(self.max_interval)
    }

    /// Sleep, then probe; repeat until the probe yields a value or attempts run out.
    pub async fn until<T, F, Fut>(&self, mut probe: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let mut interval = self.interval;
        for _ in 0..self.max_attempts {
            sleep(interval).await;
            if let Some(value) = probe().await {
                return Some(value);
            }
            interval = self.next_interval(interval);
        }
        None
    }

    /// Act, wait one interval, then sample a growing count. Repeats until
    /// the count stops changing for `stable_after` consecutive samples, or
    /// attempts run out. Returns the last count.
    pub async fn until_stable<A, AFut, S, SFut>(
        &self,
        initial: usize,
        mut act: A,
        mut sample: S,
    ) -> usize
    where
        A: FnMut() -> AFut,
        AFut: Future<Output = ()>,
        S: FnMut() -> SFut,
        SFut: Future<Output = usize>,
    {
        let mut previous = initial;
        let mut unchanged = 0;
        let mut interval = self.interval;
        for _ in 0..self.max_attempts {
            act().await;
            sleep(interval).await;
            let count = sample().await;
            if count == previous {
                unchanged += 1;
                if unchanged >= self.stable_after {
                    break;
                }
            } else {
                unchanged = 0;
                previous = count;
            }
            interval = self.next_interval(interval);
        }
        previous
    }
}
