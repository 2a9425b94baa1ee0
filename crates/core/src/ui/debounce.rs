use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tokio::time::sleep;

/// Trailing-edge debounce for UI triggers.
///
/// Every trigger calls [`Debouncer::settle`]; only the call that was not
/// superseded within `delay` gets `true`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn lone_trigger_fires() {
        let d = Debouncer::new(Duration::from_millis(300));
        assert!(d.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once() {
        let d = Arc::new(Debouncer::new(Duration::from_millis(300)));

        let first = tokio::spawn({
            let d = Arc::clone(&d);
            async move { d.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let d = Arc::clone(&d);
            async move { d.settle().await }
        });

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());
    }
}
