//! Leading-edge debounce for store change bursts.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

/// Cooldown window applied between scan re-runs.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(1);

/// The scan+reindex re-run the debouncer guards.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}

/// Pure leading-edge gate. The first notification in an idle period
/// passes; notifications inside the cooldown window are swallowed; once
/// the window elapses the next notification passes again.
#[derive(Debug)]
pub struct DebounceGate {
    cooldown: Duration,
    last_fire: Option<Instant>,
}

impl DebounceGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fire: None,
        }
    }

    /// Whether a notification arriving at `now` should trigger.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) if now.duration_since(last) < self.cooldown => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }
}

/// Rate limiter in front of the scan+reindex pair.
pub struct ChangeDebouncer {
    gate: Mutex<DebounceGate>,
    refresh: Arc<dyn Refresh>,
}

impl ChangeDebouncer {
    pub fn new(cooldown: Duration, refresh: Arc<dyn Refresh>) -> Self {
        Self {
            gate: Mutex::new(DebounceGate::new(cooldown)),
            refresh,
        }
    }

    /// Handle one change notification: re-run immediately on the leading
    /// edge, coalesce the rest of the burst.
    pub async fn notify(&self) {
        let fire = self.gate.lock().unwrap().try_fire(Instant::now());
        if fire {
            self.refresh.refresh().await;
        } else {
            trace!("change notification coalesced");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn first_notification_fires_immediately() {
        let mut gate = DebounceGate::new(Duration::from_secs(1));
        assert!(gate.try_fire(Instant::now()));
    }

    #[test]
    fn burst_inside_the_window_is_coalesced() {
        let mut gate = DebounceGate::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(gate.try_fire(start));
        assert!(!gate.try_fire(start + Duration::from_millis(10)));
        assert!(!gate.try_fire(start + Duration::from_millis(900)));
    }

    #[test]
    fn next_notification_after_the_window_fires_again() {
        let mut gate = DebounceGate::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(gate.try_fire(start));
        assert!(gate.try_fire(start + Duration::from_millis(1001)));
        // The window restarts from the second fire.
        assert!(!gate.try_fire(start + Duration::from_millis(1500)));
    }

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait]
    impl Refresh for Counter {
        async fn refresh(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn debouncer_runs_one_refresh_per_burst() {
        let counter = Arc::new(Counter::default());
        let debouncer = ChangeDebouncer::new(Duration::from_secs(1), counter.clone());

        for _ in 0..5 {
            debouncer.notify().await;
        }
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn debouncer_fires_again_after_cooldown() {
        let counter = Arc::new(Counter::default());
        let debouncer = ChangeDebouncer::new(Duration::from_millis(20), counter.clone());

        debouncer.notify().await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        debouncer.notify().await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }
}
