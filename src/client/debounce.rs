use std::time::Duration;
use tokio::time::{sleep_until, Instant};

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// A value that settles only after it has stopped changing for `delay`.
/// Each `set` restarts the timer.
#[derive(Debug)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T> Debounced<T> {
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEBOUNCE_DELAY)
    }

    pub fn with_delay(initial: T, delay: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            delay,
        }
    }

    pub fn set(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recent value whose quiet period has elapsed.
    pub fn settled(&mut self) -> &T {
        let due = matches!(&self.pending, Some((_, deadline)) if Instant::now() >= *deadline);
        if due {
            if let Some((value, _)) = self.pending.take() {
                self.settled = value;
            }
        }
        &self.settled
    }

    /// Sleep until the pending value (if any) settles.
    pub async fn wait(&mut self) -> &T {
        if let Some((_, deadline)) = &self.pending {
            sleep_until(*deadline).await;
        }
        self.settled()
    }
}
