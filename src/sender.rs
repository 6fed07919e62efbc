use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum gap between two consecutive file sends to one chat, to stay under
/// Telegram's flood-control limits.
pub const SEND_GAP: Duration = Duration::from_millis(1500);

/// Serializes sends with a minimum delay between them.
///
/// Throughput is deliberately traded away here: uploads could run
/// concurrently, but the transport's rate limit is per chat and exceeding it
/// fails the whole batch.
pub struct SendPacer {
    min_gap: Duration,
    last_send: Mutex<Option<Instant>>,
}

impl SendPacer {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_send: Mutex::new(None),
        }
    }

    /// Wait until at least `min_gap` has passed since the previous call.
    pub async fn pace(&self) {
        let mut last_send = self.last_send.lock().await;
        if let Some(last) = *last_send {
            let ready_at = last + self.min_gap;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last_send = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_send_is_not_delayed() {
        let pacer = SendPacer::new(SEND_GAP);

        let start = Instant::now();
        pacer.pace().await;

        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_sends_are_spaced_by_the_gap() {
        let pacer = SendPacer::new(SEND_GAP);

        pacer.pace().await;
        let after_first = Instant::now();
        pacer.pace().await;

        assert!(Instant::now() - after_first >= SEND_GAP);
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_when_the_gap_has_already_passed() {
        let pacer = SendPacer::new(SEND_GAP);

        pacer.pace().await;
        tokio::time::advance(SEND_GAP * 2).await;

        let before = Instant::now();
        pacer.pace().await;
        assert_eq!(Instant::now(), before);
    }
}
