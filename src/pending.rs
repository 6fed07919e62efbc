use std::collections::HashMap;
use std::time::Duration;

use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// How long a submitted link waits for a format choice before it is dropped.
pub const PENDING_TTL: Duration = Duration::from_secs(30 * 60);

/// How often the background sweep reclaims expired entries.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

struct PendingLink {
    url: String,
    stored_at: Instant,
}

/// In-memory store of links awaiting a format choice, one per chat.
///
/// A new link from the same chat overwrites the previous one. Entries expire
/// after [`PENDING_TTL`]: expiry is checked lazily on [`take`](Self::take) and
/// reclaimed by [`sweep`](Self::sweep), so abandoned chats cannot accumulate
/// entries for the lifetime of the process.
pub struct PendingStore {
    entries: Mutex<HashMap<ChatId, PendingLink>>,
    ttl: Duration,
}

impl PendingStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Store a link for the chat, replacing any unconsumed earlier one.
    pub async fn set(&self, chat_id: ChatId, url: String) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            chat_id,
            PendingLink {
                url,
                stored_at: Instant::now(),
            },
        );
    }

    /// Take the pending link for the chat, removing it from the store.
    ///
    /// Returns `None` if nothing is pending or the entry has expired.
    pub async fn take(&self, chat_id: ChatId) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let entry = entries.remove(&chat_id)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.url)
    }

    /// Drop all expired entries. Called periodically from a background task.
    pub async fn sweep(&self) {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() <= self.ttl);
        let removed = before - entries.len();
        if removed > 0 {
            log::info!("Swept {} expired pending link(s)", removed);
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CHAT: ChatId = ChatId(42);

    #[tokio::test]
    async fn take_returns_and_clears_the_stored_url() {
        let store = PendingStore::new(PENDING_TTL);
        store.set(CHAT, "https://example.com/video".to_string()).await;

        assert_eq!(
            store.take(CHAT).await.as_deref(),
            Some("https://example.com/video")
        );
        assert_eq!(store.take(CHAT).await, None);
    }

    #[tokio::test]
    async fn take_on_empty_store_returns_none() {
        let store = PendingStore::new(PENDING_TTL);
        assert_eq!(store.take(CHAT).await, None);
    }

    #[tokio::test]
    async fn a_new_link_overwrites_the_previous_one() {
        let store = PendingStore::new(PENDING_TTL);
        store.set(CHAT, "https://example.com/first".to_string()).await;
        store.set(CHAT, "https://example.com/second".to_string()).await;

        assert_eq!(
            store.take(CHAT).await.as_deref(),
            Some("https://example.com/second")
        );
        assert_eq!(store.take(CHAT).await, None);
    }

    #[tokio::test]
    async fn chats_do_not_interfere() {
        let store = PendingStore::new(PENDING_TTL);
        store.set(ChatId(1), "https://example.com/a".to_string()).await;
        store.set(ChatId(2), "https://example.com/b".to_string()).await;

        assert_eq!(store.take(ChatId(2)).await.as_deref(), Some("https://example.com/b"));
        assert_eq!(store.take(ChatId(1)).await.as_deref(), Some("https://example.com/a"));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_not_returned() {
        let store = PendingStore::new(Duration::from_secs(60));
        store.set(CHAT, "https://example.com/video".to_string()).await;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.take(CHAT).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_reclaims_only_expired_entries() {
        let store = PendingStore::new(Duration::from_secs(60));
        store.set(ChatId(1), "https://example.com/old".to_string()).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        store.set(ChatId(2), "https://example.com/fresh".to_string()).await;
        tokio::time::advance(Duration::from_secs(30)).await;

        store.sweep().await;

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.take(ChatId(2)).await.as_deref(),
            Some("https://example.com/fresh")
        );
    }
}
