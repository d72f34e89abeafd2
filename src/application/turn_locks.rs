//! Per-session turn locks.
//!
//! A conversation handles one inbound message at a time. A turn holds its
//! session's lock from load until save, so a second message for the same
//! session waits instead of racing it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

type LockMap = HashMap<SessionId, Arc<AsyncMutex<()>>>;

/// Lock registry shared by every clone of the conversation service.
#[derive(Debug, Clone, Default)]
pub struct TurnLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl TurnLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn holds `id`, then holds it until the guard drops.
    pub async fn acquire(&self, id: SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.registry();
            // Entries only the registry references are neither held nor awaited.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of sessions with a turn running or waiting.
    pub fn active_sessions(&self) -> usize {
        self.registry()
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }

    fn registry(&self) -> MutexGuard<'_, LockMap> {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn second_turn_waits_for_the_first() {
        let locks = TurnLocks::new();
        let id = SessionId::new();

        let first = locks.acquire(id).await;
        let waiting = tokio::time::timeout(Duration::from_millis(20), locks.acquire(id)).await;
        assert!(waiting.is_err());

        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(id)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn different_sessions_do_not_block_each_other() {
        let locks = TurnLocks::new();

        let _a = locks.acquire(SessionId::new()).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(SessionId::new())).await;

        assert!(b.is_ok());
        assert_eq!(locks.active_sessions(), 2);
    }

    #[tokio::test]
    async fn released_locks_are_forgotten() {
        let locks = TurnLocks::new();
        drop(locks.acquire(SessionId::new()).await);
        drop(locks.acquire(SessionId::new()).await);

        assert_eq!(locks.active_sessions(), 0);
        let _held = locks.acquire(SessionId::new()).await;
        assert_eq!(locks.registry().len(), 1);
    }
}
