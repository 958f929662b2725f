use super::Event;
use mcl_combat::CorrelationId;
use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

/// TTL-bounded map from correlation id to its resolution event.
///
/// A retransmitted declare with a known correlation id replays the cached
/// event instead of re-executing combat, so client retries cannot deal
/// double damage. Stale entries are pruned on insert.
#[derive(Debug)]
pub struct IdempotencyCache {
    entries: HashMap<CorrelationId, (Event, Instant)>,
    ttl: Duration,
}

impl Default for IdempotencyCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(mcl_core::IDEMPOTENCY_TTL))
    }
}

impl IdempotencyCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }
    /// Records the resolution for a correlation id, pruning expired entries.
    pub fn store(&mut self, correlation: CorrelationId, event: Event) {
        let now = Instant::now();
        self.entries
            .retain(|_, (_, stored)| now.duration_since(*stored) < self.ttl);
        self.entries.insert(correlation, (event, now));
    }
    /// Returns the cached resolution if present and not expired.
    pub fn replay(&self, correlation: &CorrelationId) -> Option<&Event> {
        self.entries
            .get(correlation)
            .filter(|(_, stored)| stored.elapsed() < self.ttl)
            .map(|(event, _)| event)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcl_core::ID;

    fn event() -> Event {
        Event::TurnStarted {
            player: ID::default(),
            turn: 1,
        }
    }

    #[test]
    fn replays_stored_event() {
        let mut cache = IdempotencyCache::default();
        let correlation = CorrelationId::from("abc");
        let stored = event();
        cache.store(correlation.clone(), stored.clone());
        assert_eq!(cache.replay(&correlation), Some(&stored));
        assert_eq!(cache.replay(&CorrelationId::from("xyz")), None);
    }
    #[test]
    fn expires_after_ttl() {
        let mut cache = IdempotencyCache::new(Duration::from_millis(1));
        let correlation = CorrelationId::from("abc");
        cache.store(correlation.clone(), event());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.replay(&correlation), None);
    }
    #[test]
    fn prunes_stale_entries_on_store() {
        let mut cache = IdempotencyCache::new(Duration::from_millis(1));
        cache.store(CorrelationId::from("old"), event());
        std::thread::sleep(Duration::from_millis(5));
        cache.store(CorrelationId::from("new"), event());
        assert_eq!(cache.len(), 1);
    }
}
