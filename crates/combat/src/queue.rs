use super::ChainKind;
use mcl_cards::Attribute;
use mcl_cards::Card;
use mcl_core::ID;
use mcl_core::Points;
use mcl_core::Unique;
use serde::Deserialize;
use serde::Serialize;
use std::time::Instant;

use crate::PlayerState;

/// Identifier binding a defend-request to its eventual resolution.
///
/// Stable across client retries of the same logical attack, which is what
/// makes idempotent replay possible. Each chain hop gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
impl From<String> for CorrelationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an attack came from.
///
/// Chain state is a tagged variant rather than a soup of optional fields:
/// an attack either originated from a player's declaration or was spawned
/// by a reflect/bounce hop off a parent attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOrigin {
    Root,
    ChainedFrom {
        parent: ID<AttackQueueItem>,
        kind: ChainKind,
        depth: u8,
    },
}

impl AttackOrigin {
    /// Chain depth: 0 at the root, +1 per reflect/bounce hop.
    pub fn depth(&self) -> u8 {
        match self {
            Self::Root => 0,
            Self::ChainedFrom { depth, .. } => *depth,
        }
    }
    /// The chain kind that produced this hop, if any.
    pub fn kind(&self) -> Option<ChainKind> {
        match self {
            Self::Root => None,
            Self::ChainedFrom { kind, .. } => Some(*kind),
        }
    }
}

/// Lifecycle status of an in-flight attack. Resolved items are removed from
/// the queue, never retained; replay goes through the idempotency cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStatus {
    Pending,
    AwaitingDefense,
}

/// One outstanding attack in a room.
#[derive(Debug, Clone)]
pub struct AttackQueueItem {
    pub id: ID<AttackQueueItem>,
    pub correlation: CorrelationId,
    pub attacker: ID<PlayerState>,
    pub target: ID<PlayerState>,
    pub health_damage: Points,
    pub mental_damage: Points,
    pub heal: Points,
    pub cards_used: Vec<Card>,
    pub attribute: Attribute,
    pub origin: AttackOrigin,
    pub status: AttackStatus,
    pub created_at: Instant,
}

impl AttackQueueItem {
    pub fn depth(&self) -> u8 {
        self.origin.depth()
    }
    pub fn chain_kind(&self) -> Option<ChainKind> {
        self.origin.kind()
    }
}

impl Unique for AttackQueueItem {
    fn id(&self) -> ID<AttackQueueItem> {
        self.id
    }
}

/// Registry of in-flight attacks for one room.
///
/// Insertion-ordered; at most a few items are ever live (the root attack
/// plus a nested chain hop), and at most one is AwaitingDefense at a time.
/// Removing the tracked current item clears the tracking pointer.
#[derive(Debug, Default)]
pub struct AttackQueue {
    items: Vec<AttackQueueItem>,
    current: Option<ID<AttackQueueItem>>,
}

impl AttackQueue {
    pub fn enqueue(&mut self, item: AttackQueueItem) {
        log::debug!(
            "[queue] enqueue attack {} ({} -> {}, depth {})",
            item.id,
            item.attacker,
            item.target,
            item.depth(),
        );
        self.items.push(item);
    }
    pub fn get(&self, id: ID<AttackQueueItem>) -> Option<&AttackQueueItem> {
        self.items.iter().find(|i| i.id == id)
    }
    pub fn get_mut(&mut self, id: ID<AttackQueueItem>) -> Option<&mut AttackQueueItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
    pub fn by_correlation(&self, correlation: &CorrelationId) -> Option<&AttackQueueItem> {
        self.items.iter().find(|i| &i.correlation == correlation)
    }
    /// Marks an item AwaitingDefense and tracks it as the current item.
    pub fn await_defense(&mut self, id: ID<AttackQueueItem>) {
        if let Some(item) = self.get_mut(id) {
            item.status = AttackStatus::AwaitingDefense;
            self.current = Some(id);
        }
    }
    /// Removes an item on resolution. Clears the current pointer when the
    /// removed item is the tracked one.
    pub fn remove(&mut self, id: ID<AttackQueueItem>) -> Option<AttackQueueItem> {
        if self.current == Some(id) {
            self.current = None;
        }
        self.items
            .iter()
            .position(|i| i.id == id)
            .map(|pos| self.items.remove(pos))
    }
    /// The item currently awaiting a defense response, if any.
    pub fn awaiting(&self) -> Option<&AttackQueueItem> {
        self.current.and_then(|id| self.get(id))
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
