//! Reflect/bounce detection and debuff bookkeeping.

use mcl_cards::Card;
use mcl_cards::Debuff;
use mcl_cards::Effect;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashSet;

/// How an attack was redirected onto its current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// Attack returned to its sender.
    Reflect,
    /// Attack redirected to a randomly chosen alive player.
    Bounce,
}

impl std::fmt::Display for ChainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reflect => write!(f, "reflect"),
            Self::Bounce => write!(f, "bounce"),
        }
    }
}

/// Scans a defense play in hand order for a chain effect; first match wins.
///
/// A play combining a Reflect and a Bounce card resolves by whichever sorts
/// first in hand order. That is an arbitrary tie-break for an edge case,
/// not a designed combo.
pub fn find_special(defense: &[Card]) -> Option<(ChainKind, &Card)> {
    defense.iter().find_map(|card| match card.effect {
        Effect::Reflect => Some((ChainKind::Reflect, card)),
        Effect::Bounce => Some((ChainKind::Bounce, card)),
        _ => None,
    })
}

/// Collects debuff tags from an attack play, in hand order with duplicates.
pub fn extract_debuffs(attack: &[Card]) -> Vec<Debuff> {
    attack.iter().filter_map(|c| c.effect.debuff()).collect()
}

/// Union-merges incoming debuffs into a player's set, returning only the
/// tags that were newly applied. Re-applying a present debuff is a no-op.
pub fn merge_debuffs(existing: &mut HashSet<Debuff>, incoming: Vec<Debuff>) -> Vec<Debuff> {
    incoming
        .into_iter()
        .filter(|debuff| existing.insert(*debuff))
        .collect()
}
