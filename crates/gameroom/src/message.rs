use super::*;
use mcl_cards::Card;
use mcl_cards::Debuff;
use mcl_combat::ChainKind;
use mcl_core::Points;
use mcl_core::TurnNumber;
use serde::Deserialize;
use serde::Serialize;

/// Messages sent from client to server over WebSocket.
///
/// The actor id in the payload must match the player the socket was bound
/// to at connect time; the room rejects any frame claiming someone else.
/// Cards arrive as full card values; deck legality is out of scope here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Begin play once everyone is connected.
    StartGame,
    /// Declare an attack (or a lone field magic / heal play) on `target`.
    DeclareAttack {
        attacker: String,
        target: String,
        cards: Vec<Card>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },
    /// Answer the outstanding defend-request. An empty `cards` list is an
    /// explicit "no defense".
    RespondDefense {
        correlation_id: String,
        defender: String,
        cards: Vec<Card>,
    },
}

/// Messages sent from server to client over WebSocket.
/// Every combat event carries the correlation id of the attack it belongs
/// to, so clients can associate defend-requests with their resolutions and
/// drop stale frames after a reconnect.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Initial connection confirmation with the bound player id.
    Connected { room: String, player: String },
    /// A command was refused. Unicast to the offender only.
    Rejected { reason: String },
    /// Play began.
    GameStarted { players: Vec<String>, first: String },
    /// A new turn began.
    TurnStarted { player: String, turn: TurnNumber },
    /// An attack was declared and enqueued.
    AttackAnnounced {
        correlation_id: String,
        attacker: String,
        target: String,
        health_damage: Points,
        mental_damage: Points,
        attribute: String,
        cards: Vec<Card>,
    },
    /// You must respond before `expires_at` (unix ms) or take full damage.
    DefendRequest {
        correlation_id: String,
        attacker: String,
        defender: String,
        health_damage: Points,
        expires_at: u64,
    },
    /// An attack hop resolved, terminally or as a reflect/bounce hand-off.
    AttackResolved {
        correlation_id: String,
        attacker: String,
        target: String,
        health_damage_applied: Points,
        mental_damage_applied: Points,
        heal_applied: Points,
        health_before: Points,
        health_after: Points,
        mana_before: Points,
        mana_after: Points,
        eliminated: bool,
        defense_cards: Vec<Card>,
        applied_debuffs: Vec<Debuff>,
        next_player: String,
        turn: TurnNumber,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain: Option<ChainKind>,
    },
    /// A field magic took hold of the room.
    FieldMagicActivated {
        caster: String,
        name: String,
        remaining: u8,
    },
    /// The active field magic ran out of turns.
    FieldMagicExpired { name: String },
}

impl ServerMessage {
    pub fn connected(room: &str, player: &str) -> Self {
        Self::Connected {
            room: room.to_string(),
            player: player.to_string(),
        }
    }
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::Rejected {
            reason: reason.to_string(),
        }
    }
    pub fn resolved(r: &Resolution) -> Self {
        Self::AttackResolved {
            correlation_id: r.correlation.to_string(),
            attacker: r.attacker.to_string(),
            target: r.target.to_string(),
            health_damage_applied: r.health_damage_applied,
            mental_damage_applied: r.mental_damage_applied,
            heal_applied: r.heal_applied,
            health_before: r.health_before,
            health_after: r.health_after,
            mana_before: r.mana_before,
            mana_after: r.mana_after,
            eliminated: r.eliminated,
            defense_cards: r.defense_cards.clone(),
            applied_debuffs: r.applied_debuffs.clone(),
            next_player: r.next_player.to_string(),
            turn: r.turn,
            chain: r.chain,
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
