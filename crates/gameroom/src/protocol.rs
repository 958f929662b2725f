use super::*;
use mcl_combat::CorrelationId;
use mcl_combat::PlayerState;
use mcl_core::ID;

/// Errors that can occur during protocol operations.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidMessage(String),
    InvalidId(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMessage(s) => write!(f, "invalid message: {}", s),
            Self::InvalidId(s) => write!(f, "invalid id: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Handles the conversion between wire JSON and internal types.
/// Centralizes the protocol layer between events/commands and wire format.
pub struct Protocol;

impl Protocol {
    /// Parses a raw text frame into a typed client message.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::InvalidMessage(e.to_string()))
    }
    /// Lowers a client message into a typed command. Claimed actor ids are
    /// parsed here; whether the claim matches the socket's bound player is
    /// the room's check, not the parser's.
    pub fn command(message: ClientMessage) -> Result<Command, ProtocolError> {
        match message {
            ClientMessage::StartGame => Ok(Command::StartGame),
            ClientMessage::DeclareAttack {
                attacker,
                target,
                cards,
                correlation_id,
            } => Ok(Command::DeclareAttack {
                attacker: Self::id(&attacker)?,
                target: Self::id(&target)?,
                cards,
                correlation: correlation_id.map(CorrelationId::from),
            }),
            ClientMessage::RespondDefense {
                correlation_id,
                defender,
                cards,
            } => Ok(Command::RespondDefense {
                correlation: CorrelationId::from(correlation_id),
                defender: Self::id(&defender)?,
                cards,
            }),
        }
    }
    fn id(s: &str) -> Result<ID<PlayerState>, ProtocolError> {
        s.parse().map_err(|_| ProtocolError::InvalidId(s.to_string()))
    }
    /// Converts an internal event to a wire server message.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::GameStarted { players, first } => ServerMessage::GameStarted {
                players: players.iter().map(|p| p.to_string()).collect(),
                first: first.to_string(),
            },
            Event::TurnStarted { player, turn } => ServerMessage::TurnStarted {
                player: player.to_string(),
                turn: *turn,
            },
            Event::AttackAnnounced {
                correlation,
                attacker,
                target,
                health_damage,
                mental_damage,
                attribute,
                cards,
            } => ServerMessage::AttackAnnounced {
                correlation_id: correlation.to_string(),
                attacker: attacker.to_string(),
                target: target.to_string(),
                health_damage: *health_damage,
                mental_damage: *mental_damage,
                attribute: attribute.to_string(),
                cards: cards.clone(),
            },
            Event::DefendRequest {
                correlation,
                attacker,
                defender,
                health_damage,
                expires_at,
            } => ServerMessage::DefendRequest {
                correlation_id: correlation.to_string(),
                attacker: attacker.to_string(),
                defender: defender.to_string(),
                health_damage: *health_damage,
                expires_at: *expires_at,
            },
            Event::AttackResolved(r) => ServerMessage::resolved(r),
            Event::FieldMagicActivated {
                caster,
                name,
                remaining,
            } => ServerMessage::FieldMagicActivated {
                caster: caster.to_string(),
                name: name.clone(),
                remaining: *remaining,
            },
            Event::FieldMagicExpired { name } => {
                ServerMessage::FieldMagicExpired { name: name.clone() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_malformed_frames() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"deal_cards"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"start_game"}"#).is_ok());
    }
    #[test]
    fn command_parses_the_claimed_actor() {
        let actor = ID::<PlayerState>::default();
        let target = ID::<PlayerState>::default();
        let msg = ClientMessage::DeclareAttack {
            attacker: actor.to_string(),
            target: target.to_string(),
            cards: vec![],
            correlation_id: Some("retry-1".to_string()),
        };
        match Protocol::command(msg).unwrap() {
            Command::DeclareAttack {
                attacker,
                target: parsed,
                correlation,
                ..
            } => {
                assert_eq!(attacker, actor);
                assert_eq!(parsed, target);
                assert_eq!(correlation, Some(CorrelationId::from("retry-1")));
            }
            _ => panic!("wrong command"),
        }
    }
    #[test]
    fn command_rejects_malformed_ids() {
        let msg = ClientMessage::DeclareAttack {
            attacker: ID::<PlayerState>::default().to_string(),
            target: "not-a-uuid".to_string(),
            cards: vec![],
            correlation_id: None,
        };
        assert!(matches!(
            Protocol::command(msg),
            Err(ProtocolError::InvalidId(_))
        ));
    }
    #[test]
    fn encode_covers_every_event() {
        let event = Event::TurnStarted {
            player: ID::default(),
            turn: 3,
        };
        let json = Protocol::encode(&event).to_json();
        assert!(json.contains(r#""type":"turn_started""#));
        assert!(json.contains(r#""turn":3"#));
    }
}
