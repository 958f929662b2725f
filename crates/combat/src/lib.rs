//! Pure combat rules for manaclash.
//!
//! Everything in this crate is synchronous and side-effect free with respect
//! to the outside world: given cards and player pools, it computes damage,
//! detects chain effects, validates plays, and tracks in-flight attacks. The
//! async orchestration that feeds it lives in `mcl-gameroom`.
//!
//! ## Modules
//!
//! - [`damage`] — damage/defense/mana arithmetic and the attribute matchup
//! - [`effect`] — reflect/bounce detection and debuff extraction/merging
//! - [`queue`] — the registry of in-flight attacks and their chain lineage
//! - [`validate`] — card-combination legality for a play
//! - `player` — per-player pools with clamped mutation
//! - `field` — room-wide duration-limited field magic
//! - `error` — the structured rejection taxonomy

pub mod damage;
pub mod effect;
pub mod validate;

mod error;
mod field;
mod player;
mod queue;

pub use effect::ChainKind;
pub use error::*;
pub use field::*;
pub use player::*;
pub use queue::*;
