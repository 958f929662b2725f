//! Card value records for manaclash.
//!
//! A [`Card`] is an immutable record of everything the combat rules need to
//! know about one played card: its kind, damage/defense/cost numbers, its
//! elemental [`Attribute`], and its special [`Effect`] tag. Card *content*
//! (the static card database, artwork, flavor) lives outside the engine;
//! plays arrive over the wire as fully materialized card values.

mod attribute;
mod card;
mod effect;
mod kind;

pub use attribute::*;
pub use card::*;
pub use effect::*;
pub use kind::*;
