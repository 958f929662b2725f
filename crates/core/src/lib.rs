//! Core type aliases, traits, and constants for manaclash.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the manaclash workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Health, mental power, damage, defense, and mana amounts.
/// All combat arithmetic is integer; derived multipliers floor toward zero.
pub type Points = i16;
/// Seat index around the room (0 = first seat, turn order is seat order).
pub type Position = usize;
/// Monotonic per-room turn counter, incremented when the turn pointer wraps.
pub type TurnNumber = u64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for tests.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> std::str::FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<uuid::Uuid>().map(Self::from)
    }
}

// serde sees the bare UUID; the marker is compile-time only.
impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// ROOM PARAMETERS
// ============================================================================
/// Maximum players seated in one room.
pub const MAX_PLAYERS: usize = 4;
/// Minimum players required to open a room.
pub const MIN_PLAYERS: usize = 2;
/// Starting and maximum health pool.
pub const MAX_HEALTH: Points = 100;
/// Starting and maximum mental power pool. Doubles as the mana pool:
/// card costs and mental damage both drain it.
pub const MAX_MENTAL_POWER: Points = 100;

// ============================================================================
// COMBAT PARAMETERS
// ============================================================================
/// Reflect/bounce chain hops beyond this depth apply normal damage
/// instead of chaining further. Never an error.
pub const MAX_CHAIN_DEPTH: u8 = 6;
/// Seconds a defender has to respond before the attack auto-resolves
/// as if no defense cards were played.
pub const DEFENSE_TIMEOUT: u64 = 20;
/// Seconds a cached attack resolution stays replayable for client retries.
pub const IDEMPOTENCY_TTL: u64 = 120;
/// Magic-kind cards allowed in a single play.
pub const MAX_MAGIC_PER_PLAY: usize = 1;

// ============================================================================
// FIELD MAGIC PARAMETERS
// ============================================================================
/// Turns a freshly activated field magic stays on the board.
pub const FIELD_MAGIC_DURATION: u8 = 3;
/// Pool adjustment applied by an active field magic at each turn start.
pub const FIELD_MAGIC_TICK: Points = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("install signal handler");
        println!();
        log::warn!("interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
