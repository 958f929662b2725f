use std::time::Duration;
use tokio::time::Instant;

/// Configuration for the defense response window.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub defense: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            defense: Duration::from_secs(mcl_core::DEFENSE_TIMEOUT),
        }
    }
}

/// Tracks the single outstanding defense deadline for a room.
///
/// The room loop selects on this deadline; clearing it is the cancellation.
/// Since the loop owns the timer, a timeout can never race a response.
#[derive(Debug)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn with_defaults() -> Self {
        Self::new(TimerConfig::default())
    }
    pub fn start_defense(&mut self) {
        self.deadline = Some(Instant::now() + self.config.defense);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
    pub fn defense_timeout(&self) -> Duration {
        self.config.defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TimerConfig::default();
        assert_eq!(
            config.defense,
            Duration::from_secs(mcl_core::DEFENSE_TIMEOUT)
        );
    }
    #[test]
    fn timer_starts_cleared() {
        let timer = Timer::with_defaults();
        assert!(timer.deadline().is_none());
        assert!(!timer.expired());
    }
    #[test]
    fn timer_sets_deadline() {
        let mut timer = Timer::with_defaults();
        timer.start_defense();
        assert!(timer.deadline().is_some());
        assert!(!timer.expired());
    }
    #[test]
    fn timer_clears() {
        let mut timer = Timer::with_defaults();
        timer.start_defense();
        timer.clear();
        assert!(timer.deadline().is_none());
    }
}
