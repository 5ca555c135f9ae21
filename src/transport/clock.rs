use std::time::{Duration, Instant};

/// Elapsed-position bookkeeping for the audio thread.
///
/// Keeps a start timestamp plus the time accumulated across pauses, the way
/// a wall clock cannot: pausing freezes the position, seeking rewrites it.
#[derive(Debug, Clone, Copy)]
pub struct PositionClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Default for PositionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionClock {
    pub fn new() -> Self {
        Self {
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begin (or resume) advancing from the current position.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Freeze the position.
    pub fn pause(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    /// Rewrite the position, preserving the running/paused state.
    pub fn set(&mut self, position: Duration, now: Instant) {
        let running = self.started_at.is_some();
        self.accumulated = position;
        self.started_at = if running { Some(now) } else { None };
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + now.saturating_duration_since(started),
            None => self.accumulated,
        }
    }
}
