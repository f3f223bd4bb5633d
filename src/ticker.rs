use std::time::{Duration, Instant};

/// Event-poll timeout in milliseconds. Shorter than the engine period so
/// keys stay responsive between one-second steps.
pub const POLL_MS: u64 = 200;

/// Seconds per engine step.
pub const STEP_SECS: u64 = 1;

/// Get the event-poll timeout
pub fn poll_duration() -> Duration {
    Duration::from_millis(POLL_MS)
}

/// Converts wall-clock time into a whole number of fixed steps, so the
/// timer engine's `tick()` stays a pure function the host calls once per
/// elapsed second (and tests call directly, with no real time involved).
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Instant::now(),
        }
    }

    /// A ticker stepping once per second.
    pub fn seconds() -> Self {
        Self::new(Duration::from_secs(STEP_SECS))
    }

    /// Number of whole periods elapsed since the last call. The remainder
    /// carries over, so slow polls never lose seconds.
    pub fn due_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.last.elapsed() >= self.period {
            self.last += self.period;
            steps += 1;
        }
        steps
    }
}
