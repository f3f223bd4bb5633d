use crate::domain::EntityStore;
use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

/// Work phases before a long break is granted.
const CYCLES_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer durations must be positive")]
    InvalidDuration,
    #[error("a description is required to log unattributed work time")]
    MissingDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Rest => "Rest",
        }
    }
}

/// What a single tick observed. The caller renders from this instead of
/// poking at engine internals.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    /// Seconds left in the current phase.
    pub remaining: u32,
    /// Fraction of the governing duration consumed, 0.0..=1.0.
    pub progress: f64,
    pub cycles_completed: u32,
    /// Seconds credited to the attributed task on this tick, if a work
    /// phase completed.
    pub committed: Option<u64>,
    /// Set when this tick crossed a phase boundary.
    pub switched_to: Option<Phase>,
}

/// A single active work/rest session.
///
/// Owned by the session that started it and dropped when it retires; all
/// counters are in seconds and advance only through `tick`. Accounting
/// happens strictly at ticks and phase boundaries: partial work is lost
/// only through the explicit `stop` path, never silently.
#[derive(Debug)]
pub struct TimerEngine {
    phase: Phase,
    running: bool,
    paused: bool,
    cycles_completed: u32,
    work_remaining: u32,
    rest_remaining: u32,
    work_duration: u32,
    rest_duration: u32,
    long_break_duration: u32,
    attributed: Option<Uuid>,
    work_seconds_this_phase: u64,
    total_work_seconds: u64,
}

impl TimerEngine {
    /// Start a session. Durations are minutes; any non-positive duration is
    /// rejected before any state exists.
    pub fn configure(
        work_minutes: u32,
        rest_minutes: u32,
        long_break_minutes: u32,
        attributed: Option<Uuid>,
    ) -> Result<Self, TimerError> {
        if work_minutes == 0 || rest_minutes == 0 || long_break_minutes == 0 {
            return Err(TimerError::InvalidDuration);
        }
        let work_duration = work_minutes * 60;
        let rest_duration = rest_minutes * 60;
        let long_break_duration = long_break_minutes * 60;
        Ok(Self {
            phase: Phase::Work,
            running: true,
            paused: false,
            cycles_completed: 0,
            work_remaining: work_duration,
            rest_remaining: rest_duration,
            work_duration,
            rest_duration,
            long_break_duration,
            attributed,
            work_seconds_this_phase: 0,
            total_work_seconds: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn attributed(&self) -> Option<Uuid> {
        self.attributed
    }

    pub fn total_work_seconds(&self) -> u64 {
        self.total_work_seconds
    }

    /// The duration governing the current rest period. Until the long break
    /// finishes, `cycles_completed` stays at the threshold, so this picks
    /// the long-break duration exactly while one is in progress.
    fn rest_span(&self) -> u32 {
        if self.cycles_completed >= CYCLES_PER_LONG_BREAK {
            self.long_break_duration
        } else {
            self.rest_duration
        }
    }

    fn report(&self, committed: Option<u64>, switched_to: Option<Phase>) -> TickReport {
        let (remaining, span) = match self.phase {
            Phase::Work => (self.work_remaining, self.work_duration),
            Phase::Rest => (self.rest_remaining, self.rest_span()),
        };
        let progress = if span == 0 {
            0.0
        } else {
            f64::from(span - remaining) / f64::from(span)
        };
        TickReport {
            phase: self.phase,
            running: self.running,
            paused: self.paused,
            remaining,
            progress,
            cycles_completed: self.cycles_completed,
            committed,
            switched_to,
        }
    }

    /// Advance the session by exactly one second.
    ///
    /// No-op while stopped; while paused, reports the current phase without
    /// any accounting. The tick that brings a phase counter to zero also
    /// performs the boundary work (commit, cycle bump, phase switch) so no
    /// extra second is consumed by the switch itself.
    pub fn tick(&mut self, store: &mut EntityStore) -> TickReport {
        if !self.running || self.paused {
            return self.report(None, None);
        }

        match self.phase {
            Phase::Work => {
                self.work_remaining -= 1;
                self.work_seconds_this_phase += 1;
                self.total_work_seconds += 1;
                if self.work_remaining > 0 {
                    return self.report(None, None);
                }
                let committed = self.commit_phase(store);
                self.cycles_completed += 1;
                self.phase = Phase::Rest;
                self.rest_remaining = self.rest_span();
                self.report(committed, Some(Phase::Rest))
            }
            Phase::Rest => {
                self.rest_remaining -= 1;
                if self.rest_remaining > 0 {
                    return self.report(None, None);
                }
                self.phase = Phase::Work;
                self.work_remaining = self.work_duration;
                if self.cycles_completed >= CYCLES_PER_LONG_BREAK {
                    self.cycles_completed = 0;
                }
                self.report(None, Some(Phase::Work))
            }
        }
    }

    /// Credit the finished work phase to the attributed task and zero the
    /// phase counter. Unattributed seconds stay in `total_work_seconds`
    /// until the session ends.
    fn commit_phase(&mut self, store: &mut EntityStore) -> Option<u64> {
        let seconds = std::mem::take(&mut self.work_seconds_this_phase);
        let id = self.attributed?;
        if seconds == 0 {
            return None;
        }
        if store.credit_time(id, seconds) {
            Some(seconds)
        } else {
            tracing::warn!(seconds, "attributed task vanished, dropping commit");
            None
        }
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.running {
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.running {
            self.paused = !self.paused;
        }
    }

    /// Cancel without saving: partial phase seconds are deliberately
    /// discarded. The end-and-save affordance is `end_early`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// True when ending now would need a free-time description.
    pub fn needs_description(&self) -> bool {
        self.attributed.is_none() && self.total_work_seconds > 0
    }

    /// End the session, keeping what was worked: partial phase seconds go
    /// to the attributed task, or the whole session's work time is logged
    /// as a free-time entry with the supplied description.
    pub fn end_early(
        &mut self,
        store: &mut EntityStore,
        description: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<(), TimerError> {
        if let Some(id) = self.attributed {
            let seconds = std::mem::take(&mut self.work_seconds_this_phase);
            if seconds > 0 && !store.credit_time(id, seconds) {
                tracing::warn!(seconds, "attributed task vanished, dropping commit");
            }
        } else if self.total_work_seconds > 0 {
            let description = description.map(str::trim).unwrap_or("");
            if description.is_empty() {
                return Err(TimerError::MissingDescription);
            }
            store.log_free_time(description.to_string(), self.total_work_seconds, now);
        }
        self.running = false;
        Ok(())
    }
}
