use crate::domain::EntityStore;
use chrono::{Duration, NaiveDateTime};

/// Seconds between due-date sweeps.
pub const SCAN_PERIOD_SECS: u32 = 60;

/// How far ahead of a due date a reminder fires. Only these four widths
/// are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderWindow {
    Min5,
    Min10,
    Min30,
    Min60,
}

impl ReminderWindow {
    pub const ALL: [ReminderWindow; 4] = [
        ReminderWindow::Min5,
        ReminderWindow::Min10,
        ReminderWindow::Min30,
        ReminderWindow::Min60,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            ReminderWindow::Min5 => 5,
            ReminderWindow::Min10 => 10,
            ReminderWindow::Min30 => 30,
            ReminderWindow::Min60 => 60,
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            5 => Some(ReminderWindow::Min5),
            10 => Some(ReminderWindow::Min10),
            30 => Some(ReminderWindow::Min30),
            60 => Some(ReminderWindow::Min60),
            _ => None,
        }
    }

    /// The next wider window, wrapping around.
    pub fn cycle(&self) -> Self {
        match self {
            ReminderWindow::Min5 => ReminderWindow::Min10,
            ReminderWindow::Min10 => ReminderWindow::Min30,
            ReminderWindow::Min30 => ReminderWindow::Min60,
            ReminderWindow::Min60 => ReminderWindow::Min5,
        }
    }
}

/// A task whose due date falls inside the reminder window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub due: NaiveDateTime,
}

/// Periodic due-date sweep, driven by the host's one-second ticks rather
/// than its own timer. The scan itself is stateless and idempotent - it
/// never marks tasks as notified; throttling re-display is the UI's job.
#[derive(Debug)]
pub struct ReminderScanner {
    window: ReminderWindow,
    secs_until_scan: u32,
}

impl ReminderScanner {
    pub fn new(window: ReminderWindow) -> Self {
        Self {
            window,
            secs_until_scan: SCAN_PERIOD_SECS,
        }
    }

    pub fn window(&self) -> ReminderWindow {
        self.window
    }

    pub fn set_window(&mut self, window: ReminderWindow) {
        self.window = window;
    }

    /// Count down one second; on period expiry, reset and sweep.
    pub fn on_tick(&mut self, store: &EntityStore, now: NaiveDateTime) -> Vec<Reminder> {
        self.secs_until_scan -= 1;
        if self.secs_until_scan > 0 {
            return Vec::new();
        }
        self.secs_until_scan = SCAN_PERIOD_SECS;
        scan(store, now, self.window)
    }
}

/// All incomplete tasks due within `[now, now + window]`. A completed task
/// is never reported, no matter its due date.
pub fn scan(store: &EntityStore, now: NaiveDateTime, window: ReminderWindow) -> Vec<Reminder> {
    let horizon = now + Duration::minutes(i64::from(window.minutes()));
    store
        .tasks
        .iter()
        .filter(|task| !task.completed && task.due_date >= now && task.due_date <= horizon)
        .map(|task| Reminder {
            title: task.title.clone(),
            due: task.due_date,
        })
        .collect()
}
