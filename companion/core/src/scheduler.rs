//! Periodic Task Scheduler
//!
//! Replaces free-running timers with an explicit schedule that the owner
//! polls. The scheduler never reads the clock itself: callers pass `now`,
//! so tests can drive hours of simulated time in a single call.
//!
//! ```text
//! Companion::tick()
//!     │
//!     ├─→ scheduler.due(clock.now())
//!     │       └─→ [Firing { NeedsDecay, 2 }, Firing { InactivityCheck, 60 }]
//!     │
//!     └─→ run each firing against the Pet
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of periodic work
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Food and water drop by one
    NeedsDecay,
    /// Compare now against the last activity
    InactivityCheck,
    /// Revert finished animation cues to idle
    CueExpiry,
}

/// A task that is due, with how many intervals elapsed since it last ran
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Firing {
    /// Which task
    pub kind: TaskKind,
    /// Number of whole intervals that elapsed (at least 1)
    pub count: u32,
}

/// One registered periodic task
#[derive(Clone, Debug)]
pub struct PeriodicTask {
    /// Which task
    pub kind: TaskKind,
    /// Time between runs
    pub interval: Duration,
    /// When the task next becomes due
    next_due: Option<DateTime<Utc>>,
}

impl PeriodicTask {
    /// Create a task; it is not scheduled until the scheduler starts
    #[must_use]
    pub fn new(kind: TaskKind, interval: Duration) -> Self {
        Self {
            kind,
            interval,
            next_due: None,
        }
    }

    /// When this task next runs, if scheduled
    #[must_use]
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.next_due
    }

    /// Count elapsed intervals up to `now` and reschedule
    fn poll(&mut self, now: DateTime<Utc>) -> u32 {
        let Some(next_due) = self.next_due else {
            return 0;
        };
        if now < next_due || self.interval <= Duration::zero() {
            return 0;
        }

        let interval_ms = self.interval.num_milliseconds().max(1);
        let overdue_ms = (now - next_due).num_milliseconds();
        let extra = overdue_ms / interval_ms;
        let count = extra + 1;

        self.next_due = count
            .checked_mul(interval_ms)
            .and_then(Duration::try_milliseconds)
            .and_then(|step| next_due.checked_add_signed(step));
        if self.next_due.is_none() {
            tracing::warn!(kind = ?self.kind, "Next run is out of range, task stopped");
        }
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Schedule the first run one interval after `now`
    fn schedule_from(&mut self, now: DateTime<Utc>) {
        self.next_due = now.checked_add_signed(self.interval);
        if self.next_due.is_none() {
            tracing::warn!(
                kind = ?self.kind,
                interval_ms = self.interval.num_milliseconds(),
                "Interval is out of range, task not scheduled"
            );
        }
    }
}

/// Holds the periodic tasks owned by one companion
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    tasks: Vec<PeriodicTask>,
    running: bool,
}

impl Scheduler {
    /// Create an empty, stopped scheduler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task (replacing any existing task of the same kind)
    pub fn register(&mut self, kind: TaskKind, interval: Duration) {
        self.tasks.retain(|t| t.kind != kind);
        self.tasks.push(PeriodicTask::new(kind, interval));
    }

    /// Start the schedule: every task first comes due one interval after `now`
    pub fn start(&mut self, now: DateTime<Utc>) {
        for task in &mut self.tasks {
            task.schedule_from(now);
        }
        self.running = true;
        tracing::debug!(tasks = self.tasks.len(), "Scheduler started");
    }

    /// Stop the schedule; `due` returns nothing until restarted
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("Scheduler stopped");
        }
        self.running = false;
        for task in &mut self.tasks {
            task.next_due = None;
        }
    }

    /// Whether the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Registered tasks
    #[must_use]
    pub fn tasks(&self) -> &[PeriodicTask] {
        &self.tasks
    }

    /// Collect every task that is due at `now`, in registration order
    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<Firing> {
        if !self.running {
            return Vec::new();
        }

        self.tasks
            .iter_mut()
            .filter_map(|task| {
                let count = task.poll(now);
                (count > 0).then_some(Firing {
                    kind: task.kind,
                    count,
                })
            })
            .collect()
    }
}
