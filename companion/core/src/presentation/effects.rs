//! Cosmetic Timers
//!
//! Blinking and sparkles. Both are advanced with `update(delta)` from the
//! surface's frame loop and draw randomness from a seedable RNG so tests
//! are deterministic.

use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How long the eyes stay closed
pub const BLINK_CLOSED: Duration = Duration::from_millis(150);
/// Shortest time between blinks
pub const BLINK_MIN_OPEN: Duration = Duration::from_millis(3_000);
/// Longest time between blinks
pub const BLINK_MAX_OPEN: Duration = Duration::from_millis(5_000);

/// Time between sparkle spawns
pub const SPARKLE_INTERVAL: Duration = Duration::from_millis(300);
/// How long a sparkle lives
pub const SPARKLE_LIFETIME: Duration = Duration::from_millis(1_000);
/// Most sparkles on screen at once
pub const MAX_SPARKLES: usize = 5;

/// Eye state driven by elapsed time
#[derive(Debug)]
pub struct BlinkTimer {
    rng: StdRng,
    closed: bool,
    remaining: Duration,
}

impl Default for BlinkTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkTimer {
    /// Timer seeded from the OS
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic timer for tests
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let remaining = Self::open_interval(&mut rng);
        Self {
            rng,
            closed: false,
            remaining,
        }
    }

    fn open_interval(rng: &mut StdRng) -> Duration {
        rng.gen_range(BLINK_MIN_OPEN..=BLINK_MAX_OPEN)
    }

    /// Advance by `delta`. Returns whether the eyes changed state.
    pub fn update(&mut self, mut delta: Duration) -> bool {
        let was_closed = self.closed;
        while delta >= self.remaining {
            delta -= self.remaining;
            self.closed = !self.closed;
            self.remaining = if self.closed {
                BLINK_CLOSED
            } else {
                Self::open_interval(&mut self.rng)
            };
        }
        self.remaining -= delta;
        was_closed != self.closed
    }

    /// Whether the eyes are shut
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Time until the next open/close
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

/// One sparkle, positioned in percent of the pet area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// Unique id within the field
    pub id: u64,
    /// Horizontal position, 0-100 %
    pub x: f32,
    /// Vertical position, 0-100 %
    pub y: f32,
    /// Time since spawn
    pub age: Duration,
}

/// Sparkles around a joyful or celebrating lion
#[derive(Debug)]
pub struct SparkleField {
    rng: StdRng,
    sparkles: VecDeque<Sparkle>,
    since_spawn: Duration,
    next_id: u64,
}

impl Default for SparkleField {
    fn default() -> Self {
        Self::new()
    }
}

impl SparkleField {
    /// Field seeded from the OS
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic field for tests
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            sparkles: VecDeque::with_capacity(MAX_SPARKLES),
            since_spawn: Duration::ZERO,
            next_id: 0,
        }
    }

    /// Advance by `delta`. While `active` a sparkle spawns every 300 ms;
    /// when inactive the field is emptied.
    pub fn update(&mut self, delta: Duration, active: bool) {
        if !active {
            self.clear();
            return;
        }

        for sparkle in &mut self.sparkles {
            sparkle.age += delta;
        }

        self.since_spawn += delta;
        let due = self.since_spawn.as_nanos() / SPARKLE_INTERVAL.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        let remainder = self.since_spawn.saturating_sub(SPARKLE_INTERVAL * due);
        self.since_spawn = remainder;

        // After a long gap only the newest spawns could still be on screen
        let newest = due.min(MAX_SPARKLES as u32);
        for back in (0..newest).rev() {
            self.spawn(remainder + SPARKLE_INTERVAL * back);
        }

        self.sparkles.retain(|s| s.age < SPARKLE_LIFETIME);
    }

    fn spawn(&mut self, age: Duration) {
        if self.sparkles.len() >= MAX_SPARKLES {
            self.sparkles.pop_front();
        }
        let sparkle = Sparkle {
            id: self.next_id,
            x: self.rng.gen_range(0.0..100.0),
            y: self.rng.gen_range(0.0..100.0),
            age,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.sparkles.push_back(sparkle);
    }

    /// Remove every sparkle and reset the spawn timer
    pub fn clear(&mut self) {
        self.sparkles.clear();
        self.since_spawn = Duration::ZERO;
    }

    /// Live sparkles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sparkle> {
        self.sparkles.iter()
    }

    /// Number of live sparkles
    #[must_use]
    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    /// Whether there are no sparkles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }
}
