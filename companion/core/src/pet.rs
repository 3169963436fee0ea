//! Pet State Model
//!
//! [`Pet`] is the single owner of the lion's state. Surfaces never write
//! its fields; they go through the operations below (usually via
//! [`crate::Companion`]) and read back a [`PetSnapshot`].
//!
//! Every operation follows the same order: mutate the stats first, then
//! run [`Pet::recompute_derived`], so mood and growth are always computed
//! from the post-mutation stats.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, DEVOTIONAL_FOOD_BONUS, DEVOTIONAL_WATER_BONUS};
use crate::animation::{
    ActiveCue, AnimationCue, BOUNCE_DURATION_MS, DEVOTIONAL_CELEBRATION_MS,
    GROWTH_CELEBRATION_MS, PLAY_DURATION_MS,
};
use crate::growth::GrowthStage;
use crate::mood::{InactivityLevel, InactivityThresholds, Mood};
use crate::stats::{PetStats, Stat};

/// Values that are computed from the stats, never stored independently
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    /// Effective mood
    pub mood: Mood,
    /// Growth stage
    pub growth: GrowthStage,
}

/// Pure derivation of mood and growth stage
#[must_use]
pub fn derive(stats: &PetStats, inactivity: InactivityLevel) -> Derived {
    Derived {
        mood: Mood::resolve(stats, inactivity),
        growth: GrowthStage::from_faith(stats.faith()),
    }
}

/// What changed during a recompute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivedChange {
    /// `(old, new)` if the mood changed
    pub mood: Option<(Mood, Mood)>,
    /// `(old, new)` if the growth stage changed
    pub growth: Option<(GrowthStage, GrowthStage)>,
    /// Whether a growth celebration was triggered
    pub celebrated: bool,
}

impl DerivedChange {
    /// Whether nothing changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.growth.is_none()
    }
}

/// Everything a surface may read about the pet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSnapshot {
    /// Pet name
    pub name: String,
    /// Current stats
    pub stats: PetStats,
    /// Effective mood
    pub mood: Mood,
    /// Growth stage
    pub growth: GrowthStage,
    /// Devotional streak
    pub streak: u32,
    /// Animation cue currently showing
    pub animation: AnimationCue,
    /// How long the pet has been left alone
    pub inactivity: InactivityLevel,
    /// When the last activity happened
    pub last_activity: DateTime<Utc>,
}

/// The lion
#[derive(Clone, Debug)]
pub struct Pet {
    name: String,
    stats: PetStats,
    streak: u32,
    derived: Derived,
    inactivity: InactivityLevel,
    thresholds: InactivityThresholds,
    last_activity: DateTime<Utc>,
    cue: ActiveCue,
}

impl Pet {
    /// Create a pet. Mood and growth are derived from `stats` immediately,
    /// without a celebration.
    #[must_use]
    pub fn new(name: impl Into<String>, stats: PetStats, streak: u32, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            stats,
            streak,
            derived: derive(&stats, InactivityLevel::Active),
            inactivity: InactivityLevel::Active,
            thresholds: InactivityThresholds::default(),
            last_activity: now,
            cue: ActiveCue::default(),
        }
    }

    /// Use custom inactivity thresholds
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: InactivityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Apply an activity's stat deltas, bounce, and recompute
    pub fn apply_activity(&mut self, activity: Activity, now: DateTime<Utc>) -> DerivedChange {
        self.add_deltas(activity);
        self.touch(now);
        self.cue.trigger(
            AnimationCue::Bounce,
            Duration::milliseconds(BOUNCE_DURATION_MS),
            now,
        );
        tracing::debug!(activity = %activity, faith = self.stats.faith(), "Activity applied");
        self.recompute_derived(now)
    }

    /// Complete a devotional reading: a `read` activity plus bonus food and
    /// water, one more day on the streak, and a celebration
    pub fn complete_devotional(&mut self, now: DateTime<Utc>) -> DerivedChange {
        self.add_deltas(Activity::Read);
        self.stats.add(Stat::Food, DEVOTIONAL_FOOD_BONUS);
        self.stats.add(Stat::Water, DEVOTIONAL_WATER_BONUS);
        self.streak = self.streak.saturating_add(1);
        self.touch(now);
        self.cue.trigger(
            AnimationCue::Celebrate,
            Duration::milliseconds(DEVOTIONAL_CELEBRATION_MS),
            now,
        );
        tracing::info!(streak = self.streak, "Devotional completed");
        self.recompute_derived(now)
    }

    /// Hunger and thirst: food and water drop by one, floored at zero
    pub fn tick_needs(&mut self, now: DateTime<Utc>) -> DerivedChange {
        for stat in Stat::ALL.into_iter().filter(|stat| stat.is_need()) {
            self.stats.sub(stat, 1);
        }
        self.recompute_derived(now)
    }

    /// Re-evaluate loneliness from the time since the last activity
    pub fn tick_inactivity(&mut self, now: DateTime<Utc>) -> DerivedChange {
        let idle = now - self.last_activity;
        let level = InactivityLevel::classify(idle, &self.thresholds);
        if level != self.inactivity {
            tracing::info!(
                from = ?self.inactivity,
                to = ?level,
                idle_hours = idle.num_hours(),
                "Inactivity level changed"
            );
            self.inactivity = level;
        }
        self.recompute_derived(now)
    }

    /// Recompute mood and growth from the current stats. A growth change to
    /// any stage but newborn triggers a celebration.
    pub fn recompute_derived(&mut self, now: DateTime<Utc>) -> DerivedChange {
        let next = derive(&self.stats, self.inactivity);
        let prev = std::mem::replace(&mut self.derived, next);

        let mut change = DerivedChange::default();
        if prev.mood != next.mood {
            change.mood = Some((prev.mood, next.mood));
        }
        if prev.growth != next.growth {
            change.growth = Some((prev.growth, next.growth));
            tracing::info!(from = %prev.growth, to = %next.growth, "Growth stage changed");
            if next.growth.celebrates_arrival() {
                change.celebrated = self.cue.trigger(
                    AnimationCue::Celebrate,
                    Duration::milliseconds(GROWTH_CELEBRATION_MS),
                    now,
                );
            }
        }
        change
    }

    /// The lion was clicked: play if it is idle
    pub fn play(&mut self, now: DateTime<Utc>) -> bool {
        if !self.cue.is_idle() {
            return false;
        }
        self.cue.trigger(
            AnimationCue::Play,
            Duration::milliseconds(PLAY_DURATION_MS),
            now,
        )
    }

    /// Revert a finished cue to idle
    pub fn expire_cue(&mut self, now: DateTime<Utc>) -> bool {
        self.cue.expire(now)
    }

    fn add_deltas(&mut self, activity: Activity) {
        for &(stat, delta) in activity.deltas() {
            self.stats.add(stat, delta);
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
        self.inactivity = InactivityLevel::Active;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Pet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current stats
    #[must_use]
    pub fn stats(&self) -> &PetStats {
        &self.stats
    }

    /// Effective mood
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.derived.mood
    }

    /// Growth stage
    #[must_use]
    pub fn growth(&self) -> GrowthStage {
        self.derived.growth
    }

    /// Devotional streak
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Animation cue currently showing
    #[must_use]
    pub fn animation(&self) -> AnimationCue {
        self.cue.cue
    }

    /// Full cue state including the deadline
    #[must_use]
    pub fn active_cue(&self) -> ActiveCue {
        self.cue
    }

    /// Inactivity level
    #[must_use]
    pub fn inactivity(&self) -> InactivityLevel {
        self.inactivity
    }

    /// When the last activity happened
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Read-only copy of everything a surface needs
    #[must_use]
    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            name: self.name.clone(),
            stats: self.stats,
            mood: self.derived.mood,
            growth: self.derived.growth,
            streak: self.streak,
            animation: self.cue.cue,
            inactivity: self.inactivity,
            last_activity: self.last_activity,
        }
    }
}
