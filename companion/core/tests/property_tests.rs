//! Property tests for the pet model.
//!
//! Every operation is total, so these check the arithmetic over the whole
//! stat space rather than a handful of hand-picked values.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use lion_core::{
    derive, Activity, GrowthStage, InactivityLevel, InactivityThresholds, Mood, Pet, PetStats,
    Stat,
};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn arb_stats() -> impl Strategy<Value = PetStats> {
    (
        0u8..=100,
        0u8..=100,
        0u8..=100,
        0u8..=100,
        0u8..=100,
        0u8..=100,
    )
        .prop_map(|(faith, joy, love, peace, food, water)| {
            PetStats::new(faith, joy, love, peace, food, water)
        })
}

fn arb_activity() -> impl Strategy<Value = Activity> {
    prop::sample::select(Activity::ALL.to_vec())
}

// ── Activities ───────────────────────────────────────────────

proptest! {
    /// Every stat after an activity equals min(100, prior + delta).
    #[test]
    fn activity_adds_clamped_deltas(stats in arb_stats(), activity in arb_activity()) {
        let mut pet = Pet::new("Leo", stats, 0, t0());
        pet.apply_activity(activity, t0());

        for stat in Stat::ALL {
            let prior = u16::from(stats.get(stat));
            let delta = u16::from(activity.delta_for(stat));
            let expected = (prior + delta).min(100);
            prop_assert_eq!(u16::from(pet.stats().get(stat)), expected);
        }
    }

    /// Any sequence of activities keeps every stat in range.
    #[test]
    fn activities_stay_in_range(
        stats in arb_stats(),
        activities in prop::collection::vec(arb_activity(), 0..50),
    ) {
        let mut pet = Pet::new("Leo", stats, 0, t0());
        for activity in activities {
            pet.apply_activity(activity, t0());
        }
        for stat in Stat::ALL {
            prop_assert!(pet.stats().get(stat) <= 100);
        }
    }

    /// Completing a devotional: streak +1, food +15+25, water +10+20, clamped.
    #[test]
    fn devotional_bonuses(stats in arb_stats(), streak in 0u32..1000) {
        let mut pet = Pet::new("Leo", stats, streak, t0());
        pet.complete_devotional(t0());

        prop_assert_eq!(pet.streak(), streak + 1);
        prop_assert_eq!(pet.stats().food(), (u16::from(stats.food()) + 40).min(100) as u8);
        prop_assert_eq!(pet.stats().water(), (u16::from(stats.water()) + 30).min(100) as u8);
        prop_assert_eq!(pet.stats().faith(), (u16::from(stats.faith()) + 8).min(100) as u8);
        prop_assert_eq!(pet.stats().joy(), (u16::from(stats.joy()) + 6).min(100) as u8);
    }

    /// Needs decay never goes below zero and leaves spirit stats alone.
    #[test]
    fn needs_decay_floors(stats in arb_stats(), ticks in 0usize..300) {
        let mut pet = Pet::new("Leo", stats, 0, t0());
        for _ in 0..ticks {
            pet.tick_needs(t0());
        }
        let steps = u8::try_from(ticks.min(255)).unwrap();
        prop_assert_eq!(pet.stats().food(), stats.food().saturating_sub(steps));
        prop_assert_eq!(pet.stats().water(), stats.water().saturating_sub(steps));
        prop_assert_eq!(pet.stats().faith(), stats.faith());
        prop_assert_eq!(pet.stats().peace(), stats.peace());
    }
}

// ── Derivation ───────────────────────────────────────────────

proptest! {
    /// Recomputing without a mutation changes nothing.
    #[test]
    fn recompute_is_idempotent(stats in arb_stats(), activity in arb_activity()) {
        let mut pet = Pet::new("Leo", stats, 0, t0());
        pet.apply_activity(activity, t0());
        let first = pet.snapshot();

        let change = pet.recompute_derived(t0());
        prop_assert!(change.is_empty());
        prop_assert_eq!(pet.snapshot(), first);
    }

    /// Loneliness can only make the lion sadder.
    #[test]
    fn inactivity_never_lifts_mood(stats in arb_stats(), idle_minutes in 0i64..(72 * 60)) {
        let level = InactivityLevel::classify(
            Duration::minutes(idle_minutes),
            &InactivityThresholds::default(),
        );
        let derived = derive(&stats, level);
        prop_assert!(derived.mood <= Mood::from_stats(&stats));
        if let Some(ceiling) = level.mood_ceiling() {
            prop_assert!(derived.mood <= ceiling);
        }
    }

    /// Growth stage depends on faith alone.
    #[test]
    fn growth_follows_faith(stats in arb_stats(), level in prop::sample::select(vec![
        InactivityLevel::Active,
        InactivityLevel::Lonely,
        InactivityLevel::Abandoned,
    ])) {
        prop_assert_eq!(derive(&stats, level).growth, GrowthStage::from_faith(stats.faith()));
    }
}

// ── Fixed examples ───────────────────────────────────────────

#[test]
fn growth_boundaries_are_exact() {
    assert_eq!(GrowthStage::from_faith(19), GrowthStage::Newborn);
    assert_eq!(GrowthStage::from_faith(20), GrowthStage::Playful);
    assert_eq!(GrowthStage::from_faith(79), GrowthStage::Flourishing);
    assert_eq!(GrowthStage::from_faith(80), GrowthStage::Mature);
}

#[test]
fn mood_threshold_is_strict() {
    assert_eq!(Mood::from_health(85.0), Mood::Happy);
    assert_eq!(Mood::from_health(85.1), Mood::VeryHappy);
}

#[test]
fn needs_floor_at_zero() {
    let mut pet = Pet::new("Leo", PetStats::new(50, 50, 50, 50, 0, 0), 0, t0());
    pet.tick_needs(t0());
    assert_eq!(pet.stats().food(), 0);
    assert_eq!(pet.stats().water(), 0);
}

#[test]
fn pray_scenario_reaches_mature() {
    let mut pet = Pet::new("Leo", PetStats::new(75, 80, 85, 70, 60, 50), 3, t0());
    assert_eq!(pet.growth(), GrowthStage::Flourishing);

    pet.apply_activity(Activity::Pray, t0());

    assert_eq!(*pet.stats(), PetStats::new(85, 80, 85, 78, 60, 50));
    assert_eq!(pet.growth(), GrowthStage::Mature);
}

#[test]
fn devotional_from_streak_three() {
    let mut pet = Pet::new("Leo", PetStats::default(), 3, t0());
    pet.complete_devotional(t0());
    assert_eq!(pet.streak(), 4);
    assert_eq!(pet.stats().food(), 100);
    assert_eq!(pet.stats().water(), 80);
}
