//! Companion flow tests
//!
//! Drive a Companion through realistic sessions with a manual clock and
//! check what a surface would see on the message channel.

use std::io::Write;

use chrono::{DateTime, Duration};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;
use tokio_test::assert_ok;

use lion_core::{
    load_config_from_path, AnimationCue, Companion, CompanionMessage, GrowthStage,
    InactivityLevel, LionConfig, ManualClock, Mood, PetStats, SurfaceEvent, SurfaceType,
};

fn clock() -> ManualClock {
    ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
}

fn companion_with(
    config: &LionConfig,
) -> (
    Companion<ManualClock>,
    ManualClock,
    mpsc::Receiver<CompanionMessage>,
) {
    let clock = clock();
    let (tx, rx) = mpsc::channel(1024);
    let mut companion = Companion::new(config, clock.clone(), tx);
    companion.start();
    (companion, clock, rx)
}

fn drain(rx: &mut mpsc::Receiver<CompanionMessage>) -> Vec<CompanionMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Step the clock in fixed increments, ticking after each one
async fn run_for(
    companion: &mut Companion<ManualClock>,
    clock: &ManualClock,
    total: Duration,
    step: Duration,
) {
    let mut elapsed = Duration::zero();
    while elapsed < total {
        clock.advance(step);
        elapsed = elapsed + step;
        assert_ok!(companion.tick().await);
    }
}

// =============================================================================
// Time-driven behaviour
// =============================================================================

#[tokio::test]
async fn test_needs_decay_once_per_thirty_seconds() {
    let (mut companion, clock, _rx) = companion_with(&LionConfig::default());

    run_for(&mut companion, &clock, Duration::seconds(29), Duration::seconds(1)).await;
    assert_eq!(companion.pet().stats().food(), 60);

    run_for(&mut companion, &clock, Duration::seconds(1), Duration::seconds(1)).await;
    assert_eq!(companion.pet().stats().food(), 59);
    assert_eq!(companion.pet().stats().water(), 49);

    run_for(&mut companion, &clock, Duration::minutes(5), Duration::seconds(1)).await;
    // 5m30s total: 11 decay steps
    assert_eq!(companion.pet().stats().food(), 49);
}

#[tokio::test]
async fn test_long_absence_catches_up_in_one_tick() {
    let (mut companion, clock, _rx) = companion_with(&LionConfig::default());

    clock.advance(Duration::minutes(10));
    assert_ok!(companion.tick().await);

    // 20 missed intervals
    assert_eq!(companion.pet().stats().food(), 40);
    assert_eq!(companion.pet().stats().water(), 30);
}

#[tokio::test]
async fn test_lonely_then_abandoned_then_comforted() {
    let mut config = LionConfig::default();
    config.initial_stats = PetStats::new(100, 100, 100, 100, 100, 100);
    let (mut companion, clock, mut rx) = companion_with(&config);
    assert_eq!(companion.pet().mood(), Mood::VeryHappy);

    clock.advance(Duration::hours(12) + Duration::seconds(1));
    assert_ok!(companion.tick().await);
    assert_eq!(companion.pet().inactivity(), InactivityLevel::Lonely);
    assert_eq!(companion.pet().mood(), Mood::Sad);

    let msgs = drain(&mut rx);
    assert!(msgs.iter().any(|m| matches!(
        m,
        CompanionMessage::MoodChanged { to: Mood::Sad, message, .. } if message == "Leo misses you... 😔"
    )));
    assert!(msgs.contains(&CompanionMessage::InactivityChanged {
        level: InactivityLevel::Lonely
    }));

    clock.advance(Duration::hours(12));
    assert_ok!(companion.tick().await);
    assert_eq!(companion.pet().mood(), Mood::VerySad);

    assert_ok!(companion.handle_event(SurfaceEvent::activity("help")).await);
    assert_eq!(companion.pet().inactivity(), InactivityLevel::Active);
    // Needs have decayed to zero over a day, so the stats mood is what's left
    assert_eq!(companion.pet().mood(), Mood::from_stats(companion.pet().stats()));
}

#[tokio::test]
async fn test_stats_mood_does_not_clobber_loneliness() {
    let (mut companion, clock, _rx) = companion_with(&LionConfig::default());

    clock.advance(Duration::hours(13));
    assert_ok!(companion.tick().await);
    assert!(companion.pet().mood() <= Mood::Sad);

    // Another decay step recomputes mood from stats; loneliness still holds
    clock.advance(Duration::seconds(30));
    assert_ok!(companion.tick().await);
    assert!(companion.pet().mood() <= Mood::Sad);
    assert_eq!(companion.pet().inactivity(), InactivityLevel::Lonely);
}

// =============================================================================
// Animation cues
// =============================================================================

#[tokio::test]
async fn test_bounce_reverts_after_one_second() {
    let (mut companion, clock, mut rx) = companion_with(&LionConfig::default());

    assert_ok!(companion.handle_event(SurfaceEvent::activity("sing")).await);
    assert_eq!(companion.pet().animation(), AnimationCue::Bounce);

    run_for(&mut companion, &clock, Duration::milliseconds(900), Duration::milliseconds(100)).await;
    assert_eq!(companion.pet().animation(), AnimationCue::Bounce);

    run_for(&mut companion, &clock, Duration::milliseconds(100), Duration::milliseconds(100)).await;
    assert_eq!(companion.pet().animation(), AnimationCue::Idle);

    let cues: Vec<AnimationCue> = drain(&mut rx)
        .into_iter()
        .filter_map(|m| match m {
            CompanionMessage::Animation { cue, .. } => Some(cue),
            _ => None,
        })
        .collect();
    assert_eq!(cues, vec![AnimationCue::Bounce, AnimationCue::Idle]);
}

#[tokio::test]
async fn test_growth_celebration_survives_activity_bounce() {
    let (mut companion, clock, _rx) = companion_with(&LionConfig::default());

    assert_ok!(companion.handle_event(SurfaceEvent::activity("pray")).await);
    assert_eq!(companion.pet().growth(), GrowthStage::Mature);
    assert_eq!(companion.pet().animation(), AnimationCue::Celebrate);

    clock.advance(Duration::milliseconds(500));
    assert_ok!(companion.handle_event(SurfaceEvent::activity("sing")).await);
    assert_eq!(companion.pet().animation(), AnimationCue::Celebrate);

    run_for(&mut companion, &clock, Duration::milliseconds(2500), Duration::milliseconds(100)).await;
    assert_eq!(companion.pet().animation(), AnimationCue::Idle);
}

#[tokio::test]
async fn test_click_plays_only_when_idle() {
    let (mut companion, clock, _rx) = companion_with(&LionConfig::default());

    assert_ok!(companion.handle_event(SurfaceEvent::PetClicked).await);
    assert_eq!(companion.pet().animation(), AnimationCue::Play);

    run_for(&mut companion, &clock, Duration::seconds(2), Duration::milliseconds(100)).await;
    assert_eq!(companion.pet().animation(), AnimationCue::Idle);
}

// =============================================================================
// Devotionals
// =============================================================================

#[tokio::test]
async fn test_devotional_paging_wraps() {
    let (mut companion, _clock, mut rx) = companion_with(&LionConfig::default());

    assert_ok!(companion.handle_event(SurfaceEvent::OpenDevotional).await);
    assert_ok!(companion.handle_event(SurfaceEvent::PreviousDevotional).await);

    let last = drain(&mut rx).pop();
    match last {
        Some(CompanionMessage::Devotional {
            open,
            entry,
            position,
        }) => {
            assert!(open);
            assert_eq!(position, (3, 3));
            assert_eq!(entry.map(|e| e.verse), Some("Ephesians 4:32".to_string()));
        }
        other => panic!("expected devotional message, got {other:?}"),
    }

    assert_ok!(companion.handle_event(SurfaceEvent::NextDevotional).await);
    assert_eq!(companion.reader().position(), (1, 3));
}

#[tokio::test]
async fn test_streak_badge_after_eight_days() {
    let mut config = LionConfig::default();
    config.initial_streak = 7;
    let (mut companion, _clock, mut rx) = companion_with(&config);

    assert_ok!(companion.handle_event(SurfaceEvent::CompleteDevotional).await);

    let badge = drain(&mut rx).into_iter().find_map(|m| match m {
        CompanionMessage::StreakChanged { streak: 8, badge } => badge,
        _ => None,
    });
    assert_eq!(badge.as_deref(), Some("⭐ Amazing dedication!"));
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_config_file_drives_companion() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[pet]
name = "Judah"

[pet.stats]
faith = 10

[timing]
needs_decay_secs = 10
"#,
    )
    .unwrap();
    let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();
    let (mut companion, clock, mut rx) = companion_with(&config);

    assert_ok!(
        companion
            .handle_event(SurfaceEvent::Connected {
                surface_type: SurfaceType::Tui,
            })
            .await
    );
    match drain(&mut rx).first() {
        Some(CompanionMessage::Snapshot { snapshot }) => {
            assert_eq!(snapshot.name, "Judah");
            assert_eq!(snapshot.growth, GrowthStage::Newborn);
        }
        other => panic!("expected snapshot, got {other:?}"),
    }

    clock.advance(Duration::seconds(10));
    assert_ok!(companion.tick().await);
    assert_eq!(companion.pet().stats().food(), 59);

    // Leaving newborn celebrates
    assert_ok!(companion.handle_event(SurfaceEvent::activity("pray")).await);
    assert_eq!(companion.pet().growth(), GrowthStage::Playful);
    let growth = drain(&mut rx).into_iter().find_map(|m| match m {
        CompanionMessage::GrowthChanged { message, .. } => Some(message),
        _ => None,
    });
    assert_eq!(
        growth.as_deref(),
        Some("Judah is getting more playful and curious about God's word! 🎾")
    );
}
