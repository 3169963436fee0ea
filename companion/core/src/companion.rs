//! Companion - The Pet's Owner
//!
//! The Companion holds the one [`Pet`], its periodic schedule, and the
//! devotional reader. It is UI-agnostic: it talks to whatever surface is
//! attached through
//! - `CompanionMessage`: state changes sent TO the surface
//! - `SurfaceEvent`: user actions received FROM the surface
//!
//! Every event or tick runs one pet operation, then compares the pet before
//! and after and sends only what changed.

use tokio::sync::mpsc;

use crate::activity::Activity;
use crate::animation::ActiveCue;
use crate::clock::Clock;
use crate::config::LionConfig;
use crate::devotional::DevotionalReader;
use crate::events::SurfaceEvent;
use crate::messages::{streak_badge, CompanionMessage, NotifyLevel};
use crate::pet::{Pet, PetSnapshot};
use crate::scheduler::{Firing, Scheduler, TaskKind};
use crate::stats::STAT_MAX;

/// State captured before an operation, for diffing afterwards
struct Before {
    snapshot: PetSnapshot,
    cue: ActiveCue,
}

/// The Companion - headless owner of the pet
pub struct Companion<C: Clock> {
    /// The lion
    pet: Pet,
    /// Periodic tasks
    scheduler: Scheduler,
    /// Devotional pagination and visibility
    reader: DevotionalReader,
    /// Time source
    clock: C,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<CompanionMessage>,
    /// Set once shutdown has run
    shut_down: bool,
}

impl<C: Clock> Companion<C> {
    /// Create a Companion from a resolved configuration
    pub fn new(config: &LionConfig, clock: C, tx: mpsc::Sender<CompanionMessage>) -> Self {
        let pet = Pet::new(
            config.name.clone(),
            config.initial_stats,
            config.initial_streak,
            clock.now(),
        )
        .with_thresholds(config.thresholds);

        let mut scheduler = Scheduler::new();
        scheduler.register(TaskKind::NeedsDecay, to_chrono(config.needs_decay_interval));
        scheduler.register(
            TaskKind::InactivityCheck,
            to_chrono(config.inactivity_check_interval),
        );
        scheduler.register(TaskKind::CueExpiry, to_chrono(config.cue_expiry_interval));

        Self {
            pet,
            scheduler,
            reader: DevotionalReader::default(),
            clock,
            tx,
            shut_down: false,
        }
    }

    /// Start the periodic schedule
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.scheduler.start(now);
        tracing::info!(
            name = %self.pet.name(),
            growth = %self.pet.growth(),
            mood = %self.pet.mood(),
            "Companion started"
        );
    }

    /// The pet (read-only)
    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    /// Current pet snapshot
    pub fn snapshot(&self) -> PetSnapshot {
        self.pet.snapshot()
    }

    /// The devotional reader (read-only)
    pub fn reader(&self) -> &DevotionalReader {
        &self.reader
    }

    /// The scheduler (read-only)
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether shutdown has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Handle an event from the surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        if self.shut_down {
            tracing::debug!(?event, "Ignoring event after shutdown");
            return Ok(());
        }
        let now = self.clock.now();

        match event {
            SurfaceEvent::Connected { surface_type } => {
                tracing::info!(surface = %surface_type.name(), "Surface connected");
                self.send(CompanionMessage::Snapshot {
                    snapshot: self.pet.snapshot(),
                })
                .await;
                self.send_devotional().await;
            }

            SurfaceEvent::Activity { name } => match name.parse::<Activity>() {
                Ok(activity) => {
                    let before = self.capture();
                    self.pet.apply_activity(activity, now);
                    self.publish_diff(&before).await;
                }
                Err(e) => {
                    tracing::warn!(activity = %name, "Rejected activity: {e}");
                    self.notify(NotifyLevel::Warning, &e.to_string()).await;
                }
            },

            SurfaceEvent::PetClicked => {
                let before = self.capture();
                if self.pet.play(now) {
                    self.publish_diff(&before).await;
                }
            }

            SurfaceEvent::OpenDevotional => {
                self.reader.open();
                self.send_devotional().await;
            }

            SurfaceEvent::CloseDevotional => {
                self.reader.close();
                self.send_devotional().await;
            }

            SurfaceEvent::NextDevotional => {
                self.reader.next();
                self.send_devotional().await;
            }

            SurfaceEvent::PreviousDevotional => {
                self.reader.previous();
                self.send_devotional().await;
            }

            SurfaceEvent::CompleteDevotional => {
                let before = self.capture();
                self.reader.close();
                self.pet.complete_devotional(now);
                self.publish_diff(&before).await;
                self.send_devotional().await;
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Run every periodic task that is due at the clock's current time
    pub async fn tick(&mut self) -> anyhow::Result<()> {
        let now = self.clock.now();
        let firings = self.scheduler.due(now);
        if firings.is_empty() {
            return Ok(());
        }

        let before = self.capture();
        for Firing { kind, count } in firings {
            match kind {
                TaskKind::NeedsDecay => {
                    // Beyond STAT_MAX steps food and water are already at zero
                    for _ in 0..count.min(u32::from(STAT_MAX)) {
                        self.pet.tick_needs(now);
                    }
                    tracing::debug!(
                        steps = count,
                        food = self.pet.stats().food(),
                        water = self.pet.stats().water(),
                        "Needs decayed"
                    );
                }
                TaskKind::InactivityCheck => {
                    self.pet.tick_inactivity(now);
                }
                TaskKind::CueExpiry => {
                    self.pet.expire_cue(now);
                }
            }
        }
        self.publish_diff(&before).await;

        Ok(())
    }

    /// Stop the schedule and tell the surface to quit
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.scheduler.stop();
        self.shut_down = true;
        tracing::info!(streak = self.pet.streak(), "Companion shutting down");

        self.send(CompanionMessage::Quit {
            message: Some(format!("{} will miss you!", self.pet.name())),
        })
        .await;

        Ok(())
    }

    fn capture(&self) -> Before {
        Before {
            snapshot: self.pet.snapshot(),
            cue: self.pet.active_cue(),
        }
    }

    /// Send a message for every field that differs from `before`
    async fn publish_diff(&self, before: &Before) {
        let after = self.pet.snapshot();
        let name = after.name.as_str();

        if after.stats != before.snapshot.stats {
            self.send(CompanionMessage::StatsChanged { stats: after.stats })
                .await;
        }

        if after.mood != before.snapshot.mood {
            tracing::info!(from = %before.snapshot.mood, to = %after.mood, "Mood changed");
            self.send(CompanionMessage::MoodChanged {
                from: before.snapshot.mood,
                to: after.mood,
                message: after.mood.message(name),
            })
            .await;
        }

        if after.growth != before.snapshot.growth {
            self.send(CompanionMessage::GrowthChanged {
                from: before.snapshot.growth,
                to: after.growth,
                message: after.growth.message(name),
            })
            .await;
        }

        if after.inactivity != before.snapshot.inactivity {
            self.send(CompanionMessage::InactivityChanged {
                level: after.inactivity,
            })
            .await;
        }

        if after.streak != before.snapshot.streak {
            self.send(CompanionMessage::StreakChanged {
                streak: after.streak,
                badge: streak_badge(after.streak).map(str::to_string),
            })
            .await;
        }

        let cue = self.pet.active_cue();
        if cue != before.cue {
            let duration_ms = cue
                .until
                .map(|until| (until - self.clock.now()).num_milliseconds().max(0))
                .and_then(|ms| u32::try_from(ms).ok())
                .unwrap_or(0);
            self.send(CompanionMessage::Animation {
                cue: cue.cue,
                duration_ms,
            })
            .await;
        }
    }

    async fn send_devotional(&self) {
        self.send(CompanionMessage::Devotional {
            open: self.reader.is_open(),
            entry: self.reader.current().cloned(),
            position: self.reader.position(),
        })
        .await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(CompanionMessage::Notify {
            level,
            title: None,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: CompanionMessage) {
        let kind = msg.kind();
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!(kind, "Failed to send message to surface: {}", e);
        }
    }
}

fn to_chrono(interval: std::time::Duration) -> chrono::Duration {
    chrono::Duration::from_std(interval).unwrap_or_else(|_| chrono::Duration::days(365))
}
