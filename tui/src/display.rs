//! Display State Types
//!
//! Types that represent what the TUI is currently showing. They are built
//! only from [`CompanionMessage`]s: the TUI is a thin client and never
//! reaches into the pet itself.
//!
//! - [`DisplayState`]: the latest pet values plus surface-only state
//! - [`DisplayDevotional`]: the devotional modal
//! - [`DisplayNotification`]: a toast that fades after a few seconds

use std::collections::VecDeque;
use std::time::Duration;

use lion_core::presentation::display_cue;
use lion_core::{
    streak_badge, AnimationCue, CompanionMessage, Devotional, GrowthStage, InactivityLevel,
    LionLook, Mood, NotifyLevel, PetSnapshot, PetStats,
};

/// How long a notification stays up
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// How many message kinds the dev overlay remembers
const RECENT_LIMIT: usize = 8;

/// Human label for a growth stage
pub fn stage_label(stage: GrowthStage) -> &'static str {
    match stage {
        GrowthStage::Newborn => "Newborn",
        GrowthStage::Playful => "Playful",
        GrowthStage::Growing => "Growing",
        GrowthStage::Flourishing => "Flourishing",
        GrowthStage::Mature => "Mature",
    }
}

/// Human label for a mood
pub fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::VeryHappy => "Very happy",
        Mood::Happy => "Happy",
        Mood::Neutral => "Okay",
        Mood::Sad => "Sad",
        Mood::VerySad => "Very sad",
    }
}

/// The devotional modal
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayDevotional {
    /// Whether the modal is showing
    pub open: bool,
    /// Reading on screen
    pub entry: Option<Devotional>,
    /// One-based position and total
    pub position: (usize, usize),
}

/// A notification to display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Optional title
    pub title: Option<String>,
    /// Message content
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
}

impl DisplayNotification {
    fn new(level: NotifyLevel, title: Option<String>, message: String) -> Self {
        Self {
            level,
            title,
            message,
            remaining: NOTIFICATION_TTL,
        }
    }

    /// Title and message on one line
    pub fn line(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Pet name
    pub name: String,
    /// Latest stats
    pub stats: PetStats,
    /// Latest mood
    pub mood: Mood,
    /// Latest growth stage
    pub growth: GrowthStage,
    /// Devotional streak
    pub streak: u32,
    /// Streak badge, if earned
    pub badge: Option<String>,
    /// Inactivity level
    pub inactivity: InactivityLevel,
    /// Cue the companion asked for
    pub cue: AnimationCue,
    /// How long the companion said the cue lasts
    pub cue_duration: Duration,
    /// Status line (latest mood message)
    pub status: String,
    /// Devotional modal
    pub devotional: DisplayDevotional,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Whether a snapshot has arrived yet
    pub connected: bool,
    /// Set once the companion says goodbye
    pub goodbye: Option<String>,
    /// Whether the companion asked us to quit
    pub quitting: bool,
    /// Recent message kinds, newest last (dev overlay)
    pub recent: VecDeque<&'static str>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            name: String::new(),
            stats: PetStats::default(),
            mood: Mood::Neutral,
            growth: GrowthStage::from_faith(PetStats::default().faith()),
            streak: 0,
            badge: None,
            inactivity: InactivityLevel::Active,
            cue: AnimationCue::Idle,
            cue_duration: Duration::ZERO,
            status: String::new(),
            devotional: DisplayDevotional::default(),
            notification: None,
            connected: false,
            goodbye: None,
            quitting: false,
            recent: VecDeque::with_capacity(RECENT_LIMIT),
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a CompanionMessage to update display state
    pub fn apply_message(&mut self, msg: CompanionMessage) {
        if self.recent.len() == RECENT_LIMIT {
            self.recent.pop_front();
        }
        self.recent.push_back(msg.kind());

        match msg {
            // Pet state
            CompanionMessage::Snapshot { snapshot } => self.apply_snapshot(snapshot),
            CompanionMessage::StatsChanged { stats } => {
                self.stats = stats;
            }
            CompanionMessage::MoodChanged { to, message, .. } => {
                self.mood = to;
                self.status = message;
            }
            CompanionMessage::GrowthChanged { to, message, .. } => {
                self.growth = to;
                self.notification = Some(DisplayNotification::new(
                    NotifyLevel::Success,
                    Some(format!("{} stage", stage_label(to))),
                    message,
                ));
            }
            CompanionMessage::Animation { cue, duration_ms } => {
                self.cue = cue;
                self.cue_duration = Duration::from_millis(u64::from(duration_ms));
            }
            CompanionMessage::InactivityChanged { level } => {
                self.inactivity = level;
            }
            CompanionMessage::StreakChanged { streak, badge } => {
                self.streak = streak;
                self.badge = badge;
            }

            // Devotional view
            CompanionMessage::Devotional {
                open,
                entry,
                position,
            } => {
                self.devotional = DisplayDevotional {
                    open,
                    entry,
                    position,
                };
            }

            // System messages
            CompanionMessage::Notify {
                level,
                title,
                message,
            } => {
                self.notification = Some(DisplayNotification::new(level, title, message));
            }
            CompanionMessage::Quit { message } => {
                self.quitting = true;
                self.goodbye = message;
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: PetSnapshot) {
        self.status = snapshot.mood.message(&snapshot.name);
        self.name = snapshot.name;
        self.stats = snapshot.stats;
        self.mood = snapshot.mood;
        self.growth = snapshot.growth;
        self.badge = streak_badge(snapshot.streak).map(str::to_string);
        self.streak = snapshot.streak;
        self.cue = snapshot.animation;
        self.inactivity = snapshot.inactivity;
        self.connected = true;
    }

    /// Update timers
    pub fn update(&mut self, delta: Duration) {
        if let Some(notification) = &mut self.notification {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    /// Cue to draw, with an idle lion left alone shown asleep
    pub fn display_cue(&self) -> AnimationCue {
        display_cue(self.cue, self.inactivity)
    }

    /// Resolved look for the current mood and stage
    pub fn look(&self) -> LionLook {
        LionLook::resolve(self.mood, self.growth)
    }

    /// Whether the devotional modal is open
    pub fn devotional_open(&self) -> bool {
        self.devotional.open
    }

    /// Clear the notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }
}
