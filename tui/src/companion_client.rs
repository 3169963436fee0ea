//! Companion Client
//!
//! Thin wrapper around the Companion for TUI integration. The Companion is
//! embedded directly (no network); this client owns it together with the
//! receiving end of its message channel.
//!
//! The TUI holds no pet logic. Its job is:
//! 1. Turn terminal input into `SurfaceEvent`s
//! 2. Send them to the Companion
//! 3. Receive `CompanionMessage`s
//! 4. Render display state built from those messages

use tokio::sync::mpsc;

use lion_core::{
    Clock, Companion, CompanionMessage, LionConfig, SurfaceEvent, SurfaceType, SystemClock,
};

/// Channel capacity between the Companion and the TUI
const CHANNEL_CAPACITY: usize = 100;

/// Client for communicating with the embedded Companion
pub struct CompanionClient<C: Clock = SystemClock> {
    /// The embedded Companion instance
    companion: Companion<C>,
    /// Receiver for messages from the Companion
    rx: mpsc::Receiver<CompanionMessage>,
}

impl CompanionClient<SystemClock> {
    /// Create a client running on wall-clock time
    pub fn new(config: &LionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CompanionClient<C> {
    /// Create a client with an explicit clock
    pub fn with_clock(config: &LionConfig, clock: C) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let companion = Companion::new(config, clock, tx);
        Self { companion, rx }
    }

    /// Start the timers and connect this surface
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.companion.start();
        self.send_event(SurfaceEvent::Connected {
            surface_type: SurfaceType::Tui,
        })
        .await
    }

    /// Perform an activity by name
    pub async fn activity(&mut self, name: &str) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::activity(name)).await
    }

    /// Notify the Companion that the lion was clicked
    pub async fn pet_clicked(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::PetClicked).await
    }

    /// Open the devotional view
    pub async fn open_devotional(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::OpenDevotional).await
    }

    /// Complete the current devotional
    pub async fn complete_devotional(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::CompleteDevotional).await
    }

    /// Notify the Companion that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::QuitRequested).await
    }

    /// Send raw surface event to the Companion
    pub async fn send_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.companion.handle_event(event).await
    }

    /// Run due timers (call every frame)
    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.companion.tick().await
    }

    /// Receive all pending messages (non-blocking)
    pub fn recv_all(&mut self) -> Vec<CompanionMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Whether the Companion has shut down
    pub fn is_shut_down(&self) -> bool {
        self.companion.is_shut_down()
    }

    /// The Companion's clock
    pub fn clock(&self) -> &C {
        self.companion.clock()
    }
}
