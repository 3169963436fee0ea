//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - CompanionClient for the embedded pet
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends them to the embedded Companion via CompanionClient
//! 3. Receives CompanionMessages and updates DisplayState
//! 4. Renders based on DisplayState

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, StatefulWidget, Widget};
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;

use lion_core::{Clock, CompanionMessage, LionConfig, SurfaceEvent, SystemClock};

use crate::avatar::LionAvatar;
use crate::companion_client::CompanionClient;
use crate::compositor::{Compositor, LayerId};
use crate::display::{mood_label, stage_label, DisplayState};
use crate::input::{key_action, KeyAction};
use crate::theme::{notify_color, CARD_BORDER, CARD_BORDER_DIM, DIM_GRAY, LION_AMBER};
use crate::widgets::{ActivityBar, DevotionalCard, StatPanel, TextBlockState};

/// ~10 FPS is plenty for terminal animation
const FRAME_DURATION: Duration = Duration::from_millis(100);

/// Width of the stat panel (label + bar + value)
const STATS_WIDTH: u16 = 28;

/// Rows in the stat panel
const STATS_HEIGHT: u16 = 6;

/// Dev overlay size
const DEV_WIDTH: u16 = 30;
const DEV_HEIGHT: u16 = 13;

/// Half period of the sad-card pulse
const PULSE_HALF_MS: u128 = 1_000;

/// Screen regions for one terminal size
#[derive(Clone, Copy, Debug, PartialEq)]
struct Regions {
    header: Rect,
    card: Rect,
    stats: Rect,
    avatar: Rect,
    activities: Rect,
    status: Rect,
    devotional: Rect,
    dev: Rect,
}

impl Regions {
    fn for_size(width: u16, height: u16) -> Self {
        let activity_rows = ActivityBar::new().height_for(width.saturating_sub(4));

        let header = Rect::new(0, 0, width, 1);
        let status = Rect::new(0, height.saturating_sub(1), width, 1);
        let activities = Rect::new(
            2,
            height.saturating_sub(1 + activity_rows),
            width.saturating_sub(4),
            activity_rows,
        );
        let card = Rect::new(0, 1, width, height.saturating_sub(2 + activity_rows));

        // Inside the card border: stats on the left, the lion beside them
        let inner_x = card.x + 1;
        let inner_y = card.y + 1;
        let inner_w = card.width.saturating_sub(2);
        let inner_h = card.height.saturating_sub(2);

        let stats = Rect::new(
            inner_x + 1,
            inner_y,
            STATS_WIDTH.min(inner_w.saturating_sub(2)),
            STATS_HEIGHT.min(inner_h),
        );
        let avatar_x = stats.x + stats.width + 1;
        let avatar = Rect::new(
            avatar_x,
            inner_y,
            (inner_x + inner_w).saturating_sub(avatar_x),
            inner_h,
        );

        let devotional = DevotionalCard::area(Rect::new(0, 0, width, height));
        let dev_width = DEV_WIDTH.min(width);
        let dev = Rect::new(
            width.saturating_sub(dev_width + 1),
            1,
            dev_width,
            DEV_HEIGHT.min(height.saturating_sub(2)),
        );

        Self {
            header,
            card,
            stats,
            avatar,
            activities,
            status,
            devotional,
            dev,
        }
    }
}

/// Layer IDs for UI regions
struct AppLayers {
    card: LayerId,
    header: LayerId,
    stats: LayerId,
    avatar: LayerId,
    activities: LayerId,
    status: LayerId,
    devotional: LayerId,
    dev: LayerId,
}

/// Main application state
pub struct App<C: Clock = SystemClock> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,

    // === Companion Integration ===
    /// Client for the embedded Companion
    client: CompanionClient<C>,
    /// Display state derived from CompanionMessages
    display: DisplayState,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// The lion renderer (display only)
    avatar: LionAvatar,
    /// Layer assignments
    layers: AppLayers,
    /// Activity button click targets (screen coordinates)
    button_targets: Vec<(Rect, SurfaceEvent)>,
    /// Scroll position of the open reading
    reading_scroll: TextBlockState,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Time since start, drives the card pulse
    pulse: Duration,
    /// Developer mode
    dev_mode: bool,
    /// Terminal size
    size: (u16, u16),
}

impl App<SystemClock> {
    /// Create an App sized to the current terminal
    pub fn new(config: &LionConfig) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        Ok(Self::with_client(CompanionClient::new(config), size))
    }
}

impl<C: Clock> App<C> {
    /// Create an App around an existing client
    pub fn with_client(client: CompanionClient<C>, size: (u16, u16)) -> Self {
        let (width, height) = size;
        let regions = Regions::for_size(width, height);
        let mut compositor = Compositor::new(Rect::new(0, 0, width, height));

        // Create layers with z-ordering
        let card = compositor.create_layer(regions.card, 0);
        let header = compositor.create_layer(regions.header, 10);
        let stats = compositor.create_layer(regions.stats, 10);
        let activities = compositor.create_layer(regions.activities, 10);
        let status = compositor.create_layer(regions.status, 10);
        let avatar = compositor.create_layer(regions.avatar, 50);
        let devotional = compositor.create_opaque_layer(regions.devotional, 100);
        let dev = compositor.create_opaque_layer(regions.dev, 200);
        compositor.set_visible(devotional, false);
        compositor.set_visible(dev, false);

        let layers = AppLayers {
            card,
            header,
            stats,
            avatar,
            activities,
            status,
            devotional,
            dev,
        };

        let display = DisplayState::new();
        let avatar = LionAvatar::new(display.mood, display.growth);

        Self {
            running: true,
            goodbye_message: None,
            client,
            display,
            compositor,
            avatar,
            layers,
            button_targets: ActivityBar::new().layout(regions.activities),
            reading_scroll: TextBlockState::default(),
            last_frame: Instant::now(),
            pulse: Duration::ZERO,
            dev_mode: false,
            size,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_tick = tokio::time::interval(FRAME_DURATION);
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.start().await?;
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events first
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event).await,
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = frame_tick.tick() => {}
            }

            self.tick().await;
            self.update();
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Start the Companion and take its first snapshot
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.client.start().await?;
        self.process_messages();
        Ok(())
    }

    /// Run due Companion timers and apply what they sent
    pub async fn tick(&mut self) {
        if let Err(e) = self.client.tick().await {
            tracing::warn!("Companion tick error: {}", e);
        }
        self.process_messages();
    }

    /// Process all pending messages from the Companion
    fn process_messages(&mut self) {
        for msg in self.client.recv_all() {
            let restart_cue = matches!(msg, CompanionMessage::Animation { .. });
            let new_page = matches!(msg, CompanionMessage::Devotional { .. });

            self.display.apply_message(msg);

            if restart_cue {
                self.avatar.restart(self.display.display_cue());
            }
            if new_page {
                self.reading_scroll.reset();
            }
        }

        if self.display.quitting {
            self.running = false;
            self.goodbye_message.clone_from(&self.display.goodbye);
        }
    }

    /// Dispatch one terminal event
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(w, h) => self.resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match key_action(key, self.display.devotional_open()) {
            Some(KeyAction::Send(event)) => self.send(event).await,
            Some(KeyAction::Quit) => self.quit().await,
            Some(KeyAction::ToggleDevOverlay) => {
                self.dev_mode = !self.dev_mode;
            }
            None => {}
        }
    }

    /// Handle mouse input
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.display.devotional_open() {
            match mouse.kind {
                MouseEventKind::ScrollUp => self.reading_scroll.scroll(-1),
                MouseEventKind::ScrollDown => self.reading_scroll.scroll(1),
                _ => {}
            }
            return;
        }

        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let at = Position::new(mouse.column, mouse.row);
        let button = self
            .button_targets
            .iter()
            .find(|(rect, _)| rect.contains(at))
            .map(|(_, event)| event.clone());

        if let Some(event) = button {
            self.send(event).await;
        } else if self.compositor.layer_at(at.x, at.y) == Some(self.layers.avatar) {
            self.send(SurfaceEvent::PetClicked).await;
        }
    }

    async fn send(&mut self, event: SurfaceEvent) {
        tracing::debug!(?event, "Sending surface event");
        if let Err(e) = self.client.send_event(event).await {
            tracing::warn!("Companion event error: {}", e);
        }
        self.process_messages();
    }

    async fn quit(&mut self) {
        if let Err(e) = self.client.request_quit().await {
            tracing::warn!("Companion quit error: {}", e);
        }
        self.process_messages();
        self.running = false;
    }

    /// Handle terminal resize
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let regions = Regions::for_size(width, height);

        self.compositor.resize(Rect::new(0, 0, width, height));
        self.compositor.set_bounds(self.layers.card, regions.card);
        self.compositor.set_bounds(self.layers.header, regions.header);
        self.compositor.set_bounds(self.layers.stats, regions.stats);
        self.compositor.set_bounds(self.layers.avatar, regions.avatar);
        self.compositor
            .set_bounds(self.layers.activities, regions.activities);
        self.compositor.set_bounds(self.layers.status, regions.status);
        self.compositor
            .set_bounds(self.layers.devotional, regions.devotional);
        self.compositor.set_bounds(self.layers.dev, regions.dev);

        self.button_targets = ActivityBar::new().layout(regions.activities);
    }

    /// Update animations and state from wall time
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Update animations and state by `delta`
    pub fn advance(&mut self, delta: Duration) {
        self.display.update(delta);
        self.pulse = self.pulse.saturating_add(delta);

        // Sync lion renderer from display state
        self.avatar.set_state(self.display.mood, self.display.growth);
        self.avatar.play(self.display.display_cue());
        self.avatar.update(delta);

        self.compositor
            .set_visible(self.layers.devotional, self.display.devotional_open());
        self.compositor.set_visible(self.layers.dev, self.dev_mode);
    }

    /// Render the UI
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.render_card();
        self.render_header();
        self.render_stats();
        self.render_avatar();
        self.render_activities();
        self.render_status();
        self.render_devotional();
        self.render_dev();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let (Some(src), Some(dst)) = (output.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Card border colour, fading in and out while the lion is sad
    fn card_border(&self) -> Color {
        let dim_phase = (self.pulse.as_millis() / PULSE_HALF_MS) % 2 == 1;
        if self.display.look().pulsing && dim_phase {
            CARD_BORDER_DIM
        } else {
            CARD_BORDER
        }
    }

    /// Render the pet card frame
    fn render_card(&mut self) {
        let border = self.card_border();
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.card) {
            buf.reset();
            let area = buf.area;
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .render(area, buf);
        }
    }

    /// Render the name / stage / streak header
    fn render_header(&mut self) {
        let header = header_line(&self.display);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) {
            buf.reset();
            let area = buf.area;
            buf.set_stringn(
                area.x + 1,
                area.y,
                &header,
                usize::from(area.width.saturating_sub(1)),
                Style::default().fg(LION_AMBER).add_modifier(Modifier::BOLD),
            );
        }
    }

    /// Render the stat panel
    fn render_stats(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.stats) {
            buf.reset();
            let area = buf.area;
            StatPanel::new(&self.display.stats).render(area, buf);
        }
    }

    /// Render the lion layer
    fn render_avatar(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.avatar) {
            buf.reset();
            self.avatar.render(buf);
        }
    }

    /// Render the activity buttons
    fn render_activities(&mut self) {
        let enabled = !self.display.devotional_open();
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.activities) {
            buf.reset();
            let area = buf.area;
            ActivityBar::new().enabled(enabled).render(area, buf);
        }
    }

    /// Render the status line: a notification if one is up, else the mood message
    fn render_status(&mut self) {
        let (text, style) = match &self.display.notification {
            Some(n) => (n.line(), Style::default().fg(notify_color(n.level))),
            None => (self.display.status.clone(), Style::default().fg(DIM_GRAY)),
        };
        let hint = if self.dev_mode {
            "Esc quit · F12 dev [DEV]"
        } else {
            "Esc quit · F12 dev"
        };

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            let hint_width = u16::try_from(hint.chars().count()).unwrap_or(0);
            let text_width = area.width.saturating_sub(hint_width + 3);

            buf.set_stringn(area.x + 1, area.y, &text, usize::from(text_width), style);
            if area.width > hint_width + 1 {
                buf.set_string(
                    area.x + area.width - hint_width - 1,
                    area.y,
                    hint,
                    Style::default().fg(DIM_GRAY),
                );
            }
        }
    }

    /// Render the devotional modal
    fn render_devotional(&mut self) {
        if !self.display.devotional_open() {
            return;
        }
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.devotional) {
            buf.reset();
            let area = buf.area;
            DevotionalCard::new(&self.display.devotional).render(
                area,
                buf,
                &mut self.reading_scroll,
            );
        }
    }

    /// Render the dev overlay
    fn render_dev(&mut self) {
        if !self.dev_mode {
            return;
        }
        let mut lines = vec![
            format!("cue      {:?}", self.display.cue),
            format!("shown    {:?}", self.avatar.cue()),
            format!("idle     {:?}", self.display.inactivity),
            format!("size     {:?}", self.avatar.look().size),
            format!("offset   {:?}", self.avatar.offset()),
            format!("sparkles {}", self.avatar.sparkle_count()),
            String::from("recent:"),
        ];
        lines.extend(self.display.recent.iter().rev().map(|kind| format!("  {kind}")));

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.dev) {
            buf.reset();
            let area = buf.area;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DIM_GRAY))
                .title(" dev ");
            let inner = block.inner(area);
            block.render(area, buf);

            for (i, line) in lines.iter().take(usize::from(inner.height)).enumerate() {
                buf.set_stringn(
                    inner.x,
                    inner.y + i as u16,
                    line,
                    usize::from(inner.width),
                    Style::default().fg(DIM_GRAY),
                );
            }
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The lion renderer
    pub fn avatar(&self) -> &LionAvatar {
        &self.avatar
    }

    /// Activity button click targets
    pub fn button_targets(&self) -> &[(Rect, SurfaceEvent)] {
        &self.button_targets
    }

    /// Screen area the lion is drawn in
    pub fn avatar_area(&self) -> Rect {
        self.compositor
            .bounds(self.layers.avatar)
            .unwrap_or_default()
    }

    /// Terminal size
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Whether the dev overlay is showing
    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// The embedded client (tests drive its clock)
    pub fn client(&self) -> &CompanionClient<C> {
        &self.client
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }
}

/// Header text: name, stage, mood and streak
fn header_line(display: &DisplayState) -> String {
    if !display.connected {
        return "🦁 Waking up...".to_string();
    }
    let mut line = format!(
        "🦁 {} · {} · {} · 🔥 {}-day streak",
        display.name,
        stage_label(display.growth),
        mood_label(display.mood),
        display.streak
    );
    if let Some(badge) = &display.badge {
        line.push_str("  ");
        line.push_str(badge);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use lion_core::{ManualClock, Mood};
    use pretty_assertions::assert_eq;

    fn app() -> App<ManualClock> {
        let client =
            CompanionClient::with_clock(&LionConfig::default(), ManualClock::starting_now());
        App::with_client(client, (80, 24))
    }

    #[test]
    fn test_regions_standard_terminal() {
        let r = Regions::for_size(80, 24);
        assert_eq!(r.header, Rect::new(0, 0, 80, 1));
        assert_eq!(r.status, Rect::new(0, 23, 80, 1));
        assert_eq!(r.activities, Rect::new(2, 22, 76, 1));
        assert_eq!(r.card, Rect::new(0, 1, 80, 21));
        assert_eq!(r.stats, Rect::new(2, 2, 28, 6));
        assert_eq!(r.avatar, Rect::new(31, 2, 48, 19));
        assert_eq!(r.devotional, Rect::new(10, 5, 60, 14));
    }

    #[test]
    fn test_regions_narrow_terminal_wrap_buttons() {
        let r = Regions::for_size(40, 24);
        assert_eq!(r.activities.height, 2);
        assert_eq!(r.card.height, 24 - 2 - 2);
    }

    #[test]
    fn test_regions_tiny_terminal_do_not_panic() {
        let r = Regions::for_size(3, 2);
        assert_eq!(r.avatar.width, 0);
    }

    #[test]
    fn test_header_before_and_after_snapshot() {
        let mut display = DisplayState::new();
        assert_eq!(header_line(&display), "🦁 Waking up...");

        display.connected = true;
        display.name = "Leo".to_string();
        display.streak = 3;
        assert_eq!(
            header_line(&display),
            "🦁 Leo · Flourishing · Okay · 🔥 3-day streak"
        );
    }

    #[tokio::test]
    async fn test_start_receives_snapshot() {
        let mut app = app();
        app.start().await.unwrap();
        assert!(app.display().connected);
        assert_eq!(app.display().name, "Leo");
        assert!(app.is_running());
    }

    #[tokio::test]
    async fn test_f12_toggles_dev_overlay() {
        let mut app = app();
        app.start().await.unwrap();
        let f12 = KeyEvent::from(crossterm::event::KeyCode::F(12));
        app.handle_key(f12).await;
        app.advance(Duration::from_millis(10));
        assert!(app.dev_mode());
        assert!(app.compositor.is_visible(app.layers.dev));

        app.handle_key(f12).await;
        app.advance(Duration::from_millis(10));
        assert!(!app.compositor.is_visible(app.layers.dev));
    }

    #[tokio::test]
    async fn test_sad_card_pulses() {
        let mut app = app();
        app.display.mood = Mood::Sad;
        assert_eq!(app.card_border(), CARD_BORDER);
        app.advance(Duration::from_millis(1_200));
        assert_eq!(app.card_border(), CARD_BORDER_DIM);

        app.display.mood = Mood::Happy;
        assert_eq!(app.card_border(), CARD_BORDER);
    }

    #[tokio::test]
    async fn test_resize_moves_buttons() {
        let mut app = app();
        app.resize(120, 40);
        assert_eq!(app.button_targets()[0].0, Rect::new(2, 38, 11, 1));
        assert_eq!(app.avatar_area(), Regions::for_size(120, 40).avatar);
    }
}
