//! Avatar System - Leo on Screen
//!
//! The lion is drawn from three inputs:
//! - the resolved [`LionLook`] (size, colours, mane, face) for the current
//!   mood and growth stage
//! - the cue motion from [`MotionPlayer`]
//! - cosmetic effects that live only on the surface: the blink timer,
//!   the sparkle field, and the sleep "z"s
//!
//! Frames are rebuilt only when the look or the eyes change, or while a
//! new mane grows in.

mod motion;
mod sizes;
mod sprites;

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::style::{Modifier, Style};

use lion_core::presentation::MANE_SETTLED;
use lion_core::{AnimationCue, BlinkTimer, GrowthStage, LionLook, ManeStyle, Mood, SparkleField};

pub use motion::{to_cells, MotionPlayer};
pub use sizes::{build_lion, max_bounds, Eyes};
pub use sprites::{build_frame, ColoredCell, Frame, Paint};

use crate::theme::{SLEEP_BLUE, SPARKLE};

/// Room around the sprite for motion, sparkles and sleep marks
pub const MOTION_MARGIN: (u16, u16) = (3, 2);

/// The animated lion
pub struct LionAvatar {
    /// Current mood
    mood: Mood,
    /// Current growth stage
    stage: GrowthStage,
    /// Resolved look for mood + stage
    look: LionLook,
    /// Cue motion
    motion: MotionPlayer,
    /// Blink toggle
    blink: BlinkTimer,
    /// Sparkles while very happy or celebrating
    sparkles: SparkleField,
    /// Mane before the last stage change, and time since
    mane_growth: Option<(ManeStyle, Duration)>,
    /// Cached frame and the eyes it was built with
    frame: Frame,
    frame_eyes: Eyes,
}

impl LionAvatar {
    /// Create a lion for a mood and stage
    pub fn new(mood: Mood, stage: GrowthStage) -> Self {
        Self::with_effects(mood, stage, BlinkTimer::new(), SparkleField::new())
    }

    /// Create a lion with deterministic effects (for tests)
    pub fn with_seed(mood: Mood, stage: GrowthStage, seed: u64) -> Self {
        Self::with_effects(
            mood,
            stage,
            BlinkTimer::with_seed(seed),
            SparkleField::with_seed(seed),
        )
    }

    fn with_effects(
        mood: Mood,
        stage: GrowthStage,
        blink: BlinkTimer,
        sparkles: SparkleField,
    ) -> Self {
        let look = LionLook::resolve(mood, stage);
        let eyes = Eyes::Open;
        Self {
            mood,
            stage,
            look,
            motion: MotionPlayer::new(),
            blink,
            sparkles,
            mane_growth: None,
            frame: build_lion(&look, eyes),
            frame_eyes: eyes,
        }
    }

    /// Update mood and growth stage
    pub fn set_state(&mut self, mood: Mood, stage: GrowthStage) {
        if mood != self.mood || stage != self.stage {
            if stage != self.stage {
                self.mane_growth = Some((self.mane(), Duration::ZERO));
            }
            self.mood = mood;
            self.stage = stage;
            self.look = LionLook::resolve(mood, stage);
            self.rebuild();
        }
    }

    /// Show a cue (already mapped through `display_cue`)
    pub fn play(&mut self, cue: AnimationCue) {
        self.motion.play(cue);
    }

    /// Show a cue from its first frame (a repeated activity)
    pub fn restart(&mut self, cue: AnimationCue) {
        self.motion.restart(cue);
    }

    /// Advance motion and effects (call every frame)
    pub fn update(&mut self, delta: Duration) {
        self.motion.update(delta);
        self.blink.update(delta);

        let sparkling = self.mood == Mood::VeryHappy || self.motion.cue() == AnimationCue::Celebrate;
        self.sparkles.update(delta, sparkling);

        if let Some((from, elapsed)) = self.mane_growth {
            let elapsed = elapsed + delta;
            self.mane_growth = (elapsed < MANE_SETTLED).then_some((from, elapsed));
            self.rebuild();
        } else if self.eyes() != self.frame_eyes {
            self.rebuild();
        }
    }

    /// Mane as currently drawn, part-grown after a stage change
    pub fn mane(&self) -> ManeStyle {
        match self.mane_growth {
            Some((from, elapsed)) => self.look.mane.growing_from(from, elapsed),
            None => self.look.mane,
        }
    }

    /// Eyes for the current state
    pub fn eyes(&self) -> Eyes {
        match self.motion.cue() {
            AnimationCue::Sleep => Eyes::Closed,
            _ if self.blink.is_closed() => Eyes::Closed,
            AnimationCue::Celebrate => Eyes::Happy,
            _ if self.look.eyes_lowered => Eyes::Lowered,
            _ => Eyes::Open,
        }
    }

    fn rebuild(&mut self) {
        self.frame_eyes = self.eyes();
        let look = LionLook {
            mane: self.mane(),
            ..self.look
        };
        self.frame = build_lion(&look, self.frame_eyes);
    }

    /// Current frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Current look
    pub fn look(&self) -> &LionLook {
        &self.look
    }

    /// Current cue
    pub fn cue(&self) -> AnimationCue {
        self.motion.cue()
    }

    /// Whole-cell motion offset
    pub fn offset(&self) -> (i16, i16) {
        self.motion.cell_offset()
    }

    /// Number of live sparkles
    pub fn sparkle_count(&self) -> usize {
        self.sparkles.len()
    }

    /// Space the lion needs including motion margin
    pub fn bounds(&self) -> (u16, u16) {
        let (w, h) = max_bounds(self.look.size);
        (w + MOTION_MARGIN.0 * 2, h + MOTION_MARGIN.1 * 2)
    }

    /// Render the lion, sparkles and sleep marks centred in `buf`
    pub fn render(&self, buf: &mut Buffer) {
        let area = buf.area;
        let frame = &self.frame;
        let (dx, dy) = self.offset();

        let base_x = i32::from(area.width.saturating_sub(frame.width) / 2) + i32::from(dx);
        let base_y = i32::from(area.height.saturating_sub(frame.height) / 2) + i32::from(dy);

        let mut modifier = Modifier::empty();
        if self.motion.emphasized() {
            modifier |= Modifier::BOLD;
        }

        for (row_idx, row) in frame.cells.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let x = base_x + col_idx as i32;
                let y = base_y + row_idx as i32;
                let style = Style::default().fg(cell.fg).add_modifier(modifier);
                put(buf, x, y, cell.ch, style);
            }
        }

        // Sparkles are placed by percentage over the whole lion area
        for sparkle in self.sparkles.iter() {
            let x = (f32::from(area.width.saturating_sub(1)) * sparkle.x / 100.0).round() as i32;
            let y = (f32::from(area.height.saturating_sub(1)) * sparkle.y / 100.0).round() as i32;
            put(buf, x, y, '✦', Style::default().fg(SPARKLE));
        }

        if self.motion.cue() == AnimationCue::Sleep {
            let zx = base_x + i32::from(frame.width);
            put(buf, zx, base_y, 'z', Style::default().fg(SLEEP_BLUE));
            put(buf, zx + 1, base_y - 1, 'Z', Style::default().fg(SLEEP_BLUE));
        }
    }
}

/// Set one cell if it falls inside the buffer
fn put(buf: &mut Buffer, x: i32, y: i32, ch: char, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let area = buf.area;
    if x >= area.width || y >= area.height {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn render(avatar: &LionAvatar) -> Buffer {
        let (w, h) = avatar.bounds();
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        avatar.render(&mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_state_change_rebuilds_frame() {
        let mut avatar = LionAvatar::with_seed(Mood::Happy, GrowthStage::Flourishing, 1);
        assert!(!avatar.frame().contains('♛'));

        avatar.set_state(Mood::Happy, GrowthStage::Mature);
        assert!(avatar.frame().contains('♛'));
        assert!(avatar.bounds().1 > max_bounds(lion_core::SizeClass::Large).1);
    }

    #[test]
    fn test_new_mane_grows_in() {
        let mut avatar = LionAvatar::with_seed(Mood::Happy, GrowthStage::Playful, 1);
        avatar.set_state(Mood::Happy, GrowthStage::Growing);
        assert_eq!(avatar.mane().inner_opacity, Some(0.0));

        avatar.update(Duration::from_millis(400));
        let partial = avatar.mane().inner_opacity.unwrap();
        assert!(partial > 0.0 && partial < 0.3);

        avatar.update(Duration::from_secs(1));
        assert_eq!(avatar.mane(), ManeStyle::for_stage(GrowthStage::Growing));

        // Mood changes alone do not regrow the mane
        avatar.set_state(Mood::Neutral, GrowthStage::Growing);
        assert_eq!(avatar.mane(), ManeStyle::for_stage(GrowthStage::Growing));
    }

    #[test]
    fn test_blink_closes_eyes_briefly() {
        let mut avatar = LionAvatar::with_seed(Mood::Happy, GrowthStage::Growing, 7);
        assert_eq!(avatar.eyes(), Eyes::Open);

        // Blink is always due within 5s, and lasts 150ms
        let mut saw_closed = false;
        for _ in 0..60 {
            avatar.update(Duration::from_millis(100));
            if avatar.eyes() == Eyes::Closed {
                saw_closed = true;
                assert!(avatar.frame().contains('-'));
                break;
            }
        }
        assert!(saw_closed);

        avatar.update(Duration::from_millis(200));
        assert_eq!(avatar.eyes(), Eyes::Open);
    }

    #[test]
    fn test_sleeping_lion_shows_z() {
        let mut avatar = LionAvatar::with_seed(Mood::Sad, GrowthStage::Playful, 3);
        avatar.play(AnimationCue::Sleep);
        avatar.update(Duration::from_millis(10));
        assert_eq!(avatar.eyes(), Eyes::Closed);

        let out = text(&render(&avatar));
        assert!(out.contains('z'));
        assert!(out.contains('Z'));
    }

    #[test]
    fn test_sad_lion_looks_down() {
        let avatar = LionAvatar::with_seed(Mood::VerySad, GrowthStage::Growing, 3);
        assert_eq!(avatar.eyes(), Eyes::Lowered);
    }

    #[test]
    fn test_very_happy_lion_sparkles() {
        let mut avatar = LionAvatar::with_seed(Mood::VeryHappy, GrowthStage::Growing, 11);
        for _ in 0..20 {
            avatar.update(Duration::from_millis(100));
        }
        assert!(avatar.sparkle_count() > 0);
        assert!(avatar.sparkle_count() <= lion_core::presentation::effects::MAX_SPARKLES);
        assert!(text(&render(&avatar)).contains('✦'));

        avatar.set_state(Mood::Neutral, GrowthStage::Growing);
        avatar.update(Duration::from_millis(100));
        assert_eq!(avatar.sparkle_count(), 0);
    }

    #[test]
    fn test_celebration_sparkles_and_squints() {
        let mut avatar = LionAvatar::with_seed(Mood::Neutral, GrowthStage::Mature, 5);
        avatar.play(AnimationCue::Celebrate);
        avatar.update(Duration::from_millis(400));
        assert!(avatar.sparkle_count() > 0);
        if avatar.eyes() != Eyes::Closed {
            assert_eq!(avatar.eyes(), Eyes::Happy);
        }
    }

    #[test]
    fn test_bounce_moves_the_sprite() {
        let mut avatar = LionAvatar::with_seed(Mood::Neutral, GrowthStage::Newborn, 2);
        let still = render(&avatar);

        avatar.play(AnimationCue::Bounce);
        assert_eq!(avatar.offset(), (0, -2));
        let moved = render(&avatar);
        assert_ne!(text(&still), text(&moved));
    }
}
