//! Presentation Mapping
//!
//! Pure functions from pet state to how the lion should look: size, colour,
//! mane, face, and container motion. Surfaces render these however they
//! can (the TUI maps them onto block sprites and terminal colours).
//!
//! The only stateful pieces are the cosmetic timers in [`effects`], which
//! live on the surface side and never touch the pet.

pub mod effects;

pub use effects::{BlinkTimer, Sparkle, SparkleField};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationCue, EasingFunction, Track};
use crate::growth::GrowthStage;
use crate::mood::{InactivityLevel, Mood};

/// An sRGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend toward `other` (`t` clamped to 0.0..=1.0)
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Named colours used by the lion
pub mod palette {
    use super::Rgb;

    /// amber-200
    pub const AMBER_200: Rgb = Rgb(0xfd, 0xe6, 0x8a);
    /// amber-300
    pub const AMBER_300: Rgb = Rgb(0xfc, 0xd3, 0x4d);
    /// amber-400
    pub const AMBER_400: Rgb = Rgb(0xfb, 0xbf, 0x24);
    /// amber-500
    pub const AMBER_500: Rgb = Rgb(0xf5, 0x9e, 0x0b);
    /// amber-600
    pub const AMBER_600: Rgb = Rgb(0xd9, 0x77, 0x06);
    /// amber-700
    pub const AMBER_700: Rgb = Rgb(0xb4, 0x53, 0x09);
    /// amber-800
    pub const AMBER_800: Rgb = Rgb(0x92, 0x40, 0x0e);
    /// orange-400
    pub const ORANGE_400: Rgb = Rgb(0xfb, 0x92, 0x3c);
    /// orange-500
    pub const ORANGE_500: Rgb = Rgb(0xf9, 0x73, 0x16);
    /// orange-600
    pub const ORANGE_600: Rgb = Rgb(0xea, 0x58, 0x0c);
    /// orange-700
    pub const ORANGE_700: Rgb = Rgb(0xc2, 0x41, 0x0c);
    /// pink-300 (inner ears)
    pub const PINK_300: Rgb = Rgb(0xf9, 0xa8, 0xd4);
    /// pink-400 (nose)
    pub const PINK_400: Rgb = Rgb(0xf4, 0x72, 0xb6);
    /// yellow-300 (sparkles)
    pub const YELLOW_300: Rgb = Rgb(0xfd, 0xe0, 0x47);
}

/// Overall size of the lion, one per growth stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    /// Newborn
    Tiny,
    /// Playful
    Small,
    /// Growing
    Medium,
    /// Flourishing
    Large,
    /// Mature
    Grand,
}

impl SizeClass {
    /// Size class for a growth stage
    #[must_use]
    pub fn for_stage(stage: GrowthStage) -> Self {
        match stage {
            GrowthStage::Newborn => Self::Tiny,
            GrowthStage::Playful => Self::Small,
            GrowthStage::Growing => Self::Medium,
            GrowthStage::Flourishing => Self::Large,
            GrowthStage::Mature => Self::Grand,
        }
    }

    /// Body diameter in layout units
    #[must_use]
    pub fn body_units(self) -> u16 {
        match self {
            Self::Tiny => 12,
            Self::Small => 16,
            Self::Medium => 20,
            Self::Large => 24,
            Self::Grand => 28,
        }
    }

    /// Head diameter in layout units
    #[must_use]
    pub fn head_units(self) -> u16 {
        match self {
            Self::Tiny => 10,
            Self::Small => 12,
            Self::Medium => 16,
            Self::Large => 18,
            Self::Grand => 20,
        }
    }
}

/// Two-stop diagonal gradient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGradient {
    /// Top-left colour
    pub from: Rgb,
    /// Bottom-right colour
    pub to: Rgb,
}

impl ColorGradient {
    /// Body gradient. Sad moods fade to paler ambers.
    #[must_use]
    pub fn body(mood: Mood) -> Self {
        use palette::*;
        match mood {
            Mood::VerySad => Self::new(AMBER_300, AMBER_400),
            Mood::Sad => Self::new(AMBER_400, AMBER_500),
            _ => Self::new(AMBER_500, ORANGE_400),
        }
    }

    /// Head gradient, one shade darker than the body
    #[must_use]
    pub fn head(mood: Mood) -> Self {
        use palette::*;
        match mood {
            Mood::VerySad => Self::new(AMBER_400, AMBER_500),
            Mood::Sad => Self::new(AMBER_500, AMBER_600),
            _ => Self::new(AMBER_600, ORANGE_500),
        }
    }

    const fn new(from: Rgb, to: Rgb) -> Self {
        Self { from, to }
    }

    /// Colour at `t` along the gradient
    #[must_use]
    pub fn at(&self, t: f32) -> Rgb {
        self.from.lerp(self.to, t)
    }
}

/// Offset, scale and rotation applied to the whole lion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal offset in layout units
    pub x: f32,
    /// Vertical offset in layout units (negative is up)
    pub y: f32,
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotate: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No movement
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };
}

/// How many times a motion cycle plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    /// The first play plus this many repeats
    Times(u32),
    /// Until the cue changes
    Forever,
}

/// Keyframed container motion for a cue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionCurve {
    /// Horizontal offset keyframes
    pub x: Track,
    /// Vertical offset keyframes
    pub y: Track,
    /// Scale keyframes
    pub scale: Track,
    /// Rotation keyframes (degrees)
    pub rotate: Track,
    /// Length of one cycle
    pub cycle: Duration,
    /// Repeat behaviour
    pub repeat: Repeat,
    /// Easing between keyframes
    pub easing: EasingFunction,
}

impl MotionCurve {
    /// Motion for a cue. Idle and sleep keep the lion still.
    #[must_use]
    pub fn for_cue(cue: AnimationCue) -> Option<Self> {
        let still = Self {
            x: Track::constant(0.0),
            y: Track::constant(0.0),
            scale: Track::constant(1.0),
            rotate: Track::constant(0.0),
            cycle: Duration::ZERO,
            repeat: Repeat::Times(0),
            easing: EasingFunction::EaseInOut,
        };
        match cue {
            AnimationCue::Idle | AnimationCue::Sleep => None,
            AnimationCue::Bounce => Some(Self {
                y: Track::new(vec![-5.0, 5.0, -5.0]),
                cycle: Duration::from_millis(600),
                repeat: Repeat::Times(3),
                ..still
            }),
            AnimationCue::Celebrate => Some(Self {
                scale: Track::new(vec![1.0, 1.1, 1.0]),
                rotate: Track::new(vec![0.0, -5.0, 5.0, 0.0]),
                cycle: Duration::from_millis(800),
                repeat: Repeat::Times(2),
                ..still
            }),
            AnimationCue::Play => Some(Self {
                x: Track::new(vec![-2.0, 2.0, -2.0]),
                cycle: Duration::from_millis(800),
                repeat: Repeat::Forever,
                ..still
            }),
        }
    }

    /// Total running time, `None` when it repeats forever
    #[must_use]
    pub fn total(&self) -> Option<Duration> {
        match self.repeat {
            Repeat::Times(n) => Some(self.cycle * (n + 1)),
            Repeat::Forever => None,
        }
    }

    /// Whether the motion has played out at `elapsed`
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.total().is_some_and(|total| elapsed >= total)
    }

    /// Transform `elapsed` after the cue started
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Transform {
        if self.cycle.is_zero() || self.is_finished(elapsed) {
            return self.rest();
        }
        let cycle_secs = self.cycle.as_secs_f32();
        let progress = (elapsed.as_secs_f32() % cycle_secs) / cycle_secs;
        Transform {
            x: self.x.sample(progress, self.easing),
            y: self.y.sample(progress, self.easing),
            scale: self.scale.sample(progress, self.easing),
            rotate: self.rotate.sample(progress, self.easing),
        }
    }

    fn rest(&self) -> Transform {
        Transform {
            x: self.x.rest(),
            y: self.y.rest(),
            scale: self.scale.rest(),
            rotate: self.rotate.rest(),
        }
    }
}

/// Mane layers around the head
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManeStyle {
    /// Opacity of the inner mane, `None` when the lion has no mane yet
    pub inner_opacity: Option<f32>,
    /// Whether the outer full mane is drawn
    pub full: bool,
}

impl ManeStyle {
    /// Mane for a growth stage: none until growing, then 30/60/80 %
    #[must_use]
    pub fn for_stage(stage: GrowthStage) -> Self {
        let inner_opacity = match stage {
            GrowthStage::Newborn | GrowthStage::Playful => None,
            GrowthStage::Growing => Some(0.3),
            GrowthStage::Flourishing => Some(0.6),
            GrowthStage::Mature => Some(0.8),
        };
        Self {
            inner_opacity,
            full: stage == GrowthStage::Mature,
        }
    }

    /// Whether any mane is drawn
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.inner_opacity.is_some()
    }

    /// The mane `elapsed` into growing from `from` toward `self`.
    ///
    /// The inner mane eases out over [`MANE_GROW`]; the outer mane starts
    /// after [`OUTER_MANE_DELAY`] and shows once it is half grown. A mane
    /// that shrinks or disappears does so at once.
    #[must_use]
    pub fn growing_from(self, from: ManeStyle, elapsed: Duration) -> Self {
        if elapsed >= MANE_SETTLED {
            return self;
        }
        let progress = |delay: Duration, length: Duration| {
            let t = elapsed.saturating_sub(delay).as_secs_f32() / length.as_secs_f32();
            EasingFunction::EaseOut.apply(t)
        };

        let inner_opacity = self.inner_opacity.map(|to| {
            let start = from.inner_opacity.unwrap_or(0.0);
            if to <= start {
                to
            } else {
                start + (to - start) * progress(Duration::ZERO, MANE_GROW)
            }
        });
        let full =
            self.full && (from.full || progress(OUTER_MANE_DELAY, OUTER_MANE_GROW) >= 0.5);

        Self {
            inner_opacity,
            full,
        }
    }
}

/// Time for the inner mane to grow in
pub const MANE_GROW: Duration = Duration::from_millis(800);
/// Wait before the outer mane starts growing
pub const OUTER_MANE_DELAY: Duration = Duration::from_millis(200);
/// Time for the outer mane to grow in
pub const OUTER_MANE_GROW: Duration = Duration::from_millis(1000);
/// Time until a growing mane is complete
pub const MANE_SETTLED: Duration = Duration::from_millis(1200);

/// Mouth shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouthShape {
    /// Wide smile
    Grin,
    /// Smile
    Smile,
    /// Straight line
    Flat,
    /// Upside-down smile
    Frown,
}

impl MouthShape {
    /// Mouth for a mood
    #[must_use]
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::VeryHappy => Self::Grin,
            Mood::Happy => Self::Smile,
            Mood::Neutral => Self::Flat,
            Mood::Sad | Mood::VerySad => Self::Frown,
        }
    }
}

/// Tail tuft appears on older lions
#[must_use]
pub fn has_tail_tuft(stage: GrowthStage) -> bool {
    matches!(stage, GrowthStage::Flourishing | GrowthStage::Mature)
}

/// Crown over a mature lion
#[must_use]
pub fn has_crown(stage: GrowthStage) -> bool {
    stage == GrowthStage::Mature
}

/// Sad lions look down
#[must_use]
pub fn eyes_lowered(mood: Mood) -> bool {
    mood.is_sad()
}

/// The pet card pulses while the lion is sad
#[must_use]
pub fn pulsing(mood: Mood) -> bool {
    mood.is_sad()
}

/// Cue to draw: an idle lion left alone dozes off
#[must_use]
pub fn display_cue(cue: AnimationCue, inactivity: InactivityLevel) -> AnimationCue {
    if cue == AnimationCue::Idle && inactivity != InactivityLevel::Active {
        AnimationCue::Sleep
    } else {
        cue
    }
}

/// Every static appearance choice for one mood/stage pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LionLook {
    /// Size class
    pub size: SizeClass,
    /// Body gradient
    pub body: ColorGradient,
    /// Head gradient
    pub head: ColorGradient,
    /// Mane layers
    pub mane: ManeStyle,
    /// Mouth
    pub mouth: MouthShape,
    /// Tail tuft
    pub tail_tuft: bool,
    /// Crown
    pub crown: bool,
    /// Eyes lowered
    pub eyes_lowered: bool,
    /// Card pulses
    pub pulsing: bool,
}

impl LionLook {
    /// Resolve the look for a mood and growth stage
    #[must_use]
    pub fn resolve(mood: Mood, stage: GrowthStage) -> Self {
        Self {
            size: SizeClass::for_stage(stage),
            body: ColorGradient::body(mood),
            head: ColorGradient::head(mood),
            mane: ManeStyle::for_stage(stage),
            mouth: MouthShape::for_mood(mood),
            tail_tuft: has_tail_tuft(stage),
            crown: has_crown(stage),
            eyes_lowered: eyes_lowered(mood),
            pulsing: pulsing(mood),
        }
    }
}
