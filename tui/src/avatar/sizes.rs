//! Lion Sizes with Blocky Pixel Art
//!
//! One pattern per [`SizeClass`] (and so per growth stage). Sprites use
//! Unicode block elements for a chunky pixel-art look; colour carries the
//! mood, characters are only used for the face.

use lion_core::presentation::palette as core_palette;
use lion_core::{LionLook, MouthShape, SizeClass};

use super::sprites::{build_frame, Frame, Paint, PaletteEntry};
use crate::theme::*;

// ============================================================================
// Palette Keys (used in sprite patterns)
// ============================================================================
// M = Full outer mane (mature only)
// m = Inner mane (growing and older, opacity by stage)
// e = Ear
// p = Inner ear (pink)
// H = Head (head gradient)
// E = Eye
// N = Nose
// U = Mouth
// B = Body (body gradient)
// P = Paw
// t = Tail
// F = Tail tuft
// C = Crown

/// Eye state for one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eyes {
    /// Looking ahead
    Open,
    /// Squeezed shut with joy
    Happy,
    /// Looking down (sad)
    Lowered,
    /// Blinking or asleep
    Closed,
}

impl Eyes {
    fn glyph(self) -> char {
        match self {
            Self::Open => 'o',
            Self::Happy => '^',
            Self::Lowered => '.',
            Self::Closed => '-',
        }
    }
}

fn mouth_glyph(mouth: MouthShape) -> char {
    match mouth {
        MouthShape::Grin => 'w',
        MouthShape::Smile => 'v',
        MouthShape::Flat => '─',
        MouthShape::Frown => 'n',
    }
}

/// Pattern for a size class
pub fn pattern(size: SizeClass) -> &'static [&'static str] {
    match size {
        SizeClass::Tiny => TINY,
        SizeClass::Small => SMALL,
        SizeClass::Medium => MEDIUM,
        SizeClass::Large => LARGE,
        SizeClass::Grand => GRAND,
    }
}

/// Largest (width, height) a lion of this size occupies
pub fn max_bounds(size: SizeClass) -> (u16, u16) {
    let rows = pattern(size);
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(rows.len()).unwrap_or(u16::MAX),
    )
}

/// Palette for a resolved look and eye state
pub fn lion_palette(look: &LionLook, eyes: Eyes) -> Vec<PaletteEntry> {
    let head = Paint::Gradient(look.head);
    let body = Paint::Gradient(look.body);
    let shown = |visible: bool, paint: Paint| if visible { paint } else { Paint::Hidden };

    // Terminals have no alpha, so a faint mane is blended into the head colour
    let inner_mane = look.mane.inner_opacity.map_or(Paint::Hidden, |opacity| {
        Paint::Solid(rgb(look.head.from.lerp(core_palette::AMBER_700, opacity)))
    });

    vec![
        // Mane
        ('M', '█', shown(look.mane.full, Paint::Solid(rgb(core_palette::ORANGE_700)))),
        ('m', '█', inner_mane),
        // Head
        ('e', '▄', head),
        ('p', '▄', Paint::Solid(LION_INNER_EAR)),
        ('H', '█', head),
        // Face
        ('E', eyes.glyph(), Paint::Solid(LION_EYES)),
        ('N', '▾', Paint::Solid(LION_NOSE)),
        ('U', mouth_glyph(look.mouth), Paint::Solid(LION_MOUTH)),
        // Body
        ('B', '█', body),
        ('P', '▀', body),
        ('t', '▞', Paint::Solid(rgb(look.body.to))),
        ('F', '●', shown(look.tail_tuft, Paint::Solid(rgb(core_palette::AMBER_800)))),
        // Crown
        ('C', '♛', shown(look.crown, Paint::Solid(SPARKLE))),
    ]
}

/// Build the lion frame for a look
pub fn build_lion(look: &LionLook, eyes: Eyes) -> Frame {
    build_frame(pattern(look.size), &lion_palette(look, eyes))
}

// ============================================================================
// TINY - Newborn cub
// ============================================================================

const TINY: &[&str] = &[
    " ep   pe ",
    " HHHHHHH ",
    " HEHHHEH ",
    " HHHNHHH ",
    "  HHUHH  ",
    "  BBBBB t",
    "  P   P  ",
];

// ============================================================================
// SMALL - Playful
// ============================================================================

const SMALL: &[&str] = &[
    " ep     pe  ",
    " HHHHHHHHH  ",
    " HHEHHHEHH  ",
    " HHHHNHHHH  ",
    "  HHHUHHH   ",
    "   BBBBB   t",
    "  BBBBBBB t ",
    "  PP   PP   ",
];

// ============================================================================
// MEDIUM - Growing, first hint of a mane
// ============================================================================

const MEDIUM: &[&str] = &[
    "  mmmmmmmmm   ",
    " mep     pem  ",
    " mHHHHHHHHHm  ",
    " mHHEHHHEHHm  ",
    " mHHHHNHHHHm  ",
    "  mHHHUHHHm   ",
    "   BBBBBBB   t",
    "  BBBBBBBBB t ",
    "  PPP   PPP   ",
];

// ============================================================================
// LARGE - Flourishing, thicker mane and tail tuft
// ============================================================================

const LARGE: &[&str] = &[
    "   mmmmmmmmm     ",
    "  mmep   pemm    ",
    " mmHHHHHHHHHmm   ",
    " mmHHEHHHEHHmm   ",
    " mmHHHHNHHHHmm   ",
    "  mmHHHUHHHmm    ",
    "    BBBBBBB    F ",
    "   BBBBBBBBB  t  ",
    "   BBBBBBBBB t   ",
    "   PPP   PPP     ",
];

// ============================================================================
// GRAND - Mature, full mane and crown
// ============================================================================

const GRAND: &[&str] = &[
    "      C C C      ",
    "   MMMMMMMMMMM   ",
    "  MMmep   pemMM  ",
    " MMmHHHHHHHHHmMM ",
    " MMmHHEHHHEHHmMM ",
    " MMmHHHHNHHHHmMM ",
    "  MMmHHHUHHHmMM  ",
    "   MMBBBBBBBMM  F",
    "    BBBBBBBBB  t ",
    "    BBBBBBBBB t  ",
    "    PPP   PPP    ",
];
