//! Key Bindings
//!
//! Maps terminal keys to what the app should do. The devotional modal takes
//! focus while it is open: activity keys are ignored and the arrow keys
//! page through readings.
//!
//! | Key            | Lion view        | Devotional open   |
//! |----------------|------------------|-------------------|
//! | `p` `r` `s` `h`| pray/read/sing/help | -              |
//! | `d`            | open devotional  | -                 |
//! | `Space`        | play with Leo    | -                 |
//! | `Enter`        | -                | complete reading  |
//! | `n` / `→`      | -                | next reading      |
//! | `b` / `←`      | -                | previous reading  |
//! | `Esc`          | quit             | close             |
//! | `Ctrl-C`       | quit             | quit              |
//! | `F12`          | dev overlay      | dev overlay       |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lion_core::{Activity, SurfaceEvent};

/// What a key press asks for
#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    /// Forward an event to the Companion
    Send(SurfaceEvent),
    /// Say goodbye and leave
    Quit,
    /// Show or hide the dev overlay
    ToggleDevOverlay,
}

/// Map a key press to an action
pub fn key_action(key: KeyEvent, devotional_open: bool) -> Option<KeyAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Quit);
    }

    match key.code {
        KeyCode::F(12) => Some(KeyAction::ToggleDevOverlay),
        KeyCode::Esc if devotional_open => Some(KeyAction::Send(SurfaceEvent::CloseDevotional)),
        KeyCode::Esc => Some(KeyAction::Quit),
        _ if devotional_open => devotional_key(key.code).map(KeyAction::Send),
        _ => lion_key(key.code).map(KeyAction::Send),
    }
}

fn devotional_key(code: KeyCode) -> Option<SurfaceEvent> {
    match code {
        KeyCode::Enter => Some(SurfaceEvent::CompleteDevotional),
        KeyCode::Char('n') | KeyCode::Right => Some(SurfaceEvent::NextDevotional),
        KeyCode::Char('b') | KeyCode::Left => Some(SurfaceEvent::PreviousDevotional),
        _ => None,
    }
}

fn lion_key(code: KeyCode) -> Option<SurfaceEvent> {
    let activity = match code {
        KeyCode::Char('p') => Activity::Pray,
        KeyCode::Char('r') => Activity::Read,
        KeyCode::Char('s') => Activity::Sing,
        KeyCode::Char('h') => Activity::Help,
        KeyCode::Char('d') => return Some(SurfaceEvent::OpenDevotional),
        KeyCode::Char(' ') => return Some(SurfaceEvent::PetClicked),
        _ => return None,
    };
    Some(SurfaceEvent::activity(activity.as_str()))
}

/// Hotkey shown on an activity button
pub fn activity_hotkey(activity: Activity) -> char {
    match activity {
        Activity::Pray => 'p',
        Activity::Read => 'r',
        Activity::Sing => 's',
        Activity::Help => 'h',
    }
}
