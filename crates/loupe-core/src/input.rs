use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::params::FilterMode;

/// Zoom change applied per "zoom in"/"zoom out" voice shortcut.
pub const VOICE_ZOOM_STEP: f32 = 0.25;

/// The abstract event vocabulary consumed by the interaction state machine.
///
/// Every input source (keys, remote, voice) is reduced to these before
/// touching any navigation or parameter state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ScrollUp,
    ScrollDown,
    Select,
    Back,
    /// Voice shortcut: switch filters without entering the picker.
    SetFilter(FilterMode),
    /// Voice shortcut: nudge zoom without entering the adjust popup.
    AdjustZoomBy(f32),
}

/// Physical keys and remote buttons the key adapter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    VolumeUp,
    VolumeDown,
    Center,
    Enter,
    Back,
}

/// Map a key or remote button to its abstract event.
pub fn map_key(key: KeyCode) -> InputEvent {
    match key {
        KeyCode::Up | KeyCode::Left | KeyCode::VolumeUp => InputEvent::ScrollUp,
        KeyCode::Down | KeyCode::Right | KeyCode::VolumeDown => InputEvent::ScrollDown,
        KeyCode::Center | KeyCode::Enter => InputEvent::Select,
        KeyCode::Back => InputEvent::Back,
    }
}

/// Map a recognized phrase to its abstract event. Unrecognized phrases are
/// ignored (`None`).
pub fn map_phrase(phrase: &str) -> Option<InputEvent> {
    let phrase = phrase.trim();
    let event = if phrase.eq_ignore_ascii_case("scroll up") {
        InputEvent::ScrollUp
    } else if phrase.eq_ignore_ascii_case("scroll down") {
        InputEvent::ScrollDown
    } else if phrase.eq_ignore_ascii_case("select") {
        InputEvent::Select
    } else if phrase.eq_ignore_ascii_case("back") {
        InputEvent::Back
    } else if phrase.eq_ignore_ascii_case("normal") {
        InputEvent::SetFilter(FilterMode::Normal)
    } else if phrase.eq_ignore_ascii_case("amber") {
        InputEvent::SetFilter(FilterMode::Amber)
    } else if phrase.eq_ignore_ascii_case("grayscale") {
        InputEvent::SetFilter(FilterMode::Grayscale)
    } else if phrase.eq_ignore_ascii_case("zoom in") {
        InputEvent::AdjustZoomBy(VOICE_ZOOM_STEP)
    } else if phrase.eq_ignore_ascii_case("zoom out") {
        InputEvent::AdjustZoomBy(-VOICE_ZOOM_STEP)
    } else {
        return None;
    };
    Some(event)
}

/// Channel funneling all input sources into the single interaction context.
/// Adapters send from their own threads; the machine drains on one thread.
pub fn event_channel() -> (Sender<InputEvent>, Receiver<InputEvent>) {
    unbounded()
}
