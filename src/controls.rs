//! Built-in control overlay drawn on top of the player

use crate::platform::Size;

/// Buttons exposed by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    PlayPause,
    FullScreen,
}

/// Overlay state kept in step with the player surface.
///
/// The overlay is wired into the view at construction: it always follows
/// full-screen transitions and player state changes and cannot be detached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsOverlay {
    size: Size,
    full_screen: bool,
    playing: bool,
}

impl ControlsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the player's resolved size
    pub fn match_surface(&mut self, size: Size) {
        self.size = size;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn on_enter_full_screen(&mut self) {
        self.full_screen = true;
    }

    pub(crate) fn on_exit_full_screen(&mut self) {
        self.full_screen = false;
    }

    pub(crate) fn on_state_changed(&mut self, is_playing: bool) {
        self.playing = is_playing;
    }
}
