//! The host view: composes the lifecycle controller, the full-screen
//! coordinator and the controls overlay, and pumps collaborator events on the
//! calling thread.

use std::sync::Arc;

use log::{debug, warn};

use crate::controller::{InitializationState, LifecycleController};
use crate::controls::{ControlButton, ControlsOverlay};
use crate::fullscreen::{FullScreenCoordinator, FullScreenListener, LayoutTargets, ListenerId};
use crate::platform::{
    ConnectivityMonitor, LayoutIntent, NetworkEvent, PlayerEvent, PlayerSurface, SharedListener,
};
use crate::resumer::PlaybackSnapshot;
use crate::{Result, ViewConfig};

pub struct PlayerView {
    config: ViewConfig,
    controller: LifecycleController,
    full_screen: FullScreenCoordinator,
    controls: ControlsOverlay,
    layout: LayoutIntent,
}

impl PlayerView {
    pub fn new(
        surface: Box<dyn PlayerSurface>,
        monitor: Box<dyn ConnectivityMonitor>,
        config: ViewConfig,
    ) -> Self {
        let mut view = Self {
            config,
            controller: LifecycleController::new(surface, monitor),
            full_screen: FullScreenCoordinator::new(),
            controls: ControlsOverlay::new(),
            layout: LayoutIntent::fill_width(),
        };
        view.controller.surface_mut().set_layout(LayoutIntent::fill_width());
        view.on_layout();
        view
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> InitializationState {
        self.controller.state()
    }

    pub fn is_released(&self) -> bool {
        self.controller.is_released()
    }

    pub fn controls(&self) -> &ControlsOverlay {
        &self.controls
    }

    /// The host view's own layout intent
    pub fn layout(&self) -> LayoutIntent {
        self.layout
    }

    pub fn playback_snapshot(&self) -> &PlaybackSnapshot {
        self.controller.resumer().snapshot()
    }

    fn split(&mut self) -> (&mut FullScreenCoordinator, LayoutTargets<'_>) {
        let targets = LayoutTargets {
            host: &mut self.layout,
            surface: self.controller.surface_mut(),
            controls: &mut self.controls,
        };
        (&mut self.full_screen, targets)
    }

    // Lifecycle and pass-through commands

    pub fn initialize(&mut self, listener: Option<SharedListener>, handle_network_events: bool) -> Result<()> {
        self.controller.initialize(listener, handle_network_events)
    }

    /// `initialize` with `handle_network_events` taken from the config
    pub fn initialize_default(&mut self, listener: Option<SharedListener>) -> Result<()> {
        let handle = self.config.handle_network_events;
        self.controller.initialize(listener, handle)
    }

    pub fn load_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.controller.load_video(video_id, start_seconds)
    }

    pub fn cue_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.controller.cue_video(video_id, start_seconds)
    }

    pub fn play_video(&mut self) -> Result<()> {
        self.controller.play()
    }

    pub fn pause_video(&mut self) -> Result<()> {
        self.controller.pause()
    }

    pub fn seek_to(&mut self, seconds: f32) -> Result<()> {
        self.controller.seek_to(seconds)
    }

    /// Destroy the player and stop listening for connectivity. The view must
    /// not be reused afterwards.
    pub fn release(&mut self) -> Result<()> {
        self.controller.release()
    }

    // Full screen

    pub fn is_full_screen(&self) -> bool {
        self.full_screen.is_full_screen()
    }

    pub fn enter_full_screen(&mut self) -> bool {
        let (coordinator, targets) = self.split();
        coordinator.enter(targets)
    }

    pub fn exit_full_screen(&mut self) -> bool {
        let (coordinator, targets) = self.split();
        coordinator.exit(targets)
    }

    pub fn toggle_full_screen(&mut self) -> bool {
        if self.is_full_screen() {
            self.exit_full_screen()
        } else {
            self.enter_full_screen()
        }
    }

    /// Register a full-screen observer. `None` means it was already registered.
    pub fn add_full_screen_listener(&mut self, listener: Arc<dyn FullScreenListener>) -> Option<ListenerId> {
        self.full_screen.add_listener(listener)
    }

    pub fn remove_full_screen_listener(&mut self, id: ListenerId) -> bool {
        self.full_screen.remove_listener(id)
    }

    /// Host layout pass: keep the overlay matched to the player
    pub fn on_layout(&mut self) {
        let (_, mut targets) = self.split();
        targets.sync_controls();
    }

    /// Handle a press on one of the overlay's buttons
    pub fn press_control(&mut self, button: ControlButton) -> Result<()> {
        match button {
            ControlButton::FullScreen => {
                self.toggle_full_screen();
                Ok(())
            }
            ControlButton::PlayPause if self.controls.is_playing() => self.pause_video(),
            ControlButton::PlayPause => self.play_video(),
        }
    }

    // Event dispatch

    pub fn handle_network_event(&mut self, event: NetworkEvent) -> Result<()> {
        self.controller.handle_network_event(event)
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Ready => debug!("Player ready"),
            PlayerEvent::StateChanged {
                video_id,
                position_seconds,
                is_playing,
            } => {
                self.controls.on_state_changed(is_playing);
                self.controller
                    .resumer_mut()
                    .on_state_changed(video_id, position_seconds, is_playing);
            }
            PlayerEvent::Error(msg) => warn!("Player reported an error: {}", msg),
        }
    }

    /// Drain pending player and connectivity events. Player state is drained
    /// before each connectivity event so a resume sees the latest snapshot.
    /// Returns how many events were handled.
    pub fn pump(&mut self) -> Result<usize> {
        let mut handled = 0;
        loop {
            let mut progressed = false;
            while let Some(event) = self.controller.surface_mut().poll_event() {
                self.handle_player_event(event);
                handled += 1;
                progressed = true;
            }
            if let Some(event) = self.controller.monitor_mut().poll_event() {
                self.handle_network_event(event)?;
                handled += 1;
                progressed = true;
            }
            if !progressed {
                return Ok(handled);
            }
        }
    }

    pub fn surface_layout(&self) -> LayoutIntent {
        self.controller.surface().layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualConnectivity, RecordingSurface, Size};

    fn view(online: bool) -> (PlayerView, RecordingSurface, ManualConnectivity) {
        let surface = RecordingSurface::new(Size::new(1280, 2000));
        let net = ManualConnectivity::new(online);
        let v = PlayerView::new(Box::new(surface.clone()), Box::new(net.clone()), ViewConfig::default());
        (v, surface, net)
    }

    #[test]
    fn construction_matches_controls_to_player() {
        let (v, _, _) = view(true);
        assert_eq!(v.controls().size(), Size::new(1280, 720));
        assert_eq!(v.surface_layout(), LayoutIntent::fill_width());
    }

    #[test]
    fn layout_pass_resyncs_controls() {
        let (mut v, surface, _) = view(true);
        surface.set_available(Size::new(640, 2000));
        assert_eq!(v.controls().size(), Size::new(1280, 720));
        v.on_layout();
        assert_eq!(v.controls().size(), Size::new(640, 360));
        assert!(!v.is_full_screen());
    }

    #[test]
    fn play_pause_button_follows_player_state() {
        let (mut v, surface, _) = view(true);
        v.initialize(None, false).unwrap();
        v.press_control(ControlButton::PlayPause).unwrap();
        surface.emit_state("abc", 0.0, true);
        v.pump().unwrap();
        v.press_control(ControlButton::PlayPause).unwrap();
        assert_eq!(surface.count("play"), 1);
        assert_eq!(surface.count("pause"), 1);
    }

    #[test]
    fn full_screen_button_toggles() {
        let (mut v, _, _) = view(true);
        v.press_control(ControlButton::FullScreen).unwrap();
        assert!(v.is_full_screen());
        assert!(v.controls().is_full_screen());
        assert_eq!(v.layout(), LayoutIntent::fill());
        v.press_control(ControlButton::FullScreen).unwrap();
        assert!(!v.is_full_screen());
    }

    #[test]
    fn pump_records_state_for_resume() {
        let (mut v, surface, _) = view(true);
        v.initialize(None, true).unwrap();
        surface.emit_state("abc", 12.0, false);
        assert_eq!(v.pump().unwrap(), 1);
        assert_eq!(v.playback_snapshot().video_id.as_deref(), Some("abc"));
        assert_eq!(v.playback_snapshot().position_seconds, 12.0);
    }
}
