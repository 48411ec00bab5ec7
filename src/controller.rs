//! Lifecycle coordination: connectivity-gated initialization, resume on
//! reconnect, and the `Initialized` precondition on every player command.
//!
//! State moves `Uninitialized -> Pending -> Initialized` or straight from
//! `Uninitialized` to `Initialized`, never backwards. Releasing does not
//! reset it; a released controller is terminal.

use log::{debug, info, warn};

use crate::deferred::DeferredCallback;
use crate::platform::{ConnectivityMonitor, NetworkEvent, PlayerSurface, SharedListener};
use crate::resumer::{PlaybackResumer, ResumeOutcome};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationState {
    Uninitialized,
    /// Offline at `initialize`; the real initialization waits for the network
    Pending,
    Initialized,
}

/// What handling an `Available` signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableOutcome {
    /// Ran the deferred initializer
    Initialized,
    /// Delegated to the playback resumer
    Resumed(ResumeOutcome),
    /// Not initialized and nothing deferred
    Ignored,
}

pub struct LifecycleController {
    surface: Box<dyn PlayerSurface>,
    monitor: Box<dyn ConnectivityMonitor>,
    state: InitializationState,
    deferred: Option<DeferredCallback<dyn PlayerSurface>>,
    released: bool,
    resumer: PlaybackResumer,
}

impl LifecycleController {
    pub fn new(surface: Box<dyn PlayerSurface>, monitor: Box<dyn ConnectivityMonitor>) -> Self {
        Self {
            surface,
            monitor,
            state: InitializationState::Uninitialized,
            deferred: None,
            released: false,
            resumer: PlaybackResumer::new(),
        }
    }

    pub fn state(&self) -> InitializationState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == InitializationState::Initialized
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.as_ref().is_some_and(DeferredCallback::is_pending)
    }

    pub fn resumer(&self) -> &PlaybackResumer {
        &self.resumer
    }

    pub(crate) fn resumer_mut(&mut self) -> &mut PlaybackResumer {
        &mut self.resumer
    }

    pub(crate) fn surface(&self) -> &dyn PlayerSurface {
        self.surface.as_ref()
    }

    pub(crate) fn surface_mut(&mut self) -> &mut dyn PlayerSurface {
        self.surface.as_mut()
    }

    pub(crate) fn monitor_mut(&mut self) -> &mut dyn ConnectivityMonitor {
        self.monitor.as_mut()
    }

    /// Initialize the player now if online, otherwise once the network
    /// returns.
    ///
    /// Calling this twice while online re-initializes the player. While
    /// `Pending` a second offline call replaces the stored initializer, and an
    /// online call cancels it. Once `Initialized`, an offline call stores
    /// nothing since reconnects go to the resumer.
    pub fn initialize(&mut self, listener: Option<SharedListener>, handle_network_events: bool) -> Result<()> {
        if self.released {
            return Err(Error::Released { operation: "initialize" });
        }

        if handle_network_events && !self.monitor.is_subscribed() {
            self.monitor.subscribe()?;
        }

        if !self.monitor.is_online() {
            if self.is_initialized() {
                debug!("Offline but already initialized; nothing to defer");
                return Ok(());
            }
            info!("Can't initialize because the device is not connected to the internet; deferring");
            self.discard_deferred();
            self.deferred = Some(DeferredCallback::<dyn PlayerSurface>::new(
                "initialize",
                move |surface| surface.initialize(listener),
            ));
            self.state = InitializationState::Pending;
            return Ok(());
        }

        self.discard_deferred();
        self.surface.initialize(listener)?;
        self.state = InitializationState::Initialized;
        Ok(())
    }

    /// Cancel and drop the stored initializer, if any
    fn discard_deferred(&mut self) {
        if let Some(mut previous) = self.deferred.take() {
            if previous.cancel() {
                warn!("Discarding pending `{}` that never ran", previous.label());
            }
        }
    }

    /// Dispatch an event from the connectivity monitor
    pub fn handle_network_event(&mut self, event: NetworkEvent) -> Result<()> {
        if self.released || !self.monitor.is_subscribed() {
            debug!("Ignoring {:?}: not subscribed to connectivity", event);
            return Ok(());
        }
        match event {
            NetworkEvent::Available => self.on_network_available().map(|_| ()),
            NetworkEvent::Unavailable => {
                self.on_network_unavailable();
                Ok(())
            }
        }
    }

    pub fn on_network_available(&mut self) -> Result<AvailableOutcome> {
        debug!("Network available");
        if !self.is_initialized() {
            let Some(mut deferred) = self.deferred.take() else {
                return Ok(AvailableOutcome::Ignored);
            };
            debug!("Network available. Initializing player.");
            if !deferred.invoke(self.surface.as_mut())? {
                return Ok(AvailableOutcome::Ignored);
            }
            self.state = InitializationState::Initialized;
            return Ok(AvailableOutcome::Initialized);
        }
        self.resumer
            .resume(self.surface.as_mut())
            .map(AvailableOutcome::Resumed)
    }

    pub fn on_network_unavailable(&mut self) {
        debug!("Network unavailable");
    }

    fn require_initialized(&self, operation: &'static str) -> Result<()> {
        if self.released {
            return Err(Error::Released { operation });
        }
        if !self.is_initialized() {
            return Err(Error::UninitializedAccess { operation });
        }
        Ok(())
    }

    pub fn load_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.require_initialized("load_video")?;
        self.surface.load_video(video_id, start_seconds)
    }

    pub fn cue_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.require_initialized("cue_video")?;
        self.surface.cue_video(video_id, start_seconds)
    }

    pub fn play(&mut self) -> Result<()> {
        self.require_initialized("play_video")?;
        self.surface.play()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.require_initialized("pause_video")?;
        self.surface.pause()
    }

    pub fn seek_to(&mut self, seconds: f32) -> Result<()> {
        self.require_initialized("seek_to")?;
        self.surface.seek_to(seconds)
    }

    /// Destroy the player and stop listening for connectivity. Terminal.
    pub fn release(&mut self) -> Result<()> {
        self.require_initialized("release")?;
        self.surface.destroy();
        self.monitor.unsubscribe();
        self.discard_deferred();
        self.released = true;
        Ok(())
    }
}
