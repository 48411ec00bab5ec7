//! Player Host
//!
//! A host view for an embedded video player. It coordinates three concerns
//! around the player:
//!
//! - **Connectivity-gated initialization**: when offline, `initialize` stores
//!   the real initialization and runs it once the network comes back
//! - **Resume on reconnect**: the last reported playback state is replayed to
//!   the player after a connectivity drop
//! - **Full screen**: idempotent transitions that rewrite layout intents, keep
//!   the controls overlay sized to the player, and notify listeners
//!
//! The player and the connectivity source are ports (`PlayerSurface`,
//! `ConnectivityMonitor`), so hosts plug in their own platform bindings.
//! Everything runs on the calling thread; `PlayerView::pump` drains pending
//! events from both collaborators.
//!
//! # Example
//!
//! ```
//! use playerhost::platform::{ManualConnectivity, RecordingSurface, Size};
//! use playerhost::{InitializationState, PlayerView, ViewConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let surface = RecordingSurface::new(Size::new(1280, 720));
//! let network = ManualConnectivity::new(false);
//!
//! let mut view = PlayerView::new(
//!     Box::new(surface.clone()),
//!     Box::new(network.clone()),
//!     ViewConfig::default(),
//! );
//! view.initialize(None, true)?;
//! assert_eq!(view.state(), InitializationState::Pending);
//!
//! network.set_online(true);
//! view.pump()?;
//! assert_eq!(view.state(), InitializationState::Initialized);
//! view.load_video("abc", 0.0)?;
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;

pub mod error;
pub use error::{Error, Result};

pub mod controller;
pub mod controls;
pub mod deferred;
pub mod fullscreen;
pub mod resumer;
pub mod view;

// Ports for the embedded player and the connectivity source, plus in-memory
// implementations
pub mod platform;

pub use controller::{AvailableOutcome, InitializationState, LifecycleController};
pub use controls::{ControlButton, ControlsOverlay};
pub use deferred::DeferredCallback;
pub use fullscreen::{FullScreenCoordinator, FullScreenListener, ListenerId, ObserverSet};
pub use resumer::{PlaybackResumer, PlaybackSnapshot, ResumeOutcome};
pub use view::PlayerView;

/// Configuration for a `PlayerView`
///
/// # Examples
///
/// ```
/// let cfg = playerhost::ViewConfig::default();
/// assert!(cfg.handle_network_events);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Subscribe to connectivity events when initializing via
    /// `PlayerView::initialize_default`
    pub handle_network_events: bool,
    /// Reachability probe used by `ProbeConnectivity`
    pub probe: ProbeConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            handle_network_events: true,
            probe: ProbeConfig::default(),
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<()> {
        self.probe.validate()
    }
}

/// Target and timeout of the HTTP reachability probe
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// URL that answers any request when the network is up
    pub url: String,
    /// Timeout for a single probe in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: "https://www.youtube.com/generate_204".to_string(),
            timeout_ms: 3000,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("probe url `{}`: {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "probe url must be http or https, got `{}`",
                parsed.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config("probe timeout must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert!(config.handle_network_events);
        assert_eq!(config.probe.timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_probe() {
        let mut config = ViewConfig::default();
        config.probe.url = "not a url".into();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.probe.url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.probe = ProbeConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: ViewConfig = serde_json::from_str(r#"{"handle_network_events": false}"#).unwrap();
        assert!(!config.handle_network_events);
        assert_eq!(config.probe, ProbeConfig::default());
    }
}
