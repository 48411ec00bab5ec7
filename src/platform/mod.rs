//! Platform ports: the embedded player surface, the connectivity source, and
//! the layout primitives they share.
//!
//! Hosts implement `PlayerSurface` and `ConnectivityMonitor` for their
//! platform. The in-memory implementations here (`RecordingSurface`,
//! `ManualConnectivity`) are deterministic and back the tests and the replay
//! CLI.

pub mod connectivity;
pub mod layout;
pub mod surface;

pub use connectivity::{ConnectivityMonitor, EdgeDetector, ManualConnectivity, NetworkEvent};
#[cfg(feature = "probe")]
pub use connectivity::ProbeConnectivity;
pub use layout::{Dimension, LayoutIntent, Size};
pub use surface::{
    PlayerEvent, PlayerListener, PlayerSurface, RecordingSurface, SharedListener, SurfaceCommand,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_platform_starts_quiet() {
        let mut surface = RecordingSurface::new(Size::new(1280, 720));
        assert!(surface.poll_event().is_none());
        assert_eq!(surface.layout(), LayoutIntent::fill_width());

        let mut net = ManualConnectivity::new(true);
        assert!(net.is_online());
        assert!(!net.is_subscribed());
        assert!(net.poll_event().is_none());
    }
}
