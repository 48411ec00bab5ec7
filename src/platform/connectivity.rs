//! Connectivity monitor port.
//!
//! A monitor answers "are we online right now" and, while subscribed, raises
//! `Available` / `Unavailable` edge events that the host view drains from its
//! event pump. Two implementations ship with the crate:
//!
//! - `ManualConnectivity`: flipped by hand, used by tests and the replay CLI
//! - `ProbeConnectivity` (feature `probe`): an HTTP reachability check

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Edge event raised by a connectivity monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkEvent {
    Available,
    Unavailable,
}

impl NetworkEvent {
    pub fn from_online(online: bool) -> Self {
        if online {
            NetworkEvent::Available
        } else {
            NetworkEvent::Unavailable
        }
    }
}

/// Port for a two-state connectivity signal
pub trait ConnectivityMonitor {
    /// Current connectivity, checked synchronously
    fn is_online(&self) -> bool;

    /// Start delivering edge events through `poll_event`
    fn subscribe(&mut self) -> Result<()>;

    /// Stop delivering edge events; pending ones are dropped
    fn unsubscribe(&mut self);

    fn is_subscribed(&self) -> bool;

    /// Next pending edge event, if any. Always `None` while unsubscribed.
    fn poll_event(&mut self) -> Option<NetworkEvent>;
}

/// Turns a stream of level readings into edge events
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    last: Option<bool>,
}

impl EdgeDetector {
    pub fn new(initial: bool) -> Self {
        EdgeDetector { last: Some(initial) }
    }

    /// Feed a reading; returns an event only when the level changed
    pub fn observe(&mut self, online: bool) -> Option<NetworkEvent> {
        let changed = self.last != Some(online);
        self.last = Some(online);
        changed.then(|| NetworkEvent::from_online(online))
    }
}

#[derive(Debug, Default)]
struct ManualState {
    online: bool,
    subscribed: bool,
    subscriptions: usize,
    pending: VecDeque<NetworkEvent>,
}

/// Connectivity that only changes when told to.
///
/// Clones share state, so a test can flip connectivity after handing a clone
/// to the view.
#[derive(Debug, Clone)]
pub struct ManualConnectivity {
    state: Arc<Mutex<ManualState>>,
}

impl ManualConnectivity {
    pub fn new(online: bool) -> Self {
        ManualConnectivity {
            state: Arc::new(Mutex::new(ManualState {
                online,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change connectivity; queues an edge event when the level changed and a
    /// subscriber is present.
    pub fn set_online(&self, online: bool) {
        let mut s = self.lock();
        if s.online == online {
            return;
        }
        s.online = online;
        if s.subscribed {
            s.pending.push_back(NetworkEvent::from_online(online));
        }
    }

    /// Raise an event regardless of the current level, the way a platform
    /// broadcast may repeat itself.
    pub fn emit(&self, event: NetworkEvent) {
        let mut s = self.lock();
        s.online = event == NetworkEvent::Available;
        if s.subscribed {
            s.pending.push_back(event);
        }
    }

    /// Number of times `subscribe` was called
    pub fn subscriptions(&self) -> usize {
        self.lock().subscriptions
    }
}

impl ConnectivityMonitor for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.lock().online
    }

    fn subscribe(&mut self) -> Result<()> {
        let mut s = self.lock();
        s.subscribed = true;
        s.subscriptions += 1;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        let mut s = self.lock();
        s.subscribed = false;
        s.pending.clear();
    }

    fn is_subscribed(&self) -> bool {
        self.lock().subscribed
    }

    fn poll_event(&mut self) -> Option<NetworkEvent> {
        let mut s = self.lock();
        if !s.subscribed {
            return None;
        }
        s.pending.pop_front()
    }
}

#[cfg(feature = "probe")]
pub use probe::ProbeConnectivity;

#[cfg(feature = "probe")]
mod probe {
    use std::time::Duration;

    use log::debug;
    use reqwest::blocking::Client;

    use super::{ConnectivityMonitor, EdgeDetector, NetworkEvent};
    use crate::{Error, ProbeConfig, Result};

    /// Reachability check against a well-known URL.
    ///
    /// Any HTTP response counts as online; only transport failures count as
    /// offline. Each `is_online`/`poll_event` call performs one blocking HEAD
    /// request bounded by the configured timeout.
    pub struct ProbeConnectivity {
        client: Client,
        url: String,
        subscribed: bool,
        edges: EdgeDetector,
    }

    impl ProbeConnectivity {
        pub fn new(config: &ProbeConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| Error::Connectivity(format!("Failed to build HTTP client: {}", e)))?;
            Ok(Self {
                client,
                url: config.url.clone(),
                subscribed: false,
                edges: EdgeDetector::default(),
            })
        }

        fn check(&self) -> bool {
            match self.client.head(&self.url).send() {
                Ok(_) => true,
                Err(e) => {
                    debug!("Reachability probe to {} failed: {}", self.url, e);
                    false
                }
            }
        }
    }

    impl ConnectivityMonitor for ProbeConnectivity {
        fn is_online(&self) -> bool {
            self.check()
        }

        fn subscribe(&mut self) -> Result<()> {
            self.edges = EdgeDetector::new(self.check());
            self.subscribed = true;
            Ok(())
        }

        fn unsubscribe(&mut self) {
            self.subscribed = false;
        }

        fn is_subscribed(&self) -> bool {
            self.subscribed
        }

        fn poll_event(&mut self) -> Option<NetworkEvent> {
            if !self.subscribed {
                return None;
            }
            let online = self.check();
            self.edges.observe(online)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_detector_reports_changes_only() {
        let mut d = EdgeDetector::new(false);
        assert_eq!(d.observe(false), None);
        assert_eq!(d.observe(true), Some(NetworkEvent::Available));
        assert_eq!(d.observe(true), None);
        assert_eq!(d.observe(false), Some(NetworkEvent::Unavailable));
    }

    #[test]
    fn manual_connectivity_queues_only_while_subscribed() {
        let mut m = ManualConnectivity::new(false);
        m.set_online(true);
        assert!(m.is_online());
        assert_eq!(m.poll_event(), None);

        m.subscribe().unwrap();
        m.set_online(false);
        m.set_online(false);
        m.set_online(true);
        assert_eq!(m.poll_event(), Some(NetworkEvent::Unavailable));
        assert_eq!(m.poll_event(), Some(NetworkEvent::Available));
        assert_eq!(m.poll_event(), None);
    }

    #[test]
    fn unsubscribe_drops_pending_events() {
        let mut m = ManualConnectivity::new(true);
        m.subscribe().unwrap();
        m.emit(NetworkEvent::Available);
        m.unsubscribe();
        assert_eq!(m.poll_event(), None);
        assert_eq!(m.subscriptions(), 1);
    }
}
