//! Full-screen state, layout intents, and listener fan-out.
//!
//! The coordinator flips between `Normal` and `FullScreen`. Each effective
//! transition rewrites the host and player layout intents, resizes the
//! controls overlay to the player, and notifies listeners once. Redundant
//! calls do nothing and notify nobody.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;

use crate::controls::ControlsOverlay;
use crate::platform::{LayoutIntent, PlayerSurface};

/// Observer of full-screen transitions
pub trait FullScreenListener: Send + Sync {
    fn on_enter_full_screen(&self);
    fn on_exit_full_screen(&self);
}

/// Token identifying a registered observer. Unique across all sets in the
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    fn next() -> Self {
        ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity-unique set of shared observers.
///
/// Identity is the allocation behind the `Arc`, so registering two clones of
/// the same `Arc` counts as the same observer.
pub struct ObserverSet<T: ?Sized> {
    entries: Vec<(ListenerId, Arc<T>)>,
}

impl<T: ?Sized> ObserverSet<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, observer: &Arc<T>) -> Option<usize> {
        let ptr = Arc::as_ptr(observer) as *const ();
        self.entries
            .iter()
            .position(|(_, o)| Arc::as_ptr(o) as *const () == ptr)
    }

    /// Add an observer. Returns its token when membership changed, `None` when
    /// it was already present.
    pub fn insert(&mut self, observer: Arc<T>) -> Option<ListenerId> {
        if self.position(&observer).is_some() {
            return None;
        }
        let id = ListenerId::next();
        self.entries.push((id, observer));
        Some(id)
    }

    /// Remove by token. Returns whether membership changed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub fn contains(&self, observer: &Arc<T>) -> bool {
        self.position(observer).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter().map(|(_, o)| o)
    }
}

impl<T: ?Sized> Default for ObserverSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a transition rewrites
pub struct LayoutTargets<'a> {
    pub host: &'a mut LayoutIntent,
    pub surface: &'a mut dyn PlayerSurface,
    pub controls: &'a mut ControlsOverlay,
}

impl LayoutTargets<'_> {
    /// Resize the overlay to whatever the player resolved to
    pub fn sync_controls(&mut self) {
        let size = self.surface.resolved_size();
        self.controls.match_surface(size);
    }

    fn apply(&mut self, intent: LayoutIntent) {
        *self.host = intent;
        self.surface.set_layout(intent);
        self.sync_controls();
    }
}

#[derive(Default)]
pub struct FullScreenCoordinator {
    full_screen: bool,
    listeners: ObserverSet<dyn FullScreenListener>,
}

impl FullScreenCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    /// Returns whether a transition happened
    pub fn enter(&mut self, mut targets: LayoutTargets<'_>) -> bool {
        if self.full_screen {
            return false;
        }
        targets.apply(LayoutIntent::fill());
        self.full_screen = true;
        debug!("Entered full screen, notifying {} listener(s)", self.listeners.len());

        targets.controls.on_enter_full_screen();
        for listener in self.listeners.iter() {
            listener.on_enter_full_screen();
        }
        true
    }

    /// Returns whether a transition happened
    pub fn exit(&mut self, mut targets: LayoutTargets<'_>) -> bool {
        if !self.full_screen {
            return false;
        }
        targets.apply(LayoutIntent::fill_width());
        self.full_screen = false;
        debug!("Exited full screen, notifying {} listener(s)", self.listeners.len());

        targets.controls.on_exit_full_screen();
        for listener in self.listeners.iter() {
            listener.on_exit_full_screen();
        }
        true
    }

    pub fn toggle(&mut self, targets: LayoutTargets<'_>) -> bool {
        if self.full_screen {
            self.exit(targets)
        } else {
            self.enter(targets)
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn FullScreenListener>) -> Option<ListenerId> {
        self.listeners.insert(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
