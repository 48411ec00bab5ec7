//! The embedded player surface port and an in-memory implementation.
//!
//! A `PlayerSurface` is the opaque embedded player: the host view only issues
//! black-box commands to it and drains the notifications it raises.
//! `RecordingSurface` keeps every command in a shared log so tests and the
//! replay CLI can inspect exactly what reached the player.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::layout::{LayoutIntent, Size};
use crate::{Error, Result};

/// Notifications raised by the embedded player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The player finished its own setup
    Ready,
    /// Playback state changed
    StateChanged {
        video_id: Option<String>,
        position_seconds: f32,
        is_playing: bool,
    },
    /// The player reported an error of its own
    Error(String),
}

/// Caller-supplied listener handed to the player on initialization.
///
/// All methods have empty defaults so callers only override what they need.
pub trait PlayerListener: Send + Sync {
    fn on_ready(&self) {}
    fn on_state_change(&self, _video_id: Option<&str>, _position_seconds: f32, _is_playing: bool) {}
    fn on_error(&self, _message: &str) {}
}

/// Shared listener handle; cloned into the deferred initializer when needed
pub type SharedListener = Arc<dyn PlayerListener>;

/// Port for the embedded player
pub trait PlayerSurface {
    fn initialize(&mut self, listener: Option<SharedListener>) -> Result<()>;
    fn load_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()>;
    fn cue_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek_to(&mut self, seconds: f32) -> Result<()>;
    fn destroy(&mut self);

    fn set_layout(&mut self, intent: LayoutIntent);
    fn layout(&self) -> LayoutIntent;

    /// Size the player resolved to after its last layout
    fn resolved_size(&self) -> Size;

    /// Next pending notification, if any. Surfaces that deliver
    /// notifications through another channel keep the default.
    fn poll_event(&mut self) -> Option<PlayerEvent> {
        None
    }
}

/// A command as observed by `RecordingSurface`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Initialize { with_listener: bool },
    LoadVideo { video_id: String, start_seconds: f32 },
    CueVideo { video_id: String, start_seconds: f32 },
    Play,
    Pause,
    SeekTo { seconds: f32 },
    Destroy,
    SetLayout { intent: LayoutIntent },
}

impl SurfaceCommand {
    fn name(&self) -> &'static str {
        match self {
            SurfaceCommand::Initialize { .. } => "initialize",
            SurfaceCommand::LoadVideo { .. } => "load_video",
            SurfaceCommand::CueVideo { .. } => "cue_video",
            SurfaceCommand::Play => "play",
            SurfaceCommand::Pause => "pause",
            SurfaceCommand::SeekTo { .. } => "seek_to",
            SurfaceCommand::Destroy => "destroy",
            SurfaceCommand::SetLayout { .. } => "set_layout",
        }
    }
}

#[derive(Default)]
struct RecordingState {
    commands: Vec<SurfaceCommand>,
    events: VecDeque<PlayerEvent>,
    listener: Option<SharedListener>,
    layout: LayoutIntent,
    available: Size,
    content: Size,
    fail_next: Option<&'static str>,
}

/// In-memory player surface that records every command it receives.
///
/// Cloning yields another handle onto the same state, so a test can keep one
/// handle while the view owns the other.
#[derive(Clone)]
pub struct RecordingSurface {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingSurface {
    /// Create a surface inside a parent offering `available` pixels
    pub fn new(available: Size) -> Self {
        let state = RecordingState {
            available,
            content: Size::widescreen(available.width),
            ..Default::default()
        };
        RecordingSurface {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, command: SurfaceCommand) -> Result<()> {
        let mut s = self.lock();
        if s.fail_next == Some(command.name()) {
            s.fail_next = None;
            return Err(Error::Surface(format!("{} rejected by player", command.name())));
        }
        s.commands.push(command);
        Ok(())
    }

    /// Every command recorded so far, oldest first
    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.lock().commands.clone()
    }

    /// Commands excluding layout changes
    pub fn playback_commands(&self) -> Vec<SurfaceCommand> {
        self.lock()
            .commands
            .iter()
            .filter(|c| !matches!(c, SurfaceCommand::SetLayout { .. }))
            .cloned()
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.lock().commands.iter().filter(|c| c.name() == name).count()
    }

    pub fn clear(&self) {
        self.lock().commands.clear();
    }

    /// Make the next command with the given name fail with `Error::Surface`
    pub fn fail_next(&self, command: &'static str) {
        self.lock().fail_next = Some(command);
    }

    /// Queue a notification as if the player had raised it. The listener
    /// handed over at initialization sees it immediately.
    pub fn emit(&self, event: PlayerEvent) {
        let listener = self.lock().listener.clone();
        if let Some(listener) = listener {
            match &event {
                PlayerEvent::Ready => listener.on_ready(),
                PlayerEvent::StateChanged {
                    video_id,
                    position_seconds,
                    is_playing,
                } => listener.on_state_change(video_id.as_deref(), *position_seconds, *is_playing),
                PlayerEvent::Error(msg) => listener.on_error(msg),
            }
        }
        self.lock().events.push_back(event);
    }

    /// Shorthand for emitting `PlayerEvent::StateChanged`
    pub fn emit_state(&self, video_id: &str, position_seconds: f32, is_playing: bool) {
        self.emit(PlayerEvent::StateChanged {
            video_id: Some(video_id.to_string()),
            position_seconds,
            is_playing,
        });
    }

    /// Change the space offered by the parent, e.g. after a rotation
    pub fn set_available(&self, available: Size) {
        let mut s = self.lock();
        s.available = available;
        s.content = Size::widescreen(available.width);
    }
}

impl fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.lock();
        f.debug_struct("RecordingSurface")
            .field("commands", &s.commands.len())
            .field("pending_events", &s.events.len())
            .field("layout", &s.layout)
            .finish()
    }
}

impl PlayerSurface for RecordingSurface {
    fn initialize(&mut self, listener: Option<SharedListener>) -> Result<()> {
        self.record(SurfaceCommand::Initialize {
            with_listener: listener.is_some(),
        })?;
        self.lock().listener = listener;
        Ok(())
    }

    fn load_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.record(SurfaceCommand::LoadVideo {
            video_id: video_id.to_string(),
            start_seconds,
        })
    }

    fn cue_video(&mut self, video_id: &str, start_seconds: f32) -> Result<()> {
        self.record(SurfaceCommand::CueVideo {
            video_id: video_id.to_string(),
            start_seconds,
        })
    }

    fn play(&mut self) -> Result<()> {
        self.record(SurfaceCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.record(SurfaceCommand::Pause)
    }

    fn seek_to(&mut self, seconds: f32) -> Result<()> {
        self.record(SurfaceCommand::SeekTo { seconds })
    }

    fn destroy(&mut self) {
        let mut s = self.lock();
        s.commands.push(SurfaceCommand::Destroy);
        s.listener = None;
        s.events.clear();
    }

    fn set_layout(&mut self, intent: LayoutIntent) {
        let mut s = self.lock();
        s.layout = intent;
        s.commands.push(SurfaceCommand::SetLayout { intent });
    }

    fn layout(&self) -> LayoutIntent {
        self.lock().layout
    }

    fn resolved_size(&self) -> Size {
        let s = self.lock();
        s.layout.resolve(s.available, s.content)
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        self.lock().events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener(AtomicUsize);

    impl PlayerListener for CountingListener {
        fn on_state_change(&self, _: Option<&str>, _: f32, _: bool) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn records_commands_in_order() {
        let mut s = RecordingSurface::new(Size::new(1280, 720));
        s.initialize(None).unwrap();
        s.load_video("abc", 3.0).unwrap();
        s.play().unwrap();
        assert_eq!(
            s.commands(),
            vec![
                SurfaceCommand::Initialize { with_listener: false },
                SurfaceCommand::LoadVideo { video_id: "abc".into(), start_seconds: 3.0 },
                SurfaceCommand::Play,
            ]
        );
    }

    #[test]
    fn fail_next_only_fails_once() {
        let mut s = RecordingSurface::new(Size::new(1280, 720));
        s.fail_next("play");
        assert!(matches!(s.play(), Err(Error::Surface(_))));
        assert!(s.play().is_ok());
        assert_eq!(s.count("play"), 1);
    }

    #[test]
    fn emitted_events_reach_listener_and_queue() {
        let mut s = RecordingSurface::new(Size::new(1280, 720));
        let listener = Arc::new(CountingListener(AtomicUsize::new(0)));
        s.initialize(Some(listener.clone())).unwrap();
        s.emit_state("abc", 1.0, true);
        assert_eq!(listener.0.load(Ordering::SeqCst), 1);
        assert!(matches!(s.poll_event(), Some(PlayerEvent::StateChanged { .. })));
        assert!(s.poll_event().is_none());
    }

    #[test]
    fn resolved_size_follows_layout() {
        let mut s = RecordingSurface::new(Size::new(1280, 2000));
        assert_eq!(s.resolved_size(), Size::new(1280, 720));
        s.set_layout(LayoutIntent::fill());
        assert_eq!(s.resolved_size(), Size::new(1280, 2000));
    }
}
