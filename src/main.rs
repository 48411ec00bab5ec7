//! playerhost - drive a player view from a scripted scenario.
//!
//! `replay` runs a JSON scenario against the in-memory player surface and
//! connectivity source and prints what reached the player. `probe` runs the
//! HTTP reachability check once.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playerhost::platform::{
    ManualConnectivity, NetworkEvent, PlayerEvent, RecordingSurface, Size, SurfaceCommand,
};
use playerhost::{PlayerView, ViewConfig};
use serde::{Deserialize, Serialize};

/// Player host scenario runner.
#[derive(Parser, Debug)]
#[command(name = "playerhost")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "warn", env = "PLAYERHOST_LOG_LEVEL")]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON scenario and print the player command log.
    Replay {
        /// Scenario file.
        #[arg(value_name = "FILE")]
        script: PathBuf,
    },
    /// Check reachability once using the configured probe.
    Probe {
        /// JSON view configuration.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Scenario {
    #[serde(default)]
    online: bool,
    #[serde(default)]
    config: ViewConfig,
    #[serde(default = "default_surface")]
    surface: Size,
    steps: Vec<Step>,
}

fn default_surface() -> Size {
    Size::new(1280, 720)
}

#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Initialize { handle_network_events: Option<bool> },
    SetOnline { online: bool },
    Network { event: NetworkEvent },
    PlayerState {
        video_id: Option<String>,
        position_seconds: f32,
        is_playing: bool,
    },
    LoadVideo { video_id: String, start_seconds: f32 },
    CueVideo { video_id: String, start_seconds: f32 },
    Play,
    Pause,
    SeekTo { seconds: f32 },
    EnterFullScreen,
    ExitFullScreen,
    ToggleFullScreen,
    Resize { width: u32, height: u32 },
    Release,
}

#[derive(Serialize)]
struct StepError {
    step: usize,
    error: String,
}

#[derive(Serialize)]
struct Report {
    state: String,
    released: bool,
    full_screen: bool,
    controls: Size,
    commands: Vec<SurfaceCommand>,
    errors: Vec<StepError>,
}

fn run_step(
    view: &mut PlayerView,
    surface: &RecordingSurface,
    network: &ManualConnectivity,
    step: Step,
) -> playerhost::Result<()> {
    match step {
        Step::Initialize { handle_network_events } => match handle_network_events {
            Some(handle) => view.initialize(None, handle)?,
            None => view.initialize_default(None)?,
        },
        Step::SetOnline { online } => network.set_online(online),
        Step::Network { event } => network.emit(event),
        Step::PlayerState {
            video_id,
            position_seconds,
            is_playing,
        } => surface.emit(PlayerEvent::StateChanged {
            video_id,
            position_seconds,
            is_playing,
        }),
        Step::LoadVideo { video_id, start_seconds } => view.load_video(&video_id, start_seconds)?,
        Step::CueVideo { video_id, start_seconds } => view.cue_video(&video_id, start_seconds)?,
        Step::Play => view.play_video()?,
        Step::Pause => view.pause_video()?,
        Step::SeekTo { seconds } => view.seek_to(seconds)?,
        Step::EnterFullScreen => {
            view.enter_full_screen();
        }
        Step::ExitFullScreen => {
            view.exit_full_screen();
        }
        Step::ToggleFullScreen => {
            view.toggle_full_screen();
        }
        Step::Resize { width, height } => {
            surface.set_available(Size::new(width, height));
            view.on_layout();
        }
        Step::Release => view.release()?,
    }
    view.pump()?;
    Ok(())
}

fn replay(script: &Path) -> Result<Report> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read scenario {}", script.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scenario {}", script.display()))?;
    scenario.config.validate().context("Invalid view configuration")?;

    let surface = RecordingSurface::new(scenario.surface);
    let network = ManualConnectivity::new(scenario.online);
    let mut view = PlayerView::new(
        Box::new(surface.clone()),
        Box::new(network.clone()),
        scenario.config,
    );

    let mut errors = Vec::new();
    for (index, step) in scenario.steps.into_iter().enumerate() {
        log::debug!("Step {}: {:?}", index, step);
        if let Err(e) = run_step(&mut view, &surface, &network, step) {
            log::warn!("Step {} failed: {}", index, e);
            errors.push(StepError {
                step: index,
                error: e.to_string(),
            });
        }
    }

    Ok(Report {
        state: format!("{:?}", view.state()),
        released: view.is_released(),
        full_screen: view.is_full_screen(),
        controls: view.controls().size(),
        commands: surface.playback_commands(),
        errors,
    })
}

#[cfg(not(feature = "probe"))]
fn probe(_config: Option<&Path>) -> Result<bool> {
    anyhow::bail!("playerhost was built without the `probe` feature")
}

#[cfg(feature = "probe")]
fn probe(config: Option<&Path>) -> Result<bool> {
    use playerhost::platform::{ConnectivityMonitor, ProbeConnectivity};

    let config: ViewConfig = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => ViewConfig::default(),
    };
    config.validate().context("Invalid view configuration")?;
    let monitor = ProbeConnectivity::new(&config.probe)?;
    Ok(monitor.is_online())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    match args.command {
        Command::Replay { script } => {
            let report = replay(&script)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Probe { config } => {
            let online = probe(config.as_deref())?;
            println!("{}", if online { "online" } else { "offline" });
            if !online {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
