//! Citrine - 3DS emulator frontend shell
//!
//! Headless runner: drives one emulation session against the built-in null
//! engine, with a console UI standing in for dialogs.

use anyhow::{bail, Context};
use clap::Parser;
use ct_core::config::LogLevel;
use ct_core::{Config, FrontendError, SurfaceHandle};
use ct_frontend::{ExitReason, LifecycleHooks, NativeCallbacks, Permission, Prompt, Responder, UiSink};
use ct_input::{ButtonId, ButtonState, InputOverlay, InputSink, PointerAction, PointerEvent};
use ct_session::{EmulationSession, NullEngine};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "citrine", version, about = "Run a 3DS title headlessly")]
struct Args {
    /// Game to load; relative paths not found as given are looked up in the
    /// configured games directory
    game: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds to run before shutting down
    #[arg(long, value_name = "SECS", default_value_t = 5.0)]
    run_for: f64,

    /// Size of the render surface
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "400x480")]
    surface: SurfaceSize,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy)]
struct SurfaceSize {
    width: u32,
    height: u32,
}

impl FromStr for SurfaceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("{v:?}: {e}"));
        let size = Self { width: parse(w)?, height: parse(h)? };
        if size.width == 0 || size.height == 0 {
            return Err("surface dimensions must be non-zero".to_owned());
        }
        Ok(size)
    }
}

/// Dialogs go to the log; every prompt is dismissed
struct ConsoleUi;

impl UiSink for ConsoleUi {
    fn show_prompt(&self, prompt: Prompt, responder: Responder) {
        match prompt {
            Prompt::CoreError { title, message } => tracing::error!("{}: {}", title, message),
            Prompt::Alert { title, message, .. } => tracing::warn!("{}: {}", title, message),
            Prompt::Permission(permission) => {
                tracing::warn!("Denying {} permission in headless mode", permission)
            }
        }
        responder.dismiss();
    }

    fn has_permission(&self, _permission: Permission) -> bool {
        false
    }

    fn show_exit(&self, reason: ExitReason) {
        if reason.is_error() {
            tracing::error!("{}", reason.caption());
        } else {
            tracing::info!("{}", reason.caption());
        }
    }
}

/// Input events go to the log
struct LoggingInput;

impl InputSink for LoggingInput {
    fn on_gamepad_event(&self, device: &str, button: ButtonId, state: ButtonState) {
        tracing::debug!("[{}] {:?} {:?}", device, button, state);
    }

    fn on_gamepad_move_event(&self, device: &str, axis: ButtonId, x: f32, y: f32) {
        tracing::debug!("[{}] {:?} ({:.2}, {:.2})", device, axis, x, y);
    }

    fn on_touch_event(&self, x: f32, y: f32, pressed: bool) {
        tracing::debug!("Touch ({}, {}) pressed={}", x, y, pressed);
    }

    fn on_touch_moved(&self, x: f32, y: f32) {
        tracing::debug!("Touch moved ({}, {})", x, y);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(level) = args.log_level {
        config.debug.log_level = level;
    }
    config.debug.log_path = config.paths.in_user_dir(&config.debug.log_path);
    ct_core::logging::init(&config.debug).context("initializing logging")?;

    tracing::info!("Starting Citrine");

    let game = config.paths.resolve_game(&args.game);
    if !game.is_file() {
        return Err(FrontendError::GameNotFound(game.display().to_string()).into());
    }
    if !(args.run_for.is_finite() && args.run_for >= 0.0) {
        bail!("--run-for must be a non-negative number of seconds");
    }

    run(&args, &config, &game)
}

fn run(args: &Args, config: &Config, game: &Path) -> anyhow::Result<()> {
    let engine = Arc::new(NullEngine::new());
    let session = Arc::new(EmulationSession::new(game.display().to_string(), Arc::clone(&engine)));

    let callbacks = NativeCallbacks::new();
    callbacks.attach_ui(Arc::new(ConsoleUi));

    let hooks = LifecycleHooks::new();
    {
        let session = Arc::clone(&session);
        hooks.add_shutdown_hook(move || session.stop());
    }
    {
        let session = Arc::clone(&session);
        hooks.add_pause_resume_hook(move || {
            if let Err(e) = session.toggle_pause() {
                tracing::error!("Failed to toggle pause: {}", e);
            }
        });
    }

    // The window reports its surface after the run request, as on a cold start
    session.request_run(false)?;
    let size = args.surface;
    session.surface_available(SurfaceHandle::new(1, size.width, size.height))?;
    if config.general.start_paused {
        hooks.pause_or_resume();
    }

    if config.overlay.enabled {
        tap_overlay(config, size)?;
    }

    thread::sleep(Duration::from_secs_f64(args.run_for));
    tracing::info!("Rendered {} frames of {}", engine.frames(), session.game_path());

    callbacks.exit_emulation(ExitReason::ShutdownRequested.code());
    hooks.close_game();
    hooks.clear();
    session.join_worker()?;
    callbacks.detach_ui();

    tracing::info!("Citrine shut down");
    Ok(())
}

/// Press and release A on the overlay once
fn tap_overlay(config: &Config, size: SurfaceSize) -> anyhow::Result<()> {
    let mut overlay = InputOverlay::new(&config.overlay, size.width, size.height);
    tracing::debug!("Overlay has {} controls", overlay.controls().len());

    let Some(a) = overlay.controls().buttons.iter().find(|b| b.id() == ButtonId::A) else {
        return Ok(());
    };
    let bounds = a.bounds();
    let (x, y) = (bounds.center_x() as f32, bounds.center_y() as f32);

    for action in [PointerAction::Down, PointerAction::Up] {
        overlay.on_touch(&PointerEvent::single(action, 0, x, y), &LoggingInput)?;
    }
    Ok(())
}
