//! Terminal preview of the MyKolachi scroll-driven page.
//!
//! The terminal is the viewport: scroll with the keyboard or mouse wheel and
//! the pinned sections animate exactly as their progress dictates.
//! Run with `--print-config` to dump the effective configuration, or
//! `--write-config` to save it.

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Span,
    widgets::{Gauge, Paragraph},
    Terminal,
};
use tokio::time::MissedTickBehavior;

use kolachi_scroll::app::{
    event::{drain_pending, spawn_event_reader},
    handler,
    state::AppState,
};
use kolachi_scroll::config::{self, AppConfig};
use kolachi_scroll::core::{lifecycle::StopToken, stl};
use kolachi_scroll::ui::{layout::AppLayout, stage::Stage, theme::Theme};

/// How long the event reader blocks before re-checking its stop token.
const EVENT_POLL: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven MyKolachi page in the terminal")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/kolachi-scroll/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Binary STL mesh shown after the globe zooms in.
    #[arg(long, value_name = "FILE.stl")]
    map: Option<PathBuf>,

    /// Frames per second (overrides the config file).
    #[arg(long)]
    fps: Option<u32>,

    /// Force the compact (narrow viewport) layout.
    #[arg(long)]
    compact: bool,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config", conflicts_with = "print_config")]
    write_config: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut cfg = match &cli.config {
        Some(path) if cli.write_config && !path.exists() => AppConfig::default(),
        Some(path) => AppConfig::load_from(path).with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(fps) = cli.fps {
        cfg.motion.fps = fps.max(1);
    }
    Ok(cfg)
}

// ───────────────────────────────────────── frame ────────────

fn draw(terminal: &mut Terminal<CrosstermBackend<Stderr>>, state: &AppState) -> Result<()> {
    terminal.draw(|frame| {
        let layout = AppLayout::from_area(frame.area());

        frame.render_widget(Stage::new(state), layout.stage_area);

        let section = state.current_section().map_or("", |s| s.title());
        let gauge = Gauge::default()
            .gauge_style(Theme::accent_style())
            .ratio(state.page_progress())
            .label(Span::styled(
                format!("{section} · {:.0}%", state.page_progress() * 100.0),
                Theme::hud_style(),
            ));
        frame.render_widget(gauge, layout.gauge_area);

        let hint = state.config.status_bar_hint();
        let status_text = state.status_message.as_deref().unwrap_or(&hint);
        let status = Paragraph::new(status_text).style(Theme::status_bar_style());
        frame.render_widget(status, layout.status_area);
    })?;
    Ok(())
}

/// Input is applied as it arrives, in whole batches.  The state advances
/// and the screen redraws only on frame ticks.
async fn run(terminal: &mut Terminal<CrosstermBackend<Stderr>>, state: &mut AppState, stop: &StopToken) -> Result<()> {
    let mut events = spawn_event_reader(EVENT_POLL, stop.clone());
    let mut frames = tokio::time::interval(state.config.motion.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    draw(terminal, state)?;
    loop {
        tokio::select! {
            Some(first) = events.recv() => {
                for event in drain_pending(first, &mut events) {
                    handler::handle_event(state, event);
                }
            }

            _ = frames.tick() => {
                state.update(Instant::now());
                draw(terminal, state)?;
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let user_config = load_config(&cli)?;

    if cli.print_config {
        if cli.config.is_none() {
            println!("# {}", config::config_path().display());
        }
        print!("{}", user_config.serialise());
        return Ok(());
    }

    if cli.write_config {
        let path = match &cli.config {
            Some(path) => {
                user_config.save_to(path)?;
                path.clone()
            }
            None => user_config.save()?,
        };
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mesh = cli.map.as_deref().and_then(stl::load).map(Arc::new);
    if let Some(ref mesh) = mesh {
        tracing::info!(triangles = mesh.triangle_count(), "3D map ready");
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(
        user_config,
        Rect::new(0, 0, size.width, size.height),
        cli.compact,
        Instant::now(),
    );
    state.mesh = mesh;

    let stop = StopToken::new();
    let result = run(&mut terminal, &mut state, &stop).await;

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    stop.cancel();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
