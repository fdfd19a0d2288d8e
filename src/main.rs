//! Interactive gallery for the desk-widgets crate.
//!
//! Shows every widget in one screen: a menubar, a resizable split with an
//! expander over an icon grid on one side and tabs over a list view on the
//! other, plus context and dropdown menus.

mod app;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use desk_widgets::config::{GalleryConfig, MAX_DOUBLE_TAP_MS, MIN_DOUBLE_TAP_MS};
use desk_widgets::core::drag::Orientation;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::GalleryState,
    view,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Desktop-style widget gallery")]
struct Cli {
    /// Split direction: `vertical` (side by side) or `horizontal` (stacked).
    #[arg(long, value_parser = parse_orientation)]
    orientation: Option<Orientation>,

    /// Double-click window in milliseconds.
    #[arg(long)]
    double_tap_ms: Option<u64>,

    /// Disable alternate row shading in the list view.
    #[arg(long)]
    no_zebra: bool,
}

fn parse_orientation(s: &str) -> Result<Orientation, String> {
    Orientation::parse(s).ok_or_else(|| format!("expected vertical or horizontal, got `{s}`"))
}

impl Cli {
    /// Command-line flags override the config file.
    fn apply(&self, config: &mut GalleryConfig) {
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if let Some(ms) = self.double_tap_ms {
            config.double_tap_ms = ms.clamp(MIN_DOUBLE_TAP_MS, MAX_DOUBLE_TAP_MS);
        }
        if self.no_zebra {
            config.zebra = false;
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Only prints when RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = GalleryConfig::load();
    cli.apply(&mut config);
    tracing::debug!(?config, "starting gallery");
    let mut state = GalleryState::new(config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let result = run(&mut terminal, &mut state, &mut events).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut GalleryState,
    events: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            view::render(state, area, frame.buffer_mut());
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(state, m),
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) => {}
            None => break, // reader task gone
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
