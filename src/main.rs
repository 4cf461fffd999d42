mod shared;
mod tui;
mod audio_api;
mod audio;
mod board;
mod config;
mod loader;
mod logging;

use std::time::Instant;
use clap::Parser;
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use audio::AudioHandle;
use board::PadBoard;
use config::Cli;
use shared::{InputEvent, PADS};

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(&cli.log_path())?;
    info!(?cli, "starting padboard");

    // A missing or unusable device is not worth stopping for: the board
    // still works, it just plays nothing.
    let audio = if cli.mute {
        AudioHandle::muted()
    } else {
        audio::start_audio().unwrap_or_else(|e| {
            warn!("audio unavailable, running muted: {e:#}");
            AudioHandle::muted()
        })
    };

    if !audio.is_muted() {
        // detached: it either finishes on its own or dies with the process
        if let Err(e) = loader::clip_loader::spawn_preload(
            &PADS,
            audio.sample_rate(),
            cli.fetch_timeout(),
            audio.sender(),
        ) {
            warn!("clips will not load: {e:#}");
        }
    }

    let mut board = PadBoard::new(&PADS, cli.flash());

    let _guard = TerminalSession::start()?; // auto drops when out of scope
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = cli.tick_rate();
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let now = Instant::now();
        board.tick(now);
        let ds = board.display_state();

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), board.pads(), ds, &mut tui_state);
        })?;

        let events = tui::input::poll_input(tick_rate, &tui_state)?;
        let now = Instant::now();
        for event in events {
            if event == InputEvent::Quit {
                info!("quit requested");
                return Ok(());
            }
            for cmd in board.handle_input(event, now) {
                audio.send(cmd);
            }
        }
    }
}

// Owns the terminal modes the board needs: raw keys, press/release reporting
// where supported, and mouse capture. Everything is handed back on drop, so
// no listener outlives the session even when `run` bails out early.
struct TerminalSession;

impl TerminalSession {
    fn start() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = TerminalSession; // from here on, Drop undoes whatever got enabled
        crossterm::execute!(
            std::io::stdout(),
            terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture
        )?;
        // Falls back gracefully if the terminal doesn't support it.
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::PushKeyboardEnhancementFlags(
                crossterm::event::KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        );
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags,
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
