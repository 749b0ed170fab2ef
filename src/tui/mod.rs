//! Terminal UI for playing against the minimax AI

#![warn(missing_docs)]

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use minimax_tictactoe::{Board, Move, TuiConfig, best_move};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use app::{App, ClickMap};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A finished search, tagged with the board it was run on.
#[derive(Debug)]
struct AiReply {
    board: Board,
    mv: Option<Move>,
}

/// Puts the terminal back into cooked mode when dropped, including when the
/// game loop errors out or panics.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enables raw mode, the alternate screen and mouse capture.
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }

    /// Undoes [`TerminalGuard::enter`]. Only the first call does anything.
    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
        raw.and(screen)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Run the TUI client
pub async fn run_tui(config: TuiConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?config, "Starting tic-tac-toe TUI");

    let mut guard = TerminalGuard::enter().context("Failed to set up terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, App::new(&config)).await;

    guard.restore().context("Failed to restore terminal")?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Draw, dispatch AI searches, read keys and clicks, repeat until the user quits.
#[instrument(skip_all)]
async fn run_game(terminal: &mut Tui, mut app: App) -> Result<()> {
    use tokio::time::sleep;

    let (ai_tx, mut ai_rx) = mpsc::unbounded_channel::<AiReply>();

    loop {
        let mut click_map = ClickMap::default();
        terminal.draw(|f| click_map = ui::draw(f, &app))?;
        app.set_click_map(click_map);

        // Search off the render loop and post the result back
        if let Some(board) = app.take_ai_request() {
            debug!("Spawning AI search");
            let tx = ai_tx.clone();
            tokio::task::spawn_blocking(move || {
                let mv = best_move(&board);
                if tx.send(AiReply { board, mv }).is_err() {
                    debug!("UI closed before AI reply");
                }
            });
        }

        while let Ok(reply) = ai_rx.try_recv() {
            debug!(?reply, "AI reply received");
            app.apply_ai_move(reply.board, reply.mv, Instant::now());
        }

        // Check for keyboard and mouse input (non-blocking)
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code, Instant::now());
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => app.handle_click(column, row, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit() {
            return Ok(());
        }

        // Frame rate
        sleep(Duration::from_millis(16)).await;
    }
}
