//! Application state and logic.

use crossterm::event::KeyCode;
use minimax_tictactoe::{Board, Game, Move, Outcome, Player, TuiConfig, winning_line};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::input::{key_to_move, move_cursor};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the human to pick a square.
    HumanTurn,
    /// The AI should move; no search has been started yet.
    AiPending,
    /// A search is running on a worker.
    AiThinking,
    /// The game just ended; the final board stays up until `since + delay`.
    Finishing {
        /// Final outcome.
        outcome: Outcome,
        /// When the last move was played.
        since: Instant,
    },
    /// End screen with restart/quit options.
    GameOver(Outcome),
}

/// Screen areas that react to mouse clicks, as laid out by the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickMap {
    /// Board squares, indexed `[row][col]`.
    pub cells: [[Rect; 3]; 3],
    /// End-screen restart button, while the end screen is up.
    pub restart: Option<Rect>,
    /// End-screen quit button, while the end screen is up.
    pub quit: Option<Rect>,
}

impl ClickMap {
    /// Returns the square under the given screen position.
    pub fn cell_at(&self, pos: Position) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|mv| self.cells[mv.row][mv.col].contains(pos))
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: Game,
    human: Player,
    cursor: Move,
    phase: Phase,
    status_message: String,
    end_screen_delay: Duration,
    click_map: ClickMap,
    should_quit: bool,
}

impl App {
    /// Creates a new application from presentation settings.
    #[instrument(skip(config), fields(human = %config.human_player()))]
    pub fn new(config: &TuiConfig) -> Self {
        let mut app = Self {
            game: Game::new(),
            human: *config.human_player(),
            cursor: Move::new(1, 1),
            phase: Phase::HumanTurn,
            status_message: String::new(),
            end_screen_delay: Duration::from_millis(*config.end_screen_delay_ms()),
            click_map: ClickMap::default(),
            should_quit: false,
        };
        app.begin_turn();
        app
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Gets the cursor square.
    pub fn cursor(&self) -> Move {
        self.cursor
    }

    /// Gets the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Squares to highlight as the winning line.
    pub fn winning_line(&self) -> Option<[Move; 3]> {
        winning_line(self.game.board())
    }

    /// Headline for the end screen, from the human's point of view.
    pub fn end_message(&self, outcome: Outcome) -> &'static str {
        match outcome.winner() {
            Some(player) if player == self.human => "You Win!",
            Some(_) => "You Lose!",
            None => "It's a Tie!",
        }
    }

    /// Records where the last frame put the clickable areas.
    pub fn set_click_map(&mut self, click_map: ClickMap) {
        self.click_map = click_map;
    }

    /// Handles a key press.
    #[instrument(skip(self, now), fields(phase = ?self.phase))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.submit(self.cursor, now),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            other => {
                if let Some(mv) = key_to_move(other) {
                    self.cursor = mv;
                    self.submit(mv, now);
                }
            }
        }
    }

    /// Handles a left click at a terminal cell.
    ///
    /// On the end screen only the buttons respond; otherwise a click on a
    /// square plays it like Enter on the cursor.
    #[instrument(skip(self, now), fields(phase = ?self.phase))]
    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        let pos = Position::new(column, row);

        if let Phase::GameOver(_) = self.phase {
            if self.click_map.restart.is_some_and(|button| button.contains(pos)) {
                self.restart();
            } else if self.click_map.quit.is_some_and(|button| button.contains(pos)) {
                info!("User quit");
                self.should_quit = true;
            }
            return;
        }

        if let Some(mv) = self.click_map.cell_at(pos) {
            self.cursor = mv;
            self.submit(mv, now);
        }
    }

    /// Submits a human move, filtering illegal squares before they reach the engine.
    #[instrument(skip(self, now))]
    pub fn submit(&mut self, mv: Move, now: Instant) {
        if self.phase != Phase::HumanTurn {
            debug!(phase = ?self.phase, "Ignoring move outside the human's turn");
            return;
        }
        if !self.game.board().is_empty(mv) {
            self.status_message = format!("{} is taken, pick another square.", mv.label());
            return;
        }

        match self.game.play(mv) {
            Ok(outcome) => {
                debug!(%mv, "Human move applied");
                self.after_move(outcome, now);
            }
            Err(e) => {
                warn!(error = %e, "Engine rejected a filtered move");
                self.status_message = format!("Move error: {}", e);
            }
        }
    }

    /// Returns the board to search if the AI should start thinking.
    ///
    /// Called once per frame; hands out each request only once.
    pub fn take_ai_request(&mut self) -> Option<Board> {
        if self.phase != Phase::AiPending {
            return None;
        }
        self.phase = Phase::AiThinking;
        self.status_message = "AI is thinking...".to_string();
        Some(*self.game.board())
    }

    /// Applies the AI's reply for `board`. Replies for a board that is no
    /// longer current (the game was restarted meanwhile) are dropped.
    #[instrument(skip(self, board, now))]
    pub fn apply_ai_move(&mut self, board: Board, mv: Option<Move>, now: Instant) {
        if self.phase != Phase::AiThinking || board != *self.game.board() {
            debug!("Dropping stale AI reply");
            return;
        }

        let Some(mv) = mv else {
            warn!("Search returned no move on a live board");
            self.status_message = "AI found no move.".to_string();
            return;
        };

        match self.game.play(mv) {
            Ok(outcome) => {
                info!(%mv, "AI move applied");
                self.after_move(outcome, now);
                if !outcome.is_over() {
                    self.status_message = format!("AI played {}. Your turn.", mv.label());
                }
            }
            Err(e) => {
                warn!(error = %e, "AI move rejected");
                self.status_message = format!("Move error: {}", e);
            }
        }
    }

    /// Advances time-based transitions.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Finishing { outcome, since } = self.phase {
            if now.duration_since(since) >= self.end_screen_delay {
                debug!(%outcome, "Showing end screen");
                self.phase = Phase::GameOver(outcome);
                self.status_message = format!(
                    "{} Press 'r' or click Restart, 'q' or click Quit.",
                    self.end_message(outcome)
                );
            }
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.restart();
        self.cursor = Move::new(1, 1);
        self.begin_turn();
    }

    fn after_move(&mut self, outcome: Outcome, now: Instant) {
        if outcome.is_over() {
            self.phase = Phase::Finishing { outcome, since: now };
            self.status_message = outcome.to_string();
        } else {
            self.begin_turn();
        }
    }

    fn begin_turn(&mut self) {
        if self.game.to_move() == self.human {
            self.phase = Phase::HumanTurn;
            self.status_message = format!(
                "Your turn ({}). Click a square, arrows + Enter, or keys 1-9.",
                self.human
            );
        } else {
            self.phase = Phase::AiPending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax_tictactoe::best_move;

    fn app_with(human: Player) -> App {
        App::new(
            &TuiConfig::default()
                .with_human_player(human)
                .with_end_screen_delay_ms(0),
        )
    }

    /// A 3x3 grid of 10x3 cells starting at the terminal origin.
    fn grid_click_map() -> ClickMap {
        let mut map = ClickMap::default();
        for mv in Move::ALL {
            map.cells[mv.row][mv.col] = Rect::new(mv.col as u16 * 10, mv.row as u16 * 3, 10, 3);
        }
        map
    }

    fn play_until_end_screen(app: &mut App, now: Instant) -> Outcome {
        while !matches!(app.phase(), Phase::Finishing { .. }) {
            match app.phase() {
                Phase::HumanTurn => {
                    let mv = app.game().board().empty_cells().next().expect("open square");
                    app.submit(mv, now);
                }
                Phase::AiPending => answer_ai(app, now),
                other => panic!("unexpected phase {:?}", other),
            }
        }
        app.tick(now);
        match app.phase() {
            Phase::GameOver(outcome) => outcome,
            other => panic!("expected end screen, got {:?}", other),
        }
    }

    fn answer_ai(app: &mut App, now: Instant) {
        let board = app.take_ai_request().expect("AI should be pending");
        app.apply_ai_move(board, best_move(&board), now);
    }

    #[test]
    fn test_human_move_hands_turn_to_ai() {
        let mut app = app_with(Player::X);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('5'), now);

        assert_eq!(app.phase(), Phase::AiPending);
        assert_eq!(app.game().history(), &[Move::new(1, 1)]);
        assert!(app.take_ai_request().is_some());
        assert!(app.take_ai_request().is_none());
    }

    #[test]
    fn test_taken_square_is_filtered() {
        let mut app = app_with(Player::X);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('1'), now);
        answer_ai(&mut app, now);
        let played = app.game().history().to_vec();
        assert_eq!(app.phase(), Phase::HumanTurn);

        app.handle_key(KeyCode::Char('1'), now);
        assert_eq!(app.game().history(), played.as_slice());
        assert!(app.status_message().contains("taken"));
    }

    #[test]
    fn test_ai_moves_first_when_human_plays_o() {
        let mut app = app_with(Player::O);
        assert_eq!(app.phase(), Phase::AiPending);
        answer_ai(&mut app, Instant::now());
        assert_eq!(app.phase(), Phase::HumanTurn);
        assert_eq!(app.game().history().len(), 1);
    }

    #[test]
    fn test_stale_ai_reply_is_dropped() {
        let mut app = app_with(Player::X);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('5'), now);
        let board = app.take_ai_request().expect("pending");
        app.restart();

        app.apply_ai_move(board, Some(Move::new(0, 0)), now);
        assert!(app.game().history().is_empty());
        assert_eq!(app.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_game_reaches_end_screen_and_restarts() {
        let mut app = app_with(Player::X);
        let now = Instant::now();
        // Play the first legal square each turn; the AI never loses.
        let outcome = play_until_end_screen(&mut app, now);
        assert_ne!(app.end_message(outcome), "You Win!");

        app.handle_key(KeyCode::Char('r'), now);
        assert_eq!(app.phase(), Phase::HumanTurn);
        assert!(app.game().history().is_empty());
    }

    #[test]
    fn test_end_message_follows_winner() {
        let app = app_with(Player::O);
        assert_eq!(app.end_message(Outcome::Win(Player::O)), "You Win!");
        assert_eq!(app.end_message(Outcome::Win(Player::X)), "You Lose!");
        assert_eq!(app.end_message(Outcome::Draw), "It's a Tie!");
    }

    #[test]
    fn test_click_on_square_plays_it() {
        let mut app = app_with(Player::X);
        app.set_click_map(grid_click_map());
        // Bottom-right cell spans columns 20..30, rows 6..9.
        app.handle_click(25, 7, Instant::now());

        assert_eq!(app.game().history(), &[Move::new(2, 2)]);
        assert_eq!(app.cursor(), Move::new(2, 2));
        assert_eq!(app.phase(), Phase::AiPending);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = app_with(Player::X);
        app.set_click_map(grid_click_map());
        app.handle_click(50, 50, Instant::now());

        assert!(app.game().history().is_empty());
        assert_eq!(app.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_click_on_taken_square_is_ignored() {
        let mut app = app_with(Player::X);
        app.set_click_map(grid_click_map());
        let now = Instant::now();
        app.handle_click(0, 0, now);
        answer_ai(&mut app, now);
        let played = app.game().history().to_vec();

        app.handle_click(1, 1, now);
        assert_eq!(app.game().history(), played.as_slice());
        assert_eq!(app.phase(), Phase::HumanTurn);
        assert!(app.status_message().contains("taken"));
    }

    #[test]
    fn test_end_screen_buttons() {
        let mut app = app_with(Player::X);
        let now = Instant::now();
        play_until_end_screen(&mut app, now);

        let mut map = grid_click_map();
        map.restart = Some(Rect::new(40, 10, 11, 1));
        map.quit = Some(Rect::new(55, 10, 8, 1));
        app.set_click_map(map);

        // Squares are inert behind the end screen.
        let played = app.game().history().len();
        app.handle_click(25, 7, now);
        assert_eq!(app.game().history().len(), played);
        assert!(matches!(app.phase(), Phase::GameOver(_)));

        app.handle_click(45, 10, now);
        assert_eq!(app.phase(), Phase::HumanTurn);
        assert!(app.game().history().is_empty());
        assert!(!app.should_quit());

        play_until_end_screen(&mut app, now);
        app.handle_click(58, 10, now);
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(Player::X);
        app.handle_key(KeyCode::Esc, Instant::now());
        assert!(app.should_quit());
    }
}
