//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use minimax_tictactoe::{Move, Player, Square};

use super::app::{App, ClickMap, Phase};

/// Renders the whole screen and reports where the clickable areas landed.
pub fn draw(frame: &mut Frame, app: &App) -> ClickMap {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
        ])
        .split(area);

    // Title
    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Board
    let cursor = (app.phase() == Phase::HumanTurn).then_some(app.cursor());
    let winning = app.winning_line();
    let highlight = winning.as_ref().map_or(&[][..], |line| &line[..]);
    let cells = draw_board(frame, chunks[1], app, cursor, highlight);

    // Status
    let status_text = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let mut click_map = ClickMap {
        cells,
        ..ClickMap::default()
    };
    if let Phase::GameOver(outcome) = app.phase() {
        let (restart, quit) = draw_end_screen(frame, area, app.end_message(outcome));
        click_map.restart = Some(restart);
        click_map.quit = Some(quit);
    }
    click_map
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    cursor: Option<Move>,
    highlight: &[Move],
) -> [[Rect; 3]; 3] {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let mut cells = [[Rect::default(); 3]; 3];
    for (row, cell_row) in cells.iter_mut().enumerate() {
        *cell_row = draw_row(frame, rows[row * 2], app, row, cursor, highlight);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
    cells
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    row: usize,
    cursor: Option<Move>,
    highlight: &[Move],
) -> [Rect; 3] {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        let mv = Move::new(row, col);
        draw_cell(frame, cols[col * 2], app, mv, cursor == Some(mv), highlight.contains(&mv));
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
    [cols[0], cols[2], cols[4]]
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, mv: Move, selected: bool, winning: bool) {
    let (symbol, base_style) = match app.game().board().get(mv) {
        Square::Empty => {
            let label = mv.index().map_or_else(String::new, |i| format!(" {} ", i + 1));
            (label, Style::default().fg(Color::DarkGray))
        }
        Square::Occupied(Player::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically center the symbol in the 3-line cell.
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
        Line::from(""),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"), Line::from("│"), Line::from("│")])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

const RESTART_LABEL: &str = "[ Restart ]";
const QUIT_LABEL: &str = "[ Quit ]";

/// Draws the end-screen popup; returns the restart and quit button areas.
fn draw_end_screen(frame: &mut Frame, area: Rect, headline: &str) -> (Rect, Rect) {
    let popup = center_rect(area, 36, 7);
    let block = Block::default().title("Game Over").borders(Borders::ALL);
    let inner = block.inner(popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black).fg(Color::White))
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);

    // Button row sits one blank line below the headline.
    let button_row = Rect {
        y: inner.y.saturating_add(3).min(inner.bottom().saturating_sub(1)),
        height: 1,
        ..inner
    };
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(RESTART_LABEL.len() as u16),
            Constraint::Length(4),
            Constraint::Length(QUIT_LABEL.len() as u16),
            Constraint::Fill(1),
        ])
        .split(button_row);

    let button_style = Style::default()
        .bg(Color::White)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(RESTART_LABEL).style(button_style), buttons[1]);
    frame.render_widget(Paragraph::new(QUIT_LABEL).style(button_style), buttons[3]);

    (buttons[1], buttons[3])
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax_tictactoe::TuiConfig;
    use ratatui::{Terminal, backend::TestBackend, layout::Position};
    use std::time::Instant;

    fn render(app: &App) -> ClickMap {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
        let mut click_map = ClickMap::default();
        terminal
            .draw(|f| click_map = draw(f, app))
            .expect("draw frame");
        click_map
    }

    #[test]
    fn test_draw_records_board_cells() {
        let app = App::new(&TuiConfig::default());
        let map = render(&app);

        for mv in Move::ALL {
            let cell = map.cells[mv.row][mv.col];
            assert_eq!((cell.width, cell.height), (12, 3));
            let centre = Position::new(cell.x + cell.width / 2, cell.y + 1);
            assert_eq!(map.cell_at(centre), Some(mv));
        }
        assert_eq!(map.restart, None);
        assert_eq!(map.quit, None);
    }

    #[test]
    fn test_click_in_drawn_cell_plays_that_square() {
        let mut app = App::new(&TuiConfig::default());
        let map = render(&app);
        app.set_click_map(map);

        let cell = map.cells[0][2];
        app.handle_click(cell.x + 1, cell.y + 1, Instant::now());
        assert_eq!(app.game().history(), &[Move::new(0, 2)]);
    }
}
