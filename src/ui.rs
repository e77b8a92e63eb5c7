//! Terminal UI rendering with ratatui

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell, EMPTY};
use crate::game::Game;
use crate::piece::Piece;
use crate::settings::Settings;
use crate::tetromino::TetrominoType;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Total width needed: board(10*2 + 2 borders) + side panel(18) = 40
const GAME_WIDTH: u16 = 40;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = 22;

/// Colour for a locked cell value or piece kind
pub fn cell_color(value: Cell) -> Color {
    match TetrominoType::from_cell_value(value) {
        Some(TetrominoType::I) => Color::Cyan,
        Some(TetrominoType::O) => Color::Yellow,
        Some(TetrominoType::T) => Color::Magenta,
        Some(TetrominoType::J) => Color::Blue,
        Some(TetrominoType::L) => Color::Red,
        Some(TetrominoType::S) => Color::Green,
        Some(TetrominoType::Z) => Color::Rgb(139, 0, 0), // dark red
        None => Color::Gray,
    }
}

/// Render the whole game screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // board | next + stats + controls
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Length(GAME_WIDTH - (BOARD_WIDTH as u16 * 2 + 2)),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Next piece
            Constraint::Length(10), // Stats
            Constraint::Min(7),     // Controls
        ])
        .split(main_layout[1]);

    if settings.visual.show_next {
        render_next(frame, right_layout[0], game.next_piece(), settings);
    }
    render_stats(frame, right_layout[1], game);
    render_controls(frame, right_layout[2]);

    if game.is_game_over() {
        render_game_over(frame, area, game_area, game.score());
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board with the active piece on top
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let board = game.board();
    // The active piece is hidden once the game is over
    let active = (!game.is_game_over()).then(|| game.active_piece());
    let active_value = active.map_or(EMPTY, |piece| piece.piece_type.cell_value());

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for y in 0..board.height() as i32 {
        let spans: Vec<Span> = (0..board.width() as i32)
            .map(|x| {
                let on_piece = active.is_some_and(|piece| piece.cells().any(|cell| cell == (x, y)));
                let value = if on_piece { active_value } else { board.get(x, y) };
                if value == EMPTY {
                    Span::styled(empty_char, Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(block_char, Style::default().fg(cell_color(value)))
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, piece: &Piece, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();

    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let color = cell_color(piece.piece_type.cell_value());
    let lines: Vec<Line> = piece
        .shape()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| {
                    if cell != 0 {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.score()),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.level()),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.lines_cleared()),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let hint = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::styled("Controls:", hint),
        Line::styled("↑   Rotate", hint),
        Line::styled("← → Move", hint),
        Line::styled("↓   Drop", hint),
        Line::styled("R   Restart", hint),
        Line::styled("Q   Quit", hint),
    ];
    frame.render_widget(Paragraph::new(lines), area.inner(Margin::new(1, 0)));
}

/// Play-again prompt shown over the dimmed game area
fn render_game_over(frame: &mut Frame, area: Rect, game_area: Rect, score: u64) {
    // Keep the final board visible but dimmed
    let dim = Block::default().style(Style::default().bg(Color::DarkGray));
    frame.render_widget(dim, game_area);

    let popup_area = center_rect(area, 26, 7);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled("GAME OVER", Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(format!("Final Score: {}", score), Style::default().fg(Color::White)),
        Line::raw(""),
        Line::styled("Play again? (y/n)", Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(game: &Game) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        let settings = Settings::default();
        terminal.draw(|frame| render_game(frame, game, &settings)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(game: &Game) -> String {
        draw(game).content().iter().map(|cell| cell.symbol()).collect()
    }

    fn topped_out_game() -> Game {
        let mut board = Board::default();
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, 0, 1);
        }
        Game::with_board(board, 2)
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(cell_color(TetrominoType::I.cell_value()), Color::Cyan);
        assert_eq!(cell_color(TetrominoType::Z.cell_value()), Color::Rgb(139, 0, 0));
        assert_eq!(cell_color(0), Color::Gray);
        assert_eq!(cell_color(42), Color::Gray);
    }

    #[test]
    fn test_renders_stats() {
        let game = Game::with_seed(1);
        let text = screen_text(&game);
        assert!(text.contains("SCORE"));
        assert!(text.contains("LEVEL"));
        assert!(text.contains("NEXT"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_game_over_prompt() {
        let game = topped_out_game();
        assert!(game.is_game_over());

        let text = screen_text(&game);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Play again? (y/n)"));
    }

    #[test]
    fn test_game_over_dims_game_area() {
        // 40x22 game area centred in 60x26 starts at (10, 2); (11, 3) is the
        // board's top-left cell, well outside the popup
        let playing = draw(&Game::with_seed(1));
        assert_ne!(playing.cell((11, 3)).unwrap().bg, Color::DarkGray);

        let over = draw(&topped_out_game());
        let corner = over.cell((11, 3)).unwrap();
        assert_eq!(corner.bg, Color::DarkGray);
        // Locked cells stay visible under the dim layer
        assert_eq!(corner.symbol(), "█");
        // Outside the game area nothing changes
        assert_ne!(over.cell((0, 0)).unwrap().bg, Color::DarkGray);
    }
}
