use crate::game::{Board, Piece, Player, Position, Rank, BOARD_SIZE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DARK_SQUARE: Color = Color::Rgb(60, 60, 60);
const LIGHT_SQUARE: Color = Color::Rgb(170, 150, 120);
const ORANGE: Color = Color::Rgb(255, 140, 0);

/// Squares the board widget draws with extra emphasis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlights<'a> {
    pub cursor: Option<Position>,
    pub selected: Option<Position>,
    pub targets: &'a [Position],
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Green => Color::Green,
        Player::Orange => ORANGE,
    }
}

fn piece_symbol(piece: Piece) -> &'static str {
    match piece.rank {
        Rank::Man => " ● ",
        Rank::King => " ♛ ",
    }
}

/// Render the board with row 7 at the top and coordinates on two edges.
pub fn render_board(frame: &mut Frame, board: &Board, highlights: Highlights<'_>, area: Rect) {
    let mut lines = Vec::new();

    let mut header = vec![Span::raw("   ")];
    for col in 0..BOARD_SIZE {
        header.push(Span::styled(
            format!(" {col} "),
            column_style(col, highlights.cursor),
        ));
    }
    lines.push(Line::from(header));

    for row in (0..BOARD_SIZE).rev() {
        let label_style = match highlights.cursor {
            Some(cursor) if cursor.row == row => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        let mut spans = vec![Span::styled(format!(" {row} "), label_style)];
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            spans.push(square_span(board, pos, &highlights));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn column_style(col: usize, cursor: Option<Position>) -> Style {
    match cursor {
        Some(cursor) if cursor.col == col => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        _ => Style::default(),
    }
}

fn square_span(board: &Board, pos: Position, highlights: &Highlights<'_>) -> Span<'static> {
    let mut bg = if pos.is_dark() { DARK_SQUARE } else { LIGHT_SQUARE };
    if highlights.selected == Some(pos) {
        bg = Color::Blue;
    }
    if highlights.cursor == Some(pos) {
        bg = Color::Cyan;
    }

    match board.get_piece(pos).ok().flatten() {
        Some(piece) => Span::styled(
            piece_symbol(piece),
            Style::default()
                .fg(player_color(piece.owner))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        None if highlights.targets.contains(&pos) => {
            Span::styled(" ∘ ", Style::default().fg(Color::LightCyan).bg(bg))
        }
        None => Span::styled("   ", Style::default().bg(bg)),
    }
}
