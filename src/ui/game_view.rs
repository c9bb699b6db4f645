use super::board_widget::{self, player_color, Highlights};
use crate::game::{GameResult, GameState, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    highlights: Highlights<'_>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(4),  // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    board_widget::render_board(frame, game_state.board(), highlights, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: ratatui::layout::Rect) {
    let current_player = game_state.current_player();

    let (status, color) = match game_state.outcome() {
        GameResult::Winner(winner) => (format!("Game Over  |  {} wins", winner.name()), player_color(winner)),
        GameResult::Draw => ("Game Over  |  Draw".to_string(), Color::White),
        GameResult::InProgress => {
            let chain = if game_state.active_piece().is_some() { "  (keep capturing)" } else { "" };
            (
                format!("Current Player: {}{}", current_player.name(), chain),
                player_color(current_player),
            )
        }
    };

    let tally = Line::from(vec![
        Span::raw(status),
        Span::raw("  |  captured "),
        Span::styled(
            game_state.captured_by(Player::Green).to_string(),
            Style::default().fg(player_color(Player::Green)),
        ),
        Span::raw(" : "),
        Span::styled(
            game_state.captured_by(Player::Orange).to_string(),
            Style::default().fg(player_color(Player::Orange)),
        ),
    ]);

    let header = Paragraph::new(tally)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Checkers"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line1 = Line::from("Arrows / row+col digits: Cursor  |  Enter: Select / Move  |  Esc: Deselect");
    let line2 = Line::from("R: Restart  |  M: Menu  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
