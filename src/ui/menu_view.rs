use super::board_widget::player_color;
use crate::game::Player;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_menu(frame: &mut Frame, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(3)])
        .split(frame.area());

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("p", bold)),
        Line::from("Start playing"),
        Line::from(""),
        Line::from(Span::styled("i", bold)),
        Line::from("Instructions"),
        Line::from(""),
        Line::from(Span::styled("q", bold)),
        Line::from("Close game"),
    ];
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Checkers  |  Menu"));
    frame.render_widget(menu, chunks[0]);

    let text = message.as_deref().unwrap_or("");
    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[1]);
}

pub fn render_instructions(frame: &mut Frame) {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Objective", heading)),
        Line::from("  Eliminate all of your opponent's pieces, or leave them without a legal move."),
        Line::from(""),
        Line::from(Span::styled("Players", heading)),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Green", Style::default().fg(player_color(Player::Green))),
            Span::raw(" starts on rows 0-2 and moves up the board; "),
            Span::styled("Orange", Style::default().fg(player_color(Player::Orange))),
            Span::raw(" starts on rows 5-7 and moves down."),
        ]),
        Line::from(""),
        Line::from(Span::styled("Moving", heading)),
        Line::from("  - Men (●) move one square diagonally forward onto an empty dark square."),
        Line::from("  - A man reaching the far row becomes a King (♛), which moves forward and backward."),
        Line::from(""),
        Line::from(Span::styled("Capturing", heading)),
        Line::from("  - Jump diagonally over an adjacent opposing piece onto the empty square beyond it."),
        Line::from("  - Capturing is mandatory: if any capture exists you may not make a plain move."),
        Line::from("  - After a capture, keep jumping with the same piece while another capture is available."),
        Line::from("  - A man that is crowned during a capture ends the turn there."),
        Line::from(""),
        Line::from(Span::styled("Controls", heading)),
        Line::from("  - Move the cursor with the arrow keys, or type a row digit then a column digit (0-7)."),
        Line::from("  - Press Enter on a piece to select it, then Enter on the destination to move."),
        Line::from(""),
        Line::from("Press any key to go back."),
    ];

    let instructions = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Checkers Game Instructions"));
    frame.render_widget(instructions, frame.area());
}
