use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{rules, GameResult, GameState, Position, BOARD_SIZE};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;
use tracing::debug;

use super::board_widget::Highlights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Instructions,
    Playing,
}

pub struct App {
    config: AppConfig,
    screen: Screen,
    game_state: GameState,
    cursor: Position,
    selected: Option<Position>,
    /// Row digit typed while waiting for the column digit
    pending_row: Option<usize>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let game_state = config.rules.new_game();
        Self::with_game(config, game_state)
    }

    /// App around a prepared position; `p` on the menu still starts afresh
    pub fn with_game(config: AppConfig, game_state: GameState) -> Self {
        App {
            config,
            screen: Screen::Menu,
            game_state,
            cursor: Position::new(2, 0),
            selected: None,
            pending_row: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        let tick = Duration::from_millis(self.config.ui.tick_rate_ms);
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events(tick)?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self, tick: Duration) -> io::Result<()> {
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Instructions => self.screen = Screen::Menu,
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        self.message = None;
        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.restart();
                self.screen = Screen::Playing;
                self.message = Some("The game has just begun: good luck ;)".to_string());
            }
            KeyCode::Char('i') | KeyCode::Char('I') => self.screen = Screen::Instructions,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            _ => self.message = Some("Please, enter a valid key".to_string()),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('m') => {
                self.screen = Screen::Menu;
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Up => self.move_cursor(1, 0),
            KeyCode::Down => self.move_cursor(-1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(c @ '0'..='7') => self.enter_digit((c as u8 - b'0') as usize),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Esc => self.deselect(),
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game_state = self.config.rules.new_game();
        self.selected = None;
        self.pending_row = None;
        self.cursor = Position::new(2, 0);
    }

    fn move_cursor(&mut self, dr: i8, dc: i8) {
        self.pending_row = None;
        if let Some(next) = self.cursor.offset(dr, dc) {
            self.cursor = next;
        }
    }

    /// Digits arrive as a row followed by a column
    fn enter_digit(&mut self, digit: usize) {
        debug_assert!(digit < BOARD_SIZE);
        match self.pending_row.take() {
            None => {
                self.pending_row = Some(digit);
                self.message = Some(format!("Row {digit}, now enter the column"));
            }
            Some(row) => self.cursor = Position::new(row, digit),
        }
    }

    fn deselect(&mut self) {
        if let Some(active) = self.game_state.active_piece() {
            self.message = Some(describe(&MoveError::MustContinueChain { required: active }));
        } else {
            self.selected = None;
        }
    }

    /// Enter on the cursor: select a piece, or move the selected one there.
    fn activate(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let player = self.game_state.current_player();
        let own_piece = matches!(
            self.game_state.board().get_piece(self.cursor),
            Ok(Some(piece)) if piece.owner == player
        );

        match self.selected {
            Some(from) if from == self.cursor => self.deselect(),
            Some(_) if own_piece => self.select(self.cursor),
            Some(from) => self.move_piece(from, self.cursor),
            None => self.select(self.cursor),
        }
    }

    fn select(&mut self, pos: Position) {
        if let Some(required) = self.game_state.active_piece() {
            if pos != required {
                self.message = Some(describe(&MoveError::MustContinueChain { required }));
                return;
            }
        }

        let player = self.game_state.current_player();
        match self.game_state.board().get_piece(pos) {
            Ok(Some(piece)) if piece.owner == player => {
                self.selected = Some(pos);
                self.message = self.chain_hint(pos);
            }
            Ok(Some(_)) => self.message = Some(describe(&MoveError::NotYourPiece { position: pos })),
            Ok(None) => self.message = Some(describe(&MoveError::EmptySquare { position: pos })),
            Err(err) => self.message = Some(describe(&err)),
        }
    }

    fn move_piece(&mut self, from: Position, to: Position) {
        match self.game_state.apply_move_mut(from, to) {
            Ok(applied) => {
                debug!(%from, %to, ?applied, "move played");
                if let Some(message) = outcome_message(self.game_state.outcome()) {
                    self.selected = None;
                    self.message = Some(message);
                } else if applied.must_continue {
                    self.selected = Some(to);
                    self.message = Some("Capture again with the same piece!".to_string());
                } else {
                    self.selected = None;
                    if applied.promoted {
                        self.message = Some("Crowned! Your piece is now a King.".to_string());
                    }
                }
            }
            Err(err) => {
                self.message = Some(describe(&err));
            }
        }
    }

    /// Longest capture chain open to the piece on `pos`, when it has more
    /// than one jump
    fn chain_hint(&self, pos: Position) -> Option<String> {
        if !self.config.ui.show_hints {
            return None;
        }
        let longest = rules::capture_sequences(self.game_state.board(), pos)
            .into_iter()
            .max_by_key(Vec::len)?;
        (longest.len() > 2).then(|| {
            let path: Vec<String> = longest.iter().map(ToString::to_string).collect();
            format!("Capture chain: {}", path.join(" -> "))
        })
    }

    /// Destinations of the selected piece, when hints are enabled
    fn hint_targets(&self) -> Vec<Position> {
        match self.selected {
            Some(from) if self.config.ui.show_hints => self
                .game_state
                .legal_moves()
                .into_iter()
                .filter(|mv| mv.from == from)
                .map(|mv| mv.to)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::Menu => super::menu_view::render_menu(frame, &self.message),
            Screen::Instructions => super::menu_view::render_instructions(frame),
            Screen::Playing => {
                let targets = self.hint_targets();
                let highlights = Highlights {
                    cursor: Some(self.cursor),
                    selected: self.selected,
                    targets: &targets,
                };
                super::game_view::render(frame, &self.game_state, highlights, &self.message);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn outcome_message(outcome: GameResult) -> Option<String> {
    match outcome {
        GameResult::InProgress => None,
        GameResult::Winner(player) => Some(format!("{} wins!", player.name())),
        GameResult::Draw => Some("It's a draw!".to_string()),
    }
}

/// Error text with its first letter capitalised for the message line
fn describe(err: &MoveError) -> String {
    let text = err.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}
