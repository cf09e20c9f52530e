use crate::game::{GameSession, TurnResult};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::debug;

pub struct App {
    session: GameSession,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let selected_column = session.grid().width() / 2; // Start in middle
        App {
            session,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let width = self.session.grid().width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                // Column labels start at 1
                let column = c as usize - '1' as usize;
                if column < width {
                    self.selected_column = column;
                }
                self.drop_piece(column);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.session.reset();
                self.selected_column = width / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop the current player's piece in `column`
    fn drop_piece(&mut self, column: usize) {
        let player = self.session.current_player().clone();
        let result = self.session.apply_turn(column);
        debug!(column, ?result, "turn applied");

        self.message = Some(match result {
            TurnResult::Rejected(reason) => {
                format!("Invalid move: {reason}. Press 'n' for a new game or pick another column.")
            }
            TurnResult::Placed { coord, .. } => {
                format!(
                    "{} placed at col: {}, row: {}.",
                    player.marker(),
                    coord.column + 1,
                    coord.row + 1
                )
            }
            TurnResult::Won { .. } => format!("{} wins!", player.name()),
            TurnResult::Draw => "Board is full. Game ends in a draw.".to_string(),
        });
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
