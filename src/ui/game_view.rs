use crate::game::{GameOutcome, GameSession};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, player_color};

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    message: &Option<String>,
) {
    let board_height = session.grid().height() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let target = format!("Connect {}", session.run_length());

    let (status, color) = match session.outcome() {
        Some(GameOutcome::Winner(marker)) => {
            let index = session.players().by_marker(marker).map_or(0, |id| id.0);
            (format!("{} wins!", marker), player_color(index))
        }
        Some(GameOutcome::Draw) => ("Draw".to_string(), Color::White),
        None => {
            let player = session.current_player();
            (
                format!("Current Player: {}", player.name()),
                player_color(session.current_player_id().0),
            )
        }
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(status, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  |  Move {}", session.moves_played())),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(target));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &GameSession, selected_column: usize, area: Rect) {
    let selector = (!session.is_finished()).then_some(selected_column);
    let board_widget = Paragraph::new(board_lines(session, selector)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  1-9/Enter: Drop  |  N: New game  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Marker;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(session: &GameSession, message: Option<String>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|f| render(f, session, 0, &message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn session() -> GameSession {
        GameSession::new(
            7,
            6,
            4,
            &[(Marker::new('X'), "Xena"), (Marker::new('O'), "Otto")],
        )
        .unwrap()
    }

    #[test]
    fn test_render_shows_target_and_current_player() {
        let screen = draw(&session(), Some("hello there".to_string()));
        assert!(screen.contains("Connect 4"));
        assert!(screen.contains("Current Player: Xena"));
        assert!(screen.contains("hello there"));
        assert!(screen.contains("▲"));
    }

    #[test]
    fn test_render_finished_game() {
        let mut session = session();
        for _ in 0..3 {
            session.apply_turn(0);
            session.apply_turn(1);
        }
        session.apply_turn(0);

        let screen = draw(&session, None);
        assert!(screen.contains("X wins!"));
        // Selector hidden once the game ends
        assert!(!screen.contains("▲"));
    }
}
