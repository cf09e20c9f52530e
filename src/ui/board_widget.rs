use crate::game::{Cell, Coord, GameSession, GridSnapshot, Marker};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const PLAYER_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
];

/// Color for the player at `index` in turn order.
pub fn player_color(index: usize) -> Color {
    PLAYER_COLORS[index % PLAYER_COLORS.len()]
}

fn marker_color(session: &GameSession, marker: Marker) -> Color {
    session
        .players()
        .by_marker(marker)
        .map_or(Color::White, |id| player_color(id.0))
}

/// Build the framed board: column labels, rows (top first), bottom border and
/// the selection indicator. The winning run, or else the last placed cell, is
/// drawn reversed.
pub fn board_lines(session: &GameSession, selected_column: Option<usize>) -> Vec<Line<'static>> {
    let snapshot: GridSnapshot = session.snapshot();
    let width = snapshot.width();
    let height = snapshot.height();
    let highlighted: Vec<Coord> = match session.winning_run() {
        Some(run) => run.cells.clone(),
        None => session.last_move().into_iter().collect(),
    };

    let mut lines = Vec::with_capacity(height + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..width {
        let label = format!(" {} ", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for (i, row) in snapshot.rows().iter().enumerate() {
        let row_index = height - 1 - i;
        let mut spans = vec![Span::raw("  ║")];
        for (col, cell) in row.iter().enumerate() {
            let lit = highlighted.contains(&Coord::new(col, row_index));
            spans.push(cell_span(session, *cell, lit));
        }
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    if let Some(selected) = selected_column {
        let mut indicator = vec![Span::raw("   ")];
        for col in 0..width {
            if col == selected {
                indicator.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator.push(Span::raw("   "));
            }
        }
        indicator.push(Span::raw("  "));
        lines.push(Line::from(indicator));
    }

    lines
}

fn cell_span(session: &GameSession, cell: Cell, highlighted: bool) -> Span<'static> {
    match cell {
        None => Span::styled(
            format!(" {} ", Marker::EMPTY_SYMBOL),
            Style::default().fg(Color::DarkGray),
        ),
        Some(marker) => {
            let mut style = Style::default()
                .fg(marker_color(session, marker))
                .add_modifier(Modifier::BOLD);
            if highlighted {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled(format!(" {} ", marker), style)
        }
    }
}
