//! Win detection: find runs of identical markers on a [`Grid`].
//!
//! [`find_win`] scans the whole grid in a fixed order so that the reported run
//! is deterministic when several runs exist at once. [`completes_run`] is a
//! cheap local check around a single cell.

use super::grid::{Coord, Grid};
use super::player::Marker;

/// The four line families a run can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Bottom to top along a column
    Vertical,
    /// Top-left to bottom-right (\)
    Diagonal,
    /// Top-right to bottom-left (/)
    AntiDiagonal,
}

impl Direction {
    /// Scan order used by [`find_win`].
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// Unit step as (column delta, row delta), with rows counted upward.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, -1),
            Direction::AntiDiagonal => (-1, -1),
        }
    }

    /// Every origin whose run of `run_length` cells stays inside a
    /// `width` x `height` grid, in scan order. Empty when the run cannot fit.
    fn origins(self, width: usize, height: usize, run_length: usize) -> Vec<Coord> {
        let fits_across = run_length <= width;
        let fits_up = run_length <= height;
        let mut origins = Vec::new();

        match self {
            Direction::Horizontal if fits_across => {
                for row in (0..height).rev() {
                    for column in 0..=width - run_length {
                        origins.push(Coord::new(column, row));
                    }
                }
            }
            Direction::Vertical if fits_up => {
                for column in 0..width {
                    for row in (0..=height - run_length).rev() {
                        origins.push(Coord::new(column, row));
                    }
                }
            }
            Direction::Diagonal if fits_across && fits_up => {
                for row in (run_length - 1..height).rev() {
                    for column in 0..=width - run_length {
                        origins.push(Coord::new(column, row));
                    }
                }
            }
            Direction::AntiDiagonal if fits_across && fits_up => {
                for row in (run_length - 1..height).rev() {
                    for column in (run_length - 1..width).rev() {
                        origins.push(Coord::new(column, row));
                    }
                }
            }
            _ => {}
        }

        origins
    }
}

/// A qualifying run: `cells` holds exactly `run_length` coordinates in the
/// order they were stepped from the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningRun {
    pub marker: Marker,
    pub direction: Direction,
    pub cells: Vec<Coord>,
}

/// Return the first run of `run_length` identical, non-empty markers.
///
/// Families are scanned horizontal, vertical, diagonal, anti-diagonal. Within
/// a family origins go top to bottom; horizontal and diagonal origins go left
/// to right within a row, vertical origins go column by column, and
/// anti-diagonal origins go right to left.
pub fn find_win(grid: &Grid, run_length: usize) -> Option<WinningRun> {
    let (width, height) = (grid.width(), grid.height());
    if run_length == 0 || (run_length > width && run_length > height) {
        return None;
    }

    Direction::ALL.into_iter().find_map(|direction| {
        direction
            .origins(width, height, run_length)
            .into_iter()
            .find_map(|origin| run_at(grid, origin, direction, run_length))
    })
}

fn run_at(grid: &Grid, origin: Coord, direction: Direction, run_length: usize) -> Option<WinningRun> {
    let (dc, dr) = direction.step();
    let mut marker: Option<Marker> = None;
    let mut cells = Vec::with_capacity(run_length);

    for i in 0..run_length as isize {
        let column = origin.column.checked_add_signed(dc * i)?;
        let row = origin.row.checked_add_signed(dr * i)?;
        // Out of bounds or empty both end the run
        let cell = grid.get(column, row)??;
        match marker {
            Some(m) if m != cell => return None,
            Some(_) => {}
            None => marker = Some(cell),
        }
        cells.push(Coord::new(column, row));
    }

    Some(WinningRun {
        marker: marker?,
        direction,
        cells,
    })
}

/// Check whether the marker at `at` is part of a run of at least `run_length`.
pub fn completes_run(grid: &Grid, run_length: usize, at: Coord) -> bool {
    let Some(Some(marker)) = grid.get(at.column, at.row) else {
        return false;
    };

    Direction::ALL.into_iter().any(|direction| {
        let (dc, dr) = direction.step();
        let forward = count_matching(grid, at, (dc, dr), marker);
        let backward = count_matching(grid, at, (-dc, -dr), marker);
        1 + forward + backward >= run_length
    })
}

/// Count consecutive cells holding `marker` stepping away from `from`.
fn count_matching(grid: &Grid, from: Coord, (dc, dr): (isize, isize), marker: Marker) -> usize {
    let mut count = 0;
    let (mut column, mut row) = (from.column, from.row);

    while let (Some(c), Some(r)) = (column.checked_add_signed(dc), row.checked_add_signed(dr)) {
        if grid.get(c, r) != Some(Some(marker)) {
            break;
        }
        count += 1;
        column = c;
        row = r;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Marker = Marker::new('X');

    /// Build a grid from column stacks listed bottom to top; '.' stops a stack.
    fn build(height: usize, columns: &[&str]) -> Grid {
        let mut grid = Grid::new(columns.len(), height).unwrap();
        for (col, stack) in columns.iter().enumerate() {
            for symbol in stack.chars().take_while(|&c| c != '.') {
                grid.try_place(col, Marker::new(symbol)).unwrap();
            }
        }
        grid
    }

    fn coords(cells: &[(usize, usize)]) -> Vec<Coord> {
        cells.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn test_empty_grid_has_no_win() {
        let grid = Grid::new(7, 6).unwrap();
        assert_eq!(find_win(&grid, 4), None);
    }

    #[test]
    fn test_vertical_win_listed_bottom_up() {
        let grid = build(6, &["XXXX", "", "", "", "", "", "OOO"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.marker, X);
        assert_eq!(run.direction, Direction::Vertical);
        assert_eq!(run.cells, coords(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_horizontal_win() {
        let grid = build(6, &["", "O", "O", "O", "O", "X", "X"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.marker, Marker::new('O'));
        assert_eq!(run.direction, Direction::Horizontal);
        assert_eq!(run.cells, coords(&[(1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn test_diagonal_win() {
        let grid = build(4, &["OOOX", "OOX", "OX", "X"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.direction, Direction::Diagonal);
        assert_eq!(run.cells, coords(&[(0, 3), (1, 2), (2, 1), (3, 0)]));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let grid = build(4, &["X", "OX", "OOX", "OOOX"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.direction, Direction::AntiDiagonal);
        assert_eq!(run.cells, coords(&[(3, 3), (2, 2), (1, 1), (0, 0)]));
    }

    #[test]
    fn test_horizontal_reported_before_vertical() {
        // Column 0 and row 0 both hold four X
        let grid = build(6, &["XXXX", "X", "X", "X"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.direction, Direction::Horizontal);
        assert_eq!(run.cells, coords(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_vertical_reported_before_diagonal() {
        // Column 0 is a vertical run; (0,2),(1,1),(2,0) is a diagonal one
        let grid = build(3, &["XXX", "OX", "X"]);
        let run = find_win(&grid, 3).unwrap();
        assert_eq!(run.direction, Direction::Vertical);
        assert_eq!(run.cells, coords(&[(0, 0), (0, 1), (0, 2)]));
    }

    #[test]
    fn test_diagonal_reported_before_anti_diagonal() {
        // X shape: both diagonals cross at the centre
        let grid = build(3, &["XOX", "OX", "XOX"]);
        let run = find_win(&grid, 3).unwrap();
        assert_eq!(run.direction, Direction::Diagonal);
        assert_eq!(run.cells, coords(&[(0, 2), (1, 1), (2, 0)]));
    }

    #[test]
    fn test_anti_diagonal_origins_scanned_right_to_left() {
        // Two anti-diagonal pairs start on the top row; the right one is found first
        let grid = build(2, &["O", "XO", "#X"]);
        let run = find_win(&grid, 2).unwrap();
        assert_eq!(run.direction, Direction::AntiDiagonal);
        assert_eq!(run.marker, X);
        assert_eq!(run.cells, coords(&[(2, 1), (1, 0)]));
    }

    #[test]
    fn test_higher_row_reported_first() {
        let grid = build(4, &["XX", "XX", "XX", "XX"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.cells, coords(&[(0, 1), (1, 1), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_leftmost_origin_in_row_wins() {
        let grid = build(1, &["X", "X", "X", "X", "X"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.cells[0], Coord::new(0, 0));
    }

    #[test]
    fn test_vertical_origins_scanned_top_down() {
        let grid = build(6, &["XXXXX"]);
        let run = find_win(&grid, 4).unwrap();
        assert_eq!(run.cells, coords(&[(0, 1), (0, 2), (0, 3), (0, 4)]));
    }

    #[test]
    fn test_run_length_one_returns_first_cell_in_scan_order() {
        let grid = build(3, &["O", "", "XO"]);
        let run = find_win(&grid, 1).unwrap();
        assert_eq!(run.marker, Marker::new('O'));
        assert_eq!(run.cells, coords(&[(2, 1)]));
    }

    #[test]
    fn test_run_length_longer_than_grid() {
        let grid = build(3, &["XXX", "XXX", "XXX"]);
        assert!(grid.is_full());
        assert_eq!(find_win(&grid, 4), None);
    }

    #[test]
    fn test_run_length_fits_one_dimension_only() {
        // Too wide for rows, fits columns
        let grid = build(5, &["O", "XXX"]);
        let run = find_win(&grid, 3).unwrap();
        assert_eq!(run.direction, Direction::Vertical);
        assert_eq!(run.cells, coords(&[(1, 0), (1, 1), (1, 2)]));

        // Too tall for columns, fits rows
        let grid = build(1, &["O", "O", "O", "X"]);
        let run = find_win(&grid, 3).unwrap();
        assert_eq!(run.direction, Direction::Horizontal);
    }

    #[test]
    fn test_mixed_markers_do_not_win() {
        let grid = build(6, &["XXOX", "OXOO", "XOXX"]);
        assert_eq!(find_win(&grid, 4), None);
    }

    #[test]
    fn test_completes_run_through_cell() {
        let grid = build(6, &["", "O", "O", "O", "O"]);
        assert!(completes_run(&grid, 4, Coord::new(2, 0)));
        assert!(!completes_run(&grid, 5, Coord::new(2, 0)));
        assert!(!completes_run(&grid, 1, Coord::new(0, 0)));
        assert!(!completes_run(&grid, 1, Coord::new(9, 9)));
    }

    #[test]
    fn test_completes_run_on_diagonals() {
        let grid = build(4, &["OOOX", "OOX", "OX", "X"]);
        assert!(completes_run(&grid, 4, Coord::new(1, 2)));
        let grid = build(4, &["X", "OX", "OOX", "OOOX"]);
        assert!(completes_run(&grid, 4, Coord::new(3, 3)));
    }
}
