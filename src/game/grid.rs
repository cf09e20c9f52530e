use std::fmt;

use super::player::Marker;
use crate::error::SetupError;

/// Contents of one grid cell; `None` is empty.
pub type Cell = Option<Marker>;

/// A grid position. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub column: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(column: usize, row: usize) -> Self {
        Coord { column, row }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((column, row): (usize, usize)) -> Self {
        Coord { column, row }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the grid (0..{width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell ({column}, {row}) is outside the grid")]
pub struct OutOfBounds {
    pub column: usize,
    pub row: usize,
}

/// Gravity grid of `width` columns by `height` rows.
///
/// Storage is a flat column-major vector, so each column is a contiguous
/// slice ordered bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    /// Number of non-empty cells
    filled: usize,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidDimensions { width, height });
        }
        Ok(Grid {
            width,
            height,
            cells: vec![None; width * height],
            filled: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(column * self.height + row)
    }

    fn column(&self, column: usize) -> &[Cell] {
        let start = column * self.height;
        &self.cells[start..start + self.height]
    }

    /// Get the cell at (column, row), or `None` when outside the grid
    pub fn get(&self, column: usize, row: usize) -> Option<Cell> {
        self.index(column, row).map(|idx| self.cells[idx])
    }

    pub fn cell_at(&self, coord: Coord) -> Result<Cell, OutOfBounds> {
        self.get(coord.column, coord.row).ok_or(OutOfBounds {
            column: coord.column,
            row: coord.row,
        })
    }

    /// Number of pieces stacked in a column (0 for out-of-range columns)
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.width {
            return 0;
        }
        self.column(column)
            .iter()
            .take_while(|cell| cell.is_some())
            .count()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        if column >= self.width {
            return true;
        }
        self.column(column)[self.height - 1].is_some()
    }

    /// Columns that can still take a piece, left to right
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop `marker` into `column`, returning the row where it landed.
    ///
    /// The piece falls from the top and settles on the highest occupied cell,
    /// or on row 0 if the column is empty. Nothing changes on error.
    pub fn try_place(&mut self, column: usize, marker: Marker) -> Result<usize, MoveError> {
        if column >= self.width {
            return Err(MoveError::InvalidColumn {
                column,
                width: self.width,
            });
        }

        let landing = match self.column(column).iter().rposition(|cell| cell.is_some()) {
            Some(top) => top + 1,
            None => 0,
        };
        if landing >= self.height {
            return Err(MoveError::ColumnFull(column));
        }

        let idx = column * self.height + landing;
        self.cells[idx] = Some(marker);
        self.filled += 1;
        Ok(landing)
    }

    /// Check if every cell holds a marker
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.filled = 0;
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let rows = (0..self.height)
            .rev()
            .map(|row| {
                (0..self.width)
                    .map(|col| self.cells[col * self.height + row])
                    .collect()
            })
            .collect();
        GridSnapshot {
            width: self.width,
            height: self.height,
            rows,
        }
    }
}

/// Owned copy of a grid for rendering, rows ordered top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl GridSnapshot {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows from top (`height - 1`) to bottom (0).
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.column >= self.width || coord.row >= self.height {
            return None;
        }
        Some(self.rows[self.height - 1 - coord.row][coord.column])
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or(Marker::EMPTY_SYMBOL, Marker::symbol))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Marker = Marker::new('X');
    const O: Marker = Marker::new('O');

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(7, 6).unwrap();
        for col in 0..7 {
            for row in 0..6 {
                assert_eq!(grid.get(col, row), Some(None));
            }
        }
        assert!(!grid.is_full());
        assert_eq!(grid.open_columns(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 6),
            Err(SetupError::InvalidDimensions {
                width: 0,
                height: 6
            })
        );
        assert!(Grid::new(7, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_drop_piece_stacks_upward() {
        let mut grid = Grid::new(7, 6).unwrap();

        for expected in 0..6 {
            assert_eq!(grid.try_place(3, X), Ok(expected));
            assert_eq!(grid.column_height(3), expected + 1);
        }
        assert_eq!(grid.get(3, 0), Some(Some(X)));
        assert_eq!(grid.get(3, 5), Some(Some(X)));
    }

    #[test]
    fn test_every_empty_column_lands_on_row_zero() {
        let mut grid = Grid::new(5, 3).unwrap();
        for col in 0..5 {
            assert_eq!(grid.try_place(col, O), Ok(0));
        }
    }

    #[test]
    fn test_column_full_leaves_grid_unchanged() {
        let mut grid = Grid::new(7, 6).unwrap();
        for _ in 0..6 {
            grid.try_place(0, X).unwrap();
        }

        let before = grid.snapshot();
        assert!(grid.is_column_full(0));
        assert_eq!(grid.try_place(0, O), Err(MoveError::ColumnFull(0)));
        assert_eq!(grid.snapshot(), before);
        assert_eq!(grid.filled(), 6);
    }

    #[test]
    fn test_invalid_column() {
        let mut grid = Grid::new(7, 6).unwrap();
        assert_eq!(
            grid.try_place(7, X),
            Err(MoveError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert_eq!(grid.filled(), 0);
    }

    #[test]
    fn test_full_grid() {
        let mut grid = Grid::new(3, 2).unwrap();
        for col in 0..3 {
            for _ in 0..2 {
                assert!(!grid.is_full());
                grid.try_place(col, X).unwrap();
            }
        }
        assert!(grid.is_full());
        assert!(grid.open_columns().is_empty());
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.cell_at(Coord::new(1, 1)), Ok(None));
        assert_eq!(
            grid.cell_at(Coord::new(2, 0)),
            Err(OutOfBounds { column: 2, row: 0 })
        );
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_clear_resets_cells_and_count() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.try_place(0, X).unwrap();
        grid.try_place(1, O).unwrap();
        grid.clear();
        assert_eq!(grid, Grid::new(2, 2).unwrap());
    }

    #[test]
    fn test_snapshot_is_top_down() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.try_place(0, X).unwrap();
        grid.try_place(0, O).unwrap();
        grid.try_place(2, X).unwrap();

        let snap = grid.snapshot();
        assert_eq!(snap.rows()[0], vec![Some(O), None, None]);
        assert_eq!(snap.rows()[1], vec![Some(X), None, Some(X)]);
        assert_eq!(snap.get(Coord::new(0, 1)), Some(Some(O)));
        assert_eq!(snap.to_string(), "O\u{b7}\u{b7}\nX\u{b7}X\n");
    }
}
