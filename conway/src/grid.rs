// grid.rs - Grid types for Conway's Game of Life

use crate::error::{Error, Result};
use rand::Rng;

/// The eight Moore neighbours as (column, row) offsets.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Applies Conway's rule given the number of live neighbours.
    pub fn next(self, live_neighbors: u8) -> Cell {
        match (self, live_neighbors) {
            (Cell::Dead, 3)                           => Cell::Alive, // Birth
            (Cell::Alive, n) if !(2..=3).contains(&n) => Cell::Dead,  // Under/overpopulation
            (cell, _)                                 => cell,        // Unchanged
        }
    }
}

/// A fixed-size rectangular grid of cells, indexed by `(column, row)`.
///
/// Cells outside `[0, width) x [0, height)` are treated as dead; there is no
/// wraparound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid.
    pub fn new(width: usize, height: usize) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Creates a grid whose cells are produced by `f(column, row)`.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Grid>
    where
        F: FnMut(usize, usize) -> Cell,
    {
        let mut grid = Grid::new(width, height)?;
        for row in 0..height {
            for column in 0..width {
                grid.cells[row * width + column] = f(column, row);
            }
        }
        Ok(grid)
    }

    /// Parses a grid from ASCII rows where `#` is alive and `.` is dead.
    pub fn from_rows(rows: &[&str]) -> Result<Grid> {
        let height = rows.len();
        let width = rows.first().map_or(0, |line| line.chars().count());
        let mut grid = Grid::new(width, height)?;

        for (row, line) in rows.iter().enumerate() {
            let line_width = line.chars().count();
            if line_width != width {
                return Err(Error::InvalidPattern(format!(
                    "row {} is {} cells wide, expected {}",
                    row, line_width, width
                )));
            }

            for (column, value) in line.chars().enumerate() {
                let cell = match value {
                    '#' => Cell::Alive,
                    '.' => Cell::Dead,
                    other => {
                        return Err(Error::InvalidPattern(format!(
                            "unexpected character {:?} at ({}, {})",
                            other, column, row
                        )));
                    }
                };
                grid.cells[row * width + column] = cell;
            }
        }

        Ok(grid)
    }

    /// Creates a randomly populated grid.
    ///
    /// For every cell an integer is drawn uniformly from
    /// `[0, existence_probability)` and the cell is alive iff the draw is
    /// exactly `1`. With `existence_probability == 1` the only possible draw
    /// is `0`, so every cell starts dead.
    pub fn random<R>(width: usize, height: usize, existence_probability: u32, rng: &mut R) -> Result<Grid>
    where
        R: Rng + ?Sized,
    {
        if existence_probability == 0 {
            return Err(Error::InvalidProbability(existence_probability));
        }

        Grid::from_fn(width, height, |_, _| {
            if rng.gen_range(0..existence_probability) == 1 {
                Cell::Alive
            } else {
                Cell::Dead
            }
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(column, row)`, or `None` when out of bounds.
    pub fn get(&self, column: usize, row: usize) -> Option<Cell> {
        self.index(column, row).map(|index| self.cells[index])
    }

    /// Sets the cell at `(column, row)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, column: usize, row: usize, cell: Cell) {
        if let Some(index) = self.index(column, row) {
            self.cells[index] = cell;
        }
    }

    /// Flips the cell at `(column, row)` and returns its new state.
    pub fn toggle(&mut self, column: usize, row: usize) -> Option<Cell> {
        let index = self.index(column, row)?;
        let cell = match self.cells[index] {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        };
        self.cells[index] = cell;
        Some(cell)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Counts live cells among the up-to-eight neighbours of `(column, row)`.
    pub fn live_neighbors(&self, column: usize, row: usize) -> u8 {
        let mut count = 0;
        for &(dc, dr) in &NEIGHBOR_OFFSETS {
            let (Some(nc), Some(nr)) = (column.checked_add_signed(dc), row.checked_add_signed(dr)) else {
                continue;
            };
            if self.get(nc, nr) == Some(Cell::Alive) {
                count += 1;
            }
        }
        count
    }

    /// Iterates over all cells as `(column, row, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| (index % self.width, index / self.width, cell))
    }

    /// Writes the next generation of `self` into `next` and returns its live
    /// count.
    ///
    /// Every neighbour count is read from `self`, never from `next`, so the
    /// result depends only on the prior generation. `next` is resized if its
    /// dimensions differ.
    pub fn step_into(&self, next: &mut Grid) -> usize {
        if next.width != self.width || next.height != self.height {
            *next = self.clone();
        }

        let mut live = 0;
        for row in 0..self.height {
            for column in 0..self.width {
                let index = row * self.width + column;
                let cell = self.cells[index].next(self.live_neighbors(column, row));
                if cell.is_alive() {
                    live += 1;
                }
                next.cells[index] = cell;
            }
        }
        live
    }

    /// Returns the next generation as a new grid.
    pub fn next_generation(&self) -> Grid {
        let mut next = self.clone();
        self.step_into(&mut next);
        next
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.width && row < self.height).then(|| row * self.width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn all_alive(width: usize, height: usize) -> Grid {
        Grid::from_fn(width, height, |_, _| Cell::Alive).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Grid::new(4, 0).is_err());
    }

    #[test]
    fn corner_cell_in_full_grid_has_three_neighbors() {
        let grid = all_alive(5, 5);

        assert_eq!(grid.live_neighbors(0, 0), 3);
        assert_eq!(grid.live_neighbors(4, 0), 3);
        assert_eq!(grid.live_neighbors(0, 4), 3);
        assert_eq!(grid.live_neighbors(4, 4), 3);
    }

    #[test]
    fn edge_cell_in_full_grid_has_five_neighbors() {
        let grid = all_alive(5, 5);

        assert_eq!(grid.live_neighbors(2, 0), 5);
        assert_eq!(grid.live_neighbors(0, 2), 5);
        assert_eq!(grid.live_neighbors(2, 2), 8);
    }

    #[test]
    fn neighbor_count_excludes_the_cell_itself() {
        let grid = Grid::from_rows(&["...", ".#.", "..."]).unwrap();

        assert_eq!(grid.live_neighbors(1, 1), 0);
        assert_eq!(grid.live_neighbors(0, 0), 1);
    }

    #[test]
    fn rule_covers_birth_survival_and_death() {
        assert_eq!(Cell::Dead.next(3), Cell::Alive);
        assert_eq!(Cell::Dead.next(2), Cell::Dead);
        assert_eq!(Cell::Alive.next(1), Cell::Dead);
        assert_eq!(Cell::Alive.next(2), Cell::Alive);
        assert_eq!(Cell::Alive.next(3), Cell::Alive);
        assert_eq!(Cell::Alive.next(4), Cell::Dead);
    }

    #[test]
    fn from_rows_reads_columns_and_rows() {
        let grid = Grid::from_rows(&["#..", "..#"]).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.get(2, 1), Some(Cell::Alive));
        assert_eq!(grid.get(1, 1), Some(Cell::Dead));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown_input() {
        assert!(matches!(Grid::from_rows(&["##", "#"]), Err(Error::InvalidPattern(_))));
        assert!(matches!(Grid::from_rows(&["#x"]), Err(Error::InvalidPattern(_))));
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn probability_of_one_produces_an_empty_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Grid::random(40, 40, 1, &mut rng).unwrap();

        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn random_grid_is_partially_populated() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Grid::random(100, 100, 2, &mut rng).unwrap();

        assert!(grid.live_count() > 0);
        assert!(grid.live_count() < 100 * 100);
    }

    #[test]
    fn zero_probability_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        assert!(matches!(
            Grid::random(4, 4, 0, &mut rng),
            Err(Error::InvalidProbability(0))
        ));
    }

    #[test]
    fn toggle_flips_and_ignores_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();

        assert_eq!(grid.toggle(1, 1), Some(Cell::Alive));
        assert_eq!(grid.toggle(1, 1), Some(Cell::Dead));
        assert_eq!(grid.toggle(3, 1), None);
        grid.set(5, 5, Cell::Alive);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn step_into_reads_only_the_previous_generation() {
        // An in-place scan would see (1,0) already dead when evaluating (2,0).
        let grid = Grid::from_rows(&["###", "...", "..."]).unwrap();
        let mut next = Grid::new(3, 3).unwrap();
        let live = grid.step_into(&mut next);

        assert_eq!(next, Grid::from_rows(&[".#.", ".#.", "..."]).unwrap());
        assert_eq!(live, 2);
    }

    #[test]
    fn cells_iterates_in_row_major_order() {
        let grid = Grid::from_rows(&["#.", ".#"]).unwrap();
        let alive: Vec<(usize, usize)> = grid
            .cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(column, row, _)| (column, row))
            .collect();

        assert_eq!(alive, vec![(0, 0), (1, 1)]);
    }
}
