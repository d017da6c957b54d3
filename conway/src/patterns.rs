use crate::grid::{Cell, Grid};

/// A named seed pattern in ASCII form (`#` alive, `.` dead).
pub struct Pattern {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        rows: &[".#.", "..#", "###"],
    },
    Pattern {
        name: "Blinker",
        rows: &["###"],
    },
    Pattern {
        name: "Toad",
        rows: &[".###", "###."],
    },
    Pattern {
        name: "Beacon",
        rows: &["##..", "##..", "..##", "..##"],
    },
    Pattern {
        name: "Pulsar",
        rows: &[
            "..###...###..",
            ".............",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            "..###...###..",
            ".............",
            "..###...###..",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            ".............",
            "..###...###..",
        ],
    },
    Pattern {
        name: "R-pentomino",
        rows: &[".##", "##.", ".#."],
    },
    Pattern {
        name: "Gosper Glider Gun",
        rows: &[
            "........................#...........",
            "......................#.#...........",
            "............##......##............##",
            "...........#...#....##............##",
            "##........#.....#...##..............",
            "##........#...#.##....#.#...........",
            "..........#.....#.......#...........",
            "...........#...#....................",
            "............##......................",
        ],
    },
];

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Live cells as `(column, row)` offsets from the pattern's top-left corner.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, value)| value == b'#')
                .map(move |(column, _)| (column, row))
        })
    }

    /// Sets the pattern's live cells with its top-left corner at
    /// `(column, row)`. Cells falling outside the grid are dropped.
    pub fn place(&self, grid: &mut Grid, column: usize, row: usize) {
        for (dc, dr) in self.live_cells() {
            grid.set(column + dc, row + dr, Cell::Alive);
        }
    }

    /// Places the pattern in the middle of the grid.
    pub fn place_centered(&self, grid: &mut Grid) {
        let column = grid.width().saturating_sub(self.width()) / 2;
        let row = grid.height().saturating_sub(self.height()) / 2;
        self.place(grid, column, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(pattern: &Pattern, width: usize, height: usize, column: usize, row: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        pattern.place(&mut grid, column, row);
        grid
    }

    #[test]
    fn every_pattern_parses_as_a_grid() {
        for pattern in PATTERNS {
            let grid = Grid::from_rows(pattern.rows).unwrap();
            assert_eq!(grid.live_count(), pattern.live_cells().count(), "{}", pattern.name);
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("glider").map(|p| p.name), Some("Glider"));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn placement_is_clipped_at_the_boundary() {
        let glider = find("Glider").unwrap();
        let grid = stamped(glider, 4, 4, 2, 2);

        // Only the top-left 2x2 of the pattern fits: (1,0) and nothing else.
        assert_eq!(grid.live_count(), 1);
        assert_eq!(grid.get(3, 2), Some(Cell::Alive));
    }

    #[test]
    fn place_centered_keeps_pattern_inside() {
        let pulsar = find("Pulsar").unwrap();
        let mut grid = Grid::new(20, 20).unwrap();
        pulsar.place_centered(&mut grid);

        assert_eq!(grid.live_count(), 48);
    }

    #[test]
    fn glider_moves_one_cell_diagonally_every_four_generations() {
        let glider = find("Glider").unwrap();
        let mut grid = stamped(glider, 10, 10, 2, 2);
        for _ in 0..4 {
            grid = grid.next_generation();
        }

        assert_eq!(grid, stamped(glider, 10, 10, 3, 3));
    }

    #[test]
    fn toad_and_beacon_have_period_two() {
        for name in ["Toad", "Beacon"] {
            let pattern = find(name).unwrap();
            let start = stamped(pattern, 8, 8, 2, 2);
            let once = start.next_generation();

            assert_ne!(once, start, "{}", name);
            assert_eq!(once.next_generation(), start, "{}", name);
        }
    }
}
