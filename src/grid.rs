// grid.rs - Toroidal tile grid shared by every automaton

/// Index into a tile palette; 0 is always the background.
pub type Tile = usize;

/// Wraps `coord` into `[0, dimension)`, so both edges connect to the opposite one.
pub fn wrap(coord: i64, dimension: usize) -> usize {
    debug_assert!(dimension > 0, "wrap needs a positive dimension");
    coord.rem_euclid(dimension as i64) as usize
}

/// A fixed-size grid of tile indices addressed with wrap-around coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToroidalGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl ToroidalGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> usize {
        wrap(y, self.height) * self.width + wrap(x, self.width)
    }

    pub fn get(&self, x: i64, y: i64) -> Tile {
        self.cells[self.index(x, y)]
    }

    /// Writes one cell. Painting is left to the caller.
    pub fn set(&mut self, x: i64, y: i64, tile: Tile) {
        let index = self.index(x, y);
        self.cells[index] = tile;
    }

    /// Refills every cell in place.
    pub fn reinit(&mut self, fill: Tile) {
        self.cells.fill(fill);
    }

    /// Row-major backing store.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Number of cells whose tile is not the background.
    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile != 0).count()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_range_and_is_periodic() {
        for d in [1usize, 2, 5, 17, 100] {
            for c in -250i64..250 {
                let w = wrap(c, d);
                assert!(w < d);
                assert_eq!(w, wrap(c + d as i64, d));
                assert_eq!(w, wrap(c - d as i64, d));
            }
        }
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(i64::MIN, 7), i64::MIN.rem_euclid(7) as usize);
    }

    #[test]
    fn edges_connect() {
        let mut grid = ToroidalGrid::new(4, 3);
        grid.set(-1, -1, 2);
        assert_eq!(grid.get(3, 2), 2);
        assert_eq!(grid.get(7, 5), 2);
        assert_eq!(grid.count_nonzero(), 1);
    }

    #[test]
    fn reinit_fills_every_cell() {
        let mut grid = ToroidalGrid::new(3, 3);
        grid.set(1, 1, 1);
        grid.reinit(0);
        assert!(grid.cells().iter().all(|&t| t == 0));
        grid.reinit(2);
        assert_eq!(grid.count_nonzero(), 9);
    }

    #[test]
    fn contains_is_unwrapped() {
        let grid = ToroidalGrid::new(4, 3);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(3, 2));
        assert!(!grid.contains(4, 0));
        assert!(!grid.contains(0, -1));
    }
}
