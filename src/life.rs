// life.rs - Conway's Game of Life on a toroidal grid

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::automaton::{Automaton, CellGrid};
use crate::config::GridOptions;
use crate::error::{CellsError, Result};
use crate::grid::{ToroidalGrid, Tile};
use crate::surface::PixelSurface;

pub const DEAD: Tile = 0;
pub const ALIVE: Tile = 1;

#[rustfmt::skip]
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// A fixed pattern of live cells that can be stamped onto the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifeform {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Lifeform {
    /// Builds a lifeform from rows of 0/1 values. All rows must be equally wide.
    pub fn new(rows: &[&[u8]]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(CellsError::RaggedLifeform { row, got: values.len(), expected: width });
            }
            cells.extend(values.iter().map(|&v| v != 0));
        }
        Ok(Self { width, height: rows.len(), cells })
    }

    /// Parses one row per line; `alive` marks a live cell, anything else is dead.
    /// Blank lines are skipped.
    pub fn parse(text: &str, alive: char) -> Result<Self> {
        let rows: Vec<Vec<u8>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().map(|ch| u8::from(ch == alive)).collect())
            .collect();
        let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        Self::new(&rows)
    }

    /// Builds the smallest lifeform containing every `(row, col)`.
    pub fn from_cells(cells: &[(usize, usize)]) -> Self {
        let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
        let height = cells.iter().map(|&(r, _)| r - min_row + 1).max().unwrap_or(0);
        let width = cells.iter().map(|&(_, c)| c - min_col + 1).max().unwrap_or(0);

        let mut grid = vec![false; width * height];
        for &(r, c) in cells {
            grid[(r - min_row) * width + (c - min_col)] = true;
        }
        Self { width, height, cells: grid }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// `(row, col)` of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| (i / self.width, i % self.width))
    }
}

/// Conway's rule: birth on 3, survival on 2 or 3.
#[rustfmt::skip]
pub fn next_state(alive: bool, neighbors: u8) -> Tile {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => ALIVE,   // Survival
        (false, 3)            => ALIVE,   // Birth
        _                     => DEAD,    // Death or stays dead
    }
}

/// Game of Life with two grid buffers that trade places every generation.
#[derive(Debug)]
pub struct GameOfLife<S> {
    cells: CellGrid<S>,
    back: ToroidalGrid,
}

impl<S: PixelSurface> GameOfLife<S> {
    /// Needs at least two tiles (dead, alive); any beyond that are ignored.
    pub fn new(surface: S, options: &GridOptions) -> Result<Self> {
        let got = options.tiles.len();
        if got < 2 {
            return Err(CellsError::PaletteTooSmall { required: 2, got });
        }
        if got > 2 {
            warn!(tiles = got, "palette has more than two tiles; using only the first two");
        }

        let mut options = options.clone();
        options.tiles.truncate(2);
        let cells = CellGrid::new(surface, &options)?;
        let back = ToroidalGrid::new(cells.width(), cells.height());
        Ok(Self { cells, back })
    }

    /// Live cells in the wrapped Moore neighbourhood of `(x, y)`.
    pub fn get_neighbors(&self, x: i64, y: i64) -> u8 {
        count_neighbors(self.cells.grid(), x, y)
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.cells.tile(x, y) != DEAD
    }

    pub fn population(&self) -> usize {
        self.cells.grid().count_nonzero()
    }

    /// The buffer the next generation will be written into.
    pub fn back_buffer(&self) -> &ToroidalGrid {
        &self.back
    }

    /// Stamps `lifeform` with its top-left corner at `(x, y)`.
    pub fn spawn_lifeform(&mut self, x: i64, y: i64, lifeform: &Lifeform) {
        for (row, col) in lifeform.live_cells() {
            self.draw(x + col as i64, y + row as i64);
        }
    }

    /// Stamps `lifeform` centred on the grid.
    pub fn spawn_centered(&mut self, lifeform: &Lifeform) {
        let x = (self.cells.width() as i64 - lifeform.width() as i64) / 2;
        let y = (self.cells.height() as i64 - lifeform.height() as i64) / 2;
        self.spawn_lifeform(x, y, lifeform);
    }

    /// Clears the grid and fills roughly `density` of it with live cells.
    pub fn randomize(&mut self, seed: u64, density: f64) {
        self.reset();
        let mut rng = StdRng::seed_from_u64(seed);
        for y in 0..self.cells.height() as i64 {
            for x in 0..self.cells.width() as i64 {
                if rng.gen_bool(density.clamp(0.0, 1.0)) {
                    self.draw(x, y);
                }
            }
        }
    }
}

fn count_neighbors(grid: &ToroidalGrid, x: i64, y: i64) -> u8 {
    NEIGHBORS
        .iter()
        .filter(|&&(dx, dy)| grid.get(x + dx, y + dy) != DEAD)
        .count() as u8
}

impl<S: PixelSurface> Automaton for GameOfLife<S> {
    type Surface = S;

    fn cells(&self) -> &CellGrid<S> {
        &self.cells
    }

    fn cells_mut(&mut self) -> &mut CellGrid<S> {
        &mut self.cells
    }

    fn name(&self) -> &'static str {
        "game of life"
    }

    fn step(&mut self) -> Result<()> {
        let grid = self.cells.grid();
        for y in 0..grid.height() as i64 {
            for x in 0..grid.width() as i64 {
                let alive = grid.get(x, y) != DEAD;
                self.back.set(x, y, next_state(alive, count_neighbors(grid, x, y)));
            }
        }

        self.cells.repaint_changes(&self.back);
        self.cells.swap_grid(&mut self.back);
        Ok(())
    }

    fn draw(&mut self, x: i64, y: i64) {
        self.cells.paint(x, y, ALIVE);
    }

    fn click(&mut self, x: i64, y: i64, button: u16) {
        if button == self.cells.erase_button() {
            self.erase(x, y);
        } else {
            self.draw(x, y);
        }
    }

    fn reset(&mut self) {
        self.cells.reset_state();
        self.back.reinit(DEAD);
    }
}
