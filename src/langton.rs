// langton.rs - Langton's Ant and its multi-colour generalisations
//
// Each ant stands on a cell, advances that cell's tile as it leaves, turns by
// the rule entry for the tile it stood on, and steps one cell forward. Ants
// that walk off the grid are removed; the grid itself still wraps for drawing.

use rand::Rng;
use tracing::{debug, info};

use crate::automaton::{Automaton, CellGrid};
use crate::color::Color;
use crate::config::GridOptions;
use crate::error::{CellsError, Result};
use crate::grid::Tile;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Clockwise on screen, where y grows downwards, is a negative angle.
    fn degrees(self) -> i32 {
        match self {
            Turn::Right => -90,
            Turn::Left => 90,
        }
    }
}

/// Reads a rule such as `"RL"` or `"llrr"`. Characters other than L and R are
/// ignored; a rule with no turns left is an error.
pub fn parse_rule(rule: &str) -> Result<Vec<Turn>> {
    let turns: Vec<Turn> = rule
        .chars()
        .filter_map(|ch| match ch.to_ascii_uppercase() {
            'L' => Some(Turn::Left),
            'R' => Some(Turn::Right),
            _ => None,
        })
        .collect();
    if turns.is_empty() {
        return Err(CellsError::EmptyRule(rule.to_string()));
    }
    Ok(turns)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ant {
    spawn: (i64, i64),
    x: i64,
    y: i64,
    angle: i32,
    tile: Tile,
    color: Color,
}

impl Ant {
    /// Heading of a freshly spawned ant: up the screen.
    pub const INITIAL_ANGLE: i32 = 270;

    /// An ant with a random colour.
    pub fn new(x: i64, y: i64) -> Self {
        Self::with_color(x, y, Color::random_opaque())
    }

    pub fn with_color(x: i64, y: i64, color: Color) -> Self {
        Self {
            spawn: (x, y),
            x,
            y,
            angle: Self::INITIAL_ANGLE,
            tile: 0,
            color,
        }
    }

    /// Back to the spawn position and heading.
    pub fn init(&mut self) {
        (self.x, self.y) = self.spawn;
        self.angle = Self::INITIAL_ANGLE;
        self.tile = 0;
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn spawn(&self) -> (i64, i64) {
        self.spawn
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Tile under the ant, read when it arrived.
    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn turn(&mut self, turn: Turn) {
        self.angle = (self.angle + turn.degrees()).rem_euclid(360);
    }

    /// One cell along the heading. Truncation keeps cos(90°) at 0 rather than
    /// a tiny float.
    fn forward(&mut self) {
        let radians = f64::from(self.angle).to_radians();
        self.x += radians.cos().trunc() as i64;
        self.y += radians.sin().trunc() as i64;
    }
}

#[derive(Debug)]
pub struct LangtonsAnt<S> {
    cells: CellGrid<S>,
    ants: Vec<Ant>,
    rule: Vec<Turn>,
    chaos: bool,
}

impl<S: PixelSurface> LangtonsAnt<S> {
    /// The palette grows with random colours until it has one tile per rule
    /// entry (and never fewer than two).
    pub fn new(surface: S, options: &GridOptions) -> Result<Self> {
        let rule = parse_rule(&options.rule)?;
        let mut cells = CellGrid::new(surface, options)?;

        let wanted = rule.len().max(2);
        let tiles = cells.tiles_mut();
        if tiles.len() < wanted {
            debug!(from = tiles.len(), to = wanted, "growing palette to fit rule");
            tiles.resize_with(wanted, Color::random_opaque);
        }

        Ok(Self {
            cells,
            ants: Vec::new(),
            rule,
            chaos: options.chaos,
        })
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn rule(&self) -> &[Turn] {
        &self.rule
    }

    pub fn chaos(&self) -> bool {
        self.chaos
    }

    /// In chaos mode drawing spawns ants instead of advancing tiles.
    pub fn set_chaos(&mut self, chaos: bool) {
        self.chaos = chaos;
    }

    /// Adds an ant, restarting the loop if it had stopped.
    pub fn spawn_ant(&mut self, ant: Ant) {
        self.ants.push(ant);
        if self.is_stopped() {
            self.start();
        }
    }

    /// Spawns `count` ants at random cells of the `length`-sided square whose
    /// bottom-right corner is `(x, y)`.
    pub fn spawn_pack(&mut self, x: i64, y: i64, length: u32, count: usize) {
        let length = i64::from(length);
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let ax = rng.gen_range(x - length..=x);
            let ay = rng.gen_range(y - length..=y);
            self.spawn_ant(Ant::new(ax, ay));
        }
        info!(count, x, y, length, "spawned ant pack");
    }
}

impl<S: PixelSurface> Automaton for LangtonsAnt<S> {
    type Surface = S;

    fn cells(&self) -> &CellGrid<S> {
        &self.cells
    }

    fn cells_mut(&mut self) -> &mut CellGrid<S> {
        &mut self.cells
    }

    fn name(&self) -> &'static str {
        "langton's ant"
    }

    fn step(&mut self) -> Result<()> {
        let Self { cells, ants, rule, .. } = self;
        let palette = cells.tiles().len();

        ants.retain_mut(|ant| {
            if !cells.grid().contains(ant.x, ant.y) {
                return false;
            }

            // The cell the ant leaves moves on to its next tile.
            cells.paint(ant.x, ant.y, (ant.tile + 1) % palette);

            // Tiles past the end of the rule turn left.
            ant.turn(rule.get(ant.tile).copied().unwrap_or(Turn::Left));
            ant.forward();

            if !cells.grid().contains(ant.x, ant.y) {
                return false;
            }
            ant.tile = cells.tile(ant.x, ant.y);
            cells.paint_pixel(ant.x, ant.y, ant.color);
            true
        });

        if ants.is_empty() {
            debug!("no ants left; stopping");
            cells.sim_mut().stop();
        }
        Ok(())
    }

    fn draw(&mut self, x: i64, y: i64) {
        if self.chaos {
            self.spawn_ant(Ant::new(x, y));
        } else {
            self.cells.increment(x, y);
        }
    }

    fn click(&mut self, x: i64, y: i64, button: u16) {
        if button == self.cells.draw_button() {
            self.spawn_ant(Ant::new(x, y));
        }
    }

    /// Clears the grid, puts every ant back where it spawned, and sets them
    /// marching again.
    fn reset(&mut self) {
        self.cells.reset_state();
        for ant in &mut self.ants {
            ant.init();
        }
        self.start();
    }
}
