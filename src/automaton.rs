// automaton.rs - The shared grid every automaton is built on, and the capability set they expose

use std::time::Instant;

use tracing::debug;

use crate::color::Color;
use crate::config::GridOptions;
use crate::error::{CellsError, Result};
use crate::grid::{ToroidalGrid, Tile, wrap};
use crate::sim_loop::SimulationLoop;
use crate::surface::PixelSurface;

/// Which action pointer movement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pen {
    #[default]
    Up,
    Drawing,
    Erasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
    Click,
}

/// A pointer event already converted to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i64,
    pub y: i64,
    pub button: u16,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i64, y: i64, button: u16) -> Self {
        Self { kind, x, y, button }
    }
}

/// A toroidal grid of tiles, the palette they index, the surface they are
/// painted on, and the loop that steps them.
#[derive(Debug)]
pub struct CellGrid<S> {
    grid: ToroidalGrid,
    tiles: Vec<Color>,
    background: Option<Color>,
    surface: S,
    sim: SimulationLoop,
    pen: Pen,
    last_point: Option<(i64, i64)>,
    enable_drawing: bool,
    draw_button: u16,
    erase_button: u16,
}

impl<S: PixelSurface> CellGrid<S> {
    /// The grid takes the surface's size and starts cleared to the background.
    pub fn new(surface: S, options: &GridOptions) -> Result<Self> {
        options.validate()?;
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(CellsError::InvalidSurface { width, height });
        }

        let mut cells = Self {
            grid: ToroidalGrid::new(width, height),
            tiles: options.tiles.clone(),
            background: options.background,
            surface,
            sim: SimulationLoop::new(options.step_cooldown),
            pen: Pen::Up,
            last_point: None,
            enable_drawing: options.enable_drawing,
            draw_button: options.draw_button,
            erase_button: options.erase_button,
        };
        cells.init();
        debug!(width, height, tiles = cells.tiles.len(), "cell grid created");
        Ok(cells)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &ToroidalGrid {
        &self.grid
    }

    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Vec<Color> {
        &mut self.tiles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn sim(&self) -> &SimulationLoop {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimulationLoop {
        &mut self.sim
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    pub fn draw_button(&self) -> u16 {
        self.draw_button
    }

    pub fn erase_button(&self) -> u16 {
        self.erase_button
    }

    /// The color a reset clears to: the override if set, else tile 0.
    pub fn background(&self) -> Color {
        self.background.unwrap_or(self.tiles[0])
    }

    pub fn tile(&self, x: i64, y: i64) -> Tile {
        self.grid.get(x, y)
    }

    /// Stores `tile` (clamped to the palette) and paints its color.
    pub fn paint(&mut self, x: i64, y: i64, tile: Tile) {
        let tile = tile.min(self.tiles.len() - 1);
        self.grid.set(x, y, tile);
        let color = self.tiles[tile];
        self.paint_pixel(x, y, color);
    }

    /// Paints a pixel without touching the stored tile.
    pub fn paint_pixel(&mut self, x: i64, y: i64, color: Color) {
        let (x, y) = (wrap(x, self.grid.width()), wrap(y, self.grid.height()));
        self.surface.set_pixel(x, y, color);
    }

    pub fn pixel(&self, x: i64, y: i64) -> Color {
        self.surface
            .get_pixel(wrap(x, self.grid.width()), wrap(y, self.grid.height()))
    }

    /// Advances a cell's tile by one, stopping at the last palette entry.
    pub fn increment(&mut self, x: i64, y: i64) {
        let tile = self.grid.get(x, y) + 1;
        self.paint(x, y, tile);
    }

    pub fn clear_cell(&mut self, x: i64, y: i64) {
        self.grid.set(x, y, 0);
        let color = self.tiles[0];
        self.paint_pixel(x, y, color);
    }

    /// Zeroes the grid and clears the surface to the background.
    pub fn init(&mut self) {
        self.grid.reinit(0);
        let background = self.background();
        self.surface.fill(background);
    }

    /// Stops the loop, clears grid and surface, and zeroes the counters.
    pub fn reset_state(&mut self) {
        self.sim.stop();
        self.init();
        self.sim.reset();
    }

    /// Paints every cell where `next` differs from the current grid.
    pub(crate) fn repaint_changes(&mut self, next: &ToroidalGrid) {
        let width = self.grid.width();
        for (i, (&old, &new)) in self.grid.cells().iter().zip(next.cells()).enumerate() {
            if old != new {
                self.surface.set_pixel(i % width, i / width, self.tiles[new]);
            }
        }
    }

    /// Exchanges the active grid with `other` without copying either.
    pub(crate) fn swap_grid(&mut self, other: &mut ToroidalGrid) {
        std::mem::swap(&mut self.grid, other);
    }
}

/// The capability set every automaton offers: draw, erase, step, reset, and
/// the loop controls built on them.
///
/// Implementors only supply access to their [`CellGrid`]; everything else has
/// a default. [`step`](Automaton::step) defaults to
/// [`CellsError::NotImplemented`], so a concrete rule must override it.
pub trait Automaton {
    type Surface: PixelSurface;

    fn cells(&self) -> &CellGrid<Self::Surface>;
    fn cells_mut(&mut self) -> &mut CellGrid<Self::Surface>;

    fn name(&self) -> &'static str {
        "cell grid"
    }

    fn sim(&self) -> &SimulationLoop {
        self.cells().sim()
    }

    fn step(&mut self) -> Result<()> {
        Err(CellsError::NotImplemented(self.name()))
    }

    fn draw(&mut self, x: i64, y: i64) {
        self.cells_mut().increment(x, y);
    }

    fn erase(&mut self, x: i64, y: i64) {
        self.cells_mut().clear_cell(x, y);
    }

    /// Walks from `(x1, y1)` to `(x2, y2)` in `max(|dx|, |dy|)` equal steps,
    /// drawing or erasing each visited cell according to the pen. The start
    /// point is only visited when the line has zero length.
    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let steps = dx.abs().max(dy.abs()).max(1);
        let pen = self.cells().pen();

        for i in 1..=steps {
            let x = x1 + (dx * i).div_euclid(steps);
            let y = y1 + (dy * i).div_euclid(steps);
            match pen {
                Pen::Drawing => self.draw(x, y),
                Pen::Erasing => self.erase(x, y),
                Pen::Up => {}
            }
        }

        self.cells_mut().last_point = Some((x2, y2));
    }

    /// Returns whether the loop was started; an already-running loop is left
    /// alone.
    fn start(&mut self) -> bool {
        self.cells_mut().sim_mut().start()
    }

    fn stop(&mut self) {
        self.cells_mut().sim_mut().stop();
    }

    fn is_stopped(&self) -> bool {
        self.sim().is_stopped()
    }

    fn reset(&mut self) {
        self.cells_mut().reset_state();
    }

    /// A click at a single cell. Nothing happens by default.
    fn click(&mut self, _x: i64, _y: i64, _button: u16) {}

    fn handle_pointer(&mut self, event: PointerEvent) {
        let PointerEvent { kind, x, y, button } = event;
        match kind {
            PointerKind::Down => {
                let cells = self.cells_mut();
                if !cells.enable_drawing {
                    return;
                }
                cells.pen = if button == cells.draw_button {
                    Pen::Drawing
                } else if button == cells.erase_button {
                    Pen::Erasing
                } else {
                    return;
                };
                cells.last_point = Some((x, y));
            }
            PointerKind::Up => {
                let cells = self.cells_mut();
                let released = match cells.pen {
                    Pen::Drawing => button == cells.draw_button,
                    Pen::Erasing => button == cells.erase_button,
                    Pen::Up => false,
                };
                if released {
                    cells.pen = Pen::Up;
                }
            }
            PointerKind::Move => {
                if self.cells().pen == Pen::Up {
                    return;
                }
                let (lx, ly) = self.cells().last_point.unwrap_or((x, y));
                self.draw_line(lx, ly, x, y);
            }
            PointerKind::Click => self.click(x, y, button),
        }
    }

    /// Runs one step if the loop is running, then counts it. A failing step
    /// stops the loop.
    fn advance(&mut self) -> Result<bool> {
        if self.is_stopped() {
            return Ok(false);
        }
        if let Err(err) = self.step() {
            self.stop();
            return Err(err);
        }
        self.cells_mut().sim_mut().complete_step();
        Ok(true)
    }

    /// Frame-callback driver: steps only when the cooldown has elapsed.
    fn advance_if_due(&mut self, now: Instant) -> Result<bool> {
        if !self.sim().is_due(now) {
            return Ok(false);
        }
        self.cells_mut().sim_mut().mark(now);
        self.advance()
    }
}

/// The bare grid is an automaton with no rule: drawing works, stepping does not.
impl<S: PixelSurface> Automaton for CellGrid<S> {
    type Surface = S;

    fn cells(&self) -> &CellGrid<S> {
        self
    }

    fn cells_mut(&mut self) -> &mut CellGrid<S> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelBuffer;

    fn palette3() -> GridOptions {
        GridOptions {
            tiles: vec![Color::BLACK, Color::rgb(255, 0, 0), Color::WHITE],
            ..Default::default()
        }
    }

    fn cell_grid(width: usize, height: usize, options: &GridOptions) -> CellGrid<PixelBuffer> {
        CellGrid::new(PixelBuffer::new(width, height).unwrap(), options).unwrap()
    }

    #[test]
    fn new_clears_to_background_override() {
        let options = GridOptions {
            background: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        let cells = cell_grid(4, 4, &options);
        assert_eq!(cells.surface().count(Color::rgb(1, 2, 3)), 16);
        assert_eq!(cells.grid().count_nonzero(), 0);
    }

    #[test]
    fn draw_saturates_at_last_tile() {
        let mut cells = cell_grid(4, 4, &palette3());
        for expected in [1, 2, 2, 2] {
            cells.draw(1, 1);
            assert_eq!(cells.tile(1, 1), expected);
        }
        assert_eq!(cells.pixel(1, 1), Color::WHITE);
    }

    #[test]
    fn erase_returns_to_background_tile() {
        let mut cells = cell_grid(4, 4, &palette3());
        cells.draw(-1, 0);
        assert_eq!(cells.tile(3, 0), 1);
        cells.erase(3, 0);
        assert_eq!(cells.tile(-1, 0), 0);
        assert_eq!(cells.pixel(3, 0), Color::BLACK);
    }

    #[test]
    fn bare_grid_cannot_step() {
        let mut cells = cell_grid(2, 2, &GridOptions::default());
        assert_eq!(cells.step(), Err(CellsError::NotImplemented("cell grid")));
        cells.start();
        assert!(cells.advance().is_err());
        assert!(cells.is_stopped());
        assert_eq!(cells.advance(), Ok(false));
    }

    #[test]
    fn zero_length_line_draws_one_cell() {
        let mut cells = cell_grid(8, 8, &palette3());
        cells.set_pen(Pen::Drawing);
        cells.draw_line(3, 4, 3, 4);
        assert_eq!(cells.grid().count_nonzero(), 1);
        assert_eq!(cells.tile(3, 4), 1);

        cells.set_pen(Pen::Erasing);
        cells.draw_line(3, 4, 3, 4);
        assert_eq!(cells.grid().count_nonzero(), 0);
    }

    #[test]
    fn line_visits_every_cell_along_major_axis() {
        let mut cells = cell_grid(16, 16, &GridOptions::default());
        cells.set_pen(Pen::Drawing);
        cells.draw_line(0, 0, 6, 3);
        for x in 1..=6 {
            let y = (3 * x) / 6;
            assert_eq!(cells.tile(x, y), 1, "({x}, {y})");
        }
        assert_eq!(cells.grid().count_nonzero(), 6);
        assert_eq!(cells.tile(0, 0), 0);
    }

    #[test]
    fn line_with_pen_up_changes_nothing() {
        let mut cells = cell_grid(8, 8, &GridOptions::default());
        cells.draw_line(0, 0, 5, 5);
        assert_eq!(cells.grid().count_nonzero(), 0);
    }

    #[test]
    fn pointer_drag_draws_from_press_point() {
        let mut cells = cell_grid(8, 8, &GridOptions::default());
        cells.handle_pointer(PointerEvent::new(PointerKind::Down, 1, 1, 0));
        assert_eq!(cells.pen(), Pen::Drawing);
        cells.handle_pointer(PointerEvent::new(PointerKind::Move, 4, 1, 0));
        assert_eq!(cells.grid().count_nonzero(), 3);
        cells.handle_pointer(PointerEvent::new(PointerKind::Up, 4, 1, 0));
        assert_eq!(cells.pen(), Pen::Up);
        cells.handle_pointer(PointerEvent::new(PointerKind::Move, 6, 6, 0));
        assert_eq!(cells.grid().count_nonzero(), 3);
    }

    #[test]
    fn erase_button_erases_and_other_buttons_are_ignored() {
        let mut cells = cell_grid(8, 8, &GridOptions::default());
        cells.draw(2, 2);
        cells.handle_pointer(PointerEvent::new(PointerKind::Down, 1, 2, 1));
        assert_eq!(cells.pen(), Pen::Up);
        cells.handle_pointer(PointerEvent::new(PointerKind::Down, 1, 2, 2));
        cells.handle_pointer(PointerEvent::new(PointerKind::Move, 3, 2, 2));
        assert_eq!(cells.grid().count_nonzero(), 0);
    }

    #[test]
    fn drawing_can_be_disabled() {
        let options = GridOptions { enable_drawing: false, ..Default::default() };
        let mut cells = cell_grid(8, 8, &options);
        cells.handle_pointer(PointerEvent::new(PointerKind::Down, 1, 1, 0));
        cells.handle_pointer(PointerEvent::new(PointerKind::Move, 4, 4, 0));
        assert_eq!(cells.grid().count_nonzero(), 0);
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let mut cells = cell_grid(5, 5, &palette3());
        cells.draw(0, 0);
        cells.draw(4, 2);
        cells.start();
        cells.reset();
        let once = (cells.grid().clone(), cells.surface().clone());
        cells.reset();
        assert_eq!((cells.grid().clone(), cells.surface().clone()), once);
        assert_eq!(cells.grid().count_nonzero(), 0);
        assert!(cells.is_stopped());
        assert_eq!(cells.sim().ticks(), 0);
    }
}
