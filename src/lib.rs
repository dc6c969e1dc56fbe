// lib.rs - Public surface of the cells engine

//! Cellular automata painted onto a pixel surface.
//!
//! A [`CellGrid`] couples a toroidal tile grid, a colour palette, a
//! [`PixelSurface`] and a [`SimulationLoop`]. Two rules are built on it:
//! [`LangtonsAnt`] and [`GameOfLife`]. Both implement [`Automaton`], which is
//! all a host needs to forward pointer input and drive the loop.
//!
//! ```
//! use cells::{Automaton, GameOfLife, GridOptions, PixelBuffer, patterns};
//!
//! let surface = PixelBuffer::new(32, 32)?;
//! let mut life = GameOfLife::new(surface, &GridOptions::default())?;
//! life.spawn_centered(&patterns::find("glider").unwrap().lifeform());
//! life.start();
//! life.advance()?;
//! assert_eq!(life.sim().ticks(), 1);
//! # Ok::<(), cells::CellsError>(())
//! ```

pub mod automaton;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod langton;
pub mod life;
pub mod patterns;
pub mod sim_loop;
pub mod surface;

pub use automaton::{Automaton, CellGrid, Pen, PointerEvent, PointerKind};
pub use color::{Color, Hsla};
pub use config::GridOptions;
pub use error::{CellsError, Result};
pub use grid::{Tile, ToroidalGrid, wrap};
pub use langton::{Ant, LangtonsAnt, Turn};
pub use life::{GameOfLife, Lifeform};
pub use sim_loop::SimulationLoop;
pub use surface::{PixelBuffer, PixelSurface};
