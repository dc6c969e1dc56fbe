// error.rs - Error types for the cells engine

use thiserror::Error;

/// Errors raised while building or driving an automaton.
///
/// Everything here is a programming or construction error: the engine has no
/// recoverable runtime failures, since every integer coordinate is valid on a
/// toroidal grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellsError {
    /// The pixel surface has no area to draw on.
    #[error("surface is not renderable: {width}x{height}")]
    InvalidSurface {
        /// Surface width in pixels.
        width: usize,
        /// Surface height in pixels.
        height: usize,
    },

    /// The tile palette is shorter than the automaton needs.
    #[error("palette must contain at least {required} colors, got {got}")]
    PaletteTooSmall {
        /// Minimum palette length.
        required: usize,
        /// Palette length supplied.
        got: usize,
    },

    /// An ant rule with no `L` or `R` turns left after filtering.
    #[error("rule {0:?} contains no L or R turns")]
    EmptyRule(String),

    /// Lifeform rows of differing widths.
    #[error("lifeform row {row} has width {got}, expected {expected}")]
    RaggedLifeform {
        /// Offending row.
        row: usize,
        /// Width of that row.
        got: usize,
        /// Width of the first row.
        expected: usize,
    },

    /// Zoom factor must be positive.
    #[error("zoom factor must be positive, got {0}")]
    InvalidZoom(f32),

    /// `step` was invoked on an automaton that does not define one.
    #[error("`step` is not implemented for {0}; wrap the grid in a concrete automaton")]
    NotImplemented(&'static str),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CellsError>;
