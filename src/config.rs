// config.rs - Construction-time options shared by every automaton

use std::time::Duration;

use crate::color::Color;
use crate::error::{CellsError, Result};

/// Mouse button that draws unless overridden.
pub const DRAW_BUTTON: u16 = 0;
/// Mouse button that erases unless overridden.
pub const ERASE_BUTTON: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Tile colors; index 0 is the background.
    pub tiles: Vec<Color>,
    /// Shown as the background on reset, while still treated as tile 0.
    pub background: Option<Color>,
    /// Device pixels per grid cell. Only the input layer uses it.
    pub zoom: f32,
    /// Minimum delay between steps.
    pub step_cooldown: Duration,
    /// Ant turn rule over `L` and `R`.
    pub rule: String,
    /// Drawing spawns ants instead of advancing tiles.
    pub chaos: bool,
    pub enable_drawing: bool,
    pub draw_button: u16,
    pub erase_button: u16,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            tiles: vec![Color::BLACK, Color::WHITE],
            background: None,
            zoom: 4.0,
            step_cooldown: Duration::from_millis(1),
            rule: "RL".to_string(),
            chaos: false,
            enable_drawing: true,
            draw_button: DRAW_BUTTON,
            erase_button: ERASE_BUTTON,
        }
    }
}

impl GridOptions {
    pub fn validate(&self) -> Result<()> {
        if self.tiles.is_empty() {
            return Err(CellsError::PaletteTooSmall { required: 1, got: 0 });
        }
        if self.zoom.is_nan() || self.zoom <= 0.0 {
            return Err(CellsError::InvalidZoom(self.zoom));
        }
        Ok(())
    }

    /// Converts a device-pixel position into grid coordinates.
    pub fn to_grid(&self, px: f32, py: f32, pixels_per_point: f32) -> (i64, i64) {
        let scale = pixels_per_point * self.zoom;
        ((px / scale).floor() as i64, (py / scale).floor() as i64)
    }
}
