// surface.rs - The pixel surface boundary
//
// Automata paint through `PixelSurface` one pixel at a time and never keep
// their own copy of the colors on screen. Hosts implement it over whatever
// they render with; `PixelBuffer` is the in-memory one used headless.

use crate::color::Color;
use crate::error::{CellsError, Result};

pub trait PixelSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Coordinates are in range; callers wrap before asking.
    fn get_pixel(&self, x: usize, y: usize) -> Color;
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);

    fn fill(&mut self, color: Color) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// Row-major RGBA pixels in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CellsError::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// How many pixels currently show `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl PixelSurface for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_buffer_is_rejected() {
        assert_eq!(
            PixelBuffer::new(0, 4),
            Err(CellsError::InvalidSurface { width: 0, height: 4 })
        );
    }

    #[test]
    fn set_then_get_touches_one_pixel() {
        let mut buffer = PixelBuffer::new(3, 2).unwrap();
        buffer.fill(Color::BLACK);
        buffer.set_pixel(2, 1, Color::WHITE);
        assert_eq!(buffer.get_pixel(2, 1), Color::WHITE);
        assert_eq!(buffer.count(Color::WHITE), 1);
        assert_eq!(buffer.count(Color::BLACK), 5);
    }
}
