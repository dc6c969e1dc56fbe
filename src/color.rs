// color.rs - 32-bit RGBA colors and their HSLA view

use rand::Rng;
use std::fmt;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Folds any integer into a channel value: absolute value, then modulo 256.
fn channel(value: i64) -> u8 {
    (value.unsigned_abs() % 256) as u8
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from in-range channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from arbitrary integers. Negative or oversized input is
    /// normalized per channel, so `new(-1, 256, 511, 255)` is `(1, 0, 255, 255)`.
    pub fn new(r: i64, g: i64, b: i64, a: i64) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: channel(a),
        }
    }

    /// Builds a color from a slice, filling missing channels with random values.
    pub fn from_slice(values: &[i64]) -> Self {
        let mut rng = rand::thread_rng();
        let mut pick = |i: usize| values.get(i).copied().unwrap_or_else(|| rng.gen_range(0..256));
        Self::new(pick(0), pick(1), pick(2), pick(3))
    }

    /// A fully random color, alpha included.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::rgba(rng.r#gen(), rng.r#gen(), rng.r#gen(), rng.r#gen())
    }

    /// A random opaque color; used for ants and grown palettes.
    pub fn random_opaque() -> Self {
        let mut rng = rand::thread_rng();
        Self::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen())
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Lower-case `rrggbbaa`.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    pub fn to_hsla(self) -> Hsla {
        Hsla::from(self)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1], 8-bit alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: u8,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: u8) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            a,
        }
    }
}

impl From<Color> for Hsla {
    fn from(color: Color) -> Self {
        let r = color.r as f32 / 255.0;
        let g = color.g as f32 / 255.0;
        let b = color.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d == 0.0 {
            return Hsla { h: 0.0, s: 0.0, l, a: color.a };
        }

        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsla { h: h * 60.0, s, l, a: color.a }
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Color {
    fn from(hsla: Hsla) -> Self {
        let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;

        if hsla.s == 0.0 {
            let v = to_u8(hsla.l);
            return Color::rgba(v, v, v, hsla.a);
        }

        let q = if hsla.l < 0.5 {
            hsla.l * (1.0 + hsla.s)
        } else {
            hsla.l + hsla.s - hsla.l * hsla.s
        };
        let p = 2.0 * hsla.l - q;
        let h = hsla.h / 360.0;

        Color::rgba(
            to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_channel(p, q, h)),
            to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
            hsla.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_normalized() {
        for value in [-1_000_000, -256, -1, 0, 1, 255, 256, 1_000_003] {
            let c = Color::new(value, value, value, value);
            let expected = (value.unsigned_abs() % 256) as u8;
            assert_eq!(c.to_array(), [expected; 4]);
        }
        assert_eq!(Color::new(-1, 256, 511, 255), Color::rgba(1, 0, 255, 255));
    }

    #[test]
    fn from_slice_keeps_given_channels() {
        let c = Color::from_slice(&[10, 20, 30, 40]);
        assert_eq!(c, Color::rgba(10, 20, 30, 40));
    }

    #[test]
    fn hex_is_rrggbbaa() {
        assert_eq!(Color::rgba(255, 0, 16, 255).hex(), "ff0010ff");
        assert_eq!(Color::BLACK.to_string(), "#000000ff");
    }

    #[test]
    fn hsl_of_primaries() {
        let red = Color::rgb(255, 0, 0).to_hsla();
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));

        let blue = Hsla::from(Color::rgb(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-4);
    }

    #[test]
    fn hsl_converts_back() {
        let colors = [
            Color::BLACK,
            Color::WHITE,
            Color::rgb(255, 0, 0),
            Color::rgb(0, 128, 255),
            Color::rgba(12, 200, 77, 9),
            Color::rgb(128, 128, 128),
        ];
        for c in colors {
            assert_eq!(Color::from(c.to_hsla()), c, "{c}");
        }
    }
}
