use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xffffff);

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn as_rgb8(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| Error::InvalidColor(hex.to_string()))
    }

    /// Derives a shaded variant of this color.
    ///
    /// A negative `factor` scales every channel toward black by `1 + factor`
    /// (rounded to nearest; a non-zero channel that rounding would leave
    /// unchanged is lowered by one, so it always strictly decreases). A
    /// non-negative `factor` adds `factor * 255` to every channel, saturating
    /// at 255.
    pub fn adjust(self, factor: f64) -> Self {
        let (r, g, b) = self.as_rgb8();
        let channel = |c: u8| -> u8 {
            if factor < 0.0 {
                let scaled = (c as f64 * (1.0 + factor)).round();
                if c > 0 && scaled >= c as f64 {
                    c - 1
                } else {
                    scaled.clamp(0.0, 255.0) as u8
                }
            } else {
                (c as f64 + (factor * 255.0).round()).min(255.0) as u8
            }
        };
        Self::rgb8(channel(r), channel(g), channel(b))
    }

    /// Applies per-channel light: `light` scales the surface color and
    /// `highlight` adds white on top. Channels saturate at 255.
    pub fn shade(self, light: [f64; 3], highlight: [f64; 3]) -> Self {
        let (r, g, b) = self.as_rgb8();
        let channel = |c: u8, i: usize| {
            (c as f64 * light[i] + highlight[i] * 255.0).clamp(0.0, 255.0) as u8
        };
        Self::rgb8(channel(r, 0), channel(g, 1), channel(b, 2))
    }

    /// Channels as fractions of full intensity.
    pub fn normalized(self) -> [f64; 3] {
        let (r, g, b) = self.as_rgb8();
        [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
