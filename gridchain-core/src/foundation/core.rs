use crate::foundation::error::{GridError, GridResult};

pub use kurbo::{Rect, Vec2};

/// Opaque 8-bit RGB color. Equality is exact component equality.
///
/// Serialized as a `#rrggbb` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// `#ffffff`, the note boundary sentinel.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// `#000000`, the pixel boundary sentinel.
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    /// `#ff0000`, the out-of-range sentinel.
    pub const RED: Self = Self::new(0xff, 0x00, 0x00);

    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xrrggbb` value; the top byte is ignored.
    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    ///
    /// An alpha channel is folded into the color with [`Rgb8::blend_over_white`], since grids
    /// carry no transparency.
    pub fn parse_hex(s: &str) -> GridResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(GridError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GridError::validation(format!("color '{s}' is not valid hex")))
        };
        let rgb = Self::new(byte(0)?, byte(2)?, byte(4)?);
        if hex.len() == 8 {
            Ok(rgb.blend_over_white(byte(6)?))
        } else {
            Ok(rgb)
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Fold a straight alpha value into the color by lerping towards a white background.
    pub fn blend_over_white(self, alpha: u8) -> Self {
        let coverage = f64::from(alpha) / 255.0;
        self.lerp(Self::WHITE, 1.0 - coverage)
    }

    /// Opaque RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb8 {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
