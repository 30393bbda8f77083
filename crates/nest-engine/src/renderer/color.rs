use serde::{Deserialize, Deserializer, Serialize};

/// Straight-alpha RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Deep-space background `#0A0E14`.
    pub const DEEP_SPACE: Color = Color::rgb(10.0 / 255.0, 14.0 / 255.0, 20.0 / 255.0);
    /// Cyber cyan `#00F0FF`.
    pub const CYBER_CYAN: Color = Color::rgb(0.0, 240.0 / 255.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(a as f32 / 255.0))
    }

    /// Convert HSL to RGB. `hue` in degrees, `saturation`/`lightness` in 0.0 - 1.0.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgb(r + m, g + m, b + m)
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Accepts `"#RRGGBB"`, `[r, g, b]`/`[r, g, b, a]` or `{ "r": .., "g": .., "b": .., "a": .. }`.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Hex(String),
            Array(Vec<f32>),
            Struct {
                r: f32,
                g: f32,
                b: f32,
                #[serde(default = "opaque")]
                a: f32,
            },
        }

        fn opaque() -> f32 {
            1.0
        }

        match Raw::deserialize(d)? {
            Raw::Hex(s) => Color::from_hex(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{s}'"))),
            Raw::Array(v) => match v.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom("color array needs 3 or 4 components")),
            },
            Raw::Struct { r, g, b, a } => Ok(Color::new(r, g, b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-3 && (a.g - b.g).abs() < 1e-3 && (a.b - b.b).abs() < 1e-3
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
        assert!(close(Color::from_hsl(360.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#0A0E14"), Some(Color::DEEP_SPACE));
        assert_eq!(Color::from_hex("00F0FF"), Some(Color::CYBER_CYAN));
        let half = Color::from_hex("#FFFFFF80").unwrap();
        assert!((half.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn deserializes_all_forms() {
        let hex: Color = serde_json::from_str(r##""#00F0FF""##).unwrap();
        assert_eq!(hex, Color::CYBER_CYAN);
        let arr: Color = serde_json::from_str("[1.0, 0.5, 0.0]").unwrap();
        assert_eq!(arr, Color::rgb(1.0, 0.5, 0.0));
        let obj: Color = serde_json::from_str(r#"{ "r": 0.1, "g": 0.2, "b": 0.3, "a": 0.4 }"#).unwrap();
        assert_eq!(obj, Color::new(0.1, 0.2, 0.3, 0.4));
        assert!(serde_json::from_str::<Color>("[1.0]").is_err());
    }
}
