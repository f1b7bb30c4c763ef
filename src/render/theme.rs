//! Brand color handling
//!
//! Brand colors come from external JSON and may be garbage. Every color is
//! validated as a six-digit hex code before use; invalid values fall back to
//! the per-game defaults so a bad config degrades to the stock palette
//! instead of painting with CSS parse errors.

use crate::config::Brand;

/// True for a `#RRGGBB` color, case-insensitive
pub fn is_valid_hex(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The raw color if it is valid hex, otherwise the fallback
pub fn resolve(raw: &str, fallback: &str) -> String {
    if is_valid_hex(raw) {
        raw.to_string()
    } else {
        fallback.to_string()
    }
}

/// Append a two-digit hex alpha suffix to a validated color
pub fn with_alpha(color: &str, suffix: &str) -> String {
    format!("{color}{suffix}")
}

/// Lighten (positive) or darken (negative) a hex color channel-wise,
/// clamping to 0..=255. Invalid input is returned unchanged.
pub fn adjust_brightness(color: &str, delta: i32) -> String {
    if !is_valid_hex(color) {
        return color.to_string();
    }
    let mut out = String::with_capacity(7);
    out.push('#');
    for i in 0..3 {
        let channel = u8::from_str_radix(&color[1 + i * 2..3 + i * 2], 16).unwrap_or(0);
        let adjusted = (channel as i32 + delta).clamp(0, 255) as u8;
        out.push_str(&format!("{adjusted:02x}"));
    }
    out
}

/// Validated brand palette with per-game fallbacks applied
#[derive(Debug, Clone)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// Translucent primary wash behind the field, only when the brand
    /// primary is a valid color
    pub tint: Option<String>,
    /// Overlay prompt color: the valid brand primary, else stock amber
    pub prompt: String,
}

impl Palette {
    pub fn resolve(brand: &Brand, primary: &str, secondary: &str, accent: &str) -> Self {
        let tint = is_valid_hex(&brand.primary_color)
            .then(|| with_alpha(&brand.primary_color, "30"));
        Self {
            primary: resolve(&brand.primary_color, primary),
            secondary: resolve(&brand.secondary_color, secondary),
            accent: resolve(&brand.accent_color, accent),
            tint,
            prompt: resolve(&brand.primary_color, "#ffcc00"),
        }
    }
}
