use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{Edges, Size};

/// sRGB RGBA, each channel 0.0–1.0.
pub type Color = [f32; 4];

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
pub const fn hex(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
pub const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Move each channel toward white by `amount` (0.0–1.0). Alpha is kept.
pub fn lighten(c: Color, amount: f32) -> Color {
    let t = amount.clamp(0.0, 1.0);
    [
        c[0] + (1.0 - c[0]) * t,
        c[1] + (1.0 - c[1]) * t,
        c[2] + (1.0 - c[2]) * t,
        c[3],
    ]
}

/// Move each channel toward black by `amount` (0.0–1.0). Alpha is kept.
pub fn darken(c: Color, amount: f32) -> Color {
    let t = 1.0 - amount.clamp(0.0, 1.0);
    [c[0] * t, c[1] * t, c[2] * t, c[3]]
}

/// Monospace font metrics used for all text measurement.
///
/// The toolkit never rasterizes glyphs itself; the surface does. Layout only
/// needs an extent per string, approximated as `chars * glyph_width` by one
/// line height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Advance per character in pixels.
    pub glyph_width: i32,
    /// Pixels above the baseline.
    pub ascent: i32,
    /// Pixels below the baseline.
    pub descent: i32,
}

impl FontMetrics {
    pub fn line_height(&self) -> i32 {
        self.ascent + self.descent
    }

    /// Single-line extent of `text`.
    pub fn measure(&self, text: &str) -> Size {
        Size::new(
            text.chars().count() as i32 * self.glyph_width,
            self.line_height(),
        )
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            glyph_width: 8,
            ascent: 12,
            descent: 4,
        }
    }
}

/// Visual style consulted by layout and draw.
///
/// One theme lives in the `Master`'s current-theme slot; a widget may carry
/// an override which then wins for that widget only (not its children).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // -- Color palette (sRGB RGBA) --
    pub background: Color,
    pub text: Color,
    pub button: Color,
    pub button_hover: Color,
    pub border: Color,
    /// Selection / focus accent.
    pub primary: Color,
    /// Hover accent for list rows.
    pub secondary: Color,

    /// Text metrics. `None` makes every text-bearing widget measure as zero
    /// and skip its text draw.
    pub font: Option<FontMetrics>,

    // -- Spacing defaults --
    /// Gap between container children in pixels.
    pub spacing: i32,
    /// Inner padding for buttons, entries, panels, tooltips.
    pub padding: Edges,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: hex(30, 30, 30),
            text: hex(220, 220, 220),
            button: hex(60, 60, 60),
            button_hover: hex(80, 80, 80),
            border: hex(100, 100, 100),
            primary: hex(0, 140, 255),
            secondary: hex(50, 50, 50),
            font: Some(FontMetrics::default()),
            spacing: DEFAULT_SPACING,
            padding: Edges {
                top: 2,
                right: 5,
                bottom: 2,
                left: 5,
            },
        }
    }
}

/// Container spacing used when no theme supplies one.
pub const DEFAULT_SPACING: i32 = 5;

impl Theme {
    /// Derive a palette from a base color, a text color and an accent.
    pub fn generate(base: Color, text: Color, complement: Color) -> Self {
        Self {
            background: base,
            text,
            button: lighten(base, 0.1),
            button_hover: lighten(base, 0.2),
            border: lighten(base, 0.3),
            primary: complement,
            secondary: lighten(base, 0.05),
            ..Self::default()
        }
    }

    /// Dark theme built around a single accent color.
    pub fn from_accent(accent: Color) -> Self {
        Self::generate(darken(accent, 0.85), hex(240, 240, 240), accent)
    }

    /// Text line height, or 0 without a font.
    pub fn line_height(&self) -> i32 {
        self.font.map_or(0, |f| f.line_height())
    }

    /// Extent of `text` in this theme's font, or zero without a font.
    pub fn measure(&self, text: &str) -> Size {
        self.font.map_or(Size::ZERO, |f| f.measure(text))
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Load a theme from a RON file. Missing fields take their default values.
pub fn load_theme(path: impl AsRef<Path>) -> Result<Theme, ThemeError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_theme(&content).map_err(|source| ThemeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a theme from RON text.
pub fn parse_theme(content: &str) -> Result<Theme, ron::error::SpannedError> {
    ron::from_str::<Theme>(content)
}

/// Load a theme from a RON file, falling back to the default on any failure.
pub fn load_theme_or_default(path: impl AsRef<Path>) -> Theme {
    match load_theme(path) {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("{e}, using default theme");
            Theme::default()
        }
    }
}
