//! Glyph sources for the tooltip text
//!
//! A TrueType font rasterised with fontdue when one can be loaded, otherwise a
//! small built-in bitmap font.

use std::fmt;
use std::path::{Path, PathBuf};

/// Pixel size used for TrueType fonts
const FONT_SIZE: f32 = 15.0;

/// Scale applied to the 5x7 bitmap font
const BITMAP_SCALE: usize = 2;

/// Columns and rows of one bitmap glyph cell
const CELL_WIDTH: usize = 5;
const CELL_HEIGHT: usize = 7;

/// Monospace fonts found on common Linux distributions
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Bold.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Bold.ttf",
];

/// One rasterised glyph, positioned relative to the pen and the baseline
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    /// Horizontal pen advance
    pub advance: f32,
    /// Left edge of the bitmap relative to the pen
    pub xmin: i32,
    /// Bottom edge of the bitmap relative to the baseline (up is positive)
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, 0..=255
    pub coverage: Vec<u8>,
}

/// Where tooltip glyphs come from
pub enum GlyphSource {
    Truetype { font: fontdue::Font, path: PathBuf },
    Bitmap,
}

impl GlyphSource {
    /// Load `preferred` if given, else the first usable system font, else the
    /// built-in bitmap font. Never fails.
    pub fn load(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .into_iter()
            .map(Path::to_path_buf)
            .chain(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = Self::read_font(&path) {
                return Self::Truetype { font, path };
            }
        }

        Self::Bitmap
    }

    /// Whether the glyphs come from the font file at `path`
    pub fn is_loaded_from(&self, path: &Path) -> bool {
        matches!(self, Self::Truetype { path: loaded, .. } if loaded == path)
    }

    /// The built-in bitmap font
    pub fn builtin() -> Self {
        Self::Bitmap
    }

    fn read_font(path: &Path) -> Option<fontdue::Font> {
        let data = std::fs::read(path).ok()?;
        fontdue::Font::from_bytes(data, fontdue::FontSettings::default()).ok()
    }

    /// Distance from the top of the line to the baseline
    pub fn ascent(&self) -> f32 {
        match self {
            Self::Truetype { font, .. } => font
                .horizontal_line_metrics(FONT_SIZE)
                .map(|m| m.ascent)
                .unwrap_or(FONT_SIZE * 0.8),
            Self::Bitmap => (CELL_HEIGHT * BITMAP_SCALE) as f32,
        }
    }

    /// Distance from the baseline to the bottom of the line
    pub fn descent(&self) -> f32 {
        match self {
            Self::Truetype { font, .. } => font
                .horizontal_line_metrics(FONT_SIZE)
                .map(|m| -m.descent)
                .unwrap_or(FONT_SIZE * 0.2),
            Self::Bitmap => 0.0,
        }
    }

    /// Width of `text` when laid out on one line
    pub fn text_width(&self, text: &str) -> f32 {
        match self {
            Self::Truetype { font, .. } => text
                .chars()
                .map(|ch| font.metrics(ch, FONT_SIZE).advance_width)
                .sum(),
            Self::Bitmap => (text.chars().count() * (CELL_WIDTH + 1) * BITMAP_SCALE) as f32,
        }
    }

    /// Rasterise one character
    pub fn glyph(&self, ch: char) -> Glyph {
        match self {
            Self::Truetype { font, .. } => {
                let (metrics, coverage) = font.rasterize(ch, FONT_SIZE);
                Glyph {
                    advance: metrics.advance_width,
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            }
            Self::Bitmap => bitmap_glyph(ch),
        }
    }
}

impl fmt::Display for GlyphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truetype { path, .. } => write!(f, "{}", path.display()),
            Self::Bitmap => write!(f, "built-in bitmap font"),
        }
    }
}

fn bitmap_glyph(ch: char) -> Glyph {
    let rows = bitmap_rows(ch.to_ascii_uppercase());
    let width = CELL_WIDTH * BITMAP_SCALE;
    let height = CELL_HEIGHT * BITMAP_SCALE;
    let mut coverage = vec![0u8; width * height];

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..CELL_WIDTH {
            if bits & (0x10 >> col) == 0 {
                continue;
            }
            for dy in 0..BITMAP_SCALE {
                for dx in 0..BITMAP_SCALE {
                    let x = col * BITMAP_SCALE + dx;
                    let y = row * BITMAP_SCALE + dy;
                    coverage[y * width + x] = 255;
                }
            }
        }
    }

    Glyph {
        advance: ((CELL_WIDTH + 1) * BITMAP_SCALE) as f32,
        xmin: 0,
        ymin: 0,
        width,
        height,
        coverage,
    }
}

/// 5x7 cells, one byte per row, bit 4 is the leftmost column
fn bitmap_rows(ch: char) -> [u8; CELL_HEIGHT] {
    match ch {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        ' ' => [0x00; CELL_HEIGHT],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}
