//! Watermark font selection and text rasterisation.
//!
//! A scalable TrueType/OpenType font is looked up once per run: the configured
//! path first, then `FONT_SEARCH_ORDER`. When nothing loads, the built-in 8x8
//! bitmap glyph set is used so a run never fails for lack of a font.
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use tracing::{debug, info};

use crate::core::params::WatermarkSpec;
use crate::error::{Error, Result};

/// Candidate font files, tried in order after any explicitly configured path.
pub const FONT_SEARCH_ORDER: &[&str] = &[
    "arial.ttf",
    "Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

const BUILTIN_GLYPH_SIZE: i32 = 8;

pub enum WatermarkFont {
    Scalable { font: FontVec, source: PathBuf },
    Builtin,
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatermarkFont::Scalable { source, .. } => {
                f.debug_struct("Scalable").field("source", source).finish()
            }
            WatermarkFont::Builtin => write!(f, "Builtin"),
        }
    }
}

/// Coverage samples of rendered text, relative to the text origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRaster {
    /// `(x, y, coverage)` with coverage in `(0, 1]`
    pub pixels: Vec<(i32, i32, f32)>,
}

impl TextRaster {
    /// Ink bounding box as `(min_x, min_y, max_x, max_y)`, max exclusive.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut iter = self.pixels.iter();
        let &(x, y, _) = iter.next()?;
        let init = (x, y, x + 1, y + 1);
        Some(iter.fold(init, |(x0, y0, x1, y1), &(x, y, _)| {
            (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1))
        }))
    }

    pub fn size(&self) -> (i32, i32) {
        self.bounds()
            .map_or((0, 0), |(x0, y0, x1, y1)| (x1 - x0, y1 - y0))
    }
}

impl WatermarkFont {
    pub fn builtin() -> Self {
        WatermarkFont::Builtin
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| Error::Font(format!("{}: {}", path.display(), e)))?;
        Ok(WatermarkFont::Scalable {
            font,
            source: path.to_path_buf(),
        })
    }

    /// Resolves the font for a watermark: configured path, then the search
    /// order, then the built-in glyphs.
    pub fn load(spec: &WatermarkSpec) -> Self {
        let candidates = spec
            .font_path
            .iter()
            .cloned()
            .chain(FONT_SEARCH_ORDER.iter().map(PathBuf::from));

        for candidate in candidates {
            match Self::from_file(&candidate) {
                Ok(font) => {
                    info!("Watermark font: {}", candidate.display());
                    return font;
                }
                Err(e) => debug!("Font candidate {:?} rejected: {}", candidate, e),
            }
        }

        info!("No scalable font found, using built-in bitmap glyphs");
        WatermarkFont::Builtin
    }

    pub fn rasterize(&self, text: &str, size: f32) -> TextRaster {
        match self {
            WatermarkFont::Scalable { font, .. } => rasterize_scalable(font, text, size),
            WatermarkFont::Builtin => rasterize_builtin(text),
        }
    }
}

/// `PxScale` is the ascent-to-descent height, so an em of `size` pixels is
/// scaled by `height / units_per_em`. Fonts without em metrics use `size` as
/// the height.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

fn rasterize_scalable(font: &FontVec, text: &str, size: f32) -> TextRaster {
    let scale = em_scale(font, size);
    let scaled = font.as_scaled(scale);

    let mut pixels = Vec::new();
    let mut caret = point(0.0, scaled.ascent());
    let mut previous: Option<GlyphId> = None;

    for c in text.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|x, y, coverage| {
                if coverage > 0.0 {
                    pixels.push((ox + x as i32, oy + y as i32, coverage.min(1.0)));
                }
            });
        }
    }

    TextRaster { pixels }
}

fn rasterize_builtin(text: &str) -> TextRaster {
    let mut pixels = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(c) else {
            continue;
        };
        let x0 = i as i32 * BUILTIN_GLYPH_SIZE;
        for (y, &bits) in rows.iter().enumerate() {
            // bit 0 is the leftmost column
            for x in 0..8u8 {
                if (bits >> x) & 1 == 1 {
                    pixels.push((x0 + x as i32, y as i32, 1.0));
                }
            }
        }
    }
    TextRaster { pixels }
}
