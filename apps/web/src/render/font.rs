//! TrueType font embedding for the PDF renderer.
//!
//! The font is embedded as a simple TrueType font with `WinAnsiEncoding`:
//! every drawn character is one byte, and the `Widths` array is taken from
//! the font's own horizontal metrics. Characters outside WinAnsi render as `?`.

use std::path::Path;

use ttf_parser::{name_id, Face};

use crate::render::RenderError;

pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;
const REPLACEMENT: u8 = b'?';

/// WinAnsi code points in 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Maps a character to its WinAnsiEncoding byte, if it has one.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    match u32::from(ch) {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(u32::from(ch)).ok(),
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, byte)| *byte),
    }
}

/// Inverse of [`win_ansi_byte`] for the printable range.
fn win_ansi_char(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(char::from(byte)),
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(_, b)| *b == byte)
            .map(|(c, _)| *c),
    }
}

/// Encodes a line for a `Tj` operator. Tabs become spaces; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ch => win_ansi_byte(ch).unwrap_or(REPLACEMENT),
        })
        .collect()
}

/// A font program plus the metrics the PDF font dictionaries need.
///
/// All metrics are in PDF glyph space (1/1000 em).
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    pub(crate) base_name: String,
    pub(crate) program: Vec<u8>,
    /// Advance widths for codes `FIRST_CHAR..=LAST_CHAR`.
    pub(crate) widths: Vec<i64>,
    pub(crate) ascent: i64,
    pub(crate) descent: i64,
    pub(crate) cap_height: i64,
    pub(crate) bbox: [i64; 4],
}

impl EmbeddedFont {
    /// Reads and parses the font at `path`.
    pub async fn load(path: &Path) -> Result<Self, RenderError> {
        let program = tokio::fs::read(path)
            .await
            .map_err(|source| RenderError::FontMissing {
                path: path.to_path_buf(),
                source,
            })?;
        let fallback_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("EmbeddedFont");
        Self::from_bytes(program, fallback_name)
    }

    /// Parses a TrueType program. `fallback_name` is used when the font has no PostScript name.
    pub fn from_bytes(program: Vec<u8>, fallback_name: &str) -> Result<Self, RenderError> {
        let face = Face::parse(&program, 0)?;
        let units_per_em = f64::from(face.units_per_em().max(1));
        let scale = |v: f64| (v * 1000.0 / units_per_em).round() as i64;

        let missing_width = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(|adv| scale(f64::from(adv)))
            .unwrap_or(0);

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                win_ansi_char(code)
                    .and_then(|ch| face.glyph_index(ch))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|adv| scale(f64::from(adv)))
                    .unwrap_or(missing_width)
            })
            .collect();

        let bbox = face.global_bounding_box();
        let ascent = scale(f64::from(face.ascender()));
        let base_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| pdf_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| pdf_name(fallback_name));

        Ok(Self {
            base_name,
            widths,
            ascent,
            descent: scale(f64::from(face.descender())),
            cap_height: face
                .capital_height()
                .map(|v| scale(f64::from(v)))
                .unwrap_or(ascent),
            bbox: [
                scale(f64::from(bbox.x_min)),
                scale(f64::from(bbox.y_min)),
                scale(f64::from(bbox.x_max)),
                scale(f64::from(bbox.y_max)),
            ],
            program,
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }
}

/// Keeps only characters that are safe in a PDF name without escaping.
fn pdf_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
