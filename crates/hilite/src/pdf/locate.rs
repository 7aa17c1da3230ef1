//! Content-stream interpreter that maps words to page coordinates.
//!
//! `lopdf` extracts text but does not report where it sits on the page, so
//! highlighting needs its own pass over the page content stream. This module
//! walks the text-showing operators, tracks the text cursor, and records one
//! [`Glyph`] per shown byte. [`find_word`] then matches a word against the
//! glyph run and returns the bounding rectangle of each occurrence.
//!
//! The interpreter covers the operators simple text-producing tools emit
//! (`BT`/`ET`, `Tf`, `Td`, `TD`, `TL`, `Tm`, `T*`, `Tj`, `'`, `"`, `TJ`).
//! Bytes are read as Latin-1, which is exact for the standard encodings of
//! the base-14 fonts and a close approximation elsewhere.

use std::collections::HashMap;

use hilite_core::engine::Rect;
use lopdf::content::Content;
use lopdf::{Dictionary, Document as PdfFile, Object, ObjectId};

/// Fallback advance width, in 1/1000 em, for fonts without a `Widths` array.
const DEFAULT_WIDTH: f64 = 500.0;

/// A single positioned character from a page content stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    /// Left edge, in page units.
    pub x: f64,
    /// Baseline height, in page units.
    pub y: f64,
    /// Horizontal advance, in page units.
    pub width: f64,
    /// Font size active when the glyph was shown.
    pub size: f64,
}

/// Per-font advance widths from the font dictionary.
struct FontWidths {
    first_char: i64,
    widths: Vec<f64>,
}

impl FontWidths {
    fn width_of(&self, byte: u8) -> f64 {
        let index = i64::from(byte) - self.first_char;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.widths.get(i).copied())
            .unwrap_or(DEFAULT_WIDTH)
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a PdfFile, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Walk the page's `Parent` chain until a `Resources` dictionary turns up.
fn page_resources(doc: &PdfFile, page_id: ObjectId) -> Option<&Dictionary> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    loop {
        if let Ok(resources) = dict.get(b"Resources") {
            return resolve(doc, resources).as_dict().ok();
        }
        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
}

fn page_fonts(doc: &PdfFile, page_id: ObjectId) -> HashMap<Vec<u8>, FontWidths> {
    let mut fonts = HashMap::new();
    let Some(resources) = page_resources(doc, page_id) else {
        return fonts;
    };
    let Some(font_dict) = resources
        .get(b"Font")
        .ok()
        .and_then(|entry| resolve(doc, entry).as_dict().ok())
    else {
        return fonts;
    };
    for (name, value) in font_dict.iter() {
        let Ok(font) = resolve(doc, value).as_dict() else {
            continue;
        };
        let first_char = font
            .get(b"FirstChar")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_i64().ok())
            .unwrap_or(0);
        let widths = font
            .get(b"Widths")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_array().ok())
            .map(|array| {
                array
                    .iter()
                    .filter_map(|obj| number(resolve(doc, obj)))
                    .collect()
            })
            .unwrap_or_default();
        fonts.insert(name.clone(), FontWidths { first_char, widths });
    }
    fonts
}

fn show_text(
    bytes: &[u8],
    cursor: &mut (f64, f64),
    size: f64,
    h_scale: f64,
    font: Option<&FontWidths>,
    glyphs: &mut Vec<Glyph>,
) {
    for &byte in bytes {
        let advance = font.map_or(DEFAULT_WIDTH, |f| f.width_of(byte)) / 1000.0 * size * h_scale;
        let ch = char::from(byte);
        if !ch.is_control() {
            glyphs.push(Glyph {
                ch,
                x: cursor.0,
                y: cursor.1,
                width: advance,
                size,
            });
        }
        cursor.0 += advance;
    }
}

/// Interpret the page content stream and return its glyphs in show order.
pub fn page_glyphs(doc: &PdfFile, page_id: ObjectId) -> Result<Vec<Glyph>, lopdf::Error> {
    let fonts = page_fonts(doc, page_id);
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut glyphs = Vec::new();
    let mut size = 0.0_f64;
    let mut leading = 0.0_f64;
    let mut h_scale = 1.0_f64;
    let mut line = (0.0_f64, 0.0_f64);
    let mut cursor = (0.0_f64, 0.0_f64);
    let mut font: Option<&FontWidths> = None;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                line = (0.0, 0.0);
                cursor = line;
                h_scale = 1.0;
            }
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    font = fonts.get(name);
                }
                if let Some(sz) = op.operands.get(1).and_then(number) {
                    size = sz;
                }
            }
            "TL" => {
                if let Some(l) = op.operands.first().and_then(number) {
                    leading = l;
                }
            }
            "Td" | "TD" => {
                let tx = op.operands.first().and_then(number).unwrap_or(0.0);
                let ty = op.operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    leading = -ty;
                }
                line = (line.0 + tx, line.1 + ty);
                cursor = line;
            }
            "Tm" => {
                let m: Vec<f64> = op.operands.iter().filter_map(number).collect();
                if m.len() == 6 {
                    h_scale = m[0];
                    line = (m[4], m[5]);
                    cursor = line;
                }
            }
            "T*" => {
                line = (line.0, line.1 - leading);
                cursor = line;
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    show_text(bytes, &mut cursor, size, h_scale, font, &mut glyphs);
                }
            }
            "'" => {
                line = (line.0, line.1 - leading);
                cursor = line;
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    show_text(bytes, &mut cursor, size, h_scale, font, &mut glyphs);
                }
            }
            "\"" => {
                line = (line.0, line.1 - leading);
                cursor = line;
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    show_text(bytes, &mut cursor, size, h_scale, font, &mut glyphs);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                show_text(bytes, &mut cursor, size, h_scale, font, &mut glyphs);
                            }
                            other => {
                                if let Some(adjust) = number(other) {
                                    cursor.0 -= adjust / 1000.0 * size * h_scale;
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(glyphs)
}

/// Case-insensitive search over a glyph run.
///
/// Matches must sit on a single baseline; a word broken across lines is not
/// reported. Matches do not overlap.
pub fn find_word(glyphs: &[Glyph], word: &str) -> Vec<Rect> {
    let needle: Vec<char> = word.to_lowercase().chars().collect();
    if needle.is_empty() || glyphs.len() < needle.len() {
        return Vec::new();
    }
    let haystack: Vec<char> = glyphs
        .iter()
        .map(|g| g.ch.to_lowercase().next().unwrap_or(g.ch))
        .collect();

    let mut rects = Vec::new();
    let mut i = 0;
    while i + needle.len() <= glyphs.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            let run = &glyphs[i..i + needle.len()];
            let baseline = run[0].y;
            if run.iter().all(|g| (g.y - baseline).abs() < 0.5) {
                let last = &run[run.len() - 1];
                rects.push(Rect {
                    x0: run[0].x,
                    // approximate descender/ascender box around the baseline
                    y0: baseline - 0.2 * run[0].size,
                    x1: last.x + last.width,
                    y1: baseline + 0.8 * run[0].size,
                });
                i += needle.len();
                continue;
            }
        }
        i += 1;
    }
    rects
}
