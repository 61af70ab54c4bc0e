//! System font lookup and text measurement.
//!
//! Text shapes auto-grow their height from measured content, so the engine
//! needs real glyph metrics. Fonts are resolved once through the system
//! font database and cached for the process lifetime. When no matching face
//! exists (headless CI, stripped containers) measurement falls back to a
//! width heuristic so editing still behaves sanely.

use std::collections::HashMap;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use mapmark_core::geometry::Size;
use rusttype::{Font, Scale};

use crate::shapes::{FontStyle, FontWeight, TextWrap};

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All family names known to the system database, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut set = std::collections::HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Resolves a font face, caching hits for the process lifetime.
pub fn font_for(family: &str, weight: FontWeight, style: FontStyle) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let bold = weight == FontWeight::Bold;
    let italic = style == FontStyle::Italic;
    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(entry) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *entry;
    }

    let loaded = load_font_from_system(family, bold, italic)
        .map(|font| &*Box::leak(Box::new(font)));
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Advance width of one character at the given size, with a heuristic
/// fallback when no font face is available.
fn char_advance(font: Option<&Font<'_>>, c: char, font_size: f64) -> f64 {
    match font {
        Some(font) => {
            let scaled = font.glyph(c).scaled(Scale::uniform(font_size as f32));
            f64::from(scaled.h_metrics().advance_width)
        }
        None => font_size * 0.6,
    }
}

/// Measures a wrapped text block: maximum line width and total height.
///
/// Explicit newlines always break. `max_width <= 0` disables wrapping, as
/// does [`TextWrap::None`]. Height is `lines * font_size * line_height`,
/// matching how the renderer lays text out.
pub fn measure_text_block(
    text: &str,
    family: &str,
    weight: FontWeight,
    style: FontStyle,
    font_size: f64,
    line_height: f64,
    max_width: f64,
    wrap: TextWrap,
) -> Size {
    let font = font_for(family, weight, style);
    let line_step = font_size * line_height;
    let wrapping = wrap != TextWrap::None && max_width > 0.0;

    let mut line_count = 0usize;
    let mut widest: f64 = 0.0;

    for paragraph in text.split('\n') {
        if !wrapping {
            line_count += 1;
            let width: f64 = paragraph
                .chars()
                .map(|c| char_advance(font, c, font_size))
                .sum();
            widest = widest.max(width);
            continue;
        }

        match wrap {
            TextWrap::Char | TextWrap::None => {
                let mut current = 0.0;
                let mut lines_here = 1usize;
                for c in paragraph.chars() {
                    let advance = char_advance(font, c, font_size);
                    if current > 0.0 && current + advance > max_width {
                        widest = widest.max(current);
                        current = 0.0;
                        lines_here += 1;
                    }
                    current += advance;
                }
                widest = widest.max(current);
                line_count += lines_here;
            }
            TextWrap::Word => {
                let space = char_advance(font, ' ', font_size);
                let mut current = 0.0;
                let mut lines_here = 1usize;
                for word in paragraph.split_whitespace() {
                    let word_width: f64 =
                        word.chars().map(|c| char_advance(font, c, font_size)).sum();
                    let needed = if current > 0.0 {
                        current + space + word_width
                    } else {
                        word_width
                    };
                    if current > 0.0 && needed > max_width {
                        widest = widest.max(current);
                        current = word_width;
                        lines_here += 1;
                    } else {
                        current = needed;
                    }
                }
                widest = widest.max(current);
                line_count += lines_here;
            }
        }
    }

    if text.is_empty() {
        line_count = 1;
    }

    Size::new(widest, line_count as f64 * line_step)
}
