//! Mapping fonts to the standard PDF fonts.
//!
//! Text is always written with one of the 14 standard fonts that every PDF reader
//! has to provide, so no font data is ever embedded. A [`FontMapper`] decides which
//! of them to use for a given [`Font`]. Fonts that the mapper doesn't know fall
//! back to Courier.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::object::dict::{Dictionary, Value};

/// A font as requested by the drawing code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    family: String,
    bold: bool,
    italic: bool,
}

impl Font {
    /// Create a new font descriptor.
    pub fn new(family: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            family: family.into(),
            bold,
            italic,
        }
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether the font is bold.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Whether the font is italic.
    pub fn italic(&self) -> bool {
        self.italic
    }
}

/// One of the 14 standard fonts.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// The PostScript name of the font.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    fn is_symbolic(&self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    pub(crate) fn to_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::new()
            .with("Type", Value::name("Font"))
            .with("Subtype", Value::name("Type1"))
            .with("BaseFont", Value::name(self.base_font()));

        // Symbolic fonts use their built-in encoding.
        if !self.is_symbolic() {
            dict.insert("Encoding", Value::name("WinAnsiEncoding"));
        }

        dict
    }
}

/// Maps fonts to standard fonts.
pub trait FontMapper {
    /// Return the standard font to use for `font`, or `None` if the
    /// font is unknown.
    fn map_to_base_font(&self, font: &Font) -> Option<StandardFont>;
}

type Variants = [StandardFont; 4];

const HELVETICA: Variants = [
    StandardFont::Helvetica,
    StandardFont::HelveticaBold,
    StandardFont::HelveticaOblique,
    StandardFont::HelveticaBoldOblique,
];

const COURIER: Variants = [
    StandardFont::Courier,
    StandardFont::CourierBold,
    StandardFont::CourierOblique,
    StandardFont::CourierBoldOblique,
];

const TIMES: Variants = [
    StandardFont::TimesRoman,
    StandardFont::TimesBold,
    StandardFont::TimesItalic,
    StandardFont::TimesBoldItalic,
];

static DEFAULT_FAMILIES: Lazy<HashMap<&'static str, Variants>> = Lazy::new(|| {
    HashMap::from([
        ("Dialog", HELVETICA),
        ("DialogInput", HELVETICA),
        ("Arial", HELVETICA),
        ("SansSerif", HELVETICA),
        ("Courier", COURIER),
        ("Courier_New", COURIER),
        ("Monospaced", COURIER),
        ("Serif", TIMES),
        ("Palatino", TIMES),
        ("Tahoma", TIMES),
        ("Times_New_Roman", TIMES),
    ])
});

/// The default font mapper, covering the logical font families of common
/// 2D toolkits and a handful of widespread system fonts.
///
/// Additional families can be registered with [`DefaultFontMapper::with_family`].
#[derive(Debug, Clone, Default)]
pub struct DefaultFontMapper {
    extra: HashMap<String, Variants>,
}

impl DefaultFontMapper {
    /// Create a new mapper with the default families.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an additional family. The variants are regular, bold, italic
    /// and bold italic, in that order.
    #[must_use]
    pub fn with_family(mut self, family: &str, variants: [StandardFont; 4]) -> Self {
        self.extra.insert(normalize_family(family), variants);
        self
    }
}

impl FontMapper for DefaultFontMapper {
    fn map_to_base_font(&self, font: &Font) -> Option<StandardFont> {
        let family = normalize_family(font.family());
        let variants = self
            .extra
            .get(&family)
            .or_else(|| DEFAULT_FAMILIES.get(family.as_str()))?;

        let index = match (font.bold, font.italic) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        };

        Some(variants[index])
    }
}

// "Times New Roman" and "Times_New_Roman" name the same family.
fn normalize_family(family: &str) -> String {
    family.trim().replace(' ', "_")
}

/// Encode text for a font with `/WinAnsiEncoding`, one byte per glyph.
/// Characters that the encoding doesn't cover become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}
