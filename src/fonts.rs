//! Base-14 font metrics and registration.
//!
//! The report uses the standard Helvetica family only, so fonts are
//! registered as Type1 base fonts with WinAnsi encoding and measured through
//! per-byte width tables. Text measurement is the only font capability the
//! layout and centering code depends on.

use pdf_writer::{Name, Pdf, Ref};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontVariant {
    Regular,
    Bold,
}

impl FontVariant {
    fn base_font(self) -> &'static [u8] {
        match self {
            FontVariant::Regular => b"Helvetica",
            FontVariant::Bold => b"Helvetica-Bold",
        }
    }
}

pub struct FontEntry {
    pub pdf_name: String,
    pub font_ref: Ref,
    widths_1000: Vec<f32>,
}

impl FontEntry {
    /// Width of a string at the given size, in points. Characters outside
    /// WinAnsi are dropped, matching what `to_winansi_bytes` will draw.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .filter(|&&b| b >= 32)
            .map(|&b| self.widths_1000[(b - 32) as usize] * font_size / 1000.0)
            .sum()
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            128 => 556.0,                         // euro sign
            _ => 556.0,
        })
        .collect()
}

/// Same scheme for the bold cut, which runs slightly wider.
fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 | 74 => 278.0,
            77 => 889.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 | 119 => 889.0,
            97..=122 => 611.0,
            128 => 556.0,
            _ => 611.0,
        })
        .collect()
}

/// Register a base-14 font into the PDF and return its metrics entry.
pub fn register_font(
    pdf: &mut Pdf,
    variant: FontVariant,
    pdf_name: String,
    font_ref: Ref,
) -> FontEntry {
    pdf.type1_font(font_ref)
        .base_font(Name(variant.base_font()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let widths_1000 = match variant {
        FontVariant::Regular => helvetica_widths(),
        FontVariant::Bold => helvetica_bold_widths(),
    };

    FontEntry {
        pdf_name,
        font_ref,
        widths_1000,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str
/// encoding. Unmappable characters are dropped.
pub fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),             // euro sign
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x2122 => Some(0x99),
            _ => None,
        })
        .collect()
}
