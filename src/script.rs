/// Writing system a character belongs to, decided by code point block only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    /// Digits, punctuation, symbols, whitespace and anything unassigned here.
    Common,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    /// Devanagari through Sinhala.
    Indic,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Hangul,
    Ethiopic,
    Cherokee,
    Khmer,
    Mongolian,
    Kana,
    Bopomofo,
    Han,
    Yi,
    /// A letter from a block not listed above.
    Other,
}

impl Script {
    /// Latin and script-neutral characters can be folded to ASCII.
    pub fn is_foldable(self) -> bool {
        matches!(self, Script::Latin | Script::Common)
    }
}

pub fn script_of(c: char) -> Script {
    match c as u32 {
        0x41..=0x5A | 0x61..=0x7A => Script::Latin,
        0xAA | 0xBA => Script::Latin,
        0xD7 | 0xF7 => Script::Common,
        0xC0..=0x024F => Script::Latin,
        0x0250..=0x02AF | 0x1D00..=0x1DBF => Script::Latin,
        0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
        0x0400..=0x052F | 0x1C80..=0x1C8F | 0x2DE0..=0x2DFF | 0xA640..=0xA69F => Script::Cyrillic,
        0x0530..=0x058F | 0xFB13..=0xFB17 => Script::Armenian,
        0x0590..=0x05FF | 0xFB1D..=0xFB4F => Script::Hebrew,
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF => Script::Arabic,
        0xFB50..=0xFDFF | 0xFE70..=0xFEFF => Script::Arabic,
        0x0700..=0x074F => Script::Syriac,
        0x0780..=0x07BF => Script::Thaana,
        0x0900..=0x0DFF => Script::Indic,
        0x0E00..=0x0E7F => Script::Thai,
        0x0E80..=0x0EFF => Script::Lao,
        0x0F00..=0x0FFF => Script::Tibetan,
        0x1000..=0x109F => Script::Myanmar,
        0x10A0..=0x10FF | 0x2D00..=0x2D2F => Script::Georgian,
        0x1100..=0x11FF | 0x3130..=0x318F | 0xA960..=0xA97F => Script::Hangul,
        0xAC00..=0xD7FF | 0xFFA0..=0xFFDC => Script::Hangul,
        0x1200..=0x139F => Script::Ethiopic,
        0x13A0..=0x13FF => Script::Cherokee,
        0x1780..=0x17FF => Script::Khmer,
        0x1800..=0x18AF => Script::Mongolian,
        0x1E00..=0x1EFF | 0x2C60..=0x2C7F | 0xA720..=0xA7FF => Script::Latin,
        0xFB00..=0xFB06 | 0xFF21..=0xFF3A | 0xFF41..=0xFF5A => Script::Latin,
        0x3040..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => Script::Kana,
        0x3100..=0x312F | 0x31A0..=0x31BF => Script::Bopomofo,
        0x2E80..=0x2FDF | 0x3005..=0x3007 | 0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Han,
        0xF900..=0xFAFF | 0x20000..=0x3134F => Script::Han,
        0xA000..=0xA4CF => Script::Yi,
        // Letter-like forms that compatibility decomposition turns into ASCII.
        0x02B0..=0x02FF | 0x2070..=0x209F => Script::Latin,
        0x2150..=0x218F | 0x2460..=0x24FF | 0x1D400..=0x1D6A3 => Script::Latin,
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F => Script::Common,
        _ if c.is_alphabetic() => Script::Other,
        _ => Script::Common,
    }
}

/// First character that cannot be folded to ASCII, with its script.
pub fn first_non_latin(name: &str) -> Option<(char, Script)> {
    name.chars()
        .map(|c| (c, script_of(c)))
        .find(|(_, script)| !script.is_foldable())
}

pub fn has_non_latin(name: &str) -> bool {
    first_non_latin(name).is_some()
}
