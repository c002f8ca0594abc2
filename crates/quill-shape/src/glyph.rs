//! Glyph records and the direction/script vocabulary shared with the
//! native library.

use std::fmt;
use std::ops::Range;

use crate::hb_sys::{self, hb_direction_t, hb_script_t, hb_tag};

/// One positioned glyph produced by shaping.
///
/// Advances and offsets are in font units unless a nonzero ppem was set
/// on the shaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Glyph index in the font.
    pub id: u16,
    /// Byte offset of the first character of this glyph's cluster.
    pub cluster: u32,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Byte range of the source text covered by this glyph's cluster.
    pub text: Range<usize>,
}

/// Text direction for a shaping call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Let the library guess from the buffer contents.
    #[default]
    Invalid,
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl Direction {
    pub(crate) fn to_raw(self) -> hb_direction_t {
        match self {
            Direction::Invalid => hb_sys::HB_DIRECTION_INVALID,
            Direction::LeftToRight => hb_sys::HB_DIRECTION_LTR,
            Direction::RightToLeft => hb_sys::HB_DIRECTION_RTL,
            Direction::TopToBottom => hb_sys::HB_DIRECTION_TTB,
            Direction::BottomToTop => hb_sys::HB_DIRECTION_BTT,
        }
    }

    pub(crate) fn from_raw(raw: hb_direction_t) -> Direction {
        match raw {
            hb_sys::HB_DIRECTION_LTR => Direction::LeftToRight,
            hb_sys::HB_DIRECTION_RTL => Direction::RightToLeft,
            hb_sys::HB_DIRECTION_TTB => Direction::TopToBottom,
            hb_sys::HB_DIRECTION_BTT => Direction::BottomToTop,
            _ => Direction::Invalid,
        }
    }

    /// Whether glyph clusters run backward through the text for this
    /// direction.
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::RightToLeft | Direction::BottomToTop)
    }
}

/// Unicode script, stored as its ISO 15924 tag the way the native
/// library represents it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Script(pub(crate) hb_script_t);

impl Script {
    pub const INVALID: Script = Script(hb_sys::HB_TAG_NONE);
    pub const COMMON: Script = Script(hb_tag(b"Zyyy"));
    pub const INHERITED: Script = Script(hb_tag(b"Zinh"));
    pub const UNKNOWN: Script = Script(hb_tag(b"Zzzz"));

    pub const ARABIC: Script = Script(hb_tag(b"Arab"));
    pub const ARMENIAN: Script = Script(hb_tag(b"Armn"));
    pub const BENGALI: Script = Script(hb_tag(b"Beng"));
    pub const BOPOMOFO: Script = Script(hb_tag(b"Bopo"));
    pub const BRAILLE: Script = Script(hb_tag(b"Brai"));
    pub const CHEROKEE: Script = Script(hb_tag(b"Cher"));
    pub const CYRILLIC: Script = Script(hb_tag(b"Cyrl"));
    pub const DEVANAGARI: Script = Script(hb_tag(b"Deva"));
    pub const ETHIOPIC: Script = Script(hb_tag(b"Ethi"));
    pub const GEORGIAN: Script = Script(hb_tag(b"Geor"));
    pub const GREEK: Script = Script(hb_tag(b"Grek"));
    pub const GUJARATI: Script = Script(hb_tag(b"Gujr"));
    pub const GURMUKHI: Script = Script(hb_tag(b"Guru"));
    pub const HAN: Script = Script(hb_tag(b"Hani"));
    pub const HANGUL: Script = Script(hb_tag(b"Hang"));
    pub const HEBREW: Script = Script(hb_tag(b"Hebr"));
    pub const HIRAGANA: Script = Script(hb_tag(b"Hira"));
    pub const KANNADA: Script = Script(hb_tag(b"Knda"));
    pub const KATAKANA: Script = Script(hb_tag(b"Kana"));
    pub const KHMER: Script = Script(hb_tag(b"Khmr"));
    pub const LAO: Script = Script(hb_tag(b"Laoo"));
    pub const LATIN: Script = Script(hb_tag(b"Latn"));
    pub const MALAYALAM: Script = Script(hb_tag(b"Mlym"));
    pub const MONGOLIAN: Script = Script(hb_tag(b"Mong"));
    pub const MYANMAR: Script = Script(hb_tag(b"Mymr"));
    pub const ORIYA: Script = Script(hb_tag(b"Orya"));
    pub const SINHALA: Script = Script(hb_tag(b"Sinh"));
    pub const SYRIAC: Script = Script(hb_tag(b"Syrc"));
    pub const TAMIL: Script = Script(hb_tag(b"Taml"));
    pub const TELUGU: Script = Script(hb_tag(b"Telu"));
    pub const THAANA: Script = Script(hb_tag(b"Thaa"));
    pub const THAI: Script = Script(hb_tag(b"Thai"));
    pub const TIBETAN: Script = Script(hb_tag(b"Tibt"));

    /// Script for an arbitrary ISO 15924 tag, e.g. `*b"Runr"`.
    pub const fn from_iso15924(tag: [u8; 4]) -> Script {
        Script(hb_tag(&tag))
    }

    /// The four tag bytes, e.g. `Latn`.
    pub fn tag(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub(crate) fn to_raw(self) -> hb_script_t {
        self.0
    }

    pub(crate) fn from_raw(raw: hb_script_t) -> Script {
        Script(raw)
    }
}

impl Default for Script {
    fn default() -> Script {
        Script::INVALID
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == hb_sys::HB_TAG_NONE {
            return write!(f, "Script(invalid)");
        }
        let tag = self.tag();
        match std::str::from_utf8(&tag) {
            Ok(tag) => write!(f, "Script({})", tag),
            Err(_) => write!(f, "Script({:#010x})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hb_sys;

    #[test]
    fn direction_round_trips_through_raw_values() {
        for direction in [
            Direction::Invalid,
            Direction::LeftToRight,
            Direction::RightToLeft,
            Direction::TopToBottom,
            Direction::BottomToTop,
        ] {
            assert_eq!(Direction::from_raw(direction.to_raw()), direction);
        }
    }

    #[test]
    fn unknown_raw_direction_maps_to_invalid() {
        assert_eq!(Direction::from_raw(1), Direction::Invalid);
        assert_eq!(Direction::from_raw(99), Direction::Invalid);
    }

    #[test]
    fn backward_directions() {
        assert!(Direction::RightToLeft.is_backward());
        assert!(Direction::BottomToTop.is_backward());
        assert!(!Direction::LeftToRight.is_backward());
        assert!(!Direction::Invalid.is_backward());
    }

    #[test]
    fn script_tags_round_trip() {
        assert_eq!(Script::LATIN.tag(), *b"Latn");
        assert_eq!(Script::from_iso15924(*b"Latn"), Script::LATIN);
        assert_eq!(Script::LATIN.to_raw(), hb_sys::hb_tag(b"Latn"));
        assert_eq!(Script::from_raw(hb_sys::hb_tag(b"Grek")), Script::GREEK);
    }

    #[test]
    fn script_debug_prints_the_tag() {
        assert_eq!(format!("{:?}", Script::LATIN), "Script(Latn)");
        assert_eq!(format!("{:?}", Script::INVALID), "Script(invalid)");
    }
}
