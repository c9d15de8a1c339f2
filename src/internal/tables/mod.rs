//! The compressed mapping tables and their per-charset dispatch.
//!
//! The table files in this module are generated by `tools/make_tables.py`;
//! see [`crate::internal::lookup_table`] for the format.

mod japanese;
mod korean;
mod simplified_chinese;
mod single_byte;
mod traditional_chinese;

pub(crate) use japanese::{JIS_X_0208, JIS_X_0212, JIS_X_R, SJIS_R};
pub(crate) use korean::{KS_X_1001, KS_X_1001_R};
pub(crate) use simplified_chinese::{
  GBK, GBK_R, GB_18030, GB_18030_R, GB_2312, GB_2312_R,
};
pub(crate) use single_byte::*;
pub(crate) use traditional_chinese::{BIG5, BIG5_R};

use crate::CharacterSet;

/// Returns the forward table (legacy index to code point) for a character
/// set, or `None` when the charset has no table of its own.
///
pub(crate) fn forward(cs: CharacterSet) -> Option<&'static [u16]> {
  match cs {
    CharacterSet::ISO_IR_6 | CharacterSet::ISO_2022_IR_6 => Some(ISO_IR_6),
    CharacterSet::ISO_IR_13 | CharacterSet::ISO_2022_IR_13 => Some(ISO_IR_13),
    CharacterSet::ISO_IR_100 => Some(ISO_IR_100),
    CharacterSet::ISO_IR_101 => Some(ISO_IR_101),
    CharacterSet::ISO_IR_109 => Some(ISO_IR_109),
    CharacterSet::ISO_IR_110 => Some(ISO_IR_110),
    CharacterSet::ISO_IR_144 => Some(ISO_IR_144),
    CharacterSet::ISO_IR_127 => Some(ISO_IR_127),
    CharacterSet::ISO_IR_126 => Some(ISO_IR_126),
    CharacterSet::ISO_IR_138 => Some(ISO_IR_138),
    CharacterSet::ISO_IR_148 => Some(ISO_IR_148),
    CharacterSet::ISO_IR_166 => Some(ISO_IR_166),
    CharacterSet::X_LATIN6 => Some(LATIN6),
    CharacterSet::X_LATIN7 => Some(LATIN7),
    CharacterSet::X_LATIN8 => Some(LATIN8),
    CharacterSet::X_LATIN9 => Some(LATIN9),
    CharacterSet::X_LATIN10 => Some(LATIN10),
    CharacterSet::X_KOI8 => Some(KOI8),
    CharacterSet::X_CP874 => Some(CP874),
    CharacterSet::X_CP1250 => Some(CP1250),
    CharacterSet::X_CP1251 => Some(CP1251),
    CharacterSet::X_CP1252 => Some(CP1252),
    CharacterSet::X_CP1253 => Some(CP1253),
    CharacterSet::X_CP1254 => Some(CP1254),
    CharacterSet::X_CP1255 => Some(CP1255),
    CharacterSet::X_CP1256 => Some(CP1256),
    CharacterSet::X_CP1257 => Some(CP1257),
    CharacterSet::X_CP1258 => Some(CP1258),
    CharacterSet::ISO_2022_IR_87 | CharacterSet::X_SJIS => Some(JIS_X_0208),
    CharacterSet::ISO_2022_IR_159 => Some(JIS_X_0212),
    CharacterSet::ISO_2022_IR_149 | CharacterSet::X_EUCKR => Some(KS_X_1001),
    CharacterSet::ISO_2022_IR_58 | CharacterSet::X_GB2312 => Some(GB_2312),
    CharacterSet::GBK => Some(GBK),
    CharacterSet::GB18030 => Some(GB_18030),
    CharacterSet::X_BIG5 => Some(BIG5),
    _ => None,
  }
}

/// Returns the reverse table (code point to legacy index) for a character
/// set, or `None` when the charset has no table of its own.
///
pub(crate) fn reverse(cs: CharacterSet) -> Option<&'static [u16]> {
  match cs {
    CharacterSet::ISO_IR_6 | CharacterSet::ISO_2022_IR_6 => Some(ISO_IR_6_R),
    CharacterSet::ISO_IR_13 | CharacterSet::ISO_2022_IR_13 => {
      Some(ISO_IR_13_R)
    }
    CharacterSet::ISO_IR_100 => Some(ISO_IR_100_R),
    CharacterSet::ISO_IR_101 => Some(ISO_IR_101_R),
    CharacterSet::ISO_IR_109 => Some(ISO_IR_109_R),
    CharacterSet::ISO_IR_110 => Some(ISO_IR_110_R),
    CharacterSet::ISO_IR_144 => Some(ISO_IR_144_R),
    CharacterSet::ISO_IR_127 => Some(ISO_IR_127_R),
    CharacterSet::ISO_IR_126 => Some(ISO_IR_126_R),
    CharacterSet::ISO_IR_138 => Some(ISO_IR_138_R),
    CharacterSet::ISO_IR_148 => Some(ISO_IR_148_R),
    CharacterSet::ISO_IR_166 => Some(ISO_IR_166_R),
    CharacterSet::X_LATIN6 => Some(LATIN6_R),
    CharacterSet::X_LATIN7 => Some(LATIN7_R),
    CharacterSet::X_LATIN8 => Some(LATIN8_R),
    CharacterSet::X_LATIN9 => Some(LATIN9_R),
    CharacterSet::X_LATIN10 => Some(LATIN10_R),
    CharacterSet::X_KOI8 => Some(KOI8_R),
    CharacterSet::X_CP874 => Some(CP874_R),
    CharacterSet::X_CP1250 => Some(CP1250_R),
    CharacterSet::X_CP1251 => Some(CP1251_R),
    CharacterSet::X_CP1252 => Some(CP1252_R),
    CharacterSet::X_CP1253 => Some(CP1253_R),
    CharacterSet::X_CP1254 => Some(CP1254_R),
    CharacterSet::X_CP1255 => Some(CP1255_R),
    CharacterSet::X_CP1256 => Some(CP1256_R),
    CharacterSet::X_CP1257 => Some(CP1257_R),
    CharacterSet::X_CP1258 => Some(CP1258_R),
    CharacterSet::ISO_2022_IR_149 | CharacterSet::X_EUCKR => {
      Some(KS_X_1001_R)
    }
    CharacterSet::ISO_2022_IR_58 | CharacterSet::X_GB2312 => Some(GB_2312_R),
    CharacterSet::GBK => Some(GBK_R),
    CharacterSet::GB18030 => Some(GB_18030_R),
    CharacterSet::X_BIG5 => Some(BIG5_R),
    CharacterSet::X_SJIS => Some(SJIS_R),
    CharacterSet::X_EUCJP => Some(JIS_X_R),
    _ => None,
  }
}
