//! Transcoders for the single-byte character sets: ISO 646, JIS X 0201, the
//! ISO 8859 family, KOI8 and the Windows code pages.

use crate::internal::lookup_table::{CompressedTable, ReverseTable, RCHAR};
use crate::internal::tables;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;
use crate::CharacterSet;

/// Decodes a single-byte character set through its forward table. Character
/// sets without a table of their own fall back to the ASCII table.
///
pub(crate) fn single_byte_to_utf8(
  cs: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table =
    CompressedTable::new(tables::forward(cs).unwrap_or(tables::ISO_IR_6));

  let mut errpos = None;
  for (i, &byte) in text.iter().enumerate() {
    let code = table.get(byte as u16);
    if code == RCHAR {
      errpos = errpos.or(Some(i));
      utf8::append_bad_chars(&text[i..i + 1], out, mode);
    } else {
      utf8::append_code_point(code as u32, out);
    }
  }

  errpos.unwrap_or(text.len())
}

/// Encodes UTF-8 to a single-byte character set through its reverse table,
/// falling back to the last-chance substitutions for unmappable characters.
///
pub(crate) fn utf8_to_single_byte(
  cs: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
) -> usize {
  let table =
    ReverseTable::new(tables::reverse(cs).unwrap_or(tables::ISO_IR_6_R));

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    let t = table.get(code);
    if t < RCHAR {
      out.push(t as u8);
    } else if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
  }

  errpos.unwrap_or(text.len())
}

/// Decodes an ISO 8859 character set, allowing the Windows code page
/// extensions for codes 0x80 to 0x9F where strings are commonly mislabeled:
/// CP1252 for Latin-1, CP1254 for Latin-5 and CP874 for TIS-620.
///
pub(crate) fn iso_8859_to_utf8(
  cs: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  static WINCODES: [u16; 32] = [
    0x20AC, 0xFFFD, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6,
    0x2030, 0x0160, 0x2039, 0x0152, 0xFFFD, 0x017D, 0xFFFD, 0xFFFD, 0x2018,
    0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC, 0x2122, 0x0161,
    0x203A, 0x0153, 0xFFFD, 0x017E, 0x0178,
  ];

  // bitfield selecting which of the 32 codes apply for this key
  let wincodes_used: u32 = match cs {
    CharacterSet::ISO_IR_100 => 0xDFFE5FFD,
    CharacterSet::ISO_IR_148 => 0x9FFE1FFD,
    CharacterSet::ISO_IR_166 => 0x00FE0021,
    _ => 0,
  };

  let table =
    CompressedTable::new(tables::forward(cs).unwrap_or(tables::ISO_IR_6));

  let mut errpos = None;
  for (i, &byte) in text.iter().enumerate() {
    if byte <= 0x7F {
      out.push(byte);
      continue;
    }

    let mut code = table.get(byte as u16);
    if byte < 0xA0 {
      let bit = byte - 0x80;
      if (1u32 << bit) & wincodes_used != 0 {
        code = WINCODES[bit as usize];
      }
    }

    if code == RCHAR {
      errpos = errpos.or(Some(i));
      utf8::append_bad_chars(&text[i..i + 1], out, mode);
    } else {
      utf8::append_code_point(code as u32, out);
    }
  }

  errpos.unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode(cs: CharacterSet, text: &[u8]) -> (String, usize) {
    let mut out = Vec::new();
    let err = single_byte_to_utf8(cs, text, &mut out, BadCharMode::Replace);
    (utf8::into_string(out), err)
  }

  fn decode_8859(cs: CharacterSet, text: &[u8]) -> (String, usize) {
    let mut out = Vec::new();
    let err = iso_8859_to_utf8(cs, text, &mut out, BadCharMode::Replace);
    (utf8::into_string(out), err)
  }

  fn encode(cs: CharacterSet, text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let err = utf8_to_single_byte(cs, text.as_bytes(), &mut out);
    (out, err)
  }

  #[test]
  fn latin_decode_test() {
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_100, &[0x48, 0xE9, 0x6C, 0x6C, 0x6F]),
      ("Héllo".to_string(), 5)
    );
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_101, &[0x57, 0x61, 0xB3, 0xEA]),
      ("Wałę".to_string(), 4)
    );
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_144, &[0xBB, 0xEE, 0xDA]),
      ("Люк".to_string(), 3)
    );
  }

  #[test]
  fn windows_extension_decode_test() {
    // 0x80 is the euro sign under the CP1252 overlay for Latin-1
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_100, &[0x80]),
      ("€".to_string(), 1)
    );
    // 0x81 is not part of CP1252 and stays a C1 control
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_100, &[0x81]),
      ("\u{81}".to_string(), 1)
    );
    // the CP874 overlay for TIS-620 has the euro and the ellipsis
    assert_eq!(
      decode_8859(CharacterSet::ISO_IR_166, &[0x80, 0x85]),
      ("€…".to_string(), 2)
    );
  }

  #[test]
  fn jis_x_0201_decode_test() {
    // yen sign and macron replace backslash and tilde
    assert_eq!(
      decode(CharacterSet::ISO_IR_13, &[0x5C, 0x7E]),
      ("¥‾".to_string(), 2)
    );
    assert_eq!(
      decode(CharacterSet::ISO_IR_13, &[0xD4, 0xCF, 0xC0, 0xDE]),
      ("ﾔﾏﾀﾞ".to_string(), 4)
    );
    // 0x80 to 0xA0 are unassigned
    assert_eq!(
      decode(CharacterSet::ISO_IR_13, &[0x41, 0x80]),
      ("A\u{FFFD}".to_string(), 1)
    );
  }

  #[test]
  fn single_byte_encode_test() {
    assert_eq!(
      encode(CharacterSet::ISO_IR_100, "Héllo"),
      (vec![0x48, 0xE9, 0x6C, 0x6C, 0x6F], 6)
    );
    assert_eq!(
      encode(CharacterSet::ISO_IR_144, "Люк"),
      (vec![0xBB, 0xEE, 0xDA], 6)
    );
    // unmappable characters go through the last-chance substitutions
    assert_eq!(
      encode(CharacterSet::ISO_IR_100, "a\u{201C}b\u{201D}"),
      (b"a\"b\"".to_vec(), 8)
    );
    // and otherwise produce a question mark plus the error offset
    assert_eq!(encode(CharacterSet::ISO_IR_100, "aΩ"), (b"a?".to_vec(), 1));
  }

  #[test]
  fn unknown_key_falls_back_to_ascii_test() {
    assert_eq!(
      decode(CharacterSet::UNKNOWN, &[0x41, 0xE9]),
      ("A\u{FFFD}".to_string(), 1)
    );
  }
}
