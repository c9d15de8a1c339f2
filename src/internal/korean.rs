//! Transcoder for EUC-KR (KS X 1001) with the CP949 extended-hangul region
//! and Hangul Jamo composition.

use crate::internal::lookup_table::{CompressedTable, ReverseTable};
use crate::internal::tables;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;

// The 2350 precomposed hangul sit at cells 1410 to 3759 of KS X 1001,
// stored as one sorted dense block.
const HANGUL_BLOCK_START: u16 = 1410;

/// Decodes EUC-KR, including the CP949 extensions and eight-byte Hangul
/// Jamo sequences.
///
pub(crate) fn euc_kr_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table = CompressedTable::new(tables::KS_X_1001);
  let hangul = table.block(HANGUL_BLOCK_START).unwrap_or(&[]);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let mut code = 0xFFFDu32;
    let x = text[pos] as u16;
    pos += 1;

    if x <= 0x7F {
      code = x as u32;
    } else if (0x81..0xFF).contains(&x) && pos < text.len() {
      let y = text[pos] as u16;
      if x >= 0xA1 && (0xA1..0xFF).contains(&y) {
        code = table.get((x - 0xA1) * 94 + (y - 0xA1)) as u32;
        pos += 1;

        // look for hangul written as an eight-byte jamo sequence, which
        // starts with the 0xA4 0xD4 filler
        if x == 0xA4 && y == 0xD4 && text.len() - pos >= 6 {
          code = decode_jamo_sequence(text, &mut pos, hangul, out, code);
        }
      } else if (0x41..=0x5A).contains(&y)
        || (0x61..=0x7A).contains(&y)
        || (0x81..0xFF).contains(&y)
      {
        // possibly a CP949 extended hangul
        let a = x - 0x81;
        let mut b = y - 0x41;
        if b >= 26 {
          b -= 6;
          if b >= 52 {
            b -= 6;
          }
        }
        let a = if a < 32 { a * 178 + b } else { a * 84 + b + 3008 };
        if a < 8822 {
          code = table.get(a + 8836) as u32;
          pos += 1;
        }
      }
    }

    if code == 0xFFFD {
      utf8::append_bad_chars(&text[lastpos..pos], out, mode);
      errpos = errpos.or(Some(lastpos));
    } else {
      utf8::append_code_point(code, out);
    }
  }

  errpos.unwrap_or(pos)
}

/// Handles the six bytes that follow an 0xA4 0xD4 filler: a (leading
/// consonant, vowel, trailing consonant) triple of compatibility jamo.
/// Returns the final code point to emit, writing any preceding ones
/// straight to the output.
///
fn decode_jamo_sequence(
  text: &[u8],
  pos: &mut usize,
  hangul: &[u16],
  out: &mut Vec<u8>,
  filler_code: u32,
) -> u32 {
  // leading consonant code to jamo index, and the same for trailing
  static TABLE_L: [u8; 52] = [
    1, 2, 0, 3, 0, 0, 4, 5, 6, 0, 0, 0, 0, 0, 0, 0, 7, 8, 9, 0, 10, 11, 12,
    13, 14, 15, 16, 17, 18, 19, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 20,
  ];
  static TABLE_T: [u8; 52] = [
    2, 3, 4, 5, 6, 7, 8, 0, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 0, 19,
    20, 21, 22, 23, 0, 24, 25, 26, 27, 28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
  ];

  let i = *pos;
  if text[i] != 0xA4
    || text[i + 1] < 0xA1
    || text[i + 2] != 0xA4
    || text[i + 3] < 0xA1
    || text[i + 4] != 0xA4
    || text[i + 5] < 0xA1
  {
    return filler_code;
  }

  let y1 = text[i + 1] as u16;
  let y2 = text[i + 3] as u16;
  let y3 = text[i + 5] as u16;
  if !((0xA1..=0xD4).contains(&y1) && TABLE_L[(y1 - 0xA1) as usize] != 0)
    || !(0xBF..=0xD4).contains(&y2)
    || !((0xA1..=0xD4).contains(&y3) && TABLE_T[(y3 - 0xA1) as usize] != 0)
  {
    return filler_code;
  }

  *pos += 6;
  let l = (TABLE_L[(y1 - 0xA1) as usize] - 1) as u32;
  let v = (y2 - 0xBF) as u32;
  let t = (TABLE_T[(y3 - 0xA1) as usize] - 1) as u32;

  if l < 19 && v < 21 {
    // compose the precomposed syllable
    let code = 0xAC00 + (l * 21 + v) * 28 + t;
    if hangul.binary_search(&(code as u16)).is_ok() {
      // a syllable present in KS X 1001 must keep its compatibility-jamo
      // spelling so that it round-trips back to the same bytes
      utf8::append_code_point(0x3164, out);
      utf8::append_code_point(0x3090 + y1 as u32, out);
      utf8::append_code_point(0x3090 + y2 as u32, out);
      0x3090 + y3 as u32
    } else {
      code
    }
  } else if l < 19 || v < 21 || t > 0 {
    // decomposed hangul with fillers
    let code = if l < 19 { 0x1100 + l } else { 0x115F };
    utf8::append_code_point(code, out);
    let code = if v < 21 { 0x1161 + v } else { 0x1160 };
    if t > 0 {
      utf8::append_code_point(code, out);
      0x11A7 + t
    } else {
      code
    }
  } else {
    // every component is a filler; no syllable can be formed
    utf8::append_code_point(0x3164, out);
    utf8::append_code_point(0x3164, out);
    utf8::append_code_point(0x3164, out);
    0x3164
  }
}

/// Encodes UTF-8 as EUC-KR. Hangul syllables outside KS X 1001 are written
/// as eight-byte jamo sequences.
///
pub(crate) fn utf8_to_euc_kr(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = ReverseTable::new(tables::KS_X_1001_R);

  // jamo index to trail byte offset for the leading consonant
  static TABLE_L: [u8; 19] =
    [0, 1, 3, 6, 7, 8, 16, 17, 18, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29];
  // and for the trailing consonant
  static TABLE_T: [u8; 28] = [
    51, 0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 19, 20,
    21, 22, 23, 25, 26, 27, 28, 29,
  ];

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    } else {
      let t = table.get(code);
      if t < 8836 {
        out.push(0xA1 + (t / 94) as u8);
        out.push(0xA1 + (t % 94) as u8);
        continue;
      } else if (0xAC00..=0xD7A3).contains(&code) {
        // a syllable missing from KS X 1001: write the jamo sequence
        let z = code - 0xAC00;
        let t = z % 28;
        let z = z / 28;
        let v = z % 21;
        let l = z / 21;
        out.push(0xA4);
        out.push(0xD4);
        out.push(0xA4);
        out.push(0xA1 + TABLE_L[l as usize]);
        out.push(0xA4);
        out.push(0xBF + v as u8);
        out.push(0xA4);
        out.push(0xA1 + TABLE_T[t as usize]);
        continue;
      }
    }

    if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
  }

  errpos.unwrap_or(pos)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::internal::utf8::into_string;

  fn decode(text: &[u8]) -> (String, usize) {
    let mut out = Vec::new();
    let err = euc_kr_to_utf8(text, &mut out, BadCharMode::Replace);
    (into_string(out), err)
  }

  fn encode(text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let err = utf8_to_euc_kr(text.as_bytes(), &mut out);
    (out, err)
  }

  #[test]
  fn euc_kr_round_trip_test() {
    assert_eq!(
      decode(&[0xB1, 0xE8, 0xC8, 0xF1, 0xC1, 0xDF]),
      ("김희중".to_string(), 6)
    );
    assert_eq!(
      encode("김희중"),
      (vec![0xB1, 0xE8, 0xC8, 0xF1, 0xC1, 0xDF], 9)
    );
  }

  #[test]
  fn cp949_extension_test() {
    // U+B980 is absent from KS X 1001 but present in CP949
    assert_eq!(decode(&[0x90, 0x63]), ("\u{B980}".to_string(), 2));
  }

  #[test]
  fn jamo_composition_test() {
    // (leading kiyeok, vowel a, no trailing) composes to U+AC00, but that
    // syllable is in KS X 1001, so the compatibility spelling is kept
    let sequence = [0xA4, 0xD4, 0xA4, 0xA1, 0xA4, 0xBF, 0xA4, 0xD4];
    assert_eq!(
      decode(&sequence),
      ("\u{3164}\u{3131}\u{314F}\u{3164}".to_string(), 8)
    );

    // a syllable absent from KS X 1001 round-trips through its jamo
    // sequence
    let (encoded, err) = encode("\u{AC0B}");
    assert_eq!(err, 3);
    assert_eq!(encoded, [0xA4, 0xD4, 0xA4, 0xA1, 0xA4, 0xBF, 0xA4, 0xAC]);

    let (decoded, err) = decode(&encoded);
    assert_eq!(decoded, "\u{AC0B}");
    assert_eq!(err, 8);
  }

  #[test]
  fn jamo_filler_test() {
    // leading filler with a real vowel produces a decomposed vowel with
    // the U+115F leading filler
    let sequence = [0xA4, 0xD4, 0xA4, 0xD4, 0xA4, 0xBF, 0xA4, 0xD4];
    assert_eq!(decode(&sequence), ("\u{115F}\u{1161}".to_string(), 8));

    // all fillers cannot compose at all
    let sequence = [0xA4, 0xD4, 0xA4, 0xD4, 0xA4, 0xD4, 0xA4, 0xD4];
    assert_eq!(decode(&sequence), ("\u{3164}".repeat(4), 8));
  }

  #[test]
  fn truncated_sequence_test() {
    assert_eq!(decode(&[0x41, 0xB1]), ("A\u{FFFD}".to_string(), 1));
  }
}
