//! Transcoder for Big5 with the ETEN extensions.

use crate::internal::lookup_table::{CompressedTable, ReverseTable, RCHAR};
use crate::internal::tables;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;

// Big5 cells whose mapping lies outside the BMP, kept out of the 16-bit
// tables and matched directly.
const SUPPLEMENTARY_CELLS: [(u16, u32); 3] =
  [(11205, 0x200CC), (11207, 0x2008A), (11213, 0x27607)];

/// Decodes Big5: a lead in 0x81 to 0xFE with a trail in 0x40 to 0x7E or
/// 0xA1 to 0xFE.
///
pub(crate) fn big5_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table = CompressedTable::new(tables::BIG5);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let x = text[pos] as u16;
    pos += 1;

    if x & 0x80 == 0 {
      out.push(x as u8);
      continue;
    }

    let mut code = 0xFFFDu32;
    if (0x81..=0xFE).contains(&x) && pos < text.len() {
      let y = text[pos] as u16;
      if (0x40..=0x7E).contains(&y) || (0xA1..=0xFE).contains(&y) {
        pos += 1;
        let offset = if y < 0x7F { 0x40 } else { 0x62 };
        let t = (x - 0x81) * 157 + (y - offset);
        code = match SUPPLEMENTARY_CELLS.iter().find(|(cell, _)| *cell == t) {
          Some(&(_, supplementary)) => supplementary,
          None => table.get(t) as u32,
        };
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

/// Encodes UTF-8 as Big5.
///
pub(crate) fn utf8_to_big5(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = ReverseTable::new(tables::BIG5_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    }

    let mut t = table.get(code);
    if t >= RCHAR {
      // the table is restricted to the BMP
      if let Some(&(cell, _)) =
        SUPPLEMENTARY_CELLS.iter().find(|(_, supplementary)| *supplementary == code)
      {
        t = cell;
      }
    }
    if t < 19782 {
      let mut y = 0x40 + (t % 157) as u8;
      if y >= 0x7F {
        y += 0x22;
      }
      out.push(0x81 + (t / 157) as u8);
      out.push(y);
    } else if !utils::last_chance_conversion(text, lastpos, out) {
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
    let err = big5_to_utf8(text, &mut out, BadCharMode::Replace);
    (into_string(out), err)
  }

  fn encode(text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let err = utf8_to_big5(text.as_bytes(), &mut out);
    (out, err)
  }

  #[test]
  fn big5_decode_test() {
    assert_eq!(decode(&[0xA4, 0xA4, 0xA4, 0xE5]), ("中文".to_string(), 4));
    // low trail range
    assert_eq!(decode(&[0xA4, 0x40]), ("一".to_string(), 2));
    // invalid trail
    assert_eq!(decode(&[0xA4, 0x80]), ("\u{FFFD}\u{FFFD}".to_string(), 0));
  }

  #[test]
  fn big5_encode_test() {
    assert_eq!(encode("中文"), (vec![0xA4, 0xA4, 0xA4, 0xE5], 6));
    assert_eq!(encode("一"), (vec![0xA4, 0x40], 3));
    // no-break space is not in Big5 and falls back to a plain space
    assert_eq!(encode("a\u{00A0}b"), (b"a b".to_vec(), 4));
  }

  #[test]
  fn supplementary_cells_round_trip_test() {
    for (cell, code) in SUPPLEMENTARY_CELLS {
      let x = 0x81 + (cell / 157) as u8;
      let r = cell % 157;
      let y = if r < 63 { 0x40 + r as u8 } else { 0x62 + r as u8 };

      let (decoded, err) = decode(&[x, y]);
      assert_eq!(decoded.chars().next().map(u32::from), Some(code));
      assert_eq!(err, 2);

      assert_eq!(encode(&decoded), (vec![x, y], 4));
    }
  }
}
