//! Transcoders for the simplified Chinese encodings: GB 2312, GBK and
//! GB 18030.
//!
//! All three share one two-byte cell numbering. Cells 0..8836 are the
//! 94x94 GB 2312 grid, 8836..14916 are GBK region 3 (lead below 0xA1) and
//! 14916..23940 are GBK regions 4 and 5 (trail below 0xA1). GB 18030 adds
//! four-byte sequences, whose first 32*1260 codes extend the BMP at cell
//! 23940 and whose codes from 150*1260 map the supplementary planes
//! directly.

use crate::internal::lookup_table::{CompressedTable, ReverseTable, RCHAR};
use crate::internal::tables;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;

/// Appends the two-byte form of `cell`.
///
fn append_two_byte(cell: u16, out: &mut Vec<u8>) {
  let (x, mut y) = if cell < 8836 {
    (0xA1 + (cell / 94) as u8, 0xA1 + (cell % 94) as u8)
  } else if cell < 8836 + 6080 {
    let t = cell - 8836;
    (0x81 + (t / 190) as u8, 0x40 + (t % 190) as u8)
  } else {
    let t = cell - (8836 + 6080);
    (0xA1 + (t / 96) as u8, 0x40 + (t % 96) as u8)
  };
  if cell >= 8836 && y >= 0x7F {
    y += 1;
  }
  out.push(x);
  out.push(y);
}

/// Reads the two-byte cell number for lead `a` and trail `b`.
///
fn two_byte_cell(a: u16, mut b: u16) -> u16 {
  if a < 0xA1 {
    // GBK region 3
    if b > 0x7F {
      b -= 1;
    }
    (a - 0x81) * 190 + (b - 0x40) + 8836
  } else if b < 0xA1 {
    // GBK regions 4 and 5
    if b > 0x7F {
      b -= 1;
    }
    (a - 0xA1) * 96 + (b - 0x40) + 8836 + 6080
  } else {
    // GBK regions 1 and 2 (GB 2312)
    (a - 0xA1) * 94 + (b - 0xA1)
  }
}

/// Decodes GB 2312, where both bytes of a pair sit in 0xA1 to 0xFE.
///
pub(crate) fn gb2312_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table = CompressedTable::new(tables::GB_2312);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let a = text[pos] as u16;
    pos += 1;

    if a & 0x80 == 0 {
      out.push(a as u8);
      continue;
    }

    let mut code = 0xFFFDu32;
    if (0xA1..0xFF).contains(&a) && pos < text.len() {
      let b = text[pos] as u16;
      if (0xA1..0xFF).contains(&b) {
        code = table.get((a - 0xA1) * 94 + (b - 0xA1)) as u32;
        pos += 1;
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

/// Encodes UTF-8 as GB 2312.
///
pub(crate) fn utf8_to_gb2312(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = ReverseTable::new(tables::GB_18030_R);
  let table2 = ReverseTable::new(tables::GB_2312_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    } else {
      let mut t = table.get(code);
      if t >= 8836 {
        // compatibility mappings that differ from GB 18030
        t = table2.get(code);
      }
      if t < 8836 {
        out.push(0xA1 + (t / 94) as u8);
        out.push(0xA1 + (t % 94) as u8);
        continue;
      }
    }

    if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
  }

  errpos.unwrap_or(pos)
}

/// Decodes GBK, with a lead in 0x81 to 0xFE and a trail in 0x40 to 0xFE
/// other than 0x7F.
///
pub(crate) fn gbk_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table = CompressedTable::new(tables::GBK);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let a = text[pos] as u16;
    pos += 1;

    if a & 0x80 == 0 {
      out.push(a as u8);
      continue;
    }

    let mut code = 0xFFFDu32;
    if a > 0x80 && a < 0xFF && pos < text.len() {
      let b = text[pos] as u16;
      if (0x40..0xFF).contains(&b) && b != 0x7F {
        code = table.get(two_byte_cell(a, b)) as u32;
        pos += 1;
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

/// Encodes UTF-8 as GBK.
///
pub(crate) fn utf8_to_gbk(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = ReverseTable::new(tables::GB_18030_R);
  let table2 = ReverseTable::new(tables::GBK_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    } else {
      let mut t = table.get(code) as u32;
      if t >= RCHAR as u32 {
        // compatibility mappings beyond the BMP
        t = match code {
          0x20087 => 23767,
          0x20089 => 23768,
          0x200CC => 23769,
          0x215D7 => 23794,
          0x2298F => 23804,
          0x241FE => 23830,
          _ => 23940,
        };
      }
      if t > 23940 {
        // a GB 18030 code too large for GBK; try the compatibility
        // mappings specific to GBK
        t = table2.get(code) as u32;
      }
      if t < 23940 {
        append_two_byte(t as u16, out);
        continue;
      }
    }

    if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
  }

  errpos.unwrap_or(pos)
}

/// Decodes GB 18030, which extends GBK with four-byte sequences whose
/// second and fourth bytes are decimal digits.
///
pub(crate) fn gb18030_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table = CompressedTable::new(tables::GB_18030);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let a = text[pos] as u16;
    pos += 1;

    if a & 0x80 == 0 {
      out.push(a as u8);
      continue;
    }

    if pos == text.len() {
      errpos = errpos.or(Some(lastpos));
      break;
    }

    let mut code = 0xFFFDu32;
    if a > 0x80 && a < 0xFF {
      let b = text[pos] as u16;
      if (0x30..0xFF).contains(&b) && b != 0x7F {
        pos += 1;
        if b >= 0x40 {
          code = table.get(two_byte_cell(a, b)) as u32;
        } else if pos + 1 < text.len() {
          let c = text[pos] as u16;
          let d = text[pos + 1] as u16;
          if c > 0x80 && c < 0xFF && (0x30..=0x39).contains(&d) {
            pos += 2;
            let a4 = (a - 0x81) * 10 + (b - 0x30);
            let b4 = (c - 0x81) * 10 + (d - 0x30);
            if a4 < 32 {
              // unicode within the BMP
              code = table.get(a4 * 1260 + b4 + 23940) as u32;
            } else if a4 >= 150 {
              // unicode beyond the BMP
              let g = (a4 - 150) as u32 * 1260 + b4 as u32;
              if g <= 0xF_FFFF {
                code = g + 0x1_0000;
              }
            }
          }
        }
      }
    }

    // the four-byte sequence 0x84 0x31 0xA4 0x37 is the legal encoding
    // of U+FFFD itself
    if code == 0xFFFD
      && !(pos - lastpos >= 4 && text[lastpos..lastpos + 4] == [0x84, 0x31, 0xA4, 0x37])
    {
      utf8::append_bad_chars(&text[lastpos..pos], out, mode);
      errpos = errpos.or(Some(lastpos));
    } else {
      utf8::append_code_point(code, out);
    }
  }

  errpos.unwrap_or(pos)
}

/// Encodes UTF-8 as GB 18030. Every code point other than 0xFFFE and
/// 0xFFFF has an encoding.
///
pub(crate) fn utf8_to_gb18030(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = ReverseTable::new(tables::GB_18030_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    }

    let t;
    if code <= 0xFFFD {
      let cell = table.get(code) as u32;
      if cell < 23940 {
        append_two_byte(cell as u16, out);
        continue;
      }
      t = cell - 23940;
    } else if code >= 0x1_0000 {
      t = code - 0x1_0000 + 150 * 1260;
    } else {
      // 0xFFFE and 0xFFFF have no encoding
      if !utils::last_chance_conversion(text, lastpos, out) {
        errpos = errpos.or(Some(lastpos));
      }
      continue;
    }

    let a = t / 1260;
    let b = t % 1260;
    out.push(0x81 + (a / 10) as u8);
    out.push(0x30 + (a % 10) as u8);
    out.push(0x81 + (b / 10) as u8);
    out.push(0x30 + (b % 10) as u8);
  }

  errpos.unwrap_or(pos)
}
