//! Transcoders for the Japanese encodings: Shift-JIS in its CP932 form,
//! EUC-JP, and the JIS X GL/GR segment codec used by ISO 2022 text.

use crate::internal::lookup_table::{
  CompressedTable, JisReverseTable, ReverseTable,
};
use crate::internal::tables;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;
use crate::CharacterSet;

/// Decodes Shift-JIS (windows-31j, the CP932 variant).
///
pub(crate) fn sjis_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  // the JIS X 0208 table embeds the EUDC and CP932 extension rows
  let table = CompressedTable::new(tables::JIS_X_0208);

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
    if (0xA1..=0xDF).contains(&x) {
      code = x as u32 + 0xFEC0; // half-width katakana
    } else if x != 0x80 && x != 0xA0 && x <= 0xFC && pos < text.len() {
      let y = text[pos] as u16;
      if (0x40..=0xFC).contains(&y) && y != 0x7F {
        let (mut a, b) = if y < 0x9F {
          (0, y - if y < 0x7F { 0x40 } else { 0x41 })
        } else {
          (1, y - 0x9F)
        };

        if x <= 0x9F {
          a += (x - 0x81) * 2;
        } else {
          a += (x - 0xC1) * 2;
        }

        code = table.get(a * 94 + b) as u32;
        pos += 1;

        if x == 0x81 {
          // substitutions for the codes where CP932 differs from JIS
          match y {
            0x5C => code = 0x2015, // HORIZONTAL BAR
            0x5F => code = 0xFF3C, // FULLWIDTH REVERSE SOLIDUS
            0x60 => code = 0xFF5E, // FULLWIDTH TILDE
            0x61 => code = 0x2225, // PARALLEL TO
            0x7C => code = 0xFF0D, // FULLWIDTH HYPHEN-MINUS
            0x91 => code = 0xFFE0, // FULLWIDTH CENT SIGN
            0x92 => code = 0xFFE1, // FULLWIDTH POUND SIGN
            0xCA => code = 0xFFE2, // FULLWIDTH NOT SIGN
            _ => (),
          }
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

/// Encodes UTF-8 as Shift-JIS (windows-31j).
///
pub(crate) fn utf8_to_sjis(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = JisReverseTable::new(tables::JIS_X_R);
  let table2 = ReverseTable::new(tables::SJIS_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      // windows-31j uses ASCII here, not JIS X 0201 romaji
      out.push(code as u8);
      continue;
    } else if (0xFF61..=0xFF9F).contains(&code) {
      // half-width katakana packs into 0xA1 to 0xDF
      out.push((code - 0xFEC0) as u8);
      continue;
    } else {
      // below 8836 the reverse table gives JIS X 0208, below 17672 it
      // gives JIS X 0212 which Shift-JIS cannot carry, so retry those
      // against the CP932 compatibility table
      let mut t = table.get(code);
      if t >= 8836 {
        t = table2.get(code);
      }
      if t < 11280 {
        let a = t / 94;
        let mut y = (t % 94) as u8;
        if a & 1 == 0 {
          y += 0x40;
          if y >= 0x7F {
            y += 1;
          }
        } else {
          y += 0x9F;
        }
        let mut x = 0x81 + (a / 2) as u8;
        if x >= 0xA0 {
          x += 64;
        }
        out.push(x);
        out.push(y);
        continue;
      }
    }

    if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
  }

  errpos.unwrap_or(pos)
}

/// Decodes EUC-JP, the UNIX encoding of JIS X 0201, 0208 and 0212.
///
pub(crate) fn euc_jp_to_utf8(
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let jis_x_0208 = CompressedTable::new(tables::JIS_X_0208);
  let jis_x_0212 = CompressedTable::new(tables::JIS_X_0212);

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
    if (0x80..0xFF).contains(&x) && pos < text.len() {
      let y = text[pos] as u16;
      if (0xA1..0xFF).contains(&y) {
        if (0xA1..0xFF).contains(&x) {
          // JIS X 0208
          code = jis_x_0208.get((x - 0xA1) * 94 + (y - 0xA1)) as u32;
          pos += 1;
        } else if x == 0x8F {
          // JIS X 0212, a three-byte sequence
          if pos + 1 >= text.len() {
            break;
          }
          let z = text[pos + 1] as u16;
          if (0xA1..0xFF).contains(&z) {
            code = jis_x_0212.get((y - 0xA1) * 94 + (z - 0xA1)) as u32;
            pos += 2;
          }
        } else if x == 0x8E && y <= 0xDF {
          code = y as u32 + 0xFEC0; // half-width katakana
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

/// Encodes UTF-8 as EUC-JP.
///
pub(crate) fn utf8_to_euc_jp(text: &[u8], out: &mut Vec<u8>) -> usize {
  let table = JisReverseTable::new(tables::JIS_X_R);

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let code = utf8::next_code_point(text, &mut pos);
    if code < 0x80 {
      out.push(code as u8);
      continue;
    } else if (0xFF61..=0xFF9F).contains(&code) {
      // half-width katakana takes the 0x8E prefix byte
      out.push(0x8E);
      out.push((code - 0xFEC0) as u8);
      continue;
    } else {
      let mut t = table.get(code);
      if t < 2 * 8836 {
        if t >= 8836 {
          // JIS X 0212 takes the 0x8F prefix byte
          out.push(0x8F);
          t -= 8836;
        }
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

/// Decodes one ISO 2022 segment where G0 holds `cs_gl` (a 94-character or
/// 94x94 set) and G1 holds `cs_gr`. Used for the character sets of
/// iso-2022-jp-2 plus the Korean and Chinese G0 designations.
///
pub(crate) fn jis_x_to_utf8(
  cs_gl: CharacterSet,
  cs_gr: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let table =
    CompressedTable::new(tables::forward(cs_gl).unwrap_or(tables::ISO_IR_6));
  let multibyte = matches!(
    cs_gl,
    CharacterSet::ISO_2022_IR_87
      | CharacterSet::ISO_2022_IR_159
      | CharacterSet::ISO_2022_IR_149
      | CharacterSet::ISO_2022_IR_58
  );

  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let mut code = 0xFFFDu32;
    let mut a = text[pos] as u16;
    pos += 1;

    if (0x21..0x7F).contains(&a) {
      let mut good = true;
      if multibyte {
        if pos < text.len() && (0x21..0x7F).contains(&(text[pos] as u16)) {
          let b = text[pos] as u16;
          pos += 1;
          a = (a - 0x21) * 94 + (b - 0x21);
        } else {
          good = false;
        }
      } else if cs_gl == CharacterSet::ISO_2022_IR_13 {
        // shift half-width katakana into GL
        a += 0x80;
      }
      if good {
        code = table.get(a) as u32;
      }
    } else if a <= 0x7F {
      // control codes, space, delete
      code = a as u32;
    } else if cs_gr == CharacterSet::ISO_IR_13 && (0xA1..=0xDF).contains(&a) {
      // half-width katakana in GR
      code = a as u32 + 0xFEC0;
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

/// Encodes UTF-8 as iso-2022-jp style text for whichever combination of
/// JIS X 0201, JIS X 0208 and JIS X 0212 the key carries.
///
pub(crate) fn utf8_to_jis_x(
  key: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
) -> usize {
  let table = JisReverseTable::new(tables::JIS_X_R);
  let table2 = ReverseTable::new(tables::SJIS_R);

  let has_jis_x_0201 =
    key.key() & CharacterSet::ISO_IR_13.key() == CharacterSet::ISO_IR_13.key();
  let has_jis_x_0208 = key.key() & CharacterSet::ISO_2022_IR_87.key()
    == CharacterSet::ISO_2022_IR_87.key();
  let has_jis_x_0212 = key.key() & CharacterSet::ISO_2022_IR_159.key()
    == CharacterSet::ISO_2022_IR_159.key();

  let esc_base: &[u8] = if has_jis_x_0201 { b"\x1B(J" } else { b"\x1B(B" };
  let esc_0208: &[u8] = b"\x1B$B";
  let esc_0212: &[u8] = b"\x1B$(D";

  let mut state = 0;
  let mut errpos = None;
  let mut pos = 0;
  while pos < text.len() {
    let lastpos = pos;
    let mut code = utf8::next_code_point(text, &mut pos);

    if has_jis_x_0201 {
      if (0xFF61..=0xFF9F).contains(&code) {
        out.push((code - 0xFEC0) as u8);
        continue;
      }

      // JIS X 0201 lacks backslash and tilde, whose code positions hold
      // yen and macron instead
      if code == '\\' as u32 && has_jis_x_0208 {
        code = 0xFF3C; // FULLWIDTH REVERSE SOLIDUS
      } else if code == '~' as u32 && has_jis_x_0212 {
        code = 0xFF5E; // FULLWIDTH TILDE
      } else if code == 0xA5 && !has_jis_x_0208 {
        code = '\\' as u32; // YEN SIGN
      } else if code == 0x203E && !has_jis_x_0212 {
        code = '~' as u32; // MACRON
      }
    }

    if code < 0x80 {
      if state != 0 {
        out.extend_from_slice(esc_base);
        state = 0;
      }
      out.push(code as u8);
      continue;
    }

    if has_jis_x_0208 || has_jis_x_0212 {
      let mut t = table.get(code);
      if (8836..2 * 8836).contains(&t) && has_jis_x_0212 {
        t -= 8836;
        if state != 2 {
          out.extend_from_slice(esc_0212);
          state = 2;
        }
      } else if has_jis_x_0208 {
        if t >= 8836
          && ((0xFF61..=0xFF9F).contains(&code)
            || code == 0xFF5E
            || code == 0x5861
            || code == 0x9830)
        {
          // JIS X 0208 compatibility mappings
          t = table2.get(code);
        }
        if t < 8836 && state != 1 {
          out.extend_from_slice(esc_0208);
          state = 1;
        }
      }
      if t < 8836 {
        out.push(0x21 + (t / 94) as u8);
        out.push(0x21 + (t % 94) as u8);
        continue;
      }
    }

    // conversion failed; drop the escape again if the fallback emitted
    // nothing at all
    let lastsize = out.len();
    out.extend_from_slice(esc_base);
    if !utils::last_chance_conversion(text, lastpos, out) {
      errpos = errpos.or(Some(lastpos));
    }
    if out.len() == lastsize + 3 {
      out.truncate(lastsize);
    } else {
      state = 0;
    }
  }

  if state != 0 {
    out.extend_from_slice(esc_base);
  }

  errpos.unwrap_or(pos)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::internal::utf8::into_string;

  fn decode_sjis(text: &[u8]) -> (String, usize) {
    let mut out = Vec::new();
    let err = sjis_to_utf8(text, &mut out, BadCharMode::Replace);
    (into_string(out), err)
  }

  fn decode_euc_jp(text: &[u8]) -> (String, usize) {
    let mut out = Vec::new();
    let err = euc_jp_to_utf8(text, &mut out, BadCharMode::Replace);
    (into_string(out), err)
  }

  #[test]
  fn sjis_decode_test() {
    assert_eq!(
      decode_sjis(&[0x8A, 0xBF, 0x8E, 0x9A]),
      ("漢字".to_string(), 4)
    );
    // half-width katakana from the single-byte range
    assert_eq!(decode_sjis(&[0xC0, 0xDB, 0xB3]), ("ﾀﾛｳ".to_string(), 3));
    // CP932 substitutions for the 0x81 lead
    assert_eq!(decode_sjis(&[0x81, 0x5C]), ("\u{2015}".to_string(), 2));
    assert_eq!(decode_sjis(&[0x81, 0x60]), ("\u{FF5E}".to_string(), 2));
    // invalid trail byte
    assert_eq!(decode_sjis(&[0x81, 0x7F]), ("\u{FFFD}\u{007F}".to_string(), 0));
  }

  #[test]
  fn sjis_encode_test() {
    let mut out = Vec::new();
    let err = utf8_to_sjis("漢字".as_bytes(), &mut out);
    assert_eq!(out, [0x8A, 0xBF, 0x8E, 0x9A]);
    assert_eq!(err, 6);

    // half-width katakana packs to single bytes
    let mut out = Vec::new();
    utf8_to_sjis("ﾀﾛｳ".as_bytes(), &mut out);
    assert_eq!(out, [0xC0, 0xDB, 0xB3]);

    // ASCII stays ASCII
    let mut out = Vec::new();
    utf8_to_sjis(b"A\\~", &mut out);
    assert_eq!(out, b"A\\~");
  }

  #[test]
  fn euc_jp_round_trip_test() {
    let mut encoded = Vec::new();
    let err = utf8_to_euc_jp("a漢ｦ".as_bytes(), &mut encoded);
    assert_eq!(encoded, [0x61, 0xB4, 0xC1, 0x8E, 0xA6]);
    assert_eq!(err, "a漢ｦ".len());

    assert_eq!(decode_euc_jp(&encoded), ("a漢ｦ".to_string(), 5));
  }

  #[test]
  fn euc_jp_jis_x_0212_test() {
    // U+82F7 is in JIS X 0212 but not JIS X 0208
    let mut encoded = Vec::new();
    utf8_to_euc_jp("苷".as_bytes(), &mut encoded);
    assert_eq!(encoded, [0x8F, 0xD7, 0xDA]);

    assert_eq!(decode_euc_jp(&encoded), ("苷".to_string(), 3));
  }

  #[test]
  fn jis_x_gl_segment_test() {
    let mut out = Vec::new();
    let err = jis_x_to_utf8(
      CharacterSet::ISO_2022_IR_87,
      CharacterSet::UNKNOWN,
      &[0x24, 0x2C, 0x3B, 0x33],
      &mut out,
      BadCharMode::Replace,
    );
    assert_eq!(into_string(out), "が山");
    assert_eq!(err, 4);

    // a 94-character set leaves controls and space alone
    let mut out = Vec::new();
    let err = jis_x_to_utf8(
      CharacterSet::ISO_IR_13,
      CharacterSet::ISO_IR_13,
      &[0x41, 0x20, 0xB6, 0x5C],
      &mut out,
      BadCharMode::Replace,
    );
    assert_eq!(into_string(out), "A ｶ¥");
    assert_eq!(err, 4);
  }

  #[test]
  fn utf8_to_jis_x_test() {
    // JIS X 0208 only: kanji wrapped in escape sequences
    let mut out = Vec::new();
    let err =
      utf8_to_jis_x(CharacterSet::ISO_2022_IR_87, "AB山".as_bytes(), &mut out);
    assert_eq!(out, b"AB\x1B$B;3\x1B(B");
    assert_eq!(err, 5);

    // with JIS X 0201, backslash becomes the fullwidth form
    let mut out = Vec::new();
    let key = CharacterSet::from_key(
      CharacterSet::ISO_2022_IR_13.key() | CharacterSet::ISO_2022_IR_87.key(),
    );
    utf8_to_jis_x(key, "a\\ｱ".as_bytes(), &mut out);
    assert_eq!(out, b"a\x1B$B!@\xB1\x1B(J");

    // without JIS X 0208, yen encodes into the backslash position
    let mut out = Vec::new();
    utf8_to_jis_x(CharacterSet::ISO_2022_IR_13, "¥".as_bytes(), &mut out);
    assert_eq!(out, b"\\");
  }
}
