//! The stateful ISO 2022 decoder and encoder.
//!
//! Escape sequences designate character sets to the G0 to G3 slots; this
//! module parses them, tracks the width of each designated set, cuts the
//! input at control bytes, and hands each segment to the right
//! single-charset converter. SI/SO shifting and locking shifts are not
//! supported; DICOM uses the 8-bit form where the high bit selects G1.

use crate::internal::japanese;
use crate::internal::korean;
use crate::internal::registry;
use crate::internal::simplified_chinese;
use crate::internal::utf8::{self, BadCharMode};
use crate::internal::utils;
use crate::CharacterSet;

// Decoder state bits. The low byte stores the key of a non-ISO-2022
// encoding selected by the caller.
pub(crate) const ALTERNATE_CS: u32 = 0x00FF;
pub(crate) const MULTIBYTE_G0: u32 = 0x0100;
pub(crate) const MULTIBYTE_G1: u32 = 0x0200;
pub(crate) const MULTIBYTE_G2: u32 = 0x0400;
pub(crate) const MULTIBYTE_G3: u32 = 0x0800;
pub(crate) const CHARSET96_G0: u32 = 0x1000;
pub(crate) const CHARSET96_G1: u32 = 0x2000;
pub(crate) const CHARSET96_G2: u32 = 0x4000;
pub(crate) const CHARSET96_G3: u32 = 0x8000;

/// The classification of one escape sequence.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum EscapeType {
  Acs,
  Czd,
  C1d,
  Gzd,
  G1d,
  G2d,
  G3d,
  Docs,
  Irr,
  Ss2,
  Ss3,
  Ls2,
  Ls3,
  Ls1r,
  Ls2r,
  Ls3r,
  Cmd,
  Other,
  Error,
}

/// Returns the length of the escape sequence that starts after an ESC
/// byte: an optional control-sequence introducer with parameter bytes,
/// then intermediate bytes, then one final byte. Returns zero when no
/// valid final byte is found.
///
pub(crate) fn escape_code_length(text: &[u8]) -> usize {
  let mut i = 0;
  if !text.is_empty() && text[0] == b'[' {
    i += 1;
    while i < text.len() && (0x30..=0x3F).contains(&text[i]) {
      i += 1;
    }
  }
  while i < text.len() && (0x20..=0x2F).contains(&text[i]) {
    i += 1;
  }
  if i < text.len() && (0x40..=0x7E).contains(&text[i]) {
    i + 1
  } else {
    0
  }
}

/// Classifies an escape sequence and updates the MULTIBYTE and CHARSET96
/// bits for the G slot it designates.
///
pub(crate) fn escape_type(code: &[u8], state: &mut u32) -> EscapeType {
  if code.len() == 1 {
    match code[0] {
      b'N' => EscapeType::Ss2,
      b'O' => EscapeType::Ss3,
      b'n' => EscapeType::Ls2,
      b'o' => EscapeType::Ls3,
      b'~' => EscapeType::Ls1r,
      b'}' => EscapeType::Ls2r,
      b'|' => EscapeType::Ls3r,
      b'd' => EscapeType::Cmd,
      _ => EscapeType::Other,
    }
  } else if code.len() == 2 {
    match code[0] {
      b' ' => EscapeType::Acs,
      b'!' => EscapeType::Czd,
      b'"' => EscapeType::C1d,
      b'%' => EscapeType::Docs,
      b'&' => EscapeType::Irr,
      b'\'' | b',' => EscapeType::Error,
      b'$' => {
        *state |= MULTIBYTE_G0;
        EscapeType::Gzd
      }
      b'(' => {
        *state &= !MULTIBYTE_G0;
        EscapeType::Gzd
      }
      b')' => {
        *state &= !(MULTIBYTE_G1 | CHARSET96_G1);
        EscapeType::G1d
      }
      b'*' => {
        *state &= !(MULTIBYTE_G2 | CHARSET96_G2);
        EscapeType::G2d
      }
      b'+' => {
        *state &= !(MULTIBYTE_G3 | CHARSET96_G3);
        EscapeType::G3d
      }
      b'-' => {
        *state &= !MULTIBYTE_G1;
        *state |= CHARSET96_G1;
        EscapeType::G1d
      }
      b'.' => {
        *state &= !MULTIBYTE_G2;
        *state |= CHARSET96_G2;
        EscapeType::G2d
      }
      b'/' => {
        *state &= !MULTIBYTE_G3;
        *state |= CHARSET96_G3;
        EscapeType::G3d
      }
      _ => EscapeType::Other,
    }
  } else if code.len() == 3 && code[0] == b'$' {
    match code[1] {
      b'(' => {
        *state |= MULTIBYTE_G0;
        EscapeType::Gzd
      }
      b')' => {
        *state |= MULTIBYTE_G1;
        *state &= !CHARSET96_G1;
        EscapeType::G1d
      }
      b'*' => {
        *state |= MULTIBYTE_G2;
        *state &= !CHARSET96_G2;
        EscapeType::G2d
      }
      b'+' => {
        *state |= MULTIBYTE_G3;
        *state &= !CHARSET96_G3;
        EscapeType::G3d
      }
      b'-' => {
        *state |= MULTIBYTE_G1 | CHARSET96_G1;
        EscapeType::G1d
      }
      b'.' => {
        *state |= MULTIBYTE_G2 | CHARSET96_G2;
        EscapeType::G2d
      }
      b'/' => {
        *state |= MULTIBYTE_G3 | CHARSET96_G3;
        EscapeType::G3d
      }
      _ => EscapeType::Error,
    }
  } else if code.len() == 3 && code[0] == b'%' && code[1] == b'/' {
    EscapeType::Docs
  } else if !code.is_empty() {
    match code[0] {
      b' ' | b'!' | b'"' | b'%' | b'&' | b'\'' | b'$' | b'(' | b')' | b'*'
      | b'+' | b',' | b'-' | b'.' | b'/' => EscapeType::Error,
      _ => EscapeType::Other,
    }
  } else {
    EscapeType::Error
  }
}

/// Finds the character set a designation escape refers to, by matching the
/// sequence against the registry's escape codes.
///
pub(crate) fn charset_from_escape_code(code: &[u8]) -> CharacterSet {
  for info in registry::CHARSETS {
    if info.escape_code.as_bytes().get(..code.len()) == Some(code) {
      return info.key;
    }
  }

  CharacterSet::UNKNOWN
}

/// Sets up the initial designations for a key. DICOM's ISO 2022 decoding
/// does not start from a blank slate: the G1 charset named by the key is
/// designated immediately, and for Japanese, ISO IR 13 puts katakana in G1
/// with romaji in G0. JIS X 0208 and 0212 stay undesignated until their
/// escape sequences arrive.
///
pub(crate) fn init_iso_2022(
  key: CharacterSet,
  charset_g: &mut [CharacterSet; 4],
) -> u32 {
  charset_g[0] = CharacterSet::ISO_2022_IR_6;
  charset_g[1] = CharacterSet::UNKNOWN;
  charset_g[2] = CharacterSet::UNKNOWN;
  charset_g[3] = CharacterSet::UNKNOWN;

  let mut state = 0;

  if key.key() <= CharacterSet::ISO_2022_MAX {
    let mut base = key.key() & CharacterSet::ISO_2022_BASE;

    if base >= CharacterSet::X_EUCKR.key() {
      // Korean and Chinese G1 designations are 94x94 charsets
      state |= MULTIBYTE_G1;
    } else if base >= CharacterSet::ISO_IR_100.key() {
      // the ISO 8859 sets cover 96 positions
      state |= CHARSET96_G1;
    }

    if base <= CharacterSet::ISO_2022_JP_BASE {
      base &= CharacterSet::ISO_IR_13.key();
      if base == CharacterSet::ISO_IR_13.key() {
        // katakana in G1 implies romaji in G0
        charset_g[0] = CharacterSet::ISO_IR_13;
      }
    }
    charset_g[1] = CharacterSet::from_key(base);
  } else {
    // a non-ISO-2022 encoding is in effect
    state = key.key() as u32;
  }

  state
}

/// Decodes pass-through for a segment whose G0 holds an unrecognized
/// multibyte charset: control bytes and space survive, all other bytes are
/// unconvertible.
///
fn unknown_to_utf8(text: &[u8], out: &mut Vec<u8>, mode: BadCharMode) -> usize {
  for (i, &byte) in text.iter().enumerate() {
    if (0x21..0x7F).contains(&byte) || byte > 0x7F {
      utf8::append_bad_chars(&text[i..i + 1], out, mode);
    } else {
      utf8::append_code_point(byte as u32, out);
    }
  }
  0
}

/// Decodes text that switches character sets with ISO 2022 escape
/// sequences.
///
pub(crate) fn iso_2022_to_utf8(
  key: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
  mode: BadCharMode,
) -> usize {
  let mut charset_g = [CharacterSet::UNKNOWN; 4];
  let mut state = init_iso_2022(key, &mut charset_g);

  let len = text.len();
  let mut errpos = len;
  let mut i = 0;
  while i < len {
    // scan to the next control byte: ESC, NL, VT, FF, CR, SO or SI
    let mut j = i;
    while j < len && text[j] != 0x1B && !(0x0A..=0x0F).contains(&text[j]) {
      j += 1;
    }

    if i < j {
      let segment = &text[i..j];
      let m = if state & ALTERNATE_CS != 0 {
        let cs = CharacterSet::from_key((state & ALTERNATE_CS) as u8);
        cs.any_to_utf8(segment, out, mode)
      } else if charset_g[0] == CharacterSet::ISO_2022_IR_6
        && charset_g[1] != CharacterSet::ISO_IR_13
      {
        // with G0 as ASCII the segment decodes as the G1 charset alone
        let cs = CharacterSet::from_key(
          charset_g[1].key() & CharacterSet::ISO_2022_BASE,
        );
        cs.any_to_utf8(segment, out, mode)
      } else if matches!(
        charset_g[0],
        CharacterSet::ISO_IR_13
          | CharacterSet::ISO_2022_IR_6
          | CharacterSet::ISO_2022_IR_13
          | CharacterSet::ISO_2022_IR_87
          | CharacterSet::ISO_2022_IR_159
          | CharacterSet::ISO_2022_IR_149
          | CharacterSet::ISO_2022_IR_58
      ) {
        // the G0 charsets of iso-2022-jp-2 plus Korean and Chinese
        japanese::jis_x_to_utf8(charset_g[0], charset_g[1], segment, out, mode)
      } else if state & MULTIBYTE_G0 != 0 {
        unknown_to_utf8(segment, out, mode)
      } else {
        // an unknown G0 is assumed to be an ASCII-compatible ISO 646 set
        utf8::ascii_to_utf8(segment, out, mode)
      };

      if m != j - i {
        utils::set_error_position(&mut errpos, i + m);
      }
    }

    // the control-byte run: SI/SO are rejected, CR-NL resets the state
    i = j;
    let mut prevchar = 0u8;
    while i < len && (0x0A..=0x0F).contains(&text[i]) {
      if text[i] == 0x0E || text[i] == 0x0F {
        utils::set_error_position(&mut errpos, i);
      } else if prevchar == b'\r' && text[i] == b'\n' {
        state = init_iso_2022(key, &mut charset_g);
      }
      prevchar = text[i];
      i += 1;
    }
    if j < i {
      out.extend_from_slice(&text[j..i]);
    }

    // the escape sequences
    while i < len && text[i] == 0x1B {
      let save_pos = i;
      i += 1;
      let mut escape_fail = false;
      let mut shift = 0usize;

      let escape_len = escape_code_length(&text[i..]);
      let escape_code = &text[i..i + escape_len];
      i += escape_len;

      if state & ALTERNATE_CS != 0 {
        // not ISO 2022 any more; escapes pass through
        out.push(0x1B);
        out.extend_from_slice(escape_code);
        break;
      }

      match escape_type(escape_code, &mut state) {
        EscapeType::Acs | EscapeType::Czd | EscapeType::C1d => {
          escape_fail = true;
        }
        EscapeType::Gzd => {
          charset_g[0] = charset_from_escape_code(escape_code);
          escape_fail = charset_g[0] == CharacterSet::UNKNOWN;
        }
        EscapeType::G1d => {
          charset_g[1] = charset_from_escape_code(escape_code);
          escape_fail = charset_g[1] == CharacterSet::UNKNOWN;
        }
        EscapeType::G2d => {
          charset_g[2] = charset_from_escape_code(escape_code);
          escape_fail = charset_g[2] == CharacterSet::UNKNOWN;
        }
        EscapeType::G3d => {
          charset_g[3] = charset_from_escape_code(escape_code);
          escape_fail = charset_g[3] == CharacterSet::UNKNOWN;
        }
        EscapeType::Docs | EscapeType::Cmd => {
          // switching the coding system is not supported
          escape_fail = true;
        }
        EscapeType::Irr => {
          // identify-revised-registration is valid when chained into the
          // next escape, e.g. ESC &@ ESC $B
          escape_fail =
            escape_code[1] != b'@' || i == len || text[i] != 0x1B;
        }
        EscapeType::Ss2 => {
          shift = 2;
          escape_fail = charset_g[2] == CharacterSet::UNKNOWN;
        }
        EscapeType::Ss3 => {
          shift = 3;
          escape_fail = charset_g[3] == CharacterSet::UNKNOWN;
        }
        EscapeType::Ls2
        | EscapeType::Ls3
        | EscapeType::Ls1r
        | EscapeType::Ls2r
        | EscapeType::Ls3r => {
          // locking shifts are not supported
          escape_fail = true;
        }
        EscapeType::Other => {
          out.push(0x1B);
          out.extend_from_slice(escape_code);
        }
        EscapeType::Error => {
          escape_fail = true;
        }
      }

      if !escape_fail && shift != 0 {
        // single-shift the next one or two bytes through G2 or G3
        escape_fail = true;
        if i < len {
          let multibyte = state & (MULTIBYTE_G0 << shift) != 0;
          let charset96 = state & (CHARSET96_G0 << shift) != 0;
          let mut shiftchars = [0u8; 2];
          let bytecount = if multibyte { 2 } else { 1 };
          let mut k = 0;
          while i < len && k < bytecount {
            let c_gr = text[i] | 0x80;
            if (0xA1..=0xFE).contains(&c_gr) || (charset96 && c_gr >= 0xA0) {
              shiftchars[k] = c_gr;
              i += 1;
              k += 1;
            } else {
              break;
            }
          }
          if k > 0 {
            escape_fail = false;
            let m = charset_g[shift].any_to_utf8(&shiftchars[..k], out, mode);
            if m != bytecount {
              utils::set_error_position(&mut errpos, i - k + m);
            }
          }
        }
      }

      if escape_fail {
        // unhandled escapes pass through to the output and mark an error
        out.push(0x1B);
        out.extend_from_slice(escape_code);
        utils::set_error_position(&mut errpos, save_pos);
      }
    }
  }

  errpos
}

/// Encodes UTF-8 into an ISO 2022 stream for the given key.
///
pub(crate) fn utf8_to_iso_2022(
  key: CharacterSet,
  text: &[u8],
  out: &mut Vec<u8>,
) -> usize {
  // the iso-2022-jp combinations have their own encoder
  if key.key() & (CharacterSet::ISO_2022_JP_BASE | CharacterSet::ISO_2022)
    == key.key()
  {
    return japanese::utf8_to_jis_x(key, text, out);
  }

  // the multi-byte encodings that designate G1
  if key == CharacterSet::ISO_2022_IR_149 || key == CharacterSet::ISO_2022_IR_58
  {
    let escape_code: &[u8] = if key == CharacterSet::ISO_2022_IR_58 {
      b"\x1B$)A"
    } else {
      b"\x1B$)C"
    };

    let len = text.len();
    let mut errpos = len;
    let mut i = 0;
    while i < len {
      // take one line at a time, checking it for non-ASCII bytes
      let mut j = i;
      let mut check_ascii = 0u8;
      while j < len && !utils::is_end_line(text[j]) {
        check_ascii |= text[j];
        j += 1;
      }
      while j < len && utils::is_end_line(text[j]) {
        j += 1;
      }

      let line = &text[i..j];
      if check_ascii & 0x80 == 0 {
        out.extend_from_slice(line);
      } else {
        // the designation escape precedes each encoded line
        out.extend_from_slice(escape_code);
        let m = if key == CharacterSet::ISO_2022_IR_58 {
          simplified_chinese::utf8_to_gb2312(line, out)
        } else {
          korean::utf8_to_euc_kr(line, out)
        };
        if m < line.len() {
          utils::set_error_position(&mut errpos, i + m);
        }
      }
      i = j;
    }
    return errpos;
  }

  // single-byte character sets encode without escape sequences
  let cs = CharacterSet::from_key(key.key() ^ CharacterSet::ISO_2022);
  crate::internal::single_byte::utf8_to_single_byte(cs, text, out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_code_length_test() {
    assert_eq!(escape_code_length(b"(B"), 2);
    assert_eq!(escape_code_length(b"$B"), 2);
    assert_eq!(escape_code_length(b"$(D"), 3);
    assert_eq!(escape_code_length(b"N"), 1);
    assert_eq!(escape_code_length(b"[0m"), 3);
    // no final byte
    assert_eq!(escape_code_length(b"$("), 0);
    assert_eq!(escape_code_length(b""), 0);
  }

  #[test]
  fn escape_type_test() {
    let mut state = 0;
    assert_eq!(escape_type(b"$B", &mut state), EscapeType::Gzd);
    assert_eq!(state, MULTIBYTE_G0);

    assert_eq!(escape_type(b"(B", &mut state), EscapeType::Gzd);
    assert_eq!(state, 0);

    assert_eq!(escape_type(b"$)C", &mut state), EscapeType::G1d);
    assert_eq!(state, MULTIBYTE_G1);

    assert_eq!(escape_type(b"-A", &mut state), EscapeType::G1d);
    assert_eq!(state, CHARSET96_G1);

    assert_eq!(escape_type(b".F", &mut state), EscapeType::G2d);
    assert_eq!(state, CHARSET96_G1 | CHARSET96_G2);

    assert_eq!(escape_type(b"N", &mut state), EscapeType::Ss2);
    assert_eq!(escape_type(b"O", &mut state), EscapeType::Ss3);
    assert_eq!(escape_type(b"%/I", &mut state), EscapeType::Docs);
    assert_eq!(escape_type(b"&@", &mut state), EscapeType::Irr);
    assert_eq!(escape_type(b"'", &mut state), EscapeType::Other);
  }

  #[test]
  fn charset_from_escape_code_test() {
    assert_eq!(charset_from_escape_code(b"(B"), CharacterSet::ISO_2022_IR_6);
    assert_eq!(charset_from_escape_code(b"(J"), CharacterSet::ISO_IR_13);
    assert_eq!(charset_from_escape_code(b")I"), CharacterSet::ISO_IR_13);
    assert_eq!(charset_from_escape_code(b"$B"), CharacterSet::ISO_2022_IR_87);
    assert_eq!(charset_from_escape_code(b"$@"), CharacterSet::ISO_2022_IR_87);
    assert_eq!(
      charset_from_escape_code(b"$(D"),
      CharacterSet::ISO_2022_IR_159
    );
    assert_eq!(charset_from_escape_code(b"-A"), CharacterSet::ISO_IR_100);
    assert_eq!(charset_from_escape_code(b"$)C"), CharacterSet::X_EUCKR);
    assert_eq!(charset_from_escape_code(b"$)A"), CharacterSet::X_GB2312);
    assert_eq!(charset_from_escape_code(b"!Z"), CharacterSet::UNKNOWN);
  }

  #[test]
  fn init_iso_2022_test() {
    let mut g = [CharacterSet::UNKNOWN; 4];

    // latin-1: designated to G1 as a 96-character set
    let state = init_iso_2022(
      CharacterSet::from_key(
        CharacterSet::ISO_IR_100.key() | CharacterSet::ISO_2022,
      ),
      &mut g,
    );
    assert_eq!(g[0], CharacterSet::ISO_2022_IR_6);
    assert_eq!(g[1], CharacterSet::ISO_IR_100);
    assert_eq!(state, CHARSET96_G1);

    // korean: designated to G1 as a multibyte set
    let state = init_iso_2022(CharacterSet::ISO_2022_IR_149, &mut g);
    assert_eq!(g[1], CharacterSet::X_EUCKR);
    assert_eq!(state, MULTIBYTE_G1);

    // japanese katakana is pre-designated, kanji is not
    let state = init_iso_2022(CharacterSet::ISO_2022_IR_13, &mut g);
    assert_eq!(g[0], CharacterSet::ISO_IR_13);
    assert_eq!(g[1], CharacterSet::ISO_IR_13);
    assert_eq!(state, 0);

    let state = init_iso_2022(CharacterSet::ISO_2022_IR_87, &mut g);
    assert_eq!(g[0], CharacterSet::ISO_2022_IR_6);
    assert_eq!(g[1], CharacterSet::ISO_IR_6);
    assert_eq!(state, 0);

    // a non-ISO-2022 key is carried in the state bits
    let state = init_iso_2022(CharacterSet::UNKNOWN, &mut g);
    assert_eq!(state, 255);
  }
}
