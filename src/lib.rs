//! Converts text between the character sets used in DICOM string data and
//! UTF-8.
//!
//! Every supported character set is identified by a [`CharacterSet`] key,
//! resolved from the value of the *'(0008,0005) Specific Character Set'*
//! data element with [`CharacterSet::from_string`]. A key converts whole
//! byte buffers in either direction and reports the offset of the first
//! byte that failed to convert, so callers can decide how strict to be.
//!
//! Besides the two conversion directions there are helpers for scanning
//! multi-valued strings ([`CharacterSet::next_backslash`]), for producing
//! console-safe output ([`CharacterSet::to_safe_utf8`]) and for
//! case-insensitive matching ([`CharacterSet::case_folded_utf8`]).

mod internal;

pub use internal::lookup_table::{
  table_from_bytes, table_to_bytes, LookupTableError,
};

use internal::utf8::{self, BadCharMode};
use internal::{
  iso_2022, japanese, korean, registry, simplified_chinese, single_byte,
  traditional_chinese,
};

/// A character set key. The value combines a base character set with flag
/// bits: bit 5 ([`CharacterSet::ISO_2022`]) marks the escape-driven ISO 2022
/// variant of the base set, and within ISO 2022 the three Japanese sets
/// (ISO IR 13, ISO IR 87 and ISO IR 159) occupy separate low bits so they
/// can be combined in a single key.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterSet(u8);

impl CharacterSet {
  /// ISO 646, the default repertoire (US-ASCII).
  pub const ISO_IR_6: CharacterSet = CharacterSet(0);
  /// JIS X 0201: romaji and half-width katakana.
  pub const ISO_IR_13: CharacterSet = CharacterSet(1);
  /// ISO 8859-1, Latin alphabet No. 1.
  pub const ISO_IR_100: CharacterSet = CharacterSet(8);
  /// ISO 8859-2, Latin alphabet No. 2.
  pub const ISO_IR_101: CharacterSet = CharacterSet(9);
  /// ISO 8859-3, Latin alphabet No. 3.
  pub const ISO_IR_109: CharacterSet = CharacterSet(10);
  /// ISO 8859-4, Latin alphabet No. 4.
  pub const ISO_IR_110: CharacterSet = CharacterSet(11);
  /// ISO 8859-5, Latin/Cyrillic.
  pub const ISO_IR_144: CharacterSet = CharacterSet(12);
  /// ISO 8859-6, Latin/Arabic.
  pub const ISO_IR_127: CharacterSet = CharacterSet(13);
  /// ISO 8859-7, Latin/Greek.
  pub const ISO_IR_126: CharacterSet = CharacterSet(14);
  /// ISO 8859-8, Latin/Hebrew.
  pub const ISO_IR_138: CharacterSet = CharacterSet(15);
  /// ISO 8859-9, Latin alphabet No. 5.
  pub const ISO_IR_148: CharacterSet = CharacterSet(16);
  /// ISO 8859-10, Latin alphabet No. 6.
  pub const X_LATIN6: CharacterSet = CharacterSet(17);
  /// ISO 8859-11, Thai (TIS 620-2533).
  pub const ISO_IR_166: CharacterSet = CharacterSet(18);
  /// ISO 8859-13, Latin alphabet No. 7.
  pub const X_LATIN7: CharacterSet = CharacterSet(19);
  /// ISO 8859-14, Latin alphabet No. 8.
  pub const X_LATIN8: CharacterSet = CharacterSet(20);
  /// ISO 8859-15, Latin alphabet No. 9 (DICOM's ISO_IR 203).
  pub const X_LATIN9: CharacterSet = CharacterSet(21);
  /// ISO 8859-16, Latin alphabet No. 10.
  pub const X_LATIN10: CharacterSet = CharacterSet(22);
  /// KS X 1001 in its EUC-KR form, with the CP949 extensions.
  pub const X_EUCKR: CharacterSet = CharacterSet(24);
  /// GB 2312 in its EUC form.
  pub const X_GB2312: CharacterSet = CharacterSet(25);
  /// ISO 646 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_6: CharacterSet = CharacterSet(32);
  /// JIS X 0201 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_13: CharacterSet = CharacterSet(33);
  /// JIS X 0208, which requires ISO 2022 escape sequences.
  pub const ISO_2022_IR_87: CharacterSet = CharacterSet(34);
  /// JIS X 0212, which requires ISO 2022 escape sequences.
  pub const ISO_2022_IR_159: CharacterSet = CharacterSet(36);
  /// ISO 8859-1 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_100: CharacterSet = CharacterSet(40);
  /// ISO 8859-2 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_101: CharacterSet = CharacterSet(41);
  /// ISO 8859-3 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_109: CharacterSet = CharacterSet(42);
  /// ISO 8859-4 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_110: CharacterSet = CharacterSet(43);
  /// ISO 8859-5 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_144: CharacterSet = CharacterSet(44);
  /// ISO 8859-6 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_127: CharacterSet = CharacterSet(45);
  /// ISO 8859-7 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_126: CharacterSet = CharacterSet(46);
  /// ISO 8859-8 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_138: CharacterSet = CharacterSet(47);
  /// ISO 8859-9 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_148: CharacterSet = CharacterSet(48);
  /// ISO 8859-11 with ISO 2022 escape sequences.
  pub const ISO_2022_IR_166: CharacterSet = CharacterSet(50);
  /// KS X 1001, which requires ISO 2022 escape sequences.
  pub const ISO_2022_IR_149: CharacterSet = CharacterSet(56);
  /// GB 2312, which requires ISO 2022 escape sequences.
  pub const ISO_2022_IR_58: CharacterSet = CharacterSet(57);
  /// Unicode in UTF-8.
  pub const ISO_IR_192: CharacterSet = CharacterSet(64);
  /// GB 18030, the full Chinese national standard.
  pub const GB18030: CharacterSet = CharacterSet(65);
  /// GBK, the subset of GB 18030 without four-byte codes.
  pub const GBK: CharacterSet = CharacterSet(66);
  /// Big5 with the ETEN extensions.
  pub const X_BIG5: CharacterSet = CharacterSet(67);
  /// EUC-JP, the UNIX encoding of JIS X 0201/0208/0212.
  pub const X_EUCJP: CharacterSet = CharacterSet(68);
  /// Shift-JIS in its CP932 (windows-31j) form.
  pub const X_SJIS: CharacterSet = CharacterSet(69);
  /// Windows code page 874, Thai.
  pub const X_CP874: CharacterSet = CharacterSet(70);
  /// Windows code page 1250, central Europe.
  pub const X_CP1250: CharacterSet = CharacterSet(71);
  /// Windows code page 1251, Cyrillic.
  pub const X_CP1251: CharacterSet = CharacterSet(72);
  /// Windows code page 1252, western Europe.
  pub const X_CP1252: CharacterSet = CharacterSet(73);
  /// Windows code page 1253, Greek.
  pub const X_CP1253: CharacterSet = CharacterSet(74);
  /// Windows code page 1254, Turkish.
  pub const X_CP1254: CharacterSet = CharacterSet(75);
  /// Windows code page 1255, Hebrew.
  pub const X_CP1255: CharacterSet = CharacterSet(76);
  /// Windows code page 1256, Arabic.
  pub const X_CP1256: CharacterSet = CharacterSet(77);
  /// Windows code page 1257, Baltic.
  pub const X_CP1257: CharacterSet = CharacterSet(78);
  /// Windows code page 1258, Vietnamese.
  pub const X_CP1258: CharacterSet = CharacterSet(79);
  /// KOI8, Cyrillic.
  pub const X_KOI8: CharacterSet = CharacterSet(80);
  /// An unrecognized character set.
  pub const UNKNOWN: CharacterSet = CharacterSet(255);

  /// The flag bit that marks the ISO 2022 variant of a base character set.
  pub const ISO_2022: u8 = 0x20;

  // masks over the key bits
  pub(crate) const ISO_2022_BASE: u8 = 0x1F;
  pub(crate) const ISO_2022_JP_BASE: u8 = 0x07;
  pub(crate) const ISO_2022_MAX: u8 = 0x3F;

  /// Builds a key from its raw 8-bit value.
  ///
  pub fn from_key(key: u8) -> CharacterSet {
    CharacterSet(key)
  }

  /// Returns the raw 8-bit value of this key.
  ///
  pub fn key(self) -> u8 {
    self.0
  }

  /// Returns whether this key names a stateful ISO 2022 encoding.
  ///
  pub fn is_iso_2022(self) -> bool {
    self.0 & Self::ISO_2022 != 0
  }

  /// Returns whether this key names one of the ISO 8859 character sets.
  ///
  pub fn is_iso_8859(self) -> bool {
    (Self::ISO_IR_100.0..=Self::X_LATIN10.0).contains(&self.0)
  }

  /// Resolves a key from the value of a SpecificCharacterSet data element:
  /// one or more defined terms separated by backslashes, each ignoring
  /// surrounding spaces.
  ///
  /// An empty first value gives the default repertoire. When none of the
  /// values is a recognized defined term, the whole string is matched
  /// case-insensitively against the common names of each character set
  /// (`"latin1"`, `"utf-8"`, `"shift-jis"` and so on). A string that
  /// matches nothing resolves to [`CharacterSet::UNKNOWN`].
  ///
  pub fn from_string(name: &str) -> CharacterSet {
    let bytes = name.as_bytes();
    let ep = bytes.len();
    let mut key = Self::UNKNOWN.0;
    let mut found = false;

    // loop over backslash-separated defined terms
    let mut cp = 0;
    let mut n = 0;
    while cp < ep && bytes[cp] != 0 {
      // strip leading and trailing spaces from the value
      while cp < ep && bytes[cp] == b' ' {
        cp += 1;
      }
      let mut dp = cp;
      while dp < ep && bytes[dp] != b'\\' && bytes[dp] != 0 {
        dp += 1;
      }
      let mut l = dp - cp;
      while l > 0 && bytes[cp + l - 1] == b' ' {
        l -= 1;
      }

      if l == 0 {
        found = true;
        key = Self::ISO_IR_6.0;
      } else {
        found = false;
        let value = &bytes[cp..cp + l];
        for info in registry::CHARSETS {
          let mut iso_2022_flag = 0;
          if info.defined_term.as_bytes() == value {
            found = true;
          } else if !info.defined_term_ext.is_empty()
            && info.defined_term_ext.as_bytes() == value
          {
            found = true;
            iso_2022_flag = Self::ISO_2022;
          }

          if found {
            if n == 0 {
              // the first value sets the key
              key = info.key.0 | iso_2022_flag;
            } else if info.flags == 1 {
              // the second value replaces the first
              key = info.key.0 | Self::ISO_2022;
            } else if info.flags == 2 {
              // second and third values combine (the Japanese sets)
              key =
                (key & Self::ISO_2022_JP_BASE) | info.key.0 | Self::ISO_2022;
            }
            break;
          }
        }
      }

      cp = dp;
      if cp < ep && bytes[cp] == b'\\' {
        cp += 1;
      }
      n += 1;
    }

    // with no defined term matched, look for common character set names
    if !found && !name.is_empty() {
      let lowername = Self::ISO_IR_6.case_folded_utf8(bytes);

      'search: for info in registry::CHARSETS {
        for alias in info.names {
          if lowername == *alias {
            key = info.key.0;
            // JIS X 0212 always activates JIS X 0208 as well
            if key == Self::ISO_2022_IR_159.0 {
              key |= Self::ISO_2022_IR_87.0;
            }
            break 'search;
          }
        }
      }
    }

    CharacterSet(key)
  }

  /// Produces the canonical SpecificCharacterSet string for this key,
  /// with backslash separators when the key combines ISO 2022 sets.
  /// Returns an empty string for a key with no defined term.
  ///
  pub fn charset_string(self) -> String {
    let mut key = self.0;
    let mut value = String::new();

    for info in registry::CHARSETS {
      if key == 0 {
        break;
      }

      let mut matched = false;
      if key == key & (Self::ISO_2022_JP_BASE | Self::ISO_2022)
        && key != Self::ISO_2022
      {
        // the Japanese sets can combine into one key
        if info.key.0 & key == info.key.0
          && info.key.0 | Self::ISO_2022 != Self::ISO_2022
        {
          matched = true;
          // remove the bit for the matched charset
          key ^= info.key.0 & !Self::ISO_2022;
          if key == Self::ISO_2022 {
            key = 0;
          }
        }
      } else if info.flags == 0 && value.is_empty() {
        matched = if self.is_iso_2022() {
          info.key.0 == key & Self::ISO_2022_BASE
        } else {
          info.key.0 == key
        };
        if matched {
          key = 0;
        }
      } else if info.flags == 1 && value.is_empty() {
        matched = info.key.0 == key | Self::ISO_2022;
        if matched {
          key = 0;
        }
      }

      if matched {
        if self.is_iso_2022() {
          if info.flags == 1 || info.flags == 2 {
            // ISO 2022 multibyte sets always go in the second value
            value.push('\\');
          }
          value.push_str(info.defined_term_ext);
        } else {
          value.push_str(info.defined_term);
        }
      }
    }

    value
  }

  /// Decodes `text` to UTF-8. Bytes that cannot be decoded become U+FFFD.
  ///
  /// The returned offset is the position of the first undecodable byte, or
  /// the input length when every byte decoded cleanly. The whole input is
  /// always consumed.
  ///
  pub fn to_utf8(self, text: &[u8]) -> (String, usize) {
    let mut out = Vec::with_capacity(text.len());
    let errpos = self.any_to_utf8(text, &mut out, BadCharMode::Replace);
    (utf8::into_string(out), errpos)
  }

  /// Encodes UTF-8 `text` into this character set. Characters without a
  /// mapping go through a set of ASCII substitutions (smart quotes to
  /// quotes, dashes to hyphens, exotic spaces to a space) and otherwise
  /// become `?`.
  ///
  /// The returned offset is the position of the first character that could
  /// not be represented, or the input length on success.
  ///
  pub fn from_utf8(self, text: &[u8]) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(text.len());

    let errpos = if self.is_iso_2022() {
      iso_2022::utf8_to_iso_2022(self, text, &mut out)
    } else {
      match self {
        Self::X_EUCKR => korean::utf8_to_euc_kr(text, &mut out),
        Self::X_GB2312 => simplified_chinese::utf8_to_gb2312(text, &mut out),
        Self::ISO_IR_192 => {
          utf8::utf8_to_utf8(text, &mut out, BadCharMode::Replace)
        }
        Self::GB18030 => simplified_chinese::utf8_to_gb18030(text, &mut out),
        Self::GBK => simplified_chinese::utf8_to_gbk(text, &mut out),
        Self::X_BIG5 => traditional_chinese::utf8_to_big5(text, &mut out),
        Self::X_EUCJP => japanese::utf8_to_euc_jp(text, &mut out),
        Self::X_SJIS => japanese::utf8_to_sjis(text, &mut out),
        _ => single_byte::utf8_to_single_byte(self, text, &mut out),
      }
    };

    (out, errpos)
  }

  /// Decodes `text` to UTF-8 that is safe to print: C0 and C1 controls,
  /// DEL, backslash and undecodable bytes come out as three-digit octal
  /// escapes such as `\033`.
  ///
  pub fn to_safe_utf8(self, text: &[u8]) -> String {
    let mut decoded = Vec::with_capacity(text.len());
    self.any_to_utf8(text, &mut decoded, BadCharMode::Escape);

    // scan for codes that are unsafe to print; bad input bytes are carried
    // as UTF-16 low surrogates by the Escape mode above
    let mut out = Vec::new();
    let ep = decoded.len();
    let mut lp = 0;
    let mut cp = 0;
    while cp < ep {
      let dp = cp;
      let a = decoded[cp];
      cp += 1;
      if a < 0x20 || a == 0x7F || a == b'\\' {
        // C0 control code or backslash
        out.extend_from_slice(&decoded[lp..dp]);
        internal::utils::append_octal_escape(a, &mut out);
        lp = cp;
      } else if a & 0xC0 == 0xC0 && cp < ep {
        let b = decoded[cp];
        cp += 1;
        if a == 0xC2 && b < 0xA0 {
          // C1 control code
          out.extend_from_slice(&decoded[lp..dp]);
          internal::utils::append_octal_escape(b, &mut out);
          lp = cp;
        } else if a & 0xE0 == 0xE0 && cp < ep {
          let c = decoded[cp];
          cp += 1;
          if a == 0xED && b & 0xF0 == 0xB0 {
            // a low surrogate holding an unconvertible byte
            let d = ((b & 0x0F) as u16) << 6 | (c & 0x3F) as u16;
            if d <= 0xFF {
              out.extend_from_slice(&decoded[lp..dp]);
              internal::utils::append_octal_escape(d as u8, &mut out);
              lp = cp;
            }
          } else if a & 0xF0 == 0xF0 && cp < ep {
            cp += 1;
          }
        }
      }
    }

    if lp == 0 {
      return utf8::into_string(decoded);
    }

    out.extend_from_slice(&decoded[lp..]);
    utf8::into_string(out)
  }

  /// Decodes `text` to case-folded UTF-8, following Unicode full case
  /// folding: `"Straße"` becomes `"strasse"`.
  ///
  pub fn case_folded_utf8(self, text: &[u8]) -> String {
    let converted;
    let input = if self != Self::ISO_IR_192 {
      converted = self.to_utf8(text).0;
      converted.as_bytes()
    } else {
      text
    };

    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;
    while pos < input.len() {
      let mut code = utf8::next_code_point(input, &mut pos);
      if code == utf8::MALFORMED {
        code = 0xFFFD;
      }
      if code != utf8::TRUNCATED {
        internal::case_fold::case_fold(code, &mut out);
      }
    }

    utf8::into_string(out)
  }

  /// Returns the offset of the next backslash delimiter, or of the end of
  /// input when there is none. Trailing bytes of multi-byte characters and
  /// the contents of ISO 2022 escape sequences are never mistaken for a
  /// delimiter.
  ///
  pub fn next_backslash(self, text: &[u8]) -> usize {
    let ep = text.len();
    let mut cp = 0;

    if self == Self::GB18030 || self == Self::GBK {
      // a backslash cannot be the second byte of a two-byte character
      while cp < ep && text[cp] != 0 {
        if text[cp] >= 0x81 {
          cp += 1;
          if cp < ep && text[cp] >= 0x21 {
            cp += 1;
          }
        } else if text[cp] != b'\\' {
          cp += 1;
        } else {
          break;
        }
      }
    } else if self == Self::X_SJIS {
      while cp < ep && text[cp] != 0 {
        let x = text[cp];
        if (0x81..=0x9F).contains(&x) || (0xE0..=0xFC).contains(&x) {
          cp += 1;
          if cp < ep && (0x40..=0xFC).contains(&text[cp]) && text[cp] != 0x7F {
            cp += 1;
          }
        } else if x != b'\\' {
          cp += 1;
        } else {
          break;
        }
      }
    } else if self == Self::X_BIG5 {
      while cp < ep && text[cp] != 0 {
        let x = text[cp];
        if (0x81..=0xFE).contains(&x) {
          cp += 1;
          if cp < ep
            && ((0x40..=0x7E).contains(&text[cp])
              || (0xA1..=0xFE).contains(&text[cp]))
          {
            cp += 1;
          }
        } else if x != b'\\' {
          cp += 1;
        } else {
          break;
        }
      }
    } else if self.is_iso_2022() {
      // a backslash cannot be part of a G0 multi-byte code or of a
      // single-shifted G2 or G3 character; this must match the decoder
      let mut charset_g2 = Self::UNKNOWN;
      let mut charset_g3 = Self::UNKNOWN;
      let mut state: u32 = 0;
      let mut shiftcount = 0;
      let mut charset96 = false;

      while cp < ep && text[cp] != 0 {
        if text[cp] == 0x1B {
          cp += 1;
          shiftcount = 0;
          let l = iso_2022::escape_code_length(&text[cp..]);
          match iso_2022::escape_type(&text[cp..cp + l], &mut state) {
            iso_2022::EscapeType::G2d => {
              charset_g2 = iso_2022::charset_from_escape_code(&text[cp..cp + l]);
            }
            iso_2022::EscapeType::G3d => {
              charset_g3 = iso_2022::charset_from_escape_code(&text[cp..cp + l]);
            }
            iso_2022::EscapeType::Ss2 => {
              if charset_g2 != Self::UNKNOWN {
                shiftcount =
                  if state & iso_2022::MULTIBYTE_G2 != 0 { 2 } else { 1 };
                charset96 = state & iso_2022::CHARSET96_G2 != 0;
              }
            }
            iso_2022::EscapeType::Ss3 => {
              if charset_g3 != Self::UNKNOWN {
                shiftcount =
                  if state & iso_2022::MULTIBYTE_G3 != 0 { 2 } else { 1 };
                charset96 = state & iso_2022::CHARSET96_G3 != 0;
              }
            }
            _ => (),
          }
          // advance over the escape, but never past a backslash in it
          for _ in 0..l {
            if text[cp] == b'\\' {
              break;
            }
            cp += 1;
          }
        } else if internal::utils::is_end_line(text[cp]) {
          // a CR-NL pair resets the state
          let mut prevchar = text[cp];
          cp += 1;
          while cp < ep && internal::utils::is_end_line(text[cp]) {
            if prevchar == b'\r' && text[cp] == b'\n' {
              charset_g2 = Self::UNKNOWN;
              charset_g3 = Self::UNKNOWN;
              state = 0;
              shiftcount = 0;
            }
            prevchar = text[cp];
            cp += 1;
          }
        } else if shiftcount > 0 {
          // skip a single-shifted character one octet at a time
          let c_gl = text[cp] & 0x7F;
          if (0x21..=0x7E).contains(&c_gl) || (charset96 && c_gl >= 0x20) {
            cp += 1;
            shiftcount -= 1;
          } else {
            shiftcount = 0;
          }
        } else if state & iso_2022::MULTIBYTE_G0 != 0 {
          // within a multibyte G0, a backslash is half a character
          cp += 1;
        } else if text[cp] != b'\\' {
          cp += 1;
        } else {
          break;
        }
      }
    } else {
      while cp < ep && text[cp] != 0 {
        if text[cp] == b'\\' {
          break;
        }
        cp += 1;
      }
    }

    cp
  }

  /// Counts the backslash delimiters in `text`, using the same scanning
  /// rules as [`CharacterSet::next_backslash`].
  ///
  pub fn count_backslashes(self, text: &[u8]) -> u32 {
    let mut count = 0;
    let ep = text.len();
    let mut cp = 0;

    while cp < ep && text[cp] != 0 {
      cp += self.next_backslash(&text[cp..]);
      if cp < ep && text[cp] == b'\\' {
        cp += 1;
        count += 1;
      }
    }

    count
  }

  /// Decodes `text` to UTF-8 with the given handling for bytes that fail
  /// to convert, dispatching on the key.
  ///
  pub(crate) fn any_to_utf8(
    self,
    text: &[u8],
    out: &mut Vec<u8>,
    mode: BadCharMode,
  ) -> usize {
    if self == Self::ISO_IR_6 {
      utf8::ascii_to_utf8(text, out, mode)
    } else if self.is_iso_2022() {
      iso_2022::iso_2022_to_utf8(self, text, out, mode)
    } else if self.is_iso_8859() {
      single_byte::iso_8859_to_utf8(self, text, out, mode)
    } else {
      match self {
        Self::X_EUCKR => korean::euc_kr_to_utf8(text, out, mode),
        Self::X_GB2312 => simplified_chinese::gb2312_to_utf8(text, out, mode),
        Self::ISO_IR_192 => utf8::utf8_to_utf8(text, out, mode),
        Self::GB18030 => simplified_chinese::gb18030_to_utf8(text, out, mode),
        Self::GBK => simplified_chinese::gbk_to_utf8(text, out, mode),
        Self::X_BIG5 => traditional_chinese::big5_to_utf8(text, out, mode),
        Self::X_EUCJP => japanese::euc_jp_to_utf8(text, out, mode),
        Self::X_SJIS => japanese::sjis_to_utf8(text, out, mode),
        _ => single_byte::single_byte_to_utf8(self, text, out, mode),
      }
    }
  }
}

impl std::fmt::Display for CharacterSet {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let s = self.charset_string();
    if s.is_empty() {
      f.write_str(if *self == Self::ISO_IR_6 { "ISO_IR 6" } else { "Unknown" })
    } else if s.starts_with('\\') {
      // a bare multibyte ISO 2022 set implies ASCII in the first value
      write!(f, "ISO 2022 IR 6{}", s)
    } else {
      f.write_str(&s)
    }
  }
}

/// The character-set policy for one conversion: the set to use when a data
/// set declares none, and whether to override a declared one. Snapshot this
/// once per operation rather than consulting mutable global state.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeConfig {
  /// Used when no character set is declared.
  pub default_character_set: CharacterSet,

  /// When set, the default wins even over a declared character set.
  pub override_character_set: bool,
}

impl Default for DecodeConfig {
  fn default() -> DecodeConfig {
    DecodeConfig {
      default_character_set: CharacterSet::ISO_IR_6,
      override_character_set: false,
    }
  }
}

impl DecodeConfig {
  /// Picks the character set to use for a data set that declared
  /// `declared` (or nothing).
  ///
  pub fn resolve(&self, declared: Option<CharacterSet>) -> CharacterSet {
    match declared {
      Some(cs) if !self.override_character_set => cs,
      _ => self.default_character_set,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode(name: &str, bytes: &[u8]) -> String {
    let (s, errpos) = CharacterSet::from_string(name).to_utf8(bytes);
    assert_eq!(errpos, bytes.len(), "unexpected decode error in {:?}", s);
    s
  }

  fn encode(name: &str, text: &str) -> Vec<u8> {
    let (bytes, errpos) =
      CharacterSet::from_string(name).from_utf8(text.as_bytes());
    assert_eq!(errpos, text.len(), "unexpected encode error");
    bytes
  }

  #[test]
  fn from_string_defined_terms_test() {
    assert_eq!(CharacterSet::from_string(""), CharacterSet::ISO_IR_6);
    assert_eq!(CharacterSet::from_string("ISO_IR 6"), CharacterSet::ISO_IR_6);
    assert_eq!(
      CharacterSet::from_string("ISO_IR 100"),
      CharacterSet::ISO_IR_100
    );
    assert_eq!(
      CharacterSet::from_string("  ISO_IR 100  "),
      CharacterSet::ISO_IR_100
    );
    assert_eq!(
      CharacterSet::from_string("ISO 2022 IR 100"),
      CharacterSet::from_key(
        CharacterSet::ISO_IR_100.key() | CharacterSet::ISO_2022
      )
    );
    assert_eq!(
      CharacterSet::from_string("ISO_IR 192"),
      CharacterSet::ISO_IR_192
    );
    assert_eq!(CharacterSet::from_string("GB18030"), CharacterSet::GB18030);
    assert_eq!(CharacterSet::from_string("GBK"), CharacterSet::GBK);
    assert_eq!(
      CharacterSet::from_string("ISO_IR 203"),
      CharacterSet::X_LATIN9
    );
    assert_eq!(
      CharacterSet::from_string("ISO_IR 90210"),
      CharacterSet::UNKNOWN
    );
  }

  #[test]
  fn from_string_multi_valued_test() {
    // an empty first value is the default repertoire
    assert_eq!(
      CharacterSet::from_string("\\ISO 2022 IR 87"),
      CharacterSet::ISO_2022_IR_87
    );
    assert_eq!(
      CharacterSet::from_string("\\ISO 2022 IR 149"),
      CharacterSet::ISO_2022_IR_149
    );
    assert_eq!(
      CharacterSet::from_string("\\ISO 2022 IR 58"),
      CharacterSet::ISO_2022_IR_58
    );

    // the japanese sets combine
    assert_eq!(
      CharacterSet::from_string("ISO 2022 IR 13\\ISO 2022 IR 87").key(),
      CharacterSet::ISO_2022_IR_13.key() | CharacterSet::ISO_2022_IR_87.key()
    );
    assert_eq!(
      CharacterSet::from_string("\\ISO 2022 IR 87\\ISO 2022 IR 159").key(),
      CharacterSet::ISO_2022_IR_87.key() | CharacterSet::ISO_2022_IR_159.key()
    );

    // a single-byte set in later values does not replace the first
    assert_eq!(
      CharacterSet::from_string("ISO 2022 IR 100\\ISO 2022 IR 126"),
      CharacterSet::from_key(
        CharacterSet::ISO_IR_100.key() | CharacterSet::ISO_2022
      )
    );
  }

  #[test]
  fn from_string_common_names_test() {
    assert_eq!(CharacterSet::from_string("latin1"), CharacterSet::ISO_IR_100);
    assert_eq!(
      CharacterSet::from_string("ISO-8859-1"),
      CharacterSet::ISO_IR_100
    );
    assert_eq!(CharacterSet::from_string("UTF-8"), CharacterSet::ISO_IR_192);
    assert_eq!(
      CharacterSet::from_string("Shift_JIS"),
      CharacterSet::X_SJIS
    );
    assert_eq!(CharacterSet::from_string("euc-kr"), CharacterSet::X_EUCKR);
    assert_eq!(CharacterSet::from_string("koi8"), CharacterSet::X_KOI8);
    // JIS X 0212 implies JIS X 0208
    assert_eq!(
      CharacterSet::from_string("iso-2022-jp-2").key(),
      CharacterSet::ISO_2022_IR_159.key() | CharacterSet::ISO_2022_IR_87.key()
    );
  }

  #[test]
  fn charset_string_test() {
    assert_eq!(CharacterSet::ISO_IR_6.charset_string(), "ISO_IR 6");
    assert_eq!(CharacterSet::ISO_IR_100.charset_string(), "ISO_IR 100");
    assert_eq!(CharacterSet::ISO_IR_192.charset_string(), "ISO_IR 192");
    assert_eq!(CharacterSet::X_LATIN9.charset_string(), "ISO_IR 203");
    assert_eq!(
      CharacterSet::from_string("ISO 2022 IR 144").charset_string(),
      "ISO 2022 IR 144"
    );
    assert_eq!(
      CharacterSet::ISO_2022_IR_149.charset_string(),
      "\\ISO 2022 IR 149"
    );
    assert_eq!(
      CharacterSet::from_string("ISO 2022 IR 13\\ISO 2022 IR 87")
        .charset_string(),
      "ISO 2022 IR 13\\ISO 2022 IR 87"
    );
    assert_eq!(CharacterSet::UNKNOWN.charset_string(), "");

    assert_eq!(CharacterSet::ISO_IR_6.to_string(), "ISO_IR 6");
    assert_eq!(CharacterSet::UNKNOWN.to_string(), "Unknown");
    assert_eq!(
      CharacterSet::ISO_2022_IR_87.to_string(),
      "ISO 2022 IR 6\\ISO 2022 IR 87"
    );
  }

  #[test]
  fn latin_1_decode_test() {
    let (s, errpos) =
      CharacterSet::ISO_IR_100.to_utf8(&[0x48, 0xE9, 0x6C, 0x6C, 0x6F]);
    assert_eq!(s, "Héllo");
    assert_eq!(errpos, 5);
  }

  #[test]
  fn sjis_encode_test() {
    let (bytes, errpos) = CharacterSet::X_SJIS.from_utf8("漢字".as_bytes());
    assert_eq!(bytes, [0x8A, 0xBF, 0x8E, 0x9A]);
    assert_eq!(errpos, 6);
  }

  #[test]
  fn gb18030_four_byte_decode_test() {
    // the four-byte form covers the rest of the BMP
    let (s, errpos) = CharacterSet::GB18030.to_utf8(&[0x81, 0x30, 0x84, 0x36]);
    assert_eq!(s, "¥");
    assert_eq!(errpos, 4);

    // the four-byte code for U+FFFD is not an error
    let (s, errpos) = CharacterSet::GB18030.to_utf8(&[0x84, 0x31, 0xA4, 0x37]);
    assert_eq!(s, "\u{FFFD}");
    assert_eq!(errpos, 4);
  }

  #[test]
  fn iso_2022_jis_decode_test() {
    let (s, errpos) = CharacterSet::ISO_2022_IR_6
      .to_utf8(b"ABC\x1B$B\x24\x2C\x1B(B");
    assert_eq!(s, "ABCが");
    assert_eq!(errpos, 11);
  }

  #[test]
  fn case_fold_utf8_test() {
    assert_eq!(
      CharacterSet::ISO_IR_192.case_folded_utf8("Straße".as_bytes()),
      "strasse"
    );
    assert_eq!(
      CharacterSet::ISO_IR_100.case_folded_utf8(&[0x53, 0xDF, 0x21]),
      "ss!"
    );
  }

  //
  // decoding scenarios adapted from the annexes of the DICOM standard
  //

  #[test]
  fn annex_h_japanese_test() {
    assert_eq!(
      decode(
        "\\ISO 2022 IR 87",
        &[
          0x59, 0x61, 0x6D, 0x61, 0x64, 0x61, 0x5E, 0x54, 0x61, 0x72, 0x6F,
          0x75, 0x3D, 0x1B, 0x24, 0x42, 0x3B, 0x33, 0x45, 0x44, 0x1B, 0x28,
          0x42, 0x5E, 0x1B, 0x24, 0x42, 0x42, 0x40, 0x4F, 0x3A, 0x1B, 0x28,
          0x42, 0x3D, 0x1B, 0x24, 0x42, 0x24, 0x64, 0x24, 0x5E, 0x24, 0x40,
          0x1B, 0x28, 0x42, 0x5E, 0x1B, 0x24, 0x42, 0x24, 0x3F, 0x24, 0x6D,
          0x24, 0x26, 0x1B, 0x28, 0x42,
        ],
      ),
      "Yamada^Tarou=山田^太郎=やまだ^たろう"
    );

    assert_eq!(
      decode(
        "ISO 2022 IR 13\\ISO 2022 IR 87",
        &[
          0xD4, 0xCF, 0xC0, 0xDE, 0x5E, 0xC0, 0xDB, 0xB3, 0x3D, 0x1B, 0x24,
          0x42, 0x3B, 0x33, 0x45, 0x44, 0x1B, 0x28, 0x4A, 0x5E, 0x1B, 0x24,
          0x42, 0x42, 0x40, 0x4F, 0x3A, 0x1B, 0x28, 0x4A, 0x3D, 0x1B, 0x24,
          0x42, 0x24, 0x64, 0x24, 0x5E, 0x24, 0x40, 0x1B, 0x28, 0x4A, 0x5E,
          0x1B, 0x24, 0x42, 0x24, 0x3F, 0x24, 0x6D, 0x24, 0x26, 0x1B, 0x28,
          0x4A,
        ],
      ),
      "ﾔﾏﾀﾞ^ﾀﾛｳ=山田^太郎=やまだ^たろう"
    );
  }

  #[test]
  fn annex_i_korean_test() {
    assert_eq!(
      decode(
        "\\ISO 2022 IR 149",
        &[
          0x48, 0x6F, 0x6E, 0x67, 0x5E, 0x47, 0x69, 0x6C, 0x64, 0x6F, 0x6E,
          0x67, 0x3D, 0x1B, 0x24, 0x29, 0x43, 0xFB, 0xF3, 0x5E, 0x1B, 0x24,
          0x29, 0x43, 0xD1, 0xCE, 0xD4, 0xD7, 0x3D, 0x1B, 0x24, 0x29, 0x43,
          0xC8, 0xAB, 0x5E, 0x1B, 0x24, 0x29, 0x43, 0xB1, 0xE6, 0xB5, 0xBF,
        ],
      ),
      "Hong^Gildong=洪^吉洞=홍^길동"
    );
  }

  #[test]
  fn annex_j_chinese_utf8_test() {
    assert_eq!(
      decode(
        "ISO_IR 192",
        &[
          0x57, 0x61, 0x6E, 0x67, 0x5E, 0x58, 0x69, 0x61, 0x6F, 0x44, 0x6F,
          0x6E, 0x67, 0x3D, 0xE7, 0x8E, 0x8B, 0x5E, 0xE5, 0xB0, 0x8F, 0xE6,
          0x9D, 0xB1, 0x3D,
        ],
      ),
      "Wang^XiaoDong=王^小東="
    );

    assert_eq!(
      decode(
        "GB18030",
        &[
          0x57, 0x61, 0x6E, 0x67, 0x5E, 0x58, 0x69, 0x61, 0x6F, 0x44, 0x6F,
          0x6E, 0x67, 0x3D, 0xCD, 0xF5, 0x5E, 0xD0, 0xA1, 0xB6, 0xAB, 0x3D,
        ],
      ),
      "Wang^XiaoDong=王^小东="
    );
  }

  #[test]
  fn annex_k_chinese_gb2312_test() {
    assert_eq!(
      decode(
        "\\ISO 2022 IR 58",
        &[
          0x5A, 0x68, 0x61, 0x6E, 0x67, 0x5E, 0x58, 0x69, 0x61, 0x6F, 0x44,
          0x6F, 0x6E, 0x67, 0x3D, 0x1B, 0x24, 0x29, 0x41, 0xD5, 0xC5, 0x5E,
          0x1B, 0x24, 0x29, 0x41, 0xD0, 0xA1, 0xB6, 0xAB, 0x3D,
        ],
      ),
      "Zhang^XiaoDong=张^小东="
    );

    assert_eq!(
      decode(
        "\\ISO 2022 IR 58",
        &[
          0x31, 0x2E, 0x1B, 0x24, 0x29, 0x41, 0xB5, 0xDA, 0xD2, 0xBB, 0xD0,
          0xD0, 0xCE, 0xC4, 0xD7, 0xD6, 0xA1, 0xA3, 0x0D, 0x0A,
        ],
      ),
      "1.第一行文字。\r\n"
    );
  }

  #[test]
  fn iso_2022_single_byte_values_test() {
    // multiple values in different single-byte encodings, driven by
    // escape sequences
    assert_eq!(
      decode(
        "ISO 2022 IR 100\\ISO 2022 IR 144\\ISO 2022 IR 126",
        &[
          0x42, 0x75, 0x63, 0x5E, 0x4A, 0xE9, 0x72, 0xF4, 0x6D, 0x65, 0x5C,
          0x1B, 0x2D, 0x46, 0xC4, 0xE9, 0xEF, 0xED, 0xF5, 0xF3, 0xE9, 0xEF,
          0xF2, 0x5C, 0x1B, 0x2D, 0x4C, 0xBB, 0xEE, 0xDA, 0x63, 0x65, 0xDC,
          0xD1, 0x79, 0x70, 0xD3,
        ],
      ),
      "Buc^Jérôme\\Διονυσιος\\Люкceмбypг"
    );
  }

  #[test]
  fn iso_2022_encode_test() {
    // japanese, with the escape sequences re-created
    assert_eq!(
      encode("\\ISO 2022 IR 87", "医学=いがく"),
      b"\x1B$B0e3X\x1B(B=\x1B$B$$$,$/\x1B(B"
    );

    // korean designates G1 at the start of each non-ASCII line
    assert_eq!(
      encode("\\ISO 2022 IR 149", "Hong=홍\r\nGildong"),
      b"\x1B$)CHong=\xC8\xAB\r\nGildong".to_vec()
    );

    // single-byte ISO 2022 encodes without escape sequences
    assert_eq!(encode("ISO 2022 IR 100", "Jérôme"), b"J\xE9r\xF4me".to_vec());
  }

  #[test]
  fn cr_nl_resets_designations_test() {
    // the second line starts back at the initial designations, so the
    // high bytes no longer decode as KS X 1001
    let (s, errpos) =
      CharacterSet::ISO_2022_IR_6.to_utf8(b"\x1B$)C\xC8\xAB\r\n\xC8\xAB");
    assert_eq!(s, "홍\r\n\u{FFFD}\u{FFFD}");
    assert_eq!(errpos, 8);

    // a NL alone does not reset
    let (s, errpos) =
      CharacterSet::ISO_2022_IR_6.to_utf8(b"\x1B$)C\xC8\xAB\n\xC8\xAB");
    assert_eq!(s, "홍\n홍");
    assert_eq!(errpos, 9);
  }

  #[test]
  fn iso_2022_illegal_escape_test() {
    // an unknown designation passes through and records the error offset
    let (s, errpos) = CharacterSet::ISO_2022_IR_6.to_utf8(b"AB\x1B(Zxy");
    assert_eq!(s, "AB\x1B(Zxy");
    assert_eq!(errpos, 2);

    // SI and SO are not allowed
    let (s, errpos) = CharacterSet::ISO_2022_IR_6.to_utf8(b"AB\x0ECD");
    assert_eq!(s, "AB\x0ECD");
    assert_eq!(errpos, 2);
  }

  #[test]
  fn iso_2022_single_shift_test() {
    // designate latin-1 to G2, then single-shift one character
    let (s, errpos) =
      CharacterSet::ISO_2022_IR_6.to_utf8(b"A\x1B.A\x1BNicole");
    assert_eq!(s, "Aécole");
    assert_eq!(errpos, 11);
  }

  #[test]
  fn error_offset_is_first_test() {
    let (s, errpos) =
      CharacterSet::ISO_IR_127.to_utf8(&[0x41, 0xA1, 0x42, 0xA1]);
    assert_eq!(s, "A\u{FFFD}B\u{FFFD}");
    assert_eq!(errpos, 1);

    let (_, errpos) = CharacterSet::X_SJIS.from_utf8("あ𐐷".as_bytes());
    assert_eq!(errpos, 3);
  }

  #[test]
  fn pure_ascii_round_trip_test() {
    let text = b"Doe^John\\Doe^Jane 123";
    let keys = [
      CharacterSet::ISO_IR_6,
      CharacterSet::ISO_IR_100,
      CharacterSet::ISO_IR_166,
      CharacterSet::ISO_2022_IR_6,
      CharacterSet::ISO_2022_IR_87,
      CharacterSet::ISO_2022_IR_149,
      CharacterSet::ISO_IR_192,
      CharacterSet::GB18030,
      CharacterSet::GBK,
      CharacterSet::X_BIG5,
      CharacterSet::X_SJIS,
      CharacterSet::X_EUCJP,
      CharacterSet::X_EUCKR,
      CharacterSet::X_KOI8,
      CharacterSet::X_CP1252,
    ];

    for key in keys {
      let (s, errpos) = key.to_utf8(text);
      assert_eq!(s.as_bytes(), text, "decode through {}", key.key());
      assert_eq!(errpos, text.len());

      let (bytes, errpos) = key.from_utf8(text);
      assert_eq!(bytes, text, "encode through {}", key.key());
      assert_eq!(errpos, text.len());
    }
  }

  #[test]
  fn utf8_identity_test() {
    let text = "Wang^XiaoDong=王^小東= héllo\r\nϊ".as_bytes();
    let (s, errpos) = CharacterSet::ISO_IR_192.to_utf8(text);
    assert_eq!(s.as_bytes(), text);
    assert_eq!(errpos, text.len());
  }

  #[test]
  fn legacy_round_trip_test() {
    // for single-shot charsets, every decodable byte sequence encodes
    // back to itself
    let cases: [(CharacterSet, &[u8]); 6] = [
      (CharacterSet::ISO_IR_144, &[0xBB, 0xEE, 0xDA]),
      (CharacterSet::X_SJIS, &[0x8A, 0xBF, 0xB6, 0x41]),
      (CharacterSet::X_EUCJP, &[0xB4, 0xC1, 0x8E, 0xA6]),
      (CharacterSet::X_BIG5, &[0xA4, 0xA4, 0xA4, 0xE5]),
      (CharacterSet::GB18030, &[0xCD, 0xF5, 0x81, 0x30, 0x84, 0x36]),
      (CharacterSet::X_EUCKR, &[0xB1, 0xE8, 0xC8, 0xF1]),
    ];

    for (key, bytes) in cases {
      let (s, errpos) = key.to_utf8(bytes);
      assert_eq!(errpos, bytes.len());
      let (encoded, errpos) = key.from_utf8(s.as_bytes());
      assert_eq!(encoded, bytes, "round trip through {}", key.key());
      assert_eq!(errpos, s.len());
    }
  }

  #[test]
  fn next_backslash_test() {
    let cs = CharacterSet::ISO_IR_6;
    assert_eq!(cs.next_backslash(b"abc\\def"), 3);
    assert_eq!(cs.next_backslash(b"abcdef"), 6);

    // 0x5C as a Shift-JIS trail byte is not a delimiter
    let cs = CharacterSet::X_SJIS;
    assert_eq!(cs.next_backslash(&[0x8A, 0x5C, 0x5C, 0x41]), 2);

    // nor as a Big5 trail byte
    let cs = CharacterSet::X_BIG5;
    assert_eq!(cs.next_backslash(&[0xA4, 0x5C, 0x5C]), 2);

    // nor as a GBK trail byte
    let cs = CharacterSet::GBK;
    assert_eq!(cs.next_backslash(&[0x81, 0x5C, 0x5C]), 2);

    // nor inside a JIS X 0208 segment of an ISO 2022 stream
    let cs = CharacterSet::ISO_2022_IR_87;
    assert_eq!(cs.next_backslash(b"\x1B$B\x5C\x41\x1B(B\x5C"), 8);

    // a single-shifted character hides its octets too
    let cs = CharacterSet::ISO_2022_IR_6;
    assert_eq!(cs.next_backslash(b"\x1B.A\x1BN\x5C\x5C"), 6);
  }

  #[test]
  fn count_backslashes_test() {
    assert_eq!(CharacterSet::ISO_IR_6.count_backslashes(b"a\\b\\c"), 2);
    assert_eq!(CharacterSet::ISO_IR_6.count_backslashes(b"abc"), 0);
    assert_eq!(
      CharacterSet::X_SJIS.count_backslashes(&[0x8A, 0x5C, 0x5C, 0x8A, 0x5C]),
      1
    );
  }

  #[test]
  fn to_safe_utf8_test() {
    // controls, backslash and undecodable bytes become octal escapes
    let cs = CharacterSet::ISO_IR_6;
    assert_eq!(cs.to_safe_utf8(b"a\x1Bb\\c\x7F"), "a\\033b\\134c\\177");
    assert_eq!(cs.to_safe_utf8(&[0x41, 0xE9]), "A\\351");

    // clean text passes through untouched
    assert_eq!(cs.to_safe_utf8(b"clean text"), "clean text");

    let safe = CharacterSet::ISO_IR_100.to_safe_utf8(&[0x48, 0xE9, 0x09]);
    assert_eq!(safe, "Hé\\011");
    assert!(safe.bytes().all(|b| b >= 0x20 && b != 0x7F));
  }

  #[test]
  fn case_fold_idempotence_test() {
    let samples: [&[u8]; 4] = [
      "Straße".as_bytes(),
      "ΔΙΟΝΥΣΙΟΣ".as_bytes(),
      "Ǆigalo FFI".as_bytes(),
      "İstanbul".as_bytes(),
    ];

    for sample in samples {
      let folded = CharacterSet::ISO_IR_192.case_folded_utf8(sample);
      let folded_twice =
        CharacterSet::ISO_IR_192.case_folded_utf8(folded.as_bytes());
      assert_eq!(folded, folded_twice);
    }
  }

  #[test]
  fn decode_config_test() {
    let config = DecodeConfig::default();
    assert_eq!(
      config.resolve(Some(CharacterSet::ISO_IR_100)),
      CharacterSet::ISO_IR_100
    );
    assert_eq!(config.resolve(None), CharacterSet::ISO_IR_6);

    let config = DecodeConfig {
      default_character_set: CharacterSet::ISO_IR_192,
      override_character_set: true,
    };
    assert_eq!(
      config.resolve(Some(CharacterSet::ISO_IR_100)),
      CharacterSet::ISO_IR_192
    );
  }
}
