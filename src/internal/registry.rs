//! The registry of supported character sets: DICOM defined terms, ISO 2022
//! escape codes, and the common names each charset goes by.

use crate::CharacterSet;

/// One registry row.
///
/// `flags` controls how a row combines when SpecificCharacterSet holds
/// multiple values:
///
/// * 0 — the row may appear as the first value.
/// * 1 — the row may only appear as the second value, replacing the first.
/// * 2 — the row may only appear as the second or third value, combining
///   with the previous values (the Japanese JIS X sets).
///
pub(crate) struct CharsetInfo {
  pub key: CharacterSet,
  pub flags: u8,
  pub defined_term: &'static str,
  pub defined_term_ext: &'static str,
  pub escape_code: &'static str,
  pub names: &'static [&'static str],
}

const ISO_IR_6_NAMES: &[&str] = &[
  "ansi_x3.4-1968",
  "ansi_x3.4-1986",
  "ascii",
  "iso-ir-6",
  "iso646-us",
  "us-ascii",
];

const ISO_IR_100_NAMES: &[&str] = &[
  "cp819",
  "csisolatin1",
  "ibm819",
  "iso-8859-1",
  "iso-ir-100",
  "iso8859-1",
  "iso88591",
  "iso_8859-1",
  "iso_8859-1:1987",
  "l1",
  "latin1",
  // documented but incorrect defined term
  "iso-ir 100",
];

const ISO_IR_101_NAMES: &[&str] = &[
  "csisolatin2",
  "iso-8859-2",
  "iso-ir-101",
  "iso8859-2",
  "iso88592",
  "iso_8859-2",
  "iso_8859-2:1987",
  "l2",
  "latin2",
  // documented but incorrect defined term
  "iso-ir 101",
];

const ISO_IR_109_NAMES: &[&str] = &[
  "csisolatin3",
  "iso-8859-3",
  "iso-ir-109",
  "iso8859-3",
  "iso88593",
  "iso_8859-3",
  "iso_8859-3:1988",
  "l3",
  "latin3",
  // documented but incorrect defined term
  "iso-ir 109",
];

const ISO_IR_110_NAMES: &[&str] = &[
  "csisolatin4",
  "iso-8859-4",
  "iso-ir-110",
  "iso8859-4",
  "iso88594",
  "iso_8859-4",
  "iso_8859-4:1988",
  "l4",
  "latin4",
  // documented but incorrect defined term
  "iso-ir 110",
];

const ISO_IR_144_NAMES: &[&str] = &[
  "csisolatincyrillic",
  "cyrillic",
  "iso-8859-5",
  "iso-ir-144",
  "iso8859-5",
  "iso88595",
  "iso_8859-5",
  "iso_8859-5:1988",
  // documented but incorrect defined term
  "iso-ir 144",
];

const ISO_IR_127_NAMES: &[&str] = &[
  "arabic",
  "asmo-708",
  "csiso88596e",
  "csiso88596i",
  "csisolatinarabic",
  "ecma-114",
  "iso-8859-6",
  "iso-8859-6-e",
  "iso-8859-6-i",
  "iso-ir-127",
  "iso8859-6",
  "iso88596",
  "iso_8859-6",
  "iso_8859-6:1987",
  // documented but incorrect defined term
  "iso-ir 127",
];

const ISO_IR_126_NAMES: &[&str] = &[
  "csisolatingreek",
  "ecma-118",
  "elot_928",
  "greek",
  "greek8",
  "iso-8859-7",
  "iso-ir-126",
  "iso8859-7",
  "iso88597",
  "iso_8859-7",
  "iso_8859-7:1987",
  "sun_eu_greek",
  // documented but incorrect defined term
  "iso-ir 126",
];

const ISO_IR_138_NAMES: &[&str] = &[
  "csiso88598e",
  "csisolatinhebrew",
  "hebrew",
  "iso-8859-8",
  "iso-8859-8-e",
  "iso-ir-138",
  "iso8859-8",
  "iso88598",
  "iso_8859-8",
  "iso_8859-8:1988",
  // documented but incorrect defined term
  "iso-ir 138",
];

const ISO_IR_148_NAMES: &[&str] = &[
  "csisolatin5",
  "iso-8859-9",
  "iso-ir-148",
  "iso8859-9",
  "iso88599",
  "iso_8859-9",
  "iso_8859-9:1989",
  "l5",
  "latin5",
  // documented but incorrect defined term
  "iso-ir 148",
];

const ISO_IR_166_NAMES: &[&str] = &[
  "dos-874",
  "iso-8859-11",
  "iso-ir-166",
  "iso8859-11",
  "iso885911",
  "tis-620",
];

const ISO_IR_13_NAMES: &[&str] =
  &["iso-ir-13", "iso-ir-14", "jis_x0201", "x0201"];

const ISO_2022_NAMES: &[&str] = &["iso-2022"];

const LATIN6_NAMES: &[&str] = &[
  "csisolatin6",
  "iso-8859-10",
  "iso-ir-157",
  "iso8859-10",
  "iso885910",
  "iso_8859-10",
  "l6",
  "latin6",
];

const LATIN7_NAMES: &[&str] = &[
  "csisolatin7",
  "iso-8859-13",
  "iso-ir-179",
  "iso8859-13",
  "iso885913",
  "iso_8859-13",
  "l7",
  "latin7",
];

const LATIN8_NAMES: &[&str] = &[
  "csisolatin8",
  "iso-8859-14",
  "iso-ir-199",
  "iso8859-14",
  "iso885914",
  "iso_8859-14",
  "l8",
  "latin8",
];

const LATIN9_NAMES: &[&str] = &[
  "csisolatin9",
  "iso-8859-15",
  "iso-ir-203",
  "iso8859-15",
  "iso885915",
  "iso_8859-15",
  "l9",
  "latin9",
];

const LATIN10_NAMES: &[&str] = &[
  "csisolatin10",
  "iso-8859-16",
  "iso-ir-226",
  "iso8859-16",
  "iso885916",
  "iso_8859-16",
  "l10",
  "latin10",
];

const ISO_IR_192_NAMES: &[&str] = &[
  "iso-ir-192",
  "unicode-1-1-utf-8",
  "utf-8",
  "utf8",
  // documented but incorrect defined term
  "iso 2022 ir 192",
];

const GB18030_NAMES: &[&str] = &["gb18030"];

const GBK_NAMES: &[&str] = &[
  "chinese",
  "gbk",
  "x-gbk",
  // documented but incorrect defined term
  "iso 2022 gbk",
];

const ISO_IR_58_NAMES: &[&str] = &[
  "csgb2312",
  "csiso58gb231280",
  "gb2312",
  "gb_2312",
  "gb_2312-80",
  "iso-ir-58",
  // documented but incorrect defined term
  "iso 2022 gb2312",
];

const EUCKR_NAMES: &[&str] = &["cseuckr", "euc-kr", "windows-949"];

const ISO_IR_149_NAMES: &[&str] = &[
  "csksc56011987",
  "iso-ir-149",
  "iso_ir 149",
  "korean",
  "ks_c_5601-1987",
  "ks_c_5601-1989",
  "ksc5601",
  "ksc_5601",
];

const ISO_IR_87_NAMES: &[&str] =
  &["csiso2022jp", "iso-2022-jp", "iso-ir-87", "iso2022_jp", "jis"];

const ISO_IR_159_NAMES: &[&str] = &[
  "iso-2022-jp-1",
  "iso-2022-jp-2",
  "iso-ir-159",
  "iso2022_jp_1",
  "iso2022_jp_2",
];

const CP874_NAMES: &[&str] = &["windows-874"];
const CP1250_NAMES: &[&str] = &["cp1250", "windows-1250", "x-cp1250"];
const CP1251_NAMES: &[&str] = &["cp1251", "windows-1251", "x-cp1251"];
const CP1252_NAMES: &[&str] = &["cp1252", "windows-1252", "x-cp1252"];
const CP1253_NAMES: &[&str] = &["cp1253", "windows-1253", "x-cp1253"];
const CP1254_NAMES: &[&str] = &["cp1254", "windows-1254", "x-cp1254"];
const CP1255_NAMES: &[&str] = &["cp1255", "windows-1255", "x-cp1255"];
const CP1256_NAMES: &[&str] = &["cp1256", "windows-1256", "x-cp1256"];
const CP1257_NAMES: &[&str] = &["cp1257", "windows-1257", "x-cp1257"];
const CP1258_NAMES: &[&str] = &["cp1258", "windows-1258", "x-cp1258"];

const BIG5_NAMES: &[&str] = &[
  "b5",
  "big5",
  "big5-eten",
  "cn-big5",
  "csbig5",
  "x-x-big5",
  // documented but incorrect defined terms
  "iso 2022 b5",
  "iso 2022 big5",
];

const SJIS_NAMES: &[&str] = &[
  "csshiftjis",
  "ms932",
  "ms_kanji",
  "shift-jis",
  "shift_jis",
  "sjis",
  "windows-31j",
  "x-sjis",
];

const EUCJP_NAMES: &[&str] = &["cseucpkdfmtjapanese", "euc-jp", "x-euc-jp"];

const KOI8_NAMES: &[&str] = &["koi", "koi8"];

/// The character sets defined by the DICOM standard, plus the additional
/// sets that turn up in legacy files. Rows with an escape code are also
/// consulted when resolving ISO 2022 designation sequences.
///
pub(crate) static CHARSETS: &[CharsetInfo] = &[
  // the default character set
  CharsetInfo {
    key: CharacterSet::ISO_IR_6,
    flags: 0,
    defined_term: "ISO_IR 6",
    defined_term_ext: "ISO 2022 IR 6",
    escape_code: "",
    names: ISO_IR_6_NAMES,
  },
  // the ISO 8859 character sets, designated to G1
  CharsetInfo {
    key: CharacterSet::ISO_IR_100,
    flags: 0,
    defined_term: "ISO_IR 100",
    defined_term_ext: "ISO 2022 IR 100",
    escape_code: "-A",
    names: ISO_IR_100_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_101,
    flags: 0,
    defined_term: "ISO_IR 101",
    defined_term_ext: "ISO 2022 IR 101",
    escape_code: "-B",
    names: ISO_IR_101_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_109,
    flags: 0,
    defined_term: "ISO_IR 109",
    defined_term_ext: "ISO 2022 IR 109",
    escape_code: "-C",
    names: ISO_IR_109_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_110,
    flags: 0,
    defined_term: "ISO_IR 110",
    defined_term_ext: "ISO 2022 IR 110",
    escape_code: "-D",
    names: ISO_IR_110_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_144,
    flags: 0,
    defined_term: "ISO_IR 144",
    defined_term_ext: "ISO 2022 IR 144",
    escape_code: "-L",
    names: ISO_IR_144_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_127,
    flags: 0,
    defined_term: "ISO_IR 127",
    defined_term_ext: "ISO 2022 IR 127",
    escape_code: "-G",
    names: ISO_IR_127_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_126,
    flags: 0,
    defined_term: "ISO_IR 126",
    defined_term_ext: "ISO 2022 IR 126",
    escape_code: "-F",
    names: ISO_IR_126_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_138,
    flags: 0,
    defined_term: "ISO_IR 138",
    defined_term_ext: "ISO 2022 IR 138",
    escape_code: "-H",
    names: ISO_IR_138_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_148,
    flags: 0,
    defined_term: "ISO_IR 148",
    defined_term_ext: "ISO 2022 IR 148",
    escape_code: "-M",
    names: ISO_IR_148_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_166,
    flags: 0,
    defined_term: "ISO_IR 166",
    defined_term_ext: "ISO 2022 IR 166",
    escape_code: "-T",
    names: ISO_IR_166_NAMES,
  },
  // the ISO 2022 encodings of JIS
  CharsetInfo {
    key: CharacterSet::ISO_IR_13,
    flags: 0,
    defined_term: "ISO_IR 13",
    defined_term_ext: "ISO 2022 IR 13",
    escape_code: ")I", // katakana in G1
    names: ISO_IR_13_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_13,
    flags: 0,
    defined_term: "ISO_IR 14",
    defined_term_ext: "ISO 2022 IR 14",
    escape_code: "(J", // romaji
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_13,
    flags: 0,
    defined_term: "ISO_IR 14",
    defined_term_ext: "ISO 2022 IR 14",
    escape_code: "(H", // obsolete escape code
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_6,
    flags: 0,
    defined_term: "ISO_IR 6",
    defined_term_ext: "ISO 2022 IR 6",
    escape_code: "(B",
    names: ISO_2022_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_13,
    flags: 0,
    defined_term: "ISO_IR 13",
    defined_term_ext: "ISO 2022 IR 13",
    escape_code: "(I", // katakana in G0
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_87,
    flags: 2,
    defined_term: "ISO_IR 87",
    defined_term_ext: "ISO 2022 IR 87",
    escape_code: "$B",
    names: ISO_IR_87_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_87,
    flags: 2,
    defined_term: "ISO_IR 87",
    defined_term_ext: "ISO 2022 IR 87",
    escape_code: "$@", // obsolete escape code
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_159,
    flags: 2,
    defined_term: "ISO_IR 159",
    defined_term_ext: "ISO 2022 IR 159",
    escape_code: "$(D",
    names: ISO_IR_159_NAMES,
  },
  // other character sets usable with ISO 2022
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_58,
    flags: 1,
    defined_term: "ISO_IR 58",
    defined_term_ext: "ISO 2022 IR 58",
    escape_code: "$A", // GB 2312 in G0
    names: ISO_IR_58_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_58,
    flags: 1,
    defined_term: "ISO_IR 58",
    defined_term_ext: "ISO 2022 IR 58",
    escape_code: "$(A", // compatible escape code
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::X_GB2312,
    flags: 1,
    defined_term: "ISO_IR 58",
    defined_term_ext: "ISO 2022 IR 58",
    escape_code: "$)A", // GB 2312 in G1
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::ISO_2022_IR_149,
    flags: 1,
    defined_term: "ISO_IR 149",
    defined_term_ext: "ISO 2022 IR 149",
    escape_code: "$(C", // KS X 1001 in G0
    names: ISO_IR_149_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_EUCKR,
    flags: 1,
    defined_term: "ISO_IR 149",
    defined_term_ext: "ISO 2022 IR 149",
    escape_code: "$)C", // KS X 1001 in G1
    names: EUCKR_NAMES,
  },
  // character sets that go into G2 for iso-2022-jp-2
  CharsetInfo {
    key: CharacterSet::ISO_IR_100,
    flags: 0,
    defined_term: "ISO_IR 100",
    defined_term_ext: "ISO 2022 IR 100",
    escape_code: ".A",
    names: ISO_IR_100_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::ISO_IR_126,
    flags: 0,
    defined_term: "ISO_IR 126",
    defined_term_ext: "ISO 2022 IR 126",
    escape_code: ".F",
    names: ISO_IR_126_NAMES,
  },
  // character sets that are not ISO 2022
  CharsetInfo {
    key: CharacterSet::ISO_IR_192,
    flags: 0,
    defined_term: "ISO_IR 192",
    defined_term_ext: "",
    escape_code: "%/I",
    names: ISO_IR_192_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::GB18030,
    flags: 0,
    defined_term: "GB18030",
    defined_term_ext: "",
    escape_code: "",
    names: GB18030_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::GBK,
    flags: 0,
    defined_term: "GBK",
    defined_term_ext: "",
    escape_code: "",
    names: GBK_NAMES,
  },
  // the remainder are not DICOM standard, except for latin9 which the
  // standard added as ISO_IR 203
  CharsetInfo {
    key: CharacterSet::X_LATIN9,
    flags: 0,
    defined_term: "ISO_IR 203",
    defined_term_ext: "ISO 2022 IR 203",
    escape_code: "-b",
    names: &[],
  },
  CharsetInfo {
    key: CharacterSet::X_LATIN6,
    flags: 0,
    defined_term: "latin6",
    defined_term_ext: "",
    escape_code: "-V",
    names: LATIN6_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_LATIN7,
    flags: 0,
    defined_term: "latin7",
    defined_term_ext: "",
    escape_code: "-Y",
    names: LATIN7_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_LATIN8,
    flags: 0,
    defined_term: "latin8",
    defined_term_ext: "",
    escape_code: "-_",
    names: LATIN8_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_LATIN9,
    flags: 0,
    defined_term: "latin9",
    defined_term_ext: "",
    escape_code: "-b",
    names: LATIN9_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_LATIN10,
    flags: 0,
    defined_term: "latin10",
    defined_term_ext: "",
    escape_code: "-f",
    names: LATIN10_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP874,
    flags: 0,
    defined_term: "cp874",
    defined_term_ext: "",
    escape_code: "",
    names: CP874_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1250,
    flags: 0,
    defined_term: "cp1250",
    defined_term_ext: "",
    escape_code: "",
    names: CP1250_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1251,
    flags: 0,
    defined_term: "cp1251",
    defined_term_ext: "",
    escape_code: "",
    names: CP1251_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1252,
    flags: 0,
    defined_term: "cp1252",
    defined_term_ext: "",
    escape_code: "",
    names: CP1252_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1253,
    flags: 0,
    defined_term: "cp1253",
    defined_term_ext: "",
    escape_code: "",
    names: CP1253_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1254,
    flags: 0,
    defined_term: "cp1254",
    defined_term_ext: "",
    escape_code: "",
    names: CP1254_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1255,
    flags: 0,
    defined_term: "cp1255",
    defined_term_ext: "",
    escape_code: "",
    names: CP1255_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1256,
    flags: 0,
    defined_term: "cp1256",
    defined_term_ext: "",
    escape_code: "",
    names: CP1256_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1257,
    flags: 0,
    defined_term: "cp1257",
    defined_term_ext: "",
    escape_code: "",
    names: CP1257_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_CP1258,
    flags: 0,
    defined_term: "cp1258",
    defined_term_ext: "",
    escape_code: "",
    names: CP1258_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_BIG5,
    flags: 0,
    defined_term: "big5",
    defined_term_ext: "",
    escape_code: "",
    names: BIG5_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_SJIS,
    flags: 0,
    defined_term: "sjis",
    defined_term_ext: "",
    escape_code: "",
    names: SJIS_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_EUCJP,
    flags: 0,
    defined_term: "euc-jp",
    defined_term_ext: "",
    escape_code: "",
    names: EUCJP_NAMES,
  },
  CharsetInfo {
    key: CharacterSet::X_KOI8,
    flags: 0,
    defined_term: "koi8",
    defined_term_ext: "",
    escape_code: "",
    names: KOI8_NAMES,
  },
];
