//! `$DWGCODEPAGE` to legacy 8-bit encoding mapping.
//!
//! Lines that are not valid UTF-8 are decoded with a legacy encoding. The
//! drawing header usually names one; this module turns that name into an
//! `encoding_rs` encoding.

use encoding_rs::Encoding;

/// Legacy encoding used when neither the caller nor the drawing names one.
pub const DEFAULT_FALLBACK_ENCODING: &Encoding = encoding_rs::WINDOWS_1252;

/// Look up the legacy encoding declared by a DXF code page string.
///
/// Returns `None` for UTF-8/ASCII declarations (nothing to switch to) and for
/// names that are not recognized, in which case the reader keeps its current
/// fallback.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.trim().to_ascii_lowercase().as_str() {
        "ansi_1250" | "dos852" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" | "dos850" | "dos860" | "dos861" | "dos863" | "dos865" | "iso8859-1"
        | "iso_8859-1" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" | "dos869" => Some(encoding_rs::WINDOWS_1253),
        // Turkish drawings: DOS857 has no encoding_rs table, 1254 covers the same letters
        "ansi_1254" | "dos857" | "iso8859-9" | "iso_8859-9" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),
        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "dos855" | "dos866" | "dos437" => Some(encoding_rs::IBM866),
        "iso8859-2" | "iso_8859-2" => Some(encoding_rs::ISO_8859_2),
        "iso8859-3" | "iso_8859-3" => Some(encoding_rs::ISO_8859_3),
        "iso8859-4" | "iso_8859-4" => Some(encoding_rs::ISO_8859_4),
        "iso8859-5" | "iso_8859-5" => Some(encoding_rs::ISO_8859_5),
        "iso8859-6" | "iso_8859-6" => Some(encoding_rs::ISO_8859_6),
        "iso8859-7" | "iso_8859-7" => Some(encoding_rs::ISO_8859_7),
        "iso8859-8" | "iso_8859-8" => Some(encoding_rs::ISO_8859_8),
        "iso8859-10" | "iso_8859-10" => Some(encoding_rs::ISO_8859_10),
        "iso8859-13" | "iso_8859-13" => Some(encoding_rs::ISO_8859_13),
        "iso8859-14" | "iso_8859-14" => Some(encoding_rs::ISO_8859_14),
        "iso8859-15" | "iso_8859-15" => Some(encoding_rs::ISO_8859_15),
        "koi8-r" => Some(encoding_rs::KOI8_R),
        "koi8-u" => Some(encoding_rs::KOI8_U),
        "gb2312" | "ansi_936" => Some(encoding_rs::GBK),
        "big5" | "ansi_950" => Some(encoding_rs::BIG5),
        "korean" | "ansi_949" | "johab" => Some(encoding_rs::EUC_KR),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),
        _ => None,
    }
}

/// Resolve a user-supplied encoding name.
///
/// DXF code page names are tried first, then WHATWG labels such as
/// `windows-1254` or `latin1`. UTF-8 labels resolve to `None` because
/// UTF-8 is always attempted before the fallback.
pub fn resolve_encoding_name(name: &str) -> Option<&'static Encoding> {
    encoding_from_code_page(name).or_else(|| {
        Encoding::for_label(name.trim().as_bytes()).filter(|enc| *enc != encoding_rs::UTF_8)
    })
}
