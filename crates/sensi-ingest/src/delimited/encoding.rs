//! Character encoding resolution and decoding.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::error::{IngestError, Result};

/// Resolves an encoding label.
///
/// Accepts WHATWG labels (`utf-8`, `utf-16le`, `windows-1252`, `latin1`, ...)
/// and the dash-less spellings instrument tooling tends to use (`utf16le`,
/// `ucs2`, `utf16be`).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let normalized = label.trim().to_ascii_lowercase();
    if let Some(encoding) = Encoding::for_label(normalized.as_bytes()) {
        return Ok(encoding);
    }
    match normalized.replace(['-', '_'], "").as_str() {
        "utf16le" | "ucs2" | "utf16" => Ok(UTF_16LE),
        "utf16be" => Ok(UTF_16BE),
        _ => Err(IngestError::UnsupportedEncoding {
            label: label.to_string(),
        }),
    }
}

/// Decodes raw file bytes.
///
/// A byte-order mark takes precedence over `encoding` and is stripped.
/// Returns the text, the encoding actually used, and whether malformed
/// sequences were replaced.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding, bool) {
    let (text, used, had_errors) = encoding.decode(bytes);
    (text.into_owned(), used, had_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    fn utf16le_bytes(text: &str, with_bom: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        if with_bom {
            bytes.extend_from_slice(&[0xFF, 0xFE]);
        }
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_resolve_whatwg_labels() {
        assert_eq!(resolve_encoding("utf-8").unwrap(), UTF_8);
        assert_eq!(resolve_encoding("UTF-16LE").unwrap(), UTF_16LE);
        assert_eq!(resolve_encoding("latin1").unwrap(), WINDOWS_1252);
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_encoding("utf8").unwrap(), UTF_8);
        assert_eq!(resolve_encoding("utf16le").unwrap(), UTF_16LE);
        assert_eq!(resolve_encoding("ucs2").unwrap(), UTF_16LE);
        assert_eq!(resolve_encoding("utf16be").unwrap(), UTF_16BE);
    }

    #[test]
    fn test_resolve_unknown_label() {
        let result = resolve_encoding("klingon");
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding { ref label }) if label == "klingon"
        ));
    }

    #[test]
    fn test_decode_utf16le_without_bom() {
        let bytes = utf16le_bytes("AMP\t1\tS", false);
        let (text, used, had_errors) = decode_bytes(&bytes, UTF_16LE);

        assert_eq!(text, "AMP\t1\tS");
        assert_eq!(used, UTF_16LE);
        assert!(!had_errors);
    }

    #[test]
    fn test_bom_overrides_configured_encoding() {
        let bytes = utf16le_bytes("PEN", true);
        let (text, used, _) = decode_bytes(&bytes, UTF_8);

        assert_eq!(text, "PEN");
        assert_eq!(used, UTF_16LE);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let (text, used, _) = decode_bytes("\u{feff}A,B".as_bytes(), UTF_8);

        assert_eq!(text, "A,B");
        assert_eq!(used, UTF_8);
    }

    #[test]
    fn test_malformed_bytes_are_reported() {
        let (_, _, had_errors) = decode_bytes(&[b'A', 0xFF, b'B'], UTF_8);
        assert!(had_errors);
    }
}
