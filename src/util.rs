use std::borrow::Cow;

use crate::error::{Error, Result};

/// Decode a content document to a string.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, uses the encoding from `<?xml encoding="..."?>`
/// 3. Without a declaration, falls back to Windows-1252 (common in old ebooks)
///
/// A declared encoding that encoding_rs does not know is an error, since the
/// bytes are already known not to be UTF-8. `href` only labels that error.
pub fn decode_text<'a>(bytes: &'a [u8], href: &str) -> Result<Cow<'a, str>> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return Ok(result);
    }

    if let Some(name) = extract_xml_encoding(bytes) {
        let encoding =
            encoding_rs::Encoding::for_label(name.as_bytes()).ok_or_else(|| Error::Parse {
                href: href.to_string(),
                reason: format!("unsupported encoding {name:?}"),
            })?;
        let (result, _, _) = encoding.decode(bytes);
        return Ok(result);
    }

    // Fallback: Windows-1252 (superset of ISO-8859-1)
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    Ok(result)
}

/// Extract encoding from XML declaration.
///
/// Parses `<?xml ... encoding="..." ?>` within the first 100 bytes.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];
    let decl_end = after_xml
        .windows(2)
        .position(|w| w == b"?>")
        .unwrap_or(after_xml.len());
    let decl = &after_xml[..decl_end];

    // Look for encoding="..." or encoding='...'
    let enc_pos = decl
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &decl[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = rest.iter().position(|&b| b == quote)?;
    std::str::from_utf8(&rest[..value_end]).ok()
}
