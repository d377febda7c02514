use log::debug;

use crate::errors::SubtitleError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decode subtitle bytes into text
///
/// UTF-8 is tried first, with a leading byte-order mark removed. The only
/// fallback is UTF-16, whose endianness is taken from its byte-order mark.
pub fn decode_bytes(content: &[u8]) -> Result<String, SubtitleError> {
    let body = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let utf8_error = match std::str::from_utf8(body) {
        Ok(text) => return Ok(text.to_string()),
        Err(e) => e,
    };

    debug!("Content is not UTF-8 ({}), trying UTF-16", utf8_error);

    decode_utf16(content).ok_or_else(|| {
        SubtitleError::DecodeError(format!(
            "not valid UTF-8 (invalid byte at offset {}) and not BOM-marked UTF-16",
            utf8_error.valid_up_to()
        ))
    })
}

fn decode_utf16(content: &[u8]) -> Option<String> {
    let (body, little_endian) = if let Some(rest) = content.strip_prefix(UTF16_LE_BOM) {
        (rest, true)
    } else if let Some(rest) = content.strip_prefix(UTF16_BE_BOM) {
        (rest, false)
    } else {
        return None;
    };

    if body.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).ok()
}
