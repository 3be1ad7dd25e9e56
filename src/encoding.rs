//! Single-byte text encoding for PDF output.
//!
//! Every byte the writer emits is produced through this module so that the
//! byte count used for offsets and `/Length` is the byte count on disk.
//! Text is encoded as ISO-8859-1: code points up to U+00FF map to the byte
//! with the same value, anything else becomes `?`.

/// Byte used for characters outside Latin-1.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Encode a single character as one Latin-1 byte.
pub fn latin1_byte(ch: char) -> u8 {
    let codepoint = ch as u32;
    if codepoint <= 0xFF {
        codepoint as u8
    } else {
        REPLACEMENT_BYTE
    }
}

/// Encode a string as Latin-1, one byte per character.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars().map(latin1_byte).collect()
}
