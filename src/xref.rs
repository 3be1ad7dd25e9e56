//! Cross-reference table.
//!
//! The xref table maps object numbers to byte offsets in the PDF file,
//! enabling random access to PDF objects. Only the traditional table form
//! (PDF 1.0-1.4) is produced and read: one subsection of fixed 20-byte
//! entries `nnnnnnnnnn ggggg n \n`.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::Write;

/// Generation number of the free-list head (object 0).
pub const FREE_HEAD_GENERATION: u16 = 65535;

/// Length in bytes of every xref entry, end-of-line included.
pub const ENTRY_LEN: usize = 20;

/// Cross-reference table entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XRefEntryType {
    /// Entry for a free object
    Free,
    /// Entry for an uncompressed object (traditional)
    Uncompressed,
}

/// Cross-reference table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRefEntry {
    /// Type of entry
    pub entry_type: XRefEntryType,
    /// Byte offset (in use) or next free object number (free)
    pub offset: u64,
    /// Generation number
    pub generation: u16,
}

impl XRefEntry {
    /// Create a new uncompressed entry.
    pub fn uncompressed(offset: u64, generation: u16) -> Self {
        Self {
            entry_type: XRefEntryType::Uncompressed,
            offset,
            generation,
        }
    }

    /// Create a free entry.
    pub fn free(next_free: u64, generation: u16) -> Self {
        Self {
            entry_type: XRefEntryType::Free,
            offset: next_free,
            generation,
        }
    }

    /// Whether the object is in use.
    pub fn in_use(&self) -> bool {
        self.entry_type == XRefEntryType::Uncompressed
    }

    /// Write the entry as one fixed-width 20-byte line.
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let flag = if self.in_use() { 'n' } else { 'f' };
        write!(w, "{:010} {:05} {} \n", self.offset, self.generation, flag)
    }
}

/// Cross-reference table.
///
/// Always contains the free-list head for object 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRefTable {
    entries: BTreeMap<u32, XRefEntry>,
}

impl CrossRefTable {
    /// Create a table holding only the free-list head.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(0, XRefEntry::free(0, FREE_HEAD_GENERATION));
        Self { entries }
    }

    /// Add an entry to the cross-reference table.
    pub fn add_entry(&mut self, object_number: u32, entry: XRefEntry) {
        self.entries.insert(object_number, entry);
    }

    /// Record an in-use object starting at `offset`.
    pub fn record(&mut self, object_number: u32, offset: usize) {
        log::debug!("Object {} starts at byte {}", object_number, offset);
        self.add_entry(object_number, XRefEntry::uncompressed(offset as u64, 0));
    }

    /// Get an entry by object number.
    pub fn get(&self, object_number: u32) -> Option<&XRefEntry> {
        self.entries.get(&object_number)
    }

    /// Entries in ascending object number order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &XRefEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Value for the trailer's `/Size`: highest object number plus one.
    pub fn size(&self) -> u32 {
        self.entries.keys().next_back().map_or(0, |id| id + 1)
    }

    /// Get the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the `xref` section as a single subsection starting at 0.
    ///
    /// Gaps in the numbering are written as free entries.
    pub fn write_table<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let size = self.size();
        writeln!(w, "xref")?;
        writeln!(w, "0 {}", size)?;
        for id in 0..size {
            match self.entries.get(&id) {
                Some(entry) => entry.write_to(w)?,
                None => XRefEntry::free(0, FREE_HEAD_GENERATION).write_to(w)?,
            }
        }
        Ok(())
    }
}

impl Default for CrossRefTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the offset recorded after the last `startxref` keyword.
///
/// # Errors
///
/// Returns `Error::InvalidXref` if the keyword is missing or not followed by
/// a decimal offset.
pub fn find_xref_offset(bytes: &[u8]) -> Result<u64> {
    const KEYWORD: &[u8] = b"startxref";

    let pos = bytes
        .windows(KEYWORD.len())
        .rposition(|w| w == KEYWORD)
        .ok_or(Error::InvalidXref)?;

    let after = &bytes[pos + KEYWORD.len()..];
    let text = std::str::from_utf8(after).map_err(|_| Error::InvalidXref)?;
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .ok_or(Error::InvalidXref)
}

/// Parse a traditional xref table starting at `offset`.
///
/// Entries must be the fixed 20-byte form; anything else is rejected with
/// the byte offset of the offending line.
pub fn parse_xref(bytes: &[u8], offset: u64) -> Result<CrossRefTable> {
    let start = usize::try_from(offset).map_err(|_| Error::InvalidXref)?;
    if start >= bytes.len() {
        return Err(Error::InvalidXref);
    }
    log::debug!("Parsing xref at offset {}", start);

    let mut cursor = LineCursor::new(bytes, start);
    match cursor.next_line() {
        Some((_, b"xref")) => {},
        _ => return Err(Error::InvalidXref),
    }

    let mut xref = CrossRefTable {
        entries: BTreeMap::new(),
    };

    while let Some((line_start, line)) = cursor.next_line() {
        if line.starts_with(b"trailer") {
            return Ok(xref);
        }

        let header = std::str::from_utf8(line)?;
        let mut parts = header.split_whitespace();
        let (first, count) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => (
                parse_number::<u32>(a, line_start)?,
                parse_number::<u32>(b, line_start)?,
            ),
            _ => {
                return Err(Error::ParseError {
                    offset: line_start,
                    reason: format!("expected xref subsection header, found {:?}", header),
                })
            },
        };

        for i in 0..count {
            let entry_start = cursor.position();
            let raw = bytes
                .get(entry_start..entry_start + ENTRY_LEN)
                .ok_or(Error::ParseError {
                    offset: entry_start,
                    reason: "xref entry truncated".to_string(),
                })?;
            let object_number = first.checked_add(i).ok_or_else(|| Error::ParseError {
                offset: entry_start,
                reason: "xref object number out of range".to_string(),
            })?;
            xref.add_entry(object_number, parse_entry(raw, entry_start)?);
            cursor.advance(ENTRY_LEN);
        }
    }

    Err(Error::InvalidXref)
}

/// Parse one 20-byte entry.
fn parse_entry(raw: &[u8], offset: usize) -> Result<XRefEntry> {
    let malformed = |reason: &str| Error::ParseError {
        offset,
        reason: reason.to_string(),
    };

    if raw[10] != b' ' || raw[16] != b' ' || raw[18] != b' ' || raw[19] != b'\n' {
        return Err(malformed("xref entry is not in fixed 20-byte form"));
    }
    let field_offset = std::str::from_utf8(&raw[0..10])?;
    let field_gen = std::str::from_utf8(&raw[11..16])?;
    let value: u64 = parse_number(field_offset, offset)?;
    let generation: u16 = parse_number(field_gen, offset)?;

    match raw[17] {
        b'n' => Ok(XRefEntry::uncompressed(value, generation)),
        b'f' => Ok(XRefEntry::free(value, generation)),
        _ => Err(malformed("xref entry flag must be 'n' or 'f'")),
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, offset: usize) -> Result<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::ParseError {
            offset,
            reason: format!("expected a decimal number, found {:?}", text),
        });
    }
    text.parse().map_err(|_| Error::ParseError {
        offset,
        reason: format!("number out of range: {}", text),
    })
}

/// Minimal forward line reader over a byte buffer.
struct LineCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Next line without its end-of-line marker, with the line's start offset.
    fn next_line(&mut self) -> Option<(usize, &'a [u8])> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.bytes[start..];
        let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        self.pos = start + end + 1;

        let mut line = &rest[..end];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        Some((start, line))
    }
}
