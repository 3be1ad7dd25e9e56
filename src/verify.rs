//! Structural verification of written files.
//!
//! Re-reads the emitted bytes the way a strict reader would: follows
//! `startxref` to the xref table, then checks every recorded offset against
//! an independent scan for `N G obj` headers and every stream `/Length`
//! against the bytes actually between `stream` and `endstream`.

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::xref::{find_xref_offset, parse_xref};
use lazy_static::lazy_static;
use regex::bytes::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// Object headers at the start of a line
    static ref RE_OBJ_HEADER: Regex = Regex::new(r"(?m)^(\d+) (\d+) obj\b").unwrap();

    /// `/Size` entry of the trailer dictionary
    static ref RE_TRAILER_SIZE: Regex = Regex::new(r"/Size (\d+)").unwrap();

    /// `/Root` reference of the trailer dictionary
    static ref RE_TRAILER_ROOT: Regex = Regex::new(r"/Root (\d+) (\d+) R").unwrap();

    /// `/Length` entry of a stream dictionary
    static ref RE_LENGTH: Regex = Regex::new(r"/Length (\d+)").unwrap();
}

/// Summary of a file that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    /// Version from the `%PDF-x.y` header
    pub version: String,
    /// Byte offset of the `xref` keyword
    pub xref_offset: u64,
    /// Trailer `/Size`
    pub size: u32,
    /// Trailer `/Root`
    pub root: ObjectRef,
    /// Offsets of in-use objects, by object number
    pub objects: BTreeMap<u32, u64>,
    /// Declared (and checked) stream lengths, by object number
    pub stream_lengths: BTreeMap<u32, usize>,
}

impl StructureReport {
    /// Number of in-use objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Verify the structure of a complete PDF file.
///
/// # Errors
///
/// - `Error::InvalidHeader` if the file does not start with `%PDF-`
/// - `Error::InvalidXref` if `startxref` does not lead to an xref table
/// - `Error::ParseError` for malformed xref entries
/// - `Error::OffsetMismatch` if an object is not where the xref says
/// - `Error::LengthMismatch` if a stream's `/Length` is wrong
/// - `Error::InvalidPdf` for a bad trailer, unindexed objects or a missing `%%EOF`
pub fn verify(bytes: &[u8]) -> Result<StructureReport> {
    let version = parse_header(bytes)?;

    if !trim_end(bytes).ends_with(b"%%EOF") {
        return Err(Error::InvalidPdf("file does not end with %%EOF".to_string()));
    }

    let xref_offset = find_xref_offset(bytes)?;
    let xref = parse_xref(bytes, xref_offset)?;
    let body_end = xref_offset as usize;

    let mut found: BTreeMap<u32, u64> = BTreeMap::new();
    for caps in RE_OBJ_HEADER.captures_iter(&bytes[..body_end]) {
        let id = capture_number::<u32>(&caps, 1)?;
        let start = caps.get(0).map_or(0, |m| m.start()) as u64;
        found.entry(id).or_insert(start);
    }
    log::debug!("Scan found {} object headers before xref", found.len());

    let mut objects = BTreeMap::new();
    for (id, entry) in xref.entries().filter(|(_, e)| e.in_use()) {
        match found.get(&id) {
            Some(&actual) if actual == entry.offset => {
                objects.insert(id, actual);
            },
            actual => {
                return Err(Error::OffsetMismatch {
                    id,
                    recorded: entry.offset,
                    actual: actual.copied(),
                })
            },
        }
    }
    if let Some(extra) = found.keys().find(|id| !objects.contains_key(id)) {
        return Err(Error::InvalidPdf(format!(
            "object {} is not indexed by the xref table",
            extra
        )));
    }

    let (size, root) = parse_trailer(bytes, body_end)?;
    if size != xref.size() {
        return Err(Error::InvalidPdf(format!(
            "trailer /Size {} but xref has {} entries",
            size,
            xref.size()
        )));
    }
    if !objects.contains_key(&root.id) {
        return Err(Error::InvalidPdf(format!("trailer /Root {} is not an object", root)));
    }

    let stream_lengths = check_streams(bytes, &objects, body_end)?;

    log::debug!(
        "Verified {} objects and {} streams",
        objects.len(),
        stream_lengths.len()
    );

    Ok(StructureReport {
        version,
        xref_offset,
        size,
        root,
        objects,
        stream_lengths,
    })
}

fn parse_header(bytes: &[u8]) -> Result<String> {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let version = first_line
        .strip_prefix(b"%PDF-")
        .ok_or_else(|| Error::InvalidHeader(String::from_utf8_lossy(first_line).into_owned()))?;
    Ok(std::str::from_utf8(version)?.trim_end().to_string())
}

fn parse_trailer(bytes: &[u8], xref_offset: usize) -> Result<(u32, ObjectRef)> {
    let tail = &bytes[xref_offset..];
    let trailer_start = find(tail, b"trailer")
        .ok_or_else(|| Error::InvalidPdf("missing trailer".to_string()))?;
    let trailer = &tail[trailer_start..];

    let size = RE_TRAILER_SIZE
        .captures(trailer)
        .ok_or_else(|| Error::InvalidPdf("trailer has no /Size".to_string()))
        .and_then(|caps| capture_number::<u32>(&caps, 1))?;
    let root = RE_TRAILER_ROOT
        .captures(trailer)
        .ok_or_else(|| Error::InvalidPdf("trailer has no /Root".to_string()))
        .and_then(|caps| {
            Ok(ObjectRef::new(
                capture_number::<u32>(&caps, 1)?,
                capture_number::<u16>(&caps, 2)?,
            ))
        })?;

    Ok((size, root))
}

/// Check `/Length` of every stream object.
///
/// An object's bytes run from its offset to the next object (or the xref).
fn check_streams(
    bytes: &[u8],
    objects: &BTreeMap<u32, u64>,
    body_end: usize,
) -> Result<BTreeMap<u32, usize>> {
    let mut starts: Vec<(usize, u32)> = objects
        .iter()
        .map(|(id, off)| (*off as usize, *id))
        .collect();
    starts.sort_unstable();

    let mut lengths = BTreeMap::new();
    for (i, &(start, id)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(body_end, |(next, _)| *next);
        let object = &bytes[start..end];

        let Some(stream_kw) = find(object, b"stream\n") else {
            continue;
        };
        let data_start = stream_kw + b"stream\n".len();
        let data_end = rfind(object, b"\nendstream")
            .filter(|&e| e >= data_start)
            .ok_or_else(|| Error::ParseError {
                offset: start + stream_kw,
                reason: format!("stream in object {} has no endstream", id),
            })?;

        let declared = RE_LENGTH
            .captures(&object[..stream_kw])
            .ok_or_else(|| Error::ParseError {
                offset: start,
                reason: format!("stream in object {} has no /Length", id),
            })
            .and_then(|caps| capture_number::<usize>(&caps, 1))?;
        let actual = data_end - data_start;

        if declared != actual {
            return Err(Error::LengthMismatch {
                id,
                declared,
                actual,
            });
        }
        lengths.insert(id, declared);
    }
    Ok(lengths)
}

fn capture_number<T: std::str::FromStr>(caps: &regex::bytes::Captures<'_>, group: usize) -> Result<T> {
    let m = caps
        .get(group)
        .ok_or_else(|| Error::InvalidPdf(format!("missing capture group {}", group)))?;
    std::str::from_utf8(m.as_bytes())?
        .parse()
        .map_err(|_| Error::ParseError {
            offset: m.start(),
            reason: "number out of range".to_string(),
        })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentElement};
    use crate::writer::PdfWriter;

    fn sample() -> Vec<u8> {
        let mut doc = Document::new()
            .with_title("Report")
            .with_author("A. Student")
            .with_student_id("S123");
        doc.push(DocumentElement::heading1("Intro"));
        doc.push(DocumentElement::paragraph("Some (parenthesised) text"));
        PdfWriter::new().render(&doc).unwrap()
    }

    fn replace_once(bytes: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
        let pos = find(bytes, from).expect("pattern present");
        let mut out = bytes[..pos].to_vec();
        out.extend_from_slice(to);
        out.extend_from_slice(&bytes[pos + from.len()..]);
        out
    }

    #[test]
    fn test_verify_written_file() {
        let report = verify(&sample()).unwrap();
        assert_eq!(report.version, "1.4");
        assert_eq!(report.size, 6);
        assert_eq!(report.root, ObjectRef::new(1, 0));
        assert_eq!(report.object_count(), 5);
        assert_eq!(report.stream_lengths.keys().copied().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_bad_header() {
        let bytes = replace_once(&sample(), b"%PDF-", b"%PDX-");
        assert!(matches!(verify(&bytes), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_missing_eof() {
        let mut bytes = sample();
        bytes.truncate(bytes.len() - "%%EOF\n".len());
        assert!(matches!(verify(&bytes), Err(Error::InvalidPdf(_))));
    }

    #[test]
    fn test_shifted_object_detected() {
        // One extra byte inside object 1 moves every later object.
        let bytes = replace_once(&sample(), b"/Type /Catalog", b"/Type  /Catalog");
        match verify(&bytes) {
            Err(Error::InvalidXref) | Err(Error::OffsetMismatch { .. }) => {},
            other => panic!("expected an offset failure, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_recorded_offset() {
        let bytes = sample();
        let report = verify(&bytes).unwrap();
        let recorded = format!("{:010} 00000 n ", report.objects[&2]);
        let wrong = format!("{:010} 00000 n ", report.objects[&2] + 1);
        let bytes = replace_once(&bytes, recorded.as_bytes(), wrong.as_bytes());

        match verify(&bytes) {
            Err(Error::OffsetMismatch { id, actual, .. }) => {
                assert_eq!(id, 2);
                assert_eq!(actual, Some(report.objects[&2]));
            },
            other => panic!("expected OffsetMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_stream_length() {
        let bytes = sample();
        let report = verify(&bytes).unwrap();
        let length = report.stream_lengths[&5];
        // Same digit count keeps every offset valid.
        let declared = format!("/Length {}", length);
        let wrong = format!("/Length {}", length + 1);
        assert_eq!(declared.len(), wrong.len());
        let bytes = replace_once(&bytes, declared.as_bytes(), wrong.as_bytes());

        match verify(&bytes) {
            Err(Error::LengthMismatch { id, declared, actual }) => {
                assert_eq!(id, 5);
                assert_eq!(declared, length + 1);
                assert_eq!(actual, length);
            },
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_trailer_size() {
        let bytes = replace_once(&sample(), b"/Size 6", b"/Size 7");
        assert!(matches!(verify(&bytes), Err(Error::InvalidPdf(_))));
    }

    #[test]
    fn test_overflowing_xref_subsection_is_an_error() {
        let bytes = b"%PDF-1.4\nxref\n4294967295 2\n0000000000 65535 f \n\
0000000000 65535 f \ntrailer\n<< /Size 1 >>\nstartxref\n9\n%%EOF\n";
        assert!(matches!(verify(bytes), Err(Error::ParseError { .. })));
    }

    #[test]
    fn test_startxref_not_at_xref() {
        let bytes = sample();
        let offset = find_xref_offset(&bytes).unwrap();
        let from = format!("startxref\n{}\n", offset);
        let to = format!("startxref\n{}\n", offset - 1);
        let bytes = replace_once(&bytes, from.as_bytes(), to.as_bytes());
        assert!(matches!(verify(&bytes), Err(Error::InvalidXref)));
    }
}
