//! Markdown line classifier.
//!
//! Turns a simplified markdown source into a [`Document`]. Only two heading
//! levels are recognized:
//! - `# text` becomes a first level heading; the first one is also the title
//! - `## text` becomes a second level heading
//! - any other non-blank line is paragraph text, consecutive lines joined
//!   with a single space
//! - a blank line ends the current paragraph

use crate::document::{Document, DocumentElement};
use crate::error::Result;
use std::path::Path;

/// Parser for the simplified markdown dialect.
///
/// # Examples
///
/// ```
/// use mdpdf::markdown::MarkdownParser;
///
/// let doc = MarkdownParser::parse("# Report\n\nSome text.", "A. Student", "S123");
/// assert_eq!(doc.title(), "Report");
/// assert_eq!(doc.elements.len(), 2);
/// ```
#[derive(Debug)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Parse markdown source into a document.
    pub fn parse(source: &str, author: &str, student_id: &str) -> Document {
        let mut doc = Document::new()
            .with_author(author)
            .with_student_id(student_id);
        let mut paragraph = String::new();

        for raw in source.lines() {
            let line = raw.trim();

            if line.is_empty() {
                flush_paragraph(&mut doc, &mut paragraph);
                continue;
            }

            if let Some(text) = line.strip_prefix("# ") {
                flush_paragraph(&mut doc, &mut paragraph);
                let text = text.trim();
                if doc.title.is_none() {
                    doc.title = Some(text.to_string());
                }
                doc.push(DocumentElement::heading1(text));
            } else if let Some(text) = line.strip_prefix("## ") {
                flush_paragraph(&mut doc, &mut paragraph);
                doc.push(DocumentElement::heading2(text.trim()));
            } else {
                if !paragraph.is_empty() {
                    paragraph.push(' ');
                }
                paragraph.push_str(line);
            }
        }

        flush_paragraph(&mut doc, &mut paragraph);

        log::debug!(
            "Parsed markdown into {} elements (title: {:?})",
            doc.elements.len(),
            doc.title
        );
        doc
    }

    /// Read and parse a markdown file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse_file(
        path: impl AsRef<Path>,
        author: &str,
        student_id: &str,
    ) -> Result<Document> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        let source = String::from_utf8_lossy(&bytes);
        Ok(Self::parse(&source, author, student_id))
    }
}

/// Move the pending paragraph text, if any, into the document.
fn flush_paragraph(doc: &mut Document, paragraph: &mut String) {
    if !paragraph.is_empty() {
        doc.push(DocumentElement::paragraph(paragraph.trim()));
        paragraph.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;

    fn kinds(doc: &Document) -> Vec<ElementKind> {
        doc.elements.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let source = "# Title\n\nFirst line\nsecond line\n\n## Section\nMore text\n";
        let doc = MarkdownParser::parse(source, "Author", "ID1");

        assert_eq!(doc.title(), "Title");
        assert_eq!(doc.author(), "Author");
        assert_eq!(doc.student_id(), "ID1");
        assert_eq!(
            kinds(&doc),
            vec![
                ElementKind::Heading1,
                ElementKind::Paragraph,
                ElementKind::Heading2,
                ElementKind::Paragraph,
            ]
        );
        assert_eq!(doc.elements[1].content(), "First line second line");
        assert_eq!(doc.elements[3].content(), "More text");
    }

    #[test]
    fn test_first_heading_is_title() {
        let doc = MarkdownParser::parse("# One\n# Two\n", "", "");
        assert_eq!(doc.title(), "One");
        assert_eq!(doc.elements.len(), 2);
    }

    #[test]
    fn test_no_heading_no_title() {
        let doc = MarkdownParser::parse("just text", "", "");
        assert_eq!(doc.title, None);
        assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
    }

    #[test]
    fn test_paragraph_before_heading_keeps_order() {
        let doc = MarkdownParser::parse("intro text\n## Next\n", "", "");
        assert_eq!(kinds(&doc), vec![ElementKind::Paragraph, ElementKind::Heading2]);
        assert_eq!(doc.elements[0].content(), "intro text");
    }

    #[test]
    fn test_deeper_headings_are_text() {
        let doc = MarkdownParser::parse("### Deep\n#NoSpace", "", "");
        assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
        assert_eq!(doc.elements[0].content(), "### Deep #NoSpace");
    }

    #[test]
    fn test_indented_and_crlf_lines() {
        let doc = MarkdownParser::parse("  # Spaced  \r\n\r\n  body  \r\n", "", "");
        assert_eq!(doc.title(), "Spaced");
        assert_eq!(doc.elements[1].content(), "body");
    }

    #[test]
    fn test_empty_source() {
        let doc = MarkdownParser::parse("", "A", "B");
        assert!(doc.elements.is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        let result = MarkdownParser::parse_file("/nonexistent/input.md", "", "");
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
