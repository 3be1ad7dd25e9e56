//! Document model handed to the writer.
//!
//! A document is an ordered list of typed text elements plus three optional
//! metadata strings. Missing values are rendered as empty strings, so no
//! document is ever rejected.

use std::fmt;

/// Kind of a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// First level heading (`# ...`)
    Heading1,
    /// Second level heading (`## ...`)
    Heading2,
    /// Body text
    Paragraph,
}

impl ElementKind {
    /// Prefix written in front of the element's text on the page.
    pub fn prefix(&self) -> &'static str {
        match self {
            ElementKind::Heading1 => "H1",
            ElementKind::Heading2 => "H2",
            ElementKind::Paragraph => "PARAGRAPH",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single typed element of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentElement {
    /// Element kind
    pub kind: ElementKind,
    /// Element text, if any
    pub content: Option<String>,
}

impl DocumentElement {
    /// Create an element with the given kind and text.
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: Some(content.into()),
        }
    }

    /// Create a first level heading.
    pub fn heading1(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Heading1, content)
    }

    /// Create a second level heading.
    pub fn heading2(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Heading2, content)
    }

    /// Create a paragraph.
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Paragraph, content)
    }

    /// Element text, empty when absent.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// The line shown on the page for this element, e.g. `H1: Intro`.
    pub fn text_line(&self) -> String {
        format!("{}: {}", self.kind.prefix(), self.content())
    }
}

/// A document ready to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Student identifier
    pub student_id: Option<String>,
    /// Elements in reading order
    pub elements: Vec<DocumentElement>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the student identifier.
    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    /// Append an element.
    pub fn push(&mut self, element: DocumentElement) {
        self.elements.push(element);
    }

    /// Title, empty when absent.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Author, empty when absent.
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    /// Student identifier, empty when absent.
    pub fn student_id(&self) -> &str {
        self.student_id.as_deref().unwrap_or("")
    }

    /// Logical text lines in page order.
    ///
    /// The three metadata lines come first, followed by a blank separator
    /// line and then one line per element.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.elements.len() + 4);
        lines.push(format!("Title: {}", self.title()));
        lines.push(format!("Author: {}", self.author()));
        lines.push(format!("Student ID: {}", self.student_id()));
        lines.push(String::new());
        lines.extend(self.elements.iter().map(DocumentElement::text_line));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(ElementKind::Heading1.prefix(), "H1");
        assert_eq!(ElementKind::Heading2.prefix(), "H2");
        assert_eq!(ElementKind::Paragraph.prefix(), "PARAGRAPH");
        assert_eq!(ElementKind::Paragraph.to_string(), "PARAGRAPH");
    }

    #[test]
    fn test_text_lines_order() {
        let mut doc = Document::new()
            .with_title("Report")
            .with_author("A. Student")
            .with_student_id("S123");
        doc.push(DocumentElement::heading1("Intro"));
        doc.push(DocumentElement::paragraph("Body text."));

        assert_eq!(
            doc.text_lines(),
            vec![
                "Title: Report",
                "Author: A. Student",
                "Student ID: S123",
                "",
                "H1: Intro",
                "PARAGRAPH: Body text.",
            ]
        );
    }

    #[test]
    fn test_missing_values_are_empty() {
        let mut doc = Document::new();
        doc.push(DocumentElement {
            kind: ElementKind::Heading2,
            content: None,
        });

        let lines = doc.text_lines();
        assert_eq!(lines[0], "Title: ");
        assert_eq!(lines[1], "Author: ");
        assert_eq!(lines[2], "Student ID: ");
        assert_eq!(lines[4], "H2: ");
    }
}
