//! PDF content stream builder.
//!
//! Builds the text operators for a page according to PDF specification
//! ISO 32000-1:2008 Section 9.4 (text objects).

use crate::config::LayoutConfig;
use crate::encoding::{encode_latin1, latin1_byte};
use crate::error::Result;
use crate::text::wrap_line;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text leading (TL)
    SetTextLeading(f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Move to next line (T*)
    NextLine,
}

/// Builder for PDF content streams.
///
/// Collects operations and serializes them to single-byte encoded bytes,
/// one operator per line with no trailing newline.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
    /// Number of lines shown so far
    shown_lines: usize,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out text lines on a single page.
    ///
    /// Each line is word-wrapped to `config.wrap_width` and every segment is
    /// shown on its own line. Once `config.max_lines` segments are shown the
    /// rest of the text is dropped; the page never overflows.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], config: &LayoutConfig) -> Self {
        let mut builder = Self::new();
        builder
            .begin_text()
            .set_font(&config.font_resource, config.font_size)
            .set_leading(config.leading)
            .move_text(config.origin.0, config.origin.1);

        let mut truncated = false;
        'lines: for line in lines {
            for segment in wrap_line(line.as_ref(), config.wrap_width) {
                if builder.shown_lines >= config.max_lines {
                    truncated = true;
                    break 'lines;
                }
                builder.show_line(&segment);
            }
        }

        if truncated {
            log::warn!(
                "Page holds {} lines; remaining text was dropped",
                config.max_lines
            );
        }
        log::debug!("Laid out {} lines from {} text lines", builder.shown_lines, lines.len());

        builder.end_text();
        builder
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(font_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(font_name.to_string(), size));
            self.current_font = Some(font_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Set the distance between baselines used by `T*`.
    pub fn set_leading(&mut self, leading: f32) -> &mut Self {
        self.op(ContentStreamOp::SetTextLeading(leading))
    }

    /// Move the text position.
    pub fn move_text(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Show one line of text and advance to the next line.
    pub fn show_line(&mut self, text: &str) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::ShowText(text.to_string()));
        self.op(ContentStreamOp::NextLine);
        self.shown_lines += 1;
        self
    }

    /// Number of lines shown so far.
    pub fn shown_lines(&self) -> usize {
        self.shown_lines
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                writeln!(buf)?;
            }
            self.write_op(&mut buf, op)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => {
                write!(w, "/")?;
                w.write_all(&encode_latin1(name))?;
                write!(w, " {} Tf", size)
            },
            ContentStreamOp::SetTextLeading(leading) => write!(w, "{} TL", leading),
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", tx, ty),
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                write_escaped_string(w, text)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::NextLine => write!(w, "T*"),
        }
    }
}

/// Write text as the body of a PDF literal string.
///
/// `(`, `)` and `\` are escaped with a backslash and carriage returns are
/// dropped. Every other character is written as one Latin-1 byte.
pub fn write_escaped_string<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => w.write_all(&[b'\\', ch as u8])?,
            '\r' => {},
            _ => w.write_all(&[latin1_byte(ch)])?,
        }
    }
    Ok(())
}

/// Escape text for a PDF literal string, returning the encoded bytes.
pub fn escape_pdf_string(text: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(text.len() + 16);
    // Writing into a Vec cannot fail
    let _ = write_escaped_string(&mut buf, text);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(builder: &ContentStreamBuilder) -> String {
        String::from_utf8_lossy(&builder.build().unwrap()).to_string()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .show_line("Hello, World!")
            .end_text();

        assert_eq!(content_of(&builder), "BT\n/F1 12 Tf\n(Hello, World!) Tj\nT*\nET");
    }

    #[test]
    fn test_page_layout_exact_bytes() {
        let lines = vec!["Title: Report".to_string(), String::new()];
        let builder = ContentStreamBuilder::from_lines(&lines, &LayoutConfig::default());

        assert_eq!(
            content_of(&builder),
            "BT\n/F1 12 Tf\n14 TL\n50 800 Td\n(Title: Report) Tj\nT*\n() Tj\nT*\nET"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let builder = ContentStreamBuilder::from_lines::<&str>(&[], &LayoutConfig::default());
        let bytes = builder.build().unwrap();
        assert!(bytes.ends_with(b"ET"));
        assert_eq!(builder.shown_lines(), 0);
    }

    #[test]
    fn test_escaped_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_line("a (b) c\\d").end_text();

        let content = content_of(&builder);
        assert!(content.contains("(a \\(b\\) c\\\\d) Tj"));
    }

    #[test]
    fn test_carriage_returns_dropped() {
        assert_eq!(escape_pdf_string("a\rb"), b"ab".to_vec());
    }

    #[test]
    fn test_non_latin1_replaced() {
        assert_eq!(escape_pdf_string("\u{e9}\u{2603}"), vec![0xE9, b'?']);
    }

    #[test]
    fn test_wrapping_emits_one_line_per_segment() {
        let long = vec!["word ".repeat(40)];
        let builder = ContentStreamBuilder::from_lines(&long, &LayoutConfig::default());
        // 40 x "word" = 199 chars joined; wraps into 3 segments of <= 95
        assert_eq!(builder.shown_lines(), 3);
    }

    #[test]
    fn test_line_cap() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let builder = ContentStreamBuilder::from_lines(&lines, &LayoutConfig::default());
        let content = content_of(&builder);

        assert_eq!(builder.shown_lines(), 55);
        assert_eq!(content.matches(") Tj").count(), 55);
        assert_eq!(content.matches("T*").count(), 55);
        assert!(content.contains("(line 54) Tj"));
        assert!(!content.contains("(line 55) Tj"));
        assert!(content.ends_with("ET"));
    }

    #[test]
    fn test_line_cap_mid_line() {
        let config = LayoutConfig::default().with_max_lines(2).with_wrap_width(5);
        let builder = ContentStreamBuilder::from_lines(&["aaa bbb ccc"], &config);
        let content = content_of(&builder);

        assert_eq!(builder.shown_lines(), 2);
        assert!(content.contains("(aaa) Tj"));
        assert!(content.contains("(bbb) Tj"));
        assert!(!content.contains("(ccc) Tj"));
    }

    #[test]
    fn test_set_font_deduplicates() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 12.0).set_font("F1", 12.0);
        assert_eq!(builder.operations().len(), 1);
    }
}
