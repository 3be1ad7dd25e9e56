//! # mdpdf
//!
//! Convert a simplified markdown document into a minimal single-page PDF.
//!
//! The interesting part is the file layout itself: a fixed graph of five
//! indirect objects (catalog, page tree, page, font, content stream), each
//! written at a tracked byte offset, followed by a cross-reference table and
//! trailer that point back at those offsets.
//!
//! ## Pipeline
//!
//! ```text
//! markdown ──[MarkdownParser]──▶ Document ──[PdfWriter]──▶ PDF bytes ──▶ file
//!                                                              │
//!                                                          [verify]
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdpdf::markdown::MarkdownParser;
//!
//! # fn main() -> mdpdf::Result<()> {
//! let doc = MarkdownParser::parse_file("notes.md", "A. Student", "S123")?;
//! mdpdf::convert(&doc, "Output.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Everything goes on one page. Text beyond the page's line capacity is
//! dropped, and only Latin-1 characters are representable with the standard
//! Helvetica font.
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0
//! (<http://www.apache.org/licenses/LICENSE-2.0>) or the MIT license
//! (<http://opensource.org/licenses/MIT>), at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Core PDF structures
pub mod object;
pub mod xref;

// Document model and input
pub mod document;
pub mod markdown;

// Layout
pub mod config;
pub mod encoding;
pub mod text;

// Output
pub mod verify;
pub mod writer;

pub use config::LayoutConfig;
pub use document::{Document, DocumentElement, ElementKind};
pub use error::{Error, Result};
pub use markdown::MarkdownParser;
pub use verify::{verify, StructureReport};
pub use writer::{PdfWriter, PdfWriterConfig};

/// Render a document to PDF bytes with the default configuration.
pub fn render_pdf(doc: &Document) -> Result<Vec<u8>> {
    PdfWriter::new().render(doc)
}

/// Render a document and write it to `path` with the default configuration.
pub fn convert(doc: &Document, path: impl AsRef<std::path::Path>) -> Result<()> {
    PdfWriter::new().save(doc, path)
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
