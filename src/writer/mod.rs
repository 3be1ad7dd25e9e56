//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! Document
//!     ↓ text_lines()
//! [ContentStreamBuilder] (wrapped lines → content stream bytes)
//!     ↓
//! [PdfWriter] (fixed object graph, offsets, xref, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use mdpdf::document::{Document, DocumentElement};
//! use mdpdf::writer::PdfWriter;
//!
//! let mut doc = Document::new().with_title("Report");
//! doc.push(DocumentElement::heading1("Intro"));
//!
//! let bytes = PdfWriter::new().render(&doc).unwrap();
//! assert!(bytes.starts_with(b"%PDF-1.4\n"));
//! ```

mod content_stream;
mod document_graph;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{
    escape_pdf_string, write_escaped_string, ContentStreamBuilder, ContentStreamOp,
};
pub use document_graph::{
    single_page_graph, PdfObject, CATALOG_ID, CONTENTS_ID, FONT_ID, OBJECT_COUNT, PAGES_ID,
    PAGE_ID,
};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PdfWriter, PdfWriterConfig, BINARY_MARKER};
