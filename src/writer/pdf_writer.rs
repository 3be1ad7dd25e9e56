//! PDF document writer.
//!
//! Assembles the complete file: header, the five body objects, the xref
//! table and the trailer. Every object's offset is taken from the output
//! length at the moment the object is appended.

use super::content_stream::ContentStreamBuilder;
use super::document_graph::{single_page_graph, CATALOG_ID};
use super::object_serializer::ObjectSerializer;
use crate::config::LayoutConfig;
use crate::document::Document;
use crate::error::Result;
use crate::object::Object;
use crate::xref::CrossRefTable;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

/// Binary marker line written after the version header.
pub const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Configuration for PDF generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Page width in points
    pub page_width: u32,
    /// Page height in points
    pub page_height: u32,
    /// Standard 14 font used for all text
    pub base_font: String,
    /// Text layout on the page
    pub layout: LayoutConfig,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
            page_width: 595,
            page_height: 842,
            base_font: "Helvetica".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl PdfWriterConfig {
    /// Set the version written in the header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: u32, height: u32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the base font.
    pub fn with_base_font(mut self, base_font: impl Into<String>) -> Self {
        self.base_font = base_font.into();
        self
    }

    /// Set the text layout.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// PDF writer for single-page text documents.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    serializer: ObjectSerializer,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            serializer: ObjectSerializer::new(),
        }
    }

    /// Get the writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Build the page content stream for a document.
    pub fn content_stream(&self, doc: &Document) -> Result<Vec<u8>> {
        let lines = doc.text_lines();
        ContentStreamBuilder::from_lines(&lines, &self.config.layout).build()
    }

    /// Render a document to complete PDF bytes.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let content = self.content_stream(doc)?;
        self.assemble(&content)
    }

    /// Wrap an already built content stream in the fixed object graph.
    pub fn assemble(&self, content: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut xref = CrossRefTable::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(BINARY_MARKER);

        let graph = single_page_graph(&self.config, Bytes::copy_from_slice(content));
        for (id, pdf_object) in &graph {
            xref.record(*id, output.len());
            log::debug!("Writing {} as object {}", pdf_object.kind(), id);
            self.serializer
                .write_indirect(&mut output, *id, 0, &pdf_object.to_object())?;
        }

        let xref_start = output.len();
        xref.write_table(&mut output)?;

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(i64::from(xref.size()))),
            ("Root", ObjectSerializer::reference(CATALOG_ID, 0)),
        ]);
        writeln!(output, "trailer")?;
        self.serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        writeln!(output, "%%EOF")?;

        log::debug!(
            "Assembled {} bytes, xref at {}, {} objects",
            output.len(),
            xref_start,
            graph.len()
        );
        Ok(output)
    }

    /// Render a document and write it to `path` in one pass.
    pub fn save(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render(doc)?;

        let mut file = std::fs::File::create(path)?;
        file.write_all(&bytes)?;
        file.flush()?;

        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
