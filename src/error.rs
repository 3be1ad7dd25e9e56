//! Error types for the PDF writer.
//!
//! Writing a document can only fail on I/O. The remaining variants are
//! produced by [`crate::verify`] when re-reading emitted bytes.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while writing or verifying a PDF.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// Invalid PDF header (expected '%PDF-')
    #[error("Invalid PDF header: expected '%PDF-', found '{0}'")]
    InvalidHeader(String),

    /// Parse error at specific byte offset
    #[error("Failed to parse at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Invalid cross-reference table
    #[error("Invalid cross-reference table")]
    InvalidXref,

    /// An xref entry does not point at its object header
    #[error("Object {id} recorded at byte {recorded} but found at {actual:?}")]
    OffsetMismatch {
        /// Object number
        id: u32,
        /// Offset recorded in the xref table
        recorded: u64,
        /// Offset where the object header actually is, if present at all
        actual: Option<u64>,
    },

    /// A stream's declared /Length disagrees with its data
    #[error("Stream in object {id} declares /Length {declared} but holds {actual} bytes")]
    LengthMismatch {
        /// Object number
        id: u32,
        /// Declared /Length value
        declared: usize,
        /// Byte count between `stream` and `endstream`
        actual: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Invalid PDF structure (generic)
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),
}
