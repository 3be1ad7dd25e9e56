//! The fixed object graph of a single-page document.
//!
//! Five indirect objects, always numbered the same way:
//!
//! ```text
//! 1 Catalog ──/Pages──▶ 2 Pages ──/Kids──▶ 3 Page ──/Font /F1──▶ 4 Font
//!                                               └──/Contents──▶ 5 content stream
//! ```

use super::object_serializer::ObjectSerializer;
use super::pdf_writer::PdfWriterConfig;
use crate::object::{Dictionary, Object, ObjectRef};
use bytes::Bytes;

/// Object number of the document catalog.
pub const CATALOG_ID: u32 = 1;
/// Object number of the page tree root.
pub const PAGES_ID: u32 = 2;
/// Object number of the single page.
pub const PAGE_ID: u32 = 3;
/// Object number of the font dictionary.
pub const FONT_ID: u32 = 4;
/// Object number of the page content stream.
pub const CONTENTS_ID: u32 = 5;
/// Number of indirect objects in the graph (excluding the free object 0).
pub const OBJECT_COUNT: u32 = 5;

/// One of the indirect objects making up the document.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Document catalog (root of the object graph)
    Catalog {
        /// Page tree root
        pages: ObjectRef,
    },
    /// Page tree root
    Pages {
        /// Page objects
        kids: Vec<ObjectRef>,
    },
    /// A page
    Page {
        /// Page tree this page belongs to
        parent: ObjectRef,
        /// Page width in points
        width: u32,
        /// Page height in points
        height: u32,
        /// Font resource name used by the content stream
        font_resource: String,
        /// Font dictionary
        font: ObjectRef,
        /// Content stream
        contents: ObjectRef,
    },
    /// Standard 14 Type1 font, not embedded
    Font {
        /// PostScript font name, e.g. `Helvetica`
        base_font: String,
    },
    /// Page content stream
    ContentStream(Bytes),
}

impl PdfObject {
    /// Short name of the object kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PdfObject::Catalog { .. } => "Catalog",
            PdfObject::Pages { .. } => "Pages",
            PdfObject::Page { .. } => "Page",
            PdfObject::Font { .. } => "Font",
            PdfObject::ContentStream(_) => "ContentStream",
        }
    }

    /// Lower into the generic object model for serialization.
    pub fn to_object(&self) -> Object {
        match self {
            PdfObject::Catalog { pages } => ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", Object::Reference(*pages)),
            ]),
            PdfObject::Pages { kids } => ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                (
                    "Kids",
                    ObjectSerializer::array(kids.iter().map(|r| Object::Reference(*r)).collect()),
                ),
                ("Count", ObjectSerializer::integer(kids.len() as i64)),
            ]),
            PdfObject::Page {
                parent,
                width,
                height,
                font_resource,
                font,
                contents,
            } => ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", Object::Reference(*parent)),
                (
                    "MediaBox",
                    ObjectSerializer::array(vec![
                        ObjectSerializer::integer(0),
                        ObjectSerializer::integer(0),
                        ObjectSerializer::integer(*width as i64),
                        ObjectSerializer::integer(*height as i64),
                    ]),
                ),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![(
                        "Font",
                        ObjectSerializer::dict(vec![(font_resource.as_str(), Object::Reference(*font))]),
                    )]),
                ),
                ("Contents", Object::Reference(*contents)),
            ]),
            PdfObject::Font { base_font } => ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(base_font)),
            ]),
            PdfObject::ContentStream(data) => Object::Stream {
                dict: Dictionary::new(),
                data: data.clone(),
            },
        }
    }
}

/// Build the five objects of a single-page document in emission order.
pub fn single_page_graph(config: &PdfWriterConfig, content: Bytes) -> Vec<(u32, PdfObject)> {
    let font_resource = config.layout.font_resource.clone();
    vec![
        (
            CATALOG_ID,
            PdfObject::Catalog {
                pages: ObjectRef::new(PAGES_ID, 0),
            },
        ),
        (
            PAGES_ID,
            PdfObject::Pages {
                kids: vec![ObjectRef::new(PAGE_ID, 0)],
            },
        ),
        (
            PAGE_ID,
            PdfObject::Page {
                parent: ObjectRef::new(PAGES_ID, 0),
                width: config.page_width,
                height: config.page_height,
                font_resource,
                font: ObjectRef::new(FONT_ID, 0),
                contents: ObjectRef::new(CONTENTS_ID, 0),
            },
        ),
        (
            FONT_ID,
            PdfObject::Font {
                base_font: config.base_font.clone(),
            },
        ),
        (CONTENTS_ID, PdfObject::ContentStream(content)),
    ]
}
