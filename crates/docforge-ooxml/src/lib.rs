//! # docforge-ooxml
//!
//! WordprocessingML (Word 2007) serialization for docforge document models.
//!
//! A write pass walks a frozen [`Document`](docforge_model::Document) tree
//! and emits the complete multi-part package: the main document body, the
//! styles, numbering, and settings parts, per-part relationship graphs,
//! headers, footers, footnotes, endnotes, comments, media files, and the
//! content-types manifest. The output is an ordered part map; packing it
//! into a zip container is left to a [`PackageAssembler`].
//!
//! ## Example
//!
//! ```
//! use docforge_model::{Document, Element, Section, Text};
//! use docforge_ooxml::DocxWriter;
//!
//! let mut doc = Document::new();
//! doc.add_section(Section::new(vec![Element::Text(Text::new("Hello"))]));
//!
//! let package = DocxWriter::write(&doc)?;
//! assert!(package.get("word/document.xml").is_some());
//! # Ok::<(), docforge_ooxml::WriteError>(())
//! ```

pub mod body;
pub mod context;
pub mod error;
pub mod ids;
pub mod notes;
pub mod numbering;
pub mod package;
pub mod parts;
pub mod rels;
pub mod section;
pub mod styles;
pub mod writer;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Result, WriteError};
pub use package::{DirAssembler, DocxPackage, PackageAssembler};
pub use rels::{RelKind, Relationship, RelationshipSet};
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
