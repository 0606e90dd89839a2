//! Per-export write state
//!
//! A [`WriteContext`] is created fresh for every export and threaded by
//! mutable reference through the traversal. It owns the identifier
//! allocators, the collected media, the notes/comments/numbering usage
//! tables, and the header/footer parts generated along the way. Nothing in
//! it survives a write pass.

use std::collections::HashMap;

use docforge_model::{Document, MediaSource};

use crate::error::{Result, WriteError};
use crate::ids::IdAllocators;
use crate::rels::RelationshipSet;
use crate::styles::StyleCascade;

/// A media file destined for the package
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Part path inside the package, e.g. "word/media/image1.png"
    pub part_path: String,
    /// Relationship target relative to the word/ directory
    pub target: String,
    pub extension: String,
    pub data: Vec<u8>,
}

/// One output part under construction: its XML buffer plus its own
/// relationship graph
#[derive(Debug, Default)]
pub struct PartBuffer {
    pub xml: String,
    pub rels: RelationshipSet,
}

impl PartBuffer {
    /// A part whose relationship ids count from 1
    pub fn new() -> Self {
        Self {
            xml: String::new(),
            rels: RelationshipSet::new(),
        }
    }

    /// The main document part, with ids 1-6 pre-reserved
    pub fn main_document() -> Self {
        Self {
            xml: String::new(),
            rels: RelationshipSet::with_document_defaults(),
        }
    }
}

/// A finished header or footer part
#[derive(Debug)]
pub struct HdrFtrPart {
    /// File name under word/, e.g. "header1.xml"
    pub filename: String,
    /// True for headers, false for footers
    pub is_header: bool,
    pub part: PartBuffer,
}

pub struct WriteContext<'a> {
    pub doc: &'a Document,
    pub cascade: StyleCascade<'a>,
    pub ids: IdAllocators,
    pub media: Vec<MediaFile>,
    /// Footnote (reference id, collection index), in traversal order
    pub footnotes: Vec<(u32, usize)>,
    /// Endnote (reference id, collection index), in traversal order
    pub endnotes: Vec<(u32, usize)>,
    /// Comment (comment id, collection index), in first-marker order
    pub comments: Vec<(u32, usize)>,
    comment_ids: HashMap<usize, u32>,
    /// Numbering (instance id, numbering style name), in first-use order
    pub numbering: Vec<(u32, String)>,
    numbering_ids: HashMap<String, u32>,
    /// Header/footer parts generated while writing section properties
    pub hdr_ftr_parts: Vec<HdrFtrPart>,
    /// A table-of-contents field was written; its entries need a field
    /// recalculation on open
    pub toc_seen: bool,
}

impl<'a> WriteContext<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            cascade: StyleCascade::new(doc),
            ids: IdAllocators::new(),
            media: Vec::new(),
            footnotes: Vec::new(),
            endnotes: Vec::new(),
            comments: Vec::new(),
            comment_ids: HashMap::new(),
            numbering: Vec::new(),
            numbering_ids: HashMap::new(),
            hdr_ftr_parts: Vec::new(),
            toc_seen: false,
        }
    }

    /// Comment id for a collection index, allocated on first use
    pub fn comment_id(&mut self, index: usize) -> Result<u32> {
        if index >= self.doc.comments.len() {
            return Err(WriteError::DanglingReference {
                collection: "comments",
                index,
                len: self.doc.comments.len(),
            });
        }
        if let Some(&id) = self.comment_ids.get(&index) {
            return Ok(id);
        }
        let id = self.ids.comment.allocate();
        self.comment_ids.insert(index, id);
        self.comments.push((id, index));
        Ok(id)
    }

    /// Footnote reference id for a collection index; every reference gets a
    /// fresh id so ids follow document order
    pub fn footnote_id(&mut self, index: usize) -> Result<u32> {
        if index >= self.doc.footnotes.len() {
            return Err(WriteError::DanglingReference {
                collection: "footnotes",
                index,
                len: self.doc.footnotes.len(),
            });
        }
        let id = self.ids.footnote.allocate();
        self.footnotes.push((id, index));
        Ok(id)
    }

    /// Endnote reference id for a collection index
    pub fn endnote_id(&mut self, index: usize) -> Result<u32> {
        if index >= self.doc.endnotes.len() {
            return Err(WriteError::DanglingReference {
                collection: "endnotes",
                index,
                len: self.doc.endnotes.len(),
            });
        }
        let id = self.ids.endnote.allocate();
        self.endnotes.push((id, index));
        Ok(id)
    }

    /// Numbering instance id for a named numbering style, allocated on first
    /// use in traversal order
    pub fn numbering_id(&mut self, style_name: &str) -> u32 {
        if let Some(&id) = self.numbering_ids.get(style_name) {
            return id;
        }
        let id = self.ids.numbering.allocate();
        self.numbering_ids.insert(style_name.to_string(), id);
        self.numbering.push((id, style_name.to_string()));
        id
    }

    /// Load a media source and stage it as a package part
    ///
    /// Returns the relationship target for the part that references it.
    /// Reading happens at visit time so a missing file aborts the export
    /// before any bytes are packaged.
    pub fn add_image(&mut self, source: &MediaSource) -> Result<String> {
        let extension = match source.extension() {
            Some(ext) => ext.to_ascii_lowercase(),
            None => {
                let path = match source {
                    MediaSource::Path(p) => p.clone(),
                    MediaSource::Bytes { .. } => Default::default(),
                };
                return Err(WriteError::MissingMediaExtension(path));
            }
        };
        let data = self.read_media(source)?;
        let number = self.ids.media.allocate();
        let target = format!("media/image{}.{}", number, extension);
        self.media.push(MediaFile {
            part_path: format!("word/{}", target),
            target: target.clone(),
            extension,
            data,
        });
        Ok(target)
    }

    /// Load an OLE object source and stage it under word/embeddings/
    pub fn add_object(&mut self, source: &MediaSource) -> Result<String> {
        let data = self.read_media(source)?;
        let number = self.ids.media.allocate();
        let target = format!("embeddings/object{}.bin", number);
        self.media.push(MediaFile {
            part_path: format!("word/{}", target),
            target: target.clone(),
            extension: "bin".to_string(),
            data,
        });
        Ok(target)
    }

    fn read_media(&self, source: &MediaSource) -> Result<Vec<u8>> {
        match source {
            MediaSource::Path(path) => {
                std::fs::read(path).map_err(|e| WriteError::UnreadableMedia {
                    path: path.clone(),
                    source: e,
                })
            }
            MediaSource::Bytes { data, .. } => Ok(data.clone()),
        }
    }
}
