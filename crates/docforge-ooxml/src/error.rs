//! Error types for the Word2007 writer

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort an export
///
/// There is no partial-success outcome: any of these raised during a write
/// pass means no package is produced.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Error reading a media source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A referenced image or object file is missing or unreadable
    #[error("unreadable media source {path}: {source}")]
    UnreadableMedia {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A media source has no usable file extension
    #[error("media source has no file extension: {0}")]
    MissingMediaExtension(PathBuf),

    /// Attempt to register a relationship with an empty target
    #[error("relationship target must not be empty (kind {kind})")]
    EmptyRelationshipTarget { kind: &'static str },

    /// A note or comment reference points outside its collection
    #[error("{collection} index {index} out of bounds (len {len})")]
    DanglingReference {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

/// Result type for writer operations
pub type Result<T> = std::result::Result<T, WriteError>;
