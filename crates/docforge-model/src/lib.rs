//! Document tree definitions for docforge
//!
//! This crate defines the in-memory styled-document model that the writers
//! serialize. A document is built up front, then treated as frozen for the
//! duration of a write pass: the writers only ever read from it.

pub mod document;
pub mod element;
pub mod section;
pub mod style;

pub use document::*;
pub use element::*;
pub use section::*;
pub use style::*;
