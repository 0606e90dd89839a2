//! The assembled package
//!
//! A [`DocxPackage`] is an ordered map from part name to bytes; it is the
//! writer's output and the input to whatever container format ships it. The
//! crate stops at the part map: zipping (or any other physical layout) is the
//! job of a [`PackageAssembler`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WriteError};

/// All parts of one written document, in emission order
#[derive(Debug, Default)]
pub struct DocxPackage {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxPackage {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add a part, replacing any existing part of the same name
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        if let Some(slot) = self.parts.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = data;
        } else {
            self.parts.push((name, data));
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_slice())
    }

    /// Part content as UTF-8, for XML parts
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|d| std::str::from_utf8(d).ok())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.parts.iter().map(|(n, d)| (n.as_str(), d.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Turns a part map into a physical container
pub trait PackageAssembler {
    type Output;

    fn assemble(&mut self, package: &DocxPackage) -> Result<Self::Output>;
}

/// Assembler that lays the parts out as a directory tree
///
/// Useful for inspection and tests; a zip-based assembler produces the actual
/// .docx container from the same part map.
#[derive(Debug)]
pub struct DirAssembler {
    root: PathBuf,
}

impl DirAssembler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PackageAssembler for DirAssembler {
    type Output = PathBuf;

    fn assemble(&mut self, package: &DocxPackage) -> Result<PathBuf> {
        for (name, data) in package.iter() {
            let path = self.root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(WriteError::Io)?;
            }
            fs::write(&path, data).map_err(WriteError::Io)?;
        }
        Ok(self.root.clone())
    }
}

/// True when the part name looks like an XML part (has a `.xml` or `.rels`
/// suffix), as opposed to raw media bytes
pub fn is_xml_part(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xml") || e.eq_ignore_ascii_case("rels"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_name() {
        let mut package = DocxPackage::new();
        package.insert("word/document.xml", b"one".to_vec());
        package.insert("word/document.xml", b"two".to_vec());
        assert_eq!(package.len(), 1);
        assert_eq!(package.get("word/document.xml"), Some(&b"two"[..]));
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut package = DocxPackage::new();
        package.insert("[Content_Types].xml", Vec::new());
        package.insert("_rels/.rels", Vec::new());
        package.insert("word/document.xml", Vec::new());
        let names: Vec<_> = package.part_names().collect();
        assert_eq!(
            names,
            vec!["[Content_Types].xml", "_rels/.rels", "word/document.xml"]
        );
    }

    #[test]
    fn test_is_xml_part() {
        assert!(is_xml_part("word/document.xml"));
        assert!(is_xml_part("word/_rels/document.xml.rels"));
        assert!(!is_xml_part("word/media/image1.png"));
    }
}
