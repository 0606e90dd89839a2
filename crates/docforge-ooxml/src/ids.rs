//! Identifier allocators
//!
//! One `IdAllocators` value is created fresh for every export and threaded by
//! mutable reference through the traversal. Ids are handed out lazily, the
//! first time an element that needs one is visited in document order, so the
//! assignment is a deterministic function of traversal order.
//!
//! Relationship ids are not here: they are scoped per output part and live on
//! each part's [`RelationshipSet`](crate::rels::RelationshipSet).

/// A strictly increasing counter; ids are never reused within a write pass
#[derive(Debug, Clone)]
pub struct Counter {
    next: u32,
}

impl Counter {
    pub fn starting_at(start: u32) -> Self {
        Self { next: start }
    }

    /// Hand out the next id and advance
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next `allocate` call would return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// The per-export allocator context
#[derive(Debug, Clone)]
pub struct IdAllocators {
    /// Numbering instance ids (`w:numId`)
    pub numbering: Counter,
    /// Bookmark ids (`w:bookmarkStart`/`w:bookmarkEnd`)
    pub bookmark: Counter,
    /// Comment ids
    pub comment: Counter,
    /// Footnote reference ids; 0 and -1 are reserved for the separators
    pub footnote: Counter,
    /// Endnote reference ids
    pub endnote: Counter,
    /// Media file numbers (`media/image{n}`, `embeddings/object{n}`)
    pub media: Counter,
    /// Drawing object ids (`wp:docPr`)
    pub drawing: Counter,
    /// Tracked-revision ids (`w:ins`/`w:del`)
    pub revision: Counter,
}

impl IdAllocators {
    /// Fresh state for one write pass
    pub fn new() -> Self {
        Self {
            numbering: Counter::starting_at(1),
            bookmark: Counter::starting_at(1),
            comment: Counter::starting_at(1),
            footnote: Counter::starting_at(1),
            endnote: Counter::starting_at(1),
            media: Counter::starting_at(1),
            drawing: Counter::starting_at(1),
            revision: Counter::starting_at(1),
        }
    }
}

impl Default for IdAllocators {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_monotonic() {
        let mut c = Counter::starting_at(1);
        assert_eq!(c.allocate(), 1);
        assert_eq!(c.allocate(), 2);
        assert_eq!(c.allocate(), 3);
        assert_eq!(c.peek(), 4);
    }

    #[test]
    fn test_fresh_allocators_are_independent() {
        let mut a = IdAllocators::new();
        a.bookmark.allocate();
        a.bookmark.allocate();
        assert_eq!(a.bookmark.peek(), 3);
        assert_eq!(a.comment.peek(), 1);

        // A new export starts from scratch
        let b = IdAllocators::new();
        assert_eq!(b.bookmark.peek(), 1);
    }
}
