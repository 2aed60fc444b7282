//! Element identifiers scoped to a single parse run.

use serde::Serialize;
use std::fmt;

/// Identifier of a paragraph, table, cell or image within one document.
///
/// Ids are only unique inside the [`Document`](crate::document::Document)
/// they were assigned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Monotonic id source. One generator is shared by every section of a
/// document so ids never repeat across sections.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    #[inline]
    pub fn next_id(&mut self) -> ElementId {
        self.next += 1;
        ElementId(self.next)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
