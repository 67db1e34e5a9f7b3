//! Published document slot shared between the preview writer and readers.
//!
//! Uses `arc-swap` so HTTP handlers load the current document without
//! locking while the writer swaps in a complete replacement.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;

use super::document::CompositeDocument;

/// A committed document together with the revision it was published under.
#[derive(Debug)]
pub struct Published {
    pub revision: u64,
    pub document: CompositeDocument,
}

/// Holds the latest published document.
#[derive(Debug, Default)]
pub struct DocumentSlot {
    current: ArcSwapOption<Published>,
    next_revision: AtomicU64,
}

impl DocumentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in `document` as a whole. Returns its revision (starting at 1).
    pub fn publish(&self, document: CompositeDocument) -> u64 {
        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        self.current
            .store(Some(Arc::new(Published { revision, document })));
        revision
    }

    /// Latest published document, if any.
    pub fn load(&self) -> Option<Arc<Published>> {
        self.current.load_full()
    }

    /// Revision of the latest published document (0 = nothing yet).
    pub fn revision(&self) -> u64 {
        self.current.load().as_ref().map_or(0, |p| p.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{Skeleton, Snapshot, compose};

    fn doc(body: &str) -> CompositeDocument {
        compose(&Snapshot::new(body, "", ""), &Skeleton::default())
    }

    #[test]
    fn test_empty_slot() {
        let slot = DocumentSlot::new();
        assert!(slot.load().is_none());
        assert_eq!(slot.revision(), 0);
    }

    #[test]
    fn test_publish_increments_revision() {
        let slot = DocumentSlot::new();
        assert_eq!(slot.publish(doc("a")), 1);
        assert_eq!(slot.publish(doc("b")), 2);

        let published = slot.load().unwrap();
        assert_eq!(published.revision, 2);
        assert_eq!(published.document, doc("b"));
    }

    #[test]
    fn test_reader_keeps_old_document() {
        let slot = DocumentSlot::new();
        slot.publish(doc("old"));
        let held = slot.load().unwrap();

        slot.publish(doc("new"));

        // A reader mid-response keeps the whole old document
        assert_eq!(held.document, doc("old"));
        assert_eq!(slot.load().unwrap().document, doc("new"));
    }
}
