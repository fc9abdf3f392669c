//! Page selection and ordering.
//!
//! A [`WorkingSet`] is the ordered list of pages backing the Split and
//! Organize workflows. Sequence order is export order. The two workflows
//! differ only in what they may do to the set, so the variant is a type
//! parameter: [`Split`] sets can toggle inclusion, [`Organize`] sets can
//! delete entries, and both can reorder.
//!
//! # Examples
//!
//! ```
//! use pdfpages::selection::{OrganizeSet, WorkingSet};
//!
//! let mut pages: OrganizeSet<()> = WorkingSet::new();
//! pages.load([(0, ()), (1, ()), (2, ())]);
//!
//! let second = pages.entries()[1].id();
//! pages.delete(second);
//!
//! let last = pages.entries()[1].id();
//! pages.reorder(last, 0);
//!
//! assert_eq!(pages.resolve_export_indices(), vec![2, 0]);
//! ```

mod edit;

pub use edit::Edit;

use std::fmt;
use std::marker::PhantomData;

use crate::error::{PdfPagesError, Result};
use crate::render::Thumbnail;

/// Marker for the Split workflow: entries carry an inclusion flag.
#[derive(Debug, Clone, Copy)]
pub enum Split {}

/// Marker for the Organize workflow: every present entry is exported.
#[derive(Debug, Clone, Copy)]
pub enum Organize {}

/// Working set used by the Split workflow.
pub type SplitSet<T = Thumbnail> = WorkingSet<Split, T>;

/// Working set used by the Organize workflow.
pub type OrganizeSet<T = Thumbnail> = WorkingSet<Organize, T>;

/// Stable identifier of an entry within one working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// One page of the source document as represented in a working set.
#[derive(Debug, Clone)]
pub struct PageEntry<T> {
    id: EntryId,
    source_index: usize,
    thumbnail: T,
    included: bool,
}

impl<T> PageEntry<T> {
    /// Identifier of this entry.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Zero-based index of the page in its source document.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// One-based page number in the source document.
    pub fn page_number(&self) -> usize {
        self.source_index + 1
    }

    /// Rendered thumbnail for display.
    pub fn thumbnail(&self) -> &T {
        &self.thumbnail
    }

    /// Whether the page is part of the export.
    pub fn is_included(&self) -> bool {
        self.included
    }
}

/// Ordered, mutable collection of page entries for one source document.
#[derive(Debug, Clone)]
pub struct WorkingSet<M, T = Thumbnail> {
    entries: Vec<PageEntry<T>>,
    loaded: bool,
    next_id: u32,
    _mode: PhantomData<M>,
}

impl<M, T> Default for WorkingSet<M, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loaded: false,
            next_id: 1,
            _mode: PhantomData,
        }
    }
}

impl<M, T> WorkingSet<M, T> {
    /// Create an empty, unloaded working set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with one entry per `(source_index, thumbnail)`.
    ///
    /// Entries keep input order and start out included. An empty input
    /// produces an empty set that still counts as loaded.
    pub fn load<I>(&mut self, pages: I)
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        self.entries.clear();

        for (source_index, thumbnail) in pages {
            let id = EntryId(self.next_id);
            self.next_id += 1;
            self.entries.push(PageEntry {
                id,
                source_index,
                thumbnail,
                included: true,
            });
        }

        self.loaded = true;
        tracing::debug!(pages = self.entries.len(), "working set loaded");
    }

    /// Drop every entry and return to the unloaded state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.loaded = false;
    }

    /// Whether [`load`](Self::load) has been called since creation or the
    /// last [`clear`](Self::clear).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Entries in sequence order.
    pub fn entries(&self) -> &[PageEntry<T>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position of an entry.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entry for a one-based source page number, if it is still present.
    pub fn entry_for_page(&self, page_number: usize) -> Option<&PageEntry<T>> {
        self.entries
            .iter()
            .find(|entry| entry.page_number() == page_number)
    }

    /// Move an entry to `new_position`, shifting the entries in between.
    ///
    /// Does nothing if the id is absent, the position is out of bounds, or
    /// the entry is already there. Returns whether the order changed.
    pub fn reorder(&mut self, id: EntryId, new_position: usize) -> bool {
        let Some(old_position) = self.position_of(id) else {
            tracing::debug!(%id, "reorder ignored: no such entry");
            return false;
        };

        if new_position >= self.entries.len() || new_position == old_position {
            return false;
        }

        let entry = self.entries.remove(old_position);
        self.entries.insert(new_position, entry);
        true
    }

    /// Source indices of the included entries in sequence order.
    pub fn resolve_export_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|entry| entry.included)
            .map(|entry| entry.source_index)
            .collect()
    }

    /// Like [`resolve_export_indices`](Self::resolve_export_indices), but
    /// refuses an unloaded set or an empty result.
    pub fn export_indices(&self) -> Result<Vec<usize>> {
        if !self.loaded {
            return Err(PdfPagesError::NoDocumentLoaded);
        }

        let indices = self.resolve_export_indices();
        if indices.is_empty() {
            return Err(PdfPagesError::NothingSelected);
        }

        Ok(indices)
    }
}

impl<T> WorkingSet<Split, T> {
    /// Flip the inclusion flag of an entry.
    ///
    /// An unknown id is logged and reported without touching the set.
    pub fn toggle_included(&mut self, id: EntryId) -> Result<bool> {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.included = !entry.included;
                Ok(entry.included)
            }
            None => {
                tracing::warn!(%id, "toggle ignored: no such entry");
                Err(PdfPagesError::entry_not_found(id))
            }
        }
    }

    /// Set the inclusion flag of every entry.
    pub fn set_all_included(&mut self, value: bool) {
        for entry in &mut self.entries {
            entry.included = value;
        }
    }

    /// Number of entries currently included.
    pub fn included_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.included).count()
    }
}

impl<T> WorkingSet<Organize, T> {
    /// Remove an entry. Returns whether anything was removed.
    pub fn delete(&mut self, id: EntryId) -> bool {
        match self.position_of(id) {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn split_set(pages: usize) -> SplitSet<()> {
        let mut set = WorkingSet::new();
        set.load((0..pages).map(|index| (index, ())));
        set
    }

    fn organize_set(pages: usize) -> OrganizeSet<()> {
        let mut set = WorkingSet::new();
        set.load((0..pages).map(|index| (index, ())));
        set
    }

    fn ids<M>(set: &WorkingSet<M, ()>) -> Vec<EntryId> {
        set.entries().iter().map(|entry| entry.id()).collect()
    }

    #[test]
    fn test_load_keeps_order_and_includes_everything() {
        let set = split_set(4);

        assert!(set.is_loaded());
        assert_eq!(set.len(), 4);
        assert_eq!(set.included_count(), 4);
        assert_eq!(set.resolve_export_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_load_empty_input() {
        let mut set: SplitSet<()> = WorkingSet::new();
        assert!(!set.is_loaded());

        set.load(std::iter::empty());
        assert!(set.is_loaded());
        assert!(set.is_empty());
        assert!(matches!(
            set.export_indices(),
            Err(PdfPagesError::NothingSelected)
        ));
    }

    #[test]
    fn test_unloaded_set_refuses_export() {
        let set: OrganizeSet<()> = WorkingSet::new();
        assert!(matches!(
            set.export_indices(),
            Err(PdfPagesError::NoDocumentLoaded)
        ));
    }

    #[test]
    fn test_reload_assigns_fresh_unique_ids() {
        let mut set = split_set(3);
        let first = ids(&set);

        set.load((0..3).map(|index| (index, ())));
        let second = ids(&set);

        for id in &second {
            assert!(!first.contains(id));
        }
    }

    #[test]
    fn test_entry_id_display() {
        let set = split_set(1);
        assert_eq!(set.entries()[0].id().to_string(), "page-1");
    }

    #[rstest]
    #[case(0, 2, vec![1, 2, 0, 3])]
    #[case(3, 0, vec![3, 0, 1, 2])]
    #[case(1, 2, vec![0, 2, 1, 3])]
    #[case(2, 1, vec![0, 2, 1, 3])]
    fn test_reorder_moves_entry(
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: Vec<usize>,
    ) {
        let mut set = organize_set(4);
        let id = set.entries()[from].id();

        assert!(set.reorder(id, to));
        assert_eq!(set.resolve_export_indices(), expected);
        assert_eq!(set.position_of(id), Some(to));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 4)]
    #[case(1, 100)]
    fn test_reorder_noop_cases(#[case] from: usize, #[case] to: usize) {
        let mut set = organize_set(4);
        let id = set.entries()[from].id();

        assert!(!set.reorder(id, to));
        assert_eq!(set.resolve_export_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_unknown_id_is_noop() {
        let mut set = organize_set(2);
        let stale = {
            let other = organize_set(5);
            other.entries()[4].id()
        };

        assert!(!set.reorder(stale, 0));
        assert_eq!(set.resolve_export_indices(), vec![0, 1]);
    }

    #[test]
    fn test_reorder_preserves_ids_and_source_indices() {
        let mut set = split_set(6);
        let before: Vec<(EntryId, usize)> = set
            .entries()
            .iter()
            .map(|entry| (entry.id(), entry.source_index()))
            .collect();

        let moves = [(0, 5), (3, 1), (5, 0), (2, 4), (4, 4), (1, 9)];
        for (from, to) in moves {
            let id = set.entries()[from].id();
            set.reorder(id, to);
        }

        let mut after: Vec<(EntryId, usize)> = set
            .entries()
            .iter()
            .map(|entry| (entry.id(), entry.source_index()))
            .collect();
        after.sort();

        assert_eq!(after, before);
    }

    #[test]
    fn test_reorder_is_deterministic_from_same_start() {
        let start = organize_set(5);
        let id = start.entries()[1].id();

        let mut once = start.clone();
        once.reorder(id, 3);

        let mut again = start.clone();
        again.reorder(id, 3);
        again.reorder(id, 3);

        assert_eq!(
            once.resolve_export_indices(),
            again.resolve_export_indices()
        );
    }

    #[test]
    fn test_toggle_included() {
        let mut set = split_set(4);
        let first = set.entries()[0].id();
        let third = set.entries()[2].id();

        assert!(!set.toggle_included(first).unwrap());
        assert!(!set.toggle_included(third).unwrap());
        assert_eq!(set.resolve_export_indices(), vec![1, 3]);
        assert_eq!(set.included_count(), 2);

        assert!(set.toggle_included(first).unwrap());
        assert_eq!(set.resolve_export_indices(), vec![0, 1, 3]);
    }

    #[test]
    fn test_toggle_unknown_id_leaves_state() {
        let mut set = split_set(2);
        let stale = {
            let other = split_set(4);
            other.entries()[3].id()
        };

        let result = set.toggle_included(stale);
        assert!(matches!(result, Err(PdfPagesError::EntryNotFound { .. })));
        assert_eq!(set.resolve_export_indices(), vec![0, 1]);
    }

    #[test]
    fn test_set_all_included() {
        let mut set = split_set(3);
        set.set_all_included(false);
        assert!(set.resolve_export_indices().is_empty());
        assert!(matches!(
            set.export_indices(),
            Err(PdfPagesError::NothingSelected)
        ));

        set.set_all_included(true);
        assert_eq!(set.resolve_export_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_split_resolution_follows_sequence_order() {
        let mut set = split_set(4);
        let last = set.entries()[3].id();
        let second = set.entries()[1].id();

        set.reorder(last, 0);
        set.toggle_included(second).unwrap();

        assert_eq!(set.resolve_export_indices(), vec![3, 0, 2]);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut set = organize_set(4);
        let id = set.entries()[2].id();

        assert!(set.delete(id));
        assert_eq!(set.resolve_export_indices(), vec![0, 1, 3]);

        assert!(!set.delete(id));
        assert_eq!(set.resolve_export_indices().len(), 3);
    }

    #[test]
    fn test_delete_does_not_renumber_sources() {
        let mut set = organize_set(3);
        let first = set.entries()[0].id();
        set.delete(first);

        assert_eq!(set.entries()[0].source_index(), 1);
        assert_eq!(set.entries()[0].page_number(), 2);
        assert!(set.entry_for_page(1).is_none());
        assert!(set.entry_for_page(3).is_some());
    }

    #[test]
    fn test_organize_delete_then_swap() {
        let mut set = organize_set(3);
        let second = set.entries()[1].id();
        set.delete(second);

        let last = set.entries()[1].id();
        set.reorder(last, 0);

        assert_eq!(set.export_indices().unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_clear_returns_to_unloaded() {
        let mut set = split_set(2);
        set.clear();
        assert!(!set.is_loaded());
        assert!(set.is_empty());
    }
}
