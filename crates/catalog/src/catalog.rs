use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::builtin::builtin_topics;
use crate::error::{CatalogError, Result};
use crate::selection::SelectionState;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Prefix shown on buttons whose topic is currently selected.
pub const SELECTED_MARKER: &str = "✅ ";

/// One selectable topic: a short button label and the full request text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub label: String,
    pub text: String,
}

impl TopicEntry {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub short_label: String,
    pub full_text: String,
    pub display_text: String,
    pub selected: bool,
}

/// A rendered slice of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub index: usize,
    pub page_count: usize,
    pub entries: Vec<PageEntry>,
    pub has_prior_page: bool,
    pub has_next_page: bool,
}

impl CatalogPage {
    pub fn is_last_page(&self) -> bool {
        !self.has_next_page
    }
}

/// Ordered label → text mapping. Immutable once built.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    entries: Vec<TopicEntry>,
    page_size: usize,
}

impl TopicCatalog {
    /// Build a catalog, rejecting empty labels and duplicated labels or texts.
    pub fn new(entries: Vec<TopicEntry>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize(page_size));
        }

        let mut labels = HashSet::new();
        let mut texts = HashSet::new();
        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(CatalogError::DuplicateLabel(entry.label.clone()));
            }
            if !texts.insert(entry.text.as_str()) {
                return Err(CatalogError::DuplicateText(entry.text.clone()));
            }
        }

        Ok(Self { entries, page_size })
    }

    /// The 30 topics offered by default, ten per page.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_topics(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Result<Self> {
        Self::new(self.entries, page_size)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.page_size)
    }

    /// Look up a topic by its short label.
    pub fn resolve(&self, label: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Convert a requested page index into a valid offset.
    ///
    /// An empty catalog still has a (blank) page 0.
    pub fn validate_page(&self, page_index: i64) -> Result<usize> {
        let invalid = || CatalogError::InvalidPage {
            requested: page_index,
            page_count: self.page_count(),
        };

        let index = usize::try_from(page_index).map_err(|_| invalid())?;
        if self.entries.is_empty() {
            return if index == 0 { Ok(0) } else { Err(invalid()) };
        }
        let start = index.checked_mul(self.page_size).ok_or_else(invalid)?;
        if start >= self.entries.len() {
            return Err(invalid());
        }
        Ok(index)
    }

    pub fn page(&self, selected: &SelectionState, page_index: i64) -> Result<CatalogPage> {
        let index = self.validate_page(page_index)?;
        let start = index * self.page_size;
        let end = (start + self.page_size).min(self.entries.len());

        let entries = self.entries[start..end]
            .iter()
            .map(|entry| {
                let is_selected = selected.contains(&entry.text);
                let display_text = if is_selected {
                    format!("{SELECTED_MARKER}{}", entry.label)
                } else {
                    entry.label.clone()
                };
                PageEntry {
                    short_label: entry.label.clone(),
                    full_text: entry.text.clone(),
                    display_text,
                    selected: is_selected,
                }
            })
            .collect();

        Ok(CatalogPage {
            index,
            page_count: self.page_count(),
            entries,
            has_prior_page: index > 0,
            has_next_page: (index + 1) * self.page_size < self.entries.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_catalog(n: usize, page_size: usize) -> TopicCatalog {
        let entries = (0..n)
            .map(|i| TopicEntry::new(format!("t{i}"), format!("Topic number {i}.")))
            .collect();
        TopicCatalog::new(entries, page_size).unwrap()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = TopicCatalog::builtin();
        let rebuilt = TopicCatalog::new(builtin.entries().to_vec(), DEFAULT_PAGE_SIZE);
        assert!(rebuilt.is_ok());
        assert_eq!(builtin.len(), 30);
        assert_eq!(builtin.page_count(), 3);
    }

    #[test]
    fn last_page_of_thirty_has_prior_but_no_next() {
        let catalog = TopicCatalog::builtin();
        let page = catalog.page(&SelectionState::new(), 2).unwrap();

        assert_eq!(page.entries.len(), 10);
        assert_eq!(page.entries[0].full_text, catalog.entries()[20].text);
        assert_eq!(page.entries[9].full_text, catalog.entries()[29].text);
        assert!(page.has_prior_page);
        assert!(!page.has_next_page);
        assert!(page.is_last_page());
    }

    #[test]
    fn first_page_has_next_but_no_prior() {
        let page = small_catalog(25, 10).page(&SelectionState::new(), 0).unwrap();
        assert!(!page.has_prior_page);
        assert!(page.has_next_page);
    }

    #[test]
    fn partial_last_page() {
        let page = small_catalog(25, 10).page(&SelectionState::new(), 2).unwrap();
        assert_eq!(page.entries.len(), 5);
        assert!(page.is_last_page());
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let catalog = small_catalog(30, 10);
        let empty = SelectionState::new();
        assert_eq!(
            catalog.page(&empty, -1),
            Err(CatalogError::InvalidPage {
                requested: -1,
                page_count: 3
            })
        );
        assert!(catalog.page(&empty, 3).is_err());
        assert!(catalog.page(&empty, i64::MAX).is_err());
    }

    #[test]
    fn empty_catalog_has_a_blank_first_page() {
        let catalog = small_catalog(0, 10);
        let page = catalog.page(&SelectionState::new(), 0).unwrap();
        assert!(page.entries.is_empty());
        assert!(!page.has_next_page);
        assert!(catalog.page(&SelectionState::new(), 1).is_err());
    }

    #[test]
    fn selected_entries_carry_marker() {
        let catalog = small_catalog(3, 10);
        let mut selection = SelectionState::new();
        selection.toggle("Topic number 1.");

        let page = catalog.page(&selection, 0).unwrap();
        let labels: Vec<&str> = page.entries.iter().map(|e| e.display_text.as_str()).collect();
        assert_eq!(labels, vec!["t0", "✅ t1", "t2"]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let dup_label = vec![TopicEntry::new("a", "one"), TopicEntry::new("a", "two")];
        assert_eq!(
            TopicCatalog::new(dup_label, 10).unwrap_err(),
            CatalogError::DuplicateLabel("a".to_string())
        );

        let dup_text = vec![TopicEntry::new("a", "one"), TopicEntry::new("b", "one")];
        assert_eq!(
            TopicCatalog::new(dup_text, 10).unwrap_err(),
            CatalogError::DuplicateText("one".to_string())
        );
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            TopicCatalog::new(Vec::new(), 0).unwrap_err(),
            CatalogError::InvalidPageSize(0)
        );
    }

    #[test]
    fn resolve_by_label() {
        let catalog = TopicCatalog::builtin();
        let entry = catalog.resolve("Patience").unwrap();
        assert!(entry.text.starts_with("Patience (sabr)"));
        assert!(catalog.resolve("patience").is_none());
    }
}
