use std::collections::HashSet;

use crate::catalog::{CatalogPage, TopicCatalog};
use crate::error::Result;

/// Topics chosen so far plus the page currently on screen.
///
/// Topics are kept in the order they were picked so confirmations can list
/// them that way; equality checks that matter treat it as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    chosen: Vec<String>,
    current_page: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `full_text`. Returns whether it is now selected.
    pub fn toggle(&mut self, full_text: &str) -> bool {
        if let Some(pos) = self.chosen.iter().position(|t| t == full_text) {
            self.chosen.remove(pos);
            false
        } else {
            self.chosen.push(full_text.to_string());
            true
        }
    }

    pub fn contains(&self, full_text: &str) -> bool {
        self.chosen.iter().any(|t| t == full_text)
    }

    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Move to `page_index` if the catalog has it; otherwise nothing changes.
    pub fn set_page(&mut self, catalog: &TopicCatalog, page_index: i64) -> Result<usize> {
        let index = catalog.validate_page(page_index)?;
        self.current_page = index;
        Ok(index)
    }

    /// Record a page the catalog already produced as the one on screen.
    pub fn show(&mut self, page: &CatalogPage) {
        self.current_page = page.index;
    }

    /// Same topics regardless of pick order.
    pub fn same_topics(&self, other: &SelectionState) -> bool {
        let mine: HashSet<&str> = self.chosen.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = other.chosen.iter().map(String::as_str).collect();
        mine == theirs
    }

    pub fn into_topics(self) -> Vec<String> {
        self.chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn keeps_pick_order() {
        let mut selection = SelectionState::new();
        selection.toggle("b");
        selection.toggle("a");
        selection.toggle("c");
        selection.toggle("a");
        assert_eq!(selection.chosen(), ["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn invalid_page_leaves_state_untouched() {
        let catalog = TopicCatalog::builtin();
        let mut selection = SelectionState::new();
        selection.set_page(&catalog, 1).unwrap();

        let before = selection.clone();
        let err = selection.set_page(&catalog, 7).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPage { requested: 7, .. }));
        assert_eq!(selection, before);
    }

    #[test]
    fn show_tracks_the_rendered_page() {
        let catalog = TopicCatalog::builtin();
        let mut selection = SelectionState::new();
        let page = catalog.page(&selection, 2).unwrap();
        selection.show(&page);
        assert_eq!(selection.current_page(), 2);
    }

    #[test]
    fn same_topics_ignores_order() {
        let mut left = SelectionState::new();
        left.toggle("x");
        left.toggle("y");
        let mut right = SelectionState::new();
        right.toggle("y");
        right.toggle("x");
        assert!(left.same_topics(&right));
        assert_ne!(left, right);
    }
}
