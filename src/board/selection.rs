//! Transient set of selected leads for the active pipeline view.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, lead_id: &str, selected: bool) {
        if selected {
            self.ids.insert(lead_id.to_string());
        } else {
            self.ids.remove(lead_id);
        }
    }

    /// Toggle a whole column: if every id is already selected, deselect them
    /// all; otherwise select the union.
    pub fn select_all<'a>(&mut self, column_lead_ids: impl IntoIterator<Item = &'a str>) {
        let column: Vec<&str> = column_lead_ids.into_iter().collect();
        if column.iter().all(|id| self.ids.contains(*id)) {
            for id in column {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(column.into_iter().map(str::to_string));
        }
    }

    /// Make `lead_id` the only selected lead.
    pub fn collapse_to(&mut self, lead_id: &str) {
        self.ids.clear();
        self.ids.insert(lead_id.to_string());
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.ids.contains(lead_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bulk actions are offered whenever anything is selected.
    pub fn is_bulk_mode(&self) -> bool {
        !self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_deselect() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("L2", true);
        sel.select("L1", false);
        assert_eq!(sel.ids(), vec!["L2".to_string()]);
    }

    #[test]
    fn test_bulk_mode_follows_size() {
        let mut sel = Selection::new();
        assert!(!sel.is_bulk_mode());
        sel.select("L1", true);
        assert!(sel.is_bulk_mode());
        sel.clear();
        assert!(!sel.is_bulk_mode());
    }

    #[test]
    fn test_select_all_selects_union_when_partial() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("X", true);
        sel.select_all(["L1", "L2"]);
        assert_eq!(sel.len(), 3);
        assert!(sel.contains("L2"));
    }

    #[test]
    fn test_select_all_twice_restores_original() {
        let mut sel = Selection::new();
        sel.select("X", true);
        let original = sel.clone();
        sel.select_all(["L1", "L2"]);
        sel.select_all(["L1", "L2"]);
        assert_eq!(sel, original);
    }

    #[test]
    fn test_select_all_deselects_when_fully_selected() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("L2", true);
        sel.select("X", true);
        sel.select_all(["L1", "L2"]);
        assert_eq!(sel.ids(), vec!["X".to_string()]);
    }

    #[test]
    fn test_collapse_to_single_lead() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("L2", true);
        sel.collapse_to("L3");
        assert_eq!(sel.ids(), vec!["L3".to_string()]);
    }
}
