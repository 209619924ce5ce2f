//! Row selection model
//!
//! ```text
//!            enter selection
//! Browsing ───────────────────→ SelectionIdle
//!    ↑                            │  ↑
//!    │ cancel / navigate   toggle │  │ toggle
//!    │                 select all │  │ unselect all
//!    │                            ↓  │
//!    └──────────────────────── SelectionActive
//! ```
//!
//! Selection flags only exist while selection mode is active; leaving the
//! mode drops them.

use crate::library::Item;

/// Observable state of the selection model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Selection mode is off
    Browsing,

    /// Selection mode is on, nothing selected
    SelectionIdle,

    /// Selection mode is on, at least one row selected
    SelectionActive,
}

/// Tracks which rows of the displayed list are selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    rows: usize,
    flags: Option<Vec<bool>>,
}

impl SelectionModel {
    /// Model for a list of `rows` rows, not in selection mode
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self { rows, flags: None }
    }

    /// Drop any selection and track a new list of `rows` rows
    pub fn reset(&mut self, rows: usize) {
        self.rows = rows;
        self.flags = None;
    }

    /// Enter or leave selection mode
    ///
    /// Entering starts with nothing selected; entering again keeps the
    /// current selection.
    pub fn set_selection_mode(&mut self, active: bool) {
        if !active {
            self.flags = None;
        } else if self.flags.is_none() {
            self.flags = Some(vec![false; self.rows]);
        }
    }

    pub fn select_all(&mut self) {
        self.fill(true);
    }

    pub fn unselect_all(&mut self) {
        self.fill(false);
    }

    /// Flip the flag of `row`; ignored outside selection mode or out of range
    pub fn toggle(&mut self, row: usize) {
        if let Some(flag) = self.flags.as_mut().and_then(|f| f.get_mut(row)) {
            *flag = !*flag;
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.flags.is_some()
    }

    #[must_use]
    pub fn is_selected(&self, row: usize) -> bool {
        self.flags
            .as_ref()
            .and_then(|f| f.get(row))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn has_any_selected(&self) -> bool {
        self.flags.as_ref().is_some_and(|f| f.contains(&true))
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.flags
            .as_ref()
            .map_or(0, |f| f.iter().filter(|s| **s).count())
    }

    /// Selected row indices, in list order
    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        self.flags.as_ref().map_or_else(Vec::new, |f| {
            f.iter()
                .enumerate()
                .filter_map(|(i, s)| s.then_some(i))
                .collect()
        })
    }

    /// Selected items of `rows`, in list order (not selection order)
    #[must_use]
    pub fn selected_items(&self, rows: &[Item]) -> Vec<Item> {
        self.selected_indices()
            .into_iter()
            .filter_map(|i| rows.get(i).cloned())
            .collect()
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match &self.flags {
            None => SelectionPhase::Browsing,
            Some(_) if self.has_any_selected() => SelectionPhase::SelectionActive,
            Some(_) => SelectionPhase::SelectionIdle,
        }
    }

    /// Keep flags attached to their rows after a row move
    pub fn row_moved(&mut self, from: usize, to: usize) {
        if let Some(flags) = self.flags.as_mut() {
            if from < flags.len() && to < flags.len() {
                let flag = flags.remove(from);
                flags.insert(to, flag);
            }
        }
    }

    /// Drop the flag of a removed row
    pub fn row_removed(&mut self, index: usize) {
        self.rows = self.rows.saturating_sub(1);
        if let Some(flags) = self.flags.as_mut() {
            if index < flags.len() {
                flags.remove(index);
            }
        }
    }

    fn fill(&mut self, value: bool) {
        if let Some(flags) = self.flags.as_mut() {
            flags.fill(value);
        }
    }
}
