//! Reorderable row list
//!
//! Move and dismiss gestures always update the displayed rows. They are only
//! written back to the owning container when the bound container supports
//! reordering (the root folder collection); on any other container the edit
//! is visual only.

use tracing::debug;

use crate::folders::{FolderCollection, FolderError};
use crate::library::{Capabilities, Item};

/// An owner that accepts row edits
pub trait EntryEditor {
    /// # Errors
    ///
    /// Returns `FolderError` if the indices are invalid or the edit cannot be persisted.
    fn move_entry(&mut self, from: usize, to: usize) -> Result<(), FolderError>;

    /// # Errors
    ///
    /// Returns `FolderError` if the index is invalid or the edit cannot be persisted.
    fn remove_entry(&mut self, index: usize) -> Result<(), FolderError>;
}

impl EntryEditor for FolderCollection {
    fn move_entry(&mut self, from: usize, to: usize) -> Result<(), FolderError> {
        Self::move_entry(self, from, to)
    }

    fn remove_entry(&mut self, index: usize) -> Result<(), FolderError> {
        Self::remove_entry(self, index).map(|_| ())
    }
}

/// Displayed rows of the bound container
#[derive(Debug, Clone, Default)]
pub struct ReorderableList {
    rows: Vec<Item>,
    capabilities: Capabilities,
}

impl ReorderableList {
    #[must_use]
    pub fn new(rows: Vec<Item>, capabilities: Capabilities) -> Self {
        Self { rows, capabilities }
    }

    /// Replace the rows and the capabilities they were bound with
    pub fn replace(&mut self, rows: Vec<Item>, capabilities: Capabilities) {
        self.rows = rows;
        self.capabilities = capabilities;
    }

    #[must_use]
    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.capabilities.supports_reorder
    }

    #[must_use]
    pub const fn is_swipe_dismissable(&self) -> bool {
        self.capabilities.supports_reorder
    }

    /// Move the row at `from` to `to`
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if either index is outside the displayed rows
    /// - any error from the owner; the rows are left as they were
    pub fn on_move(
        &mut self,
        from: usize,
        to: usize,
        owner: &mut dyn EntryEditor,
    ) -> Result<(), FolderError> {
        self.check_index(from)?;
        self.check_index(to)?;

        if self.capabilities.supports_reorder {
            owner.move_entry(from, to)?;
        } else {
            debug!(from, to, "move not written back, container is read-only");
        }

        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        Ok(())
    }

    /// Remove the row at `index`, returning it
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index` is outside the displayed rows
    /// - any error from the owner; the rows are left as they were
    pub fn on_dismiss(
        &mut self,
        index: usize,
        owner: &mut dyn EntryEditor,
    ) -> Result<Item, FolderError> {
        self.check_index(index)?;

        if self.capabilities.supports_reorder {
            owner.remove_entry(index)?;
        } else {
            debug!(index, "dismiss not written back, container is read-only");
        }

        Ok(self.rows.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<(), FolderError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(FolderError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }
}
