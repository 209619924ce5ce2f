//! Browse module - folder list selection and reordering
//!
//! UI-agnostic model behind the folders view. The same list backs both the
//! root bookmark management and nested browsing of folder contents.
//!
//! # Architecture
//!
//! - `selection`: row selection state machine
//! - `reorder`: drag/dismiss edits, written back to the root collection only
//! - `menu`: navigation menu visibility as a pure function
//! - `controller`: binds the above to the displayed container and routes commands

pub mod controller;
pub mod menu;
pub mod reorder;
pub mod selection;

pub use controller::{BrowseController, Command, Host, PlaylistTarget};
pub use menu::{MenuAction, MenuState, visible_actions};
pub use reorder::{EntryEditor, ReorderableList};
pub use selection::{SelectionModel, SelectionPhase};
