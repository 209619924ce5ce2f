//! Navigation menu visibility
//!
//! Visibility is a pure function of [`MenuState`]:
//!
//! | root | selection mode | any selected | visible                                  |
//! |------|----------------|--------------|------------------------------------------|
//! | yes  | -              | -            | AddFolder                                |
//! | no   | no             | -            | EnterSelection                           |
//! | no   | yes            | no           | SelectAll, UnselectAll                   |
//! | no   | yes            | yes          | ... plus AddToFavorites, playlist actions |
//!
//! A nested container without rows shows nothing.

/// An action that can appear in the navigation menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    AddFolder,
    EnterSelection,
    SelectAll,
    UnselectAll,
    AddToFavorites,
    CreatePlaylist,
    AddToPlaylist,
}

impl MenuAction {
    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AddFolder => "Add folder",
            Self::EnterSelection => "Select",
            Self::SelectAll => "Select all",
            Self::UnselectAll => "Unselect all",
            Self::AddToFavorites => "Add to favorites",
            Self::CreatePlaylist => "Create playlist",
            Self::AddToPlaylist => "Add to playlist",
        }
    }
}

/// Inputs that decide menu visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub is_root: bool,
    pub selection_active: bool,
    pub has_selected: bool,
    pub has_rows: bool,
}

/// Actions visible for `state`, in menu order
#[must_use]
pub fn visible_actions(state: MenuState) -> Vec<MenuAction> {
    if state.is_root {
        return vec![MenuAction::AddFolder];
    }

    if !state.has_rows {
        return Vec::new();
    }

    if !state.selection_active {
        return vec![MenuAction::EnterSelection];
    }

    let mut actions = vec![MenuAction::SelectAll, MenuAction::UnselectAll];
    if state.has_selected {
        actions.extend([
            MenuAction::AddToFavorites,
            MenuAction::CreatePlaylist,
            MenuAction::AddToPlaylist,
        ]);
    }
    actions
}
