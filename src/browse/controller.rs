//! Browse controller
//!
//! Binds the selection model and the reorderable row list to whichever
//! container is displayed, and routes navigation commands to the folder
//! collection, the acquisition flow, and the favorites/playlist subsystems.
//!
//! # Workflow
//!
//! ```text
//! bind container ──→ capabilities resolved, rows loaded, selection cleared
//!       │
//!       ├─ root:   AddFolder → acquisition flow → result → grant + add → rebind root
//!       │          drag / swipe → folder collection (persisted)
//!       │
//!       └─ nested: EnterSelection / SelectAll / UnselectAll / toggle
//!                  AddSelectedToFavorites → favorites, selection discarded
//!                  AddSelectedToPlaylist → playlists
//! ```

use tracing::{debug, warn};

use super::menu::{MenuAction, MenuState, visible_actions};
use super::reorder::ReorderableList;
use super::selection::{SelectionModel, SelectionPhase};
use crate::acquire::{
    AcquisitionOutcome, AcquisitionTicket, FolderAcquisitionFlow, GrantStore, PickerPath,
    PickerSurface,
};
use crate::folders::{FolderError, LocationRef};
use crate::library::{Container, Item, Library, LibraryError};
use crate::prefs::{PrefChange, PrefKey};

/// Commands issued from the navigation menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddFolder,
    /// Select every row, entering selection mode first if needed
    SelectAll,
    UnselectAll,
    EnterSelection,
    AddSelectedToFavorites,
    AddSelectedToPlaylist(PlaylistTarget),
    /// Navigation item reselected: go back to the root collection
    ReselectRoot,
}

/// Where selected items go for a playlist command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistTarget {
    /// A new playlist named after the displayed container
    Create,

    /// An existing playlist
    Append(String),
}

/// The application around the browse view
pub trait Host {
    fn pickers(&mut self) -> &mut dyn PickerSurface;

    fn grants(&mut self) -> &mut dyn GrantStore;

    /// Ask the favorites view to reload, if it is displayed
    fn refresh_favorites_view(&mut self);

    /// Bring the folders view back after the in-app picker replaced it
    fn show_folders_view(&mut self);
}

/// Drives the folders browse view
pub struct BrowseController<L: Library, H: Host> {
    library: L,
    host: H,
    current: Container,
    list: ReorderableList,
    selection: SelectionModel,
    acquisition: FolderAcquisitionFlow,
}

impl<L: Library, H: Host> BrowseController<L, H> {
    /// Create a controller displaying the root folder collection
    pub fn new(library: L, host: H) -> Self {
        let mut controller = Self {
            library,
            host,
            current: Container::Root,
            list: ReorderableList::default(),
            selection: SelectionModel::default(),
            acquisition: FolderAcquisitionFlow::new(),
        };
        controller.bind_root();
        controller
    }

    #[must_use]
    pub const fn current_container(&self) -> &Container {
        &self.current
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.current.is_root()
    }

    #[must_use]
    pub fn rows(&self) -> &[Item] {
        self.list.rows()
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    #[must_use]
    pub const fn acquisition(&self) -> &FolderAcquisitionFlow {
        &self.acquisition
    }

    #[must_use]
    pub const fn library(&self) -> &L {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Display `container`: rows reloaded, selection cleared
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the container cannot be expanded; the
    /// current view is kept.
    pub fn set_current_container(&mut self, container: Container) -> Result<(), LibraryError> {
        let rows = self.library.list_children(&container)?;
        debug!(container = container.name(), rows = rows.len(), "binding container");

        self.list.replace(rows, container.capabilities());
        self.selection.reset(self.list.len());
        self.current = container;
        Ok(())
    }

    /// Open the browsable row at `row`, returning whether navigation happened
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the folder cannot be expanded.
    pub fn open(&mut self, row: usize) -> Result<bool, LibraryError> {
        match self.list.rows().get(row) {
            Some(item) if item.is_browsable() => {
                let item = item.clone();
                self.set_current_container(Container::Folder(item))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Reload the rows of the displayed container
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the container cannot be expanded.
    pub fn reload(&mut self) -> Result<(), LibraryError> {
        self.set_current_container(self.current.clone())
    }

    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.list.is_draggable()
    }

    #[must_use]
    pub const fn is_swipe_dismissable(&self) -> bool {
        self.list.is_swipe_dismissable()
    }

    /// Drag gesture: move row `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `PersistenceFailure`; rows are unchanged on error.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), FolderError> {
        self.list.on_move(from, to, self.library.folders_mut())?;
        self.selection.row_moved(from, to);
        Ok(())
    }

    /// Swipe gesture: dismiss row `index`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `PersistenceFailure`; rows are unchanged on error.
    pub fn dismiss_row(&mut self, index: usize) -> Result<Item, FolderError> {
        let removed = self.list.on_dismiss(index, self.library.folders_mut())?;
        self.selection.row_removed(index);
        Ok(removed)
    }

    /// Flip the selection flag of `row`
    pub fn toggle(&mut self, row: usize) {
        self.selection.toggle(row);
    }

    /// Leave selection mode without acting on the selection
    pub fn discard_selection(&mut self) {
        self.selection.set_selection_mode(false);
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        MenuState {
            is_root: self.current.is_root(),
            selection_active: self.selection.is_active(),
            has_selected: self.selection.has_any_selected(),
            has_rows: !self.list.is_empty(),
        }
    }

    #[must_use]
    pub fn visible_actions(&self) -> Vec<MenuAction> {
        visible_actions(self.menu_state())
    }

    /// Dispatch a menu command, returning whether it was handled
    ///
    /// `SelectAll` while browsing enters selection mode pre-filled, so the
    /// phase goes straight to `SelectionActive`; every other way into
    /// selection mode starts empty. Playlist failures are logged and the
    /// command still counts as handled.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::AddFolder => self.add_folder(),
            Command::EnterSelection => {
                self.selection.set_selection_mode(true);
                true
            }
            Command::SelectAll => {
                self.selection.set_selection_mode(true);
                self.selection.select_all();
                true
            }
            Command::UnselectAll => {
                self.selection.unselect_all();
                true
            }
            Command::AddSelectedToFavorites => self.add_selected_to_favorites(),
            Command::AddSelectedToPlaylist(target) => self.add_selected_to_playlist(target),
            Command::ReselectRoot => {
                self.bind_root();
                true
            }
        }
    }

    /// Deliver the result of a launched picker
    ///
    /// On success the root collection is displayed again. After the in-app
    /// picker the host is asked to show the folders view whatever the result.
    ///
    /// # Errors
    ///
    /// Returns `GrantDenied`, `DuplicateEntry` or `PersistenceFailure`.
    pub fn on_location_result(
        &mut self,
        ticket: AcquisitionTicket,
        result: Option<LocationRef>,
    ) -> Result<AcquisitionOutcome, FolderError> {
        let in_app = self
            .acquisition
            .pending()
            .is_some_and(|p| p.ticket == ticket && p.path == PickerPath::InApp);

        let outcome = self.acquisition.complete(
            ticket,
            result,
            self.host.grants(),
            self.library.folders_mut(),
        );

        if matches!(outcome, Ok(AcquisitionOutcome::Added { .. })) {
            self.bind_root();
        }
        if in_app {
            self.host.show_folders_view();
        }

        outcome
    }

    /// React to preference store notifications, returning whether rows were reloaded
    ///
    /// Changes caused by the folder collection's own writes are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailure` if the changed sequence cannot be read.
    pub fn on_preferences_changed(&mut self, changes: &[PrefChange]) -> Result<bool, FolderError> {
        let mut reloaded = false;

        for change in changes.iter().filter(|c| c.key == PrefKey::Folders) {
            if self.library.folders_mut().acknowledge(change) {
                continue;
            }

            if self.library.folders_mut().reload()? && self.current.is_root() {
                self.bind_root();
                reloaded = true;
            }
        }

        Ok(reloaded)
    }

    fn bind_root(&mut self) {
        let rows = self.library.folders().list_entries();
        self.list.replace(rows, Container::Root.capabilities());
        self.selection.reset(self.list.len());
        self.current = Container::Root;
    }

    fn add_folder(&mut self) -> bool {
        if !self.current.capabilities().supports_persistent_add {
            debug!(container = self.current.name(), "add folder ignored outside the root");
            return false;
        }

        match self.acquisition.request_folder(self.host.pickers()) {
            Ok(ticket) => {
                debug!(ticket = ticket.id(), "folder requested");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to launch folder picker");
                false
            }
        }
    }

    fn selected_playable(&self) -> Vec<Item> {
        let (playable, skipped): (Vec<_>, Vec<_>) = self
            .selection
            .selected_items(self.list.rows())
            .into_iter()
            .partition(Item::is_playable);

        if !skipped.is_empty() {
            debug!(count = skipped.len(), "skipping non-playable selected items");
        }
        playable
    }

    fn add_selected_to_favorites(&mut self) -> bool {
        if !self.selection.is_active() {
            return false;
        }

        let items = self.selected_playable();
        debug!(count = items.len(), "adding selection to favorites");
        if !items.is_empty() {
            self.library.favorites().add_items(items);
        }

        self.discard_selection();
        self.host.refresh_favorites_view();
        true
    }

    fn add_selected_to_playlist(&mut self, target: PlaylistTarget) -> bool {
        if !self.selection.has_any_selected() {
            return false;
        }

        let items = self.selected_playable();
        let result = match &target {
            PlaylistTarget::Create => {
                let name = self.current.name().to_string();
                self.library.playlists().create_playlist(&name, items)
            }
            PlaylistTarget::Append(name) => self.library.playlists().add_to_playlist(name, items),
        };

        if let Err(e) = result {
            warn!(error = %e, ?target, "playlist update failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::AcquisitionState;
    use crate::testing::{FakeHost, FakeLibrary, FakePickers, folder_location, playable};

    type Controller = BrowseController<FakeLibrary, FakeHost>;

    fn controller(roots: &[&str]) -> Controller {
        BrowseController::new(FakeLibrary::new(roots), FakeHost::default())
    }

    /// Root with one bookmark whose folder holds three tracks, opened
    fn nested_controller() -> Controller {
        let mut library = FakeLibrary::new(&["/music"]);
        library.set_children(
            "/music",
            vec![playable("a"), playable("b"), playable("c")],
        );
        let mut controller = BrowseController::new(library, FakeHost::default());
        assert!(controller.open(0).unwrap());
        controller
    }

    fn row_names(controller: &Controller) -> Vec<String> {
        controller.rows().iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_starts_at_root() {
        let controller = controller(&["/a", "/b"]);

        assert!(controller.is_root());
        assert_eq!(row_names(&controller), vec!["a", "b"]);
        assert!(controller.is_draggable());
        assert!(controller.is_swipe_dismissable());
    }

    #[test]
    fn test_nested_folder_is_not_draggable() {
        let controller = nested_controller();

        assert!(!controller.is_root());
        assert!(!controller.is_draggable());
        assert!(!controller.is_swipe_dismissable());
    }

    #[test]
    fn test_navigation_clears_selection() {
        let mut controller = nested_controller();
        controller.handle_command(Command::SelectAll);
        assert!(controller.selection().is_active());

        controller.set_current_container(Container::Root).unwrap();

        assert!(!controller.selection().is_active());
        assert_eq!(controller.selection_phase(), SelectionPhase::Browsing);
    }

    #[test]
    fn test_unknown_folder_keeps_current_view() {
        let mut controller = controller(&["/a"]);
        let missing = Container::Folder(Item::browsable("dir:/nowhere", "nowhere"));

        assert!(controller.set_current_container(missing).is_err());
        assert!(controller.is_root());
    }

    #[test]
    fn test_select_commands_walk_the_state_machine() {
        let mut controller = nested_controller();

        assert!(controller.handle_command(Command::EnterSelection));
        assert_eq!(controller.selection_phase(), SelectionPhase::SelectionIdle);

        assert!(controller.handle_command(Command::SelectAll));
        assert_eq!(controller.selection_phase(), SelectionPhase::SelectionActive);

        assert!(controller.handle_command(Command::UnselectAll));
        assert_eq!(controller.selection_phase(), SelectionPhase::SelectionIdle);
        assert!(!controller.selection().has_any_selected());
    }

    #[test]
    fn test_select_all_enters_selection_from_browsing() {
        let mut controller = nested_controller();
        assert_eq!(controller.selection_phase(), SelectionPhase::Browsing);

        assert!(controller.handle_command(Command::SelectAll));

        assert!(controller.selection().is_active());
        assert_eq!(controller.selection_phase(), SelectionPhase::SelectionActive);
        assert_eq!(controller.selection().selected_count(), 3);
    }

    #[test]
    fn test_failed_playlist_update_is_handled_and_keeps_selection() {
        let mut controller = nested_controller();
        controller.library_mut().playlists.fail = true;
        controller.handle_command(Command::EnterSelection);
        controller.toggle(0);

        assert!(controller.handle_command(Command::AddSelectedToPlaylist(
            PlaylistTarget::Append("Missing".into())
        )));

        assert!(controller.library().playlists.appended.is_empty());
        assert_eq!(controller.selection().selected_indices(), vec![0]);
    }

    #[test]
    fn test_add_selected_to_favorites_forwards_selection() {
        let mut controller = nested_controller();
        controller.handle_command(Command::EnterSelection);
        controller.toggle(0);
        controller.toggle(2);

        assert!(controller.handle_command(Command::AddSelectedToFavorites));

        let added = &controller.library().favorites.added;
        assert_eq!(added.len(), 1);
        let names: Vec<_> = added[0].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);

        assert!(!controller.selection().has_any_selected());
        assert_eq!(controller.selection_phase(), SelectionPhase::Browsing);
        assert_eq!(controller.host().favorites_refreshes, 1);
    }

    #[test]
    fn test_favorites_skips_browsable_rows() {
        let mut library = FakeLibrary::new(&["/music"]);
        library.set_children(
            "/music",
            vec![
                Item::browsable("dir:/music/live", "live"),
                playable("a"),
            ],
        );
        let mut controller = BrowseController::new(library, FakeHost::default());
        controller.open(0).unwrap();
        controller.handle_command(Command::SelectAll);

        controller.handle_command(Command::AddSelectedToFavorites);

        let added = &controller.library().favorites.added;
        assert_eq!(added[0].len(), 1);
        assert_eq!(added[0][0].name, "a");
    }

    #[test]
    fn test_favorites_outside_selection_mode_is_not_handled() {
        let mut controller = nested_controller();

        assert!(!controller.handle_command(Command::AddSelectedToFavorites));
        assert!(controller.library().favorites.added.is_empty());
    }

    #[test]
    fn test_create_playlist_named_after_container() {
        let mut controller = nested_controller();
        controller.handle_command(Command::EnterSelection);
        controller.toggle(1);

        assert!(controller.handle_command(Command::AddSelectedToPlaylist(PlaylistTarget::Create)));

        let created = &controller.library().playlists.created;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "music");
        assert_eq!(created[0].1[0].name, "b");
        assert!(controller.selection().has_any_selected());
    }

    #[test]
    fn test_append_to_playlist() {
        let mut controller = nested_controller();
        controller.handle_command(Command::SelectAll);

        controller.handle_command(Command::AddSelectedToPlaylist(PlaylistTarget::Append(
            "Road trip".into(),
        )));

        let appended = &controller.library().playlists.appended;
        assert_eq!(appended[0].0, "Road trip");
        assert_eq!(appended[0].1.len(), 3);
    }

    #[test]
    fn test_add_folder_rejected_outside_root() {
        let mut controller = nested_controller();

        assert!(!controller.handle_command(Command::AddFolder));
        assert!(controller.acquisition().is_idle());
        assert_eq!(controller.host().pickers.native_attempts, 0);
    }

    #[test]
    fn test_add_folder_end_to_end() {
        let mut controller = controller(&["/a"]);

        assert!(controller.handle_command(Command::AddFolder));
        let ticket = controller.host().pickers.native_launches[0];

        let outcome = controller
            .on_location_result(ticket, Some(folder_location("/b")))
            .unwrap();

        assert!(matches!(outcome, AcquisitionOutcome::Added { .. }));
        assert_eq!(row_names(&controller), vec!["a", "b"]);
        assert_eq!(controller.host().grants.granted, vec![folder_location("/b")]);
        assert_eq!(controller.host().folders_shown, 0);
    }

    #[test]
    fn test_add_folder_relaunches_after_lost_result() {
        let mut controller = controller(&[]);

        for _ in 0..4 {
            assert!(controller.handle_command(Command::AddFolder));
        }

        let launches = controller.host().pickers.native_launches.clone();
        assert_eq!(launches.len(), 4);

        let late = controller
            .on_location_result(launches[0], Some(folder_location("/old")))
            .unwrap();
        assert_eq!(late, AcquisitionOutcome::Stale);
        assert!(controller.rows().is_empty());

        let outcome = controller
            .on_location_result(launches[3], Some(folder_location("/new")))
            .unwrap();
        assert!(matches!(outcome, AcquisitionOutcome::Added { .. }));
        assert_eq!(row_names(&controller), vec!["new"]);
    }

    #[test]
    fn test_add_folder_falls_back_to_in_app_picker() {
        let mut host = FakeHost::default();
        host.pickers = FakePickers::unavailable();
        let mut controller = BrowseController::new(FakeLibrary::new(&[]), host);

        assert!(controller.handle_command(Command::AddFolder));

        assert_eq!(controller.host().pickers.in_app_launches.len(), 1);
        assert!(matches!(
            controller.acquisition().state(),
            AcquisitionState::AwaitingInAppPicker(_)
        ));

        let ticket = controller.host().pickers.in_app_launches[0];
        let outcome = controller.on_location_result(ticket, None).unwrap();

        assert_eq!(outcome, AcquisitionOutcome::Cancelled { path: PickerPath::InApp });
        assert!(controller.rows().is_empty());
        assert_eq!(controller.host().folders_shown, 1);
    }

    #[test]
    fn test_drag_on_root_persists() {
        let mut controller = controller(&["A", "B", "C"]);

        controller.move_row(0, 2).unwrap();

        assert_eq!(row_names(&controller), vec!["B", "C", "A"]);
        let persisted: Vec<_> = controller
            .library()
            .store
            .persisted()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(persisted, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_dismiss_on_nested_leaves_bookmarks() {
        let mut controller = nested_controller();

        let removed = controller.dismiss_row(0).unwrap();

        assert_eq!(removed.name, "a");
        assert_eq!(row_names(&controller), vec!["b", "c"]);
        assert_eq!(controller.library().folders().len(), 1);
        assert_eq!(controller.library().store.write_count(), 0);
    }

    #[test]
    fn test_failed_drag_keeps_rows() {
        let mut controller = controller(&["A", "B"]);
        controller.library().store.set_fail_writes(true);

        assert!(matches!(
            controller.move_row(0, 1),
            Err(FolderError::PersistenceFailure(_))
        ));
        assert_eq!(row_names(&controller), vec!["A", "B"]);
    }

    #[test]
    fn test_reselect_root() {
        let mut controller = nested_controller();

        assert!(controller.handle_command(Command::ReselectRoot));

        assert!(controller.is_root());
        assert_eq!(row_names(&controller), vec!["music"]);
    }

    #[test]
    fn test_menu_follows_state() {
        let mut controller = nested_controller();
        assert_eq!(controller.visible_actions(), vec![MenuAction::EnterSelection]);

        controller.handle_command(Command::EnterSelection);
        assert_eq!(
            controller.visible_actions(),
            vec![MenuAction::SelectAll, MenuAction::UnselectAll]
        );

        controller.toggle(0);
        assert!(controller.visible_actions().contains(&MenuAction::AddToFavorites));

        controller.handle_command(Command::ReselectRoot);
        assert_eq!(controller.visible_actions(), vec![MenuAction::AddFolder]);
    }

    #[test]
    fn test_own_writes_do_not_reload() {
        let mut controller = controller(&["A"]);
        controller.move_row(0, 0).unwrap();
        controller.library_mut().folders_mut().add_entry("B".into()).unwrap();

        let changes = controller.library().store.drain_changes();
        let reloaded = controller.on_preferences_changed(&changes).unwrap();

        assert!(!reloaded);
    }

    #[test]
    fn test_foreign_write_reloads_root() {
        let mut controller = controller(&["A"]);
        let store = controller.library().store.clone();
        store.write_foreign(vec![
            crate::folders::FolderEntry::new("X".into()),
            crate::folders::FolderEntry::new("Y".into()),
        ]);

        let reloaded = controller
            .on_preferences_changed(&store.drain_changes())
            .unwrap();

        assert!(reloaded);
        assert_eq!(row_names(&controller), vec!["X", "Y"]);
    }

    #[test]
    fn test_foreign_write_while_nested_keeps_view() {
        let mut controller = nested_controller();
        let store = controller.library().store.clone();
        store.write_foreign(Vec::new());

        let reloaded = controller
            .on_preferences_changed(&store.drain_changes())
            .unwrap();

        assert!(!reloaded);
        assert!(!controller.is_root());
        assert!(controller.library().folders().is_empty());
    }
}
