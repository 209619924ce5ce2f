//! Folder acquisition flow
//!
//! Obtains a new folder from the user through one of two surfaces:
//!
//! ```text
//! Idle ── request ──→ native picker launched? ── yes ──→ AwaitingExternalPicker ──┐
//!                          │ LaunchUnavailable                                    │
//!                          │ (or restricted profile)                              │ result
//!                          ↓                                                      │
//!                     AwaitingInAppPicker ────────────────────────────────────────┤
//!                                                                                 ↓
//!                                                                               Idle
//! ```
//!
//! At most one acquisition is pending. Each launch is tagged with an
//! [`AcquisitionTicket`]; a result is applied only if its ticket matches the
//! pending one, and the pending state is consumed on the first result, so the
//! continuation runs at most once.

use tracing::{debug, info, warn};

use crate::folders::{FolderCollection, FolderError, LocationRef};

pub mod pickers;

pub use pickers::DialogPickers;

/// Identifies one launched acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AcquisitionTicket(u64);

impl AcquisitionTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Which surface the pending acquisition went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPath {
    /// Platform location picker
    External,

    /// In-app file picker restricted to folders
    InApp,
}

/// The one acquisition awaiting its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAcquisition {
    pub ticket: AcquisitionTicket,
    pub path: PickerPath,
}

/// State of the acquisition flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionState {
    #[default]
    Idle,
    AwaitingExternalPicker(PendingAcquisition),
    AwaitingInAppPicker(PendingAcquisition),
}

/// How a completed acquisition ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// Access was granted and the folder bookmarked
    Added { location: LocationRef, path: PickerPath },

    /// The user returned without choosing a folder
    Cancelled { path: PickerPath },

    /// The result did not belong to the pending acquisition and was dropped
    Stale,
}

/// Surfaces that let the user choose a location
///
/// Launching only shows the surface; the chosen location is delivered later
/// through [`FolderAcquisitionFlow::complete`] with the same ticket.
pub trait PickerSurface {
    /// Whether the native surface must be skipped (embedded/automotive profile)
    fn is_restricted(&self) -> bool {
        false
    }

    /// # Errors
    ///
    /// Returns `FolderError::LaunchUnavailable` if the native picker cannot be shown.
    fn launch_native_picker(&mut self, ticket: AcquisitionTicket) -> Result<(), FolderError>;

    fn launch_in_app_picker(&mut self, ticket: AcquisitionTicket);
}

/// Store for long-lived access grants
pub trait GrantStore {
    /// # Errors
    ///
    /// - `GrantDenied` if access to the location cannot be granted
    /// - `PersistenceFailure` if the grant cannot be recorded
    fn persist_access_grant(&mut self, location: &LocationRef) -> Result<(), FolderError>;
}

/// Two-path state machine for acquiring a folder
#[derive(Debug, Default)]
pub struct FolderAcquisitionFlow {
    state: AcquisitionState,
    last_ticket: u64,
}

impl FolderAcquisitionFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> AcquisitionState {
        self.state
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, AcquisitionState::Idle)
    }

    #[must_use]
    pub const fn pending(&self) -> Option<PendingAcquisition> {
        match self.state {
            AcquisitionState::Idle => None,
            AcquisitionState::AwaitingExternalPicker(p) | AcquisitionState::AwaitingInAppPicker(p) => {
                Some(p)
            }
        }
    }

    /// Launch a picker for a new folder
    ///
    /// Tries the native picker first unless the surface is restricted, and
    /// falls back to the in-app picker if the native one is unavailable. A
    /// request while another is pending supersedes it: a late result for the
    /// old ticket is dropped as stale.
    ///
    /// # Errors
    ///
    /// Returns any launch error other than `LaunchUnavailable`; the flow stays idle.
    pub fn request_folder(
        &mut self,
        surface: &mut dyn PickerSurface,
    ) -> Result<AcquisitionTicket, FolderError> {
        if let Some(pending) = self.pending() {
            debug!(ticket = pending.ticket.id(), "superseding pending folder request");
            self.state = AcquisitionState::Idle;
        }

        self.last_ticket += 1;
        let ticket = AcquisitionTicket(self.last_ticket);

        if surface.is_restricted() {
            debug!("restricted profile, skipping native picker");
        } else {
            // Set before launching: a surface may deliver its result right away.
            self.state = AcquisitionState::AwaitingExternalPicker(PendingAcquisition {
                ticket,
                path: PickerPath::External,
            });

            match surface.launch_native_picker(ticket) {
                Ok(()) => return Ok(ticket),
                Err(FolderError::LaunchUnavailable(reason)) => {
                    debug!(%reason, "native picker unavailable, using in-app picker");
                }
                Err(e) => {
                    self.state = AcquisitionState::Idle;
                    return Err(e);
                }
            }
        }

        self.state = AcquisitionState::AwaitingInAppPicker(PendingAcquisition {
            ticket,
            path: PickerPath::InApp,
        });
        surface.launch_in_app_picker(ticket);
        Ok(ticket)
    }

    /// Apply the result delivered for `ticket`
    ///
    /// A chosen location gets a persisted access grant and is added to
    /// `folders`; no location means the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns `GrantDenied`, `DuplicateEntry` or `PersistenceFailure`. The
    /// pending acquisition is consumed either way.
    pub fn complete(
        &mut self,
        ticket: AcquisitionTicket,
        result: Option<LocationRef>,
        grants: &mut dyn GrantStore,
        folders: &mut FolderCollection,
    ) -> Result<AcquisitionOutcome, FolderError> {
        let Some(pending) = self.take_pending(ticket) else {
            warn!(ticket = ticket.id(), "dropping result of unknown folder request");
            return Ok(AcquisitionOutcome::Stale);
        };

        let Some(location) = result else {
            debug!(path = ?pending.path, "folder request cancelled");
            return Ok(AcquisitionOutcome::Cancelled { path: pending.path });
        };

        grants.persist_access_grant(&location)?;
        folders.add_entry(location.clone())?;

        info!(%location, path = ?pending.path, "folder acquired");
        Ok(AcquisitionOutcome::Added {
            location,
            path: pending.path,
        })
    }

    fn take_pending(&mut self, ticket: AcquisitionTicket) -> Option<PendingAcquisition> {
        let pending = self.pending().filter(|p| p.ticket == ticket)?;
        self.state = AcquisitionState::Idle;
        Some(pending)
    }
}
