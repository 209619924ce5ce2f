//! Terminal picker surfaces
//!
//! The native surface is the desktop folder dialog (`rfd`). `rfd` reports a
//! dialog that failed to open the same way as a cancelled one, so the native
//! surface is reported as unavailable up front when the session lacks what
//! the dialog backend needs: a display and, on Linux and the BSDs, the D-Bus
//! session bus used by the desktop portal. The in-app surface is an
//! interactive prompt (`dialoguer`) that only accepts existing directories.
//!
//! Both run synchronously: the chosen location is kept until the caller takes
//! it with [`DialogPickers::take_result`] and feeds it back to the flow.

use dialoguer::{Input, theme::ColorfulTheme};
use std::path::Path;
use tracing::warn;

use super::{AcquisitionTicket, PickerSurface};
use crate::folders::{FolderError, LocationRef};

/// Picker surfaces for a terminal session
#[derive(Debug, Default)]
pub struct DialogPickers {
    restricted: bool,
    delivered: Option<(AcquisitionTicket, Option<LocationRef>)>,
}

impl DialogPickers {
    /// `restricted` skips the native dialog entirely
    #[must_use]
    pub fn new(restricted: bool) -> Self {
        Self {
            restricted,
            delivered: None,
        }
    }

    /// Take the result of the last launched picker
    pub fn take_result(&mut self) -> Option<(AcquisitionTicket, Option<LocationRef>)> {
        self.delivered.take()
    }
}

impl PickerSurface for DialogPickers {
    fn is_restricted(&self) -> bool {
        self.restricted
    }

    fn launch_native_picker(&mut self, ticket: AcquisitionTicket) -> Result<(), FolderError> {
        if let Some(reason) = missing_dialog_backend(|name| std::env::var_os(name).is_some()) {
            return Err(FolderError::LaunchUnavailable(reason.to_string()));
        }

        let picked = rfd::FileDialog::new()
            .set_title("Add folder")
            .pick_folder();

        self.delivered = Some((ticket, picked.map(LocationRef::from_path)));
        Ok(())
    }

    fn launch_in_app_picker(&mut self, ticket: AcquisitionTicket) {
        let input = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Folder to add (empty to cancel)")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                let trimmed = input.trim();
                if trimmed.is_empty() || Path::new(trimmed).is_dir() {
                    Ok(())
                } else {
                    Err(format!("{trimmed} is not a directory"))
                }
            })
            .interact_text();

        let location = match input {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => {
                let path = Path::new(text.trim());
                let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
                Some(LocationRef::from_path(path))
            }
            Err(e) => {
                warn!(error = %e, "folder prompt failed");
                None
            }
        };

        self.delivered = Some((ticket, location));
    }
}

/// Why the native dialog cannot be shown, given which environment variables are set
fn missing_dialog_backend(is_set: impl Fn(&str) -> bool) -> Option<&'static str> {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return None;
    }
    missing_portal_backend(is_set)
}

fn missing_portal_backend(is_set: impl Fn(&str) -> bool) -> Option<&'static str> {
    if !is_set("DISPLAY") && !is_set("WAYLAND_DISPLAY") {
        return Some("no graphical session");
    }
    if !is_set("DBUS_SESSION_BUS_ADDRESS") {
        return Some("no D-Bus session bus for the desktop portal");
    }
    None
}
