//! Foldr CLI application entry point
//!
//! Manages the folder bookmarks of the media library from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List bookmarks (default command)
//! foldr
//! foldr list
//!
//! # Bookmark a folder by path, or pick one interactively
//! foldr add ~/Music/Jazz
//! foldr add
//!
//! # Reorder and remove bookmarks by index
//! foldr move 2 0
//! foldr remove 1
//!
//! # Quiet mode (only output results)
//! foldr -q list
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/foldr/config.toml` on Linux) and created with defaults on first run.

use colored::Colorize;
use foldr::{
    FolderCollection, FoldrError, LocationRef,
    acquire::{AcquisitionOutcome, DialogPickers, FolderAcquisitionFlow, GrantStore},
    cli::{Cli, Commands, ConfigCommands},
    config::FoldrConfig,
    logging,
    prefs::SledStore,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

type Result<T> = std::result::Result<T, FoldrError>;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = FoldrConfig::load()?;
    logging::init(&config.log_level)?;

    let cli = Cli::parse_args();
    let quiet = cli.quiet;
    let restricted = cli.restricted || config.restricted;

    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(&config, *command);
    }

    debug!(store = %config.store_path.display(), "opening bookmark store");
    let store = SledStore::open(&config.store_path)?;
    let mut folders = FolderCollection::load(Box::new(store.clone()))?;

    match command {
        Commands::List => handle_list_command(&folders, quiet),
        Commands::Add { path: Some(path) } => {
            handle_add_path_command(&mut folders, store, &path, quiet)
        }
        Commands::Add { path: None } => {
            handle_pick_command(&mut folders, store, restricted, quiet)
        }
        Commands::Remove { index } => {
            let removed = folders.remove_entry(index)?;
            if !quiet {
                println!("{} Removed {}", "✓".green().bold(), removed.name.yellow());
            }
            Ok(())
        }
        Commands::Move { from, to } => {
            folders.move_entry(from, to)?;
            if !quiet {
                println!("{} Moved {from} → {to}", "✓".green().bold());
            }
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    }
}

fn handle_list_command(folders: &FolderCollection, quiet: bool) -> Result<()> {
    let entries = folders.entries();

    if entries.is_empty() {
        if !quiet {
            println!("No folders added yet. Use 'foldr add' to bookmark one.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{}", "Folders:".bold());
    }

    for (index, entry) in entries.iter().enumerate() {
        let added = entry
            .added_at()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        if quiet {
            println!("{}", entry.location);
        } else {
            println!(
                "  {:>3}  {}  {}  {}",
                index.to_string().cyan(),
                entry.name.bold(),
                entry.location.as_str().dimmed(),
                added.dimmed()
            );
        }
    }

    if !quiet {
        println!("{} folders total", entries.len().to_string().bold());
    }

    Ok(())
}

fn handle_add_path_command(
    folders: &mut FolderCollection,
    mut grants: SledStore,
    path: &Path,
    quiet: bool,
) -> Result<()> {
    let canonical = path.canonicalize().map_err(|e| {
        FoldrError::InvalidInput(format!("Cannot access {}: {e}", path.display()))
    })?;
    let location = LocationRef::from_path(&canonical);

    grants.persist_access_grant(&location)?;
    folders.add_entry(location.clone())?;

    if !quiet {
        println!("{} Added {}", "✓".green().bold(), location.to_string().yellow());
    }
    Ok(())
}

fn handle_pick_command(
    folders: &mut FolderCollection,
    mut grants: SledStore,
    restricted: bool,
    quiet: bool,
) -> Result<()> {
    let mut pickers = DialogPickers::new(restricted);
    let mut flow = FolderAcquisitionFlow::new();

    let ticket = flow.request_folder(&mut pickers)?;
    let (delivered, result) = pickers.take_result().unwrap_or((ticket, None));

    match flow.complete(delivered, result, &mut grants, folders)? {
        AcquisitionOutcome::Added { location, .. } => {
            if !quiet {
                println!("{} Added {}", "✓".green().bold(), location.to_string().yellow());
            }
        }
        AcquisitionOutcome::Cancelled { .. } => {
            if !quiet {
                println!("{} No folder chosen", "ℹ".blue().bold());
            }
        }
        AcquisitionOutcome::Stale => {}
    }
    Ok(())
}

fn handle_config_command(config: &FoldrConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| FoldrError::InvalidInput(format!("Failed to render config: {e}")))?;
            print!("{rendered}");
        }
        ConfigCommands::Path => {
            let path: PathBuf = FoldrConfig::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
