//! Inkboard Application
//!
//! Session shell around the drawing engine, plus the command-line tool that
//! works on the drawings it persists.

mod args;
pub mod config;
mod error;
mod session;
mod shortcuts;

pub use args::{Args, CliCommand};
pub use config::{AppConfig, ConfigError, load_config};
pub use error::AppError;
pub use session::Session;
pub use shortcuts::{Shortcut, ShortcutRegistry, command_for_key};

use inkboard_core::{BlobStore, Command, DrawingStore, FileStore, TabId, Whiteboard};
use inkboard_render::GridStyle;
use std::fs;

/// Run the CLI with the parsed arguments.
pub fn run(args: &Args) -> Result<(), AppError> {
    let config = load_config(args.config.as_ref())?;

    match &args.command {
        CliCommand::Export { tab, output, grid } => {
            let png = export(&config, open_store(&config)?, *tab, *grid)?;
            fs::write(output, &png).map_err(|e| AppError::Write {
                path: output.clone(),
                message: e.to_string(),
            })?;
            log::info!("Exported tab {} to {}", tab, output.display());
        }
        CliCommand::Inspect => {
            print!("{}", inspect(&config, open_store(&config)?));
        }
        CliCommand::Clear { tab } => {
            let removed = clear(&config, open_store(&config)?, *tab)?;
            log::info!("Cleared {} strokes from tab {}", removed, tab);
        }
        CliCommand::Shortcuts => {
            print!("{}", ShortcutRegistry::format_all());
        }
    }
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<FileStore, AppError> {
    let store = match &config.storage_dir {
        Some(dir) => FileStore::new(dir.clone())?,
        None => FileStore::default_location()?,
    };
    log::debug!("Using drawings in {}", store.base_path().display());
    Ok(store)
}

fn check_tab(config: &AppConfig, tab: TabId) -> Result<(), AppError> {
    if config.tabs.contains(&tab) {
        Ok(())
    } else {
        Err(AppError::UnknownTab(tab))
    }
}

/// Render a stored tab to PNG bytes at the configured canvas size.
pub fn export<S: BlobStore>(
    config: &AppConfig,
    store: S,
    tab: TabId,
    grid: bool,
) -> Result<Vec<u8>, AppError> {
    check_tab(config, tab)?;
    let board = Whiteboard::new(&[tab], store)?;
    let mut session = Session::new(board, GridStyle::with_cell_size(config.cell_size));
    session.mount_all(config.canvas_width, config.canvas_height)?;
    if grid {
        session.command(Command::ToggleGrid);
    }

    let layers = session.layers(tab).ok_or(AppError::UnknownTab(tab))?;
    Ok(layers.encode_png()?)
}

/// Summarize the stored strokes of every configured tab.
pub fn inspect<S: BlobStore>(config: &AppConfig, store: S) -> String {
    let drawings = DrawingStore::new(store);
    let mut out = String::new();
    for &tab in &config.tabs {
        let strokes = drawings.load(tab);
        let points: usize = strokes.iter().map(|s| s.len()).sum();
        out.push_str(&format!(
            "tab {}: {} strokes, {} points\n",
            tab,
            strokes.len(),
            points
        ));
    }
    out
}

/// Clear a stored tab as an engine edit. Returns how many strokes were removed.
pub fn clear<S: BlobStore>(config: &AppConfig, store: S, tab: TabId) -> Result<usize, AppError> {
    check_tab(config, tab)?;
    let mut board = Whiteboard::new(&[tab], store)?;
    let before = board.canvas().len();
    board.execute(Command::Clear);
    let removed = before - board.canvas().len();
    if removed > 0 {
        board.save_active()?;
    }
    Ok(removed)
}
