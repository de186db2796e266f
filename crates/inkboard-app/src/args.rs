//! Command-line argument definitions for the Inkboard CLI.
//!
//! The CLI operates on the drawings persisted by the whiteboard: exporting a
//! tab as PNG, inspecting stored tabs and clearing a tab.

use clap::{Parser, Subcommand};
use inkboard_core::TabId;
use std::path::PathBuf;

/// Command-line arguments for the Inkboard whiteboard tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Render a stored tab to a PNG file
    Export {
        #[arg(long, value_parser = parse_tab)]
        tab: TabId,

        /// Path to the output PNG file
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,

        /// Draw grid lines under the ink
        #[arg(long)]
        grid: bool,
    },

    /// Print stroke and point counts for every configured tab
    Inspect,

    /// Remove every stroke from a stored tab
    Clear {
        #[arg(long, value_parser = parse_tab)]
        tab: TabId,
    },

    /// List keyboard shortcuts
    Shortcuts,
}

fn parse_tab(value: &str) -> Result<TabId, String> {
    let id: u32 = value
        .parse()
        .map_err(|_| format!("invalid tab id {value:?}"))?;
    TabId::try_from(id)
}
