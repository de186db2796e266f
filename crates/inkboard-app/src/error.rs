//! Application-level errors.

use crate::config::ConfigError;
use inkboard_core::{BoardError, StorageError, TabId};
use inkboard_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] RendererError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("Tab {0} is not configured")]
    UnknownTab(TabId),

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}
