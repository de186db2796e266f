//! Inkboard Core Library
//!
//! Platform-agnostic drawing engine for the Inkboard classroom whiteboard:
//! per-tab stroke lists, the pointer gesture state machine, the proximity
//! eraser, undo/redo history and stroke persistence.

pub mod canvas;
pub mod commands;
pub mod eraser;
pub mod history;
pub mod input;
pub mod persistence;
pub mod repaint;
pub mod storage;
pub mod stroke;
pub mod tools;
pub mod whiteboard;

pub use canvas::{TabCanvas, TabId};
pub use commands::Command;
pub use history::History;
pub use input::{CanvasGeometry, PointerEvent, RawPointer, normalize};
pub use persistence::DrawingStore;
pub use repaint::{InkRepaint, Repaint};
pub use storage::{BlobStore, MemoryStore, StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
pub use stroke::Stroke;
pub use tools::{Gesture, Mode, ToolManager, ToolState, WidthPreset};
pub use whiteboard::{BoardError, Whiteboard};
