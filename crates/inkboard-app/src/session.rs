//! A running whiteboard: the engine plus the mounted raster layers of each tab.

use crate::shortcuts::command_for_key;
use inkboard_core::{
    BlobStore, CanvasGeometry, Command, PointerEvent, RawPointer, Repaint, TabId, Whiteboard,
    normalize,
};
use inkboard_render::{GridStyle, RenderResult, TabLayers, parse_color};
use std::collections::BTreeMap;

/// Routes host input into the engine and applies the resulting render work.
///
/// Tabs without mounted layers still receive edits; drawing to them is
/// skipped until they are mounted.
#[derive(Debug)]
pub struct Session<S: BlobStore> {
    board: Whiteboard<S>,
    layers: BTreeMap<TabId, TabLayers>,
    geometry: Option<CanvasGeometry>,
    grid_style: GridStyle,
}

impl<S: BlobStore> Session<S> {
    pub fn new(board: Whiteboard<S>, grid_style: GridStyle) -> Self {
        Self {
            board,
            layers: BTreeMap::new(),
            geometry: None,
            grid_style,
        }
    }

    pub fn board(&self) -> &Whiteboard<S> {
        &self.board
    }

    pub fn into_board(self) -> Whiteboard<S> {
        self.board
    }

    pub fn grid_style(&self) -> &GridStyle {
        &self.grid_style
    }

    /// Layers of a tab, if mounted.
    pub fn layers(&self, tab: TabId) -> Option<&TabLayers> {
        self.layers.get(&tab)
    }

    /// Attach layers to a tab. If it is the active tab it is drawn at once.
    pub fn mount(&mut self, tab: TabId, layers: TabLayers) {
        log::debug!("Mounting layers for tab {}", tab);
        self.layers.insert(tab, layers);
        if tab == self.board.active_tab() {
            self.render(Repaint::all());
        }
    }

    /// Create and mount raster layers of the given size for every tab.
    pub fn mount_all(&mut self, width: u32, height: u32) -> RenderResult<()> {
        let tabs: Vec<TabId> = self.board.tab_ids().collect();
        for tab in tabs {
            self.mount(tab, TabLayers::new(width, height)?);
        }
        Ok(())
    }

    pub fn unmount(&mut self, tab: TabId) -> Option<TabLayers> {
        self.layers.remove(&tab)
    }

    /// Update the layout of the canvas element used to normalize input.
    pub fn set_geometry(&mut self, geometry: Option<CanvasGeometry>) {
        self.geometry = geometry;
    }

    pub fn pointer_down(&mut self, raw: &RawPointer) {
        let position = normalize(raw, self.geometry.as_ref());
        self.pointer(PointerEvent::Down { position });
    }

    pub fn pointer_move(&mut self, raw: &RawPointer) {
        let position = normalize(raw, self.geometry.as_ref());
        self.pointer(PointerEvent::Move { position });
    }

    pub fn pointer_up(&mut self, raw: &RawPointer) {
        let position = normalize(raw, self.geometry.as_ref());
        self.pointer(PointerEvent::Up { position });
    }

    pub fn pointer_leave(&mut self) {
        self.pointer(PointerEvent::Leave);
    }

    /// Feed an already normalized pointer event.
    pub fn pointer(&mut self, event: PointerEvent) {
        let repaint = self.board.handle_pointer(event);
        self.render(repaint);
    }

    pub fn command(&mut self, command: Command) {
        if let Command::SetColor(color) = &command {
            if parse_color(color).is_none() {
                log::warn!("Unrecognized color {:?}, strokes will be drawn in black", color);
            }
        }
        let repaint = self.board.execute(command);
        self.render(repaint);
    }

    /// Handle a key press. Returns true if it triggered a command.
    ///
    /// Shortcuts are ignored during a gesture and while a text field has
    /// keyboard focus.
    pub fn key(&mut self, key: &str, text_focus: bool) -> bool {
        if text_focus || self.board.is_gesture_active() {
            return false;
        }
        let Some(command) = command_for_key(key) else {
            return false;
        };
        log::debug!("Shortcut {:?}: {}", key, command.name());
        self.command(command);
        true
    }

    fn render(&mut self, repaint: Repaint) {
        if repaint.is_none() {
            return;
        }
        let tab = self.board.active_tab();
        let Some(layers) = self.layers.get_mut(&tab) else {
            log::trace!("Tab {} has no layers, skipping repaint", tab);
            return;
        };
        layers.apply(
            &repaint,
            self.board.canvas(),
            self.board.tools().grid_visible,
            &self.grid_style,
        );
    }
}
