//! The drawing engine: tabs, tools, gestures and persistence.

use crate::canvas::{TabCanvas, TabId};
use crate::commands::Command;
use crate::eraser::eraser_radius;
use crate::input::PointerEvent;
use crate::persistence::DrawingStore;
use crate::repaint::{InkRepaint, Repaint};
use crate::storage::{BlobStore, StorageResult};
use crate::tools::{Gesture, Mode, ToolManager, ToolState};
use kurbo::Point;
use std::collections::BTreeMap;
use thiserror::Error;

/// Engine construction errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("At least one tab is required")]
    NoTabs,
}

/// A set of tab canvases sharing one tool state, one active at a time.
///
/// Every operation runs synchronously and returns the render work it needs
/// on the active tab.
#[derive(Debug)]
pub struct Whiteboard<S: BlobStore> {
    tabs: BTreeMap<TabId, TabCanvas>,
    active: TabId,
    tools: ToolManager,
    store: DrawingStore<S>,
}

impl<S: BlobStore> Whiteboard<S> {
    /// Create an engine for the given tabs. The first id becomes active and
    /// is loaded from `store`.
    pub fn new(tab_ids: &[TabId], store: S) -> Result<Self, BoardError> {
        let &active = tab_ids.first().ok_or(BoardError::NoTabs)?;
        let tabs = tab_ids
            .iter()
            .map(|&id| (id, TabCanvas::new(id)))
            .collect();

        let mut board = Self {
            tabs,
            active,
            tools: ToolManager::new(),
            store: DrawingStore::new(store),
        };
        board.load_active();
        Ok(board)
    }

    /// Id of the tab receiving input.
    pub fn active_tab(&self) -> TabId {
        self.active
    }

    /// All tab ids in ascending order.
    pub fn tab_ids(&self) -> impl Iterator<Item = TabId> + '_ {
        self.tabs.keys().copied()
    }

    pub fn has_tab(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    pub fn tab(&self, id: TabId) -> Option<&TabCanvas> {
        self.tabs.get(&id)
    }

    /// The tab receiving input.
    pub fn canvas(&self) -> &TabCanvas {
        &self.tabs[&self.active]
    }

    fn canvas_mut(&mut self) -> &mut TabCanvas {
        self.tabs
            .get_mut(&self.active)
            .expect("active tab is always present")
    }

    /// Tool state in effect.
    pub fn tools(&self) -> &ToolState {
        self.tools.state()
    }

    pub fn gesture(&self) -> &Gesture {
        self.tools.gesture()
    }

    /// Check if a pointer gesture is in progress.
    pub fn is_gesture_active(&self) -> bool {
        self.tools.is_active()
    }

    /// Get a reference to the persistence layer.
    pub fn store(&self) -> &DrawingStore<S> {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store.into_backend()
    }

    /// Process a pointer event in canvas-local coordinates.
    ///
    /// Down and move events at non-finite positions are dropped.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Repaint {
        if let PointerEvent::Down { position } | PointerEvent::Move { position } = event {
            if !position.is_finite() {
                log::warn!("Dropping {:?} at non-finite position", event);
                return Repaint::none();
            }
        }
        match (self.tools.gesture().clone(), event) {
            (Gesture::Idle, PointerEvent::Down { position }) => match self.tools.state().mode {
                Mode::Draw => self.start_drawing(position),
                Mode::Erase => self.start_erasing(position),
            },
            (Gesture::Drawing, PointerEvent::Move { position }) => {
                self.continue_drawing(position)
            }
            (Gesture::Erasing { radius }, PointerEvent::Move { position }) => {
                self.erase_at(position, radius)
            }
            (Gesture::Drawing | Gesture::Erasing { .. }, e) if e.ends_gesture() => {
                self.finish_gesture()
            }
            (gesture, event) => {
                log::trace!("Ignoring {:?} while {:?}", event, gesture);
                Repaint::none()
            }
        }
    }

    fn start_drawing(&mut self, position: Point) -> Repaint {
        let ToolState { color, width, .. } = self.tools.state().clone();
        let index = self.canvas_mut().begin_stroke(position, color.clone(), width);
        self.tools.start_drawing();
        log::debug!(
            "Tab {}: drawing stroke {} in {} at {:?}",
            self.active,
            index,
            color,
            position
        );
        Repaint {
            ink: InkRepaint::Dot {
                center: position,
                color,
                width,
            },
            grid: false,
        }
    }

    fn continue_drawing(&mut self, position: Point) -> Repaint {
        let Some(line) = self.canvas_mut().extend_stroke(position) else {
            return Repaint::none();
        };
        let Some(stroke) = self.canvas().active_stroke() else {
            return Repaint::none();
        };
        Repaint {
            ink: InkRepaint::Segment {
                line,
                color: stroke.color.clone(),
                width: stroke.width,
            },
            grid: false,
        }
    }

    fn start_erasing(&mut self, position: Point) -> Repaint {
        let radius = eraser_radius(self.tools.state().width);
        self.canvas_mut().begin_edit();
        self.tools.start_erasing(radius);
        log::debug!("Tab {}: erasing with radius {}", self.active, radius);
        self.erase_at(position, radius)
    }

    fn erase_at(&mut self, position: Point, radius: f64) -> Repaint {
        if self.canvas_mut().erase(position, radius) > 0 {
            Repaint::ink()
        } else {
            Repaint::none()
        }
    }

    /// End the gesture in progress, committing and persisting its edit.
    fn finish_gesture(&mut self) -> Repaint {
        let committed = match self.tools.gesture().clone() {
            Gesture::Idle => return Repaint::none(),
            Gesture::Drawing => self.canvas_mut().end_stroke(),
            Gesture::Erasing { .. } => self.canvas_mut().commit_edit(),
        };
        if committed {
            self.persist_active();
        }

        let grid_changed = self.tools.finish();
        Repaint {
            ink: InkRepaint::None,
            grid: grid_changed,
        }
    }

    /// Execute a control-surface command.
    pub fn execute(&mut self, command: Command) -> Repaint {
        log::debug!("Command: {}", command.name());
        let ended = if command.ends_gesture() {
            self.finish_gesture()
        } else {
            Repaint::none()
        };

        let repaint = match command {
            Command::SetColor(color) => {
                self.tools.set_color(color);
                Repaint::none()
            }
            Command::SetWidth(width) => {
                if !self.tools.set_width(width) {
                    log::warn!("Ignoring invalid pen width {}", width);
                }
                Repaint::none()
            }
            Command::ToggleEraser => {
                let mode = self.tools.toggle_eraser();
                log::debug!("Mode is now {:?}", mode);
                Repaint::none()
            }
            Command::ToggleGrid => {
                self.tools.toggle_grid();
                if self.tools.is_active() {
                    Repaint::none()
                } else {
                    Repaint::grid()
                }
            }
            Command::Clear => {
                if self.canvas_mut().clear() {
                    self.persist_active();
                    Repaint::ink()
                } else {
                    Repaint::none()
                }
            }
            Command::Undo => {
                if self.canvas_mut().undo() {
                    self.persist_active();
                    Repaint::ink()
                } else {
                    Repaint::none()
                }
            }
            Command::Redo => {
                if self.canvas_mut().redo() {
                    self.persist_active();
                    Repaint::ink()
                } else {
                    Repaint::none()
                }
            }
            Command::ChangeTab(id) => self.change_tab(id),
        };
        ended.merge(repaint)
    }

    fn change_tab(&mut self, id: TabId) -> Repaint {
        if !self.has_tab(id) {
            log::warn!("Ignoring switch to unknown tab {}", id);
            return Repaint::none();
        }
        if id == self.active {
            return Repaint::none();
        }
        log::info!("Switching from tab {} to tab {}", self.active, id);
        self.active = id;
        self.load_active();
        Repaint::all()
    }

    fn load_active(&mut self) {
        let strokes = self.store.load(self.active);
        self.canvas_mut().replace_strokes(strokes);
    }

    /// Write the active tab's strokes to the store.
    pub fn save_active(&mut self) -> StorageResult<()> {
        let id = self.active;
        self.store.save(id, self.tabs[&id].strokes())
    }

    /// Save after an edit. Failures are logged and the in-memory model kept.
    fn persist_active(&mut self) {
        if let Err(e) = self.save_active() {
            log::error!("Failed to save tab {}: {}", self.active, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use crate::stroke::Stroke;

    fn tab(id: u32) -> TabId {
        TabId::new(id).unwrap()
    }

    fn board() -> Whiteboard<MemoryStore> {
        Whiteboard::new(&[tab(1), tab(2), tab(3)], MemoryStore::new()).unwrap()
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    fn up() -> PointerEvent {
        PointerEvent::Up { position: Point::ZERO }
    }

    fn draw(board: &mut Whiteboard<MemoryStore>, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        board.handle_pointer(down(x, y));
        for &(x, y) in &points[1..] {
            board.handle_pointer(mv(x, y));
        }
        board.handle_pointer(up());
    }

    #[test]
    fn test_requires_tabs() {
        assert!(matches!(
            Whiteboard::new(&[], MemoryStore::new()),
            Err(BoardError::NoTabs)
        ));
    }

    #[test]
    fn test_draw_gesture() {
        let mut board = board();

        let repaint = board.handle_pointer(down(10.0, 10.0));
        assert!(matches!(repaint.ink, InkRepaint::Dot { .. }));
        assert!(board.is_gesture_active());

        let repaint = board.handle_pointer(mv(20.0, 20.0));
        assert!(matches!(repaint.ink, InkRepaint::Segment { .. }));
        board.handle_pointer(mv(30.0, 10.0));
        assert!(board.handle_pointer(up()).is_none());

        assert!(!board.is_gesture_active());
        let strokes = board.canvas().strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(
            strokes[0].points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(30.0, 10.0)
            ]
        );
        assert_eq!(board.store().load(tab(1)), strokes.to_vec());
    }

    #[test]
    fn test_segment_is_newest_pair() {
        let mut board = board();
        board.handle_pointer(down(0.0, 0.0));
        board.handle_pointer(mv(5.0, 5.0));
        let repaint = board.handle_pointer(mv(9.0, 1.0));
        match repaint.ink {
            InkRepaint::Segment { line, color, width } => {
                assert_eq!(line.p0, Point::new(5.0, 5.0));
                assert_eq!(line.p1, Point::new(9.0, 1.0));
                assert_eq!(color, "black");
                assert_eq!(width, 5.0);
            }
            other => panic!("expected segment, got {:?}", other),
        }
    }

    #[test]
    fn test_leave_ends_gesture() {
        let mut board = board();
        board.handle_pointer(down(1.0, 1.0));
        board.handle_pointer(mv(2.0, 2.0));
        board.handle_pointer(PointerEvent::Leave);

        assert!(!board.is_gesture_active());
        assert!(board.canvas().active_stroke().is_none());
        assert_eq!(board.store().load(tab(1)).len(), 1);

        // Moves after leaving are ignored.
        assert!(board.handle_pointer(mv(50.0, 50.0)).is_none());
        assert_eq!(board.canvas().strokes()[0].len(), 2);
    }

    #[test]
    fn test_idle_events_ignored() {
        let mut board = board();
        assert!(board.handle_pointer(mv(1.0, 1.0)).is_none());
        assert!(board.handle_pointer(up()).is_none());
        assert!(board.canvas().is_empty());
    }

    #[test]
    fn test_second_down_ignored_mid_gesture() {
        let mut board = board();
        board.handle_pointer(down(1.0, 1.0));
        assert!(board.handle_pointer(down(100.0, 100.0)).is_none());
        board.handle_pointer(up());
        assert_eq!(board.canvas().len(), 1);
        assert_eq!(board.canvas().strokes()[0].len(), 1);
    }

    #[test]
    fn test_color_locked_at_gesture_start() {
        let mut board = board();
        board.handle_pointer(down(0.0, 0.0));
        board.execute(Command::SetColor("red".into()));
        board.execute(Command::SetWidth(25.0));
        board.handle_pointer(mv(10.0, 0.0));
        board.handle_pointer(up());

        let stroke = &board.canvas().strokes()[0];
        assert_eq!(stroke.color, "black");
        assert_eq!(stroke.width, 5.0);

        // The deferred change applies to the next stroke.
        assert_eq!(board.tools().color, "red");
        draw(&mut board, &[(50.0, 50.0)]);
        assert_eq!(board.canvas().strokes()[1].color, "red");
        assert_eq!(board.canvas().strokes()[1].width, 25.0);
    }

    #[test]
    fn test_mode_toggle_mid_gesture_deferred() {
        let mut board = board();
        board.handle_pointer(down(0.0, 0.0));
        board.execute(Command::ToggleEraser);
        board.handle_pointer(mv(3.0, 3.0));
        board.handle_pointer(up());
        assert_eq!(board.canvas().len(), 1);
        assert_eq!(board.tools().mode, Mode::Erase);
    }

    #[test]
    fn test_erase_gesture() {
        let mut board = board();
        draw(&mut board, &[(5.0, 5.0), (40.0, 40.0)]);
        draw(&mut board, &[(500.0, 500.0), (510.0, 510.0)]);
        board.execute(Command::ToggleEraser);

        // Default width 5 gives radius 10.
        let repaint = board.handle_pointer(down(12.0, 5.0));
        assert_eq!(repaint, Repaint::ink());
        assert_eq!(board.canvas().len(), 1);

        assert!(board.handle_pointer(mv(300.0, 300.0)).is_none());
        assert_eq!(board.handle_pointer(mv(505.0, 505.0)), Repaint::ink());
        board.handle_pointer(up());

        assert!(board.canvas().is_empty());
        assert!(board.store().load(tab(1)).is_empty());

        // One undo restores both strokes.
        assert_eq!(board.execute(Command::Undo), Repaint::ink());
        assert_eq!(board.canvas().len(), 2);
    }

    #[test]
    fn test_erase_over_empty_space_commits_nothing() {
        let mut board = board();
        draw(&mut board, &[(0.0, 0.0)]);
        board.execute(Command::Undo);
        board.execute(Command::ToggleEraser);

        board.handle_pointer(down(300.0, 300.0));
        board.handle_pointer(up());

        assert!(board.canvas().history().can_redo());
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut board = board();
        draw(&mut board, &[(0.0, 0.0), (1.0, 1.0)]);
        draw(&mut board, &[(10.0, 0.0), (11.0, 1.0), (12.0, 5.0)]);
        let before = board.canvas().strokes().to_vec();

        assert_eq!(board.execute(Command::Undo), Repaint::ink());
        assert_eq!(board.store().load(tab(1)).len(), 1);
        assert_eq!(board.execute(Command::Redo), Repaint::ink());
        assert_eq!(board.canvas().strokes(), before.as_slice());
        assert_eq!(board.store().load(tab(1)), before);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut board = board();
        assert!(board.execute(Command::Undo).is_none());
        assert!(board.execute(Command::Redo).is_none());
    }

    #[test]
    fn test_new_stroke_after_undo_clears_redo() {
        let mut board = board();
        draw(&mut board, &[(0.0, 0.0)]);
        draw(&mut board, &[(10.0, 0.0)]);
        draw(&mut board, &[(20.0, 0.0)]);
        board.execute(Command::Undo);
        board.execute(Command::Undo);
        draw(&mut board, &[(30.0, 0.0)]);

        assert!(!board.canvas().history().can_redo());
        assert!(board.execute(Command::Redo).is_none());
    }

    #[test]
    fn test_clear_only_affects_active_tab() {
        let mut board = board();
        draw(&mut board, &[(0.0, 0.0)]);
        board.execute(Command::ChangeTab(tab(2)));
        draw(&mut board, &[(5.0, 5.0)]);
        draw(&mut board, &[(6.0, 6.0)]);

        assert_eq!(board.execute(Command::Clear), Repaint::ink());
        assert!(board.canvas().is_empty());
        assert_eq!(board.tab(tab(1)).unwrap().len(), 1);
        assert_eq!(board.store().load(tab(1)).len(), 1);
        assert!(board.store().load(tab(2)).is_empty());

        // Clearing an empty tab is not an edit.
        assert!(board.execute(Command::Clear).is_none());
    }

    #[test]
    fn test_tab_switch_roundtrip() {
        let mut board = board();
        draw(&mut board, &[(1.0, 2.0), (3.0, 4.0)]);
        draw(&mut board, &[(7.0, 7.0)]);
        let before = board.canvas().strokes().to_vec();

        assert_eq!(board.execute(Command::ChangeTab(tab(3))), Repaint::all());
        assert_eq!(board.active_tab(), tab(3));
        assert!(board.canvas().is_empty());

        board.execute(Command::ChangeTab(tab(1)));
        assert_eq!(board.canvas().strokes(), before.as_slice());
    }

    #[test]
    fn test_non_finite_positions_dropped() {
        let mut board = board();
        draw(&mut board, &[(1.0, 2.0)]);
        draw(&mut board, &[(3.0, 4.0)]);
        draw(&mut board, &[(5.0, 6.0), (7.0, 8.0)]);

        assert!(board.handle_pointer(down(f64::NAN, 1.0)).is_none());
        assert!(!board.is_gesture_active());
        board.handle_pointer(up());

        board.handle_pointer(down(10.0, 10.0));
        assert!(board.handle_pointer(mv(f64::INFINITY, 0.0)).is_none());
        board.handle_pointer(up());
        assert_eq!(board.canvas().strokes()[3].points, vec![Point::new(10.0, 10.0)]);

        board.execute(Command::ChangeTab(tab(2)));
        board.execute(Command::ChangeTab(tab(1)));
        assert_eq!(board.canvas().len(), 4);
    }

    #[test]
    fn test_save_active_reports_failure() {
        let mut board = Whiteboard::new(&[tab(1)], FailingStore).unwrap();
        assert!(matches!(board.save_active(), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_reload_from_store() {
        let mut board = board();
        draw(&mut board, &[(1.0, 2.0), (3.0, 4.0)]);
        let before = board.canvas().strokes().to_vec();
        let store = board.into_store();

        let reloaded = Whiteboard::new(&[tab(1), tab(2)], store).unwrap();
        assert_eq!(reloaded.canvas().strokes(), before.as_slice());
    }

    #[test]
    fn test_change_tab_edge_cases() {
        let mut board = board();
        assert!(board.execute(Command::ChangeTab(tab(1))).is_none());
        assert!(board.execute(Command::ChangeTab(tab(7))).is_none());
        assert_eq!(board.active_tab(), tab(1));
    }

    #[test]
    fn test_change_tab_mid_gesture_finishes_stroke() {
        let mut board = board();
        board.handle_pointer(down(0.0, 0.0));
        board.handle_pointer(mv(4.0, 4.0));
        board.execute(Command::ChangeTab(tab(2)));

        assert!(!board.is_gesture_active());
        assert_eq!(board.store().load(tab(1)).len(), 1);
        assert!(board.canvas().is_empty());
    }

    #[test]
    fn test_grid_toggle() {
        let mut board = board();
        assert_eq!(board.execute(Command::ToggleGrid), Repaint::grid());
        assert!(board.tools().grid_visible);

        board.handle_pointer(down(0.0, 0.0));
        assert!(board.execute(Command::ToggleGrid).is_none());
        assert!(board.tools().grid_visible);
        assert_eq!(board.handle_pointer(up()), Repaint::grid());
        assert!(!board.tools().grid_visible);
    }

    #[test]
    fn test_invalid_width_ignored() {
        let mut board = board();
        board.execute(Command::SetWidth(-1.0));
        board.execute(Command::SetWidth(f64::NAN));
        assert_eq!(board.tools().width, 5.0);
    }

    #[test]
    fn test_corrupt_storage_gives_blank_tab() {
        let mut store = MemoryStore::new();
        store.set("drawing:1", "garbage").unwrap();
        let board = Whiteboard::new(&[tab(1)], store).unwrap();
        assert!(board.canvas().is_empty());
    }

    struct FailingStore;

    impl BlobStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk full".to_string()))
        }
        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
        fn keys(&self) -> StorageResult<Vec<String>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_save_failure_keeps_model() {
        let mut board = Whiteboard::new(&[tab(1)], FailingStore).unwrap();
        board.handle_pointer(down(0.0, 0.0));
        board.handle_pointer(up());
        assert_eq!(
            board.canvas().strokes(),
            &[Stroke::new(Point::ZERO, "black", 5.0)]
        );
    }
}
