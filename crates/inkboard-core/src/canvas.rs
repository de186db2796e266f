//! Per-tab stroke lists and their edit history.

use crate::eraser;
use crate::history::{History, Snapshot};
use crate::stroke::Stroke;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a whiteboard tab. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TabId(u32);

impl TabId {
    /// Create a tab id, rejecting zero.
    pub fn new(id: u32) -> Option<Self> {
        (id >= 1).then_some(Self(id))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TabId {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| format!("tab id must be at least 1, got {id}"))
    }
}

impl From<TabId> for u32 {
    fn from(id: TabId) -> Self {
        id.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An independent drawing surface: strokes in z-order plus undo/redo.
#[derive(Debug, Clone)]
pub struct TabCanvas {
    id: TabId,
    /// Strokes back to front.
    strokes: Vec<Stroke>,
    history: History,
    /// Index of the stroke being drawn, if any.
    active_stroke: Option<usize>,
    /// State captured when the current edit began.
    pending_edit: Option<Snapshot>,
}

impl TabCanvas {
    /// Create an empty tab canvas.
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            strokes: Vec::new(),
            history: History::new(),
            active_stroke: None,
            pending_edit: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    /// Strokes in z-order (back to front).
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The stroke currently being drawn.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active_stroke.and_then(|i| self.strokes.get(i))
    }

    /// Whether an edit has begun and not yet been committed.
    pub fn is_editing(&self) -> bool {
        self.pending_edit.is_some()
    }

    /// Remember the current state as the pre-edit snapshot.
    ///
    /// Calling this again before [`commit_edit`](Self::commit_edit) keeps the
    /// original snapshot.
    pub fn begin_edit(&mut self) {
        if self.pending_edit.is_none() {
            self.pending_edit = Some(self.strokes.clone());
        }
    }

    /// Finish the current edit, recording it in history if anything changed.
    /// Returns true if a history entry was committed.
    pub fn commit_edit(&mut self) -> bool {
        let Some(pre_edit) = self.pending_edit.take() else {
            return false;
        };
        if pre_edit == self.strokes {
            log::debug!("Tab {}: edit left strokes unchanged, nothing to commit", self.id);
            return false;
        }
        self.history.commit(pre_edit);
        log::debug!(
            "Tab {}: committed edit ({} strokes, {} undo states)",
            self.id,
            self.strokes.len(),
            self.history.undo_len()
        );
        true
    }

    /// Start a new single-point stroke. Returns its index.
    pub fn begin_stroke(&mut self, point: Point, color: impl Into<String>, width: f64) -> usize {
        self.begin_edit();
        self.strokes.push(Stroke::new(point, color, width));
        let index = self.strokes.len() - 1;
        self.active_stroke = Some(index);
        index
    }

    /// Append a point to the stroke in progress.
    ///
    /// Returns the newly formed segment, or `None` if no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> Option<Line> {
        let stroke = self.active_stroke.and_then(|i| self.strokes.get_mut(i))?;
        stroke.add_point(point);
        stroke.last_segment()
    }

    /// Freeze the stroke in progress and commit it to history.
    /// Returns true if a stroke was ended.
    pub fn end_stroke(&mut self) -> bool {
        if self.active_stroke.take().is_none() {
            return false;
        }
        self.commit_edit();
        true
    }

    /// Remove strokes within `radius` of `point`. Returns how many were removed.
    pub fn erase(&mut self, point: Point, radius: f64) -> usize {
        let removed = eraser::erase(&mut self.strokes, point, radius);
        if removed > 0 {
            log::debug!("Tab {}: erased {} strokes at {:?}", self.id, removed, point);
        }
        removed
    }

    /// Remove all strokes as one undoable edit.
    /// Returns true if anything was removed.
    pub fn clear(&mut self) -> bool {
        self.end_stroke();
        self.begin_edit();
        self.strokes.clear();
        self.commit_edit()
    }

    /// Undo the last committed edit.
    pub fn undo(&mut self) -> bool {
        self.settle();
        self.history.undo(&mut self.strokes)
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) -> bool {
        self.settle();
        self.history.redo(&mut self.strokes)
    }

    /// Replace the stroke list wholesale, e.g. with data loaded from storage.
    /// History is kept.
    pub fn replace_strokes(&mut self, strokes: Vec<Stroke>) {
        self.active_stroke = None;
        self.pending_edit = None;
        self.strokes = strokes;
    }

    /// Close any open stroke or edit so history operations see a settled state.
    fn settle(&mut self) {
        self.end_stroke();
        self.commit_edit();
    }
}
