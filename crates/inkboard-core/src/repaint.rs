//! Render work requested by engine operations.

use kurbo::{Line, Point};

/// What the ink layer of the active tab needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InkRepaint {
    #[default]
    None,
    /// Draw the seed point of a new stroke.
    Dot {
        center: Point,
        color: String,
        width: f64,
    },
    /// Draw only the newest segment of the stroke in progress.
    Segment {
        line: Line,
        color: String,
        width: f64,
    },
    /// Clear and replay every stroke.
    Full,
}

/// Render work for the active tab after an engine operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Repaint {
    pub ink: InkRepaint,
    /// Whether the grid layer must be repainted.
    pub grid: bool,
}

impl Repaint {
    /// Nothing to do.
    pub fn none() -> Self {
        Self::default()
    }

    /// Full redraw of the ink layer.
    pub fn ink() -> Self {
        Self {
            ink: InkRepaint::Full,
            grid: false,
        }
    }

    /// Repaint of the grid layer only.
    pub fn grid() -> Self {
        Self {
            ink: InkRepaint::None,
            grid: true,
        }
    }

    /// Both layers from scratch.
    pub fn all() -> Self {
        Self {
            ink: InkRepaint::Full,
            grid: true,
        }
    }

    pub fn is_none(&self) -> bool {
        self.ink == InkRepaint::None && !self.grid
    }

    /// Combine with work requested by a later operation.
    ///
    /// A full ink redraw subsumes any incremental work.
    pub fn merge(self, later: Repaint) -> Repaint {
        let ink = match (self.ink, later.ink) {
            (InkRepaint::Full, _) | (_, InkRepaint::Full) => InkRepaint::Full,
            (earlier, InkRepaint::None) => earlier,
            (_, later) => later,
        };
        Repaint {
            ink,
            grid: self.grid || later.grid,
        }
    }
}
