//! Tool state and the pointer gesture state machine.

use serde::{Deserialize, Serialize};

/// Default pen color.
pub const DEFAULT_COLOR: &str = "black";

/// Default pen width in pixels.
pub const DEFAULT_WIDTH: f64 = 5.0;

/// What a pointer-down does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    Draw,
    Erase,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Draw => Mode::Erase,
            Mode::Erase => Mode::Draw,
        }
    }
}

/// Stock pen widths offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidthPreset {
    Small,
    Medium,
    Large,
    Mega,
}

impl WidthPreset {
    /// All presets, thinnest first.
    pub const ALL: [WidthPreset; 4] = [
        WidthPreset::Small,
        WidthPreset::Medium,
        WidthPreset::Large,
        WidthPreset::Mega,
    ];

    /// Width in pixels.
    pub fn width(self) -> f64 {
        match self {
            WidthPreset::Small => 2.0,
            WidthPreset::Medium => 5.0,
            WidthPreset::Large => 10.0,
            WidthPreset::Mega => 25.0,
        }
    }

    /// Get display name for this preset.
    pub fn name(self) -> &'static str {
        match self {
            WidthPreset::Small => "Small Line",
            WidthPreset::Medium => "Medium Line",
            WidthPreset::Large => "Large Line",
            WidthPreset::Mega => "Mega Line",
        }
    }
}

/// Process-wide tool settings. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub color: String,
    pub width: f64,
    pub mode: Mode,
    pub grid_visible: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_WIDTH,
            mode: Mode::Draw,
            grid_visible: false,
        }
    }
}

/// State of the pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No pointer is down.
    #[default]
    Idle,
    /// Drawing the active stroke of the active tab.
    Drawing,
    /// Erasing with a radius fixed at gesture start.
    Erasing { radius: f64 },
}

/// Owns the tool state and the gesture in progress.
///
/// Tool changes requested mid-gesture are staged and only take effect once
/// the gesture ends, so a gesture always runs with the tools it started with.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    state: ToolState,
    staged: Option<ToolState>,
    gesture: Gesture,
}

impl ToolManager {
    /// Create a tool manager with default tools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tool state in effect.
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Tool changes waiting for the current gesture to end.
    pub fn staged(&self) -> Option<&ToolState> {
        self.staged.as_ref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// State that tool changes should be written to.
    fn target(&mut self) -> &mut ToolState {
        if self.is_active() {
            self.staged.get_or_insert_with(|| self.state.clone())
        } else {
            &mut self.state
        }
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.target().color = color.into();
    }

    /// Set the pen width. Non-finite or non-positive widths are rejected.
    /// Returns true if the width was accepted.
    pub fn set_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        self.target().width = width;
        true
    }

    /// Switch between draw and erase. Returns the resulting mode.
    pub fn toggle_eraser(&mut self) -> Mode {
        let target = self.target();
        target.mode = target.mode.toggled();
        target.mode
    }

    /// Show or hide the grid. Returns the resulting visibility.
    pub fn toggle_grid(&mut self) -> bool {
        let target = self.target();
        target.grid_visible = !target.grid_visible;
        target.grid_visible
    }

    /// Enter the drawing state.
    pub fn start_drawing(&mut self) {
        self.gesture = Gesture::Drawing;
    }

    /// Enter the erasing state with a fixed radius.
    pub fn start_erasing(&mut self, radius: f64) {
        self.gesture = Gesture::Erasing { radius };
    }

    /// Return to idle and apply staged tool changes.
    ///
    /// Returns true if grid visibility changed as a result.
    pub fn finish(&mut self) -> bool {
        self.gesture = Gesture::Idle;
        let Some(staged) = self.staged.take() else {
            return false;
        };
        let grid_changed = staged.grid_visible != self.state.grid_visible;
        log::debug!("Applying tool changes deferred during gesture: {:?}", staged);
        self.state = staged;
        grid_changed
    }
}
