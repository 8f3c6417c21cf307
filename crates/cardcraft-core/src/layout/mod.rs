//! Layout assistant: snapping, alignment guides and batch alignment.
//!
//! Everything here is a pure function of the element list passed in. The
//! assistant only carries the canvas size and a few tuning constants.

mod align;
mod snap;

pub use align::{AlignmentKind, AlignmentSuggestion, Direction};
pub use snap::{Axis, GuideStyle, LayoutGuide, SnapKind, SnapOutcome, SnapPoint};

use crate::card::Dimensions;
use kurbo::Size;

/// Default distance (in layout units) within which a dragged edge snaps.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

/// Default spacing of the alignment grid.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Tuning constants for the layout assistant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Maximum distance at which an edge or center is pulled onto a snap point.
    pub snap_threshold: f64,
    /// Spacing of the grid lines.
    pub grid_size: f64,
    /// Whether grid lines are offered as snap candidates.
    pub snap_to_grid: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
        }
    }
}

/// Geometry engine for snapping and aligning card elements.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAssistant {
    config: LayoutConfig,
    canvas: Size,
}

impl LayoutAssistant {
    /// Create an assistant for a canvas of the given dimensions.
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_config(dimensions, LayoutConfig::default())
    }

    pub fn with_config(dimensions: Dimensions, config: LayoutConfig) -> Self {
        Self {
            config,
            canvas: dimensions.size(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Canvas size used for canvas snap points and guide extents.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn set_canvas(&mut self, dimensions: Dimensions) {
        self.canvas = dimensions.size();
    }

    /// Enable or disable grid lines as snap candidates.
    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
    }
}
