//! Snap candidates and drag snapping.

use super::LayoutAssistant;
use crate::card::{CardElement, ElementId};
use kurbo::{Line, Point};
use serde::Serialize;

/// Axis a snap point constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// A vertical line at some x.
    X,
    /// A horizontal line at some y.
    Y,
}

/// Origin of a snap point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    /// Canvas edge/center or another element's edge.
    Edge,
    /// Another element's center.
    Center,
    /// Grid line.
    Grid,
}

/// A coordinate a dragged element may lock onto.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapPoint {
    pub kind: SnapKind,
    pub axis: Axis,
    pub value: f64,
    /// Element the point belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
}

impl SnapPoint {
    fn canvas(axis: Axis, value: f64) -> Self {
        Self {
            kind: SnapKind::Edge,
            axis,
            value,
            element_id: None,
        }
    }

    fn grid(axis: Axis, value: f64) -> Self {
        Self {
            kind: SnapKind::Grid,
            axis,
            value,
            element_id: None,
        }
    }

    fn element(kind: SnapKind, axis: Axis, value: f64, id: &str) -> Self {
        Self {
            kind,
            axis,
            value,
            element_id: Some(id.to_string()),
        }
    }
}

/// Visual style of an alignment guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideStyle {
    /// Matched a grid line: light and dashed.
    Grid,
    /// Matched a canvas or element edge.
    Edge,
    /// Matched with the dragged element's center.
    Center,
}

impl GuideStyle {
    pub fn color(self) -> &'static str {
        match self {
            GuideStyle::Grid => "#E5E7EB",
            GuideStyle::Edge => "#3B82F6",
            GuideStyle::Center => "#10B981",
        }
    }

    pub fn width(self) -> f64 {
        match self {
            GuideStyle::Grid => 1.0,
            GuideStyle::Edge | GuideStyle::Center => 2.0,
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            GuideStyle::Grid => 0.5,
            GuideStyle::Edge | GuideStyle::Center => 0.9,
        }
    }

    pub fn is_dashed(self) -> bool {
        self == GuideStyle::Grid
    }
}

/// A guide line shown while a snap is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutGuide {
    pub line: Line,
    pub style: GuideStyle,
}

/// Result of resolving a drag position.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapOutcome {
    /// Top-left position after snapping.
    pub position: Point,
    /// Snap points that matched, at most one per axis.
    pub snap_points: Vec<SnapPoint>,
    pub guides: Vec<LayoutGuide>,
}

impl SnapOutcome {
    /// Outcome with no snapping applied.
    pub fn unsnapped(position: Point) -> Self {
        Self {
            position,
            snap_points: Vec::new(),
            guides: Vec::new(),
        }
    }

    /// Check if any axis snapped.
    pub fn is_snapped(&self) -> bool {
        !self.snap_points.is_empty()
    }
}

impl LayoutAssistant {
    /// Collect snap candidates for dragging `dragging_id`.
    ///
    /// Order matters: canvas references come first, then grid lines (when
    /// enabled), then the edges and centers of every other element.
    pub fn generate_snap_points(&self, elements: &[CardElement], dragging_id: &str) -> Vec<SnapPoint> {
        let width = self.canvas.width;
        let height = self.canvas.height;
        let mut points = vec![
            SnapPoint::canvas(Axis::X, 0.0),
            SnapPoint::canvas(Axis::X, width / 2.0),
            SnapPoint::canvas(Axis::X, width),
            SnapPoint::canvas(Axis::Y, 0.0),
            SnapPoint::canvas(Axis::Y, height / 2.0),
            SnapPoint::canvas(Axis::Y, height),
        ];

        let grid = self.config.grid_size;
        if self.config.snap_to_grid && grid > 0.0 {
            for axis in [Axis::X, Axis::Y] {
                let extent = if axis == Axis::X { width } else { height };
                let steps = (extent / grid).floor() as usize;
                points.extend((0..=steps).map(|i| SnapPoint::grid(axis, i as f64 * grid)));
            }
        }

        for element in elements.iter().filter(|el| el.id != dragging_id) {
            let bounds = element.bounds();
            let center = bounds.center();
            points.extend([
                SnapPoint::element(SnapKind::Edge, Axis::X, bounds.x0, &element.id),
                SnapPoint::element(SnapKind::Edge, Axis::X, bounds.x1, &element.id),
                SnapPoint::element(SnapKind::Edge, Axis::Y, bounds.y0, &element.id),
                SnapPoint::element(SnapKind::Edge, Axis::Y, bounds.y1, &element.id),
                SnapPoint::element(SnapKind::Center, Axis::X, center.x, &element.id),
                SnapPoint::element(SnapKind::Center, Axis::Y, center.y, &element.id),
            ]);
        }

        points
    }

    /// Snap a raw top-left drag position for `dragging_id`.
    ///
    /// Each axis is resolved on its own. Snap points are visited in generation
    /// order, and for each one the leading edge, the center and the trailing
    /// edge are tested in that order; the first hit within the threshold wins.
    /// This is deliberately not a nearest-candidate search.
    pub fn calculate_snap_position(
        &self,
        elements: &[CardElement],
        dragging_id: &str,
        position: Point,
    ) -> SnapOutcome {
        let Some(dragging) = elements.iter().find(|el| el.id == dragging_id) else {
            return SnapOutcome::unsnapped(position);
        };

        let points = self.generate_snap_points(elements, dragging_id);
        let size = dragging.size();
        let mut outcome = SnapOutcome::unsnapped(position);

        if let Some((x, point, style)) = self.resolve_axis(&points, Axis::X, position.x, size.width) {
            outcome.position.x = x;
            outcome.guides.push(self.guide(Axis::X, point.value, style));
            outcome.snap_points.push(point.clone());
        }
        if let Some((y, point, style)) = self.resolve_axis(&points, Axis::Y, position.y, size.height) {
            outcome.position.y = y;
            outcome.guides.push(self.guide(Axis::Y, point.value, style));
            outcome.snap_points.push(point.clone());
        }

        outcome
    }

    /// First-match resolution along one axis.
    /// Returns the snapped leading coordinate, the matched point and the guide style.
    fn resolve_axis<'a>(
        &self,
        points: &'a [SnapPoint],
        axis: Axis,
        start: f64,
        extent: f64,
    ) -> Option<(f64, &'a SnapPoint, GuideStyle)> {
        let threshold = self.config.snap_threshold;
        let half = extent / 2.0;

        for point in points.iter().filter(|p| p.axis == axis) {
            let edge_style = if point.kind == SnapKind::Grid {
                GuideStyle::Grid
            } else {
                GuideStyle::Edge
            };

            if (start - point.value).abs() <= threshold {
                return Some((point.value, point, edge_style));
            }
            if (start + half - point.value).abs() <= threshold {
                return Some((point.value - half, point, GuideStyle::Center));
            }
            if (start + extent - point.value).abs() <= threshold {
                return Some((point.value - extent, point, edge_style));
            }
        }
        None
    }

    /// Guide spanning the whole canvas at `value`.
    fn guide(&self, axis: Axis, value: f64, style: GuideStyle) -> LayoutGuide {
        let line = match axis {
            Axis::X => Line::new((value, 0.0), (value, self.canvas.height)),
            Axis::Y => Line::new((0.0, value), (self.canvas.width, value)),
        };
        LayoutGuide { line, style }
    }
}
