//! Resize handles for the selected element.

use crate::card::{CardElement, MIN_ELEMENT_DIMENSION};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge midpoint positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Which handle of the bounding box is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    Edge(Edge),
}

impl HandleKind {
    /// All eight handles, corners first.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Edge(Edge::Top),
        HandleKind::Edge(Edge::Right),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Edge(Edge::Left),
    ];

    /// Compass name (`nw`, `n`, `ne`, `e`, `se`, `s`, `sw`, `w`).
    pub fn compass(self) -> &'static str {
        match self {
            HandleKind::Corner(Corner::TopLeft) => "nw",
            HandleKind::Corner(Corner::TopRight) => "ne",
            HandleKind::Corner(Corner::BottomLeft) => "sw",
            HandleKind::Corner(Corner::BottomRight) => "se",
            HandleKind::Edge(Edge::Top) => "n",
            HandleKind::Edge(Edge::Right) => "e",
            HandleKind::Edge(Edge::Bottom) => "s",
            HandleKind::Edge(Edge::Left) => "w",
        }
    }

    /// Parse a compass name.
    pub fn from_compass(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.compass() == name)
    }

    /// Whether dragging this handle moves the left edge, right edge, or neither.
    fn horizontal(self) -> Option<Side> {
        match self {
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left) => {
                Some(Side::Start)
            }
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight) | HandleKind::Edge(Edge::Right) => {
                Some(Side::End)
            }
            HandleKind::Edge(Edge::Top | Edge::Bottom) => None,
        }
    }

    fn vertical(self) -> Option<Side> {
        match self {
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top) => {
                Some(Side::Start)
            }
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight) | HandleKind::Edge(Edge::Bottom) => {
                Some(Side::End)
            }
            HandleKind::Edge(Edge::Left | Edge::Right) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

/// A handle with its position in card coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    /// `tolerance` should already be divided by the zoom level.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Handles around an element's bounding box.
pub fn get_handles(element: &CardElement) -> Vec<Handle> {
    let bounds = element.bounds();
    let center = bounds.center();
    HandleKind::ALL
        .into_iter()
        .map(|kind| {
            let position = match kind {
                HandleKind::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
                HandleKind::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
                HandleKind::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
                HandleKind::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
                HandleKind::Edge(Edge::Top) => Point::new(center.x, bounds.y0),
                HandleKind::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
                HandleKind::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
                HandleKind::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
            };
            Handle::new(position, kind)
        })
        .collect()
}

/// Find the handle under `point`, if any.
pub fn hit_test_handles(element: &CardElement, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize `start` by dragging `handle` by `delta` (card units).
///
/// Neither side shrinks below [`MIN_ELEMENT_DIMENSION`]. When the leading
/// edge moves, the opposite edge stays anchored.
pub fn resize_rect(start: Rect, handle: HandleKind, delta: Vec2) -> Rect {
    let (x, width) = resize_span(start.x0, start.width(), handle.horizontal(), delta.x);
    let (y, height) = resize_span(start.y0, start.height(), handle.vertical(), delta.y);
    Rect::from_origin_size(Point::new(x, y), Size::new(width, height))
}

fn resize_span(origin: f64, extent: f64, side: Option<Side>, delta: f64) -> (f64, f64) {
    match side {
        None => (origin, extent),
        Some(Side::End) => (origin, (extent + delta).max(MIN_ELEMENT_DIMENSION)),
        Some(Side::Start) => {
            let resized = (extent - delta).max(MIN_ELEMENT_DIMENSION);
            (origin + (extent - resized), resized)
        }
    }
}
