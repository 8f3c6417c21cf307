//! Batch alignment, distribution and equal spacing of a multi-selection.

use super::LayoutAssistant;
use crate::card::{CardElement, ElementId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Alignment or distribution transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentKind {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
    DistributeHorizontal,
    DistributeVertical,
}

impl AlignmentKind {
    /// Edge and center alignments, offered for two or more elements.
    pub const ALIGNMENTS: [AlignmentKind; 6] = [
        AlignmentKind::Left,
        AlignmentKind::Center,
        AlignmentKind::Right,
        AlignmentKind::Top,
        AlignmentKind::Middle,
        AlignmentKind::Bottom,
    ];

    /// Distributions, offered for three or more elements.
    pub const DISTRIBUTIONS: [AlignmentKind; 2] =
        [AlignmentKind::DistributeHorizontal, AlignmentKind::DistributeVertical];

    /// Smallest selection this transform does anything with.
    pub fn min_selection(self) -> usize {
        match self {
            AlignmentKind::DistributeHorizontal | AlignmentKind::DistributeVertical => 3,
            _ => 2,
        }
    }

    /// Human-readable label.
    pub fn description(self) -> &'static str {
        match self {
            AlignmentKind::Left => "Align left edges",
            AlignmentKind::Center => "Align horizontal centers",
            AlignmentKind::Right => "Align right edges",
            AlignmentKind::Top => "Align top edges",
            AlignmentKind::Middle => "Align vertical centers",
            AlignmentKind::Bottom => "Align bottom edges",
            AlignmentKind::DistributeHorizontal => "Distribute horizontally",
            AlignmentKind::DistributeVertical => "Distribute vertically",
        }
    }
}

/// An alignment the current selection supports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentSuggestion {
    #[serde(rename = "type")]
    pub kind: AlignmentKind,
    /// Ids of the selected elements it would move.
    pub elements: Vec<ElementId>,
    pub description: &'static str,
}

/// Axis for equal spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    fn leading(self, bounds: Rect) -> f64 {
        match self {
            Direction::Horizontal => bounds.x0,
            Direction::Vertical => bounds.y0,
        }
    }

    fn trailing(self, bounds: Rect) -> f64 {
        match self {
            Direction::Horizontal => bounds.x1,
            Direction::Vertical => bounds.y1,
        }
    }

    fn extent(self, size: Size) -> f64 {
        match self {
            Direction::Horizontal => size.width,
            Direction::Vertical => size.height,
        }
    }

    fn center(self, element: &CardElement) -> f64 {
        let center = element.center();
        match self {
            Direction::Horizontal => center.x,
            Direction::Vertical => center.y,
        }
    }

    /// `position` with its coordinate along this axis replaced.
    fn with_leading(self, position: Point, value: f64) -> Point {
        match self {
            Direction::Horizontal => Point::new(value, position.y),
            Direction::Vertical => Point::new(position.x, value),
        }
    }
}

/// Selected elements in document order. Unknown ids are ignored.
fn resolve_selection<'a>(elements: &'a [CardElement], selected: &[ElementId]) -> Vec<&'a CardElement> {
    elements.iter().filter(|el| selected.contains(&el.id)).collect()
}

/// Copy of `elements` with the targeted ones moved.
fn reposition(elements: &[CardElement], targets: &HashMap<&str, Point>) -> Vec<CardElement> {
    elements
        .iter()
        .map(|el| match targets.get(el.id.as_str()) {
            Some(&position) => el.moved_to(position),
            None => el.clone(),
        })
        .collect()
}

impl LayoutAssistant {
    /// Alignments available for the current selection.
    ///
    /// Empty for fewer than two resolved elements.
    pub fn generate_alignment_suggestions(
        &self,
        elements: &[CardElement],
        selected: &[ElementId],
    ) -> Vec<AlignmentSuggestion> {
        let chosen = resolve_selection(elements, selected);
        let ids: Vec<ElementId> = chosen.iter().map(|el| el.id.clone()).collect();

        AlignmentKind::ALIGNMENTS
            .into_iter()
            .chain(AlignmentKind::DISTRIBUTIONS)
            .filter(|kind| ids.len() >= kind.min_selection())
            .map(|kind| AlignmentSuggestion {
                kind,
                elements: ids.clone(),
                description: kind.description(),
            })
            .collect()
    }

    /// Apply an alignment or distribution to the selected elements.
    ///
    /// Returns a new element list; elements outside the selection are passed
    /// through unchanged, and a selection too small for `kind` returns the
    /// input as is.
    pub fn apply_alignment(
        &self,
        elements: &[CardElement],
        selected: &[ElementId],
        kind: AlignmentKind,
    ) -> Vec<CardElement> {
        let chosen = resolve_selection(elements, selected);
        if chosen.len() < kind.min_selection() {
            return elements.to_vec();
        }

        let targets: HashMap<&str, Point> = match kind {
            AlignmentKind::Left | AlignmentKind::Top => {
                let dir = axis_of(kind);
                let min = chosen
                    .iter()
                    .map(|el| dir.leading(el.bounds()))
                    .fold(f64::INFINITY, f64::min);
                chosen
                    .iter()
                    .map(|el| (el.id.as_str(), dir.with_leading(el.position(), min)))
                    .collect()
            }
            AlignmentKind::Right | AlignmentKind::Bottom => {
                let dir = axis_of(kind);
                let max = chosen
                    .iter()
                    .map(|el| dir.trailing(el.bounds()))
                    .fold(f64::NEG_INFINITY, f64::max);
                chosen
                    .iter()
                    .map(|el| {
                        let leading = max - dir.extent(el.size());
                        (el.id.as_str(), dir.with_leading(el.position(), leading))
                    })
                    .collect()
            }
            AlignmentKind::Center | AlignmentKind::Middle => {
                let dir = axis_of(kind);
                let mean = chosen.iter().map(|el| dir.center(el)).sum::<f64>() / chosen.len() as f64;
                chosen
                    .iter()
                    .map(|el| {
                        let leading = mean - dir.extent(el.size()) / 2.0;
                        (el.id.as_str(), dir.with_leading(el.position(), leading))
                    })
                    .collect()
            }
            AlignmentKind::DistributeHorizontal | AlignmentKind::DistributeVertical => {
                let dir = axis_of(kind);
                let mut sorted = chosen;
                sorted.sort_by(|a, b| dir.center(a).total_cmp(&dir.center(b)));

                let last = sorted.len() - 1;
                let first_center = dir.center(sorted[0]);
                let interval = (dir.center(sorted[last]) - first_center) / last as f64;

                sorted[1..last]
                    .iter()
                    .enumerate()
                    .map(|(i, &el)| {
                        let center = first_center + interval * (i + 1) as f64;
                        let leading = center - dir.extent(el.size()) / 2.0;
                        (el.id.as_str(), dir.with_leading(el.position(), leading))
                    })
                    .collect()
            }
        };

        log::debug!("{} over {} elements", kind.description(), targets.len());
        reposition(elements, &targets)
    }

    /// Make the gaps between consecutive selected elements uniform.
    ///
    /// Elements are ordered by leading edge; the first one stays where it is.
    /// Needs at least three resolved elements, otherwise the input is returned.
    pub fn calculate_equal_spacing(
        &self,
        elements: &[CardElement],
        selected: &[ElementId],
        direction: Direction,
    ) -> Vec<CardElement> {
        let mut sorted = resolve_selection(elements, selected);
        if sorted.len() < 3 {
            return elements.to_vec();
        }
        sorted.sort_by(|a, b| {
            direction
                .leading(a.bounds())
                .total_cmp(&direction.leading(b.bounds()))
        });

        let first = direction.leading(sorted[0].bounds());
        let span = direction.trailing(sorted[sorted.len() - 1].bounds()) - first;
        let occupied: f64 = sorted.iter().map(|el| direction.extent(el.size())).sum();
        let gap = (span - occupied) / (sorted.len() - 1) as f64;

        let mut targets = HashMap::with_capacity(sorted.len() - 1);
        let mut cursor = first;
        for pair in sorted.windows(2) {
            cursor += direction.extent(pair[0].size()) + gap;
            targets.insert(pair[1].id.as_str(), direction.with_leading(pair[1].position(), cursor));
        }

        reposition(elements, &targets)
    }
}

fn axis_of(kind: AlignmentKind) -> Direction {
    match kind {
        AlignmentKind::Left
        | AlignmentKind::Center
        | AlignmentKind::Right
        | AlignmentKind::DistributeHorizontal => Direction::Horizontal,
        AlignmentKind::Top
        | AlignmentKind::Middle
        | AlignmentKind::Bottom
        | AlignmentKind::DistributeVertical => Direction::Vertical,
    }
}
