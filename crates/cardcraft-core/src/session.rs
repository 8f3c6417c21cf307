//! Card editing session.
//!
//! [`EditorSession`] ties the document history to the transient editor state
//! (selection, zoom, grid and snap toggles, drag gesture) and the layout
//! assistant. Every document mutation is one history commit; everything in
//! [`EditorState`] lives outside history.

use crate::card::{
    Background, CardDocument, CardElement, ElementId, ElementUpdate, new_element_id,
};
use crate::events::{Observers, SubscriptionId};
use crate::history::CardHistory;
use crate::layout::{
    AlignmentKind, AlignmentSuggestion, Direction, LayoutAssistant, LayoutConfig, LayoutGuide,
    SnapOutcome,
};
use crate::selection::{
    HANDLE_HIT_TOLERANCE, Handle, HandleKind, get_handles, hit_test_handles, resize_rect,
};
use kurbo::{Point, Vec2};
use serde::Serialize;
use std::sync::Arc;

/// Minimum zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: f64 = 0.25;

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Keep at most this many history entries; unbounded when `None`.
    pub history_limit: Option<usize>,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: Vec2,
    pub layout: LayoutConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            history_limit: None,
            duplicate_offset: Vec2::new(20.0, 20.0),
            layout: LayoutConfig::default(),
        }
    }
}

/// Transient editor state. Not part of history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub selected_element_id: Option<ElementId>,
    /// When non-empty, supersedes the primary selection for layout operations.
    pub multi_select: Vec<ElementId>,
    pub is_editing: bool,
    pub is_dragging: bool,
    pub zoom: f64,
    pub show_grid: bool,
    pub snap_enabled: bool,
    /// Guides of the drag in progress.
    pub layout_guides: Vec<LayoutGuide>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            selected_element_id: None,
            multi_select: Vec::new(),
            is_editing: false,
            is_dragging: false,
            zoom: 1.0,
            show_grid: false,
            snap_enabled: true,
            layout_guides: Vec::new(),
        }
    }
}

/// Notification sent to session subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The current document changed (commit, undo, redo or load).
    DocumentChanged(Arc<CardDocument>),
    SelectionChanged {
        selected: Option<ElementId>,
        multi_select: Vec<ElementId>,
        is_editing: bool,
    },
    /// Guide lines of the active drag changed.
    GuidesChanged(Vec<LayoutGuide>),
    ViewChanged {
        zoom: f64,
        show_grid: bool,
        snap_enabled: bool,
    },
}

/// An in-progress drag gesture.
#[derive(Debug, Clone, PartialEq)]
struct DragState {
    element_id: ElementId,
    origin: Point,
    current: Point,
}

/// A card editing session.
#[derive(Debug)]
pub struct EditorSession {
    history: CardHistory,
    state: EditorState,
    layout: LayoutAssistant,
    config: SessionConfig,
    drag: Option<DragState>,
    observers: Observers<SessionEvent>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(CardDocument::default())
    }
}

impl EditorSession {
    pub fn new(document: CardDocument) -> Self {
        Self::with_config(document, SessionConfig::default())
    }

    pub fn with_config(document: CardDocument, config: SessionConfig) -> Self {
        let layout = LayoutAssistant::with_config(document.dimensions, config.layout);
        let history = match config.history_limit {
            Some(limit) => CardHistory::with_limit(document, limit),
            None => CardHistory::new(document),
        };
        let state = EditorState {
            show_grid: config.layout.snap_to_grid,
            ..EditorState::default()
        };
        Self {
            history,
            state,
            layout,
            config,
            drag: None,
            observers: Observers::new(),
        }
    }

    // --- Accessors ---

    /// The current document.
    pub fn document(&self) -> &Arc<CardDocument> {
        self.history.current()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &CardHistory {
        &self.history
    }

    pub fn layout(&self) -> &LayoutAssistant {
        &self.layout
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Elements targeted by layout operations: the multi-selection if any,
    /// otherwise the primary selection.
    pub fn active_selection(&self) -> Vec<ElementId> {
        if !self.state.multi_select.is_empty() {
            self.state.multi_select.clone()
        } else {
            self.state.selected_element_id.iter().cloned().collect()
        }
    }

    // --- Observers ---

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Lifecycle ---

    /// Replace the document and start a fresh history.
    pub fn load_document(&mut self, document: CardDocument) {
        self.layout.set_canvas(document.dimensions);
        self.history.reset(document);
        self.drag = None;
        self.state.is_dragging = false;
        self.state.layout_guides.clear();
        self.state.selected_element_id = None;
        self.state.multi_select.clear();
        self.state.is_editing = false;
        log::debug!("loaded document with {} elements", self.document().len());
        self.notify_document();
        self.notify_selection();
    }

    // --- Selection ---

    /// Select an element (or clear with `None`). Always leaves edit mode.
    pub fn select_element(&mut self, id: Option<&str>) {
        self.state.selected_element_id = id.map(str::to_string);
        self.state.is_editing = false;
        self.notify_selection();
    }

    /// Select an element and enter text edit mode.
    pub fn start_editing(&mut self, id: &str) {
        self.state.selected_element_id = Some(id.to_string());
        self.state.is_editing = true;
        self.notify_selection();
    }

    pub fn stop_editing(&mut self) {
        self.state.is_editing = false;
        self.notify_selection();
    }

    /// Add or remove an element from the multi-selection.
    pub fn toggle_multi_select(&mut self, id: &str) {
        if let Some(index) = self.state.multi_select.iter().position(|s| s == id) {
            self.state.multi_select.remove(index);
        } else {
            self.state.multi_select.push(id.to_string());
        }
        self.notify_selection();
    }

    pub fn set_multi_select(&mut self, ids: Vec<ElementId>) {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.state.multi_select = unique;
        self.notify_selection();
    }

    pub fn clear_multi_select(&mut self) {
        self.state.multi_select.clear();
        self.notify_selection();
    }

    // --- Element edits ---

    /// Append an element on top of the z-order.
    ///
    /// A fresh id is assigned if the element's id is empty or already taken.
    pub fn add_element(&mut self, mut element: CardElement) -> ElementId {
        if element.id.is_empty() || self.document().contains(&element.id) {
            element.id = new_element_id();
        }
        let id = element.id.clone();
        self.commit("add element", move |doc| {
            let mut next = doc.clone();
            next.elements.push(element);
            next
        });
        id
    }

    /// Apply a partial update. Returns false (and commits nothing) for an
    /// unknown id.
    pub fn update_element(&mut self, id: &str, update: ElementUpdate) -> bool {
        if !self.document().contains(id) {
            log::warn!("update of unknown element {id}");
            return false;
        }
        self.commit("update element", |doc| {
            let mut next = doc.clone();
            for element in next.elements.iter_mut().filter(|el| el.id == id) {
                *element = update.apply(element);
            }
            next
        });
        true
    }

    /// Remove an element and drop it from the selection.
    pub fn remove_element(&mut self, id: &str) -> bool {
        if !self.document().contains(id) {
            return false;
        }
        self.commit("remove element", |doc| {
            let mut next = doc.clone();
            next.elements.retain(|el| el.id != id);
            next
        });
        self.forget_selection(id);
        true
    }

    /// Copy an element, offset from the original, on top of the z-order.
    pub fn duplicate_element(&mut self, id: &str) -> Option<ElementId> {
        let source = self.document().element(id)?;
        let position = match source.style.position {
            Some(position) => position + self.config.duplicate_offset,
            None => Point::ORIGIN + self.config.duplicate_offset,
        };
        let copy = source.moved_to(position).with_id(new_element_id());
        Some(self.add_element(copy))
    }

    /// Move an element's top-left to `position` as one history step.
    pub fn move_element(&mut self, id: &str, position: Point) -> bool {
        if !self.document().contains(id) {
            return false;
        }
        self.commit("move element", |doc| {
            let mut next = doc.clone();
            for element in next.elements.iter_mut().filter(|el| el.id == id) {
                element.style.position = Some(position);
            }
            next
        });
        true
    }

    /// Resize an element by dragging `handle` by `screen_delta` screen pixels.
    ///
    /// The delta is divided by the current zoom; sides never go below the
    /// minimum element dimension.
    pub fn resize_element(&mut self, id: &str, handle: HandleKind, screen_delta: Vec2) -> bool {
        let Some(element) = self.document().element(id) else {
            return false;
        };
        let bounds = resize_rect(element.bounds(), handle, screen_delta / self.state.zoom);
        self.commit("resize element", |doc| {
            let mut next = doc.clone();
            for element in next.elements.iter_mut().filter(|el| el.id == id) {
                element.style.position = Some(bounds.origin());
                element.style.size = Some(bounds.size());
            }
            next
        });
        true
    }

    /// Resize handles around the selected element, in card coordinates.
    pub fn selection_handles(&self) -> Vec<Handle> {
        self.selected_element().map(get_handles).unwrap_or_default()
    }

    /// The selected element's handle under `point` (card coordinates).
    /// The hit tolerance is fixed in screen pixels.
    pub fn handle_at(&self, point: Point) -> Option<HandleKind> {
        let element = self.selected_element()?;
        hit_test_handles(element, point, HANDLE_HIT_TOLERANCE / self.state.zoom)
    }

    fn selected_element(&self) -> Option<&CardElement> {
        let id = self.state.selected_element_id.as_deref()?;
        self.document().element(id)
    }

    /// Move an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        match self.document().element_index(id) {
            Some(index) if index + 1 < self.document().len() => {
                self.commit("bring to front", |doc| {
                    let mut next = doc.clone();
                    let element = next.elements.remove(index);
                    next.elements.push(element);
                    next
                });
                true
            }
            _ => false,
        }
    }

    /// Move an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &str) -> bool {
        match self.document().element_index(id) {
            Some(index) if index > 0 => {
                self.commit("send to back", |doc| {
                    let mut next = doc.clone();
                    let element = next.elements.remove(index);
                    next.elements.insert(0, element);
                    next
                });
                true
            }
            _ => false,
        }
    }

    pub fn update_background(&mut self, background: Background) {
        self.commit("update background", |doc| doc.clone().with_background(background));
    }

    /// Remove every element. Background and dimensions are kept.
    pub fn clear_canvas(&mut self) {
        self.commit("clear canvas", |doc| doc.clone().with_elements(Vec::new()));
        self.state.selected_element_id = None;
        self.state.multi_select.clear();
        self.state.is_editing = false;
        self.notify_selection();
    }

    // --- Drag gesture ---

    /// Start dragging an element. Returns false for an unknown id.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        let Some(element) = self.document().element(id) else {
            return false;
        };
        let origin = element.position();
        self.drag = Some(DragState {
            element_id: id.to_string(),
            origin,
            current: origin,
        });
        self.state.is_dragging = true;
        log::debug!("begin drag {id}");
        true
    }

    /// Update the live drag position (element top-left, card units).
    ///
    /// The position is snapped when snapping is enabled. Nothing is committed.
    /// Returns `None` when no drag is active.
    pub fn drag_to(&mut self, position: Point) -> Option<SnapOutcome> {
        let id = self.drag.as_ref()?.element_id.clone();
        let outcome = if self.state.snap_enabled {
            self.layout
                .calculate_snap_position(&self.history.current().elements, &id, position)
        } else {
            SnapOutcome::unsnapped(position)
        };

        if let Some(drag) = self.drag.as_mut() {
            drag.current = outcome.position;
        }
        if self.state.layout_guides != outcome.guides {
            self.state.layout_guides = outcome.guides.clone();
            self.observers
                .publish(&SessionEvent::GuidesChanged(outcome.guides.clone()));
        }
        Some(outcome)
    }

    /// Live position of the dragged element, if a drag is active.
    pub fn drag_position(&self) -> Option<(&str, Point)> {
        self.drag
            .as_ref()
            .map(|drag| (drag.element_id.as_str(), drag.current))
    }

    /// Finish the drag, committing the final position as one history step.
    ///
    /// Returns the new document, or `None` if no drag was active or the
    /// element did not move.
    pub fn end_drag(&mut self) -> Option<Arc<CardDocument>> {
        let drag = self.finish_drag()?;
        if drag.current == drag.origin || !self.document().contains(&drag.element_id) {
            return None;
        }
        self.move_element(&drag.element_id, drag.current);
        Some(Arc::clone(self.document()))
    }

    /// Abandon the drag without touching the document.
    pub fn cancel_drag(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&mut self) -> Option<DragState> {
        let drag = self.drag.take()?;
        self.state.is_dragging = false;
        if !self.state.layout_guides.is_empty() {
            self.state.layout_guides.clear();
            self.observers.publish(&SessionEvent::GuidesChanged(Vec::new()));
        }
        Some(drag)
    }

    // --- Layout ---

    /// Alignments offered for the active selection.
    pub fn alignment_suggestions(&self) -> Vec<AlignmentSuggestion> {
        self.layout
            .generate_alignment_suggestions(&self.document().elements, &self.active_selection())
    }

    /// Align or distribute the active selection.
    /// Commits one history step if any element moved.
    pub fn apply_alignment(&mut self, kind: AlignmentKind) -> bool {
        let elements =
            self.layout
                .apply_alignment(&self.document().elements, &self.active_selection(), kind);
        self.commit_elements(kind.description(), elements)
    }

    /// Equalize gaps across the active selection.
    /// Commits one history step if any element moved.
    pub fn apply_equal_spacing(&mut self, direction: Direction) -> bool {
        let elements = self.layout.calculate_equal_spacing(
            &self.document().elements,
            &self.active_selection(),
            direction,
        );
        self.commit_elements("equal spacing", elements)
    }

    fn commit_elements(&mut self, label: &str, elements: Vec<CardElement>) -> bool {
        if elements == self.document().elements {
            return false;
        }
        self.commit(label, |doc| doc.clone().with_elements(elements));
        true
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.after_history_move();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            self.after_history_move();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo and redo move the document only. Selection is left alone, so
    /// ids may point at elements absent from the current document.
    fn after_history_move(&mut self) {
        self.drag = None;
        self.state.is_dragging = false;
        self.state.layout_guides.clear();
        self.notify_document();
    }

    // --- View ---

    /// Set the zoom level, clamped to the configured bounds.
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {zoom}");
            return;
        }
        self.state.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.notify_view();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.state.zoom + self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.state.zoom - self.config.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    /// Toggle grid display. Grid lines are snap candidates only while shown.
    pub fn toggle_grid(&mut self) {
        self.state.show_grid = !self.state.show_grid;
        self.layout.set_snap_to_grid(self.state.show_grid);
        self.notify_view();
    }

    pub fn toggle_snap(&mut self) {
        self.state.snap_enabled = !self.state.snap_enabled;
        self.notify_view();
    }

    // --- Internals ---

    fn commit<F>(&mut self, label: &str, mutator: F) -> Arc<CardDocument>
    where
        F: FnOnce(&CardDocument) -> CardDocument,
    {
        let document = self.history.commit(mutator);
        log::debug!("{label}");
        self.notify_document();
        document
    }

    fn forget_selection(&mut self, id: &str) {
        let mut changed = false;
        if self.state.selected_element_id.as_deref() == Some(id) {
            self.state.selected_element_id = None;
            self.state.is_editing = false;
            changed = true;
        }
        let before = self.state.multi_select.len();
        self.state.multi_select.retain(|s| s != id);
        if changed || before != self.state.multi_select.len() {
            self.notify_selection();
        }
    }

    fn notify_document(&self) {
        self.observers
            .publish(&SessionEvent::DocumentChanged(Arc::clone(self.history.current())));
    }

    fn notify_selection(&self) {
        self.observers.publish(&SessionEvent::SelectionChanged {
            selected: self.state.selected_element_id.clone(),
            multi_select: self.state.multi_select.clone(),
            is_editing: self.state.is_editing,
        });
    }

    fn notify_view(&self) {
        self.observers.publish(&SessionEvent::ViewChanged {
            zoom: self.state.zoom,
            show_grid: self.state.show_grid,
            snap_enabled: self.state.snap_enabled,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DEFAULT_ELEMENT_SIZE, Dimensions, ElementStyle, ElementKind};
    use crate::selection::{Corner, Edge};
    use kurbo::Size;
    use std::sync::Mutex;

    fn text(id: &str, x: f64, y: f64, w: f64, h: f64) -> CardElement {
        CardElement::text(id, Point::new(x, y), Size::new(w, h)).with_id(id)
    }

    fn session_with(elements: Vec<CardElement>) -> EditorSession {
        EditorSession::new(CardDocument::new(Dimensions::new(400, 500)).with_elements(elements))
    }

    fn three() -> EditorSession {
        session_with(vec![
            text("a", 10.0, 10.0, 100.0, 50.0),
            text("b", 30.0, 200.0, 100.0, 50.0),
            text("c", 300.0, 400.0, 100.0, 50.0),
        ])
    }

    #[test]
    fn test_defaults() {
        let session = EditorSession::default();
        assert_eq!(session.state().zoom, 1.0);
        assert!(session.state().snap_enabled);
        assert!(!session.state().show_grid);
        assert!(!session.can_undo());
        assert_eq!(session.document().dimensions, Dimensions::new(400, 500));
    }

    #[test]
    fn test_add_update_remove() {
        let mut session = EditorSession::default();
        let id = session.add_element(CardElement::text("Hi", Point::new(5.0, 5.0), DEFAULT_ELEMENT_SIZE));
        assert!(session.document().contains(&id));

        assert!(session.update_element(&id, ElementUpdate::content("Hello")));
        assert_eq!(session.document().element(&id).unwrap().content, "Hello");
        assert!(!session.update_element("missing", ElementUpdate::content("x")));

        session.select_element(Some(&id));
        assert!(session.remove_element(&id));
        assert!(session.document().is_empty());
        assert_eq!(session.state().selected_element_id, None);
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn test_add_regenerates_colliding_id() {
        let mut session = three();
        let id = session.add_element(text("a", 0.0, 0.0, 10.0, 10.0));
        assert_ne!(id, "a");
        assert_eq!(session.document().len(), 4);
    }

    #[test]
    fn test_selection_editing_flags() {
        let mut session = three();
        session.start_editing("a");
        assert!(session.state().is_editing);
        session.select_element(Some("b"));
        assert!(!session.state().is_editing);
        assert_eq!(session.state().selected_element_id.as_deref(), Some("b"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_duplicate_offsets() {
        let mut session = three();
        let copy = session.duplicate_element("b").unwrap();
        assert_ne!(copy, "b");
        let element = session.document().element(&copy).unwrap().clone();
        assert_eq!(element.position(), Point::new(50.0, 220.0));
        assert_eq!(element.content, "b");

        let mut session = EditorSession::default();
        let id = session.add_element(CardElement::new(ElementKind::Text, "x", ElementStyle::default()));
        let copy = session.duplicate_element(&id).unwrap();
        assert_eq!(session.document().element(&copy).unwrap().position(), Point::new(20.0, 20.0));
        assert_eq!(session.duplicate_element("missing"), None);
    }

    #[test]
    fn test_resize_divides_by_zoom() {
        let mut session = three();
        session.set_zoom(2.0);
        assert!(session.resize_element("a", HandleKind::Corner(Corner::BottomRight), Vec2::new(20.0, 40.0)));
        assert_eq!(session.document().element("a").unwrap().size(), Size::new(110.0, 70.0));

        assert!(session.resize_element("a", HandleKind::Edge(Edge::Left), Vec2::new(1000.0, 0.0)));
        let element = session.document().element("a").unwrap();
        assert_eq!(element.size().width, 20.0);
        assert_eq!(element.bounds().x1, 120.0);
    }

    #[test]
    fn test_handle_hit_testing() {
        let mut session = three();
        assert!(session.selection_handles().is_empty());
        assert_eq!(session.handle_at(Point::new(110.0, 60.0)), None);

        session.select_element(Some("a"));
        assert_eq!(session.selection_handles().len(), 8);
        assert_eq!(
            session.handle_at(Point::new(110.0, 60.0)),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(session.handle_at(Point::new(60.0, 10.0)), Some(HandleKind::Edge(Edge::Top)));
        assert_eq!(session.handle_at(Point::new(60.0, 35.0)), None);

        // 6 units is inside the tolerance at 100% zoom but not at 200%.
        assert!(session.handle_at(Point::new(116.0, 60.0)).is_some());
        session.set_zoom(2.0);
        assert_eq!(session.handle_at(Point::new(116.0, 60.0)), None);
    }

    #[test]
    fn test_z_order() {
        let mut session = three();
        assert!(session.bring_to_front("a"));
        assert_eq!(session.document().elements[2].id, "a");
        assert!(!session.bring_to_front("a"));
        assert!(session.send_to_back("a"));
        assert_eq!(session.document().elements[0].id, "a");
        assert!(!session.send_to_back("a"));
    }

    #[test]
    fn test_background_and_clear() {
        let mut session = three();
        session.update_background(Background::solid("#ffffff"));
        session.select_element(Some("a"));
        session.clear_canvas();
        assert!(session.document().is_empty());
        assert_eq!(session.document().background, Background::solid("#ffffff"));
        assert_eq!(session.state().selected_element_id, None);

        assert!(session.undo());
        assert_eq!(session.document().len(), 3);
    }

    #[test]
    fn test_drag_commits_once() {
        let mut session = three();
        assert!(session.begin_drag("b"));
        assert!(session.state().is_dragging);
        for x in [40.0, 60.0, 80.0] {
            session.drag_to(Point::new(x, 300.0));
        }
        assert_eq!(session.history().len(), 1);

        let document = session.end_drag().unwrap();
        assert_eq!(document.element("b").unwrap().position(), Point::new(80.0, 300.0));
        assert_eq!(session.history().len(), 2);
        assert!(!session.state().is_dragging);

        assert!(session.undo());
        assert_eq!(session.document().element("b").unwrap().position(), Point::new(30.0, 200.0));
    }

    #[test]
    fn test_drag_snaps_and_publishes_guides() {
        let mut session = three();
        session.begin_drag("b");
        // 3 units from element a's left edge at x = 10.
        let outcome = session.drag_to(Point::new(13.0, 300.0)).unwrap();
        assert_eq!(outcome.position.x, 10.0);
        assert!(!session.state().layout_guides.is_empty());

        session.cancel_drag();
        assert!(session.state().layout_guides.is_empty());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.drag_to(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_drag_without_snap() {
        let mut session = three();
        session.toggle_snap();
        session.begin_drag("b");
        let outcome = session.drag_to(Point::new(13.0, 300.0)).unwrap();
        assert_eq!(outcome.position, Point::new(13.0, 300.0));
        assert!(outcome.guides.is_empty());
    }

    #[test]
    fn test_drag_without_movement_commits_nothing() {
        let mut session = three();
        session.begin_drag("a");
        assert_eq!(session.end_drag(), None);
        assert!(!session.begin_drag("missing"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_alignment_uses_multi_select() {
        let mut session = three();
        assert!(session.alignment_suggestions().is_empty());
        session.set_multi_select(vec!["a".into(), "b".into(), "c".into(), "a".into()]);
        assert_eq!(session.state().multi_select.len(), 3);
        assert_eq!(session.alignment_suggestions().len(), 8);

        assert!(session.apply_alignment(AlignmentKind::Left));
        assert_eq!(session.history().len(), 2);
        // Already aligned: no new history entry.
        assert!(!session.apply_alignment(AlignmentKind::Left));
        assert_eq!(session.history().len(), 2);

        assert!(session.apply_alignment(AlignmentKind::DistributeVertical));
        let doc = session.document();
        assert_eq!(doc.element("a").unwrap().position(), Point::new(10.0, 10.0));
        assert_eq!(doc.element("b").unwrap().position(), Point::new(10.0, 205.0));
        assert_eq!(doc.element("c").unwrap().position(), Point::new(10.0, 400.0));
    }

    #[test]
    fn test_equal_spacing_commit() {
        let mut session = session_with(vec![
            text("a", 0.0, 0.0, 10.0, 10.0),
            text("b", 20.0, 0.0, 30.0, 10.0),
            text("c", 100.0, 0.0, 20.0, 10.0),
        ]);
        session.toggle_multi_select("a");
        session.toggle_multi_select("b");
        assert!(!session.apply_equal_spacing(Direction::Horizontal));
        session.toggle_multi_select("c");
        assert!(session.apply_equal_spacing(Direction::Horizontal));
        assert_eq!(session.document().element("b").unwrap().position().x, 40.0);
    }

    #[test]
    fn test_undo_keeps_selection() {
        let mut session = EditorSession::default();
        let id = session.add_element(CardElement::text("x", Point::ORIGIN, DEFAULT_ELEMENT_SIZE));
        session.select_element(Some(&id));
        session.toggle_multi_select(&id);
        assert!(session.undo());
        assert!(session.document().is_empty());
        assert_eq!(session.state().selected_element_id.as_deref(), Some(id.as_str()));
        assert_eq!(session.state().multi_select, vec![id.clone()]);

        // Layout operations skip ids missing from the document.
        assert!(!session.apply_alignment(AlignmentKind::Left));
        assert!(!session.update_element(&id, ElementUpdate::default()));

        assert!(session.redo());
        assert_eq!(session.state().selected_element_id.as_deref(), Some(id.as_str()));
        assert!(!session.redo());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut session = EditorSession::default();
        session.set_zoom(10.0);
        assert_eq!(session.state().zoom, MAX_ZOOM);
        session.set_zoom(0.0);
        assert_eq!(session.state().zoom, MIN_ZOOM);
        session.set_zoom(f64::NAN);
        assert_eq!(session.state().zoom, MIN_ZOOM);
        session.reset_zoom();
        session.zoom_in();
        assert_eq!(session.state().zoom, 1.25);
        session.zoom_out();
        session.zoom_out();
        assert_eq!(session.state().zoom, 0.75);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_toggle_grid_enables_grid_snapping() {
        let mut session = session_with(vec![text("a", 0.0, 0.0, 40.0, 30.0)]);
        session.toggle_grid();
        assert!(session.layout().config().snap_to_grid);
        session.begin_drag("a");
        let outcome = session.drag_to(Point::new(133.0, 303.0)).unwrap();
        assert_eq!(outcome.position, Point::new(130.0, 300.0));
    }

    #[test]
    fn test_load_document_resets() {
        let mut session = three();
        session.move_element("a", Point::new(1.0, 1.0));
        session.select_element(Some("a"));
        session.load_document(CardDocument::new(Dimensions::new(600, 300)));
        assert_eq!(session.history().len(), 1);
        assert!(!session.can_undo());
        assert_eq!(session.state().selected_element_id, None);
        assert_eq!(session.layout().canvas(), Size::new(600.0, 300.0));
    }

    #[test]
    fn test_subscribers_receive_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut session = three();
        let sink = Arc::clone(&events);
        let id = session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        session.move_element("a", Point::new(1.0, 1.0));
        session.select_element(Some("a"));
        session.set_zoom(2.0);
        {
            let events = events.lock().unwrap();
            assert_eq!(events.len(), 3);
            assert!(matches!(&events[0], SessionEvent::DocumentChanged(doc) if doc.element("a").unwrap().position() == Point::new(1.0, 1.0)));
            assert!(matches!(&events[1], SessionEvent::SelectionChanged { selected: Some(s), .. } if s == "a"));
            assert!(matches!(events[2], SessionEvent::ViewChanged { zoom, .. } if zoom == 2.0));
        }

        assert!(session.unsubscribe(id));
        session.undo();
        assert_eq!(events.lock().unwrap().len(), 3);
    }
}
