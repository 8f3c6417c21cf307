//! Card document data model.
//!
//! The serialized form of these types is the wire format shared with the
//! storage API and share links, so field names follow the camelCase layout
//! clients already send.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an element within a card document.
pub type ElementId = String;

/// Size assumed for elements that have not been given one yet.
pub const DEFAULT_ELEMENT_SIZE: Size = Size::new(100.0, 50.0);

/// Smallest width or height the resize operation will produce.
pub const MIN_ELEMENT_DIMENSION: f64 = 20.0;

/// Default card dimensions for a blank canvas.
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions::new(400, 500);

/// Canvas size of a card in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as a floating point size.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Check that both sides are non-zero.
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        DEFAULT_DIMENSIONS
    }
}

/// Kind of a card element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Text,
    Image,
}

/// Visual style of an element.
///
/// Typography fields only apply to text elements and are ignored for images.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl ElementStyle {
    /// Style with only geometry set.
    pub fn placed(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// A positioned text or image object on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: String,
    #[serde(default)]
    pub style: ElementStyle,
}

impl CardElement {
    /// Create an element with a freshly generated id.
    pub fn new(kind: ElementKind, content: impl Into<String>, style: ElementStyle) -> Self {
        Self {
            id: new_element_id(),
            kind,
            content: content.into(),
            style,
        }
    }

    /// Create a text element at the given position and size.
    pub fn text(content: impl Into<String>, position: Point, size: Size) -> Self {
        Self::new(ElementKind::Text, content, ElementStyle::placed(position, size))
    }

    /// Create an image element at the given position and size.
    pub fn image(url: impl Into<String>, position: Point, size: Size) -> Self {
        Self::new(ElementKind::Image, url, ElementStyle::placed(position, size))
    }

    /// Replace the id (useful for fixtures and templates).
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Top-left position, or the origin if unplaced.
    pub fn position(&self) -> Point {
        self.style.position.unwrap_or(Point::ORIGIN)
    }

    /// Size, or [`DEFAULT_ELEMENT_SIZE`] if unsized.
    pub fn size(&self) -> Size {
        self.style.size.unwrap_or(DEFAULT_ELEMENT_SIZE)
    }

    /// Bounding box in card coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    /// Center point of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Copy of this element moved to `position`.
    pub fn moved_to(&self, position: Point) -> Self {
        let mut element = self.clone();
        element.style.position = Some(position);
        element
    }
}

/// Generate a new unique element id.
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().simple().to_string()
}

/// How a background's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Image,
}

/// Card background.
///
/// `value` is what gets rendered: a color, a CSS gradient or an image URL.
/// The optional fields are hints some clients store next to it. They are
/// kept exactly as received and never override `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<String>,
}

impl Background {
    fn with_value(kind: BackgroundKind, value: String) -> Self {
        Background {
            kind,
            value,
            color: None,
            gradient: None,
            url: None,
            gradient_start: None,
            gradient_end: None,
        }
    }

    pub fn solid(color: impl Into<String>) -> Self {
        Self::with_value(BackgroundKind::Solid, color.into())
    }

    /// A 135° linear gradient between two colors.
    pub fn gradient(start: impl Into<String>, end: impl Into<String>) -> Self {
        let start = start.into();
        let end = end.into();
        let value = format!("linear-gradient(135deg, {start}, {end})");
        Background {
            gradient_start: Some(start),
            gradient_end: Some(end),
            ..Self::with_value(BackgroundKind::Gradient, value)
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::with_value(BackgroundKind::Image, url.into())
    }

    /// The rendered CSS value of this background.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::gradient("#3B82F6", "#2563EB")
    }
}

/// The serializable content of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDocument {
    /// Elements in z-order (back to front).
    pub elements: Vec<CardElement>,
    pub background: Background,
    pub dimensions: Dimensions,
}

impl Default for CardDocument {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl CardDocument {
    /// Create an empty document with the default background.
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            elements: Vec::new(),
            background: Background::default(),
            dimensions,
        }
    }

    /// Builder-style element list replacement.
    pub fn with_elements(mut self, elements: Vec<CardElement>) -> Self {
        self.elements = elements;
        self
    }

    /// Builder-style background replacement.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Get an element by id.
    pub fn element(&self, id: &str) -> Option<&CardElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Position of an element in z-order.
    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Check whether an element exists.
    pub fn contains(&self, id: &str) -> bool {
        self.element_index(id).is_some()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Copy of this document with element ids regenerated.
    pub fn with_fresh_ids(&self) -> Self {
        let mut doc = self.clone();
        for element in &mut doc.elements {
            element.id = new_element_id();
        }
        doc
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Partial update of an element; `None` fields are left as they are.
///
/// A provided `style` replaces the whole style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl ElementUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn style(style: ElementStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// Apply this update to an element, returning the updated copy.
    pub fn apply(&self, element: &CardElement) -> CardElement {
        CardElement {
            id: element.id.clone(),
            kind: self.kind.unwrap_or(element.kind),
            content: self.content.clone().unwrap_or_else(|| element.content.clone()),
            style: self.style.clone().unwrap_or_else(|| element.style.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_defaults() {
        let el = CardElement::new(ElementKind::Text, "hi", ElementStyle::default());
        assert_eq!(el.position(), Point::ORIGIN);
        assert_eq!(el.size(), DEFAULT_ELEMENT_SIZE);
        assert_eq!(el.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_element_ids_unique() {
        let a = CardElement::text("a", Point::ORIGIN, DEFAULT_ELEMENT_SIZE);
        let b = CardElement::text("b", Point::ORIGIN, DEFAULT_ELEMENT_SIZE);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_format() {
        let doc = CardDocument::new(Dimensions::new(400, 500)).with_elements(vec![
            CardElement::text("Hello\nWorld", Point::new(10.0, 20.0), Size::new(100.0, 50.0))
                .with_id("t1"),
        ]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["elements"][0]["type"], "text");
        assert_eq!(value["elements"][0]["style"]["position"], json!({"x": 10.0, "y": 20.0}));
        assert_eq!(
            value["elements"][0]["style"]["size"],
            json!({"width": 100.0, "height": 50.0})
        );
        assert!(value["elements"][0]["style"].get("fontSize").is_none());
        assert_eq!(value["background"]["type"], "gradient");
        assert_eq!(value["background"]["gradientStart"], "#3B82F6");
        assert_eq!(value["dimensions"], json!({"width": 400, "height": 500}));
    }

    #[test]
    fn test_parse_client_document() {
        let json = r##"{
            "elements": [{
                "id": "quote",
                "type": "text",
                "content": "Stay hungry",
                "style": { "fontSize": 20, "fontWeight": "500", "textAlign": "left",
                           "position": { "x": 32, "y": 100 } }
            }, {
                "id": "logo", "type": "image", "content": "/uploads/a.png", "style": {}
            }],
            "background": { "type": "solid", "value": "#ffffff", "color": "#fafafa" },
            "dimensions": { "width": 350, "height": 200 }
        }"##;
        let doc = CardDocument::from_json(json).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.elements[0].style.font_size, Some(20.0));
        assert_eq!(doc.elements[0].style.text_align.as_deref(), Some("left"));
        assert_eq!(doc.elements[0].size(), DEFAULT_ELEMENT_SIZE);
        assert_eq!(doc.elements[1].kind, ElementKind::Image);
        assert_eq!(doc.background.kind, BackgroundKind::Solid);
        assert_eq!(doc.background.value(), "#ffffff");
        assert_eq!(doc.background.color.as_deref(), Some("#fafafa"));
        assert_eq!(doc.dimensions, Dimensions::new(350, 200));
    }

    #[test]
    fn test_background_keeps_client_fields() {
        let raw = json!({"type": "solid", "value": "#ffffff", "color": "#000000"});
        let bg: Background = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(bg.value(), "#ffffff");
        assert_eq!(serde_json::to_value(&bg).unwrap(), raw);

        let raw = json!({
            "type": "gradient",
            "value": "linear-gradient(135deg, #F59E0B, #EF4444)",
            "gradient": "linear-gradient(90deg, red, blue)",
            "gradientStart": "#000000"
        });
        let bg: Background = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(bg.value(), "linear-gradient(135deg, #F59E0B, #EF4444)");
        assert_eq!(serde_json::to_value(&bg).unwrap(), raw);
    }

    #[test]
    fn test_background_from_value() {
        let bg: Background =
            serde_json::from_value(json!({"type": "image", "value": "/uploads/bg.png"})).unwrap();
        assert_eq!(bg, Background::image("/uploads/bg.png"));
        assert_eq!(bg.value(), "/uploads/bg.png");
    }

    #[test]
    fn test_gradient_value() {
        let bg = Background::gradient("#10B981", "#059669");
        assert_eq!(bg.value(), "linear-gradient(135deg, #10B981, #059669)");
    }

    #[test]
    fn test_element_update_merges() {
        let el = CardElement::text("old", Point::new(5.0, 5.0), Size::new(40.0, 40.0));
        let updated = ElementUpdate::content("new").apply(&el);
        assert_eq!(updated.id, el.id);
        assert_eq!(updated.content, "new");
        assert_eq!(updated.style, el.style);
    }

    #[test]
    fn test_fresh_ids() {
        let doc = CardDocument::default().with_elements(vec![
            CardElement::text("a", Point::ORIGIN, DEFAULT_ELEMENT_SIZE).with_id("a"),
        ]);
        let copy = doc.with_fresh_ids();
        assert_ne!(copy.elements[0].id, "a");
        assert_eq!(copy.elements[0].content, "a");
    }
}
