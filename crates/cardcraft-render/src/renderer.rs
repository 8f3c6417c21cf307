//! Renderer trait abstraction.

use cardcraft_core::card::CardDocument;
use cardcraft_core::layout::{DEFAULT_GRID_SIZE, LayoutGuide};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Everything needed to render one card.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The card to render.
    pub document: &'a CardDocument,
    /// Output pixels per card unit.
    pub scale: f64,
    /// Draw the alignment grid over the card.
    pub show_grid: bool,
    pub grid_size: f64,
    /// Alignment guides to overlay (editor previews only).
    pub guides: &'a [LayoutGuide],
}

impl<'a> RenderContext<'a> {
    /// Create a new render context at scale 1 with no overlays.
    pub fn new(document: &'a CardDocument) -> Self {
        Self {
            document,
            scale: 1.0,
            show_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            guides: &[],
        }
    }

    /// Set the output scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Overlay the alignment grid.
    pub fn with_grid(mut self, grid_size: f64) -> Self {
        self.show_grid = true;
        self.grid_size = grid_size;
        self
    }

    /// Overlay alignment guides.
    pub fn with_guides(mut self, guides: &'a [LayoutGuide]) -> Self {
        self.guides = guides;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Render a frame described by `ctx` to encoded bytes.
    fn render_frame(&self, ctx: &RenderContext) -> RenderResult<Vec<u8>>;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;

    /// Render a card with default options.
    fn render(&self, document: &CardDocument) -> RenderResult<Vec<u8>> {
        self.render_frame(&RenderContext::new(document))
    }
}
