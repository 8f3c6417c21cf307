//! CardCraft Render Library
//!
//! Renderer abstraction and implementations for CardCraft cards.
//! The default implementation exports standalone SVG documents, which the
//! server uses for card previews.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderError, RenderResult, Renderer};
pub use svg::SvgRenderer;
