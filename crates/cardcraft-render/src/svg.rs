//! SVG renderer.

use crate::renderer::{RenderContext, RenderError, RenderResult, Renderer};
use cardcraft_core::card::{Background, BackgroundKind, CardDocument, CardElement, ElementKind};
use cardcraft_core::layout::GuideStyle;
use std::fmt::Write;

const DEFAULT_FONT_SIZE: f64 = 16.0;
const DEFAULT_TEXT_COLOR: &str = "#000000";
const LINE_HEIGHT: f64 = 1.2;

/// Renders cards as standalone SVG documents.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Fallback font stack for text without a font family.
    pub default_font: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            default_font: "Inter, sans-serif".to_string(),
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render to an SVG string.
    pub fn render_to_string(&self, ctx: &RenderContext) -> RenderResult<String> {
        let document = ctx.document;
        if !document.dimensions.is_valid() {
            return Err(RenderError::InvalidDocument(format!(
                "dimensions must be positive, got {}x{}",
                document.dimensions.width, document.dimensions.height
            )));
        }
        if !(ctx.scale.is_finite() && ctx.scale > 0.0) {
            return Err(RenderError::RenderFailed(format!("invalid scale {}", ctx.scale)));
        }

        let size = document.dimensions.size();
        let mut svg = String::with_capacity(2048);
        write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            size.width * ctx.scale,
            size.height * ctx.scale,
            size.width,
            size.height,
        )?;

        write_background(&mut svg, &document.background)?;
        for element in &document.elements {
            match element.kind {
                ElementKind::Text => self.write_text(&mut svg, element)?,
                ElementKind::Image => write_image(&mut svg, element)?,
            }
        }

        if ctx.show_grid && ctx.grid_size > 0.0 {
            write_grid(&mut svg, document, ctx.grid_size)?;
        }
        for guide in ctx.guides {
            write!(
                svg,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"{}/>",
                guide.line.p0.x,
                guide.line.p0.y,
                guide.line.p1.x,
                guide.line.p1.y,
                guide.style.color(),
                guide.style.width(),
                guide.style.opacity(),
                if guide.style.is_dashed() { " stroke-dasharray=\"4 4\"" } else { "" },
            )?;
        }

        svg.push_str("</svg>");
        log::debug!("rendered {} elements to {} bytes of SVG", document.len(), svg.len());
        Ok(svg)
    }

    fn write_text(&self, svg: &mut String, element: &CardElement) -> RenderResult<()> {
        let bounds = element.bounds();
        let style = &element.style;
        let font_size = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        let (anchor, x) = match style.text_align.as_deref() {
            Some("center") => ("middle", bounds.center().x),
            Some("right") => ("end", bounds.x1),
            _ => ("start", bounds.x0),
        };

        write!(
            svg,
            "<text x=\"{x}\" y=\"{}\" font-size=\"{font_size}\" font-family=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\">",
            bounds.y0,
            escape_xml(style.font_family.as_deref().unwrap_or(&self.default_font)),
            escape_xml(style.font_weight.as_deref().unwrap_or("normal")),
            escape_xml(style.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)),
        )?;
        for (i, line) in element.content.split('\n').enumerate() {
            let dy = if i == 0 { font_size } else { font_size * LINE_HEIGHT };
            write!(svg, "<tspan x=\"{x}\" dy=\"{dy}\">{}</tspan>", escape_xml(line))?;
        }
        svg.push_str("</text>");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render_frame(&self, ctx: &RenderContext) -> RenderResult<Vec<u8>> {
        self.render_to_string(ctx).map(String::into_bytes)
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

fn write_background(svg: &mut String, background: &Background) -> RenderResult<()> {
    match background.kind {
        BackgroundKind::Solid => {
            write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
                escape_xml(background.value())
            )?;
        }
        BackgroundKind::Gradient => {
            let (start, end) = gradient_stops(
                background.value(),
                background.gradient_start.as_deref(),
                background.gradient_end.as_deref(),
            );
            // 135deg runs from the top-left corner to the bottom-right corner.
            write!(
                svg,
                "<defs><linearGradient id=\"card-bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\
                 <stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/>\
                 </linearGradient></defs><rect width=\"100%\" height=\"100%\" fill=\"url(#card-bg)\"/>",
                escape_xml(&start),
                escape_xml(&end),
            )?;
        }
        BackgroundKind::Image => {
            write!(
                svg,
                "<image href=\"{}\" width=\"100%\" height=\"100%\" preserveAspectRatio=\"xMidYMid slice\"/>",
                escape_xml(background.value())
            )?;
        }
    }
    Ok(())
}

fn write_image(svg: &mut String, element: &CardElement) -> RenderResult<()> {
    let bounds = element.bounds();
    write!(
        svg,
        "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\"/>",
        escape_xml(&element.content),
        bounds.x0,
        bounds.y0,
        bounds.width(),
        bounds.height(),
    )?;
    Ok(())
}

fn write_grid(svg: &mut String, document: &CardDocument, grid_size: f64) -> RenderResult<()> {
    let size = document.dimensions.size();
    let style = GuideStyle::Grid;
    write!(
        svg,
        "<g stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\">",
        style.color(),
        style.width(),
        style.opacity()
    )?;
    let columns = (size.width / grid_size).floor() as usize;
    for i in 0..=columns {
        let x = i as f64 * grid_size;
        write!(svg, "<line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{}\"/>", size.height)?;
    }
    let rows = (size.height / grid_size).floor() as usize;
    for i in 0..=rows {
        let y = i as f64 * grid_size;
        write!(svg, "<line x1=\"0\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\"/>", size.width)?;
    }
    svg.push_str("</g>");
    Ok(())
}

/// Gradient colors, falling back to parsing the CSS value when the explicit
/// stops are missing.
/// First and last color stops of a CSS gradient. The stored start and end
/// colors are used only when `value` has no colors to offer.
fn gradient_stops(value: &str, start: Option<&str>, end: Option<&str>) -> (String, String) {
    let inner = value
        .split_once('(')
        .and_then(|(_, rest)| rest.rsplit_once(')'))
        .map(|(inner, _)| inner)
        .unwrap_or_default();
    let colors: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|part| !part.ends_with("deg") && !part.is_empty())
        .collect();
    match colors.as_slice() {
        [first, .., last] => (first.to_string(), last.to_string()),
        [only] => (only.to_string(), only.to_string()),
        [] => {
            let start = start.unwrap_or(DEFAULT_TEXT_COLOR);
            (start.to_string(), end.unwrap_or(start).to_string())
        }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcraft_core::card::{Dimensions, ElementStyle};
    use cardcraft_core::layout::LayoutGuide;
    use kurbo::{Line, Point, Size};

    fn render(document: &CardDocument) -> String {
        SvgRenderer::new()
            .render_to_string(&RenderContext::new(document))
            .unwrap()
    }

    #[test]
    fn test_empty_card() {
        let svg = render(&CardDocument::new(Dimensions::new(400, 500)));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"400\" height=\"500\""));
        assert!(svg.contains("stop-color=\"#3B82F6\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_text_lines_and_escaping() {
        let mut element = CardElement::text("Tom & Jerry\n<b>", Point::new(10.0, 20.0), Size::new(200.0, 50.0));
        element.style.text_align = Some("center".to_string());
        element.style.font_size = Some(20.0);
        let doc = CardDocument::default()
            .with_background(Background::solid("#fff"))
            .with_elements(vec![element]);
        let svg = render(&doc);

        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("&lt;b&gt;"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("x=\"110\""));
        assert!(svg.contains("dy=\"24\""));
    }

    #[test]
    fn test_image_element_and_background() {
        let doc = CardDocument::default()
            .with_background(Background::image("/uploads/bg.png"))
            .with_elements(vec![CardElement::new(
                ElementKind::Image,
                "/uploads/a.png",
                ElementStyle::placed(Point::new(5.0, 6.0), Size::new(30.0, 40.0)),
            )]);
        let svg = render(&doc);
        assert!(svg.contains("href=\"/uploads/bg.png\""));
        assert!(svg.contains("<image href=\"/uploads/a.png\" x=\"5\" y=\"6\" width=\"30\" height=\"40\""));
    }

    #[test]
    fn test_gradient_from_css_value() {
        assert_eq!(
            gradient_stops("linear-gradient(135deg, #10B981, #059669)", None, None),
            ("#10B981".to_string(), "#059669".to_string())
        );
        assert_eq!(
            gradient_stops("linear-gradient(135deg, #10B981, #059669)", Some("#000"), Some("#111")),
            ("#10B981".to_string(), "#059669".to_string())
        );
        assert_eq!(
            gradient_stops("", Some("#000"), Some("#111")),
            ("#000".to_string(), "#111".to_string())
        );
    }

    #[test]
    fn test_solid_renders_value_over_color_hint() {
        let mut background = Background::solid("#ffffff");
        background.color = Some("#000000".to_string());
        let svg = render(&CardDocument::default().with_background(background));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(!svg.contains("#000000"));
    }

    #[test]
    fn test_overlays() {
        let doc = CardDocument::new(Dimensions::new(20, 10)).with_background(Background::solid("#fff"));
        let guides = [LayoutGuide {
            line: Line::new((10.0, 0.0), (10.0, 10.0)),
            style: GuideStyle::Center,
        }];
        let ctx = RenderContext::new(&doc).with_grid(10.0).with_guides(&guides).with_scale(2.0);
        let svg = SvgRenderer::new().render_to_string(&ctx).unwrap();
        assert!(svg.contains("width=\"40\" height=\"20\""));
        assert!(svg.contains("stroke=\"#10B981\""));
        // 3 vertical + 2 horizontal grid lines, plus the guide
        assert_eq!(svg.matches("<line").count(), 6);
    }

    #[test]
    fn test_invalid_dimensions() {
        let doc = CardDocument::new(Dimensions::new(0, 100));
        let result = SvgRenderer::new().render(&doc);
        assert!(matches!(result, Err(RenderError::InvalidDocument(_))));
        assert_eq!(SvgRenderer::new().content_type(), "image/svg+xml");
    }
}
