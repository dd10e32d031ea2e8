//! SVG output encoder.
//!
//! Vector output for breakdown bars and legends, plus raster embedding of a
//! framebuffer as a base64 PNG data URI.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder accumulating elements for rendering.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
    },
    /// Text; `bold` renders with `font-weight="bold"`
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        bold: bool,
    },
    /// Embedded raster image (base64 PNG)
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: String,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 200)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Create from a framebuffer (embeds as raster image).
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        let mut encoder = Self::new(fb.width(), fb.height());
        encoder.background = None; // Image provides background

        let png_bytes = super::PngEncoder::to_bytes(fb)?;
        let base64_data = STANDARD.encode(&png_bytes);
        let data_uri = format!("data:image/png;base64,{base64_data}");

        encoder.elements.push(SvgElement::Image {
            x: 0.0,
            y: 0.0,
            width: fb.width() as f32,
            height: fb.height() as f32,
            data: data_uri,
        });

        Ok(encoder)
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
        self
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(mut self, cx: f32, cy: f32, r: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Circle { cx, cy, r, fill });
        self
    }

    /// Add text.
    #[must_use]
    pub fn text(mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Start,
            bold: false,
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            bold: false,
        });
        self
    }

    /// Add bold text with anchor.
    #[must_use]
    pub fn strong_text(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            bold: true,
        });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                rgba_to_css(bg)
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Convert RGBA to CSS color string.
fn rgba_to_css(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
                rgba_to_css(*fill)
            )
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
                rgba_to_css(*fill)
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            bold,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight_attr = if *bold { r#" font-weight="bold""# } else { "" };
            // Escape XML special characters
            let escaped_text = text
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;");
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}"{weight_attr} font-family="sans-serif">{escaped_text}</text>"#,
                rgba_to_css(*fill)
            )
        }
        SvgElement::Image {
            x,
            y,
            width,
            height,
            data,
        } => {
            format!(
                r#"<image x="{x}" y="{y}" width="{width}" height="{height}" xlink:href="{data}"/>"#
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 200).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"200\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg = SvgEncoder::new(100, 100)
            .rect(10.0, 20.0, 30.0, 40.0, Rgba::RED)
            .render();

        assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"30\" height=\"40\""));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_svg_circle() {
        let svg = SvgEncoder::new(100, 100)
            .circle(50.0, 50.0, 5.5, Rgba::BLUE)
            .render();

        assert!(svg.contains("<circle cx=\"50\" cy=\"50\" r=\"5.5\""));
        assert!(svg.contains("rgb(0,0,255)"));
    }

    #[test]
    fn test_svg_text() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "Salaire net", 12.0, Rgba::BLACK)
            .render();

        assert!(svg.contains("<text"));
        assert!(svg.contains("Salaire net"));
        assert!(svg.contains("font-size=\"12\""));
        assert!(!svg.contains("font-weight"));
    }

    #[test]
    fn test_svg_strong_text() {
        let svg = SvgEncoder::new(100, 100)
            .strong_text(90.0, 50.0, "60 %", 12.0, Rgba::BLACK, TextAnchor::End)
            .render();

        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains("60 %"));
    }

    #[test]
    fn test_svg_text_anchored_middle() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(50.0, 50.0, "Centered", 12.0, Rgba::BLACK, TextAnchor::Middle)
            .render();

        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "R&D <budget>", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<budget>"));
        assert!(svg.contains("R&amp;D &lt;budget&gt;"));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();

        let rect_count = svg.matches("<rect").count();
        assert_eq!(rect_count, 0);
    }

    #[test]
    fn test_svg_rgba_alpha() {
        let css = rgba_to_css(Rgba::new(255, 0, 0, 128));
        assert!(css.contains("rgba"));
        assert!(css.contains("0.502")); // 128/255
    }

    #[test]
    fn test_svg_from_framebuffer() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::RED);

        let svg = SvgEncoder::from_framebuffer(&fb).unwrap().render();

        assert!(svg.contains("<image"));
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_svg_add_element() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 10.0,
            fill: Rgba::RED,
        });
        assert!(encoder.render().contains("<circle"));
    }

    #[test]
    fn test_svg_write_to_file() {
        let encoder = SvgEncoder::new(100, 100).rect(10.0, 10.0, 80.0, 80.0, Rgba::BLUE);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        encoder.write_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }
}
