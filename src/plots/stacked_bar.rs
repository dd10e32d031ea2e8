//! Horizontal stacked bar chart for proportional breakdowns.
//!
//! Shows how labelled magnitudes split a whole. Segment widths and legend
//! percentages come from the same largest-remainder allocation, so the bar
//! and the printed numbers always agree and always total 100.

use crate::apportion::{largest_remainder, rounded_percentages};
use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{PngEncoder, SvgEncoder, TextAnchor};
use std::path::Path;

/// A labelled magnitude in the breakdown.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Legend label.
    pub label: String,
    /// Non-negative magnitude.
    pub value: f64,
    /// Explicit color; palette-assigned when `None`.
    pub color: Option<Rgba>,
}

/// Builder for stacked bar charts.
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    segments: Vec<Segment>,
    width: u32,
    height: u32,
    margin: u32,
    bar_height: u32,
    separator: u32,
    background: Rgba,
    palette: Palette,
    show_legend: bool,
}

impl Default for StackedBarChart {
    fn default() -> Self {
        Self::new()
    }
}

impl StackedBarChart {
    /// Create a new stacked bar chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            width: 800,
            height: 200,
            margin: 40,
            bar_height: 26,
            separator: 2,
            background: Rgba::WHITE,
            palette: Palette::default(),
            show_legend: true,
        }
    }

    /// Add a segment with a palette-assigned color.
    #[must_use]
    pub fn segment(mut self, label: impl Into<String>, value: f64) -> Self {
        self.segments.push(Segment {
            label: label.into(),
            value,
            color: None,
        });
        self
    }

    /// Add a segment with an explicit color.
    #[must_use]
    pub fn segment_colored(mut self, label: impl Into<String>, value: f64, color: Rgba) -> Self {
        self.segments.push(Segment {
            label: label.into(),
            value,
            color: Some(color),
        });
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin around the plot area.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the bar height in pixels.
    #[must_use]
    pub fn bar_height(mut self, bar_height: u32) -> Self {
        self.bar_height = bar_height.max(1);
        self
    }

    /// Set the separator width between segments (background shows through).
    #[must_use]
    pub fn separator(mut self, separator: u32) -> Self {
        self.separator = separator;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Set the palette used for segments without explicit colors.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Show or hide the legend (SVG and terminal outputs).
    #[must_use]
    pub fn show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Validate the chart and precompute its percentage shares.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no segments, a magnitude is negative or
    /// non-finite, the magnitudes sum to zero, or the dimensions leave no
    /// drawable plot area.
    pub fn build(self) -> Result<BuiltStackedBar> {
        let values: Vec<f64> = self.segments.iter().map(|s| s.value).collect();
        let percentages = rounded_percentages(&values)?;

        let plot = Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
            .inset(self.margin as f32);
        if self.width == 0 || self.height == 0 || plot.width < 1.0 || plot.height < 1.0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let colors = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, s)| s.color.unwrap_or_else(|| self.palette.color_for(i)))
            .collect();
        let total = values.iter().sum();

        Ok(BuiltStackedBar {
            segments: self.segments,
            values,
            total,
            percentages,
            colors,
            width: self.width,
            height: self.height,
            margin: self.margin,
            bar_height: self.bar_height,
            separator: self.separator,
            background: self.background,
            show_legend: self.show_legend,
        })
    }
}

/// A validated stacked bar chart with precomputed shares.
#[derive(Debug, Clone)]
pub struct BuiltStackedBar {
    segments: Vec<Segment>,
    values: Vec<f64>,
    total: f64,
    percentages: Vec<u32>,
    colors: Vec<Rgba>,
    width: u32,
    height: u32,
    margin: u32,
    bar_height: u32,
    separator: u32,
    background: Rgba,
    show_legend: bool,
}

impl BuiltStackedBar {
    /// Integer percentages per segment, summing to exactly 100.
    #[must_use]
    pub fn percentages(&self) -> &[u32] {
        &self.percentages
    }

    /// The segments in input order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolved color per segment.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Apportion `units` across the segments.
    ///
    /// Used by the raster and terminal renderers to split pixel columns and
    /// character cells so the drawn widths sum exactly to the target.
    #[must_use]
    pub fn shares(&self, units: u32) -> Vec<u32> {
        largest_remainder(&self.values, self.total, units)
    }

    /// The plot area inside the margins.
    fn plot_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32).inset(self.margin as f32)
    }

    /// Pixel columns available to segments once separators are taken out.
    fn drawable_columns(&self, plot_width: u32) -> Result<u32> {
        let separators = self.separator.saturating_mul(self.segments.len() as u32 - 1);
        let drawable = plot_width.saturating_sub(separators);
        if drawable == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(drawable)
    }

    /// Render to a new framebuffer.
    ///
    /// The raster output is the bar alone; labels and percentages are
    /// available in the SVG and terminal outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the separators leave no drawable columns.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);

        let plot = self.plot_area();
        let drawable = self.drawable_columns(plot.width as u32)?;
        let widths = self.shares(drawable);

        let bar_y = plot.y as u32;
        let bar_h = self.bar_height.min(plot.height as u32);
        let mut x = plot.x as u32;
        for (width, color) in widths.iter().zip(&self.colors) {
            fb.fill_rect(x, bar_y, *width, bar_h, *color);
            // Background shows through the separator gap, none after the
            // last segment.
            x += width + self.separator;
        }

        Ok(fb)
    }

    /// Render to an SVG encoder.
    ///
    /// Segment widths are percentage-proportional, so the vector output
    /// scales with the integer shares the legend reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the separators leave no drawable columns.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let plot = self.plot_area();
        let drawable = self.drawable_columns(plot.width as u32)? as f32;

        let mut encoder =
            SvgEncoder::new(self.width, self.height).background(Some(self.background));

        let bar_h = (self.bar_height as f32).min(plot.height);
        let mut x = plot.x;
        for (index, &percentage) in self.percentages.iter().enumerate() {
            let width = drawable * percentage as f32 / 100.0;
            encoder = encoder.rect(x, plot.y, width, bar_h, self.colors[index]);
            x += width + self.separator as f32;
        }

        if self.show_legend {
            let entry_width = plot.width / self.segments.len() as f32;
            let legend_y = plot.y + bar_h + 24.0;
            for (index, segment) in self.segments.iter().enumerate() {
                let entry_x = plot.x + entry_width * index as f32;
                encoder = encoder
                    .circle(entry_x + 6.0, legend_y, 5.5, self.colors[index])
                    .text(
                        entry_x + 18.0,
                        legend_y + 4.0,
                        &segment.label,
                        13.0,
                        Rgba::rgb(85, 85, 85),
                    )
                    .strong_text(
                        entry_x + entry_width - 8.0,
                        legend_y + 4.0,
                        &format!("{} %", self.percentages[index]),
                        13.0,
                        Rgba::rgb(17, 17, 17),
                        TextAnchor::End,
                    );
            }
        }

        Ok(encoder)
    }

    /// Render and write a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or file writing fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer()?, path)
    }

    /// Render and write an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or file writing fails.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_svg()?.write_to_file(path)
    }
}
