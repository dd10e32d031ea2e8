//! Terminal output for breakdown bars (ASCII/ANSI).
//!
//! Renders a built stacked bar as text. Two modes:
//! - ANSI: 24-bit background colors, one colored run per segment
//! - ASCII: a distinct fill character per segment, reused as the legend key
//!
//! Character cells are apportioned across segments with the same
//! largest-remainder allocation that backs the percentages, so the printed
//! bar is always exactly as wide as requested.

use crate::color::Rgba;
use crate::plots::BuiltStackedBar;
use std::fmt::Write as FmtWrite;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// Plain ASCII fill characters (widest compatibility)
    Ascii,
    /// ANSI 24-bit background colors
    #[default]
    AnsiTrueColor,
}

/// Terminal bar renderer configuration.
#[derive(Debug, Clone)]
pub struct TerminalBar {
    mode: TerminalMode,
    width: u32,
    legend: bool,
}

impl Default for TerminalBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBar {
    /// Fill characters cycled across segments in ASCII mode.
    const FILL_CHARS: &'static [char] = &['#', '=', '+', '*', ':', '%', '@', '~'];

    /// Create a renderer with default settings (ANSI, 60 cells, legend on).
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TerminalMode::default(),
            width: 60,
            legend: true,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the bar width in character cells.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    /// Enable or disable the legend lines below the bar.
    #[must_use]
    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Render a built stacked bar to a string.
    #[must_use]
    pub fn render(&self, bar: &BuiltStackedBar) -> String {
        let spans = bar.shares(self.width);
        let mut output = String::with_capacity(self.width as usize * 4);

        for (index, &span) in spans.iter().enumerate() {
            if span == 0 {
                continue;
            }
            match self.mode {
                TerminalMode::AnsiTrueColor => {
                    let color = bar.colors()[index];
                    let _ = write!(
                        output,
                        "\x1b[48;2;{};{};{}m{}",
                        color.r,
                        color.g,
                        color.b,
                        " ".repeat(span as usize)
                    );
                }
                TerminalMode::Ascii => {
                    let fill = Self::fill_char(index);
                    output.extend(std::iter::repeat(fill).take(span as usize));
                }
            }
        }
        if self.mode == TerminalMode::AnsiTrueColor {
            output.push_str("\x1b[0m");
        }
        output.push('\n');

        if self.legend {
            for (index, segment) in bar.segments().iter().enumerate() {
                let percentage = bar.percentages()[index];
                match self.mode {
                    TerminalMode::AnsiTrueColor => {
                        let color = bar.colors()[index];
                        let _ = writeln!(
                            output,
                            "{} {}  {percentage} %",
                            ansi_dot(color),
                            segment.label
                        );
                    }
                    TerminalMode::Ascii => {
                        let _ = writeln!(
                            output,
                            "[{}] {}  {percentage} %",
                            Self::fill_char(index),
                            segment.label
                        );
                    }
                }
            }
        }

        output
    }

    fn fill_char(index: usize) -> char {
        Self::FILL_CHARS[index % Self::FILL_CHARS.len()]
    }
}

/// A colored legend dot with reset.
fn ansi_dot(color: Rgba) -> String {
    format!("\x1b[38;2;{};{};{}m\u{25cf}\x1b[0m", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::StackedBarChart;

    fn sample_bar() -> BuiltStackedBar {
        StackedBarChart::new()
            .segment("cotisations", 30.0)
            .segment("impôts", 10.0)
            .segment("net", 60.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_ascii_bar_width_is_exact() {
        let text = TerminalBar::new()
            .mode(TerminalMode::Ascii)
            .width(40)
            .legend(false)
            .render(&sample_bar());

        let bar_line = text.lines().next().unwrap();
        assert_eq!(bar_line.chars().count(), 40);
    }

    #[test]
    fn test_ascii_segments_use_distinct_fills() {
        let text = TerminalBar::new()
            .mode(TerminalMode::Ascii)
            .width(10)
            .legend(false)
            .render(&sample_bar());

        let bar_line = text.lines().next().unwrap();
        // 30/10/60 over 10 cells: 3 + 1 + 6.
        assert_eq!(bar_line, "###=++++++");
    }

    #[test]
    fn test_ansi_bar_contains_escapes() {
        let text = TerminalBar::new().width(20).legend(false).render(&sample_bar());

        assert!(text.contains("\x1b[48;2;"));
        assert!(text.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_legend_reports_percentages() {
        let text = TerminalBar::new()
            .mode(TerminalMode::Ascii)
            .width(40)
            .render(&sample_bar());

        assert!(text.contains("[#] cotisations  30 %"));
        assert!(text.contains("[=] impôts  10 %"));
        assert!(text.contains("[+] net  60 %"));
    }

    #[test]
    fn test_ansi_legend_dots() {
        let text = TerminalBar::new().width(20).render(&sample_bar());

        assert!(text.contains('\u{25cf}'));
        assert!(text.contains("net  60 %"));
    }

    #[test]
    fn test_zero_width_clamps_to_one() {
        let text = TerminalBar::new()
            .mode(TerminalMode::Ascii)
            .width(0)
            .legend(false)
            .render(&sample_bar());

        assert_eq!(text.lines().next().unwrap().chars().count(), 1);
    }

    #[test]
    fn test_narrow_bar_drops_small_segments() {
        // One cell: the whole bar collapses onto a single segment.
        let text = TerminalBar::new()
            .mode(TerminalMode::Ascii)
            .width(1)
            .legend(false)
            .render(&sample_bar());

        assert_eq!(text, "+\n");
    }
}
