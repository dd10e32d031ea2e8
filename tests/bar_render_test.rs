//! Pixel-level verification of stacked bar rendering.
//!
//! Renders small bars and checks the actual pixel runs against the
//! apportioned segment widths, so layout bugs can't hide behind a
//! successfully returned framebuffer.

#![allow(clippy::unwrap_used)]

use partviz::prelude::*;

/// Collect (color, run length) pairs along a horizontal scanline.
fn scan_runs(fb: &Framebuffer, y: u32, x_start: u32, x_end: u32) -> Vec<(Rgba, u32)> {
    let mut runs: Vec<(Rgba, u32)> = Vec::new();
    for x in x_start..x_end {
        let color = fb.get_pixel(x, y).unwrap();
        match runs.last_mut() {
            Some((run_color, len)) if *run_color == color => *len += 1,
            _ => runs.push((color, 1)),
        }
    }
    runs
}

#[test]
fn segment_runs_match_apportioned_widths() {
    // 100 drawable columns and no separators: pixel widths equal the
    // percentage shares exactly.
    let bar = StackedBarChart::new()
        .segment_colored("a", 60.0, Rgba::RED)
        .segment_colored("b", 30.0, Rgba::GREEN)
        .segment_colored("c", 10.0, Rgba::BLUE)
        .dimensions(120, 60)
        .margin(10)
        .separator(0)
        .build()
        .unwrap();

    let fb = bar.to_framebuffer().unwrap();
    let runs = scan_runs(&fb, 12, 10, 110);

    assert_eq!(
        runs,
        vec![(Rgba::RED, 60), (Rgba::GREEN, 30), (Rgba::BLUE, 10)],
        "pixel runs must reproduce the percentage shares"
    );
}

#[test]
fn separators_show_background_between_segments_only() {
    let bar = StackedBarChart::new()
        .segment_colored("a", 1.0, Rgba::RED)
        .segment_colored("b", 1.0, Rgba::BLUE)
        .dimensions(120, 60)
        .margin(10)
        .separator(2)
        .build()
        .unwrap();

    let fb = bar.to_framebuffer().unwrap();
    let runs = scan_runs(&fb, 12, 10, 110);

    // red run, 2px background gap, blue run - and nothing after the last
    // segment, so exactly three runs inside the plot area.
    assert_eq!(runs.len(), 3, "unexpected runs: {runs:?}");
    assert_eq!(runs[0].0, Rgba::RED);
    assert_eq!(runs[1], (Rgba::WHITE, 2));
    assert_eq!(runs[2].0, Rgba::BLUE);
}

#[test]
fn colored_columns_sum_to_drawable_width() {
    let bar = StackedBarChart::new()
        .segment_colored("a", 3.1, Rgba::RED)
        .segment_colored("b", 1.7, Rgba::GREEN)
        .segment_colored("c", 2.9, Rgba::BLUE)
        .segment_colored("d", 0.3, Rgba::BLACK)
        .dimensions(200, 80)
        .margin(20)
        .separator(2)
        .build()
        .unwrap();

    let fb = bar.to_framebuffer().unwrap();
    let colored = (20..180)
        .filter(|&x| fb.get_pixel(x, 25).unwrap() != Rgba::WHITE)
        .count();

    // plot width 160, three 2px separators: 154 columns of segments.
    assert_eq!(colored, 154, "segment columns must absorb every spare pixel");
}

#[test]
fn bar_is_confined_to_plot_area() {
    let bar = StackedBarChart::new()
        .segment_colored("a", 1.0, Rgba::RED)
        .dimensions(100, 50)
        .margin(10)
        .build()
        .unwrap();

    let fb = bar.to_framebuffer().unwrap();

    // Margins stay background-colored.
    assert_eq!(fb.get_pixel(5, 12), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(95, 12), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(50, 5), Some(Rgba::WHITE));
    // Bar starts at the plot origin.
    assert_eq!(fb.get_pixel(10, 10), Some(Rgba::RED));
}

#[test]
fn svg_legend_percentages_sum_to_100() {
    let svg = StackedBarChart::new()
        .segment("a", 1.0)
        .segment("b", 1.0)
        .segment("c", 1.0)
        .build()
        .unwrap()
        .to_svg()
        .unwrap()
        .render();

    assert!(svg.contains("34 %"));
    assert_eq!(svg.matches("33 %").count(), 2);
}

#[test]
fn terminal_and_raster_share_the_same_allocation() {
    let bar = StackedBarChart::new()
        .segment("a", 5.0)
        .segment("b", 3.0)
        .segment("c", 2.0)
        .build()
        .unwrap();

    // The renderers split different unit counts, but both go through the
    // same allocator, so totals are always exact.
    for units in [10, 37, 60, 640] {
        assert_eq!(bar.shares(units).iter().sum::<u32>(), units);
    }

    let text = TerminalBar::new()
        .mode(TerminalMode::Ascii)
        .width(37)
        .legend(false)
        .render(&bar);
    assert_eq!(text.lines().next().unwrap().chars().count(), 37);
}
