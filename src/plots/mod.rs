//! High-level chart types.

mod stacked_bar;

pub use stacked_bar::{BuiltStackedBar, Segment, StackedBarChart};
