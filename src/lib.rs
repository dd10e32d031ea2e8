//! # Partviz
//!
//! Exact integer apportionment and proportional breakdown charts.
//!
//! The core is the [`apportion`] module: a largest-remainder allocator that
//! turns non-negative magnitudes into integer shares summing exactly to a
//! target unit count — 100 for percentage legends, a pixel or cell width for
//! layout. On top of it, [`plots::StackedBarChart`] renders a labelled
//! breakdown as a horizontal stacked bar with a legend, to PNG, SVG, or a
//! terminal string.
//!
//! ## Quick Start
//!
//! ```rust
//! use partviz::prelude::*;
//!
//! let bar = StackedBarChart::new()
//!     .segment("cotisations", 30.0)
//!     .segment("impôts", 10.0)
//!     .segment("net", 60.0)
//!     .build()?;
//!
//! // Percentages always total exactly 100.
//! assert_eq!(bar.percentages(), &[30, 10, 60]);
//!
//! let svg = bar.to_svg()?.render();
//! let text = TerminalBar::new().render(&bar);
//! # Ok::<(), partviz::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Core Modules
// ============================================================================

/// Largest-remainder integer apportionment.
pub mod apportion;

/// Color types and segment palettes.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives for chart layout.
pub mod geometry;

// ============================================================================
// Visualization Modules
// ============================================================================

/// High-level chart types.
pub mod plots;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for partviz operations.
pub mod error;

pub use apportion::{apportion, rounded_percentages};
pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use partviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::apportion::{apportion, rounded_percentages};
    pub use crate::color::{Hsla, Palette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::Rect;
    pub use crate::output::{PngEncoder, SvgEncoder, TerminalBar, TerminalMode, TextAnchor};
    pub use crate::plots::{BuiltStackedBar, Segment, StackedBarChart};
}
