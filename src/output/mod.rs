//! Output encoders (PNG, SVG, terminal).

mod png_encoder;
mod svg;
mod terminal;

pub use png_encoder::PngEncoder;
pub use svg::{SvgElement, SvgEncoder, TextAnchor};
pub use terminal::{TerminalBar, TerminalMode};
