//! Frame extractor: uniform cell layout, centred aspect-correct crops, and a
//! single resample pass per cell to the fixed output resolution.
//!
//! The layout is validated before any pixel is touched; a gutter or trim that
//! leaves no room for a cell fails the whole extraction.

pub mod geometry;
pub mod options;
mod pipeline;
pub mod resample;

pub use geometry::{plan_cells, CellRect, CropRegion, PixelRect};
pub use options::{AspectRatio, ExtractOptions, GridConfig, OutputFormat, ResampleFilter};
pub use pipeline::FrameExtractor;
