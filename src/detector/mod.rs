//! Separator detector locating the gutters of a composite grid.
//!
//! Overview
//! - Places a search band of ±5 % of the axis length around every expected
//!   internal boundary (`width·k/cols`, `height·k/rows`).
//! - Reduces each column (vertical) or row (horizontal) inside the band to its
//!   mean brightness and keeps the darkest strip.
//! - Accepts the strip only when it is near black (< 25 on 0–255), then grows
//!   it outwards while neighbours stay below a threshold derived from the
//!   darkest value, capped at 15 strips per side.
//! - Reports the thinnest width per axis as the gutter and classifies the
//!   confidence from how many of the expected lines were found.
//!
//! Modules
//! - [`params`] – calibrated constants and layout.
//! - [`profile`] – strip brightness sampling.
//! - `separator` – band planning, darkest-strip search, thickness estimation.
//! - `pipeline` – the [`SeparatorDetector`] entry point.

pub mod params;
pub mod profile;
mod pipeline;
mod separator;

pub use params::DetectorParams;
pub use pipeline::SeparatorDetector;
pub use profile::Axis;
pub use separator::{find_separator, plan_bands, SearchBand};
