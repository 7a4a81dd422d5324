//! Diagnostics data model returned by the `*_with_diagnostics` entry points.
//!
//! `DetectionReport` carries one `SeparatorSearch` per scanned band (expected
//! position, band, darkest strip, local threshold, accepted line) next to the
//! compact result; `ExtractionReport` records the planned crops. Everything
//! serializes to camelCase JSON for the demo binaries.

pub mod extraction;
pub mod search;
pub mod timing;

pub use extraction::{AutoExtractReport, ExtractionReport};
pub use search::{DetectionReport, InputDescriptor, SeparatorSearch};
pub use timing::{StageTiming, TimingBreakdown};
