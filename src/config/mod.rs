//! JSON runtime configuration for the demo binaries.

pub mod split;

pub use split::{load_config, OutputConfig, SplitConfig};
