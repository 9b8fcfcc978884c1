//! Typed errors for the analysis core and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Numeric failure inside a single analysis pass.
///
/// Precondition misses (no buffer, short buffer, position out of range) are
/// not errors; the analyzer reports those as "no frame".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("non-finite sample at window offset {offset} (window start {start})")]
    NonFiniteSample { start: usize, offset: usize },

    #[error("spectrum produced a non-finite magnitude")]
    NonFiniteSpectrum,
}

/// Configuration loading and validation failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}
