//! Export configuration.

use std::path::PathBuf;

/// Default product name, used as the output file name prefix.
pub const DEFAULT_PRODUCT: &str = "eki-navigator";

/// Where and how export files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Output file name prefix.
    pub product: String,

    /// Directory receiving both output files.
    pub out_dir: PathBuf,

    /// Indent the JSON export (two spaces).
    pub pretty_json: bool,
}

impl ExportConfig {
    /// Config with every field given explicitly.
    pub fn new(product: impl Into<String>, out_dir: impl Into<PathBuf>, pretty_json: bool) -> Self {
        Self {
            product: product.into(),
            out_dir: out_dir.into(),
            pretty_json,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT.to_string(),
            out_dir: PathBuf::from("."),
            pretty_json: true,
        }
    }
}
