//! Block-structured writer for diagram files.

use std::fmt::Display;

/// Byte order mark prefixed to every file.
pub const BOM: char = '\u{feff}';

const LINE_END: &str = "\r\n";

/// Accumulates diagram file lines.
#[derive(Debug, Default)]
pub struct OudWriter {
    lines: Vec<String>,
    depth: usize,
}

impl OudWriter {
    /// Empty writer with no open blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block: `Name.`
    pub fn open(&mut self, block: &str) -> &mut Self {
        self.lines.push(format!("{block}."));
        self.depth += 1;
        self
    }

    /// Close the innermost block.
    pub fn close(&mut self) -> &mut Self {
        debug_assert!(self.depth > 0, "close without open");
        self.lines.push(".".to_string());
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Write a `key=value` line.
    pub fn entry(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.lines.push(format!("{key}={value}"));
        self
    }

    /// Render the file: BOM, then lines joined by CRLF.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 2).sum::<usize>() + 3);
        out.push(BOM);
        out.push_str(&self.lines.join(LINE_END));
        out
    }
}
