// crates/snippet_extractor/src/processor/file_processor.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::extractor::{extract, ExtractionResult};
use crate::marker::MarkerSyntax;

/// Files larger than this are assumed not to be source files.
pub const MAX_FILE_SIZE: u64 = 1 << 20;

/// Trait that abstracts extracting regions from a file on disk.
pub trait FileProcessor {
    /// Returns `Ok(None)` when the file is skipped rather than processed.
    fn process_file(&self, file_path: &Path) -> Result<Option<ExtractionResult>>;
}

/// Reads the file, skips anything that does not look like source text, and
/// extracts its regions with the configured marker syntax.
pub struct DefaultFileProcessor {
    pub syntax: MarkerSyntax,
}

impl DefaultFileProcessor {
    pub fn new(syntax: MarkerSyntax) -> Self {
        Self { syntax }
    }
}

impl Default for DefaultFileProcessor {
    fn default() -> Self {
        Self::new(MarkerSyntax::default())
    }
}

impl FileProcessor for DefaultFileProcessor {
    fn process_file(&self, file_path: &Path) -> Result<Option<ExtractionResult>> {
        let metadata = fs::metadata(file_path)
            .with_context(|| format!("Error reading metadata of {}", file_path.display()))?;
        if metadata.len() > MAX_FILE_SIZE {
            log::debug!("skipping {}: larger than {} bytes", file_path.display(), MAX_FILE_SIZE);
            return Ok(None);
        }

        let bytes = fs::read(file_path)
            .with_context(|| format!("Error reading file {}", file_path.display()))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                log::debug!("skipping {}: not valid UTF-8", file_path.display());
                return Ok(None);
            }
        };

        let result = extract(&content, &self.syntax)
            .with_context(|| format!("Error extracting snippets from {}", file_path.display()))?;
        Ok(Some(result))
    }
}

/// Public API function to process a file using a provided `FileProcessor` implementation.
pub fn process_file_with_processor<P: AsRef<Path>>(
    processor: &dyn FileProcessor,
    file_path: P,
) -> Result<Option<ExtractionResult>> {
    processor.process_file(file_path.as_ref())
}
