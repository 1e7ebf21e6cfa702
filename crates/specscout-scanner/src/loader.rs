//! PDF text loading

use specscout_domain::{DocumentTextLoader, FileProcessingError};
use std::path::Path;
use tracing::debug;

/// [`DocumentTextLoader`] backed by `pdf-extract`
///
/// Returns one string per page, in page order. Decoding is CPU-bound and
/// blocking; callers run it on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextLoader;

impl PdfTextLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self
    }
}

impl DocumentTextLoader for PdfTextLoader {
    fn load(&self, path: &Path) -> Result<Vec<String>, FileProcessingError> {
        let bytes = std::fs::read(path).map_err(|e| FileProcessingError::new(path, e.to_string()))?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| FileProcessingError::new(path, format!("PDF decoding failed: {}", e)))?;
        debug!("Loaded {} page(s) from {}", pages.len(), path.display());
        Ok(pages)
    }
}

/// Join pages in order, each followed by a newline
pub fn aggregate_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}
