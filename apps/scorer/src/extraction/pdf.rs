use std::panic;
use std::path::Path;

use tracing::{debug, warn};

use super::ExtractionError;

/// Extracts PDF text with pdf-extract, falling back to lopdf when that errors or finds nothing.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    match extract_with_pdf_extract(path) {
        Ok(text) if !text.trim().is_empty() => return Ok(text),
        Ok(_) => debug!("pdf-extract found no text in {}", path.display()),
        Err(e) => debug!("pdf-extract failed on {}: {e}", path.display()),
    }

    extract_with_lopdf(path).map_err(|e| {
        warn!("Error reading PDF {}: {e}", path.display());
        e
    })
}

fn extract_with_pdf_extract(path: &Path) -> Result<String, ExtractionError> {
    let owned = path.to_path_buf();
    // pdf-extract panics on some malformed fonts and encodings
    panic::catch_unwind(move || pdf_extract::extract_text(&owned))
        .map_err(|_| ExtractionError::Pdf("pdf-extract panicked".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_with_lopdf(path: &Path) -> Result<String, ExtractionError> {
    let doc = lopdf::Document::load(path).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => warn!(
                "Failed to extract text from page {} of {}: {e}",
                page_num,
                path.display()
            ),
        }
    }
    Ok(text)
}
