use crate::error::TrSheetError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// With `layout` enabled (the default) pdftotext keeps cells that share a
/// visual line on one text line, which is what the request field patterns
/// rely on.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: true }
    }

    /// Use pdftotext's reading-order mode instead of `-layout`.
    pub fn without_layout() -> Self {
        PdftotextExtractor { layout: false }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    /// Fail with `PdftotextNotFound` before any work when the binary is missing.
    pub fn ensure_available() -> Result<(), TrSheetError> {
        if Self::is_available() {
            Ok(())
        } else {
            Err(TrSheetError::PdftotextNotFound)
        }
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TrSheetError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| TrSheetError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| TrSheetError::Extraction(e.to_string()))?;

        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TrSheetError::PdftotextNotFound
                } else {
                    TrSheetError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(TrSheetError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&text);
        log::debug!(
            "{} extracted {} page(s) from {} byte(s)",
            self.backend_name(),
            pages.len(),
            pdf_bytes.len()
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages on the form feed separator.
///
/// pdftotext terminates every page with `\x0c`, so the segment after the last
/// separator is empty and is not a page. Blank pages in the middle are kept so
/// page numbers stay aligned with the document.
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .collect()
}
