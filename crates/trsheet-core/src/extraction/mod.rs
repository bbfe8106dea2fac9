pub mod pdftotext;

use crate::error::TrSheetError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    /// The page as one newline-joined block, the shape the field patterns expect.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the page carried no extractable text (e.g. a scanned image).
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TrSheetError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_lines() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["TR: 12".into(), "Lot No: EW-1".into()],
        };
        assert_eq!(page.text(), "TR: 12\nLot No: EW-1");
    }

    #[test]
    fn test_whitespace_only_page_is_blank() {
        let page = PageContent {
            page_number: 3,
            lines: vec!["".into(), "   ".into()],
        };
        assert!(page.is_blank());
    }
}
