pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod table;

use error::TrSheetError;
use extraction::{PageContent, PdfExtractor};
use model::Report;
use parsing::ParsedRequests;
use rules::schema::RuleSet;

/// Main API entry point: turn a CivilPro test request PDF into a report.
///
/// Each page with a TR number becomes one test request; the detail and
/// summary tables are derived from those requests.
pub fn process_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    rules: &RuleSet,
) -> Result<Report, TrSheetError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    process_pages(&pages, rules)
}

/// Build a report from already extracted pages.
pub fn process_pages(pages: &[PageContent], rules: &RuleSet) -> Result<Report, TrSheetError> {
    let parsed = parsing::parse_requests(pages, rules)?;
    Ok(build_report(parsed))
}

/// Derive the detail and summary tables from parsed requests.
pub fn build_report(parsed: ParsedRequests) -> Report {
    let details = table::build_detail_rows(&parsed.requests);
    let summary = table::build_summary(&details);

    log::info!(
        "{} test request(s), {} page(s) skipped, {} detail row(s), {} method group(s)",
        parsed.requests.len(),
        parsed.skipped_pages.len(),
        details.len(),
        summary.len()
    );

    Report {
        requests: parsed.requests,
        details,
        summary,
        skipped_pages: parsed.skipped_pages,
    }
}
