use trsheet_core::error::TrSheetError;
use trsheet_core::export::write_workbook;
use trsheet_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::commands::rules::active_ruleset;
use crate::output;

pub struct ProcessArgs {
    pub input_file: PathBuf,
    pub output_format: String,
    /// Spreadsheet destination; `None` skips the export.
    pub out: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub layout: bool,
}

pub fn run(args: ProcessArgs) -> Result<(), TrSheetError> {
    // Rules are checked before any PDF work so a bad file fails fast.
    let rules = active_ruleset(args.rules.as_deref())?;
    PdftotextExtractor::ensure_available()?;

    let pdf_bytes = std::fs::read(&args.input_file)?;
    let extractor = if args.layout {
        PdftotextExtractor::new()
    } else {
        PdftotextExtractor::without_layout()
    };
    let report = trsheet_core::process_pdf(&pdf_bytes, &extractor, &rules)?;

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report),
    }

    if let Some(path) = args.out {
        let workbook = write_workbook(&report)?;
        std::fs::write(&path, workbook)?;
        eprintln!(
            "Processed {} test request(s), {} row(s) written to {}",
            report.requests.len(),
            report.details.len(),
            path.display()
        );
    }

    if !report.skipped_pages.is_empty() {
        eprintln!(
            "  {} page(s) without a TR number skipped",
            report.skipped_pages.len()
        );
    }

    Ok(())
}
