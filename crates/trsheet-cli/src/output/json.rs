use trsheet_core::error::TrSheetError;
use trsheet_core::model::Report;

pub fn print(report: &Report) -> Result<(), TrSheetError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
