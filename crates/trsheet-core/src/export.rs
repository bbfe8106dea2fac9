use crate::error::TrSheetError;
use crate::model::{Count, DetailRow, Report, SummaryRow};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

pub const DETAIL_SHEET: &str = "All tests";
pub const SUMMARY_SHEET: &str = "Tests summary";

/// Suggested file name for the exported workbook.
pub const EXPORT_FILE_NAME: &str = "processed_test_requests.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const DETAIL_HEADERS: [&str; 6] = [
    "TR",
    "When Req'd (date)",
    "Test method",
    "No. tests",
    "Lot no.",
    "Lot Type",
];
pub const SUMMARY_HEADERS: [&str; 2] = ["Test method", "No. tests"];

const DATE_FORMAT: &str = "yyyy-mm-dd";
const EXCEL_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Blank,
}

impl Cell {
    /// The value as it reads in the sheet, used for column sizing.
    fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Blank => String::new(),
        }
    }
}

/// Render the report as an xlsx workbook with the detail and summary sheets.
pub fn write_workbook(report: &Report) -> Result<Vec<u8>, TrSheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let detail = detail_cells(&report.details);
    let sheet = workbook.add_worksheet().set_name(DETAIL_SHEET)?;
    write_sheet(sheet, &DETAIL_HEADERS, &detail, &header_format, &date_format)?;

    let summary = summary_cells(&report.summary);
    let sheet = workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
    write_sheet(sheet, &SUMMARY_HEADERS, &summary, &header_format, &date_format)?;

    let buffer = workbook.save_to_buffer()?;
    log::info!(
        "wrote workbook: {} detail row(s), {} summary row(s), {} byte(s)",
        report.details.len(),
        report.summary.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn detail_cells(rows: &[DetailRow]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            vec![
                Cell::Text(row.request_id.clone()),
                row.requested_date.map(date_cell).unwrap_or(Cell::Blank),
                Cell::Text(row.method.clone()),
                match row.count {
                    Count::Tests(n) => Cell::Number(f64::from(n)),
                    Count::NotUsed => Cell::Text(Count::NotUsed.to_string()),
                },
                Cell::Text(row.lot_number.clone()),
                Cell::Text(row.lot_type.clone()),
            ]
        })
        .collect()
}

/// Excel has no serial dates outside 1900-9999; those are written as text.
fn date_cell(date: NaiveDate) -> Cell {
    if EXCEL_YEARS.contains(&date.year()) {
        Cell::Date(date)
    } else {
        Cell::Text(date.format("%Y-%m-%d").to_string())
    }
}

fn summary_cells(rows: &[SummaryRow]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            vec![
                Cell::Text(row.method.clone()),
                // Totals stay well inside f64's exact integer range.
                Cell::Number(row.total as f64),
            ]
        })
        .collect()
}

fn write_sheet(
    sheet: &mut Worksheet,
    headers: &[&str],
    rows: &[Vec<Cell>],
    header_format: &Format,
    date_format: &Format,
) -> Result<(), TrSheetError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r, c, s.as_str())?;
                }
                Cell::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                Cell::Date(d) => {
                    let date = ExcelDateTime::from_ymd(
                        d.year() as u16,
                        d.month() as u8,
                        d.day() as u8,
                    )?;
                    sheet.write_datetime_with_format(r, c, &date, date_format)?;
                }
                Cell::Blank => {}
            }
        }
    }

    for (col, width) in column_widths(headers, rows).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(())
}

/// Width per column: longest displayed value (header included) plus padding.
fn column_widths(headers: &[&str], rows: &[Vec<Cell>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.display().chars().count())
                .fold(header.chars().count(), usize::max);
            longest + COLUMN_PADDING
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_use_longest_value() {
        let rows = vec![
            vec![
                Cell::Text("1042".into()),
                Cell::Text("WA 210.1: Plasticity Index".into()),
            ],
            vec![Cell::Text("7".into()), Cell::Blank],
        ];
        assert_eq!(column_widths(&["TR", "Test method"], &rows), vec![6, 28]);
    }

    #[test]
    fn test_column_widths_header_only() {
        assert_eq!(column_widths(&SUMMARY_HEADERS, &[]), vec![13, 11]);
    }

    #[test]
    fn test_date_cell_display() {
        let cell = Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(cell.display(), "2024-03-05");
    }

    #[test]
    fn test_pre_1900_date_written_as_text() {
        let date = NaiveDate::from_ymd_opt(1899, 3, 5).unwrap();
        assert_eq!(date_cell(date), Cell::Text("1899-03-05".into()));
        let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        assert_eq!(date_cell(date), Cell::Date(date));
    }

    #[test]
    fn test_workbook_accepts_pre_1900_date() {
        let report = Report {
            requests: vec![],
            details: vec![DetailRow {
                request_id: "7".into(),
                requested_date: NaiveDate::from_ymd_opt(1899, 3, 5),
                method: "WA 210.1: Plasticity Index".into(),
                count: Count::Tests(1),
                lot_number: "EW-1".into(),
                lot_type: "EW".into(),
            }],
            summary: vec![SummaryRow {
                method: "WA 210.1: Plasticity Index".into(),
                total: 1,
            }],
            skipped_pages: vec![],
        };
        assert!(!write_workbook(&report).unwrap().is_empty());
    }

    #[test]
    fn test_not_used_written_as_text() {
        let rows = vec![DetailRow {
            request_id: "3".into(),
            requested_date: None,
            method: String::new(),
            count: Count::NotUsed,
            lot_number: String::new(),
            lot_type: String::new(),
        }];
        let cells = detail_cells(&rows);
        assert_eq!(cells[0][1], Cell::Blank);
        assert_eq!(cells[0][3], Cell::Text("not used".into()));
    }
}
