use trsheet_core::export::{DETAIL_HEADERS, SUMMARY_HEADERS};
use trsheet_core::model::Report;

pub fn print(report: &Report) {
    print!("{}", format_report(report));
}

/// Preview of both sheets as aligned text columns.
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();

    if report.details.is_empty() {
        out.push_str("No test requests found.\n");
        return out;
    }

    let detail: Vec<Vec<String>> = report
        .details
        .iter()
        .map(|row| {
            vec![
                row.request_id.clone(),
                row.requested_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                row.method.clone(),
                row.count.to_string(),
                row.lot_number.clone(),
                row.lot_type.clone(),
            ]
        })
        .collect();
    out.push_str("=== All tests ===\n\n");
    push_table(&mut out, &DETAIL_HEADERS, &detail);

    let summary: Vec<Vec<String>> = report
        .summary
        .iter()
        .map(|row| vec![row.method.clone(), row.total.to_string()])
        .collect();
    out.push_str("\n=== Tests summary ===\n\n");
    push_table(&mut out, &SUMMARY_HEADERS, &summary);

    out
}

fn push_table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = w))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    out.push_str(&line(headers.to_vec()));
    out.push_str(&format!(
        "  {}\n",
        "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
    ));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
}
