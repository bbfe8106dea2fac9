use crate::model::{Count, DetailRow, SummaryRow, TestRequest};
use std::collections::BTreeMap;

/// Flatten test requests into "All tests" rows.
///
/// Each method line becomes a row. A request without method lines still gets
/// a single row with an empty method and a `NotUsed` count.
pub fn build_detail_rows(requests: &[TestRequest]) -> Vec<DetailRow> {
    let mut rows = Vec::new();

    for request in requests {
        let row = |method: &str, count: Count| DetailRow {
            request_id: request.id.clone(),
            requested_date: request.requested_date,
            method: method.to_string(),
            count,
            lot_number: request.lot_number.clone(),
            lot_type: request.lot_type().to_string(),
        };

        if request.methods.is_empty() {
            rows.push(row("", Count::NotUsed));
        } else {
            for m in &request.methods {
                rows.push(row(&m.method, Count::Tests(m.count)));
            }
        }
    }

    rows
}

/// Total tests per method, largest first.
///
/// Groups are formed in method-name order and then stably sorted by total, so
/// equal totals keep name order. `NotUsed` rows form their own group under the
/// empty method name and contribute nothing to its total.
pub fn build_summary(rows: &[DetailRow]) -> Vec<SummaryRow> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        let total = totals.entry(row.method.as_str()).or_insert(0);
        if let Some(n) = row.count.tests() {
            *total += u64::from(n);
        }
    }

    let mut summary: Vec<SummaryRow> = totals
        .into_iter()
        .map(|(method, total)| SummaryRow {
            method: method.to_string(),
            total,
        })
        .collect();
    summary.sort_by(|a, b| b.total.cmp(&a.total));
    summary
}
