pub mod fields;
pub mod methods;

use crate::error::TrSheetError;
use crate::extraction::PageContent;
use crate::model::{LocationMethod, SkippedPage, TestRequest};
use crate::rules::package::collapse_packages;
use crate::rules::schema::RuleSet;
use fields::parse_fields;
use serde::Serialize;

/// Test requests parsed from a document, plus the pages that yielded none.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedRequests {
    pub requests: Vec<TestRequest>,
    pub skipped_pages: Vec<SkippedPage>,
}

/// Parse extracted pages into test requests, one per page with a TR number.
///
/// Pages without text or without a TR number are recorded as skipped. An
/// invalid requested date aborts the whole document.
pub fn parse_requests(
    pages: &[PageContent],
    rules: &RuleSet,
) -> Result<ParsedRequests, TrSheetError> {
    let mut parsed = ParsedRequests::default();

    for page in pages {
        if page.is_blank() {
            log::debug!("page {}: no extractable text", page.page_number);
            parsed.skipped_pages.push(SkippedPage {
                page_number: page.page_number,
                reason: "no extractable text".into(),
            });
            continue;
        }

        match parse_page(page, rules)? {
            Some(request) => parsed.requests.push(request),
            None => {
                log::debug!("page {}: no TR number", page.page_number);
                parsed.skipped_pages.push(SkippedPage {
                    page_number: page.page_number,
                    reason: "no TR number".into(),
                });
            }
        }
    }

    Ok(parsed)
}

/// Parse a single page into a test request.
fn parse_page(page: &PageContent, rules: &RuleSet) -> Result<Option<TestRequest>, TrSheetError> {
    let text = page.text();
    let Some(fields) = parse_fields(&text)? else {
        return Ok(None);
    };

    let location_method = match fields.location_flag.as_deref() {
        Some(flag) => {
            let method = LocationMethod::from_flag(flag);
            if method == LocationMethod::Unknown {
                log::warn!(
                    "TR {} (page {}): unrecognized location method '{}', no tests extracted",
                    fields.request_id,
                    page.page_number,
                    flag
                );
            }
            method
        }
        None => {
            log::debug!(
                "TR {} (page {}): no location method",
                fields.request_id,
                page.page_number
            );
            LocationMethod::Unknown
        }
    };

    let methods = location_method.extract_methods(&text, rules);
    let methods = collapse_packages(methods, &rules.package);
    log::debug!(
        "TR {} (page {}): {} method line(s), {}",
        fields.request_id,
        page.page_number,
        methods.len(),
        location_method
    );

    Ok(Some(TestRequest {
        id: fields.request_id,
        page_number: page.page_number,
        requested_date: fields.requested_date,
        lot_number: fields.lot_number,
        location_method,
        methods,
    }))
}
