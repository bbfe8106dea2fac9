use crate::error::TrSheetError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static REQUEST_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TR:\s*(\d+)").expect("valid request id regex"));

static LOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Lot No:\s*([A-Za-z0-9\-]+)").expect("valid lot regex"));

// "When Req'd  Tuesday, 05 Mar 2024"
static REQUESTED_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"When Req'd\s+\w+,\s+(\d{2}\s+\w+\s+\d{4})").expect("valid requested date regex")
});

static LOCATION_METHOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Location Method:\s*([A-Za-z ]+)").expect("valid location method regex")
});

const REQUESTED_DATE_FORMAT: &str = "%d %b %Y";

/// Fixed fields of one test request page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFields {
    pub request_id: String,
    pub lot_number: String,
    pub requested_date: Option<NaiveDate>,
    /// Raw "Location Method:" value, trimmed and lower-cased.
    pub location_flag: Option<String>,
}

/// Extract the fixed fields from a page.
///
/// Returns `Ok(None)` when the page has no request id. A date that matches
/// the requested-date layout but is not a real date is an error.
pub fn parse_fields(text: &str) -> Result<Option<PageFields>, TrSheetError> {
    let Some(request_id) = capture(&REQUEST_ID_REGEX, text) else {
        return Ok(None);
    };

    let lot_number = capture(&LOT_REGEX, text).unwrap_or_default();
    let requested_date = parse_requested_date(&request_id, text)?;
    let location_flag = capture(&LOCATION_METHOD_REGEX, text).map(|s| s.trim().to_lowercase());

    Ok(Some(PageFields {
        request_id,
        lot_number,
        requested_date,
        location_flag,
    }))
}

fn parse_requested_date(
    request_id: &str,
    text: &str,
) -> Result<Option<NaiveDate>, TrSheetError> {
    let Some(raw) = capture(&REQUESTED_DATE_REGEX, text) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(&raw, REQUESTED_DATE_FORMAT)
        .map(Some)
        .map_err(|e| TrSheetError::InvalidDate {
            request_id: request_id.to_string(),
            text: raw,
            reason: e.to_string(),
        })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "CivilPro Test Request\n\
        TR: 1042          Lot No: EW-0113\n\
        When Req'd   Tuesday, 05 Mar 2024\n\
        Location Method: Tester Locates\n";

    #[test]
    fn test_all_fields() {
        let fields = parse_fields(PAGE).unwrap().unwrap();
        assert_eq!(fields.request_id, "1042");
        assert_eq!(fields.lot_number, "EW-0113");
        assert_eq!(
            fields.requested_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert_eq!(fields.location_flag.as_deref(), Some("tester locates"));
    }

    #[test]
    fn test_missing_request_id_skips_page() {
        let text = "Lot No: EW-0113\nLocation Method: Tester Locates";
        assert!(parse_fields(text).unwrap().is_none());
    }

    #[test]
    fn test_request_id_needs_digits() {
        assert!(parse_fields("TR: pending").unwrap().is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let fields = parse_fields("TR: 7").unwrap().unwrap();
        assert_eq!(fields.lot_number, "");
        assert!(fields.requested_date.is_none());
        assert!(fields.location_flag.is_none());
    }

    #[test]
    fn test_location_flag_stops_at_line_end() {
        let fields = parse_fields("TR: 7\nLocation Method:  Location Specified  \nQty 3")
            .unwrap()
            .unwrap();
        assert_eq!(fields.location_flag.as_deref(), Some("location specified"));
    }

    #[test]
    fn test_date_without_weekday_is_ignored() {
        let fields = parse_fields("TR: 7\nWhen Req'd 05 Mar 2024").unwrap().unwrap();
        assert!(fields.requested_date.is_none());
    }

    // Known sharp edge: a bad date is not isolated to its page.
    #[test]
    fn test_impossible_date_is_an_error() {
        let err = parse_fields("TR: 88\nWhen Req'd Friday, 31 Feb 2024").unwrap_err();
        match err {
            TrSheetError::InvalidDate {
                request_id, text, ..
            } => {
                assert_eq!(request_id, "88");
                assert_eq!(text, "31 Feb 2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_month_is_an_error() {
        assert!(parse_fields("TR: 88\nWhen Req'd Friday, 12 Foo 2024").is_err());
    }
}
