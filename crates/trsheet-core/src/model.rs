use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// How test locations were chosen for a test request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMethod {
    TesterLocates,
    LocationSpecified,
    #[default]
    Unknown,
}

impl fmt::Display for LocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationMethod::TesterLocates => write!(f, "tester locates"),
            LocationMethod::LocationSpecified => write!(f, "location specified"),
            LocationMethod::Unknown => write!(f, "unknown"),
        }
    }
}

impl LocationMethod {
    /// Map the captured "Location Method:" value (already trimmed and
    /// lower-cased) to a variant. Anything unrecognized is `Unknown`.
    pub fn from_flag(s: &str) -> LocationMethod {
        match s {
            "tester locates" => LocationMethod::TesterLocates,
            "location specified" => LocationMethod::LocationSpecified,
            _ => LocationMethod::Unknown,
        }
    }
}

/// A test method name with the number of tests requested for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCount {
    pub method: String,
    pub count: u32,
}

impl MethodCount {
    pub fn new(method: impl Into<String>, count: u32) -> Self {
        MethodCount {
            method: method.into(),
            count,
        }
    }
}

/// One test request, parsed from one PDF page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRequest {
    pub id: String,
    pub page_number: usize,
    pub requested_date: Option<NaiveDate>,
    pub lot_number: String,
    pub location_method: LocationMethod,
    /// Normalized and package-collapsed method counts, in extraction order.
    pub methods: Vec<MethodCount>,
}

impl TestRequest {
    /// Lot category: the first two characters of the lot number, or empty
    /// when the lot number is shorter than that.
    pub fn lot_type(&self) -> &str {
        let mut chars = self.lot_number.char_indices();
        match (chars.nth(1), chars.next()) {
            (Some(_), Some((idx, _))) => &self.lot_number[..idx],
            (Some(_), None) => &self.lot_number,
            (None, _) => "",
        }
    }
}

/// Number of tests on a detail row.
///
/// Requests with no extracted methods still get one row, marked `NotUsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Tests(u32),
    NotUsed,
}

impl Count {
    pub fn tests(&self) -> Option<u32> {
        match self {
            Count::Tests(n) => Some(*n),
            Count::NotUsed => None,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Tests(n) => write!(f, "{n}"),
            Count::NotUsed => write!(f, "not used"),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Tests(n) => serializer.serialize_u32(*n),
            Count::NotUsed => serializer.serialize_str("not used"),
        }
    }
}

/// One row of the "All tests" sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub request_id: String,
    pub requested_date: Option<NaiveDate>,
    pub method: String,
    pub count: Count,
    pub lot_number: String,
    pub lot_type: String,
}

/// One row of the "Tests summary" sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub method: String,
    pub total: u64,
}

/// A page that produced no test request.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPage {
    pub page_number: usize,
    pub reason: String,
}

/// Everything produced by one processing run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub requests: Vec<TestRequest>,
    pub details: Vec<DetailRow>,
    pub summary: Vec<SummaryRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_pages: Vec<SkippedPage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lot: &str) -> TestRequest {
        TestRequest {
            id: "1".into(),
            page_number: 1,
            requested_date: None,
            lot_number: lot.into(),
            location_method: LocationMethod::Unknown,
            methods: vec![],
        }
    }

    #[test]
    fn test_lot_type_needs_two_chars() {
        assert_eq!(request("EW-0042").lot_type(), "EW");
        assert_eq!(request("EW").lot_type(), "EW");
        assert_eq!(request("E").lot_type(), "");
        assert_eq!(request("").lot_type(), "");
    }

    #[test]
    fn test_location_method_from_flag() {
        assert_eq!(
            LocationMethod::from_flag("tester locates"),
            LocationMethod::TesterLocates
        );
        assert_eq!(
            LocationMethod::from_flag("location specified"),
            LocationMethod::LocationSpecified
        );
        assert_eq!(LocationMethod::from_flag("gps"), LocationMethod::Unknown);
    }

    #[test]
    fn test_count_serializes_not_used_as_string() {
        assert_eq!(serde_json::to_string(&Count::NotUsed).unwrap(), "\"not used\"");
        assert_eq!(serde_json::to_string(&Count::Tests(4)).unwrap(), "4");
    }
}
