//! # Query Parameter Parser
//!
//! Parses the `start`/`count` window of the list endpoint. Nothing here is
//! ever rejected: unparsable or out-of-range values fall back to defaults.
//! A repeated key counts only on its first occurrence.

/// Largest page the list endpoint returns
pub const MAX_COUNT: i64 = 10;

/// Smallest accepted page size
pub const MIN_COUNT: i64 = 1;

/// Parsed list window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Rows to skip
    pub start: i64,

    /// Rows to return, within [MIN_COUNT, MAX_COUNT]
    pub count: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            start: 0,
            count: MAX_COUNT,
        }
    }
}

impl ListParams {
    /// Parse query parameters in the order they appear in the URL
    pub fn parse(params: &[(String, String)]) -> Self {
        let count = parse_int(first(params, "count"));
        let start = parse_int(first(params, "start"));

        Self {
            count: if (MIN_COUNT..=MAX_COUNT).contains(&count) {
                count
            } else {
                MAX_COUNT
            },
            start: start.max(0),
        }
    }
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Missing or malformed values read as 0
fn parse_int(value: Option<&str>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}
