use serde::{Deserialize, Serialize};

/// Body of `POST /search`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub array: Vec<f64>,
    pub target: f64,
}

/// One snapshot of binary search progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchStep {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
    #[serde(default)]
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "midValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mid_value: Option<f64>,
}

impl SearchStep {
    pub fn new(low: usize, mid: usize, high: usize, found: bool) -> SearchStep {
        SearchStep {
            low,
            mid,
            high,
            found,
            message: None,
            mid_value: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub steps: Vec<SearchStep>,
    pub sorted: bool,
    /// Every position equal to the target, ascending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<usize>,
}

/// Body of every non-2xx response from the search service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Integral values print without a fractional part: `4`, not `4.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn format_numbers(values: &[f64]) -> String {
    let items = values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<String>>();
    format!("[{}]", items.join(", "))
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(4.0), "4");
    assert_eq!(format_number(-12.0), "-12");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_numbers(&[1.0, 3.0, 4.5]), "[1, 3, 4.5]");
    assert_eq!(format_numbers(&[]), "[]");
}
