use std::cmp::Ordering;
use thiserror::Error;

use crate::data_models::{SearchResponse, SearchStep, format_number};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("Invalid input. {0} is not a finite number.")]
    NonFinite(String),
}

/// Ascending numeric order shared by the engine and the sort animator, so step
/// indices computed here line up with the layout the client animates into.
/// `0.0` and `-0.0` compare equal; callers reject non-finite values first.
pub fn compare_values(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

pub fn is_sorted(values: &[f64]) -> bool {
    values
        .windows(2)
        .all(|w| compare_values(&w[0], &w[1]) != Ordering::Greater)
}

/// Stable, so equal values keep their input order.
pub fn sort_values(values: &mut [f64]) {
    values.sort_by(compare_values);
}

/// Every step a binary search over the sorted `arr` takes while looking for
/// `target`. The last step has `found` set when the target exists; an empty
/// array yields no steps.
pub fn binary_search_steps(arr: &[f64], target: f64) -> Vec<SearchStep> {
    let mut steps = Vec::new();
    if arr.is_empty() {
        return steps;
    }
    let (mut low, mut high) = (0usize, arr.len() - 1);

    loop {
        let mid = low + (high - low) / 2;
        let mid_val = arr[mid];
        let found = mid_val == target;

        let mut step = SearchStep::new(low, mid, high, found);
        step.mid_value = Some(mid_val);
        steps.push(step);

        if found {
            break;
        }
        if mid_val < target {
            low = mid + 1;
        } else {
            // high would go below zero
            if mid == 0 {
                break;
            }
            high = mid - 1;
        }
        if low > high {
            break;
        }
    }

    steps
}

pub fn binary_search(arr: &[f64], target: f64) -> Option<usize> {
    binary_search_steps(arr, target)
        .last()
        .filter(|step| step.found)
        .map(|step| step.mid)
}

/// Positions of all elements equal to `target` in the sorted `arr`.
pub fn equal_range(arr: &[f64], target: f64) -> Vec<usize> {
    let start = arr.partition_point(|v| *v < target);
    let end = arr.partition_point(|v| *v <= target);
    (start..end).collect()
}

/// What `POST /search` computes: sort when needed, trace the search, and
/// collect every matching index.
pub fn execute(array: &[f64], target: f64) -> Result<SearchResponse, SearchError> {
    if !target.is_finite() {
        return Err(SearchError::NonFinite(format!("target {target}")));
    }
    if let Some(bad) = array.iter().find(|v| !v.is_finite()) {
        return Err(SearchError::NonFinite(format!("array value {bad}")));
    }

    let sorted = is_sorted(array);
    let mut values = array.to_vec();
    if !sorted {
        sort_values(&mut values);
    }

    let steps = binary_search_steps(&values, target);
    let result = steps.last().filter(|s| s.found).map(|s| s.mid);
    let results = result.map(|_| equal_range(&values, target));

    log::debug!(
        "searched {} values for {}: {} steps, result {:?}",
        values.len(),
        format_number(target),
        steps.len(),
        result
    );

    Ok(SearchResponse {
        steps,
        sorted,
        results,
        result,
    })
}

#[test]
fn test_binary_search_steps_trace() {
    let arr = vec![3.0, 4.0, 5.0, 6.0, 7.0];
    let steps = binary_search_steps(&arr, 6.0);
    let trace = steps
        .iter()
        .map(|s| (s.low, s.mid, s.high, s.found))
        .collect::<Vec<_>>();
    assert_eq!(trace, vec![(0, 2, 4, false), (3, 3, 4, true)]);
    assert_eq!(steps[1].mid_value, Some(6.0));
}

#[test]
fn test_binary_search_missing_below_first() {
    let arr = vec![3.0, 4.0, 5.0];
    let steps = binary_search_steps(&arr, 1.0);
    assert!(steps.iter().all(|s| !s.found));
    assert_eq!(steps.last().map(|s| s.mid), Some(0));
    assert_eq!(binary_search(&arr, 1.0), None);
}
