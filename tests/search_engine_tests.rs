use bsviz::search_engine::*;

fn trace(arr: &[f64], target: f64) -> Vec<(usize, usize, usize, bool)> {
    binary_search_steps(arr, target)
        .iter()
        .map(|s| (s.low, s.mid, s.high, s.found))
        .collect()
}

#[test]
fn test_empty_array_has_no_steps() {
    assert!(binary_search_steps(&[], 3.0).is_empty());
    let response = execute(&[], 3.0).unwrap();
    assert!(response.steps.is_empty());
    assert!(response.sorted);
    assert_eq!(response.result, None);
    assert_eq!(response.results, None);
}

#[test]
fn test_trace_not_found_above_last() {
    let arr = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(
        trace(&arr, 10.0),
        vec![(0, 1, 3, false), (2, 2, 3, false), (3, 3, 3, false)]
    );
}

#[test]
fn test_binary_search_finds_every_element() {
    let arr = (0..33).map(|i| i as f64 * 1.5).collect::<Vec<f64>>();
    for (i, v) in arr.iter().enumerate() {
        assert_eq!(binary_search(&arr, *v), Some(i));
    }
    assert_eq!(binary_search(&arr, 0.75), None);
}

#[test]
fn test_is_sorted_and_sort_values() {
    assert!(is_sorted(&[]));
    assert!(is_sorted(&[1.0, 1.0, 2.0]));
    assert!(!is_sorted(&[2.0, 1.0]));

    let mut values = vec![5.0, -1.0, 3.5, 3.5, 0.0];
    sort_values(&mut values);
    assert_eq!(values, vec![-1.0, 0.0, 3.5, 3.5, 5.0]);
}

#[test]
fn test_equal_range() {
    let arr = [1.0, 2.0, 2.0, 2.0, 3.0];
    assert_eq!(equal_range(&arr, 2.0), vec![1, 2, 3]);
    assert!(equal_range(&arr, 2.5).is_empty());
}

#[test]
fn test_execute_unsorted_searches_sorted_copy() {
    let response = execute(&[5.0, 3.0, 1.0, 4.0], 4.0).unwrap();
    assert!(!response.sorted);
    let last = response.steps.last().unwrap();
    assert!(last.found);
    assert_eq!(last.mid, 2);
    assert_eq!(last.mid_value, Some(4.0));
    assert_eq!(response.result, Some(2));
    assert_eq!(response.results, Some(vec![2]));
}

#[test]
fn test_execute_duplicates_report_all_positions() {
    let response = execute(&[2.0, 2.0, 2.0], 2.0).unwrap();
    assert!(response.sorted);
    assert_eq!(response.steps.len(), 1);
    assert_eq!(response.result, Some(1));
    assert_eq!(response.results, Some(vec![0, 1, 2]));
}

#[test]
fn test_execute_rejects_non_finite() {
    assert!(matches!(
        execute(&[1.0, f64::NAN], 1.0),
        Err(SearchError::NonFinite(_))
    ));
    assert!(matches!(
        execute(&[1.0], f64::INFINITY),
        Err(SearchError::NonFinite(_))
    ));
}

#[test]
fn test_signed_zero_counts_as_sorted() {
    assert!(is_sorted(&[0.0, -0.0, 1.0]));
    let response = execute(&[0.0, -0.0, 1.0], 0.0).unwrap();
    assert!(response.sorted);
    assert_eq!(response.result, Some(1));
    assert_eq!(response.results, Some(vec![0, 1]));
}

#[test]
fn test_sort_values_is_stable_for_equal_values() {
    let mut values = vec![1.0, 0.0, -0.0];
    sort_values(&mut values);
    assert_eq!(values, vec![0.0, -0.0, 1.0]);
    assert!(values[0].is_sign_positive());
    assert!(values[1].is_sign_negative());
}
