use futures::future::try_join_all;
use std::collections::HashMap;

use super::{Aborted, RunContext};
use crate::data_models::format_numbers;
use crate::search_engine::sort_values;
use crate::view::{Highlight, View};

/// `mapping[i]` is the index in `sorted` the element at original index `i`
/// moves to. Duplicates are assigned left to right: the k-th occurrence of a
/// value in `original` takes the k-th slot holding that value in `sorted`.
pub fn sort_mapping(original: &[f64], sorted: &[f64]) -> Vec<usize> {
    // keyed by bit pattern; the sort only permutes values, so 0.0 and -0.0
    // each still find a slot holding their own bits
    let mut slots: HashMap<u64, Vec<usize>> = HashMap::new();
    for (idx, value) in sorted.iter().enumerate().rev() {
        slots.entry(value.to_bits()).or_default().push(idx);
    }

    original
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            slots
                .get_mut(&value.to_bits())
                .and_then(|free| free.pop())
                // only reachable when `sorted` is not a permutation of `original`
                .unwrap_or(idx)
        })
        .collect()
}

pub struct SortAnimator;

impl SortAnimator {
    /// Moves the displayed `original` array into ascending order and returns
    /// the sorted values now on display.
    pub async fn run<V: View>(ctx: &RunContext<V>, original: &[f64]) -> Result<Vec<f64>, Aborted> {
        let mut sorted = original.to_vec();
        sort_values(&mut sorted);
        let mapping = sort_mapping(original, &sorted);

        let moves = mapping
            .iter()
            .enumerate()
            .filter(|(from, to)| from != *to)
            .map(|(from, to)| (from, *to))
            .collect::<Vec<(usize, usize)>>();
        log::debug!("sort animation: {} of {} elements move", moves.len(), original.len());

        ctx.mutate(|view| {
            view.clear_highlights();
            for (from, _) in &moves {
                view.highlight(*from, Highlight::Moving);
            }
        })
        .await?;
        ctx.pause().await?;

        try_join_all(moves.iter().map(|(from, to)| async move {
            ctx.mutate(|view| view.move_element(*from, *to)).await?;
            ctx.pause().await
        }))
        .await?;

        let note = format!(
            "Array was not sorted; sorted to {} before searching.",
            format_numbers(&sorted)
        );
        ctx.mutate(|view| {
            view.render_array(&sorted);
            view.narrate(note);
        })
        .await?;

        Ok(sorted)
    }
}

#[test]
fn test_sort_mapping_is_bijection_with_duplicates() {
    let original = vec![2.0, 1.0, 2.0, 0.5, 2.0, 1.0];
    let mut sorted = original.clone();
    sort_values(&mut sorted);
    let mapping = sort_mapping(&original, &sorted);

    let mut seen = mapping.clone();
    seen.sort();
    assert_eq!(seen, (0..original.len()).collect::<Vec<_>>());
    for (i, to) in mapping.iter().enumerate() {
        assert_eq!(original[i], sorted[*to]);
    }
    // first 2.0 takes the first 2.0 slot
    assert_eq!(mapping, vec![3, 1, 4, 0, 5, 2]);
}
