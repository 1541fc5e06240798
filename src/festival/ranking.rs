use std::cmp::Ordering;

use models::Competitor;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Dense rank plus tie label, e.g. `(3, "3b")` for the second competitor in
/// the third rank group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placing {
    pub rank: u32,
    pub label: String,
}

/// Placings for totals sorted descending, aligned with the input.
///
/// Rank advances by one on every strict decrease; equal totals share the rank
/// and get consecutive suffixes `a`, `b`, ... after `z` the suffix rolls over
/// to `aa`, `ab`, ...
pub fn placings(totals: &[f64]) -> Vec<Placing> {
    let mut out = Vec::with_capacity(totals.len());
    let mut rank = 0u32;
    let mut group_index = 0usize;
    let mut previous: Option<f64> = None;

    for &total in totals {
        debug_assert!(
            !matches!(previous, Some(p) if total > p),
            "totals must be sorted descending"
        );
        if previous == Some(total) {
            group_index += 1;
        } else {
            rank += 1;
            group_index = 0;
        }
        previous = Some(total);

        out.push(Placing {
            rank,
            label: format!("{rank}{}", group_suffix(group_index)),
        });
    }

    out
}

/// Placings for competitors already in standing order.
pub fn placings_for(list: &[&Competitor]) -> Vec<Placing> {
    let totals = list.iter().map(|c| c.total()).collect::<Vec<_>>();
    placings(&totals)
}

/// Sorts by total descending. Ties keep the order of the initial standing.
pub fn sort_by_total(list: &mut [&Competitor]) {
    list.sort_by(|a, b| {
        OrderedFloat(b.total())
            .cmp(&OrderedFloat(a.total()))
            .then_with(|| initial_order(a, b))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn initial_order(a: &Competitor, b: &Competitor) -> Ordering {
    a.initial_rank.cmp(&b.initial_rank).then_with(|| {
        a.initial_rank_label
            .len()
            .cmp(&b.initial_rank_label.len())
            .then_with(|| a.initial_rank_label.cmp(&b.initial_rank_label))
    })
}

fn group_suffix(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
