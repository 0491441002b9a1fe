//! Weighted random selection over an ordered item list.
//!
//! The draw is a 1-indexed integer in `[1, total_weight]` derived from a
//! uniform `random_unit` in `[0, 1)`. A linear scan accumulates weights
//! in list order and returns the first item whose cumulative weight
//! reaches the draw, so an item with weight `w` owns exactly `w` of the
//! `total_weight` possible draws.
//!
//! [`choose`] is pure and deterministic for a fixed `(items, random_unit)`
//! pair; [`spin`] layers an RNG on top. Keeping the kernel pure makes the
//! boundary cases directly testable without seeding an RNG.

use rand::Rng;
use thiserror::Error;

use crate::item::Item;

/// Errors from the selector.
///
/// Deliberately exhaustive: the server maps every variant to a status
/// code and should be forced to handle any new one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// Selection was requested on an empty list.
    #[error("no items available for selection")]
    EmptyList,
}

/// Selects one item from `items` using a uniform draw in `[0, 1)`.
///
/// The caller keeps ownership of the list; the returned reference points
/// into it, so the selection and the list it was drawn from stay in
/// lockstep by construction.
///
/// `random_unit` values outside `[0, 1)` are tolerated: the derived draw
/// is clamped into `[1, total_weight]`.
///
/// # Errors
///
/// Returns [`SelectorError::EmptyList`] if `items` is empty.
pub fn choose(items: &[Item], random_unit: f64) -> Result<&Item, SelectorError> {
    if items.is_empty() {
        return Err(SelectorError::EmptyList);
    }

    // Summed in u64 so a pathological list of u32::MAX weights cannot
    // overflow.
    let total_weight: u64 = items.iter().map(|item| u64::from(item.weight)).sum();

    // Stored lists always have total_weight > 0 (weights are validated
    // to be >= 1), but choose accepts arbitrary slices.
    if total_weight == 0 {
        return Ok(items.last().expect("items is non-empty"));
    }

    // 1-indexed draw in [1, total_weight]. The clamp covers float
    // rounding when random_unit is just below 1.0 and total_weight is
    // large enough that the product rounds up to total_weight.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let draw = ((random_unit * total_weight as f64).floor() as u64 + 1).clamp(1, total_weight);

    let mut cumulative: u64 = 0;
    for item in items {
        cumulative += u64::from(item.weight);
        if draw <= cumulative {
            return Ok(item);
        }
    }

    // Unreachable for integer weights and draw <= total_weight, kept as
    // a backstop against rounding surprises.
    Ok(items.last().expect("items is non-empty"))
}

/// Selects one item from `items` using a fresh uniform draw from `rng`.
///
/// `Rng::gen::<f64>()` yields `[0, 1)` by contract, matching what
/// [`choose`] expects.
///
/// # Errors
///
/// Returns [`SelectorError::EmptyList`] if `items` is empty.
pub fn spin<'a, R: Rng>(items: &'a [Item], rng: &mut R) -> Result<&'a Item, SelectorError> {
    choose(items, rng.gen::<f64>())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn menu() -> Vec<Item> {
        vec![
            Item::new("A", 30),
            Item::new("B", 15),
            Item::new("C", 20),
            Item::new("D", 10),
            Item::new("E", 25),
        ]
    }

    #[test]
    fn empty_list_is_an_error() {
        assert_eq!(choose(&[], 0.5), Err(SelectorError::EmptyList));
    }

    #[test]
    fn draw_boundaries_match_cumulative_weights() {
        let items = menu();

        // total_weight = 100: draw 1 -> A, draw 30 -> A, draw 31 -> B.
        assert_eq!(choose(&items, 0.0).unwrap().label, "A");
        assert_eq!(choose(&items, 0.299).unwrap().label, "A");
        assert_eq!(choose(&items, 0.30).unwrap().label, "B");
    }

    #[test]
    fn last_slice_and_upper_edge_select_last_item() {
        let items = menu();

        assert_eq!(choose(&items, 0.75).unwrap().label, "E");
        assert_eq!(choose(&items, 0.999_999).unwrap().label, "E");
        // Out-of-range input is clamped rather than walking off the list.
        assert_eq!(choose(&items, 1.0).unwrap().label, "E");
    }

    #[test]
    fn choose_is_deterministic_for_fixed_inputs() {
        let items = menu();
        let first = choose(&items, 0.42).unwrap().label.clone();
        for _ in 0..100 {
            assert_eq!(choose(&items, 0.42).unwrap().label, first);
        }
    }

    #[test]
    fn single_item_always_wins() {
        let items = vec![Item::new("X", 5)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(spin(&items, &mut rng).unwrap().label, "X");
        }
    }

    #[test]
    fn selected_item_is_always_a_member_of_the_list() {
        let items = menu();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1_000 {
            let selected = spin(&items, &mut rng).unwrap();
            assert!(items.iter().any(|item| item.label == selected.label));
        }
    }

    #[test]
    fn selection_frequency_converges_to_weight_ratio() {
        let items = menu();
        let total_weight: f64 = items.iter().map(|i| f64::from(i.weight)).sum();
        let mut rng = StdRng::seed_from_u64(2024);

        const N: u32 = 200_000;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..N {
            let selected = spin(&items, &mut rng).unwrap();
            *counts.entry(selected.label.clone()).or_default() += 1;
        }

        // With N = 200k the observed frequency should sit well within a
        // percentage point of the expected ratio for every item.
        for item in &items {
            let expected = f64::from(item.weight) / total_weight;
            let observed = f64::from(counts[&item.label]) / f64::from(N);
            assert!(
                (observed - expected).abs() < 0.01,
                "item {}: observed {observed:.4}, expected {expected:.4}",
                item.label
            );
        }
    }
}
