//! Fractional-position ordering engine.
//!
//! Tasks carry an `f64` sort key; inserting an item between two neighbors
//! assigns it the midpoint of their keys, so a drag-and-drop move normally
//! costs a single record write. Repeated midpoint insertions in the same gap
//! eventually exhaust float precision; [`is_spacing_exhausted`] detects that
//! collapse and the caller falls back to [`rebalance`], which regenerates the
//! whole scope with uniform spacing.
//!
//! Every function here is pure and total. Inputs are expected to be sorted
//! ascending with distinct values; that is a caller contract, not a runtime
//! check - an unsorted input yields a wrong answer, not a panic.

/// Position assigned to the first item of an empty scope.
pub const BASE_POSITION: f64 = 1000.0;

/// Spacing between neighbors on append and after a rebalance.
pub const POSITION_STEP: f64 = 1000.0;

/// Position for appending a new item at the end of a scope.
///
/// Returns [`BASE_POSITION`] for an empty scope, otherwise a value strictly
/// greater than every existing position.
pub fn append_position(sorted_positions: &[f64]) -> f64 {
    match sorted_positions.last() {
        Some(max) => max + POSITION_STEP,
        None => BASE_POSITION,
    }
}

/// Candidate position for landing at `target_index` among `siblings`.
///
/// `siblings` holds the positions of every *other* item in the scope, sorted
/// ascending; `target_index` is the 0-based slot the moved item should occupy
/// in the resulting order, in `0..=siblings.len()`.
pub fn insert_position(siblings: &[f64], target_index: usize) -> f64 {
    let (Some(first), Some(last)) = (siblings.first(), siblings.last()) else {
        return BASE_POSITION;
    };

    if target_index == 0 {
        return first - POSITION_STEP;
    }

    if target_index >= siblings.len() {
        return last + POSITION_STEP;
    }

    // Between two neighbors: take the midpoint so no other record moves.
    (siblings[target_index - 1] + siblings[target_index]) / 2.0
}

/// Whether `candidate` failed to land strictly between its neighbor bounds.
///
/// Pass `f64::NEG_INFINITY` / `f64::INFINITY` when there is no lower / upper
/// neighbor. A true result means float precision has collapsed in this gap
/// and the scope needs a [`rebalance`].
pub fn is_spacing_exhausted(candidate: f64, lower: f64, upper: f64) -> bool {
    !(candidate > lower && candidate < upper)
}

/// Freshly spaced positions for a scope of `count` items.
///
/// Item `i` (0-based) gets `(i + 1) * step`. The caller maps the sequence
/// back onto its items in the order it wants preserved.
pub fn rebalance(count: usize, step: Option<f64>) -> Vec<f64> {
    let step = step.unwrap_or(POSITION_STEP);
    (1..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_on_empty_scope_is_baseline() {
        assert_eq!(append_position(&[]), 1000.0);
    }

    #[test]
    fn append_exceeds_max() {
        let positions = [250.0, 1000.0, 3125.5];
        let appended = append_position(&positions);
        assert!(appended > 3125.5);
        assert_eq!(appended, 4125.5);
    }

    #[test]
    fn insert_into_empty_scope_is_baseline() {
        assert_eq!(insert_position(&[], 0), 1000.0);
        assert_eq!(insert_position(&[], 7), 1000.0);
    }

    #[test]
    fn insert_before_first() {
        assert_eq!(insert_position(&[100.0, 200.0, 300.0], 0), -900.0);
        assert!(insert_position(&[100.0, 200.0, 300.0], 0) < 100.0);
    }

    #[test]
    fn insert_after_last() {
        assert_eq!(insert_position(&[100.0, 200.0, 300.0], 3), 1300.0);
        // Indexes past the end clamp to append.
        assert_eq!(insert_position(&[100.0, 200.0, 300.0], 99), 1300.0);
    }

    #[test]
    fn insert_between_neighbors_is_bracketed_midpoint() {
        let siblings = [1000.0, 2000.0, 3000.0];
        for target in 1..siblings.len() {
            let candidate = insert_position(&siblings, target);
            assert!(siblings[target - 1] < candidate);
            assert!(candidate < siblings[target]);
        }
        assert_eq!(insert_position(&siblings, 1), 1500.0);
    }

    #[test]
    fn exhaustion_predicate_brackets_strictly() {
        assert!(!is_spacing_exhausted(1500.0, 1000.0, 2000.0));
        assert!(is_spacing_exhausted(1000.0, 1000.0, 2000.0));
        assert!(is_spacing_exhausted(2000.0, 1000.0, 2000.0));
        assert!(is_spacing_exhausted(999.0, 1000.0, 2000.0));
        assert!(is_spacing_exhausted(2001.0, 1000.0, 2000.0));
    }

    #[test]
    fn exhaustion_with_open_bounds() {
        assert!(!is_spacing_exhausted(-5000.0, f64::NEG_INFINITY, 100.0));
        assert!(!is_spacing_exhausted(5000.0, 100.0, f64::INFINITY));
        assert!(is_spacing_exhausted(100.0, 100.0, f64::INFINITY));
    }

    #[test]
    fn rebalance_produces_uniform_spacing() {
        assert_eq!(
            rebalance(5, None),
            vec![1000.0, 2000.0, 3000.0, 4000.0, 5000.0]
        );
        assert_eq!(rebalance(0, None), Vec::<f64>::new());
        assert_eq!(rebalance(3, Some(10.0)), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn rebalance_is_idempotent() {
        assert_eq!(rebalance(4, Some(500.0)), rebalance(4, Some(500.0)));
    }

    #[test]
    fn move_with_headroom_needs_single_write() {
        // Scope [1000, 2000, 3000], last item dragged to slot 1.
        let siblings = [1000.0, 2000.0];
        let candidate = insert_position(&siblings, 1);
        assert_eq!(candidate, 1500.0);
        assert!(!is_spacing_exhausted(candidate, siblings[0], siblings[1]));
    }

    #[test]
    fn collapsed_gap_triggers_rebalance() {
        // Simulated precision collapse: the first gap can no longer be bisected
        // meaningfully once the midpoint rounds onto a bound.
        let a = 1000.0;
        let b = 1000.0 + f64::EPSILON * 1000.0 / 2.0;
        let siblings = [a, b, 2000.0];
        let candidate = insert_position(&siblings, 1);
        assert!(is_spacing_exhausted(candidate, siblings[0], siblings[1]));

        // Caller response: rebalance all three with generous spacing.
        assert_eq!(rebalance(3, None), vec![1000.0, 2000.0, 3000.0]);
    }

    #[test]
    fn repeated_bisection_eventually_exhausts() {
        let lower = 1000.0;
        let mut upper = 2000.0;
        let mut steps = 0;
        loop {
            let mid = (lower + upper) / 2.0;
            if is_spacing_exhausted(mid, lower, upper) {
                break;
            }
            upper = mid;
            steps += 1;
            assert!(steps < 200, "bisection never exhausted");
        }
        // f64 mantissa gives out after a bounded number of halvings.
        assert!(steps > 0);
    }
}
