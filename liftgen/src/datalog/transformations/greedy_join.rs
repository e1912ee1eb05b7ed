//! This module defines the cost model for joining two conditions
//! and the greedy procedure that combines a rule body into a single join tree.

use crate::datalog::rules::Condition;

/// Estimated cost of joining two conditions
///
/// Costs are compared lexicographically, smaller is better:
/// first whether the join degenerates into a cartesian product,
/// then by how many variables the result has more than the larger operand,
/// then by the number of variables of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinCost {
    cartesian: bool,
    growth: usize,
    result_arity: usize,
}

impl JoinCost {
    /// Cost that is worse than the cost of any pair of conditions
    pub const WORST: JoinCost = JoinCost {
        cartesian: true,
        growth: usize::MAX,
        result_arity: usize::MAX,
    };

    /// Create a new [JoinCost].
    pub fn new(cartesian: bool, growth: usize, result_arity: usize) -> Self {
        Self {
            cartesian,
            growth,
            result_arity,
        }
    }
}

impl Default for JoinCost {
    fn default() -> Self {
        Self::WORST
    }
}

/// Estimate the cost of joining `left` with `right`.
pub fn compute_join_cost(left: &Condition, right: &Condition) -> JoinCost {
    let left_variables = left.variables();
    let right_variables = right.variables();

    let shared = right_variables
        .iter()
        .filter(|variable| left_variables.contains(variable))
        .count();
    let result_arity = left_variables.len() + right_variables.len() - shared;
    let growth = result_arity - left_variables.len().max(right_variables.len());

    JoinCost::new(shared == 0, growth, result_arity)
}

/// Return the pair of positions `(i, j)` with `i < j` whose conditions
/// are cheapest to join.
///
/// Ties are resolved in favor of the pair found first.
/// If no pair is cheaper than [JoinCost::WORST], `(0, 1)` is returned.
/// Returns `None` if there are fewer than two conditions.
pub fn cheapest_pair(conditions: &[Condition]) -> Option<(usize, usize)> {
    if conditions.len() < 2 {
        return None;
    }

    let mut best_pair = (0, 1);
    let mut best_cost = JoinCost::WORST;

    for (i, left) in conditions.iter().enumerate() {
        for (offset, right) in conditions[i + 1..].iter().enumerate() {
            let cost = compute_join_cost(left, right);
            if cost < best_cost {
                best_cost = cost;
                best_pair = (i, i + 1 + offset);
            }
        }
    }

    Some(best_pair)
}

/// Combine the conditions into a single synthetic condition
/// by repeatedly joining the [cheapest pair][cheapest_pair].
///
/// The joined condition takes the position of the left operand of the pair.
/// Returns `None` if `conditions` is empty.
pub fn greedy_join(mut conditions: Vec<Condition>) -> Option<Condition> {
    while let Some((i, j)) = cheapest_pair(&conditions) {
        log::trace!(
            "joining {} with {} ({:?})",
            conditions[i],
            conditions[j],
            compute_join_cost(&conditions[i], &conditions[j])
        );

        let right = conditions.remove(j);
        let left = conditions.remove(i);
        conditions.insert(i, Condition::join(left, right));
    }

    conditions.pop()
}
