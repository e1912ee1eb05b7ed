//! This module defines the orders in which
//! the preconditions of an action schema are joined.

use std::cmp::Reverse;

use crate::components::Atom;

/// Decides in which order atoms are turned into tables and folded.
///
/// Returns a permutation of the positions of `atoms`.
pub type JoinOrdering = fn(&[Atom]) -> Vec<usize>;

/// Fold the atoms in the order they are declared.
pub fn declaration_order(atoms: &[Atom]) -> Vec<usize> {
    (0..atoms.len()).collect()
}

/// Fold atoms with higher arity first.
///
/// Atoms of equal arity keep their declaration order.
pub fn inverse_arity_order(atoms: &[Atom]) -> Vec<usize> {
    let mut order = declaration_order(atoms);
    order.sort_by_key(|&index| Reverse(atoms[index].arity()));
    order
}
