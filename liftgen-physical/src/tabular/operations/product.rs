//! This module defines the [cartesian_product] of two tables.

use crate::tabular::table::Table;

/// Compute the cartesian product of two [Table]s with disjoint markers.
///
/// The result contains the columns of `left` followed by the columns of `right`.
pub fn cartesian_product(left: &Table, right: &Table) -> Table {
    debug_assert!(left.shared_markers(right).is_empty());

    let mut markers = left.markers().to_vec();
    markers.extend_from_slice(right.markers());
    let mut result = Table::with_markers(markers);

    for left_row in left.rows() {
        for right_row in right.rows() {
            let mut row = Vec::with_capacity(left_row.len() + right_row.len());
            row.extend_from_slice(left_row);
            row.extend_from_slice(right_row);

            result.push_row_unchecked(row);
        }
    }

    result
}
