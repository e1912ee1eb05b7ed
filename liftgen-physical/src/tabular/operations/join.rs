//! This module defines the natural [join] of two tables.

use hashbrown::HashMap;

use crate::tabular::table::{StorageValue, Table};

/// Compute the natural join of two [Table]s on all columns with a shared marker.
///
/// The result contains the columns of `left` followed by
/// the columns of `right` that do not occur in `left`.
/// Rows appear in the order of `left`, and for each left row
/// in the order of the matching rows of `right`.
///
/// If the tables share no marker this computes the cartesian product.
pub fn join(left: &Table, right: &Table) -> Table {
    let shared = left.shared_markers(right);

    let left_keys: Vec<usize> = shared
        .iter()
        .filter_map(|marker| left.column(*marker))
        .collect();
    let right_keys: Vec<usize> = shared
        .iter()
        .filter_map(|marker| right.column(*marker))
        .collect();
    let right_rest: Vec<usize> = (0..right.arity())
        .filter(|column| !right_keys.contains(column))
        .collect();

    let mut markers = left.markers().to_vec();
    markers.extend(right_rest.iter().map(|&column| right.markers()[column]));
    let mut result = Table::with_markers(markers);

    if left.is_empty() || right.is_empty() {
        return result;
    }

    let mut index = HashMap::<Vec<StorageValue>, Vec<&[StorageValue]>>::new();
    for row in right.rows() {
        let key = right_keys.iter().map(|&column| row[column]).collect();
        index.entry(key).or_default().push(row);
    }

    log::trace!(
        "Joining {} x {} rows on {} columns ({} distinct keys)",
        left.len(),
        right.len(),
        shared.len(),
        index.len()
    );

    let mut key = Vec::<StorageValue>::with_capacity(left_keys.len());
    for left_row in left.rows() {
        key.clear();
        key.extend(left_keys.iter().map(|&column| left_row[column]));

        let Some(matches) = index.get(&key) else {
            continue;
        };

        for right_row in matches {
            let mut row = Vec::with_capacity(left_row.len() + right_rest.len());
            row.extend_from_slice(left_row);
            row.extend(right_rest.iter().map(|&column| right_row[column]));

            result.push_row_unchecked(row);
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::join;
    use crate::tabular::table::{ColumnMarker, Table};
    use quickcheck_macros::quickcheck;
    use test_log::test;

    fn markers(ids: &[usize]) -> Vec<ColumnMarker> {
        ids.iter().copied().map(ColumnMarker::new).collect()
    }

    #[test]
    fn join_on_single_column() {
        let left = Table::from_rows(markers(&[0, 1]), vec![vec![1, 2], vec![3, 4], vec![5, 2]])
            .unwrap();
        let right =
            Table::from_rows(markers(&[1, 2]), vec![vec![2, 7], vec![2, 8], vec![9, 9]]).unwrap();

        let result = join(&left, &right);

        assert_eq!(result.markers(), markers(&[0, 1, 2]).as_slice());
        assert_eq!(
            result.into_rows(),
            vec![vec![1, 2, 7], vec![1, 2, 8], vec![5, 2, 7], vec![5, 2, 8]]
        );
    }

    #[test]
    fn join_on_reordered_columns() {
        // Edge(x, y), Edge(y, x)
        let left = Table::from_rows(markers(&[0, 1]), vec![vec![1, 2], vec![2, 1], vec![3, 4]])
            .unwrap();
        let right = Table::from_rows(markers(&[1, 0]), vec![vec![1, 2], vec![2, 1], vec![3, 4]])
            .unwrap();

        let result = join(&left, &right);

        assert_eq!(result.markers(), markers(&[0, 1]).as_slice());
        assert_eq!(result.into_rows(), vec![vec![1, 2], vec![2, 1]]);
    }

    #[test]
    fn join_with_empty_table() {
        let left = Table::from_rows(markers(&[0, 1]), vec![vec![1, 2]]).unwrap();
        let right = Table::new(markers(&[1, 2])).unwrap();

        let result = join(&left, &right);
        assert!(result.is_empty());
        assert_eq!(result.markers(), markers(&[0, 1, 2]).as_slice());
    }

    #[test]
    fn join_with_unit_table() {
        let left = Table::from_rows(markers(&[0]), vec![vec![1], vec![2]]).unwrap();

        let result = join(&left, &Table::unit());
        assert_eq!(result, left);
    }

    #[quickcheck]
    fn join_agrees_with_nested_loop(left_rows: Vec<(u8, u8)>, right_rows: Vec<(u8, u8)>) -> bool {
        let left = Table::from_rows(
            markers(&[0, 1]),
            left_rows
                .iter()
                .map(|&(a, b)| vec![usize::from(a % 4), usize::from(b % 4)]),
        )
        .unwrap();
        let right = Table::from_rows(
            markers(&[1, 2]),
            right_rows
                .iter()
                .map(|&(b, c)| vec![usize::from(b % 4), usize::from(c % 4)]),
        )
        .unwrap();

        let mut expected = Vec::new();
        for l in left.rows() {
            for r in right.rows() {
                if l[1] == r[0] {
                    expected.push(vec![l[0], l[1], r[1]]);
                }
            }
        }

        join(&left, &right).into_rows() == expected
    }
}
