//! This module defines the [project]ion of a table onto a list of columns.

use hashbrown::HashSet;
use itertools::Itertools;

use crate::{
    error::Error,
    tabular::table::{ColumnMarker, StorageValue, Table},
};

/// Restrict a [Table] to the given columns, in the given order,
/// and remove duplicate rows.
///
/// The first occurrence of every row is kept,
/// so the relative order of the input is preserved.
/// Returns an error if a marker does not occur in the table
/// or if `markers` contains duplicates.
pub fn project(table: &Table, markers: &[ColumnMarker]) -> Result<Table, Error> {
    if let Some(marker) = markers.iter().duplicates().next() {
        return Err(Error::DuplicateColumnMarker(*marker));
    }

    let columns = markers
        .iter()
        .map(|marker| table.column(*marker).ok_or(Error::UnknownColumnMarker(*marker)))
        .collect::<Result<Vec<usize>, Error>>()?;

    let mut result = Table::with_markers(markers.to_vec());
    let mut seen = HashSet::<Vec<StorageValue>>::with_capacity(table.len());

    for row in table.rows() {
        let projected: Vec<StorageValue> = columns.iter().map(|&column| row[column]).collect();

        if seen.insert(projected.clone()) {
            result.push_row_unchecked(projected);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::project;
    use crate::{
        error::Error,
        tabular::table::{ColumnMarker, Table},
    };
    use test_log::test;

    fn table() -> Table {
        Table::from_rows(
            vec![ColumnMarker::new(0), ColumnMarker::new(1), ColumnMarker::new(2)],
            vec![vec![1, 2, 3], vec![1, 4, 3], vec![2, 2, 2]],
        )
        .unwrap()
    }

    #[test]
    fn project_and_reorder() {
        let result = project(&table(), &[ColumnMarker::new(2), ColumnMarker::new(0)]).unwrap();

        assert_eq!(
            result.markers(),
            &[ColumnMarker::new(2), ColumnMarker::new(0)]
        );
        assert_eq!(result.into_rows(), vec![vec![3, 1], vec![2, 2]]);
    }

    #[test]
    fn project_to_nothing() {
        let result = project(&table(), &[]).unwrap();
        assert_eq!(result, Table::unit());

        let empty = Table::new(vec![ColumnMarker::new(0)]).unwrap();
        assert!(project(&empty, &[]).unwrap().is_empty());
    }

    #[test]
    fn project_unknown_marker() {
        assert_eq!(
            project(&table(), &[ColumnMarker::new(5)]),
            Err(Error::UnknownColumnMarker(ColumnMarker::new(5)))
        );
        assert_eq!(
            project(&table(), &[ColumnMarker::new(1), ColumnMarker::new(1)]),
            Err(Error::DuplicateColumnMarker(ColumnMarker::new(1)))
        );
    }
}
