//! This module defines [Table] and [ColumnMarker].

use std::fmt::Display;

use hashbrown::HashSet;

use crate::error::Error;

/// Values stored in a [Table]
pub type StorageValue = usize;

/// Marker for a column of a [Table]
///
/// The logical layer associates every marker with a variable,
/// so two tables can be combined on the columns that carry the same marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnMarker(usize);

impl ColumnMarker {
    /// Create a new [ColumnMarker].
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Return the numeric identifier of this marker.
    pub fn id(&self) -> usize {
        self.0
    }
}

impl Display for ColumnMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of tuples of [StorageValue]s,
/// where each column is identified by a [ColumnMarker]
///
/// A table without columns is either empty (no row)
/// or the unit table with exactly one empty row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Marker of each column
    markers: Vec<ColumnMarker>,
    /// Content of the table
    rows: Vec<Vec<StorageValue>>,
}

impl Table {
    /// Create a new empty [Table] with the given columns.
    ///
    /// Returns an error if a marker is repeated.
    pub fn new(markers: Vec<ColumnMarker>) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(markers.len());
        for marker in &markers {
            if !seen.insert(*marker) {
                return Err(Error::DuplicateColumnMarker(*marker));
            }
        }

        Ok(Self {
            markers,
            rows: Vec::new(),
        })
    }

    /// Create the table with no columns and a single empty row.
    pub fn unit() -> Self {
        Self {
            markers: Vec::new(),
            rows: vec![Vec::new()],
        }
    }

    /// Create a new [Table] from a list of rows.
    pub fn from_rows<Rows>(markers: Vec<ColumnMarker>, rows: Rows) -> Result<Self, Error>
    where
        Rows: IntoIterator<Item = Vec<StorageValue>>,
    {
        let mut table = Self::new(markers)?;
        for row in rows {
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Create a [Table] whose markers are known to be distinct.
    pub(crate) fn with_markers(markers: Vec<ColumnMarker>) -> Self {
        debug_assert!(Self::new(markers.clone()).is_ok());

        Self {
            markers,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    ///
    /// Duplicates are not detected here;
    /// callers that may produce them should [project][super::operations::project::project] afterwards.
    pub fn push_row(&mut self, row: Vec<StorageValue>) -> Result<(), Error> {
        if row.len() != self.arity() {
            return Err(Error::ArityMismatch {
                expected: self.arity(),
                found: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    /// Add a row that has the correct length by construction.
    pub(crate) fn push_row_unchecked(&mut self, row: Vec<StorageValue>) {
        debug_assert_eq!(row.len(), self.arity());
        self.rows.push(row);
    }

    /// Return the number of columns.
    pub fn arity(&self) -> usize {
        self.markers.len()
    }

    /// Return the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return whether this table contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return the markers of all columns in order.
    pub fn markers(&self) -> &[ColumnMarker] {
        &self.markers
    }

    /// Return the index of the column with the given marker.
    pub fn column(&self, marker: ColumnMarker) -> Option<usize> {
        self.markers.iter().position(|current| *current == marker)
    }

    /// Return whether a column is marked with the given marker.
    pub fn contains_marker(&self, marker: ColumnMarker) -> bool {
        self.markers.contains(&marker)
    }

    /// Return the markers that occur in this table as well as in `other`,
    /// in the column order of this table.
    pub fn shared_markers(&self, other: &Table) -> Vec<ColumnMarker> {
        self.markers
            .iter()
            .filter(|marker| other.contains_marker(**marker))
            .copied()
            .collect()
    }

    /// Return an iterator over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[StorageValue]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Sort the rows lexicographically.
    pub fn sort(&mut self) {
        self.rows.sort_unstable();
    }

    /// Consume the table and return its rows.
    pub fn into_rows(self) -> Vec<Vec<StorageValue>> {
        self.rows
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, marker) in self.markers.iter().enumerate() {
            if index > 0 {
                write!(f, "\t")?;
            }
            write!(f, "{marker}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let line = row
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
