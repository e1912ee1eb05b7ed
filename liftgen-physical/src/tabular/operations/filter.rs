//! This module defines [TupleFilter].

use crate::{
    error::Error,
    tabular::table::{ColumnMarker, StorageValue, Table},
};

/// Describes how one position of an input tuple is treated by a [TupleFilter]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelection {
    /// The value at this position is bound to the column with this marker.
    /// If the marker occurs again later in the selection,
    /// the values at both positions must agree.
    Bind(ColumnMarker),
    /// The value at this position must equal the given value
    /// and does not appear in the output.
    Constant(StorageValue),
}

/// Restricts a list of input tuples to the ones matching a selection
/// and turns the survivors into the rows of a [Table]
///
/// This combines the selection of equal columns,
/// the selection of constant values and the removal of duplicated columns
/// into a single pass over the input.
#[derive(Debug, Clone)]
pub struct TupleFilter {
    /// Length of the accepted input tuples
    input_arity: usize,
    /// Markers of the output columns in order of first occurrence
    markers: Vec<ColumnMarker>,
    /// For each output column the input position it is read from
    output_positions: Vec<usize>,
    /// Pairs of input positions whose values must agree
    equalities: Vec<(usize, usize)>,
    /// Input positions that must hold a fixed value
    constants: Vec<(usize, StorageValue)>,
}

impl TupleFilter {
    /// Create a new [TupleFilter] where the `i`th entry
    /// of `selection` describes position `i` of the input tuples.
    pub fn new(selection: &[ColumnSelection]) -> Self {
        let mut markers = Vec::<ColumnMarker>::new();
        let mut output_positions = Vec::<usize>::new();
        let mut equalities = Vec::<(usize, usize)>::new();
        let mut constants = Vec::<(usize, StorageValue)>::new();

        for (position, column) in selection.iter().enumerate() {
            match column {
                ColumnSelection::Bind(marker) => {
                    match markers.iter().position(|current| current == marker) {
                        Some(output_index) => {
                            equalities.push((output_positions[output_index], position))
                        }
                        None => {
                            markers.push(*marker);
                            output_positions.push(position);
                        }
                    }
                }
                ColumnSelection::Constant(value) => constants.push((position, *value)),
            }
        }

        Self {
            input_arity: selection.len(),
            markers,
            output_positions,
            equalities,
            constants,
        }
    }

    /// Return the markers of the output columns.
    pub fn markers(&self) -> &[ColumnMarker] {
        &self.markers
    }

    /// Check whether a single tuple passes the filter.
    pub fn accepts<Value>(&self, tuple: &[Value]) -> bool
    where
        Value: Copy + Into<StorageValue>,
    {
        tuple.len() == self.input_arity
            && self
                .constants
                .iter()
                .all(|&(position, value)| tuple[position].into() == value)
            && self
                .equalities
                .iter()
                .all(|&(first, second)| tuple[first].into() == tuple[second].into())
    }

    /// Apply the filter to the given tuples and collect the result into a [Table].
    ///
    /// Input tuples of the wrong length result in an error.
    pub fn apply<'a, Value, Tuples>(&self, tuples: Tuples) -> Result<Table, Error>
    where
        Value: 'a + Copy + Into<StorageValue>,
        Tuples: IntoIterator<Item = &'a [Value]>,
    {
        let mut result = Table::with_markers(self.markers.clone());

        for tuple in tuples {
            if tuple.len() != self.input_arity {
                return Err(Error::ArityMismatch {
                    expected: self.input_arity,
                    found: tuple.len(),
                });
            }

            if !self.accepts(tuple) {
                continue;
            }

            result.push_row_unchecked(
                self.output_positions
                    .iter()
                    .map(|&position| tuple[position].into())
                    .collect(),
            );
        }

        Ok(result)
    }
}
