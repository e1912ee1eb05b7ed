//! This module converts atoms into [Table]s.

use liftgen_physical::{
    error::Error,
    tabular::{
        operations::{ColumnSelection, TupleFilter},
        table::Table,
    },
};

use crate::{
    components::{Argument, Atom},
    state::RelationSource,
};

/// Compute the selection that turns the tuples of the atom's predicate into its bindings.
fn atom_selection(atom: &Atom) -> Vec<ColumnSelection> {
    atom.arguments()
        .iter()
        .map(|argument| match argument {
            Argument::Object(object) => ColumnSelection::Constant((*object).into()),
            Argument::Variable(variable) => ColumnSelection::Bind(variable.marker()),
        })
        .collect()
}

/// Return the table of all bindings of the variables of `atom`
/// that turn it into a tuple of `source`.
///
/// Every variable is one column, in order of first occurrence.
/// Repeated variables and objects in the atom restrict the tuples accordingly.
/// A nullary atom results in the unit table if it holds and in the empty table otherwise.
pub fn atom_table<Source>(atom: &Atom, source: &Source) -> Result<Table, Error>
where
    Source: RelationSource + ?Sized,
{
    if atom.is_nullary() {
        return Ok(if source.holds_nullary(atom.predicate()) {
            Table::unit()
        } else {
            Table::default()
        });
    }

    let filter = TupleFilter::new(&atom_selection(atom));
    let result = filter.apply(
        source
            .tuples(atom.predicate())
            .into_iter()
            .flatten()
            .map(Vec::as_slice),
    )?;

    log::trace!("{atom} matches {} tuples", result.len());
    Ok(result)
}
