//! This module defines [JoinProgram].

use liftgen_physical::{
    error::Error,
    tabular::{
        operations::{cartesian_product, join},
        table::Table,
    },
};

use crate::{components::Atom, state::RelationSource};

use super::atom_table::atom_table;

/// Sequence of tables that are combined from left to right
///
/// Each table is joined with the accumulated result on their shared columns,
/// or multiplied with it if there are none.
/// The program collapses to the empty result as soon as one of its tables is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinProgram {
    tables: Vec<Table>,
    /// Position in the input of the atom each table was built from
    order: Vec<usize>,
    collapsed: bool,
}

impl JoinProgram {
    /// Build the tables of `atoms` against `source`, in the given order.
    ///
    /// No further tables are built once a table turns out to be empty.
    pub fn build<Source>(atoms: &[Atom], order: &[usize], source: &Source) -> Result<Self, Error>
    where
        Source: RelationSource + ?Sized,
    {
        let mut program = Self::default();

        for &index in order {
            let table = atom_table(&atoms[index], source)?;
            let empty = table.is_empty();

            program.tables.push(table);
            program.order.push(index);

            if empty {
                log::trace!("{} has no matches, skipping the join", atoms[index]);
                program.collapsed = true;
                break;
            }
        }

        Ok(program)
    }

    /// Create a program from already computed tables.
    pub fn from_tables(tables: Vec<Table>) -> Self {
        let collapsed = tables.iter().any(Table::is_empty);
        let order = (0..tables.len()).collect();

        Self {
            tables,
            order,
            collapsed,
        }
    }

    /// Return the tables of this program in the order they are folded.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Return the position of the atom each table was built from.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Return whether one of the tables is empty,
    /// which makes the result empty as well.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Fold the tables into the table of all combined bindings.
    ///
    /// A program without tables evaluates to the unit table.
    pub fn evaluate(self) -> Table {
        if self.collapsed {
            return Table::default();
        }

        let mut result = Table::unit();
        for table in self.tables {
            result = combine(&result, &table);

            if result.is_empty() {
                break;
            }
        }

        result
    }
}

/// Join two tables on their shared columns
/// or compute their cartesian product if they have none.
pub fn combine(left: &Table, right: &Table) -> Table {
    if left.shared_markers(right).is_empty() {
        cartesian_product(left, right)
    } else {
        join(left, right)
    }
}

#[cfg(test)]
mod test {
    use super::JoinProgram;
    use crate::{
        components::{Atom, GroundAtom, ObjectId, PredicateId, Variable},
        state::DBState,
    };
    use test_log::test;

    fn edge(from: usize, to: usize) -> GroundAtom {
        GroundAtom::new(PredicateId(0), vec![ObjectId(from), ObjectId(to)])
    }

    #[test]
    fn self_join_keeps_occurrences_apart() {
        let state = DBState::from_atoms(1, [edge(0, 1)]);
        let atoms = vec![
            Atom::with_variables(PredicateId(0), [Variable(0), Variable(1)]),
            Atom::with_variables(PredicateId(0), [Variable(1), Variable(0)]),
        ];

        let program = JoinProgram::build(&atoms, &[0, 1], &state).unwrap();
        assert_eq!(program.tables().len(), 2);
        assert!(program.evaluate().is_empty());

        let state = DBState::from_atoms(1, [edge(0, 1), edge(1, 0)]);
        let program = JoinProgram::build(&atoms, &[0, 1], &state).unwrap();
        let mut result = program.evaluate();
        result.sort();
        assert_eq!(result.into_rows(), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn empty_relation_collapses_program() {
        let state = DBState::from_atoms(2, [GroundAtom::new(PredicateId(1), vec![ObjectId(0), ObjectId(1)])]);
        let atoms = vec![
            Atom::with_variables(PredicateId(0), [Variable(0)]),
            Atom::with_variables(PredicateId(1), [Variable(0), Variable(1)]),
        ];

        let program = JoinProgram::build(&atoms, &[0, 1], &state).unwrap();
        assert!(program.is_collapsed());
        assert_eq!(program.tables().len(), 1);
        assert!(program.evaluate().is_empty());
    }

    #[test]
    fn disjoint_tables_are_multiplied() {
        let state = DBState::from_atoms(2, [
            GroundAtom::new(PredicateId(0), vec![ObjectId(0)]),
            GroundAtom::new(PredicateId(0), vec![ObjectId(1)]),
            GroundAtom::new(PredicateId(1), vec![ObjectId(2)]),
        ]);
        let atoms = vec![
            Atom::with_variables(PredicateId(0), [Variable(0)]),
            Atom::with_variables(PredicateId(1), [Variable(1)]),
        ];

        let program = JoinProgram::build(&atoms, &[1, 0], &state).unwrap();
        assert_eq!(program.order(), &[1, 0]);

        let result = program.evaluate();
        assert_eq!(result.markers(), &[Variable(1).marker(), Variable(0).marker()]);
        assert_eq!(result.into_rows(), vec![vec![2, 0], vec![2, 1]]);

        assert_eq!(JoinProgram::build(&atoms, &[], &state).unwrap().evaluate().len(), 1);
    }
}
