//! This module implements a single application of a primitive [Rule] to a set of facts.

use liftgen_physical::{error::Error, tabular::table::Table};

use crate::{
    components::{GroundAtom, ObjectId, Variable},
    datalog::rules::{Condition, Rule, RuleTemplate, Weight},
    state::RelationSource,
};

use super::{
    atom_table::atom_table,
    join_program::{combine, JoinProgram},
};

/// A ground atom derived by a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Derivation {
    /// The derived atom
    pub atom: GroundAtom,
    /// Weight of the deriving rule
    pub weight: Weight,
    /// Template of the deriving rule
    pub template: RuleTemplate,
}

/// Compute the bindings of a single condition.
fn condition_table<Source>(condition: &Condition, source: &Source) -> Result<Table, Error>
where
    Source: RelationSource + ?Sized,
{
    match condition {
        Condition::Atom(atom) => atom_table(atom, source),
        Condition::Join(joined) => {
            let left = condition_table(joined.left(), source)?;
            if left.is_empty() {
                return Ok(left);
            }
            let right = condition_table(joined.right(), source)?;

            Ok(combine(&left, &right))
        }
    }
}

impl<A> Rule<A> {
    /// Compute the table of all bindings of the body of this rule.
    pub fn body_table<Source>(&self, source: &Source) -> Result<Table, Error>
    where
        Source: RelationSource + ?Sized,
    {
        match self {
            Rule::Project(body) | Rule::Join(body) => match body.conditions() {
                [condition] => condition_table(condition, source),
                conditions => {
                    let tables = conditions
                        .iter()
                        .map(|condition| condition_table(condition, source))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(JoinProgram::from_tables(tables).evaluate())
                }
            },
            Rule::Product(body) => {
                let mut tables = Vec::with_capacity(body.conditions().len());
                for condition in body.conditions() {
                    let table = condition_table(condition, source)?;
                    let empty = table.is_empty();
                    tables.push(table);

                    if empty {
                        break;
                    }
                }

                Ok(JoinProgram::from_tables(tables).evaluate())
            }
        }
    }

    /// Apply this rule once to the given facts.
    ///
    /// Returns every effect atom obtained from a binding of the body,
    /// sorted and without duplicates.
    pub fn derive<Source>(&self, source: &Source) -> Result<Vec<Derivation>, Error>
    where
        Source: RelationSource + ?Sized,
    {
        let table = self.body_table(source)?;
        if table.is_empty() {
            return Ok(Vec::new());
        }

        let columns = self
            .effect()
            .variables()
            .into_iter()
            .map(|variable| {
                table
                    .column(variable.marker())
                    .map(|column| (variable, column))
                    .ok_or(Error::UnknownColumnMarker(variable.marker()))
            })
            .collect::<Result<Vec<(Variable, usize)>, Error>>()?;

        let mut result = Vec::with_capacity(table.len());
        for row in table.rows() {
            let atom = self.effect().ground(|variable| {
                columns
                    .iter()
                    .find(|(current, _)| *current == variable)
                    .map(|&(_, column)| ObjectId(row[column]))
            });

            if let Some(atom) = atom {
                result.push(Derivation {
                    atom,
                    weight: self.weight(),
                    template: self.template(),
                });
            }
        }

        result.sort_unstable();
        result.dedup();

        log::trace!("{self} derived {} atoms", result.len());
        Ok(result)
    }
}
