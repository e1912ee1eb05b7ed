//! This module defines [FactStore].

use std::collections::BTreeSet;

use crate::{
    components::{GroundAtom, PredicateId},
    state::{RelationSource, Tuple},
};

/// Set of ground facts over the predicates of a Datalog program
///
/// Nullary facts are stored as the empty tuple of their predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactStore {
    relations: Vec<BTreeSet<Tuple>>,
}

impl FactStore {
    /// Create a new empty [FactStore].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact.
    ///
    /// Returns `true` if the fact was not present before.
    pub fn insert(&mut self, atom: GroundAtom) -> bool {
        let predicate = atom.predicate().0;
        if predicate >= self.relations.len() {
            self.relations.resize_with(predicate + 1, BTreeSet::new);
        }

        self.relations[predicate].insert(atom.into_arguments())
    }

    /// Return whether the given fact is present.
    pub fn contains(&self, atom: &GroundAtom) -> bool {
        self.relations
            .get(atom.predicate().0)
            .is_some_and(|tuples| tuples.contains(atom.arguments()))
    }

    /// Return the number of facts.
    pub fn len(&self) -> usize {
        self.relations.iter().map(BTreeSet::len).sum()
    }

    /// Return whether there are no facts.
    pub fn is_empty(&self) -> bool {
        self.relations.iter().all(BTreeSet::is_empty)
    }

    /// Iterate over all facts, ordered by predicate and then by arguments.
    pub fn facts(&self) -> impl Iterator<Item = GroundAtom> + '_ {
        self.relations
            .iter()
            .enumerate()
            .flat_map(|(predicate, tuples)| {
                tuples
                    .iter()
                    .map(move |tuple| GroundAtom::new(PredicateId(predicate), tuple.clone()))
            })
    }
}

impl FromIterator<GroundAtom> for FactStore {
    fn from_iter<Atoms: IntoIterator<Item = GroundAtom>>(iter: Atoms) -> Self {
        let mut store = Self::new();
        for atom in iter {
            store.insert(atom);
        }

        store
    }
}

impl Extend<GroundAtom> for FactStore {
    fn extend<Atoms: IntoIterator<Item = GroundAtom>>(&mut self, iter: Atoms) {
        for atom in iter {
            self.insert(atom);
        }
    }
}

impl RelationSource for FactStore {
    fn tuples(&self, predicate: PredicateId) -> Option<&BTreeSet<Tuple>> {
        self.relations.get(predicate.0)
    }

    fn holds_nullary(&self, predicate: PredicateId) -> bool {
        self.relations
            .get(predicate.0)
            .is_some_and(|tuples| tuples.contains(&Tuple::new()))
    }
}
