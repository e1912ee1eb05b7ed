//! This module defines [DBState], the relational representation of a planning state.

use std::collections::BTreeSet;

use bitvec::vec::BitVec;

use crate::components::{GroundAtom, ObjectId, PredicateId};

/// A tuple of objects
pub type Tuple = Vec<ObjectId>;

/// Anything that stores relations over objects, indexed by predicate
pub trait RelationSource {
    /// Return the tuples of a predicate with positive arity.
    ///
    /// Returns `None` if nothing is known about the predicate.
    fn tuples(&self, predicate: PredicateId) -> Option<&BTreeSet<Tuple>>;

    /// Return whether the nullary atom of the given predicate holds.
    fn holds_nullary(&self, predicate: PredicateId) -> bool;
}

/// The set of tuples of one predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    predicate: PredicateId,
    tuples: BTreeSet<Tuple>,
}

impl Relation {
    /// Create a new empty [Relation].
    pub fn new(predicate: PredicateId) -> Self {
        Self {
            predicate,
            tuples: BTreeSet::new(),
        }
    }

    /// Return the predicate of this relation.
    pub fn predicate(&self) -> PredicateId {
        self.predicate
    }

    /// Return the tuples of this relation.
    pub fn tuples(&self) -> &BTreeSet<Tuple> {
        &self.tuples
    }

    /// Return the number of tuples.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// Return whether the relation contains no tuple.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// A planning state given as one relation per predicate
/// and a flat bit vector for the nullary predicates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DBState {
    relations: Vec<Relation>,
    nullary_atoms: BitVec,
}

impl DBState {
    /// Create a new empty state over the given number of predicates.
    pub fn new(num_predicates: usize) -> Self {
        Self {
            relations: (0..num_predicates)
                .map(|index| Relation::new(PredicateId(index)))
                .collect(),
            nullary_atoms: BitVec::repeat(false, num_predicates),
        }
    }

    /// Create a state over the given number of predicates containing the given atoms.
    pub fn from_atoms<Atoms>(num_predicates: usize, atoms: Atoms) -> Self
    where
        Atoms: IntoIterator<Item = GroundAtom>,
    {
        let mut state = Self::new(num_predicates);
        for atom in atoms {
            state.insert(atom);
        }

        state
    }

    /// Make room for the given predicate.
    fn reserve(&mut self, predicate: PredicateId) {
        if predicate.0 >= self.relations.len() {
            for index in self.relations.len()..=predicate.0 {
                self.relations.push(Relation::new(PredicateId(index)));
            }
            self.nullary_atoms.resize(predicate.0 + 1, false);
        }
    }

    /// Add an atom to the state.
    ///
    /// Returns `true` if the atom was not present before.
    pub fn insert(&mut self, atom: GroundAtom) -> bool {
        let predicate = atom.predicate();
        self.reserve(predicate);

        if atom.arity() == 0 {
            let previous = self.nullary_atoms[predicate.0];
            self.nullary_atoms.set(predicate.0, true);
            !previous
        } else {
            self.relations[predicate.0]
                .tuples
                .insert(atom.into_arguments())
        }
    }

    /// Remove an atom from the state.
    ///
    /// Returns `true` if the atom was present before.
    pub fn remove(&mut self, atom: &GroundAtom) -> bool {
        let predicate = atom.predicate();
        if predicate.0 >= self.relations.len() {
            return false;
        }

        if atom.arity() == 0 {
            let previous = self.nullary_atoms[predicate.0];
            self.nullary_atoms.set(predicate.0, false);
            previous
        } else {
            self.relations[predicate.0].tuples.remove(atom.arguments())
        }
    }

    /// Return whether the state contains the given atom.
    pub fn contains(&self, atom: &GroundAtom) -> bool {
        if atom.arity() == 0 {
            self.holds_nullary(atom.predicate())
        } else {
            self.relation(atom.predicate())
                .is_some_and(|relation| relation.tuples.contains(atom.arguments()))
        }
    }

    /// Return the relation of the given predicate.
    pub fn relation(&self, predicate: PredicateId) -> Option<&Relation> {
        self.relations.get(predicate.0)
    }

    /// Return all relations, indexed by predicate.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Return the truth values of the nullary predicates, indexed by predicate.
    pub fn nullary_atoms(&self) -> &BitVec {
        &self.nullary_atoms
    }

    /// Return an iterator over all atoms that hold in this state.
    pub fn atoms(&self) -> impl Iterator<Item = GroundAtom> + '_ {
        let nullary = self
            .nullary_atoms
            .iter_ones()
            .map(|index| GroundAtom::new(PredicateId(index), Vec::new()));
        let relations = self.relations.iter().flat_map(|relation| {
            relation
                .tuples
                .iter()
                .map(|tuple| GroundAtom::new(relation.predicate, tuple.clone()))
        });

        nullary.chain(relations)
    }
}

impl RelationSource for DBState {
    fn tuples(&self, predicate: PredicateId) -> Option<&BTreeSet<Tuple>> {
        self.relation(predicate).map(Relation::tuples)
    }

    fn holds_nullary(&self, predicate: PredicateId) -> bool {
        self.nullary_atoms
            .get(predicate.0)
            .is_some_and(|bit| *bit)
    }
}
