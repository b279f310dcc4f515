//! Classify species by the signs of their stoichiometric coefficients
use std::fmt::{Display, Formatter};

use crate::stoichiometry::matrix::StoichiometryMatrix;

/// Structural role of a species in a network
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SpeciesRole {
    /// Both produced and consumed somewhere in the network
    Floating,
    /// Only ever produced, or only ever consumed
    Boundary,
    /// Not touched by any reaction
    Orphan,
}

impl Display for SpeciesRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeciesRole::Floating => write!(f, "floating"),
            SpeciesRole::Boundary => write!(f, "boundary"),
            SpeciesRole::Orphan => write!(f, "orphan"),
        }
    }
}

/// Partition of the species of a matrix into floating, boundary and orphan species
///
/// Every id list is sorted in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesClassification {
    pub floating_ids: Vec<usize>,
    pub boundary_ids: Vec<usize>,
    pub orphan_ids: Vec<usize>,
}

impl SpeciesClassification {
    /// Classify every row of a stoichiometry matrix
    ///
    /// Only the signs of the entries matter: a row with entries of both signs is floating, a
    /// row whose nonzero entries share one sign is boundary, and a row of zeros is an orphan.
    pub fn classify(stoichiometry: &StoichiometryMatrix) -> Self {
        let mut classification = SpeciesClassification::default();
        for (row, species) in stoichiometry.matrix.row_iter().zip(&stoichiometry.species) {
            let plus_count = row.iter().filter(|v| **v > 0).count();
            let minus_count = row.iter().filter(|v| **v < 0).count();
            match role_from_counts(plus_count, minus_count) {
                SpeciesRole::Floating => classification.floating_ids.push(*species),
                SpeciesRole::Boundary => classification.boundary_ids.push(*species),
                SpeciesRole::Orphan => classification.orphan_ids.push(*species),
            }
        }
        classification.floating_ids.sort_unstable();
        classification.boundary_ids.sort_unstable();
        classification.orphan_ids.sort_unstable();
        classification
    }

    /// Role of a species, None if the species wasn't classified
    pub fn role_of(&self, species: usize) -> Option<SpeciesRole> {
        if self.floating_ids.binary_search(&species).is_ok() {
            Some(SpeciesRole::Floating)
        } else if self.boundary_ids.binary_search(&species).is_ok() {
            Some(SpeciesRole::Boundary)
        } else if self.orphan_ids.binary_search(&species).is_ok() {
            Some(SpeciesRole::Orphan)
        } else {
            None
        }
    }

    /// Total number of classified species
    pub fn num_species(&self) -> usize {
        self.floating_ids.len() + self.boundary_ids.len() + self.orphan_ids.len()
    }
}

fn role_from_counts(plus_count: usize, minus_count: usize) -> SpeciesRole {
    match (plus_count, minus_count) {
        (0, 0) => SpeciesRole::Orphan,
        (0, _) | (_, 0) => SpeciesRole::Boundary,
        _ => SpeciesRole::Floating,
    }
}

/// Restrict a stoichiometry matrix to its floating species
///
/// The result has no rows when the network has no floating species.
pub fn remove_boundary_rows(
    stoichiometry: &StoichiometryMatrix,
    classification: &SpeciesClassification,
) -> StoichiometryMatrix {
    stoichiometry.select_species(&classification.floating_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction_network::network::ReactionNetwork;
    use crate::reaction_network::reaction::{Reaction, ReactionShape};

    fn uni_uni(reactant: usize, product: usize) -> Reaction {
        Reaction::new(ReactionShape::UniUni { reactant, product }, 1.0)
    }

    #[test]
    fn classify_chain() {
        // S0 -> S1 -> S2, S3 untouched
        let mut network = ReactionNetwork::new(4);
        network.add_reaction(uni_uni(0, 1));
        network.add_reaction(uni_uni(1, 2));
        let classification = SpeciesClassification::classify(&StoichiometryMatrix::build(&network));
        assert_eq!(classification.floating_ids, vec![1]);
        assert_eq!(classification.boundary_ids, vec![0, 2]);
        assert_eq!(classification.orphan_ids, vec![3]);
        assert_eq!(classification.role_of(0), Some(SpeciesRole::Boundary));
        assert_eq!(classification.role_of(1), Some(SpeciesRole::Floating));
        assert_eq!(classification.role_of(3), Some(SpeciesRole::Orphan));
        assert_eq!(classification.role_of(4), None);
    }

    #[test]
    fn only_consumed_species_is_boundary() {
        let mut network = ReactionNetwork::new(3);
        network.add_reaction(uni_uni(0, 1));
        network.add_reaction(Reaction::new(
            ReactionShape::BiUni {
                reactants: [0, 1],
                product: 2,
            },
            1.0,
        ));
        network.add_reaction(uni_uni(2, 1));
        let classification = SpeciesClassification::classify(&StoichiometryMatrix::build(&network));
        assert_eq!(classification.role_of(0), Some(SpeciesRole::Boundary));
        assert_eq!(classification.floating_ids, vec![1, 2]);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut network = ReactionNetwork::new(5);
        network.add_reaction(uni_uni(0, 1));
        network.add_reaction(uni_uni(1, 0));
        network.add_reaction(uni_uni(3, 1));
        let stoichiometry = StoichiometryMatrix::build(&network);
        let first = SpeciesClassification::classify(&stoichiometry);
        let second = SpeciesClassification::classify(&stoichiometry);
        assert_eq!(first, second);
        assert_eq!(first.num_species(), 5);
    }

    #[test]
    fn remove_boundary() {
        // One boundary source S0 feeding a cycle of four floating species
        let mut network = ReactionNetwork::new(5);
        network.add_reaction(uni_uni(0, 1));
        network.add_reaction(uni_uni(1, 2));
        network.add_reaction(uni_uni(2, 3));
        network.add_reaction(uni_uni(3, 4));
        network.add_reaction(uni_uni(4, 1));
        let stoichiometry = StoichiometryMatrix::build(&network);
        let classification = SpeciesClassification::classify(&stoichiometry);
        assert_eq!(classification.boundary_ids, vec![0]);
        let reduced = remove_boundary_rows(&stoichiometry, &classification);
        assert_eq!(reduced.shape(), (4, 5));
        assert_eq!(reduced.species, vec![1, 2, 3, 4]);
        // The reduced matrix keeps the same classification for what is left
        assert_eq!(
            SpeciesClassification::classify(&reduced).floating_ids,
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn no_floating_species() {
        let mut network = ReactionNetwork::new(2);
        network.add_reaction(uni_uni(0, 1));
        let stoichiometry = StoichiometryMatrix::build(&network);
        let classification = SpeciesClassification::classify(&stoichiometry);
        let reduced = remove_boundary_rows(&stoichiometry, &classification);
        assert_eq!(reduced.shape(), (0, 1));
        assert!(reduced.is_empty());
    }
}
