//! Provides the stoichiometry matrix of a reaction network
use nalgebra::DMatrix;

use crate::reaction_network::network::ReactionNetwork;

/// Species by reaction matrix of net stoichiometric coefficients
///
/// Each row is labelled with the species index it belongs to, so a matrix restricted to a
/// subset of species still knows which species its rows describe.
#[derive(Clone, Debug, PartialEq)]
pub struct StoichiometryMatrix {
    /// Species index of every row
    pub species: Vec<usize>,
    /// Net coefficients, negative for consumption and positive for production
    pub matrix: DMatrix<i32>,
}

impl StoichiometryMatrix {
    /// Build the full stoichiometry matrix of a network
    ///
    /// A species appearing in both slots of one side accumulates, so `S0 + S0 -> S1` gives a
    /// coefficient of -2 for `S0`.
    ///
    /// # Examples
    /// ```rust
    /// use randnet_core::reaction_network::network::ReactionNetwork;
    /// use randnet_core::reaction_network::reaction::{Reaction, ReactionShape};
    /// use randnet_core::stoichiometry::matrix::StoichiometryMatrix;
    /// let mut network = ReactionNetwork::new(2);
    /// network.add_reaction(Reaction::new(ReactionShape::BiUni { reactants: [0, 0], product: 1 }, 1.0));
    /// let stoichiometry = StoichiometryMatrix::build(&network);
    /// assert_eq!(stoichiometry.shape(), (2, 1));
    /// assert_eq!(stoichiometry.matrix[(0, 0)], -2);
    /// ```
    pub fn build(network: &ReactionNetwork) -> Self {
        let mut matrix = DMatrix::<i32>::zeros(network.num_species, network.num_reactions());
        for (column, reaction) in network.reactions.iter().enumerate() {
            for reactant in reaction.reactants() {
                matrix[(*reactant, column)] -= 1;
            }
            for product in reaction.products() {
                matrix[(*product, column)] += 1;
            }
        }
        StoichiometryMatrix {
            species: (0..network.num_species).collect(),
            matrix,
        }
    }

    /// Keep only the rows of the listed species, in the order given
    ///
    /// Species without a row in this matrix are skipped.
    pub fn select_species(&self, species: &[usize]) -> Self {
        let rows = species
            .iter()
            .filter_map(|s| self.row_of(*s))
            .collect::<Vec<_>>();
        let matrix = DMatrix::from_fn(rows.len(), self.matrix.ncols(), |r, c| {
            self.matrix[(rows[r], c)]
        });
        StoichiometryMatrix {
            species: rows.iter().map(|r| self.species[*r]).collect(),
            matrix,
        }
    }

    /// (number of species, number of reactions)
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Row holding the given species, if present
    pub fn row_of(&self, species: usize) -> Option<usize> {
        self.species.iter().position(|s| *s == species)
    }

    /// Whether the matrix has no entries
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}
