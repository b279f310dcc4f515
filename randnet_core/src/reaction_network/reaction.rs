//! This module provides the types representing a single mass-action reaction
use std::fmt::{Display, Formatter};
use std::slice;

use serde::{Deserialize, Serialize};

use super::network::species_name;

/// The four reaction shapes the generator can produce
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReactionType {
    /// One reactant, one product
    UniUni,
    /// Two reactants, one product
    BiUni,
    /// One reactant, two products
    UniBi,
    /// Two reactants, two products
    BiBi,
}

impl ReactionType {
    /// All reaction types, in the order used for cumulative sampling
    pub const ALL: [ReactionType; 4] = [
        ReactionType::UniUni,
        ReactionType::BiUni,
        ReactionType::UniBi,
        ReactionType::BiBi,
    ];

    /// Number of reactant slots
    pub fn num_reactants(&self) -> usize {
        match self {
            ReactionType::UniUni | ReactionType::UniBi => 1,
            ReactionType::BiUni | ReactionType::BiBi => 2,
        }
    }

    /// Number of product slots
    pub fn num_products(&self) -> usize {
        match self {
            ReactionType::UniUni | ReactionType::BiUni => 1,
            ReactionType::UniBi | ReactionType::BiBi => 2,
        }
    }
}

impl Display for ReactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionType::UniUni => write!(f, "UniUni"),
            ReactionType::BiUni => write!(f, "BiUni"),
            ReactionType::UniBi => write!(f, "UniBi"),
            ReactionType::BiBi => write!(f, "BiBi"),
        }
    }
}

/// Species taking part in a reaction, as indices into the species pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionShape {
    /// `A -> B`
    UniUni { reactant: usize, product: usize },
    /// `A + B -> C`
    BiUni { reactants: [usize; 2], product: usize },
    /// `A -> B + C`
    UniBi { reactant: usize, products: [usize; 2] },
    /// `A + B -> C + D`
    BiBi {
        reactants: [usize; 2],
        products: [usize; 2],
    },
}

/// Represents a single irreversible mass-action reaction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reactant and product species
    pub shape: ReactionShape,
    /// Forward rate constant, always positive
    pub rate_constant: f64,
}

impl Reaction {
    pub fn new(shape: ReactionShape, rate_constant: f64) -> Self {
        Reaction {
            shape,
            rate_constant,
        }
    }

    /// Create a reaction of the given type from reactant and product slices
    ///
    /// Returns None if the slice lengths don't match the reaction type.
    pub fn from_parts(
        reaction_type: ReactionType,
        reactants: &[usize],
        products: &[usize],
        rate_constant: f64,
    ) -> Option<Self> {
        let shape = match (reaction_type, reactants, products) {
            (ReactionType::UniUni, &[reactant], &[product]) => {
                ReactionShape::UniUni { reactant, product }
            }
            (ReactionType::BiUni, &[r1, r2], &[product]) => ReactionShape::BiUni {
                reactants: [r1, r2],
                product,
            },
            (ReactionType::UniBi, &[reactant], &[p1, p2]) => ReactionShape::UniBi {
                reactant,
                products: [p1, p2],
            },
            (ReactionType::BiBi, &[r1, r2], &[p1, p2]) => ReactionShape::BiBi {
                reactants: [r1, r2],
                products: [p1, p2],
            },
            _ => return None,
        };
        Some(Reaction::new(shape, rate_constant))
    }

    /// Which of the four shapes this reaction has
    pub fn reaction_type(&self) -> ReactionType {
        match self.shape {
            ReactionShape::UniUni { .. } => ReactionType::UniUni,
            ReactionShape::BiUni { .. } => ReactionType::BiUni,
            ReactionShape::UniBi { .. } => ReactionType::UniBi,
            ReactionShape::BiBi { .. } => ReactionType::BiBi,
        }
    }

    /// Reactant species indices, in slot order
    pub fn reactants(&self) -> &[usize] {
        match &self.shape {
            ReactionShape::UniUni { reactant, .. } | ReactionShape::UniBi { reactant, .. } => {
                slice::from_ref(reactant)
            }
            ReactionShape::BiUni { reactants, .. } | ReactionShape::BiBi { reactants, .. } => {
                reactants
            }
        }
    }

    /// Product species indices, in slot order
    pub fn products(&self) -> &[usize] {
        match &self.shape {
            ReactionShape::UniUni { product, .. } | ReactionShape::BiUni { product, .. } => {
                slice::from_ref(product)
            }
            ReactionShape::UniBi { products, .. } | ReactionShape::BiBi { products, .. } => {
                products
            }
        }
    }

    /// Whether no species appears on both sides of the reaction
    pub fn conserves_mass(&self) -> bool {
        self.reactants()
            .iter()
            .all(|reactant| !self.products().contains(reactant))
    }

    /// Largest species index referenced by the reaction
    pub fn max_species(&self) -> usize {
        self.reactants()
            .iter()
            .chain(self.products())
            .copied()
            .max()
            .unwrap_or_default()
    }
}

impl Display for Reaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}",
            join_species(self.reactants()),
            join_species(self.products())
        )
    }
}

/// Join species names with " + "
fn join_species(species: &[usize]) -> String {
    species
        .iter()
        .map(|s| species_name(*s))
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reactants_and_products() {
        let reaction = Reaction::new(
            ReactionShape::BiUni {
                reactants: [0, 0],
                product: 3,
            },
            0.5,
        );
        assert_eq!(reaction.reaction_type(), ReactionType::BiUni);
        assert_eq!(reaction.reactants(), &[0, 0]);
        assert_eq!(reaction.products(), &[3]);
        assert_eq!(reaction.max_species(), 3);
        assert!(reaction.conserves_mass());

        let reaction = Reaction::new(
            ReactionShape::UniBi {
                reactant: 2,
                products: [1, 2],
            },
            0.5,
        );
        assert_eq!(reaction.reactants(), &[2]);
        assert_eq!(reaction.products(), &[1, 2]);
        assert!(!reaction.conserves_mass());
    }

    #[test]
    fn from_parts() {
        let reaction = Reaction::from_parts(ReactionType::BiBi, &[0, 1], &[2, 3], 1.0).unwrap();
        assert_eq!(
            reaction.shape,
            ReactionShape::BiBi {
                reactants: [0, 1],
                products: [2, 3]
            }
        );
        // Slice lengths have to match the reaction type
        assert!(Reaction::from_parts(ReactionType::UniUni, &[0, 1], &[2], 1.0).is_none());
        assert!(Reaction::from_parts(ReactionType::UniBi, &[0], &[2], 1.0).is_none());
    }

    #[test]
    fn slot_counts() {
        for reaction_type in ReactionType::ALL {
            let reactants = vec![0; reaction_type.num_reactants()];
            let products = vec![1; reaction_type.num_products()];
            let reaction = Reaction::from_parts(reaction_type, &reactants, &products, 1.0).unwrap();
            assert_eq!(reaction.reaction_type(), reaction_type);
        }
    }

    #[test]
    fn display() {
        let reaction = Reaction::from_parts(ReactionType::BiBi, &[0, 4], &[2, 2], 1.0).unwrap();
        assert_eq!(format!("{}", reaction), "S0 + S4 -> S2 + S2");
        assert_eq!(format!("{}", ReactionType::UniBi), "UniBi");
    }
}
