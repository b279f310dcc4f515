//! This module provides the ReactionNetwork struct, an ordered list of reactions over a fixed
//! species pool
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::reaction_network::reaction::Reaction;

/// Name used for a species index in serialized output
pub fn species_name(index: usize) -> String {
    format!("S{}", index)
}

/// Represents a reaction network over species `S0..S<num_species-1>`
///
/// The order of `reactions` is the order they are serialized in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    /// Size of the species pool
    pub num_species: usize,
    /// Reactions of the network, in insertion order
    pub reactions: Vec<Reaction>,
}

impl ReactionNetwork {
    /// Create a network without any reactions
    pub fn new(num_species: usize) -> Self {
        ReactionNetwork {
            num_species,
            reactions: Vec::new(),
        }
    }

    /// Add a reaction to the end of the network
    ///
    /// # Examples
    /// ```rust
    /// use randnet_core::reaction_network::network::ReactionNetwork;
    /// use randnet_core::reaction_network::reaction::{Reaction, ReactionShape};
    /// let mut network = ReactionNetwork::new(2);
    /// network.add_reaction(Reaction::new(ReactionShape::UniUni { reactant: 0, product: 1 }, 0.3));
    /// assert_eq!(network.num_reactions(), 1);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    pub fn num_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Check that every reaction only references species in the pool
    pub fn is_well_formed(&self) -> bool {
        self.reactions
            .iter()
            .all(|r| r.max_species() < self.num_species)
    }
}

impl Display for ReactionNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, reaction) in self.reactions.iter().enumerate() {
            writeln!(f, "J{}: {}", index, reaction)?;
        }
        Ok(())
    }
}
