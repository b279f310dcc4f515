//! Core rust implementation of randnet, a crate for generating random mass-action reaction
//! networks and writing them out as Antimony models.

pub mod configuration;
pub mod generate;
pub mod io;
pub mod reaction_network;
pub mod stoichiometry;

pub use configuration::{NetworkConfig, ReactionProbabilities, Settings};
pub use generate::{
    get_linear_chain, get_random_network, get_stoichiometry_matrix, synthesize, NetworkError,
};
