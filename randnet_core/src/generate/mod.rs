//! Module running the full generation pipeline: sample reactions, build the stoichiometry
//! matrix, classify species and serialize the result
pub mod builder;
pub mod linear_chain;
pub mod sampler;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::configuration::{ConfigurationError, NetworkConfig, Settings};
use crate::generate::builder::{GenerationError, ReactionListBuilder};
use crate::generate::linear_chain::linear_chain;
use crate::io::antimony::{to_antimony, AntimonyModel};
use crate::reaction_network::network::ReactionNetwork;
use crate::stoichiometry::classify::{remove_boundary_rows, SpeciesClassification};
use crate::stoichiometry::matrix::StoichiometryMatrix;

/// Everything produced by a single generation call
#[derive(Clone, Debug)]
pub struct SynthesizedNetwork {
    /// The generated reactions
    pub network: ReactionNetwork,
    /// Full stoichiometry matrix, one row per species in the pool
    pub stoichiometry: StoichiometryMatrix,
    /// Roles of the species in `stoichiometry`
    pub classification: SpeciesClassification,
    /// Antimony model, empty if boundary species were removed and nothing floats
    pub antimony: AntimonyModel,
}

impl SynthesizedNetwork {
    /// Antimony text of the network
    pub fn antimony_text(&self) -> String {
        self.antimony.to_string()
    }

    /// Stoichiometry matrix restricted to floating species
    pub fn reduced_stoichiometry(&self) -> StoichiometryMatrix {
        remove_boundary_rows(&self.stoichiometry, &self.classification)
    }
}

/// Generate a random network, seeding the generator from `config.random_seed`
///
/// # Examples
/// ```rust
/// use randnet_core::configuration::{NetworkConfigBuilder, Settings};
/// use randnet_core::generate::synthesize;
/// let config = NetworkConfigBuilder::default()
///     .num_species(6)
///     .num_reactions(8)
///     .random_seed(Some(42))
///     .build()
///     .unwrap();
/// let synthesized = synthesize(&config, &Settings::default()).unwrap();
/// assert_eq!(synthesized.stoichiometry.shape(), (6, 8));
/// ```
pub fn synthesize(
    config: &NetworkConfig,
    settings: &Settings,
) -> Result<SynthesizedNetwork, NetworkError> {
    let mut rng = seeded_rng(config.random_seed);
    synthesize_with_rng(config, settings, &mut rng)
}

/// Generate a random network using a caller supplied random number generator
///
/// `config.random_seed` is ignored.
pub fn synthesize_with_rng<R: Rng + ?Sized>(
    config: &NetworkConfig,
    settings: &Settings,
    rng: &mut R,
) -> Result<SynthesizedNetwork, NetworkError> {
    config.validate()?;
    settings.validate()?;
    log::debug!(
        "Generating network with {} species and {} reactions",
        config.num_species,
        config.num_reactions
    );
    let network =
        ReactionListBuilder::new(config.num_species, settings).generate(config.num_reactions, rng)?;
    Ok(assemble(network, config.is_reversible, settings, rng))
}

/// Generate a random network and return its Antimony text
///
/// The text is empty when `settings.remove_boundary_species` is set and the network has no
/// floating species.
pub fn get_random_network(
    config: &NetworkConfig,
    settings: &Settings,
) -> Result<String, NetworkError> {
    Ok(synthesize(config, settings)?.antimony_text())
}

/// Generate a random network and return only its stoichiometry matrix
///
/// The matrix is restricted to floating species when `settings.remove_boundary_species` is
/// set, in which case it may have no rows.
pub fn get_stoichiometry_matrix(
    config: &NetworkConfig,
    settings: &Settings,
) -> Result<StoichiometryMatrix, NetworkError> {
    let synthesized = synthesize(config, settings)?;
    if settings.remove_boundary_species {
        Ok(synthesized.reduced_stoichiometry())
    } else {
        Ok(synthesized.stoichiometry)
    }
}

/// Generate a linear chain of `length` reactions and return its Antimony text
pub fn get_linear_chain(
    length: usize,
    rate_constant_max: f64,
    random_seed: Option<u64>,
    settings: &Settings,
) -> Result<String, NetworkError> {
    settings.validate()?;
    let mut rng = seeded_rng(random_seed);
    let network = linear_chain(length, rate_constant_max, &mut rng)?;
    Ok(assemble(network, false, settings, &mut rng).antimony_text())
}

/// Matrix, classification and serialization of a generated network
fn assemble<R: Rng + ?Sized>(
    network: ReactionNetwork,
    is_reversible: bool,
    settings: &Settings,
    rng: &mut R,
) -> SynthesizedNetwork {
    let stoichiometry = StoichiometryMatrix::build(&network);
    let classification = SpeciesClassification::classify(&stoichiometry);
    log::debug!(
        "Classified {} floating, {} boundary and {} orphan species",
        classification.floating_ids.len(),
        classification.boundary_ids.len(),
        classification.orphan_ids.len()
    );
    let antimony = to_antimony(&network, &classification, is_reversible, settings, rng);
    SynthesizedNetwork {
        network,
        stoichiometry,
        classification,
        antimony,
    }
}

/// ChaCha8 generator seeded from `seed`, or from entropy when None
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Errors returned by the generation entry points
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Invalid settings or network configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// A reaction could not be generated
    #[error("Network generation failed: {0}")]
    Generation(#[from] GenerationError),
}
