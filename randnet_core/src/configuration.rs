//! Configuration for random network generation
//!
//! Both [`Settings`] and [`NetworkConfig`] are plain values handed to the generation entry
//! points, so independent generation calls never share mutable state.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reaction_network::reaction::ReactionType;

/// Tolerance used when checking that the reaction probabilities sum to one
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

/// Probability of drawing each of the four reaction shapes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionProbabilities {
    /// One reactant, one product
    pub uni_uni: f64,
    /// Two reactants, one product
    pub bi_uni: f64,
    /// One reactant, two products
    pub uni_bi: f64,
    /// Two reactants, two products
    pub bi_bi: f64,
}

impl ReactionProbabilities {
    pub fn new(uni_uni: f64, bi_uni: f64, uni_bi: f64, bi_bi: f64) -> Self {
        ReactionProbabilities {
            uni_uni,
            bi_uni,
            uni_bi,
            bi_bi,
        }
    }

    /// Probability associated with a reaction type
    pub fn get(&self, reaction_type: ReactionType) -> f64 {
        match reaction_type {
            ReactionType::UniUni => self.uni_uni,
            ReactionType::BiUni => self.bi_uni,
            ReactionType::UniBi => self.uni_bi,
            ReactionType::BiBi => self.bi_bi,
        }
    }

    /// Sum of the four probabilities
    pub fn total(&self) -> f64 {
        self.uni_uni + self.bi_uni + self.uni_bi + self.bi_bi
    }

    /// Check that every probability lies in [0, 1]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for reaction_type in ReactionType::ALL {
            let value = self.get(reaction_type);
            if !value.is_finite() || !(0f64..=1f64).contains(&value) {
                return Err(ConfigurationError::ProbabilityOutOfRange {
                    reaction_type,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for ReactionProbabilities {
    fn default() -> Self {
        ReactionProbabilities::new(0.35, 0.30, 0.30, 0.05)
    }
}

/// Tunable settings read by the network generator and serializer
///
/// # Examples
/// ```rust
/// use randnet_core::configuration::{ReactionProbabilities, SettingsBuilder};
/// let settings = SettingsBuilder::default()
///     .rate_constant_scale(10.0)
///     .reaction_probabilities(ReactionProbabilities::new(0.25, 0.25, 0.25, 0.25))
///     .add_degradation_steps(true)
///     .build()
///     .unwrap();
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(private, name = "build_unchecked"))]
pub struct Settings {
    /// Upper bound of the uniformly drawn rate constants
    #[builder(default = "1.0")]
    pub rate_constant_scale: f64,
    /// Probabilities used to pick the shape of each reaction
    #[builder(default = "ReactionProbabilities::default()")]
    pub reaction_probabilities: ReactionProbabilities,
    /// Whether products may be drawn from the species consumed by the same reaction
    #[builder(default = "false")]
    pub allow_mass_violating_reactions: bool,
    /// Whether a first order decay step is appended for every floating species
    #[builder(default = "false")]
    pub add_degradation_steps: bool,
    /// Whether boundary species are dropped from the returned stoichiometry matrix
    ///
    /// ### Note
    /// When set and no floating species are left, generation yields an empty model.
    #[builder(default = "true")]
    pub remove_boundary_species: bool,
    /// Whether every rate law is multiplied by an activity factor `E<j>`
    #[builder(default = "true")]
    pub use_activity_factors: bool,
}

impl Settings {
    /// Check the settings for values generation can't work with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.rate_constant_scale.is_finite() || self.rate_constant_scale <= 0f64 {
            return Err(ConfigurationError::InvalidRateConstantScale(
                self.rate_constant_scale,
            ));
        }
        self.reaction_probabilities.validate()?;
        let total = self.reaction_probabilities.total();
        if (total - 1f64).abs() > PROBABILITY_SUM_TOLERANCE {
            log::warn!(
                "Reaction probabilities sum to {}, treating them as cumulative thresholds",
                total
            );
        }
        Ok(())
    }
}

impl SettingsBuilder {
    /// Build the settings, rejecting anything [`Settings::validate`] rejects
    pub fn build(&self) -> Result<Settings, SettingsBuilderError> {
        let settings = self.build_unchecked()?;
        settings
            .validate()
            .map_err(|e| SettingsBuilderError::ValidationError(e.to_string()))?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rate_constant_scale: 1.0,
            reaction_probabilities: ReactionProbabilities::default(),
            allow_mass_violating_reactions: false,
            add_degradation_steps: false,
            remove_boundary_species: true,
            use_activity_factors: true,
        }
    }
}

/// Size and seeding of a single generation call
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(private, name = "build_unchecked"))]
pub struct NetworkConfig {
    /// Number of species in the pool reactions draw from
    pub num_species: usize,
    /// Number of reactions to generate
    pub num_reactions: usize,
    /// Whether rate laws include a reverse term
    #[builder(default = "false")]
    pub is_reversible: bool,
    /// Seed for the random number generator, entropy is used when None
    #[builder(default = "None")]
    pub random_seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(num_species: usize, num_reactions: usize) -> Self {
        NetworkConfig {
            num_species,
            num_reactions,
            is_reversible: false,
            random_seed: None,
        }
    }

    /// Check that the configuration describes a network that can be generated
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.num_species == 0 {
            return Err(ConfigurationError::NoSpecies);
        }
        Ok(())
    }
}

impl NetworkConfigBuilder {
    /// Build the configuration, rejecting anything [`NetworkConfig::validate`] rejects
    pub fn build(&self) -> Result<NetworkConfig, NetworkConfigBuilderError> {
        let config = self.build_unchecked()?;
        config
            .validate()
            .map_err(|e| NetworkConfigBuilderError::ValidationError(e.to_string()))?;
        Ok(config)
    }
}

/// Errors associated with invalid configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A reaction probability outside of [0, 1]
    #[error("Probability for {reaction_type} reactions must be in [0, 1], found {value}")]
    ProbabilityOutOfRange {
        reaction_type: ReactionType,
        value: f64,
    },
    /// A rate constant scale which is not strictly positive
    #[error("Rate constant scale must be positive and finite, found {0}")]
    InvalidRateConstantScale(f64),
    /// A network without any species
    #[error("Number of species must be greater than zero")]
    NoSpecies,
    /// A linear chain without any steps
    #[error("Linear chain must contain at least one reaction")]
    EmptyChain,
}
