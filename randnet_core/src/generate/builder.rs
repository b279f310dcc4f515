//! Build the ordered reaction list of a random network
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::configuration::Settings;
use crate::generate::sampler::ReactionTypeSampler;
use crate::reaction_network::network::ReactionNetwork;
use crate::reaction_network::reaction::{Reaction, ReactionShape, ReactionType};

/// How many times the product of a UniUni reaction is redrawn before giving up on avoiding
/// `A -> A`
pub const MAX_SELF_REACTION_ATTEMPTS: usize = 100;

/// Generates reactions over a pool of `num_species` species
pub struct ReactionListBuilder<'a> {
    num_species: usize,
    settings: &'a Settings,
    sampler: ReactionTypeSampler,
}

impl<'a> ReactionListBuilder<'a> {
    pub fn new(num_species: usize, settings: &'a Settings) -> Self {
        ReactionListBuilder {
            num_species,
            settings,
            sampler: ReactionTypeSampler::new(settings.reaction_probabilities),
        }
    }

    /// Generate a network with `num_reactions` random reactions
    ///
    /// No network is returned if any of the reactions can't be completed.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        num_reactions: usize,
        rng: &mut R,
    ) -> Result<ReactionNetwork, GenerationError> {
        let mut network = ReactionNetwork::new(self.num_species);
        for reaction_index in 0..num_reactions {
            let reaction = self.generate_reaction(reaction_index, rng)?;
            log::debug!(
                "Generated reaction J{}: {} (k = {})",
                reaction_index,
                reaction,
                reaction.rate_constant
            );
            network.add_reaction(reaction);
        }
        Ok(network)
    }

    /// Generate a single reaction, drawing its rate constant, type, reactants and products in
    /// that order
    pub fn generate_reaction<R: Rng + ?Sized>(
        &self,
        reaction_index: usize,
        rng: &mut R,
    ) -> Result<Reaction, GenerationError> {
        let rate_constant = self.draw_rate_constant(rng);
        let reaction_type = self.sampler.sample(rng);
        self.complete_reaction(reaction_index, reaction_type, rate_constant, rng)
    }

    /// Pick reactants and products for a reaction of a known type
    pub fn complete_reaction<R: Rng + ?Sized>(
        &self,
        reaction_index: usize,
        reaction_type: ReactionType,
        rate_constant: f64,
        rng: &mut R,
    ) -> Result<Reaction, GenerationError> {
        let reactants = (0..reaction_type.num_reactants())
            .map(|_| rng.gen_range(0..self.num_species))
            .collect::<Vec<_>>();

        let products = if self.settings.allow_mass_violating_reactions {
            self.draw_unconstrained_products(reaction_index, reaction_type, &reactants, rng)?
        } else {
            self.draw_conserving_products(reaction_index, reaction_type, &reactants, rng)?
        };

        // Both vectors were sized from reaction_type
        let shape = match reaction_type {
            ReactionType::UniUni => ReactionShape::UniUni {
                reactant: reactants[0],
                product: products[0],
            },
            ReactionType::BiUni => ReactionShape::BiUni {
                reactants: [reactants[0], reactants[1]],
                product: products[0],
            },
            ReactionType::UniBi => ReactionShape::UniBi {
                reactant: reactants[0],
                products: [products[0], products[1]],
            },
            ReactionType::BiBi => ReactionShape::BiBi {
                reactants: [reactants[0], reactants[1]],
                products: [products[0], products[1]],
            },
        };
        Ok(Reaction::new(shape, rate_constant))
    }

    /// Uniform in (0, rate_constant_scale]
    fn draw_rate_constant<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (1f64 - rng.gen::<f64>()) * self.settings.rate_constant_scale
    }

    /// Products drawn from the species not consumed by the reaction
    fn draw_conserving_products<R: Rng + ?Sized>(
        &self,
        reaction_index: usize,
        reaction_type: ReactionType,
        reactants: &[usize],
        rng: &mut R,
    ) -> Result<Vec<usize>, GenerationError> {
        let candidates = (0..self.num_species)
            .filter(|s| !reactants.contains(s))
            .collect::<Vec<_>>();
        (0..reaction_type.num_products())
            .map(|_| {
                candidates
                    .choose(rng)
                    .copied()
                    .ok_or(GenerationError::NoMassConservingProduct {
                        reaction_index,
                        reaction_type,
                    })
            })
            .collect()
    }

    /// Products drawn from the whole pool, only `A -> A` is rejected
    fn draw_unconstrained_products<R: Rng + ?Sized>(
        &self,
        reaction_index: usize,
        reaction_type: ReactionType,
        reactants: &[usize],
        rng: &mut R,
    ) -> Result<Vec<usize>, GenerationError> {
        if reaction_type != ReactionType::UniUni {
            return Ok((0..reaction_type.num_products())
                .map(|_| rng.gen_range(0..self.num_species))
                .collect());
        }
        if self.num_species < 2 {
            return Err(GenerationError::DegenerateSelfReaction {
                reaction_index,
                attempts: 0,
            });
        }
        for _ in 0..MAX_SELF_REACTION_ATTEMPTS {
            let product = rng.gen_range(0..self.num_species);
            if product != reactants[0] {
                return Ok(vec![product]);
            }
        }
        Err(GenerationError::DegenerateSelfReaction {
            reaction_index,
            attempts: MAX_SELF_REACTION_ATTEMPTS,
        })
    }
}

/// Errors raised while generating reactions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Every species was consumed as a reactant, leaving nothing to produce
    #[error("Cannot select a mass-conserving product for {reaction_type} reaction J{reaction_index}")]
    NoMassConservingProduct {
        reaction_index: usize,
        reaction_type: ReactionType,
    },
    /// The product of a UniUni reaction kept matching its reactant
    #[error("Could not avoid a self reaction for J{reaction_index} after {attempts} attempts")]
    DegenerateSelfReaction {
        reaction_index: usize,
        attempts: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{ReactionProbabilities, SettingsBuilder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settings_with(probabilities: ReactionProbabilities, allow_mass_violating: bool) -> Settings {
        SettingsBuilder::default()
            .reaction_probabilities(probabilities)
            .allow_mass_violating_reactions(allow_mass_violating)
            .build()
            .unwrap()
    }

    #[test]
    fn generates_requested_reactions() {
        let settings = Settings::default();
        let builder = ReactionListBuilder::new(10, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let network = builder.generate(25, &mut rng).unwrap();
        assert_eq!(network.num_species, 10);
        assert_eq!(network.num_reactions(), 25);
        assert!(network.is_well_formed());
        for reaction in &network.reactions {
            assert!(reaction.rate_constant > 0.0);
            assert!(reaction.rate_constant <= settings.rate_constant_scale);
        }
    }

    #[test]
    fn rate_constants_follow_scale() {
        let settings = SettingsBuilder::default()
            .rate_constant_scale(50.0)
            .build()
            .unwrap();
        let builder = ReactionListBuilder::new(6, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let network = builder.generate(200, &mut rng).unwrap();
        assert!(network
            .reactions
            .iter()
            .all(|r| r.rate_constant > 0.0 && r.rate_constant <= 50.0));
        // With 200 draws at least one should land above the default scale of 1
        assert!(network.reactions.iter().any(|r| r.rate_constant > 1.0));
    }

    #[test]
    fn mass_conserving_reactions() {
        let settings = settings_with(ReactionProbabilities::new(0.25, 0.25, 0.25, 0.25), false);
        let builder = ReactionListBuilder::new(4, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let network = builder.generate(500, &mut rng).unwrap();
        for reaction in &network.reactions {
            assert!(reaction.conserves_mass(), "{} violates mass", reaction);
        }
    }

    #[test]
    fn uni_uni_never_self_reacts() {
        let settings = settings_with(ReactionProbabilities::new(1.0, 0.0, 0.0, 0.0), true);
        let builder = ReactionListBuilder::new(2, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let network = builder.generate(200, &mut rng).unwrap();
        for reaction in &network.reactions {
            assert_eq!(reaction.reaction_type(), ReactionType::UniUni);
            assert_ne!(reaction.reactants()[0], reaction.products()[0]);
        }
    }

    #[test]
    fn mass_violation_allowed() {
        // A single species can only ever form S0 + S0 -> S0
        let settings = settings_with(ReactionProbabilities::new(0.0, 1.0, 0.0, 0.0), true);
        let builder = ReactionListBuilder::new(1, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let network = builder.generate(3, &mut rng).unwrap();
        for reaction in &network.reactions {
            assert_eq!(reaction.reactants(), &[0, 0]);
            assert_eq!(reaction.products(), &[0]);
        }
    }

    #[test]
    fn bi_bi_with_two_species_fails() {
        let settings = settings_with(ReactionProbabilities::new(0.0, 0.0, 0.0, 1.0), false);
        let builder = ReactionListBuilder::new(2, &settings);
        // Try several seeds, any draw that uses both species as reactants must fail
        let mut failures = 0;
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            match builder.generate(1, &mut rng) {
                Err(GenerationError::NoMassConservingProduct {
                    reaction_index,
                    reaction_type,
                }) => {
                    assert_eq!(reaction_index, 0);
                    assert_eq!(reaction_type, ReactionType::BiBi);
                    failures += 1;
                }
                Ok(network) => {
                    // Both reactant slots picked the same species
                    let reaction = network.reactions[0];
                    assert_eq!(reaction.reactants()[0], reaction.reactants()[1]);
                    assert!(reaction.conserves_mass());
                }
                Err(e) => panic!("Unexpected error {}", e),
            }
        }
        assert!(failures > 0);
    }

    #[test]
    fn forced_bi_bi_over_both_species_fails() {
        let settings = settings_with(ReactionProbabilities::default(), false);
        let builder = ReactionListBuilder::new(2, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let products = builder.draw_conserving_products(0, ReactionType::BiBi, &[0, 1], &mut rng);
        assert_eq!(
            products,
            Err(GenerationError::NoMassConservingProduct {
                reaction_index: 0,
                reaction_type: ReactionType::BiBi
            })
        );
    }

    #[test]
    fn single_species_uni_uni_fails() {
        let settings = settings_with(ReactionProbabilities::new(1.0, 0.0, 0.0, 0.0), true);
        let builder = ReactionListBuilder::new(1, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert!(matches!(
            builder.generate(1, &mut rng),
            Err(GenerationError::DegenerateSelfReaction { .. })
        ));

        // Without mass violation the candidate pool is simply empty
        let settings = settings_with(ReactionProbabilities::new(1.0, 0.0, 0.0, 0.0), false);
        let builder = ReactionListBuilder::new(1, &settings);
        assert!(matches!(
            builder.generate(1, &mut rng),
            Err(GenerationError::NoMassConservingProduct { .. })
        ));
    }

    #[test]
    fn completed_reactions_keep_their_type() {
        for allow_mass_violating in [false, true] {
            let settings = settings_with(ReactionProbabilities::default(), allow_mass_violating);
            let builder = ReactionListBuilder::new(5, &settings);
            let mut rng = ChaCha8Rng::seed_from_u64(31);
            for reaction_type in ReactionType::ALL {
                let reaction = builder
                    .complete_reaction(0, reaction_type, 0.5, &mut rng)
                    .unwrap();
                assert_eq!(reaction.reaction_type(), reaction_type);
                assert_eq!(reaction.reactants().len(), reaction_type.num_reactants());
                assert_eq!(reaction.products().len(), reaction_type.num_products());
                assert_eq!(reaction.rate_constant, 0.5);
                if !allow_mass_violating {
                    assert!(reaction.conserves_mass());
                }
            }
        }
    }

    #[test]
    fn same_seed_same_reactions() {
        let settings = Settings::default();
        let builder = ReactionListBuilder::new(8, &settings);
        let first = builder
            .generate(20, &mut ChaCha8Rng::seed_from_u64(17))
            .unwrap();
        let second = builder
            .generate(20, &mut ChaCha8Rng::seed_from_u64(17))
            .unwrap();
        assert_eq!(first, second);
    }
}
