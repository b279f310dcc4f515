//! Generate unbranched chains of UniUni reactions
use rand::Rng;

use crate::configuration::ConfigurationError;
use crate::reaction_network::network::ReactionNetwork;
use crate::reaction_network::reaction::{Reaction, ReactionShape};

/// Build the chain `S0 -> S1 -> ... -> S<length>`
///
/// Rate constants are uniform in (0, rate_constant_max]. The two ends of the chain are the
/// only boundary species.
pub fn linear_chain<R: Rng + ?Sized>(
    length: usize,
    rate_constant_max: f64,
    rng: &mut R,
) -> Result<ReactionNetwork, ConfigurationError> {
    if length == 0 {
        return Err(ConfigurationError::EmptyChain);
    }
    if !rate_constant_max.is_finite() || rate_constant_max <= 0f64 {
        return Err(ConfigurationError::InvalidRateConstantScale(
            rate_constant_max,
        ));
    }
    let mut network = ReactionNetwork::new(length + 1);
    for step in 0..length {
        let rate_constant = (1f64 - rng.gen::<f64>()) * rate_constant_max;
        network.add_reaction(Reaction::new(
            ReactionShape::UniUni {
                reactant: step,
                product: step + 1,
            },
            rate_constant,
        ));
    }
    Ok(network)
}
