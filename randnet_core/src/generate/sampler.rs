//! Draw reaction shapes according to the configured probabilities
use rand::Rng;

use crate::configuration::ReactionProbabilities;
use crate::reaction_network::reaction::ReactionType;

/// Picks a [`ReactionType`] by comparing a uniform draw against cumulative thresholds
#[derive(Clone, Copy, Debug)]
pub struct ReactionTypeSampler {
    probabilities: ReactionProbabilities,
}

impl ReactionTypeSampler {
    pub fn new(probabilities: ReactionProbabilities) -> Self {
        ReactionTypeSampler { probabilities }
    }

    /// Draw a reaction type, consuming a single uniform value from `rng`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ReactionType {
        let draw: f64 = rng.gen();
        self.reaction_type_for(draw)
    }

    /// Map a value in [0, 1) onto a reaction type
    ///
    /// Thresholds accumulate in the order UniUni, BiUni, UniBi, and BiBi absorbs whatever is
    /// left, so probabilities which don't sum to one still give a usable sampler.
    pub fn reaction_type_for(&self, draw: f64) -> ReactionType {
        let mut threshold = 0f64;
        for reaction_type in &ReactionType::ALL[..3] {
            threshold += self.probabilities.get(*reaction_type);
            if draw < threshold {
                return *reaction_type;
            }
        }
        ReactionType::BiBi
    }
}
