//! Module rendering reaction networks as Antimony model descriptions
//!
//! The text is what gets handed to an external simulation engine, so line content and
//! ordering are fixed: declarations, reactions, parameters, activity factors and finally
//! initial values.
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use rand::Rng;

use crate::configuration::Settings;
use crate::reaction_network::network::{species_name, ReactionNetwork};
use crate::reaction_network::reaction::Reaction;
use crate::stoichiometry::classify::SpeciesClassification;

/// Rate constant used for the first order decay of floating species
pub const DEGRADATION_RATE_CONSTANT: f64 = 0.01;
/// Smallest initial value assigned to a species
pub const MIN_INITIAL_VALUE: u32 = 1;
/// Largest initial value assigned to a species
pub const MAX_INITIAL_VALUE: u32 = 6;

/// A single reaction line of an Antimony model
#[derive(Clone, Debug, PartialEq)]
pub struct AntimonyReaction {
    /// Reaction id, `J<j>`
    pub id: String,
    pub reactants: Vec<String>,
    /// Empty for degradation steps
    pub products: Vec<String>,
    pub rate_law: String,
}

impl Display for AntimonyReaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {}; {}",
            self.id,
            self.reactants.join(" + "),
            self.products.join(" + "),
            self.rate_law
        )
    }
}

/// An Antimony model split into its sections
///
/// Rendering with [`Display`] gives the model text. The default model has no sections and
/// renders as an empty string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AntimonyModel {
    /// Species declared with `var`
    pub floating_species: Vec<String>,
    /// Species declared with `ext`
    pub boundary_species: Vec<String>,
    /// Generated reactions followed by any degradation steps
    pub reactions: Vec<AntimonyReaction>,
    /// Rate constants, keyed by parameter name
    pub parameters: IndexMap<String, f64>,
    /// Activity factors, keyed by name, empty when rate laws don't use them
    pub activity_factors: IndexMap<String, f64>,
    /// Initial values, boundary species first
    pub initial_values: IndexMap<String, u32>,
}

impl AntimonyModel {
    /// Whether the model has nothing to render
    pub fn is_empty(&self) -> bool {
        self.floating_species.is_empty()
            && self.boundary_species.is_empty()
            && self.reactions.is_empty()
    }

    /// Number of degradation steps appended after the generated reactions
    pub fn num_degradation_steps(&self) -> usize {
        self.reactions.iter().filter(|r| r.products.is_empty()).count()
    }
}

impl Display for AntimonyModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if !self.floating_species.is_empty() {
            writeln!(f, "var {}", self.floating_species.join(", "))?;
        }
        if !self.boundary_species.is_empty() {
            writeln!(f, "ext {}", self.boundary_species.join(", "))?;
        }
        for reaction in &self.reactions {
            writeln!(f, "{}", reaction)?;
        }
        writeln!(f)?;
        for (name, value) in &self.parameters {
            writeln!(f, "{} = {}", name, value)?;
        }
        if !self.activity_factors.is_empty() {
            writeln!(f)?;
            for (name, value) in &self.activity_factors {
                writeln!(f, "{} = {}", name, value)?;
            }
        }
        writeln!(f)?;
        for (name, value) in &self.initial_values {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

/// Build the Antimony model of a network
///
/// Reverse rate constants and initial values are drawn from `rng`, in that order. If
/// `settings.remove_boundary_species` is set and the network has no floating species the
/// empty model is returned.
pub fn to_antimony<R: Rng + ?Sized>(
    network: &ReactionNetwork,
    classification: &SpeciesClassification,
    is_reversible: bool,
    settings: &Settings,
    rng: &mut R,
) -> AntimonyModel {
    if settings.remove_boundary_species && classification.floating_ids.is_empty() {
        log::warn!("Network has no floating species, returning an empty model");
        return AntimonyModel::default();
    }

    let mut model = AntimonyModel {
        floating_species: names(&classification.floating_ids),
        boundary_species: names(&classification.boundary_ids),
        ..AntimonyModel::default()
    };

    for (index, reaction) in network.reactions.iter().enumerate() {
        model.reactions.push(AntimonyReaction {
            id: format!("J{}", index),
            reactants: names(reaction.reactants()),
            products: names(reaction.products()),
            rate_law: rate_law(index, reaction, is_reversible, settings.use_activity_factors),
        });
        model
            .parameters
            .insert(format!("k{}", index), reaction.rate_constant);
        if is_reversible {
            let reverse = (1f64 - rng.gen::<f64>()) * settings.rate_constant_scale;
            model.parameters.insert(format!("k{}r", index), reverse);
        }
        if settings.use_activity_factors {
            model.activity_factors.insert(format!("E{}", index), 1f64);
        }
    }

    if settings.add_degradation_steps {
        for (offset, species) in classification.floating_ids.iter().enumerate() {
            let index = network.num_reactions() + offset;
            let name = species_name(*species);
            model.reactions.push(AntimonyReaction {
                id: format!("J{}", index),
                reactants: vec![name.clone()],
                products: Vec::new(),
                rate_law: format!("k{}*{}", index, name),
            });
            model
                .parameters
                .insert(format!("k{}", index), DEGRADATION_RATE_CONSTANT);
        }
    }

    for species in classification
        .boundary_ids
        .iter()
        .chain(&classification.floating_ids)
    {
        model.initial_values.insert(
            species_name(*species),
            rng.gen_range(MIN_INITIAL_VALUE..=MAX_INITIAL_VALUE),
        );
    }
    model
}

/// Render the Antimony text of a network, see [`to_antimony`]
pub fn serialize<R: Rng + ?Sized>(
    network: &ReactionNetwork,
    classification: &SpeciesClassification,
    is_reversible: bool,
    settings: &Settings,
    rng: &mut R,
) -> String {
    to_antimony(network, classification, is_reversible, settings, rng).to_string()
}

/// Mass-action rate law of reaction `J<index>`
fn rate_law(index: usize, reaction: &Reaction, is_reversible: bool, use_activity: bool) -> String {
    let mut law = mass_action_term(&format!("k{}", index), reaction.reactants());
    if is_reversible {
        law.push_str(" - ");
        law.push_str(&mass_action_term(
            &format!("k{}r", index),
            reaction.products(),
        ));
    }
    if use_activity {
        format!("E{}*({})", index, law)
    } else {
        law
    }
}

/// Rate constant times one factor per species occurrence
fn mass_action_term(rate_constant: &str, species: &[usize]) -> String {
    let mut term = rate_constant.to_string();
    for s in species {
        term.push('*');
        term.push_str(&species_name(*s));
    }
    term
}

fn names(species: &[usize]) -> Vec<String> {
    species.iter().map(|s| species_name(*s)).collect()
}
