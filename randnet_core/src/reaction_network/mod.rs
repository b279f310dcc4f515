//! Module providing the data model of a randomly generated mass-action network.

pub mod network;
pub mod reaction;
