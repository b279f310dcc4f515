//! Module for the linear-algebra view of a reaction network

pub mod classify;
pub mod matrix;
