//! Module for writing generated networks out, and reading them back in
pub mod antimony;
pub mod json;
