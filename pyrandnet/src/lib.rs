use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use randnet_core::configuration::{NetworkConfig, ReactionProbabilities, Settings};
use randnet_core::NetworkError;

/// Settings for network generation, mirroring `randnet_core::configuration::Settings`
#[pyclass(name = "Settings")]
#[derive(Clone)]
struct PySettings {
    #[pyo3(get, set)]
    rate_constant_scale: f64,
    #[pyo3(get, set)]
    uni_uni_probability: f64,
    #[pyo3(get, set)]
    bi_uni_probability: f64,
    #[pyo3(get, set)]
    uni_bi_probability: f64,
    #[pyo3(get, set)]
    bi_bi_probability: f64,
    #[pyo3(get, set)]
    allow_mass_violating_reactions: bool,
    #[pyo3(get, set)]
    add_degradation_steps: bool,
    #[pyo3(get, set)]
    remove_boundary_species: bool,
    #[pyo3(get, set)]
    use_activity_factors: bool,
}

#[pymethods]
impl PySettings {
    #[new]
    fn new() -> Self {
        Settings::default().into()
    }

    fn __repr__(&self) -> String {
        format!("{:?}", Settings::from(self.clone()))
    }
}

impl From<Settings> for PySettings {
    fn from(s: Settings) -> Self {
        PySettings {
            rate_constant_scale: s.rate_constant_scale,
            uni_uni_probability: s.reaction_probabilities.uni_uni,
            bi_uni_probability: s.reaction_probabilities.bi_uni,
            uni_bi_probability: s.reaction_probabilities.uni_bi,
            bi_bi_probability: s.reaction_probabilities.bi_bi,
            allow_mass_violating_reactions: s.allow_mass_violating_reactions,
            add_degradation_steps: s.add_degradation_steps,
            remove_boundary_species: s.remove_boundary_species,
            use_activity_factors: s.use_activity_factors,
        }
    }
}

impl From<PySettings> for Settings {
    fn from(s: PySettings) -> Self {
        Settings {
            rate_constant_scale: s.rate_constant_scale,
            reaction_probabilities: ReactionProbabilities::new(
                s.uni_uni_probability,
                s.bi_uni_probability,
                s.uni_bi_probability,
                s.bi_bi_probability,
            ),
            allow_mass_violating_reactions: s.allow_mass_violating_reactions,
            add_degradation_steps: s.add_degradation_steps,
            remove_boundary_species: s.remove_boundary_species,
            use_activity_factors: s.use_activity_factors,
        }
    }
}

fn to_py_err(err: NetworkError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn resolve_settings(settings: Option<PySettings>) -> Settings {
    settings.map(Settings::from).unwrap_or_default()
}

fn network_config(
    num_species: i64,
    num_reactions: i64,
    is_reversible: bool,
    random_seed: Option<u64>,
) -> PyResult<NetworkConfig> {
    if num_species <= 0 {
        return Err(PyValueError::new_err("num_species must be greater than zero"));
    }
    if num_reactions < 0 {
        return Err(PyValueError::new_err("num_reactions can't be negative"));
    }
    Ok(NetworkConfig {
        num_species: num_species as usize,
        num_reactions: num_reactions as usize,
        is_reversible,
        random_seed,
    })
}

/// Generate a random network and return it as an Antimony string
#[pyfunction]
#[pyo3(signature = (num_species, num_reactions, is_reversible=false, random_seed=None, settings=None))]
fn get_random_network(
    num_species: i64,
    num_reactions: i64,
    is_reversible: bool,
    random_seed: Option<u64>,
    settings: Option<PySettings>,
) -> PyResult<String> {
    let config = network_config(num_species, num_reactions, is_reversible, random_seed)?;
    randnet_core::get_random_network(&config, &resolve_settings(settings)).map_err(to_py_err)
}

/// Generate a random network and return its stoichiometry matrix as a list of rows
#[pyfunction]
#[pyo3(signature = (num_species, num_reactions, random_seed=None, settings=None))]
fn get_stoichiometry_matrix(
    num_species: i64,
    num_reactions: i64,
    random_seed: Option<u64>,
    settings: Option<PySettings>,
) -> PyResult<Vec<Vec<i32>>> {
    let config = network_config(num_species, num_reactions, false, random_seed)?;
    randnet_core::get_stoichiometry_matrix(&config, &resolve_settings(settings))
        .map(|m| m.to_rows())
        .map_err(to_py_err)
}

/// Generate a linear chain of reactions and return it as an Antimony string
#[pyfunction]
#[pyo3(signature = (length, rate_constant_max=10.0, random_seed=None, settings=None))]
fn get_linear_chain(
    length: usize,
    rate_constant_max: f64,
    random_seed: Option<u64>,
    settings: Option<PySettings>,
) -> PyResult<String> {
    randnet_core::get_linear_chain(
        length,
        rate_constant_max,
        random_seed,
        &resolve_settings(settings),
    )
    .map_err(to_py_err)
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_random_network, m)?)?;
    m.add_function(wrap_pyfunction!(get_stoichiometry_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(get_linear_chain, m)?)?;
    m.add_class::<PySettings>()?;
    Ok(())
}
