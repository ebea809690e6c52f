use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

pub const MIN_INH_POTENTIAL: f64 = -12.0;
pub const MAX_INH_POTENTIAL: f64 = 70.0;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    pub network_params: NetworkParams,
    pub neuron_params: NeuronParams,
    pub episode_params: EpisodeParams,
    pub run_params: RunParams,
    pub output_params: OutputParams,
    pub technical_params: TechnicalParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkParams {
    pub num_neurons: usize,
    pub exc_fraction: f64,
}

/// Potentials are in mV relative to rest, conductances in mS/cm², times in ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronParams {
    pub leak_conductance: f64,
    pub leak_potential: f64,
    pub na_conductance: f64,
    pub na_potential: f64,
    pub k_conductance: f64,
    pub k_potential: f64,
    /// Sodium inactivation is approximated by `h = h0 - n`.
    pub h0: f64,
    /// Network-wide synaptic conductance, split evenly across the `num_neurons` synapses.
    pub syn_conductance: f64,
    pub exc_potential: f64,
    pub inh_potential: f64,
    pub tau_fast: f64,
    pub tau_slow: f64,
    pub alpha_depression: f64,
    pub beta_depression: f64,
    pub spike_threshold: f64,
    pub syn_steepness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeParams {
    pub activity_threshold: f64,
    pub activity_slope_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    pub dt: f64,
    pub max_time: f64,
    pub max_burst_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputParams {
    pub precision: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalParams {
    pub num_threads: Option<usize>,
    pub pin_threads: bool,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            num_neurons: 100,
            exc_fraction: 1.0,
        }
    }
}

impl NetworkParams {
    pub fn num_exc_neurons(&self) -> usize {
        (self.num_neurons as f64 * self.exc_fraction) as usize
    }
}

impl Default for NeuronParams {
    fn default() -> Self {
        Self {
            leak_conductance: 0.1,
            leak_potential: 10.6,
            na_conductance: 36.0,
            na_potential: 115.0,
            k_conductance: 12.0,
            k_potential: -12.0,
            h0: 0.8,
            syn_conductance: 3.6,
            exc_potential: 70.0,
            inh_potential: -12.0,
            tau_fast: 1.0,
            tau_slow: 10.0,
            alpha_depression: 0.0015,
            beta_depression: 0.12,
            spike_threshold: 40.0,
            syn_steepness: 1.0,
        }
    }
}

impl Default for EpisodeParams {
    fn default() -> Self {
        Self {
            activity_threshold: 0.1730,
            activity_slope_threshold: 0.1490,
        }
    }
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_time: 8000.0,
            max_burst_count: 200,
        }
    }
}

impl Default for OutputParams {
    fn default() -> Self {
        Self { precision: 14 }
    }
}

impl Default for TechnicalParams {
    fn default() -> Self {
        Self {
            num_threads: Some(1),
            pin_threads: false,
        }
    }
}

pub fn validate_simulation_params(
    params: &SimulationParams,
    num_applied_currents: usize,
) -> Result<(), SimpleError> {
    validate_network_params(&params.network_params)?;
    validate_neuron_params(&params.neuron_params)?;
    validate_run_params(&params.run_params)?;
    validate_technical_params(&params.technical_params)?;

    if num_applied_currents != params.network_params.num_neurons {
        return Err(SimpleError::new(format!(
            "applied current table has {} entries, expected {}",
            num_applied_currents, params.network_params.num_neurons
        )));
    }

    Ok(())
}

fn validate_network_params(network_params: &NetworkParams) -> Result<(), SimpleError> {
    if network_params.num_neurons == 0 {
        return Err(SimpleError::new("num_neurons must be strictly positive"));
    }

    if !(network_params.exc_fraction > 0.0 && network_params.exc_fraction <= 1.0) {
        return Err(SimpleError::new("exc_fraction must be in (0, 1]"));
    }

    Ok(())
}

fn validate_neuron_params(neuron_params: &NeuronParams) -> Result<(), SimpleError> {
    if !(neuron_params.inh_potential >= MIN_INH_POTENTIAL
        && neuron_params.inh_potential <= MAX_INH_POTENTIAL)
    {
        return Err(SimpleError::new(format!(
            "inh_potential must be in [{}, {}]",
            MIN_INH_POTENTIAL, MAX_INH_POTENTIAL
        )));
    }

    if neuron_params.syn_conductance < 0.0 {
        return Err(SimpleError::new("syn_conductance must not be negative"));
    }

    if neuron_params.tau_fast <= 0.0 {
        return Err(SimpleError::new("tau_fast must be strictly positive"));
    }

    if neuron_params.tau_slow <= 0.0 {
        return Err(SimpleError::new("tau_slow must be strictly positive"));
    }

    if neuron_params.syn_steepness <= 0.0 {
        return Err(SimpleError::new("syn_steepness must be strictly positive"));
    }

    Ok(())
}

fn validate_run_params(run_params: &RunParams) -> Result<(), SimpleError> {
    if !(run_params.dt > 0.0) {
        return Err(SimpleError::new("dt must be strictly positive"));
    }

    if !(run_params.max_time >= 0.0) {
        return Err(SimpleError::new("max_time must not be negative"));
    }

    Ok(())
}

fn validate_technical_params(technical_params: &TechnicalParams) -> Result<(), SimpleError> {
    if let Some(num_threads) = technical_params.num_threads {
        if num_threads == 0 {
            return Err(SimpleError::new("num_threads must be strictly positive"));
        }

        if num_cpus::get() < num_threads {
            return Err(SimpleError::new(
                "num_threads must not be greater than number of available CPUs",
            ));
        }
    }

    Ok(())
}
