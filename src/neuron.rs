use crate::{params::NeuronParams, state_snapshot::NeuronState};

const SINGULARITY_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapticInput {
    pub exc_drive: f64,
    pub inh_drive: f64,
}

#[derive(Debug, Clone)]
pub struct NeuronModel {
    params: NeuronParams,
    syn_conductance_per_synapse: f64,
}

impl NeuronModel {
    pub fn new(params: &NeuronParams, num_neurons: usize) -> Self {
        Self {
            params: params.clone(),
            syn_conductance_per_synapse: params.syn_conductance / num_neurons as f64,
        }
    }

    pub fn derivative(
        &self,
        state: &NeuronState,
        input: &SynapticInput,
        applied_current: f64,
    ) -> NeuronState {
        let p = &self.params;
        let NeuronState { v, n, a, s } = *state;
        let g_syn = self.syn_conductance_per_synapse;

        let dv = -p.leak_conductance * (v - p.leak_potential)
            - p.na_conductance * minf(v).powi(3) * (p.h0 - n) * (v - p.na_potential)
            - p.k_conductance * n.powi(4) * (v - p.k_potential)
            - g_syn * input.exc_drive * (v - p.exc_potential)
            - g_syn * input.inh_drive * (v - p.inh_potential)
            + applied_current;

        let alpha_n = alpha_n(v);
        let dn = alpha_n - (alpha_n + beta_n(v)) * n;

        let fsyn = self.fsyn(v);
        let da = fsyn * (1.0 - a) / p.tau_fast - a / p.tau_slow;
        let ds = p.alpha_depression * (1.0 - s) - p.beta_depression * fsyn * s;

        NeuronState {
            v: dv,
            n: dn,
            a: da,
            s: ds,
        }
    }

    pub fn fsyn(&self, v: f64) -> f64 {
        1.0 / (1.0 + ((self.params.spike_threshold - v) / self.params.syn_steepness).exp())
    }
}

/// `x / (exp(x / y) - 1)`, continued by its limit `y` where the quotient is 0/0.
fn vtrap(x: f64, y: f64) -> f64 {
    let ratio = x / y;
    if ratio.abs() < SINGULARITY_EPSILON {
        y * (1.0 - ratio / 2.0)
    } else {
        x / ratio.exp_m1()
    }
}

pub fn alpha_m(v: f64) -> f64 {
    0.1 * vtrap(25.0 - v, 10.0)
}

pub fn beta_m(v: f64) -> f64 {
    4.0 * (-v / 18.0).exp()
}

pub fn minf(v: f64) -> f64 {
    let alpha_m = alpha_m(v);
    alpha_m / (alpha_m + beta_m(v))
}

pub fn alpha_n(v: f64) -> f64 {
    0.01 * vtrap(10.0 - v, 10.0)
}

pub fn beta_n(v: f64) -> f64 {
    0.125 * (-v / 80.0).exp()
}
