use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub t: f64,
    pub neuron_states: Vec<NeuronState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronState {
    pub v: f64,
    pub n: f64,
    pub a: f64,
    pub s: f64,
}

impl NeuronState {
    pub const ZERO: NeuronState = NeuronState {
        v: 0.0,
        n: 0.0,
        a: 0.0,
        s: 0.0,
    };

    pub const INITIAL: NeuronState = NeuronState {
        v: 0.0,
        n: 0.0,
        a: 0.01,
        s: 0.25,
    };

    pub fn is_finite(&self) -> bool {
        self.v.is_finite() && self.n.is_finite() && self.a.is_finite() && self.s.is_finite()
    }

    pub fn syn_drive(&self) -> f64 {
        self.a * self.s
    }
}

impl Default for NeuronState {
    fn default() -> Self {
        Self::ZERO
    }
}

impl StateSnapshot {
    pub fn first_non_finite(&self) -> Option<usize> {
        self.neuron_states
            .iter()
            .position(|neuron_state| !neuron_state.is_finite())
    }
}
