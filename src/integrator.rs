use crate::{
    neuron::{NeuronModel, SynapticInput},
    state_snapshot::NeuronState,
};

pub fn rk4_step<F>(state: &NeuronState, dt: f64, derivative: F) -> NeuronState
where
    F: Fn(&NeuronState) -> NeuronState,
{
    let half_dt = dt / 2.0;

    let k1 = derivative(state);
    let k2 = derivative(&add_scaled(state, &k1, half_dt));
    let k3 = derivative(&add_scaled(state, &k2, half_dt));
    let k4 = derivative(&add_scaled(state, &k3, dt));

    let weighted = |x: f64, k1: f64, k2: f64, k3: f64, k4: f64| {
        x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    };

    NeuronState {
        v: weighted(state.v, k1.v, k2.v, k3.v, k4.v),
        n: weighted(state.n, k1.n, k2.n, k3.n, k4.n),
        a: weighted(state.a, k1.a, k2.a, k3.a, k4.a),
        s: weighted(state.s, k1.s, k2.s, k3.s, k4.s),
    }
}

/// Advances a neuron in place. Synaptic input and applied current stay frozen over the sub-steps.
pub fn advance(
    model: &NeuronModel,
    state: &mut NeuronState,
    input: &SynapticInput,
    applied_current: f64,
    dt: f64,
) {
    *state = rk4_step(state, dt, |x| model.derivative(x, input, applied_current));
}

fn add_scaled(state: &NeuronState, k: &NeuronState, h: f64) -> NeuronState {
    NeuronState {
        v: state.v + h * k.v,
        n: state.n + h * k.n,
        a: state.a + h * k.a,
        s: state.s + h * k.s,
    }
}
