use std::ops::{Add, AddAssign};

use crate::{network::Population, neuron::SynapticInput, state_snapshot::NeuronState};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveTotals {
    pub exc: f64,
    pub inh: f64,
}

impl DriveTotals {
    pub fn accumulate(population: &Population, nid_start: usize, states: &[NeuronState]) -> Self {
        let mut totals = DriveTotals::default();

        for (idx, state) in states.iter().enumerate() {
            totals.add_neuron(population.is_excitatory(nid_start + idx), state);
        }

        totals
    }

    pub fn add_neuron(&mut self, is_excitatory: bool, state: &NeuronState) {
        if is_excitatory {
            self.exc += state.syn_drive();
        } else {
            self.inh += state.syn_drive();
        }
    }

    pub fn self_excluded(&self, is_excitatory: bool, state: &NeuronState) -> SynapticInput {
        if is_excitatory {
            SynapticInput {
                exc_drive: self.exc - state.syn_drive(),
                inh_drive: self.inh,
            }
        } else {
            SynapticInput {
                exc_drive: self.exc,
                inh_drive: self.inh - state.syn_drive(),
            }
        }
    }
}

impl Add for DriveTotals {
    type Output = DriveTotals;

    fn add(self, rhs: DriveTotals) -> DriveTotals {
        DriveTotals {
            exc: self.exc + rhs.exc,
            inh: self.inh + rhs.inh,
        }
    }
}

impl AddAssign for DriveTotals {
    fn add_assign(&mut self, rhs: DriveTotals) {
        *self = *self + rhs;
    }
}
