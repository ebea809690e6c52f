use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordingViolation {
    NeuronOutOfRange { nid: usize, num_neurons: usize },
    NonMonotonic { nid: usize, t: f64, last_t: f64 },
}

impl fmt::Display for RecordingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingViolation::NeuronOutOfRange { nid, num_neurons } => write!(
                f,
                "neuron index {} out of range (num_neurons: {}), spike dropped",
                nid, num_neurons
            ),
            RecordingViolation::NonMonotonic { nid, t, last_t } => write!(
                f,
                "spike time {} of neuron {} not after last spike time {}, spike dropped",
                t, nid, last_t
            ),
        }
    }
}

impl std::error::Error for RecordingViolation {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpikeTrainStore {
    spike_trains: Vec<Vec<f64>>,
}

impl SpikeTrainStore {
    pub fn new(num_neurons: usize) -> Self {
        Self {
            spike_trains: vec![Vec::new(); num_neurons],
        }
    }

    pub fn add_spike(&mut self, nid: usize, t: f64) -> Result<(), RecordingViolation> {
        let num_neurons = self.spike_trains.len();
        let spike_train = self
            .spike_trains
            .get_mut(nid)
            .ok_or(RecordingViolation::NeuronOutOfRange { nid, num_neurons })?;

        match spike_train.last() {
            Some(&last_t) if !(last_t < t) => {
                Err(RecordingViolation::NonMonotonic { nid, t, last_t })
            }
            _ => {
                spike_train.push(t);
                Ok(())
            }
        }
    }

    pub fn num_neurons(&self) -> usize {
        self.spike_trains.len()
    }

    pub fn get_spike_train(&self, nid: usize) -> Option<&[f64]> {
        self.spike_trains.get(nid).map(Vec::as_slice)
    }

    pub fn spike_trains(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.spike_trains.iter().map(Vec::as_slice)
    }

    pub fn total_spike_count(&self) -> usize {
        self.spike_trains.iter().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> Vec<Vec<f64>> {
        self.spike_trains
    }
}
