use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    num_neurons: usize,
    num_exc: usize,
}

impl Population {
    pub fn new(num_neurons: usize, num_exc: usize) -> Self {
        assert!(num_exc <= num_neurons);
        Self {
            num_neurons,
            num_exc,
        }
    }

    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    pub fn num_exc(&self) -> usize {
        self.num_exc
    }

    pub fn num_inh(&self) -> usize {
        self.num_neurons - self.num_exc
    }

    pub fn is_excitatory(&self, nid: usize) -> bool {
        nid < self.num_exc
    }

    pub fn exc_range(&self) -> Range<usize> {
        0..self.num_exc
    }

    pub fn inh_range(&self) -> Range<usize> {
        self.num_exc..self.num_neurons
    }
}
