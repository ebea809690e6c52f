use serde::{Deserialize, Serialize};

use crate::state_snapshot::NeuronState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassActivity {
    pub mean_exc: f64,
    pub mean_inh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageStateRecord {
    pub mean_v: f64,
    pub mean_n: f64,
    pub mean_a: f64,
    pub mean_s: f64,
}

impl AverageStateRecord {
    pub fn from_sum(sum: &NeuronState, num_neurons: usize) -> Self {
        let num_neurons = num_neurons as f64;
        Self {
            mean_v: sum.v / num_neurons,
            mean_n: sum.n / num_neurons,
            mean_a: sum.a / num_neurons,
            mean_s: sum.s / num_neurons,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.mean_v.is_finite()
            && self.mean_n.is_finite()
            && self.mean_a.is_finite()
            && self.mean_s.is_finite()
    }

    pub fn as_row(&self) -> [f64; 4] {
        [self.mean_v, self.mean_n, self.mean_a, self.mean_s]
    }
}

/// One edge of an active phase. The sign of `signed_t` tells start (positive) from end (negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub mean_exc_activity: f64,
    pub mean_inh_activity: f64,
    pub signed_t: f64,
    pub flag: f64,
}

impl EpisodeRecord {
    pub fn phase_start(t: f64, activity: ClassActivity) -> Self {
        Self {
            mean_exc_activity: activity.mean_exc,
            mean_inh_activity: activity.mean_inh,
            signed_t: t,
            flag: 1.0,
        }
    }

    pub fn phase_end(t: f64, activity: ClassActivity) -> Self {
        Self {
            mean_exc_activity: activity.mean_exc,
            mean_inh_activity: activity.mean_inh,
            signed_t: -t,
            flag: 1.0,
        }
    }

    pub fn is_phase_start(&self) -> bool {
        self.signed_t.is_sign_positive()
    }

    pub fn t(&self) -> f64 {
        self.signed_t.abs()
    }

    pub fn as_row(&self) -> [f64; 4] {
        [
            self.mean_exc_activity,
            self.mean_inh_activity,
            self.signed_t,
            self.flag,
        ]
    }
}
