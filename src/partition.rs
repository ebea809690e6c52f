use std::sync::mpsc::Sender as MpscSender;

use bus::BusReader;

use crate::{
    coupling::DriveTotals,
    integrator,
    network::Population,
    neuron::NeuronModel,
    params::SimulationParams,
    spike_detector::SpikeDetector,
    state_snapshot::NeuronState,
    util,
};

#[derive(Debug, Clone)]
pub enum Request {
    Step(StepContext),
    ExtractStateSnapshot,
}

#[derive(Debug, Clone)]
pub struct StepContext {
    pub drive_totals: DriveTotals,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionStepResult {
    pub nid_start: usize,
    pub spiking_nids: Vec<usize>,
    pub state_sum: NeuronState,
    pub exc_activity_sum: f64,
    pub inh_activity_sum: f64,
    pub drive_totals: DriveTotals,
}

pub struct PartitionStateSnapshot {
    pub nid_start: usize,
    pub neuron_states: Vec<NeuronState>,
}

pub struct Partition {
    nid_start: usize,
    population: Population,
    model: NeuronModel,
    dt: f64,
    neuron_states: Vec<NeuronState>,
    applied_currents: Vec<f64>,
    spike_detectors: Vec<SpikeDetector>,
}

pub fn create_partition(
    num_threads: usize,
    thread_id: usize,
    params: &SimulationParams,
    population: Population,
    applied_currents: &[f64],
) -> Partition {
    let partition_range =
        util::get_partition_range(num_threads, thread_id, population.num_neurons());

    let neuron_states = vec![NeuronState::INITIAL; partition_range.len()];
    let spike_detectors =
        vec![SpikeDetector::new(params.neuron_params.spike_threshold); partition_range.len()];

    Partition {
        nid_start: partition_range.start,
        population,
        model: NeuronModel::new(&params.neuron_params, population.num_neurons()),
        dt: params.run_params.dt,
        neuron_states,
        applied_currents: applied_currents[partition_range].to_vec(),
        spike_detectors,
    }
}

impl Partition {
    pub fn run(
        &mut self,
        mut rx: BusReader<Request>,
        result_tx: MpscSender<PartitionStepResult>,
        snapshot_tx: MpscSender<PartitionStateSnapshot>,
    ) {
        while let Ok(request) = rx.recv() {
            let sent = match request {
                Request::Step(ctx) => result_tx.send(self.step(&ctx)).is_ok(),
                Request::ExtractStateSnapshot => snapshot_tx.send(self.extract_snapshot()).is_ok(),
            };

            if !sent {
                break;
            }
        }
    }

    pub fn step(&mut self, ctx: &StepContext) -> PartitionStepResult {
        let mut result = PartitionStepResult {
            nid_start: self.nid_start,
            ..Default::default()
        };
        let mut state_sum = NeuronState::ZERO;

        for (idx, ((state, detector), applied_current)) in self
            .neuron_states
            .iter_mut()
            .zip(self.spike_detectors.iter_mut())
            .zip(self.applied_currents.iter())
            .enumerate()
        {
            let nid = self.nid_start + idx;
            let is_excitatory = self.population.is_excitatory(nid);

            let input = ctx.drive_totals.self_excluded(is_excitatory, state);
            let v_old = state.v;

            integrator::advance(&self.model, state, &input, *applied_current, self.dt);

            if detector.on_step(v_old, state.v, self.dt) {
                result.spiking_nids.push(nid);
            }

            state_sum.v += state.v;
            state_sum.n += state.n;
            state_sum.a += state.a;
            state_sum.s += state.s;

            if is_excitatory {
                result.exc_activity_sum += state.a;
            } else {
                result.inh_activity_sum += state.a;
            }

            result.drive_totals.add_neuron(is_excitatory, state);
        }

        result.state_sum = state_sum;
        result
    }

    pub fn extract_snapshot(&self) -> PartitionStateSnapshot {
        PartitionStateSnapshot {
            nid_start: self.nid_start,
            neuron_states: self.neuron_states.clone(),
        }
    }
}
