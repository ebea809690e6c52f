use crate::coupling::DriveTotals;
use crate::episode_detector::EpisodeDetector;
use crate::network::Population;
use crate::params;
use crate::params::SimulationParams;
use crate::partition;
use crate::partition::{
    Partition, PartitionStateSnapshot, PartitionStepResult, Request, StepContext,
};
use crate::records::{AverageStateRecord, ClassActivity, EpisodeRecord};
use crate::spike_train::SpikeTrainStore;
use crate::state_snapshot::{NeuronState, StateSnapshot};
use bus::Bus;
use core_affinity::CoreId;
use serde::{Deserialize, Serialize};
use simple_error::{try_with, SimpleError};
use std::sync::mpsc::channel as mpsc_channel;
use std::sync::mpsc::Receiver as MpscReceiver;
use std::thread;
use std::thread::JoinHandle;

pub fn create_simulation(
    params: SimulationParams,
    applied_currents: Vec<f64>,
) -> Result<Simulation, SimpleError> {
    try_with!(
        params::validate_simulation_params(&params, applied_currents.len()),
        "invalid simulation parameters"
    );

    let num_neurons = params.network_params.num_neurons;
    let population = Population::new(num_neurons, params.network_params.num_exc_neurons());
    let num_threads = get_num_threads(&params);

    log::info!(
        "simulating {} neurons ({} excitatory, {} inhibitory) on {} thread(s), dt = {}",
        num_neurons,
        population.num_exc(),
        population.num_inh(),
        num_threads,
        params.run_params.dt
    );

    let initial_states = vec![NeuronState::INITIAL; num_neurons];
    let drive_totals = DriveTotals::accumulate(&population, 0, &initial_states);
    let initial_mean_activity =
        initial_states.iter().map(|state| state.a).sum::<f64>() / num_neurons as f64;

    let backend = if num_threads == 1 {
        Backend::Inline(partition::create_partition(
            1,
            0,
            &params,
            population,
            &applied_currents,
        ))
    } else {
        Backend::Workers(spawn_workers(num_threads, &params, population, &applied_currents))
    };

    Ok(Simulation {
        episode_detector: EpisodeDetector::new(&params.episode_params, initial_mean_activity),
        spike_trains: SpikeTrainStore::new(num_neurons),
        average_states: Vec::new(),
        episode_records: Vec::new(),
        drive_totals,
        population,
        backend,
        t: 0.0,
        tick_period: 0,
        params,
    })
}

fn get_num_threads(params: &SimulationParams) -> usize {
    params
        .technical_params
        .num_threads
        .unwrap_or_else(num_cpus::get)
}

fn spawn_workers(
    num_threads: usize,
    params: &SimulationParams,
    population: Population,
    applied_currents: &[f64],
) -> WorkerPool {
    let mut broadcast_tx = Bus::new(1);
    let (result_tx, result_rx) = mpsc_channel();
    let (snapshot_tx, snapshot_rx) = mpsc_channel();

    let mut join_handles = Vec::new();

    for thread_id in 0..num_threads {
        let broadcast_rx = broadcast_tx.add_rx();
        let result_tx = result_tx.clone();
        let snapshot_tx = snapshot_tx.clone();
        let params = params.clone();
        let applied_currents = applied_currents.to_vec();

        join_handles.push(thread::spawn(move || {
            if params.technical_params.pin_threads {
                let core_id = CoreId { id: thread_id };
                core_affinity::set_for_current(core_id);
            }

            let mut partition = partition::create_partition(
                num_threads,
                thread_id,
                &params,
                population,
                &applied_currents,
            );
            partition.run(broadcast_rx, result_tx, snapshot_tx);
        }));
    }

    WorkerPool {
        broadcast_tx: Some(broadcast_tx),
        result_rx,
        snapshot_rx,
        num_partitions: num_threads,
        join_handles,
    }
}

enum Backend {
    Inline(Partition),
    Workers(WorkerPool),
}

struct WorkerPool {
    broadcast_tx: Option<Bus<Request>>,
    result_rx: MpscReceiver<PartitionStepResult>,
    snapshot_rx: MpscReceiver<PartitionStateSnapshot>,
    num_partitions: usize,
    join_handles: Vec<JoinHandle<()>>,
}

impl Backend {
    fn step(&mut self, ctx: StepContext) -> Vec<PartitionStepResult> {
        match self {
            Backend::Inline(partition) => vec![partition.step(&ctx)],
            Backend::Workers(pool) => {
                pool.broadcast(Request::Step(ctx));

                let mut results: Vec<_> = (0..pool.num_partitions)
                    .map(|_| {
                        pool.result_rx
                            .recv()
                            .expect("partition worker terminated unexpectedly")
                    })
                    .collect();

                results.sort_by_key(|result| result.nid_start);
                results
            }
        }
    }

    fn extract_snapshots(&mut self) -> Vec<PartitionStateSnapshot> {
        match self {
            Backend::Inline(partition) => vec![partition.extract_snapshot()],
            Backend::Workers(pool) => {
                pool.broadcast(Request::ExtractStateSnapshot);

                let mut snapshots: Vec<_> = (0..pool.num_partitions)
                    .map(|_| {
                        pool.snapshot_rx
                            .recv()
                            .expect("partition worker terminated unexpectedly")
                    })
                    .collect();

                snapshots.sort_by_key(|snapshot| snapshot.nid_start);
                snapshots
            }
        }
    }
}

impl WorkerPool {
    fn broadcast(&mut self, request: Request) {
        if let Some(broadcast_tx) = self.broadcast_tx.as_mut() {
            broadcast_tx.broadcast(request);
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.broadcast_tx.take()); // signals the worker threads to exit the loop

        self.join_handles.drain(..).for_each(|join_handle| {
            join_handle.join().ok();
        });
    }
}

#[derive(Debug, Clone)]
pub struct StepResult {
    pub t: f64,
    pub spiking_nids: Vec<usize>,
    pub average_state: AverageStateRecord,
    pub episode_record: Option<EpisodeRecord>,
    pub active_phase: bool,
    pub burst_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub average_states: Vec<AverageStateRecord>,
    pub episode_records: Vec<EpisodeRecord>,
    pub spike_trains: SpikeTrainStore,
    pub burst_count: usize,
    pub t_elapsed: f64,
}

pub struct Simulation {
    params: SimulationParams,
    population: Population,
    backend: Backend,
    drive_totals: DriveTotals,
    episode_detector: EpisodeDetector,
    spike_trains: SpikeTrainStore,
    average_states: Vec<AverageStateRecord>,
    episode_records: Vec<EpisodeRecord>,
    t: f64,
    tick_period: usize,
}

impl Simulation {
    pub fn get_population(&self) -> Population {
        self.population
    }

    pub fn get_params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn get_t(&self) -> f64 {
        self.t
    }

    pub fn get_tick_period(&self) -> usize {
        self.tick_period
    }

    pub fn get_burst_count(&self) -> usize {
        self.episode_detector.get_burst_count()
    }

    pub fn get_average_states(&self) -> &[AverageStateRecord] {
        &self.average_states
    }

    pub fn get_episode_records(&self) -> &[EpisodeRecord] {
        &self.episode_records
    }

    pub fn get_spike_trains(&self) -> &SpikeTrainStore {
        &self.spike_trains
    }

    pub fn is_finished(&self) -> bool {
        self.get_burst_count() >= self.params.run_params.max_burst_count
            || self.t > self.params.run_params.max_time
    }

    pub fn step(&mut self) -> StepResult {
        let t = self.t;
        let dt = self.params.run_params.dt;

        let partition_results = self.backend.step(StepContext {
            drive_totals: self.drive_totals,
        });

        let mut state_sum = NeuronState::ZERO;
        let mut exc_activity_sum = 0.0;
        let mut inh_activity_sum = 0.0;
        let mut drive_totals = DriveTotals::default();
        let mut spiking_nids = Vec::new();

        for partition_result in partition_results {
            state_sum.v += partition_result.state_sum.v;
            state_sum.n += partition_result.state_sum.n;
            state_sum.a += partition_result.state_sum.a;
            state_sum.s += partition_result.state_sum.s;
            exc_activity_sum += partition_result.exc_activity_sum;
            inh_activity_sum += partition_result.inh_activity_sum;
            drive_totals += partition_result.drive_totals;
            spiking_nids.extend(partition_result.spiking_nids);
        }

        for &nid in &spiking_nids {
            if let Err(violation) = self.spike_trains.add_spike(nid, t) {
                log::warn!("{}", violation);
            }
        }

        let average_state =
            AverageStateRecord::from_sum(&state_sum, self.population.num_neurons());
        self.average_states.push(average_state);

        let class_activity = ClassActivity {
            mean_exc: class_mean(exc_activity_sum, self.population.num_exc()),
            mean_inh: class_mean(inh_activity_sum, self.population.num_inh()),
        };

        let episode_record =
            self.episode_detector
                .on_step(t, dt, average_state.mean_a, class_activity);

        if let Some(episode_record) = episode_record {
            self.episode_records.push(episode_record);
        }

        self.drive_totals = drive_totals;
        self.t += dt;
        self.tick_period += 1;

        StepResult {
            t,
            spiking_nids,
            average_state,
            episode_record,
            active_phase: self.episode_detector.is_active(),
            burst_count: self.get_burst_count(),
        }
    }

    pub fn run(mut self) -> SimulationResult {
        while !self.is_finished() {
            self.step();
        }

        log::info!(
            "simulation finished after {} steps: t = {:.4}, bursts = {}",
            self.tick_period,
            self.t,
            self.get_burst_count()
        );

        self.into_result()
    }

    pub fn into_result(mut self) -> SimulationResult {
        SimulationResult {
            average_states: std::mem::take(&mut self.average_states),
            episode_records: std::mem::take(&mut self.episode_records),
            spike_trains: std::mem::take(&mut self.spike_trains),
            burst_count: self.get_burst_count(),
            t_elapsed: self.t,
        }
    }

    pub fn extract_state_snapshot(&mut self) -> StateSnapshot {
        let neuron_states = self
            .backend
            .extract_snapshots()
            .into_iter()
            .flat_map(|snapshot| snapshot.neuron_states)
            .collect();

        StateSnapshot {
            t: self.t,
            neuron_states,
        }
    }
}

fn class_mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
