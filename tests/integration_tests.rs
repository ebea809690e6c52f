use float_cmp::assert_approx_eq;
use itertools::Itertools;
use hhburst::{
    applied_current,
    params::SimulationParams,
    simulation::{create_simulation, SimulationResult},
};

fn make_params(num_neurons: usize, exc_fraction: f64, max_time: f64) -> SimulationParams {
    let mut params = SimulationParams::default();
    params.network_params.num_neurons = num_neurons;
    params.network_params.exc_fraction = exc_fraction;
    params.run_params.max_time = max_time;
    params
}

fn run(params: SimulationParams, applied_currents: Vec<f64>) -> SimulationResult {
    create_simulation(params, applied_currents).unwrap().run()
}

fn assert_strictly_increasing_spike_trains(result: &SimulationResult) {
    for spike_train in result.spike_trains.spike_trains() {
        for (t0, t1) in spike_train.iter().tuple_windows() {
            assert!(t1 > t0);
        }
    }
}

#[test]
fn four_neuron_network_single_burst() {
    let mut params = make_params(4, 1.0, 8000.0);
    params.run_params.dt = 0.01;
    params.run_params.max_burst_count = 1;

    let result = run(params, vec![-10.0, -5.0, 0.0, 5.0]);

    assert_eq!(result.burst_count, 1);
    assert_eq!(result.episode_records.len(), 2);

    let start = &result.episode_records[0];
    let end = &result.episode_records[1];
    assert!(start.is_phase_start());
    assert!(start.signed_t > 0.0);
    assert!(!end.is_phase_start());
    assert!(end.signed_t < 0.0);
    assert!(end.t() > start.t());

    // no inhibitory neurons
    assert_approx_eq!(f64, start.mean_inh_activity, 0.0);
    assert_approx_eq!(f64, end.mean_inh_activity, 0.0);

    // terminates right after the burst ends
    assert_approx_eq!(f64, result.t_elapsed, end.t() + 0.01, epsilon = 1e-9);
    assert_strictly_increasing_spike_trains(&result);
}

#[test]
fn isolated_neuron_fires_periodically() {
    let mut params = make_params(1, 1.0, 300.0);
    params.neuron_params.syn_conductance = 0.0;
    params.run_params.max_burst_count = usize::MAX;

    let result = run(params, vec![20.0]);

    let spike_train = result.spike_trains.get_spike_train(0).unwrap();
    assert!(spike_train.len() >= 5, "only {} spikes", spike_train.len());

    let intervals: Vec<f64> = spike_train
        .iter()
        .tuple_windows()
        .map(|(t0, t1)| t1 - t0)
        .skip(2)
        .collect();

    let (min_interval, max_interval) = intervals
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &interval| {
            (min.min(interval), max.max(interval))
        });

    assert!(min_interval > 0.0);
    assert!(max_interval / min_interval < 1.05);
}

#[test]
fn identical_runs_are_identical() {
    let params = make_params(10, 0.8, 500.0);
    let applied_currents = applied_current::linear_ramp(10, -10.0, 15.0);

    let first = run(params.clone(), applied_currents.clone());
    let second = run(params, applied_currents);

    assert_eq!(first.average_states, second.average_states);
    assert_eq!(first.episode_records, second.episode_records);
    assert_eq!(first.burst_count, second.burst_count);
    assert!(first
        .spike_trains
        .spike_trains()
        .eq(second.spike_trains.spike_trains()));
}

#[test]
fn identical_threaded_runs_are_identical() {
    if num_cpus::get() < 2 {
        return;
    }

    let mut params = make_params(9, 0.7, 300.0);
    params.technical_params.num_threads = Some(2);
    let applied_currents = applied_current::linear_ramp(9, -10.0, 15.0);

    let first = run(params.clone(), applied_currents.clone());
    let second = run(params, applied_currents);

    assert_eq!(first.average_states, second.average_states);
    assert_eq!(first.episode_records, second.episode_records);
    assert!(first
        .spike_trains
        .spike_trains()
        .eq(second.spike_trains.spike_trains()));
}

#[test]
fn threaded_run_tracks_inline_run() {
    if num_cpus::get() < 3 {
        return;
    }

    let inline_params = make_params(7, 0.6, 1.0);
    let mut threaded_params = inline_params.clone();
    threaded_params.technical_params.num_threads = Some(3);
    let applied_currents = applied_current::linear_ramp(7, -10.0, 15.0);

    let inline = run(inline_params, applied_currents.clone());
    let threaded = run(threaded_params, applied_currents);

    assert_eq!(inline.average_states.len(), threaded.average_states.len());

    for (a, b) in inline.average_states.iter().zip(&threaded.average_states) {
        assert_approx_eq!(f64, a.mean_v, b.mean_v, epsilon = 1e-9);
        assert_approx_eq!(f64, a.mean_a, b.mean_a, epsilon = 1e-12);
    }
}

#[test]
fn spike_trains_strictly_increasing() {
    let params = make_params(20, 0.8, 1000.0);
    let applied_currents = applied_current::linear_ramp(20, -10.0, 15.0);

    let result = run(params, applied_currents);

    assert!(result.spike_trains.total_spike_count() > 0);
    assert_eq!(result.spike_trains.num_neurons(), 20);
    assert_strictly_increasing_spike_trains(&result);
}

#[test]
fn population_split_is_fixed() {
    for (num_neurons, exc_fraction, expected_exc) in
        [(1, 1.0, 1), (4, 1.0, 4), (10, 0.75, 7), (100, 0.8, 80), (3, 0.2, 0)]
    {
        let params = make_params(num_neurons, exc_fraction, 1.0);
        let mut simulation = create_simulation(params, vec![0.0; num_neurons]).unwrap();
        let population = simulation.get_population();

        assert_eq!(population.num_exc(), expected_exc);
        assert_eq!(population.num_exc() + population.num_inh(), num_neurons);

        for _ in 0..10 {
            simulation.step();
            assert_eq!(simulation.get_population(), population);
        }
    }
}

#[test]
fn burst_count_follows_phase_ends() {
    let mut params = make_params(20, 1.0, 3000.0);
    params.run_params.max_burst_count = 3;
    let applied_currents = applied_current::linear_ramp(20, -10.0, 15.0);

    let mut simulation = create_simulation(params, applied_currents).unwrap();
    let mut last_burst_count = 0;
    let mut phase_ends = 0;
    let mut active_phase = false;

    while !simulation.is_finished() {
        let step_result = simulation.step();

        assert!(step_result.burst_count >= last_burst_count);
        last_burst_count = step_result.burst_count;

        if let Some(episode_record) = step_result.episode_record {
            active_phase = episode_record.is_phase_start();

            if !episode_record.is_phase_start() {
                phase_ends += 1;
            }
        }

        assert_eq!(step_result.burst_count, phase_ends);
        assert_eq!(step_result.active_phase, active_phase);
    }

    let negative_records = simulation
        .get_episode_records()
        .iter()
        .filter(|episode_record| episode_record.signed_t < 0.0)
        .count();

    assert_eq!(simulation.get_burst_count(), negative_records);
}

#[test]
fn episode_records_alternate() {
    let mut params = make_params(20, 1.0, 3000.0);
    params.run_params.max_burst_count = 3;

    let result = run(params, applied_current::linear_ramp(20, -10.0, 15.0));

    for (idx, episode_record) in result.episode_records.iter().enumerate() {
        assert_eq!(episode_record.is_phase_start(), idx % 2 == 0);
    }

    for (r0, r1) in result.episode_records.iter().tuple_windows() {
        assert!(r1.t() >= r0.t());
    }
}

#[test]
fn non_finite_state_is_observable() {
    let params = make_params(2, 1.0, 1.0);
    let mut simulation = create_simulation(params, vec![0.0, f64::NAN]).unwrap();

    let step_result = simulation.step();
    let snapshot = simulation.extract_state_snapshot();

    assert!(!step_result.average_state.is_finite());
    assert_eq!(snapshot.first_non_finite(), Some(1));
    assert!(snapshot.neuron_states[0].is_finite());
    assert!(step_result.spiking_nids.is_empty());

    // the simulation keeps going
    simulation.step();
    assert_eq!(simulation.get_tick_period(), 2);
}

#[test]
fn invalid_params_refused() {
    let params = make_params(0, 1.0, 1.0);
    let result = create_simulation(params, Vec::new());

    assert!(result.is_err());
    assert_eq!(
        result.err().unwrap().as_str(),
        "invalid simulation parameters, num_neurons must be strictly positive"
    );

    let mut params = make_params(4, 1.0, 1.0);
    params.neuron_params.inh_potential = 80.0;
    assert!(create_simulation(params, vec![0.0; 4]).is_err());
}

#[test]
fn result_serializes_to_json() {
    let params = make_params(3, 1.0, 0.5);
    let result = run(params, vec![-10.0, 0.0, 5.0]);

    let json = serde_json::to_string(&result).unwrap();
    let parsed: SimulationResult = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.average_states.len(), result.average_states.len());
    assert_eq!(parsed.burst_count, result.burst_count);
}
