use std::time::Instant;

use hhburst::simulation;

#[path = "../scenario_params.rs"]
mod scenario_params;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut params = scenario_params::get_scenario_params();
    params.network_params.num_neurons = 1000;
    params.network_params.exc_fraction = 0.8;
    params.run_params.max_burst_count = usize::MAX;
    params.technical_params.num_threads = None;

    let applied_currents = scenario_params::get_applied_current_dist()
        .generate(params.network_params.num_neurons, 0)
        .unwrap();

    let mut simulation = simulation::create_simulation(params, applied_currents).unwrap();

    let t_stop = 20000;
    let mut spike_count = 0usize;
    let mut checksum = 0;

    let wall_start = Instant::now();

    for _ in 0..t_stop {
        let step_result = simulation.step();
        spike_count += step_result.spiking_nids.len();

        for nid in step_result.spiking_nids {
            checksum += nid;
        }
    }

    let wall_time = wall_start.elapsed();
    let neuron_step_throughput =
        (t_stop * simulation.get_population().num_neurons()) as f64 / wall_time.as_secs_f64();

    eprintln!("Spikes per step: {}", spike_count as f64 / t_stop as f64);
    eprintln!(
        "Neuron step throughput: {:.3e} ({:.3} ns per neuron step)",
        neuron_step_throughput,
        1e9 / neuron_step_throughput
    );
    eprintln!("Bursts: {}", simulation.get_burst_count());
    eprintln!("Checksum: {}", checksum);
}
