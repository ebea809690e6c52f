use hhburst::simulation;

#[path = "../scenario_params.rs"]
mod scenario_params;

fn main() {
    let mut params = scenario_params::get_scenario_params();
    params.run_params.max_time = 1000.0;
    params.run_params.max_burst_count = usize::MAX;

    let applied_currents = scenario_params::get_applied_current_dist()
        .generate(params.network_params.num_neurons, 0)
        .unwrap();

    let mut simulation = simulation::create_simulation(params, applied_currents).unwrap();

    let state_snapshot = simulation.extract_state_snapshot();
    let initial_voltage_checksum: f64 = state_snapshot
        .neuron_states
        .iter()
        .map(|neuron_state| neuron_state.v)
        .sum();

    let result = simulation.run();

    let spike_time_checksum: f64 = result
        .spike_trains
        .spike_trains()
        .flat_map(|spike_train| spike_train.iter())
        .sum();

    let mean_a_checksum: f64 = result
        .average_states
        .iter()
        .map(|average_state| average_state.mean_a)
        .sum();

    let episode_checksum: f64 = result
        .episode_records
        .iter()
        .map(|episode_record| episode_record.signed_t)
        .sum();

    println!("run result:");
    println!("...initial voltages checksum: {}", initial_voltage_checksum);
    println!("...steps: {}", result.average_states.len());
    println!("...bursts: {}", result.burst_count);
    println!(
        "...spike count: {}",
        result.spike_trains.total_spike_count()
    );
    println!("...spike times checksum: {:.10}", spike_time_checksum);
    println!("...mean activity checksum: {:.10}", mean_a_checksum);
    println!("...episode times checksum: {:.10}", episode_checksum);
    println!(
        "...result json bytes: {}",
        serde_json::to_string(&result).unwrap().len()
    );
}
