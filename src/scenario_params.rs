use hhburst::{applied_current::AppliedCurrentDist, params::SimulationParams};

pub fn get_scenario_params() -> SimulationParams {
    let params_yaml_str = r#"
network_params:
  num_neurons: 100
  exc_fraction: 1.0
neuron_params:
  leak_conductance: 0.1
  leak_potential: 10.6
  na_conductance: 36.0
  na_potential: 115.0
  k_conductance: 12.0
  k_potential: -12.0
  h0: 0.8
  syn_conductance: 3.6
  exc_potential: 70.0
  inh_potential: -12.0
  tau_fast: 1.0
  tau_slow: 10.0
  alpha_depression: 0.0015
  beta_depression: 0.12
  spike_threshold: 40.0
  syn_steepness: 1.0
episode_params:
  activity_threshold: 0.1730
  activity_slope_threshold: 0.1490
run_params:
  dt: 0.01
  max_time: 8000.0
  max_burst_count: 200
output_params:
  precision: 14
technical_params:
  num_threads: 1
  pin_threads: false
"#;

    serde_yaml::from_str(params_yaml_str).unwrap()
}

pub fn get_applied_current_dist() -> AppliedCurrentDist {
    serde_yaml::from_str("!Ramp { i0: -10.0, delta: 15.0 }").unwrap()
}
