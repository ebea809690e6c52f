pub mod applied_current;
pub mod network;
pub mod output;
pub mod params;
pub mod records;
pub mod simulation;
pub mod spike_train;
pub mod state_snapshot;

mod coupling;
mod episode_detector;
mod integrator;
mod neuron;
mod partition;
mod spike_detector;
mod util;
