use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use hhburst::{output, simulation};

#[path = "../scenario_params.rs"]
mod scenario_params;

const RESULTS_DIR: &str = "./results";

fn write_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    log::info!("writing {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = scenario_params::get_scenario_params();
    let applied_currents = scenario_params::get_applied_current_dist()
        .generate(params.network_params.num_neurons, 0)
        .unwrap();

    let precision = params.output_params.precision;
    let file_stem = output::result_file_stem(&params);
    let spike_file_stem = output::spike_file_stem(&params);

    let simulation = simulation::create_simulation(params, applied_currents.clone()).unwrap();

    let wall_start = Instant::now();
    let result = simulation.run();
    let wall_time = wall_start.elapsed();

    eprintln!("Simulation duration: {:.3} s", wall_time.as_secs_f64());
    eprintln!("Bursts: {}", result.burst_count);
    eprintln!("Simulated time: {:.4} ms", result.t_elapsed);
    eprintln!("Spikes: {}", result.spike_trains.total_spike_count());

    let results_dir = Path::new(RESULTS_DIR);
    fs::create_dir_all(results_dir)?;

    write_file(&results_dir.join(format!("{}_double_IappDES.txt", file_stem)), |w| {
        output::write_average_states(w, &result.average_states, precision)
    })?;

    write_file(
        &results_dir.join(format!("{}_double_IappDES,Epis.txt", file_stem)),
        |w| output::write_episode_records(w, &result.episode_records, precision),
    )?;

    write_file(
        &results_dir.join(format!("{}_double_IappDES,Iapp.txt", file_stem)),
        |w| output::write_applied_currents(w, &applied_currents, precision),
    )?;

    write_file(
        &results_dir.join(format!("{}_double_IappDES_Spikes.m", spike_file_stem)),
        |w| output::write_matlab_spike_times(w, &result.spike_trains),
    )?;

    Ok(())
}
