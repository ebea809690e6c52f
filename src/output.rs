use std::fmt::Display;
use std::io::{self, Write};

use itertools::Itertools;

use crate::{
    params::SimulationParams,
    records::{AverageStateRecord, EpisodeRecord},
    spike_train::SpikeTrainStore,
};

// spike times are always written with six decimals, whatever the table precision
const SPIKE_TIME_PRECISION: usize = 6;

pub fn write_rows<W, I>(writer: &mut W, rows: I, precision: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = [f64; 4]>,
{
    for row in rows {
        writeln!(
            writer,
            "{}",
            row.iter()
                .format_with("\t", |value, f| f(&format_args!("{:.*}", precision, value)))
        )?;
    }

    Ok(())
}

pub fn write_average_states<W: Write>(
    writer: &mut W,
    average_states: &[AverageStateRecord],
    precision: usize,
) -> io::Result<()> {
    write_rows(writer, average_states.iter().map(AverageStateRecord::as_row), precision)
}

pub fn write_episode_records<W: Write>(
    writer: &mut W,
    episode_records: &[EpisodeRecord],
    precision: usize,
) -> io::Result<()> {
    write_rows(writer, episode_records.iter().map(EpisodeRecord::as_row), precision)
}

pub fn write_applied_currents<W: Write>(
    writer: &mut W,
    applied_currents: &[f64],
    precision: usize,
) -> io::Result<()> {
    for applied_current in applied_currents {
        writeln!(writer, "{:.*}", precision, applied_current)?;
    }

    Ok(())
}

pub fn write_matlab_spike_times<W: Write>(
    writer: &mut W,
    spike_trains: &SpikeTrainStore,
) -> io::Result<()> {
    for (nid, spike_train) in spike_trains.spike_trains().enumerate() {
        writeln!(
            writer,
            "spikeTimes{{{}}} = [{}];",
            nid + 1,
            format_spike_train(spike_train)
        )?;
    }

    Ok(())
}

pub fn write_spike_trains<W: Write>(
    writer: &mut W,
    spike_trains: &SpikeTrainStore,
    labels: bool,
) -> io::Result<()> {
    for (nid, spike_train) in spike_trains.spike_trains().enumerate() {
        if labels {
            write!(writer, "Neuron({}): ", nid)?;
        }

        writeln!(writer, "{}", format_spike_train(spike_train))?;
    }

    Ok(())
}

fn format_spike_train(spike_train: &[f64]) -> impl Display + '_ {
    spike_train.iter().format_with("", |t, f| {
        f(&format_args!(" {:.*}", SPIKE_TIME_PRECISION, t))
    })
}

pub fn result_file_stem(params: &SimulationParams) -> String {
    let num_neurons = params.network_params.num_neurons;
    let num_inh = num_neurons - params.network_params.num_exc_neurons();

    format!(
        "HH_BBT_rk4_dt0{}_{},{},vI{},t={}s",
        (params.run_params.dt * 10000.0) as i64,
        num_neurons,
        num_inh,
        params.neuron_params.inh_potential as i64,
        (params.run_params.max_time / 1000.0) as i64
    )
}

pub fn spike_file_stem(params: &SimulationParams) -> String {
    let num_neurons = params.network_params.num_neurons;
    let num_inh = num_neurons - params.network_params.num_exc_neurons();
    let inh_potential = params.neuron_params.inh_potential;
    let sign = if inh_potential < 0.0 { "_" } else { "" };

    format!(
        "HH_BBT_rk4_dt0{}_{}_{}_vI_{}{}_t{}s",
        (params.run_params.dt * 10000.0) as i64,
        num_neurons,
        num_inh,
        sign,
        inh_potential.abs() as i64,
        (params.run_params.max_time / 1000.0) as i64
    )
}
