use std::ops::Range;

/// Contiguous share of `0..num_neurons` owned by `thread_id`. The first
/// `num_neurons % num_threads` threads own one neuron more than the rest.
pub fn get_partition_range(num_threads: usize, thread_id: usize, num_neurons: usize) -> Range<usize> {
    let min_partition_size = num_neurons / num_threads;
    let remainder = num_neurons % num_threads;

    let start = min_partition_size * thread_id + thread_id.min(remainder);
    let partition_size = if thread_id < remainder {
        min_partition_size + 1
    } else {
        min_partition_size
    };

    start..start + partition_size
}
