// Host parallelism probe
// sysinfo for cross-platform CPU enumeration

use sysinfo::System;
use tracing::debug;

use mmap_batch_core::port::ParallelismProbe;

/// ParallelismProbe adapter backed by sysinfo's CPU list
pub struct HostParallelismProbe;

impl HostParallelismProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HostParallelismProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelismProbe for HostParallelismProbe {
    fn host_parallelism(&self) -> Option<usize> {
        let system = System::new_all();
        let count = system.cpus().len();

        debug!(cpus = count, "Host parallelism probed");

        // An empty CPU list means the probe could not tell; let the caller
        // fall back rather than hand out a zero limit
        (count > 0).then_some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_at_least_one_cpu_on_a_real_host() {
        let probe = HostParallelismProbe::new();

        let parallelism = probe.host_parallelism();

        assert!(parallelism.is_some());
        assert!(parallelism.unwrap() >= 1);
    }
}
