//! Configuration for the distributed coordinator/worker search.

/// Configuration for distributed search execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributedConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Size of the task pool each worker runs its subtrees on.
    pub threads_per_worker: usize,
}

impl Default for DistributedConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            threads_per_worker: 1,
        }
    }
}

impl DistributedConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the pool size inside each worker (at least one).
    pub fn with_threads_per_worker(mut self, threads: usize) -> Self {
        self.threads_per_worker = threads.max(1);
        self
    }

    /// Number of frontier roots to prepare before any worker starts.
    ///
    /// Never below two, so the all-uncolored root is always expanded and can
    /// not be mistaken for the shutdown sentinel.
    pub fn frontier_target(&self, frontier_factor: usize) -> usize {
        (self.num_workers * frontier_factor).max(2)
    }
}
