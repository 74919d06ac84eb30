//! Worker threads, the shared queue and the distribution entry points.

use std::{
    collections::VecDeque,
    num::NonZeroUsize,
    ops::Range,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, mpsc},
    thread::{self, JoinHandle},
};

use tracing::{debug, instrument, trace, warn};

use crate::graph::GraphSource;

use super::{error::PoolError, handle::TaskHandle, partition::chunk_ranges};

/// Vertices per worker below which graph distribution runs inline.
pub const DEFAULT_ITEMS_PER_WORKER: usize = 100;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Tunables for a [`TaskPool`].
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use crowd_core::{PoolConfig, TaskPool};
///
/// let config = PoolConfig::new(NonZeroUsize::new(2).expect("non-zero")).with_items_per_worker(0);
/// let pool = TaskPool::with_config(config)?;
/// assert_eq!(pool.worker_count(), 2);
/// # Ok::<(), crowd_core::PoolError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    workers: NonZeroUsize,
    items_per_worker: usize,
}

impl PoolConfig {
    /// Creates a configuration with a fixed worker count and the default
    /// inline threshold.
    #[must_use]
    pub fn new(workers: NonZeroUsize) -> Self {
        Self {
            workers,
            items_per_worker: DEFAULT_ITEMS_PER_WORKER,
        }
    }

    /// Creates a configuration sized to the available hardware parallelism.
    ///
    /// Falls back to a single worker when parallelism cannot be determined.
    #[must_use]
    pub fn from_available_parallelism() -> Self {
        let workers = thread::available_parallelism().unwrap_or_else(|error| {
            warn!(%error, "unable to determine available parallelism; using one worker");
            NonZeroUsize::MIN
        });
        Self::new(workers)
    }

    /// Overrides the vertices-per-worker threshold used by
    /// [`TaskPool::distribute_graph`]. Zero disables the inline path.
    #[must_use]
    pub fn with_items_per_worker(mut self, items_per_worker: usize) -> Self {
        self.items_per_worker = items_per_worker;
        self
    }

    /// Returns the number of workers.
    #[must_use]
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Returns the vertices-per-worker threshold.
    #[must_use]
    pub fn items_per_worker(&self) -> usize {
        self.items_per_worker
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_available_parallelism()
    }
}

#[derive(Default)]
struct State {
    tasks: VecDeque<Job>,
    shutdown: bool,
}

#[derive(Default)]
pub(super) struct Shared {
    state: Mutex<State>,
    available: Condvar,
}

impl Shared {
    // Jobs run outside the lock and catch their own panics, so a poisoned
    // mutex still guards a consistent queue.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, job: Job) {
        self.lock().tasks.push_back(job);
        self.available.notify_one();
    }

    fn next_job(&self) -> Option<Job> {
        let guard = self.lock();
        let mut guard = self
            .available
            .wait_while(guard, |state| !state.shutdown && state.tasks.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        guard.tasks.pop_front()
    }
}

/// Fixed pool of worker threads sharing one FIFO task queue.
///
/// # Examples
/// ```
/// use std::{num::NonZeroUsize, sync::Arc};
///
/// use crowd_core::TaskPool;
///
/// let pool = TaskPool::with_workers(NonZeroUsize::new(2).expect("non-zero"))?;
/// let answer = pool.submit(|| 6 * 7).join()?;
/// assert_eq!(answer, 42);
///
/// let items = Arc::new((1..=10).collect::<Vec<u32>>());
/// let sums = pool.distribute(items, |items, range| items[range].iter().sum::<u32>())?;
/// assert_eq!(sums.len(), 4);
/// assert_eq!(sums.iter().sum::<u32>(), 55);
/// # Ok::<(), crowd_core::PoolError>(())
/// ```
pub struct TaskPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    config: PoolConfig,
}

impl TaskPool {
    /// Starts one worker per available hardware thread (at least one).
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] when a worker thread cannot be started.
    pub fn new() -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::from_available_parallelism())
    }

    /// Starts exactly `workers` worker threads.
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] when a worker thread cannot be started.
    pub fn with_workers(workers: NonZeroUsize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(workers))
    }

    /// Starts a pool from an explicit configuration.
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] when a worker thread cannot be started.
    /// Workers started before the failure are shut down and joined.
    #[instrument(name = "pool.start", skip_all, fields(workers = config.workers.get()))]
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        let mut pool = Self {
            shared: Arc::new(Shared::default()),
            workers: Vec::with_capacity(config.workers.get()),
            config,
        };
        for index in 0..config.workers.get() {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("crowd-worker-{index}"))
                .spawn(move || run_worker(&shared))
                .map_err(|error| PoolError::Spawn {
                    worker: index,
                    message: error.to_string(),
                })?;
            pool.workers.push(handle);
        }
        debug!(workers = pool.workers.len(), "task pool started");
        Ok(pool)
    }

    /// Returns the number of worker threads.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.config.workers.get()
    }

    /// Returns the pool configuration.
    #[must_use]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    #[cfg(test)]
    pub(super) fn shared_weak(&self) -> std::sync::Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    /// Queues `work` and returns a handle yielding its result.
    ///
    /// A panic inside `work` is caught on the worker and reported by
    /// [`TaskHandle::join`].
    pub fn submit<F, T>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);
        self.shared.push(Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(work));
            #[cfg(feature = "metrics")]
            metrics::counter!("crowd_pool_tasks_executed").increment(1);
            // The caller may have dropped the handle.
            let _ = sender.send(outcome);
        }));
        TaskHandle::new(receiver)
    }

    /// Runs `work` over `2 × worker_count` contiguous chunks of `items` and
    /// returns the chunk results in chunk order.
    ///
    /// Each call receives the whole collection and the `[start, end)` range
    /// it owns. Chunks may be empty when `items` is shorter than the chunk
    /// count.
    ///
    /// # Errors
    /// Fails with the first chunk failure in chunk order; no partial results
    /// are returned.
    #[instrument(
        name = "pool.distribute",
        err,
        skip_all,
        fields(items = items.len(), workers = self.worker_count()),
    )]
    pub fn distribute<T, R, F>(&self, items: Arc<Vec<T>>, work: F) -> Result<Vec<R>, PoolError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T], Range<usize>) -> R + Send + Sync + 'static,
    {
        let work = Arc::new(work);
        self.scatter(items.len(), move |range| {
            let items = Arc::clone(&items);
            let work = Arc::clone(&work);
            move || Ok::<R, PoolError>(work(items.as_slice(), range))
        })
    }

    /// Like [`Self::distribute`] for chunk functions that can fail.
    ///
    /// # Errors
    /// Returns the first error in chunk order, whether raised by `work` or by
    /// the pool itself.
    #[instrument(
        name = "pool.try_distribute",
        err(Debug),
        skip_all,
        fields(items = items.len(), workers = self.worker_count()),
    )]
    pub fn try_distribute<T, R, E, F>(&self, items: Arc<Vec<T>>, work: F) -> Result<Vec<R>, E>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        E: From<PoolError> + std::fmt::Debug + Send + 'static,
        F: Fn(&[T], Range<usize>) -> Result<R, E> + Send + Sync + 'static,
    {
        let work = Arc::new(work);
        self.scatter(items.len(), move |range| {
            let items = Arc::clone(&items);
            let work = Arc::clone(&work);
            move || work(items.as_slice(), range)
        })
    }

    /// Runs `work` over contiguous vertex ranges of `graph` and returns the
    /// chunk results in chunk order.
    ///
    /// An empty graph yields no results. A graph with fewer than
    /// `items_per_worker × worker_count` vertices is processed inline as a
    /// single `0..vertex_count` chunk on the calling thread.
    ///
    /// # Errors
    /// Fails with the first chunk failure in chunk order.
    #[instrument(
        name = "pool.distribute_graph",
        err,
        skip_all,
        fields(graph = graph.name(), vertices = graph.vertex_count()),
    )]
    pub fn distribute_graph<G, R, F>(&self, graph: Arc<G>, work: F) -> Result<Vec<R>, PoolError>
    where
        G: GraphSource + Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&G, Range<usize>) -> R + Send + Sync + 'static,
    {
        self.try_distribute_graph(graph, move |graph, range| Ok::<R, PoolError>(work(graph, range)))
    }

    /// Like [`Self::distribute_graph`] for chunk functions that can fail.
    ///
    /// # Errors
    /// Returns the first error in chunk order, whether raised by `work` or by
    /// the pool itself.
    #[instrument(
        name = "pool.try_distribute_graph",
        err(Debug),
        skip_all,
        fields(graph = graph.name(), vertices = graph.vertex_count()),
    )]
    pub fn try_distribute_graph<G, R, E, F>(&self, graph: Arc<G>, work: F) -> Result<Vec<R>, E>
    where
        G: GraphSource + Send + Sync + 'static,
        R: Send + 'static,
        E: From<PoolError> + std::fmt::Debug + Send + 'static,
        F: Fn(&G, Range<usize>) -> Result<R, E> + Send + Sync + 'static,
    {
        let vertex_count = graph.vertex_count();
        if vertex_count == 0 {
            warn!(graph = graph.name(), "graph has no vertices; nothing to distribute");
            return Ok(Vec::new());
        }
        let inline_below = self
            .config
            .items_per_worker
            .saturating_mul(self.worker_count());
        if vertex_count < inline_below {
            debug!(vertex_count, inline_below, "running graph pass inline");
            return Ok(vec![work(&*graph, 0..vertex_count)?]);
        }
        let work = Arc::new(work);
        self.scatter(vertex_count, move |range| {
            let graph = Arc::clone(&graph);
            let work = Arc::clone(&work);
            move || work(&*graph, range)
        })
    }

    fn scatter<R, E, M, J>(&self, len: usize, mut make_job: M) -> Result<Vec<R>, E>
    where
        R: Send + 'static,
        E: From<PoolError> + Send + 'static,
        M: FnMut(Range<usize>) -> J,
        J: FnOnce() -> Result<R, E> + Send + 'static,
    {
        let divisions = self.worker_count().saturating_mul(2);
        let handles: Vec<_> = chunk_ranges(len, divisions)
            .into_iter()
            .map(|range| {
                trace!(start = range.start, end = range.end, "queueing chunk");
                self.submit(make_job(range))
            })
            .collect();
        // Wait for every chunk, even after a failure.
        let outcomes: Vec<_> = handles.into_iter().map(TaskHandle::join).collect();
        outcomes
            .into_iter()
            .map(|outcome| outcome.unwrap_or_else(|error| Err(E::from(error))))
            .collect()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.available.notify_all();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread terminated by panic");
            }
        }
        debug!("task pool stopped");
    }
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn run_worker(shared: &Shared) {
    while let Some(job) = shared.next_job() {
        job();
    }
}
