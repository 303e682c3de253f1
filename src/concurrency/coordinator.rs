use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::error::SpectrogramError;

/// Worker count of the pool that evaluates sub-cuts: one per candidate half
/// (top, bottom, left, right).
pub const CUT_WORKERS: usize = 4;

/// Recursion depth below which sub-cuts are dispatched to the pool.
pub const DEFAULT_FORK_DEPTH: usize = 2;

/// Decides where independent tasks run: inline on the calling thread, or on a
/// dedicated `rayon` pool.
///
/// The coordinator only schedules. Task results do not depend on it, so a
/// sequential and a threaded coordinator produce identical output.
///
/// # Examples
/// ```
/// use adaptive_spectrogram::concurrency::Coordinator;
/// let coordinator = Coordinator::threaded(4).unwrap();
/// let (a, b, c, d) = coordinator.join4(0, || 1, || 2, || 3, || 4);
/// assert_eq!(a + b + c + d, 10);
/// ```
#[derive(Debug)]
pub struct Coordinator {
    pool: Option<ThreadPool>,
    fork_depth: usize,
}

impl Coordinator {
    /// Runs every task inline on the caller.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            fork_depth: 0,
        }
    }

    /// Spawns a pool of `workers` threads, reused for every submitted batch.
    ///
    /// # Errors
    /// `InvalidParameter` for zero workers, `ThreadPool` if the threads cannot be created.
    pub fn threaded(workers: usize) -> Result<Self, SpectrogramError> {
        if workers == 0 {
            return Err(SpectrogramError::InvalidParameter(
                "Worker count must be positive".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("adaptive-spectrogram-{}", i))
            .build()?;
        Ok(Self {
            pool: Some(pool),
            fork_depth: DEFAULT_FORK_DEPTH,
        })
    }

    /// Sets how many recursion levels may fork onto the pool.
    pub fn with_fork_depth(mut self, fork_depth: usize) -> Self {
        self.fork_depth = fork_depth;
        self
    }

    pub fn is_threaded(&self) -> bool {
        self.pool.is_some()
    }

    /// Threads available to submitted tasks (1 when sequential).
    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(1, |pool| pool.current_num_threads())
    }

    pub fn fork_depth(&self) -> usize {
        self.fork_depth
    }

    /// Whether tasks submitted at recursion `depth` go to the pool.
    pub fn should_fork(&self, depth: usize) -> bool {
        self.pool.is_some() && depth < self.fork_depth
    }

    /// Runs two independent tasks and waits for both.
    pub fn join<A, B, RA, RB>(&self, depth: usize, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        match &self.pool {
            Some(pool) if self.should_fork(depth) => pool.install(|| rayon::join(a, b)),
            _ => (a(), b()),
        }
    }

    /// Runs four independent tasks and waits for all of them.
    ///
    /// Tasks are dispatched to the pool when [`should_fork`](Self::should_fork)
    /// holds for `depth`; otherwise they run in order on the caller.
    pub fn join4<A, B, C, D, RA, RB, RC, RD>(
        &self,
        depth: usize,
        a: A,
        b: B,
        c: C,
        d: D,
    ) -> (RA, RB, RC, RD)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        C: FnOnce() -> RC + Send,
        D: FnOnce() -> RD + Send,
        RA: Send,
        RB: Send,
        RC: Send,
        RD: Send,
    {
        match &self.pool {
            Some(pool) if self.should_fork(depth) => pool.install(|| {
                let ((ra, rb), (rc, rd)) = rayon::join(|| rayon::join(a, b), || rayon::join(c, d));
                (ra, rb, rc, rd)
            }),
            _ => (a(), b(), c(), d()),
        }
    }

    /// Applies `f` to every item, one task per item, and waits for all of them.
    ///
    /// Each task gets exclusive access to its own item; the first error encountered is returned.
    pub fn try_for_each_mut<T, E, F>(&self, items: &mut [T], f: F) -> Result<(), E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut T) -> Result<(), E> + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| {
                items
                    .par_iter_mut()
                    .enumerate()
                    .try_for_each(|(i, item)| f(i, item))
            }),
            None => items
                .iter_mut()
                .enumerate()
                .try_for_each(|(i, item)| f(i, item)),
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::sequential()
    }
}
