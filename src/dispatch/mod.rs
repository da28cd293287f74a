//! Null-safe columnar dispatch
//!
//! Applies a per-row function across a column in fixed-size chunks.
//! The output vector is allocated once and every chunk writes only to its
//! own slice of it, so large columns can be spread over rayon workers
//! without locks. Nulls in the input (or in a per-row parameter) produce
//! nulls in the output without calling the row function.

use crate::config::EngineConfig;
use crate::error::{ColHashError, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Default number of rows per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default row count at which dispatch goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16 * 1024;

/// A parameter that is either one value for every row or one value per row
#[derive(Debug, Clone, Copy)]
pub enum Broadcast<'a, T> {
    /// Same value for every row; `None` nulls every row
    Scalar(Option<T>),
    /// One value per row
    Column(&'a [Option<T>]),
}

impl<'a, T: Copy> Broadcast<'a, T> {
    /// Shape a parameter column against an input of `rows` rows.
    ///
    /// A single-row parameter is broadcast; any other length must match.
    pub fn for_rows(values: &'a [Option<T>], rows: usize) -> Result<Self> {
        match values.len() {
            n if n == rows => Ok(Self::Column(values)),
            1 => Ok(Self::Scalar(values[0])),
            n => Err(ColHashError::LengthMismatch {
                expected: rows,
                actual: n,
            }),
        }
    }

    /// Value for row `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Self::Scalar(v) => *v,
            Self::Column(values) => values[index],
        }
    }
}

/// Wrap a row function so that null rows short-circuit to null.
///
/// This is the only place nulls are handled; algorithms only ever see
/// present values.
#[inline]
pub fn null_safe<T, S, O, F>(f: F) -> impl Fn(&Option<T>, &mut S) -> Option<O>
where
    F: Fn(&T, &mut S) -> O,
{
    move |value, scratch| value.as_ref().map(|v| f(v, scratch))
}

/// Fallible variant of [`null_safe`]
#[inline]
pub fn try_null_safe<T, S, O, F>(f: F) -> impl Fn(&Option<T>, &mut S) -> Result<Option<O>>
where
    F: Fn(&T, &mut S) -> Result<O>,
{
    move |value, scratch| value.as_ref().map(|v| f(v, scratch)).transpose()
}

/// Chunked element-wise executor
#[derive(Debug, Clone)]
pub struct Dispatcher {
    chunk_size: usize,
    parallel_threshold: usize,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            pool: None,
        }
    }
}

impl Dispatcher {
    /// Create a dispatcher from engine settings.
    ///
    /// `threads == 0` uses rayon's global pool; anything else gets a
    /// dedicated pool of that size.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let pool = if config.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .thread_name(|i| format!("colhash-worker-{}", i))
                .build()
                .map_err(|e| ColHashError::ThreadPool(e.to_string()))?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            chunk_size: config.chunk_size.max(1),
            parallel_threshold: config.parallel_threshold,
            pool,
        })
    }

    /// Override the chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Override the parallel threshold
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Rows per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether a column of `rows` rows is processed in parallel
    pub fn is_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_threshold && rows > self.chunk_size
    }

    /// Apply `f` to every non-null row
    pub fn map<T, O, F>(&self, input: &[Option<T>], f: F) -> Result<Vec<Option<O>>>
    where
        T: Sync,
        O: Send,
        F: Fn(&T) -> O + Sync,
    {
        self.map_with(input, |v, _: &mut ()| f(v))
    }

    /// Apply `f` to every non-null row with a scratch value reused per chunk
    pub fn map_with<T, S, O, F>(&self, input: &[Option<T>], f: F) -> Result<Vec<Option<O>>>
    where
        T: Sync,
        S: Default,
        O: Send,
        F: Fn(&T, &mut S) -> O + Sync,
    {
        let row = null_safe(f);
        self.drive(input.len(), |start, out| {
            let mut scratch = S::default();
            for (slot, value) in out.iter_mut().zip(&input[start..]) {
                *slot = row(value, &mut scratch);
            }
            Ok(())
        })
    }

    /// Apply a fallible `f` to every non-null row; the first error aborts
    pub fn try_map<T, O, F>(&self, input: &[Option<T>], f: F) -> Result<Vec<Option<O>>>
    where
        T: Sync,
        O: Send,
        F: Fn(&T) -> Result<O> + Sync,
    {
        let row = try_null_safe(|v: &T, _: &mut ()| f(v));
        self.drive(input.len(), |start, out| {
            for (slot, value) in out.iter_mut().zip(&input[start..]) {
                *slot = row(value, &mut ())?;
            }
            Ok(())
        })
    }

    /// Apply a fallible `f` to every row where both input and parameter are non-null
    pub fn try_map_with_param<T, P, O, F>(
        &self,
        input: &[Option<T>],
        param: Broadcast<'_, P>,
        f: F,
    ) -> Result<Vec<Option<O>>>
    where
        T: Sync,
        P: Copy + Sync,
        O: Send,
        F: Fn(&T, P) -> Result<O> + Sync,
    {
        if let Broadcast::Column(values) = param {
            if values.len() != input.len() {
                return Err(ColHashError::LengthMismatch {
                    expected: input.len(),
                    actual: values.len(),
                });
            }
        }

        self.drive(input.len(), |start, out| {
            for (offset, slot) in out.iter_mut().enumerate() {
                let index = start + offset;
                *slot = match (&input[index], param.get(index)) {
                    (Some(value), Some(p)) => Some(f(value, p)?),
                    _ => None,
                };
            }
            Ok(())
        })
    }

    /// Allocate the output once and run `body` over each chunk of it.
    ///
    /// `body` receives the chunk's first row index and its output slice.
    fn drive<O, B>(&self, rows: usize, body: B) -> Result<Vec<Option<O>>>
    where
        O: Send,
        B: Fn(usize, &mut [Option<O>]) -> Result<()> + Sync,
    {
        let mut out: Vec<Option<O>> = Vec::with_capacity(rows);
        out.resize_with(rows, || None);

        let chunk_size = self.chunk_size;
        let parallel = self.is_parallel(rows);
        tracing::debug!(
            rows,
            chunk_size,
            chunks = rows.div_ceil(chunk_size),
            parallel,
            "dispatching column"
        );

        if parallel {
            match &self.pool {
                Some(pool) => pool.install(|| run_parallel(&mut out, chunk_size, &body))?,
                None => run_parallel(&mut out, chunk_size, &body)?,
            }
        } else {
            for (k, chunk) in out.chunks_mut(chunk_size).enumerate() {
                body(k * chunk_size, chunk)?;
            }
        }

        Ok(out)
    }
}

fn run_parallel<O, B>(out: &mut [Option<O>], chunk_size: usize, body: &B) -> Result<()>
where
    O: Send,
    B: Fn(usize, &mut [Option<O>]) -> Result<()> + Sync,
{
    out.par_chunks_mut(chunk_size)
        .enumerate()
        .try_for_each(|(k, chunk)| body(k * chunk_size, chunk))
}
