//! Contiguous split of an ordered item list across a fixed number of workers.
use tracing::debug;

use crate::error::{Error, Result};

/// A contiguous run of items owned by exactly one worker.
#[derive(Debug, PartialEq, Eq)]
pub struct WorkChunk<'a, T> {
    /// Zero-based position of the chunk, equal to the index of its worker
    pub worker: usize,
    pub items: &'a [T],
}

impl<T> WorkChunk<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for WorkChunk<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WorkChunk<'_, T> {}

/// Splits `items` into `workers` chunks of `len / workers` items each, with the
/// last chunk taking whatever the integer division left over.
///
/// Concatenating the chunks in order yields `items` unchanged. When there are
/// fewer items than workers the leading chunks are empty.
pub fn partition<T>(items: &[T], workers: usize) -> Result<Vec<WorkChunk<'_, T>>> {
    if workers == 0 {
        return Err(Error::InvalidArgument {
            arg: "workers",
            value: workers.to_string(),
        });
    }

    let base = items.len() / workers;
    let mut chunks = Vec::with_capacity(workers);
    for worker in 0..workers {
        let start = worker * base;
        let end = if worker == workers - 1 {
            items.len()
        } else {
            start + base
        };
        chunks.push(WorkChunk {
            worker,
            items: &items[start..end],
        });
    }

    debug!(
        "Partitioned {} items into {} chunks (base={}, last={})",
        items.len(),
        workers,
        base,
        chunks.last().map_or(0, |c| c.len())
    );
    Ok(chunks)
}
