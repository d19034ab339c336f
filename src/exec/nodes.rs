//! Simulated multi-node run: each "node" is a thread that exclusively owns one
//! contiguous chunk of the item list and reports a single `RunResult` back to
//! the coordinator once it is done.
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::params::PipelineConfig;
use crate::core::partition::partition;
use crate::core::processing::font::WatermarkFont;
use crate::error::{Error, Result};
use crate::exec::run_chunk;
use crate::types::{ImageItem, RunResult};

pub const DEFAULT_NODES: usize = 2;

/// Per-node results, sorted by node id, plus the coordinator's wall time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedRun {
    pub nodes: Vec<RunResult>,
    pub wall: Duration,
}

impl DistributedRun {
    pub fn processed(&self) -> usize {
        self.nodes.iter().map(|n| n.processed).sum()
    }

    pub fn failed(&self) -> usize {
        self.nodes.iter().map(|n| n.failed).sum()
    }
}

/// Joins every handle, then reports the first node that panicked.
fn join_all(handles: Vec<ScopedJoinHandle<'_, ()>>) -> Result<()> {
    let mut panicked = Vec::new();
    for (index, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            panicked.push(index + 1);
        }
    }
    match panicked.first() {
        None => Ok(()),
        Some(first) => Err(Error::WorkerPool(format!(
            "node {} thread panicked ({} of the nodes failed)",
            first,
            panicked.len()
        ))),
    }
}

/// Partitions `items` across `nodes` workers, runs them concurrently and waits
/// for every node before collecting results. Node ids start at 1.
pub fn run(
    items: &[ImageItem],
    nodes: usize,
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> Result<DistributedRun> {
    let chunks = partition(items, nodes)?;
    let (sender, receiver) = unbounded::<RunResult>();

    let start = Instant::now();
    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let chunk = *chunk;
            let sender = sender.clone();
            let node_id = chunk.worker + 1;
            debug!("Node {} assigned {} images", node_id, chunk.len());

            let handle = thread::Builder::new()
                .name(format!("imgfan-node-{}", node_id))
                .spawn_scoped(scope, move || {
                    let result = run_chunk(node_id, chunk.items, config, font);
                    // receiver outlives the scope
                    let _ = sender.send(result);
                })?;
            handles.push(handle);
        }

        // barrier: every node finishes before anything is aggregated
        join_all(handles)
    })?;
    let wall = start.elapsed();
    drop(sender);

    let mut results: Vec<RunResult> = receiver.try_iter().collect();
    results.sort_by_key(|r| r.worker_id);

    info!(
        "Distributed run over {} nodes finished in {:.2}s",
        results.len(),
        wall.as_secs_f64()
    );
    Ok(DistributedRun {
        nodes: results,
        wall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_panicking_node_is_joined_before_reporting() {
        let result = thread::scope(|scope| {
            let handles = vec![
                scope.spawn(|| {}),
                scope.spawn(|| panic!("node two")),
                scope.spawn(|| panic!("node three")),
            ];
            join_all(handles)
        });
        match result {
            Err(Error::WorkerPool(msg)) => {
                assert!(msg.contains("node 2"), "{msg}");
                assert!(msg.contains("2 of the nodes"), "{msg}");
            }
            other => panic!("expected a worker pool error, got {other:?}"),
        }
    }

    #[test]
    fn zero_nodes_is_rejected() {
        assert!(matches!(
            run(&[], 0, &PipelineConfig::default(), &WatermarkFont::builtin()),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
