//! Core building blocks: the per-image transform pipeline, the workload
//! partitioner, run parameters and timing metrics. These are the primitives
//! consumed by the execution strategies in `exec` and the high-level `api`.
pub mod metrics;
pub mod params;
pub mod partition;
pub mod processing;
