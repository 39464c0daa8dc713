//! This crate evaluates assignments of storage read requests to either a sequential-scan or an
//! index-scan path.
//!
//! Every 2-way partition of a workload is enumerated, the operating point of each partition is
//! looked up in a [`PerformanceModel`](trait.PerformanceModel.html), and the partition is scored
//! by its aggregate deadline slack, called _goodness_.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::cast_precision_loss
)]
#![deny(unsafe_code)]

mod array;
mod evaluate;
mod model;
mod partition;
mod request;
mod stats;

pub use evaluate::{
    evaluate, goodness, latency, Degeneracy, Evaluator, Goodness, Ranking, ScanPath,
    ScoredPartition, ScoredPartitions, DEFAULT_MAX_WORKLOAD_SIZE,
};
pub use model::{
    DomainPolicy, OperatingPoint, OperatingPointTable, PerformanceModel, IDX_IOPS_FIELD,
    SEQ_IOPS_FIELD,
};
pub use partition::{
    partition_count, partitions_of_size, two_subset_partitions, Partition, SizedPartitions,
    TwoSubsetPartitions,
};
pub use request::{Request, Workload};
pub use stats::{BatchStatistics, BatchSummary, GoodnessSummary, Summary};

/// Error type encompassing all evaluation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The model does not cover the requested concurrency configuration.
    #[error(
        "Model does not cover {idx_count} concurrent index scans with {seq_count} sequential \
         scans (modeled levels: {levels})."
    )]
    InvalidModelDomain {
        /// Number of requests assigned to the sequential path.
        seq_count: usize,
        /// Number of requests assigned to the index path.
        idx_count: usize,
        /// Number of modeled index-scan concurrency levels.
        levels: usize,
    },
    /// A throughput required to score a partition is zero, negative, or not finite.
    #[error("Degenerate {path} throughput: {iops}")]
    DegenerateThroughput {
        /// Path whose throughput is degenerate.
        path: ScanPath,
        /// The offending throughput.
        iops: f64,
    },
    /// The aggregate slack of a partition does not fit in a finite `f64`.
    #[error("Goodness is not finite")]
    SlackOverflow,
    /// The workload is too large to be exhaustively enumerated.
    #[error("Workload of size {size} exceeds the enumeration limit of {limit}.")]
    WorkloadSizeOverflow {
        /// Workload size.
        size: usize,
        /// Maximum allowed size.
        limit: usize,
    },
    /// Request with an invalid deadline.
    #[error("Invalid request deadline: {0}")]
    InvalidRequest(f64),
    /// Performance model could not be constructed.
    #[error("Invalid performance model: {0}")]
    InvalidModel(String),
}

/// Result alias using [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;

array_wrapper!(
    IopsCurve,
    f64,
    "Throughput as a function of index-scan concurrency."
);
