//! Summary statistics of goodness distributions.

use crate::ScoredPartition;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Six-number summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Minimum value.
    pub min: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub p75: f64,
    /// Maximum value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

/// Percentile of sorted non-empty `values`, linearly interpolated between the closest ranks.
///
/// Matches `scipy.stats.scoreatpercentile`, which none of the `statrs` quantile estimators do.
fn percentile(sorted: &[f64], percent: f64) -> f64 {
    let rank = percent / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor();
    let fraction = rank - lower;
    let lower = lower as usize;
    match sorted.get(lower + 1) {
        Some(upper) if fraction > 0.0 => sorted[lower] + (upper - sorted[lower]) * fraction,
        _ => sorted[lower],
    }
}

impl Summary {
    /// Summarizes `values`, or returns `None` if there are none.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted: Vec<_> = values
            .into_iter()
            .sorted_by_key(|&v| OrderedFloat(v))
            .collect();
        if sorted.is_empty() {
            return None;
        }
        Some(Self {
            min: Statistics::min(sorted.iter()),
            p25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            max: Statistics::max(sorted.iter()),
            mean: sorted.iter().mean(),
        })
    }
}

/// Distribution of goodness over all partitions of one workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessSummary {
    /// Summary of finite scores; `None` if every partition is degenerate.
    pub scores: Option<Summary>,
    /// Number of summarized partitions.
    pub partitions: usize,
    /// Number of partitions with degenerate goodness.
    pub degenerate: usize,
}

impl GoodnessSummary {
    /// Summarizes the goodness of `scored` partitions.
    #[must_use]
    pub fn of(scored: &[ScoredPartition]) -> Self {
        let degenerate = scored
            .iter()
            .filter(|s| s.goodness.is_degenerate())
            .count();
        Self {
            scores: Summary::of(scored.iter().filter_map(|s| s.goodness.value())),
            partitions: scored.len(),
            degenerate,
        }
    }
}

/// Accumulates goodness summaries of many workloads.
///
/// Each statistic of the per-workload summaries is collected separately, and can then be
/// summarized across workloads, e.g., the distribution of the best goodness per workload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStatistics {
    min: Vec<f64>,
    p25: Vec<f64>,
    median: Vec<f64>,
    p75: Vec<f64>,
    max: Vec<f64>,
    mean: Vec<f64>,
    skipped: usize,
}

/// Summaries of each per-workload statistic across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Summary of per-workload minimums.
    pub min: Summary,
    /// Summary of per-workload 25th percentiles.
    pub p25: Summary,
    /// Summary of per-workload medians.
    pub median: Summary,
    /// Summary of per-workload 75th percentiles.
    pub p75: Summary,
    /// Summary of per-workload maximums.
    pub max: Summary,
    /// Summary of per-workload means.
    pub mean: Summary,
}

impl BatchStatistics {
    /// Constructs an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workload summary. Summaries without any finite score are counted as skipped.
    pub fn push(&mut self, summary: &GoodnessSummary) {
        match summary.scores {
            Some(scores) => {
                self.min.push(scores.min);
                self.p25.push(scores.p25);
                self.median.push(scores.median);
                self.p75.push(scores.p75);
                self.max.push(scores.max);
                self.mean.push(scores.mean);
            }
            None => self.skipped += 1,
        }
    }

    /// Number of accumulated workloads with at least one finite score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.min.len()
    }

    /// Checks if no workload with a finite score was accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }

    /// Number of workloads skipped because all their partitions were degenerate.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Summarizes each statistic across the batch, or returns `None` if empty.
    #[must_use]
    pub fn summarize(&self) -> Option<BatchSummary> {
        let summarize = |values: &[f64]| Summary::of(values.iter().copied());
        Some(BatchSummary {
            min: summarize(&self.min)?,
            p25: summarize(&self.p25)?,
            median: summarize(&self.median)?,
            p75: summarize(&self.p75)?,
            max: summarize(&self.max)?,
            mean: summarize(&self.mean)?,
        })
    }
}
