//! Scoring partitions of a workload against a performance model.

use crate::partition::{partition_count, partitions_of_size, Partition, SizedPartitions};
use crate::{Error, OperatingPoint, PerformanceModel, Request, Result};
use indicatif::ProgressBar;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use std::iter::FusedIterator;

/// By default, workloads larger than this are refused by the [`Evaluator`](struct.Evaluator.html).
pub const DEFAULT_MAX_WORKLOAD_SIZE: usize = 20;

/// One of the two execution paths a request can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPath {
    /// Sequential scan.
    Sequential,
    /// Index scan.
    Index,
}

impl fmt::Display for ScanPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Index => write!(f, "index"),
        }
    }
}

/// Describes why a partition could not be scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    /// The model returned a zero, negative, or non-finite throughput for a non-empty side.
    Throughput {
        /// Path with the unusable throughput.
        path: ScanPath,
        /// Throughput the model returned for the path.
        iops: f64,
    },
    /// The slack summed over the requests is not finite.
    SlackOverflow,
}

/// Aggregate deadline slack of a partition, or the reason it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goodness {
    /// Finite score; higher is better.
    Score(f64),
    /// No finite score exists for the partition.
    Degenerate(Degeneracy),
}

impl Goodness {
    /// Returns the score if it is not degenerate.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Score(value) => Some(*value),
            Self::Degenerate(_) => None,
        }
    }

    /// Checks if the partition could not be scored.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }

    /// Returns the score or negative infinity if degenerate.
    #[must_use]
    pub fn or_neg_infinity(&self) -> f64 {
        self.value().unwrap_or(f64::NEG_INFINITY)
    }

    /// Returns the score.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateThroughput`](enum.Error.html) or
    /// [`Error::SlackOverflow`](enum.Error.html) if degenerate.
    pub fn value_or_err(&self) -> Result<f64> {
        match self {
            Self::Score(value) => Ok(*value),
            Self::Degenerate(Degeneracy::Throughput { path, iops }) => {
                Err(Error::DegenerateThroughput {
                    path: *path,
                    iops: *iops,
                })
            }
            Self::Degenerate(Degeneracy::SlackOverflow) => Err(Error::SlackOverflow),
        }
    }
}

/// A partition together with its goodness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPartition {
    /// Position of the partition in the enumeration order.
    pub ordinal: usize,
    /// Goodness of the partition.
    pub goodness: Goodness,
    /// The evaluated partition.
    pub partition: Partition<Request>,
}

/// Time in seconds to read `blocks` 4K blocks at `iops` blocks per second.
#[must_use]
pub fn latency(blocks: u64, iops: f64) -> f64 {
    blocks as f64 / iops
}

fn slack(requests: &[Request], iops: f64, path: ScanPath) -> std::result::Result<f64, Degeneracy> {
    if requests.is_empty() {
        return Ok(0.0);
    }
    if !(iops.is_finite() && iops > 0.0) {
        return Err(Degeneracy::Throughput { path, iops });
    }
    finite(
        requests
            .iter()
            .map(|request| request.deadline() - latency(request.blocks(), iops))
            .sum(),
    )
}

fn finite(value: f64) -> std::result::Result<f64, Degeneracy> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Degeneracy::SlackOverflow)
    }
}

/// Calculates the goodness of `partition` at the operating point `point`.
///
/// Each request contributes its deadline minus its latency on the assigned path. An empty side
/// contributes zero regardless of its throughput. A partition whose total is not finite is
/// degenerate, no matter how its requests are split.
#[must_use]
pub fn goodness(partition: &Partition<Request>, point: OperatingPoint) -> Goodness {
    let sequential = slack(&partition.sequential, point.seq_iops, ScanPath::Sequential);
    let index = slack(&partition.index, point.idx_iops, ScanPath::Index);
    match sequential.and_then(|seq| index.and_then(|idx| finite(seq + idx))) {
        Ok(value) => Goodness::Score(value),
        Err(degeneracy) => Goodness::Degenerate(degeneracy),
    }
}

/// Scores all partitions of `workload` with the default [`Evaluator`](struct.Evaluator.html)
/// settings. Results are in enumeration order.
///
/// # Errors
///
/// See [`Evaluator::evaluate`](struct.Evaluator.html#method.evaluate).
pub fn evaluate<M>(workload: &[Request], model: &M) -> Result<Vec<ScoredPartition>>
where
    M: PerformanceModel + ?Sized,
{
    Evaluator::new(model).evaluate(workload)
}

/// Evaluates workload partitions against a performance model.
pub struct Evaluator<'m, M: ?Sized> {
    model: &'m M,
    max_workload_size: usize,
    allow_oversize: bool,
    parallel: bool,
    progress_bar: Option<ProgressBar>,
}

macro_rules! builder_property {
    ($prop:ident, $t:ty, $doc:literal) => {
        #[doc = $doc]
        pub fn $prop(&mut self, $prop: $t) -> &mut Self {
            self.$prop = $prop;
            self
        }
    };
}

impl<'m, M> Evaluator<'m, M>
where
    M: PerformanceModel + ?Sized,
{
    /// Constructs an evaluator for the given model.
    ///
    /// # Defaults
    ///
    /// Workloads larger than [`DEFAULT_MAX_WORKLOAD_SIZE`](constant.DEFAULT_MAX_WORKLOAD_SIZE.html)
    /// are refused, and evaluation runs on the current thread.
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            max_workload_size: DEFAULT_MAX_WORKLOAD_SIZE,
            allow_oversize: false,
            parallel: false,
            progress_bar: None,
        }
    }

    builder_property!(
        max_workload_size,
        usize,
        "Sets the largest workload size that will be enumerated."
    );
    builder_property!(
        allow_oversize,
        bool,
        "Allows enumerating workloads larger than the maximum size."
    );
    builder_property!(
        parallel,
        bool,
        "Evaluates partitions of different sizes on the rayon thread pool."
    );

    /// Sets a progress bar that advances with each scored partition.
    pub fn progress_bar(&mut self, progress_bar: ProgressBar) -> &mut Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    /// Returns the number of partitions of `workload`, if it can be enumerated.
    fn check_size(&self, workload: &[Request]) -> Result<usize> {
        let size = workload.len();
        let count = partition_count(size).ok_or(Error::WorkloadSizeOverflow {
            size,
            limit: usize::BITS as usize - 1,
        })?;
        if size > self.max_workload_size && !self.allow_oversize {
            return Err(Error::WorkloadSizeOverflow {
                size,
                limit: self.max_workload_size,
            });
        }
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_length(count as u64);
        }
        Ok(count)
    }

    /// Lazily scores the partitions of `workload` in enumeration order.
    ///
    /// A model lookup failure is returned once, after which the iterator ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkloadSizeOverflow`](enum.Error.html) if the workload is too large.
    pub fn iter<'w>(&self, workload: &'w [Request]) -> Result<ScoredPartitions<'w, 'm, M>> {
        self.check_size(workload)?;
        Ok(ScoredPartitions {
            model: self.model,
            workload,
            current: partitions_of_size(workload, 0),
            point: None,
            ordinal: 0,
            failed: false,
            progress_bar: self.progress_bar.clone(),
        })
    }

    /// Scores all partitions of `workload`. Results are in enumeration order, also when
    /// evaluated in parallel.
    ///
    /// Partitions with degenerate throughput are flagged in their goodness and do not abort the
    /// evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the workload is too large or the model does not cover a required
    /// concurrency configuration.
    pub fn evaluate(&self, workload: &[Request]) -> Result<Vec<ScoredPartition>> {
        let count = self.check_size(workload)?;
        log::debug!(
            "Evaluating {} partitions of a workload of {} requests",
            count,
            workload.len()
        );
        let scored = if self.parallel {
            let shards = (0..=workload.len())
                .into_par_iter()
                .map(|size| self.evaluate_size(workload, size))
                .collect::<Result<Vec<_>>>()?;
            shards
                .into_iter()
                .flatten()
                .enumerate()
                .map(|(ordinal, mut scored)| {
                    scored.ordinal = ordinal;
                    scored
                })
                .collect()
        } else {
            self.iter(workload)?.collect::<Result<Vec<_>>>()?
        };
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.finish();
        }
        let degenerate = scored.iter().filter(|s| s.goodness.is_degenerate()).count();
        if degenerate > 0 {
            log::warn!(
                "{} of {} partitions have degenerate throughput",
                degenerate,
                scored.len()
            );
        }
        Ok(scored)
    }

    /// Scores all partitions with exactly `size` sequential requests. Ordinals are left zero.
    fn evaluate_size(&self, workload: &[Request], size: usize) -> Result<Vec<ScoredPartition>> {
        let point = self.model.lookup(size, workload.len() - size)?;
        Ok(partitions_of_size(workload, size)
            .map(|partition| {
                if let Some(progress_bar) = &self.progress_bar {
                    progress_bar.inc(1);
                }
                ScoredPartition {
                    ordinal: 0,
                    goodness: goodness(&partition, point),
                    partition,
                }
            })
            .collect())
    }

    /// Scores and ranks all partitions of `workload`.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](#method.evaluate).
    pub fn rank(&self, workload: &[Request]) -> Result<Ranking> {
        self.evaluate(workload).map(Ranking::new)
    }

    /// Finds the partition with the highest goodness without storing all partitions.
    /// Among equal scores, the earliest enumerated partition wins.
    ///
    /// Returns `None` if no partition has a finite score.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](#method.evaluate).
    pub fn best(&self, workload: &[Request]) -> Result<Option<ScoredPartition>> {
        let mut best: Option<ScoredPartition> = None;
        for scored in self.iter(workload)? {
            let scored = scored?;
            if let Some(value) = scored.goodness.value() {
                if best
                    .as_ref()
                    .map_or(true, |b| value > b.goodness.or_neg_infinity())
                {
                    best = Some(scored);
                }
            }
        }
        Ok(best)
    }
}

/// Lazy sequence of scored partitions.
///
/// See [`Evaluator::iter`](struct.Evaluator.html#method.iter).
pub struct ScoredPartitions<'w, 'm, M: ?Sized> {
    model: &'m M,
    workload: &'w [Request],
    current: SizedPartitions<'w, Request>,
    point: Option<OperatingPoint>,
    ordinal: usize,
    failed: bool,
    progress_bar: Option<ProgressBar>,
}

impl<'w, 'm, M> Iterator for ScoredPartitions<'w, 'm, M>
where
    M: PerformanceModel + ?Sized,
{
    type Item = Result<ScoredPartition>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed {
            let size = self.current.size();
            let point = match self.point {
                Some(point) => point,
                None => match self.model.lookup(size, self.workload.len() - size) {
                    Ok(point) => *self.point.get_or_insert(point),
                    Err(err) => {
                        self.failed = true;
                        return Some(Err(err));
                    }
                },
            };
            if let Some(partition) = self.current.next() {
                let ordinal = self.ordinal;
                self.ordinal += 1;
                if let Some(progress_bar) = &self.progress_bar {
                    progress_bar.inc(1);
                }
                return Some(Ok(ScoredPartition {
                    ordinal,
                    goodness: goodness(&partition, point),
                    partition,
                }));
            }
            if size >= self.workload.len() {
                return None;
            }
            self.current = partitions_of_size(self.workload, size + 1);
            self.point = None;
        }
        None
    }
}

impl<'w, 'm, M> FusedIterator for ScoredPartitions<'w, 'm, M> where
    M: PerformanceModel + ?Sized
{
}

/// Scored partitions ordered from the highest to the lowest goodness.
///
/// Ties are ordered by enumeration ordinal, so equal inputs always produce equal rankings.
/// Partitions with degenerate goodness are kept aside and never ranked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    ranked: Vec<ScoredPartition>,
    degenerate: Vec<ScoredPartition>,
}

impl Ranking {
    /// Ranks the given scored partitions.
    #[must_use]
    pub fn new(scored: Vec<ScoredPartition>) -> Self {
        let (mut ranked, degenerate): (Vec<_>, Vec<_>) = scored
            .into_iter()
            .partition(|scored| !scored.goodness.is_degenerate());
        ranked.sort_by_key(|scored| {
            (
                Reverse(OrderedFloat(scored.goodness.or_neg_infinity())),
                scored.ordinal,
            )
        });
        Self { ranked, degenerate }
    }

    /// The partition with the highest goodness.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredPartition> {
        self.ranked.first()
    }

    /// Ranked partitions, best first.
    #[must_use]
    pub fn ranked(&self) -> &[ScoredPartition] {
        &self.ranked
    }

    /// Up to `n` best partitions.
    #[must_use]
    pub fn top(&self, n: usize) -> &[ScoredPartition] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    /// Partitions excluded from the ranking, in enumeration order.
    #[must_use]
    pub fn degenerate(&self) -> &[ScoredPartition] {
        &self.degenerate
    }

    /// Returns the ranked partitions, best first.
    #[must_use]
    pub fn into_ranked(self) -> Vec<ScoredPartition> {
        self.ranked
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{OperatingPointTable, Workload};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn single_request_model(seq_count: usize, idx_count: usize) -> Result<OperatingPoint> {
        match (seq_count.min(1), idx_count) {
            (0, 1) => Ok(OperatingPoint::new(100.0, 500.0)),
            (1, 0) => Ok(OperatingPoint::new(50.0, 200.0)),
            _ => Err(Error::InvalidModelDomain {
                seq_count,
                idx_count,
                levels: 2,
            }),
        }
    }

    fn uniform_model(seq_count: usize, idx_count: usize) -> Result<OperatingPoint> {
        if idx_count > 16 {
            return Err(Error::InvalidModelDomain {
                seq_count,
                idx_count,
                levels: 17,
            });
        }
        let penalty = if seq_count > 0 { 2.0 } else { 1.0 };
        Ok(OperatingPoint::new(
            8000.0 / (idx_count + 1) as f64,
            1000.0 / (idx_count as f64 * penalty + 1.0),
        ))
    }

    fn workload(pairs: &[(u64, f64)]) -> Workload {
        Workload::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_single_request() -> Result<()> {
        let workload = workload(&[(4096, 10.0)]);
        let scored = evaluate(&workload, &single_request_model)?;
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].partition.sizes(), (0, 1));
        assert_abs_diff_eq!(
            scored[0].goodness.value().unwrap(),
            10.0 - 4096.0 / 500.0,
            epsilon = 1e-9
        );
        assert_eq!(scored[1].partition.sizes(), (1, 0));
        assert_abs_diff_eq!(
            scored[1].goodness.value().unwrap(),
            10.0 - 4096.0 / 50.0,
            epsilon = 1e-9
        );
        let ranking = Ranking::new(scored);
        assert_eq!(ranking.best().map(|s| s.ordinal), Some(0));
        assert_eq!(ranking.ranked()[1].ordinal, 1);
        Ok(())
    }

    #[test]
    fn test_empty_workload() -> Result<()> {
        let zero =
            |_: usize, _: usize| -> Result<OperatingPoint> { Ok(OperatingPoint::new(0.0, 0.0)) };
        let scored = evaluate(&[], &zero)?;
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].goodness, Goodness::Score(0.0));
        assert!(scored[0].partition.is_empty());
        Ok(())
    }

    #[test]
    fn test_duplicate_requests() -> Result<()> {
        let workload = workload(&[(10, 1.0), (10, 1.0)]);
        let scored = evaluate(&workload, &uniform_model)?;
        let sizes: Vec<_> = scored.iter().map(|s| s.partition.sizes()).collect();
        assert_eq!(sizes, vec![(0, 2), (1, 1), (1, 1), (2, 0)]);
        assert_eq!(scored[1].goodness, scored[2].goodness);
        let ordinals: Vec<_> = scored.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_goodness_sums_both_sides() {
        let partition = Partition {
            sequential: vec![
                Request::new(1000, 10.0).unwrap(),
                Request::new(500, 1.0).unwrap(),
            ],
            index: vec![Request::new(30, 2.0).unwrap()],
        };
        let value = goodness(&partition, OperatingPoint::new(100.0, 10.0)).value_or_err();
        // (10 - 10) + (1 - 5) + (2 - 3)
        assert_abs_diff_eq!(value.unwrap(), -5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_throughput_is_flagged() -> Result<()> {
        let model = |_: usize, idx_count: usize| -> Result<OperatingPoint> {
            let idx_iops = if idx_count == 2 { 0.0 } else { 100.0 };
            Ok(OperatingPoint::new(100.0, idx_iops))
        };
        let workload = workload(&[(100, 5.0), (1, 5.0)]);
        let scored = evaluate(&workload, &model)?;
        assert_eq!(
            scored[0].goodness,
            Goodness::Degenerate(Degeneracy::Throughput {
                path: ScanPath::Index,
                iops: 0.0
            })
        );
        assert_eq!(
            scored[0].goodness.value_or_err(),
            Err(Error::DegenerateThroughput {
                path: ScanPath::Index,
                iops: 0.0
            })
        );
        assert_eq!(scored[0].goodness.or_neg_infinity(), f64::NEG_INFINITY);
        assert!(scored[1..].iter().all(|s| !s.goodness.is_degenerate()));
        let ranking = Ranking::new(scored);
        assert_eq!(ranking.ranked().len(), 3);
        assert_eq!(ranking.degenerate().len(), 1);
        assert_eq!(ranking.degenerate()[0].ordinal, 0);
        assert!(ranking.ranked().iter().all(|s| s.ordinal != 0));
        Ok(())
    }

    #[test]
    fn test_invalid_throughputs_are_flagged() {
        let partition = Partition {
            sequential: vec![Request::new(1, 1.0).unwrap()],
            index: vec![],
        };
        for &iops in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(goodness(&partition, OperatingPoint::new(iops, 1.0)).is_degenerate());
        }
        assert!(!goodness(&partition, OperatingPoint::new(1.0, 0.0)).is_degenerate());
    }

    #[test]
    fn test_slack_overflow_is_flagged() -> Result<()> {
        let huge = Request::new(0, 1e308)?;
        let unit =
            |_: usize, _: usize| -> Result<OperatingPoint> { Ok(OperatingPoint::new(1.0, 1.0)) };
        let split = Partition {
            sequential: vec![huge],
            index: vec![huge],
        };
        let same_side = Partition {
            sequential: vec![huge, huge],
            index: vec![],
        };
        let point = OperatingPoint::new(1.0, 1.0);
        for partition in &[split, same_side] {
            assert_eq!(goodness(partition, point), Goodness::Degenerate(Degeneracy::SlackOverflow));
        }
        let single = Partition {
            sequential: vec![huge],
            index: vec![],
        };
        assert_eq!(goodness(&single, point), Goodness::Score(1e308));
        assert_eq!(
            Goodness::Degenerate(Degeneracy::SlackOverflow).value_or_err(),
            Err(Error::SlackOverflow)
        );
        let ranking = Evaluator::new(&unit).rank(&[huge, huge])?;
        assert!(ranking.best().is_none());
        assert_eq!(ranking.degenerate().len(), 4);
        Ok(())
    }

    #[test]
    fn test_empty_side_ignores_throughput() {
        let partition = Partition {
            sequential: vec![],
            index: vec![Request::new(10, 1.0).unwrap()],
        };
        assert_eq!(
            goodness(&partition, OperatingPoint::new(0.0, 10.0)),
            Goodness::Score(0.0)
        );
    }

    #[test]
    fn test_model_domain_error_aborts() -> Result<()> {
        let model: OperatingPointTable = "1 1\n1 1\n1 1\n".parse()?;
        let workload = workload(&[(1, 1.0), (1, 1.0), (1, 1.0)]);
        let expected = Error::InvalidModelDomain {
            seq_count: 0,
            idx_count: 3,
            levels: 2,
        };
        assert_eq!(evaluate(&workload, &model), Err(expected.clone()));
        assert!(Evaluator::new(&model)
            .parallel(true)
            .evaluate(&workload)
            .is_err());
        let results: Vec<_> = Evaluator::new(&model).iter(&workload)?.collect();
        assert_eq!(results, vec![Err(expected)]);
        Ok(())
    }

    #[test]
    fn test_lookup_once_per_size() -> Result<()> {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let lookups = AtomicUsize::new(0);
        let model = |seq_count: usize, idx_count: usize| {
            lookups.fetch_add(1, Ordering::SeqCst);
            uniform_model(seq_count, idx_count)
        };
        let workload = workload(&[(1, 1.0); 5]);
        assert_eq!(evaluate(&workload, &model)?.len(), 32);
        assert_eq!(lookups.load(Ordering::SeqCst), 6);
        Ok(())
    }

    #[test]
    fn test_workload_size_limit() -> Result<()> {
        let workload = workload(&[(1, 1.0); 3]);
        let mut evaluator = Evaluator::new(&uniform_model);
        evaluator.max_workload_size(2);
        assert_eq!(
            evaluator.evaluate(&workload),
            Err(Error::WorkloadSizeOverflow { size: 3, limit: 2 })
        );
        assert!(evaluator.iter(&workload).is_err());
        assert_eq!(evaluator.allow_oversize(true).evaluate(&workload)?.len(), 8);
        Ok(())
    }

    #[test]
    fn test_lazy_cancellation() -> Result<()> {
        let workload = workload(&[(1, 1.0); 16]);
        let mut evaluator = Evaluator::new(&uniform_model);
        let first: Vec<_> = evaluator
            .max_workload_size(16)
            .iter(&workload)?
            .take(5)
            .collect::<Result<_>>()?;
        assert_eq!(first.len(), 5);
        assert_eq!(first[4].ordinal, 4);
        assert_eq!(first[4].partition.sizes(), (1, 15));
        Ok(())
    }

    #[test]
    fn test_best_matches_ranking() -> Result<()> {
        let workload = workload(&[(262_144, 60.0), (262_144, 10.0), (3, 10.0), (3, 2.0)]);
        let evaluator = Evaluator::new(&uniform_model);
        let ranking = evaluator.rank(&workload)?;
        assert_eq!(evaluator.best(&workload)?.as_ref(), ranking.best());
        assert_eq!(ranking.top(2).len(), 2);
        assert_eq!(ranking.top(100).len(), 16);
        Ok(())
    }

    #[test]
    fn test_ties_ordered_by_enumeration() {
        let request = Request::new(1, 1.0).unwrap();
        let scored: Vec<_> = (0..4)
            .map(|ordinal| ScoredPartition {
                ordinal,
                goodness: Goodness::Score(if ordinal == 2 { 3.0 } else { 1.0 }),
                partition: Partition {
                    sequential: vec![request],
                    index: vec![],
                },
            })
            .rev()
            .collect();
        let ordinals: Vec<_> = Ranking::new(scored)
            .into_ranked()
            .iter()
            .map(|s| s.ordinal)
            .collect();
        assert_eq!(ordinals, vec![2, 0, 1, 3]);
    }

    fn random_workload() -> impl Strategy<Value = Workload> {
        prop::collection::vec((0..300_000_u64, 0.0..300.0_f64), 0..8)
            .prop_map(|pairs| Workload::try_from_pairs(pairs).unwrap())
    }

    proptest! {
        #[test]
        fn test_parallel_matches_sequential(workload in random_workload()) {
            let sequential = evaluate(&workload, &uniform_model).unwrap();
            let parallel = Evaluator::new(&uniform_model)
                .parallel(true)
                .evaluate(&workload)
                .unwrap();
            prop_assert_eq!(&sequential, &parallel);
        }

        #[test]
        fn test_ranking_idempotent(workload in random_workload()) {
            let evaluator = Evaluator::new(&uniform_model);
            let first = evaluator.rank(&workload).unwrap();
            let second = evaluator.rank(&workload).unwrap();
            prop_assert_eq!(&first, &second);
            let values: Vec<_> = first
                .ranked()
                .iter()
                .map(|s| s.goodness.value().unwrap())
                .collect();
            prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
