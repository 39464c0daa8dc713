//! Performance models predicting throughput for a concurrency configuration.

use crate::{Error, IopsCurve, Result};
use itertools::Itertools;
use ndarray::{Array3, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Position of the sequential-scan throughput in the operating-point field vector.
pub const SEQ_IOPS_FIELD: usize = 1;

/// Position of the index-scan throughput in the operating-point field vector.
pub const IDX_IOPS_FIELD: usize = 4;

const MIN_FIELDS: usize = IDX_IOPS_FIELD + 1;

/// Throughputs (in 4K blocks per second) of both paths under one concurrency configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Sequential-scan throughput.
    pub seq_iops: f64,
    /// Index-scan throughput.
    pub idx_iops: f64,
}

impl OperatingPoint {
    /// Constructs a new operating point.
    #[must_use]
    pub fn new(seq_iops: f64, idx_iops: f64) -> Self {
        Self { seq_iops, idx_iops }
    }
}

/// Implementors predict the operating point for a given number of requests assigned to each
/// path.
pub trait PerformanceModel: Sync {
    /// Returns the operating point when `seq_count` requests run a sequential scan and
    /// `idx_count` requests run an index scan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidModelDomain`](enum.Error.html) if the configuration is not
    /// modeled.
    fn lookup(&self, seq_count: usize, idx_count: usize) -> Result<OperatingPoint>;
}

impl<F> PerformanceModel for F
where
    F: Fn(usize, usize) -> Result<OperatingPoint> + Sync,
{
    fn lookup(&self, seq_count: usize, idx_count: usize) -> Result<OperatingPoint> {
        self(seq_count, idx_count)
    }
}

/// Defines how the table handles index-scan concurrency beyond the modeled levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Unmodeled concurrency is an error.
    Strict,
    /// Unmodeled concurrency uses the highest modeled level.
    Saturating,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self::Strict
    }
}

/// Performance model backed by a table of measured operating points.
///
/// The table `t` has the shape `(2, levels, fields)`, and `t[(m, n, f)]` is the `f`-th
/// operating-point field measured with `n` concurrent index scans and `m` sequential streams.
/// Only streams `m ∈ {0, 1}` are modeled: any number of sequential requests is looked up as
/// exactly one stream. Fields [`SEQ_IOPS_FIELD`](constant.SEQ_IOPS_FIELD.html) and
/// [`IDX_IOPS_FIELD`](constant.IDX_IOPS_FIELD.html) are the path throughputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPointTable {
    table: Array3<f64>,
    policy: DomainPolicy,
}

impl OperatingPointTable {
    /// Wraps a table of operating points.
    ///
    /// # Errors
    ///
    /// Returns an error if the first dimension is not 2, there are no concurrency levels, or
    /// there are too few fields to contain both throughputs.
    pub fn from_array(table: Array3<f64>) -> Result<Self> {
        match table.dim() {
            (2, levels, fields) if levels > 0 && fields >= MIN_FIELDS => Ok(Self {
                table,
                policy: DomainPolicy::default(),
            }),
            (modes, levels, fields) => Err(Error::InvalidModel(format!(
                "expected shape (2, >=1, >={}) but got ({}, {}, {})",
                MIN_FIELDS, modes, levels, fields
            ))),
        }
    }

    /// Builds the table from three throughput curves, each indexed by the number of concurrent
    /// index scans:
    ///  - `seq`: sequential-scan throughput with one sequential stream,
    ///  - `idx`: index-scan throughput with no sequential stream,
    ///  - `idx_with_seq`: index-scan throughput with one sequential stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the curves are empty or of different lengths.
    pub fn from_curves(seq: &IopsCurve, idx: &IopsCurve, idx_with_seq: &IopsCurve) -> Result<Self> {
        let levels = seq.len();
        if levels == 0 || idx.len() != levels || idx_with_seq.len() != levels {
            return Err(Error::InvalidModel(format!(
                "curves must be non-empty and equally long, got lengths {}, {}, {}",
                seq.len(),
                idx.len(),
                idx_with_seq.len()
            )));
        }
        let mut table = Array3::<f64>::zeros((2, levels, MIN_FIELDS));
        for (level, ((&s, &i), &is)) in seq
            .iter()
            .zip(idx.iter())
            .zip(idx_with_seq.iter())
            .enumerate()
        {
            table[[1, level, SEQ_IOPS_FIELD]] = s;
            table[[0, level, IDX_IOPS_FIELD]] = i;
            table[[1, level, IDX_IOPS_FIELD]] = is;
        }
        Self::from_array(table)
    }

    /// Reads the table from its text format: three lines of whitespace-separated numbers, in the
    /// order of [`from_curves`](#method.from_curves) arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the text is not a valid model.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|err| Error::InvalidModel(err.to_string()))?;
        parse_curves(lines.iter().map(String::as_str))
    }

    /// Sets the policy for unmodeled index-scan concurrency.
    #[must_use]
    pub fn with_policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the domain policy.
    #[must_use]
    pub fn policy(&self) -> DomainPolicy {
        self.policy
    }

    /// Number of modeled index-scan concurrency levels.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.table.len_of(Axis(1))
    }

    /// The highest modeled number of concurrent index scans.
    #[must_use]
    pub fn max_index_concurrency(&self) -> usize {
        self.levels() - 1
    }

    fn curve(&self, mode: usize, field: usize) -> IopsCurve {
        self.table
            .index_axis(Axis(0), mode)
            .index_axis(Axis(1), field)
            .iter()
            .copied()
            .collect()
    }
}

impl PerformanceModel for OperatingPointTable {
    fn lookup(&self, seq_count: usize, idx_count: usize) -> Result<OperatingPoint> {
        let mode = seq_count.min(1);
        let levels = self.levels();
        let level = if idx_count < levels {
            idx_count
        } else {
            match self.policy {
                DomainPolicy::Strict => {
                    return Err(Error::InvalidModelDomain {
                        seq_count,
                        idx_count,
                        levels,
                    })
                }
                DomainPolicy::Saturating => levels - 1,
            }
        };
        Ok(OperatingPoint {
            seq_iops: self.table[[mode, level, SEQ_IOPS_FIELD]],
            idx_iops: self.table[[mode, level, IDX_IOPS_FIELD]],
        })
    }
}

fn parse_curve(line_number: usize, line: &str) -> Result<IopsCurve> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|err| {
                Error::InvalidModel(format!("line {}: {}: {}", line_number, token, err))
            })
        })
        .collect()
}

fn parse_curves<'a, I>(lines: I) -> Result<OperatingPointTable>
where
    I: Iterator<Item = &'a str>,
{
    let curves = lines
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| parse_curve(idx + 1, line))
        .collect::<Result<Vec<_>>>()?;
    match curves.as_slice() {
        [seq, idx, idx_with_seq] => OperatingPointTable::from_curves(seq, idx, idx_with_seq),
        _ => Err(Error::InvalidModel(format!(
            "expected 3 throughput lines but found {}",
            curves.len()
        ))),
    }
}

impl FromStr for OperatingPointTable {
    type Err = Error;
    fn from_str(text: &str) -> Result<Self> {
        parse_curves(text.lines())
    }
}

impl fmt::Display for OperatingPointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mode, field) in &[(1, SEQ_IOPS_FIELD), (0, IDX_IOPS_FIELD), (1, IDX_IOPS_FIELD)] {
            writeln!(f, "{}", self.curve(*mode, *field).iter().join(" "))?;
        }
        Ok(())
    }
}
