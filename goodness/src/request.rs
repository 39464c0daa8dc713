//! Storage read requests and workloads.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::ops::Deref;

/// A single storage read.
///
/// `blocks` is the number of 4K blocks to read and `deadline` is the time budget in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct Request {
    blocks: u64,
    deadline: f64,
}

#[derive(Deserialize)]
struct RawRequest {
    blocks: u64,
    deadline: f64,
}

impl Request {
    /// Constructs a new request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](enum.Error.html) if the deadline is negative or not
    /// finite.
    pub fn new(blocks: u64, deadline: f64) -> Result<Self> {
        if deadline.is_finite() && deadline >= 0.0 {
            Ok(Self { blocks, deadline })
        } else {
            Err(Error::InvalidRequest(deadline))
        }
    }

    /// Number of 4K blocks to read.
    #[must_use]
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Deadline in seconds.
    #[must_use]
    pub fn deadline(&self) -> f64 {
        self.deadline
    }
}

impl TryFrom<RawRequest> for Request {
    type Error = Error;
    fn try_from(raw: RawRequest) -> Result<Self> {
        Self::new(raw.blocks, raw.deadline)
    }
}

impl TryFrom<(u64, f64)> for Request {
    type Error = Error;
    fn try_from((blocks, deadline): (u64, f64)) -> Result<Self> {
        Self::new(blocks, deadline)
    }
}

/// Ordered sequence of requests.
///
/// Requests with equal values are still distinct elements of a workload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workload(Vec<Request>);

impl Workload {
    /// Builds a workload out of `(blocks, deadline)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first pair that is not a valid request.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, f64)>,
    {
        pairs
            .into_iter()
            .map(Request::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Returns the requests as a slice.
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.0
    }
}

impl Deref for Workload {
    type Target = [Request];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Request>> for Workload {
    fn from(requests: Vec<Request>) -> Self {
        Self(requests)
    }
}

impl std::iter::FromIterator<Request> for Workload {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Request>,
    {
        Self(iter.into_iter().collect())
    }
}
