//! Trial records
//!
//! A trial record holds the repeated independent runs of one algorithm on
//! one function in one dimension. Two matrices describe the runs:
//!
//! - `evals`: one row per target precision, ordered by decreasing target.
//!   Column 0 is the target, column `i` the number of evaluations run `i`
//!   needed to reach it, or NaN when it never did.
//! - `funvals`: one row per evaluation count, ordered by increasing count.
//!   Column 0 is the count, column `i` the precision gap of run `i` at that
//!   point.
//!
//! `maxevals` holds the budget each run actually used. It is the censoring
//! point of runs that never reached a target.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};

/// Read access to the trials of one (function, dimension, algorithm) triple
pub trait TrialRecord {
    /// Function identifier
    fn func_id(&self) -> u32;

    /// Search space dimension
    fn dim(&self) -> u32;

    /// Algorithm name
    fn algorithm(&self) -> &str;

    /// Evaluations-to-target matrix, rows by decreasing target
    fn evals(&self) -> ArrayView2<'_, f64>;

    /// Gap-per-budget matrix, rows by increasing evaluation count
    fn funvals(&self) -> ArrayView2<'_, f64>;

    /// Budget used by each run
    fn maxevals(&self) -> &[f64];

    /// Number of runs
    fn nb_runs(&self) -> usize {
        self.maxevals().len()
    }

    /// Largest budget used by any run
    fn max_evals(&self) -> f64 {
        self.maxevals()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Evaluations each run needed to reach `target`
    ///
    /// Uses the first row whose target is at most `target`. When no row
    /// qualifies, every run is reported as censored (NaN).
    fn det_evals(&self, target: f64) -> Vec<f64> {
        let evals = self.evals();
        evals
            .rows()
            .into_iter()
            .find(|row| row[0] <= target)
            .map(|row| row.iter().skip(1).copied().collect())
            .unwrap_or_else(|| vec![f64::NAN; self.nb_runs()])
    }
}

/// In-memory trial record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSet {
    algorithm: String,
    func_id: u32,
    dim: u32,
    evals: Array2<f64>,
    funvals: Array2<f64>,
    maxevals: Vec<f64>,
}

impl DataSet {
    /// Create a record, checking that both matrices hold one column per run
    /// plus the key column
    pub fn new(
        algorithm: impl Into<String>,
        func_id: u32,
        dim: u32,
        evals: Array2<f64>,
        funvals: Array2<f64>,
        maxevals: Vec<f64>,
    ) -> RecordResult<Self> {
        if dim == 0 {
            return Err(RecordError::ZeroDimension { func_id });
        }
        if maxevals.is_empty() {
            return Err(RecordError::NoRuns { func_id, dim });
        }
        if let Some((run, &budget)) = maxevals
            .iter()
            .enumerate()
            .find(|(_, b)| !b.is_finite() || **b <= 0.0)
        {
            return Err(RecordError::InvalidBudget {
                func_id,
                dim,
                run,
                budget,
            });
        }

        let expected = maxevals.len() + 1;
        for (matrix, columns) in [("evals", evals.ncols()), ("funvals", funvals.ncols())] {
            if columns != expected {
                return Err(RecordError::ColumnMismatch {
                    matrix,
                    expected,
                    actual: columns,
                });
            }
        }
        if funvals.nrows() == 0 {
            return Err(RecordError::EmptyMatrix { matrix: "funvals" });
        }

        Ok(Self {
            algorithm: algorithm.into(),
            func_id,
            dim,
            evals,
            funvals,
            maxevals,
        })
    }

    /// Create a record from row vectors
    pub fn from_rows(
        algorithm: impl Into<String>,
        func_id: u32,
        dim: u32,
        evals: Vec<Vec<f64>>,
        funvals: Vec<Vec<f64>>,
        maxevals: Vec<f64>,
    ) -> RecordResult<Self> {
        let columns = maxevals.len() + 1;
        let evals = rows_to_array("evals", evals, columns)?;
        let funvals = rows_to_array("funvals", funvals, columns)?;
        Self::new(algorithm, func_id, dim, evals, funvals, maxevals)
    }
}

fn rows_to_array(
    matrix: &'static str,
    rows: Vec<Vec<f64>>,
    columns: usize,
) -> RecordResult<Array2<f64>> {
    let width = rows.first().map_or(columns, Vec::len);
    if rows.iter().any(|row| row.len() != width) {
        return Err(RecordError::Ragged { matrix });
    }
    let height = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((height, width), flat).map_err(|_| RecordError::Ragged { matrix })
}

impl TrialRecord for DataSet {
    fn func_id(&self) -> u32 {
        self.func_id
    }

    fn dim(&self) -> u32 {
        self.dim
    }

    fn algorithm(&self) -> &str {
        &self.algorithm
    }

    fn evals(&self) -> ArrayView2<'_, f64> {
        self.evals.view()
    }

    fn funvals(&self) -> ArrayView2<'_, f64> {
        self.funvals.view()
    }

    fn maxevals(&self) -> &[f64] {
        &self.maxevals
    }
}

/// Partition records by dimension, in increasing dimension order
pub fn group_by_dim<R: TrialRecord>(records: &[R]) -> BTreeMap<u32, Vec<&R>> {
    let mut groups: BTreeMap<u32, Vec<&R>> = BTreeMap::new();
    for record in records {
        groups.entry(record.dim()).or_default().push(record);
    }
    groups
}

/// Distinct function identifiers of a group of records
pub fn func_ids<R: TrialRecord + ?Sized>(records: &[&R]) -> BTreeSet<u32> {
    records.iter().map(|r| r.func_id()).collect()
}

/// Largest budget of a group, in evaluations per dimension
pub fn max_evals_per_dim<R: TrialRecord + ?Sized>(records: &[&R]) -> Option<f64> {
    records
        .iter()
        .map(|r| r.max_evals() / f64::from(r.dim()))
        .reduce(f64::max)
}
