//! Final-value distributions
//!
//! For an evaluation budget, collects the precision gap every run had
//! reached when the budget ran out, relative to a target precision.

use ndarray::s;
use rldist_stats::{Ecdf, EcdfCurve};
use serde::Serialize;

use crate::error::EcdfResult;
use crate::record::TrialRecord;
use crate::target::TargetSpec;

/// Final gaps of a collection of records at one budget
#[derive(Debug, Clone, Serialize)]
pub struct FinalValueDistribution {
    /// Gaps divided by the target precision
    pub ecdf: Ecdf,
    /// Budget in evaluations per dimension (infinite for "all evaluations")
    pub budget: f64,
}

impl FinalValueDistribution {
    /// Step curve of the distribution
    pub fn curve(&self) -> EcdfCurve {
        self.ecdf.curve()
    }
}

/// Index of the `funvals` row that applies at a budget
///
/// This is the last row whose evaluation count is at most
/// `budget * dim`. When even the first row lies beyond the budget, the
/// first row is used: every run is reported with its earliest recorded
/// gap. Returns `None` only for a record without rows.
pub fn budget_row<R: TrialRecord + ?Sized>(record: &R, budget: f64) -> Option<usize> {
    let funvals = record.funvals();
    if funvals.nrows() == 0 {
        return None;
    }
    let limit = budget * f64::from(record.dim());
    let within = funvals
        .rows()
        .into_iter()
        .take_while(|row| row[0] <= limit)
        .count();
    Some(within.saturating_sub(1))
}

/// Divide gaps by `target` and lift non-positive results
///
/// A non-positive value has no place on a log axis. It is replaced by the
/// smallest positive value among the normalized gaps and the target
/// itself, which understates how close the run got to the optimum.
pub fn normalized_gaps(gaps: &[f64], target: f64) -> Vec<f64> {
    lift_gaps(gaps, gaps.iter().copied(), target)
}

/// Divide gaps by `target`, lifting non-positive results to the smallest
/// positive normalized value of `history` or the target itself
fn lift_gaps(gaps: &[f64], history: impl IntoIterator<Item = f64>, target: f64) -> Vec<f64> {
    let floor = history
        .into_iter()
        .map(|gap| gap / target)
        .chain(std::iter::once(target))
        .filter(|v| *v > 0.0)
        .fold(f64::INFINITY, f64::min);

    gaps.iter()
        .map(|gap| gap / target)
        .map(|v| if v <= 0.0 { floor } else { v })
        .collect()
}

/// Aggregate the final gaps of `records` at `budget` evaluations per
/// dimension, relative to the target chosen by `target`
///
/// An infinite budget uses the last recorded row of every record. Gaps
/// that are not positive are lifted to the smallest positive gap the
/// record ever reached, over all of its rows, or to the target precision
/// when that is smaller.
pub fn final_value_distribution<'r, R, I>(
    records: I,
    target: &TargetSpec<'_>,
    budget: f64,
) -> EcdfResult<FinalValueDistribution>
where
    R: TrialRecord + ?Sized + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let mut samples = Vec::new();
    let mut total = 0;

    for record in records {
        let precision = target.resolve(record.func_id(), record.dim())?;
        if let Some(index) = budget_row(record, budget) {
            let funvals = record.funvals();
            let gaps: Vec<f64> = funvals.row(index).iter().skip(1).copied().collect();
            let history = funvals.slice(s![.., 1..]);
            samples.extend(lift_gaps(&gaps, history.iter().copied(), precision));
        }
        total += record.nb_runs();
    }

    let ecdf = Ecdf::with_total(&samples, total);
    tracing::debug!(
        "Final values at budget {}: {} samples out of {} runs",
        budget,
        ecdf.sample_count(),
        total
    );

    Ok(FinalValueDistribution { ecdf, budget })
}
