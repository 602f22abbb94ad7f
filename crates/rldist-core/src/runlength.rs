//! Run-length distributions
//!
//! For one target per record, collects the number of evaluations each run
//! needed to reach it, divided by the dimension. Runs that never reached
//! the target are right-censored: they stay in the total but contribute no
//! sample, so the ECDF plateaus at the success rate.

use std::collections::BTreeSet;

use rldist_stats::{Ecdf, EcdfCurve};
use serde::Serialize;

use crate::error::EcdfResult;
use crate::format::solved_label;
use crate::record::TrialRecord;
use crate::target::TargetSpec;

/// Run lengths of a collection of records for one target choice
#[derive(Debug, Clone, Serialize)]
pub struct RunLengthDistribution {
    /// Successful run lengths, in evaluations per dimension
    pub ecdf: Ecdf,
    /// Functions with at least one successful run
    pub solved: BTreeSet<u32>,
    /// All functions of the collection
    pub functions: BTreeSet<u32>,
    /// Legend label with the solved count, e.g. `1e-01: 7/15`
    pub label: String,
}

impl RunLengthDistribution {
    /// Step curve of the distribution
    pub fn curve(&self) -> EcdfCurve {
        self.ecdf.curve()
    }

    /// Total number of runs, censored ones included
    pub fn total_runs(&self) -> usize {
        self.ecdf.len()
    }
}

/// Aggregate the run lengths of `records` for the target chosen by `target`
///
/// A function counts as solved when one of its runs reached the target,
/// within `max_fun_evals` evaluations per dimension when a cap is given.
/// Fails when the target of a record cannot be resolved.
pub fn run_length_distribution<'r, R, I>(
    records: I,
    target: &TargetSpec<'_>,
    label: &str,
    max_fun_evals: Option<f64>,
) -> EcdfResult<RunLengthDistribution>
where
    R: TrialRecord + ?Sized + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let mut samples = Vec::new();
    let mut total = 0;
    let mut solved = BTreeSet::new();
    let mut functions = BTreeSet::new();

    for record in records {
        let func_id = record.func_id();
        functions.insert(func_id);

        let precision = target.resolve(func_id, record.dim())?;
        let dim = f64::from(record.dim());
        let successes: Vec<f64> = record
            .det_evals(precision)
            .into_iter()
            .map(|evals| evals / dim)
            .filter(|v| v.is_finite())
            .collect();

        let within_cap = match max_fun_evals {
            Some(cap) => successes.iter().any(|&v| v <= cap),
            None => !successes.is_empty(),
        };
        if within_cap {
            solved.insert(func_id);
        }

        samples.extend(successes);
        total += record.nb_runs();
    }

    let ecdf = Ecdf::with_total(&samples, total);
    tracing::debug!(
        "Run lengths '{}': {} of {} runs successful, {}/{} functions solved",
        label,
        ecdf.sample_count(),
        total,
        solved.len(),
        functions.len()
    );

    Ok(RunLengthDistribution {
        ecdf,
        label: solved_label(label, solved.len(), functions.len()),
        solved,
        functions,
    })
}
