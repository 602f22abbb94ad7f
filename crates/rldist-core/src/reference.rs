//! Reference run-length data
//!
//! A reference archive holds run lengths of previously benchmarked
//! algorithms. Figures overlay one background ECDF per reference algorithm.
//! The archive is optional: without it the overlay is empty.
//!
//! JSON layout, keyed by algorithm, function and dimension:
//!
//! ```json
//! {
//!   "BIPOP-CMA-ES": {
//!     "1": { "20": [ { "target": 1e-8, "evals": [410.0, 395.0, null], "max_evals": [2e5, 2e5, 2e5] } ] }
//!   }
//! }
//! ```
//!
//! Unsuccessful runs are written as `null` and read back as NaN.

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::Path;

use rldist_stats::{ecdf_curve, PlotElement};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReferenceError, ReferenceResult};

/// Run lengths of one reference algorithm for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Target precision the run lengths refer to
    pub target: f64,
    /// Evaluations per run, NaN for unsuccessful runs
    #[serde(deserialize_with = "nullable_floats")]
    pub evals: Vec<f64>,
    /// Budget per run
    #[serde(default)]
    pub max_evals: Vec<f64>,
}

fn nullable_floats<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Reference records by algorithm, function and dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceArchive {
    pub algorithms: BTreeMap<String, BTreeMap<u32, BTreeMap<u32, Vec<ReferenceRecord>>>>,
}

/// Background curve of one reference algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCurve {
    pub algorithm: String,
    pub element: PlotElement,
}

impl ReferenceArchive {
    /// Parse an archive from JSON
    pub fn from_json(json: &str) -> ReferenceResult<Self> {
        serde_json::from_str(json).map_err(|e| ReferenceError::Parse(e.to_string()))
    }

    /// Load an archive from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ReferenceResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ReferenceError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&text)
    }

    /// Load an archive if the file exists
    ///
    /// A missing file is not an error: the overlay is simply left out.
    pub fn load_optional(path: impl AsRef<Path>) -> ReferenceResult<Option<Self>> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "Reference data not found at {:?}, figures will have no reference overlay",
                    path
                );
                Ok(None)
            }
            Err(e) => Err(ReferenceError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    /// One background curve per algorithm that covers every function of
    /// `funcs` in `dim`
    ///
    /// Uses the first record of each function. Run lengths are divided by
    /// the dimension; unsuccessful runs count in the total only.
    pub fn curves(&self, dim: u32, funcs: &BTreeSet<u32>) -> Vec<ReferenceCurve> {
        if funcs.is_empty() {
            return Vec::new();
        }

        let mut curves = Vec::new();
        for (algorithm, by_function) in &self.algorithms {
            let records: Option<Vec<&ReferenceRecord>> = funcs
                .iter()
                .map(|f| by_function.get(f)?.get(&dim)?.first())
                .collect();
            let Some(records) = records else {
                continue;
            };

            let mut samples = Vec::new();
            let mut total = 0;
            for record in records {
                samples.extend(
                    record
                        .evals
                        .iter()
                        .filter(|v| v.is_finite())
                        .map(|v| v / f64::from(dim)),
                );
                total += record.evals.len();
            }

            curves.push(ReferenceCurve {
                algorithm: algorithm.clone(),
                element: PlotElement::line(ecdf_curve(&samples, Some(total))),
            });
        }
        curves
    }
}

/// Reference curves, or none when no archive is available
pub fn reference_overlay(
    archive: Option<&ReferenceArchive>,
    dim: u32,
    funcs: &BTreeSet<u32>,
) -> Vec<ReferenceCurve> {
    archive
        .map(|archive| archive.curves(dim, funcs))
        .unwrap_or_default()
}
