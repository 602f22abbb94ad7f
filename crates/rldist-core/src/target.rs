//! Target precisions
//!
//! Two seams describe targets:
//!
//! - [`TargetValues`] is a provider of ordered target levels per
//!   (function, dimension), with legend labels for each level.
//! - [`TargetSpec`] is one resolved choice of target handed to an
//!   aggregator: a constant, a per-function table, or a lookup closure.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TargetError, TargetResult};
use crate::format::power_of_ten_label;

/// Ordered target levels per (function, dimension)
///
/// Levels are ordered from loosest to tightest. Implementations must be
/// deterministic.
pub trait TargetValues {
    /// Target levels for a function in a dimension
    fn targets(&self, func_id: u32, dim: u32) -> Vec<f64>;

    /// Number of levels
    fn len(&self) -> usize;

    /// Check if there are no levels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable label of a level
    fn label(&self, index: usize) -> String;

    /// Power-of-ten label of a level, e.g. `1e-04`
    fn loglabel(&self, index: usize) -> String;

    /// Whether levels are derived from reference run lengths rather than
    /// fixed precisions
    fn is_runlength_based(&self) -> bool {
        false
    }

    /// The fixed precisions, if they are the same for every function
    fn fixed_values(&self) -> Option<&[f64]> {
        None
    }

    /// Target of one level
    fn target(&self, func_id: u32, dim: u32, index: usize) -> TargetResult<f64> {
        let values = self.targets(func_id, dim);
        values
            .get(index)
            .copied()
            .ok_or(TargetError::LevelOutOfRange {
                index,
                len: values.len(),
                func_id,
                dim,
            })
    }

    /// Legend label of a level
    fn legend_label(&self, index: usize) -> String {
        if self.is_runlength_based() {
            self.label(index)
        } else {
            self.loglabel(index)
        }
    }
}

/// The same precision levels for every function and dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedTargetValues {
    values: Vec<f64>,
}

impl FixedTargetValues {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for FixedTargetValues {
    fn default() -> Self {
        Self::new(vec![10.0, 1e-1, 1e-4, 1e-8])
    }
}

impl TargetValues for FixedTargetValues {
    fn targets(&self, _func_id: u32, _dim: u32) -> Vec<f64> {
        self.values.clone()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn label(&self, index: usize) -> String {
        format!("{}", self.values[index])
    }

    fn loglabel(&self, index: usize) -> String {
        power_of_ten_label(self.values[index])
    }

    fn fixed_values(&self) -> Option<&[f64]> {
        Some(&self.values)
    }
}

/// Targets derived from reference run lengths
///
/// Level `j` of a function is the precision reached by a reference
/// algorithm after `factors[j] * dim` evaluations. The precisions are
/// computed elsewhere and tabulated here per (function, dimension).
#[derive(Debug, Clone, Default)]
pub struct RunlengthTargetValues {
    factors: Vec<f64>,
    table: BTreeMap<(u32, u32), Vec<f64>>,
}

impl RunlengthTargetValues {
    pub fn new(factors: Vec<f64>) -> Self {
        Self {
            factors,
            table: BTreeMap::new(),
        }
    }

    /// Record the precisions of one function, one per run-length factor
    pub fn insert(&mut self, func_id: u32, dim: u32, targets: Vec<f64>) {
        self.table.insert((func_id, dim), targets);
    }

    pub fn with_targets(mut self, func_id: u32, dim: u32, targets: Vec<f64>) -> Self {
        self.insert(func_id, dim, targets);
        self
    }

    pub fn factors(&self) -> &[f64] {
        &self.factors
    }
}

impl TargetValues for RunlengthTargetValues {
    fn targets(&self, func_id: u32, dim: u32) -> Vec<f64> {
        self.table.get(&(func_id, dim)).cloned().unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.factors.len()
    }

    fn label(&self, index: usize) -> String {
        format!("{}", self.factors[index])
    }

    fn loglabel(&self, index: usize) -> String {
        power_of_ten_label(self.factors[index])
    }

    fn is_runlength_based(&self) -> bool {
        true
    }
}

/// A target precision resolved per record
pub enum TargetSpec<'a> {
    /// Same precision for every record
    Fixed(f64),
    /// Precision by function identifier
    PerFunction(HashMap<u32, f64>),
    /// Precision computed from (function, dimension)
    Provider(Box<dyn Fn(u32, u32) -> TargetResult<f64> + 'a>),
}

impl<'a> TargetSpec<'a> {
    /// Level `index` of a target provider
    pub fn level<T: TargetValues + ?Sized>(targets: &'a T, index: usize) -> Self {
        TargetSpec::Provider(Box::new(move |func_id, dim| {
            targets.target(func_id, dim, index)
        }))
    }

    /// Precision for one record
    pub fn resolve(&self, func_id: u32, dim: u32) -> TargetResult<f64> {
        let value = match self {
            TargetSpec::Fixed(value) => *value,
            TargetSpec::PerFunction(table) => *table
                .get(&func_id)
                .ok_or(TargetError::MissingFunction { func_id })?,
            TargetSpec::Provider(lookup) => lookup(func_id, dim)?,
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(TargetError::InvalidValue {
                value,
                func_id,
                dim,
            });
        }
        Ok(value)
    }
}

impl fmt::Debug for TargetSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            TargetSpec::PerFunction(table) => f.debug_tuple("PerFunction").field(table).finish(),
            TargetSpec::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<f64> for TargetSpec<'_> {
    fn from(value: f64) -> Self {
        TargetSpec::Fixed(value)
    }
}
