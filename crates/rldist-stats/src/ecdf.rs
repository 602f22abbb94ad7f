//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function that estimates the underlying CDF of a sample.
//! For a sample of `nx` values drawn out of `n` trials, ECDF(x) = (number of
//! values <= x) / n.
//!
//! # Censored samples
//!
//! The total `n` may exceed the number of finite values. The difference
//! stands for trials that never produced a value (a run that did not reach
//! its target, for instance). Such trials add nothing to the numerator but
//! stay in the denominator, so the curve plateaus at `nx / n` instead of 1.

use serde::{Deserialize, Serialize};

/// Empirical Cumulative Distribution Function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecdf {
    /// Sorted finite values
    values: Vec<f64>,
    /// Total number of trials, censored ones included
    n: usize,
}

impl Ecdf {
    /// Build an ECDF from data, using the data length as the total
    ///
    /// Non-finite entries are treated as censored: they count towards the
    /// total but never towards the cumulative fraction.
    pub fn from_data(data: &[f64]) -> Self {
        Self::with_total(data, data.len())
    }

    /// Build an ECDF from data drawn out of `n` trials
    ///
    /// The caller's slice is left untouched. The total never drops below
    /// the number of finite values, which keeps the curve within `[0, 1]`.
    ///
    /// Time complexity: O(nx log nx) for sorting
    pub fn with_total(data: &[f64], n: usize) -> Self {
        let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        // Stable, so equal samples keep their input order
        values.sort_by(f64::total_cmp);

        let n = n.max(values.len());
        Self { values, n }
    }

    /// Evaluate the ECDF at a point
    ///
    /// Returns the proportion of trials with a value <= x.
    /// Time complexity: O(log n)
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        let count = self.values.partition_point(|v| *v <= x);
        count as f64 / self.n as f64
    }

    /// Fraction of trials that produced a value
    pub fn success_rate(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        self.values.len() as f64 / self.n as f64
    }

    /// Get the total number of trials
    pub fn len(&self) -> usize {
        self.n
    }

    /// Get the number of finite samples
    pub fn sample_count(&self) -> usize {
        self.values.len()
    }

    /// Check if there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.n == 0 || self.values.is_empty()
    }

    /// Get the sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the step curve for plotting
    ///
    /// For sorted values `v_0..v_{nx-1}` the curve holds the points
    /// `(v_i, i / n)` followed by `(v_{nx-1}, nx / n)`. An ECDF with no
    /// finite value, or with a zero total, yields an empty curve.
    pub fn curve(&self) -> EcdfCurve {
        if self.is_empty() {
            return EcdfCurve::default();
        }

        let nx = self.values.len();
        let n = self.n as f64;

        let mut x = Vec::with_capacity(nx + 1);
        x.extend_from_slice(&self.values);
        x.push(self.values[nx - 1]);

        let mut y: Vec<f64> = (0..nx).map(|i| i as f64 / n).collect();
        y.push(nx as f64 / n);

        EcdfCurve { x, y }
    }
}

/// Build the step curve of a sample drawn out of `n` trials
///
/// `n` defaults to the sample length.
pub fn ecdf_curve(data: &[f64], n: Option<usize>) -> EcdfCurve {
    let n = n.unwrap_or(data.len());
    if n == 0 || data.is_empty() {
        return EcdfCurve::default();
    }
    Ecdf::with_total(data, n).curve()
}

/// A rendered step curve: paired x and y coordinates
///
/// Both coordinates are non-decreasing. A curve with no points means
/// "nothing to plot".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcdfCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl EcdfCurve {
    /// Create a curve from coordinates
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        Self { x, y }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the curve has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Largest x coordinate
    pub fn max_x(&self) -> Option<f64> {
        self.x.iter().copied().reduce(f64::max)
    }

    /// Smallest x coordinate
    pub fn min_x(&self) -> Option<f64> {
        self.x.iter().copied().reduce(f64::min)
    }

    /// Last x coordinate
    pub fn last_x(&self) -> Option<f64> {
        self.x.last().copied()
    }

    /// Last y coordinate (the plateau of the curve)
    pub fn last_y(&self) -> Option<f64> {
        self.y.last().copied()
    }

    /// Append a point
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Value of the step function at `x`
    ///
    /// On `(x_{i-1}, x_i]` the curve takes the value `y_i`; right of the
    /// last point it keeps the final value. For a curve built by
    /// [`Ecdf::curve`] this equals [`Ecdf::evaluate`].
    pub fn value_at(&self, x: f64) -> Option<f64> {
        let last = self.last_y()?;
        let idx = self.x.partition_point(|xi| *xi <= x);
        Some(self.y.get(idx).copied().unwrap_or(last))
    }
}
