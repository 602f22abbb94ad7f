//! Figure data for run-length and final-value ECDFs
//!
//! For every dimension of a collection two panels are produced:
//!
//! - **Run-length panel**: one ECDF per target level, plus reference
//!   curves and a vertical line at the largest budget.
//! - **Final-value panel**: ECDFs of the final gaps at the full budget and
//!   at budgets of `10^k` evaluations per dimension.
//!
//! Everything returned is plain data; drawing is left to a renderer.
//!
//! # Aligned x-axes
//!
//! With `store_xmax` set, the first computed x-axis ceilings are frozen in
//! the [`FigureSession`] and reused for every later dimension and for every
//! later call that passes the same session. The resulting figures depend
//! on the order in which collections are processed. Without `store_xmax`
//! the session is neither read nor written.

use std::collections::BTreeSet;

use rldist_stats::{extend_to_xmax, log_uniform_markers, Ecdf, EcdfCurve, PlotElement};
use serde::{Deserialize, Serialize};

use crate::config::EcdfConfig;
use crate::error::EcdfResult;
use crate::finalvalue::final_value_distribution;
use crate::format::functions_annotation;
use crate::record::{func_ids, group_by_dim, max_evals_per_dim, TrialRecord};
use crate::reference::{reference_overlay, ReferenceArchive, ReferenceCurve};
use crate::runlength::run_length_distribution;
use crate::target::{TargetSpec, TargetValues};

/// Number of entries in the run-length style table
pub const RUN_LENGTH_STYLES: usize = 12;

/// Number of entries in the style table of budget-limited final values
pub const UNSUCCESSFUL_STYLES: usize = 12;

/// Style table a series draws from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleTable {
    RunLength,
    Unsuccessful,
}

/// Entry of a style table
///
/// Indices cycle through the table in level order, so reruns give every
/// level the same style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRef {
    pub table: StyleTable,
    pub index: usize,
}

impl StyleRef {
    pub fn run_length(level: usize) -> Self {
        Self {
            table: StyleTable::RunLength,
            index: level % RUN_LENGTH_STYLES,
        }
    }

    pub fn unsuccessful(level: usize) -> Self {
        Self {
            table: StyleTable::Unsuccessful,
            index: level % UNSUCCESSFUL_STYLES,
        }
    }
}

/// X-axis ceilings frozen across figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureSession {
    run_length_xmax: Option<f64>,
    final_value_xmax: Option<f64>,
}

impl FigureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget frozen ceilings
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Frozen run-length ceiling, in evaluations per dimension
    pub fn run_length_xmax(&self) -> Option<f64> {
        self.run_length_xmax
    }

    /// Frozen right limit of the final-value panel
    pub fn final_value_xmax(&self) -> Option<f64> {
        self.final_value_xmax
    }
}

fn freeze(slot: &mut Option<f64>, computed: f64, store: bool) -> f64 {
    if !store {
        return computed;
    }
    match *slot {
        Some(frozen) => {
            tracing::debug!("Reusing stored x-axis limit {} instead of {}", frozen, computed);
            frozen
        }
        None => {
            *slot = Some(computed);
            computed
        }
    }
}

/// One ECDF with its legend label and style
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: Option<String>,
    pub algorithm: Option<String>,
    pub style: StyleRef,
    /// The step line, followed by its log-uniform markers when drawn with
    /// markers
    pub elements: Vec<PlotElement>,
    /// Number of finite samples
    pub samples: usize,
    /// Number of runs, censored ones included
    pub runs: usize,
}

impl Series {
    fn new(ecdf: &Ecdf, label: Option<String>, style: StyleRef, markers: Option<u32>) -> Self {
        let curve = ecdf.curve();
        let mut elements = Vec::with_capacity(2);
        let marker_curve = markers.map(|nbperdecade| log_uniform_markers(&curve, nbperdecade));
        elements.push(PlotElement::line(curve));
        if let Some(marker_curve) = marker_curve {
            elements.push(PlotElement::markers(marker_curve));
        }

        Self {
            label,
            algorithm: None,
            style,
            elements,
            samples: ecdf.sample_count(),
            runs: ecdf.len(),
        }
    }

    fn with_algorithm(mut self, algorithm: Option<String>) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The step line of the series
    pub fn line(&self) -> Option<&EcdfCurve> {
        self.elements.first().map(|e| &e.curve)
    }
}

fn extend_series(series: &mut [Series], xmax: f64, nbperdecade: u32) {
    for s in series {
        extend_to_xmax(&mut s.elements, xmax, nbperdecade);
    }
}

/// Run lengths to reach each target level, in evaluations per dimension
#[derive(Debug, Clone, Serialize)]
pub struct RunLengthPanel {
    pub dim: u32,
    pub series: Vec<Series>,
    pub reference: Vec<ReferenceCurve>,
    /// Largest budgets, in evaluations per dimension
    pub budget_lines: Vec<f64>,
    /// Functions of the panel, e.g. `f1-5,20-D`
    pub annotation: String,
    pub xmin: f64,
    pub xmax: f64,
}

/// Final gaps relative to the target precision
#[derive(Debug, Clone, Serialize)]
pub struct FinalValuePanel {
    pub dim: u32,
    pub series: Vec<Series>,
    pub annotation: String,
    pub xmin: f64,
    pub xmax: f64,
}

/// Both panels of one dimension
#[derive(Debug, Clone, Serialize)]
pub struct DimensionFigures {
    pub dim: u32,
    /// Largest budget of the collection, in evaluations per dimension
    pub max_evals_factor: f64,
    /// Run-length ceiling used for this dimension
    pub ceiling: f64,
    pub run_length: RunLengthPanel,
    pub final_value: FinalValuePanel,
}

/// Run-length panel comparing two algorithms in one dimension
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonFigure {
    pub dim: u32,
    pub max_evals_factor: f64,
    pub ceiling: f64,
    pub panel: RunLengthPanel,
}

/// Builds figure data from trial collections
#[derive(Debug, Clone, Copy)]
pub struct EcdfFigures<'a> {
    config: &'a EcdfConfig,
    reference: Option<&'a ReferenceArchive>,
}

impl<'a> EcdfFigures<'a> {
    pub fn new(config: &'a EcdfConfig) -> Self {
        Self {
            config,
            reference: None,
        }
    }

    /// Overlay reference curves from an archive, if one is available
    pub fn with_reference(mut self, archive: Option<&'a ReferenceArchive>) -> Self {
        self.reference = archive;
        self
    }

    /// Figures for every dimension of `records`, with a fresh session
    pub fn generate<R, T>(&self, records: &[R], targets: &T) -> EcdfResult<Vec<DimensionFigures>>
    where
        R: TrialRecord,
        T: TargetValues + ?Sized,
    {
        let mut session = FigureSession::new();
        self.generate_with_session(&mut session, records, targets)
    }

    /// Figures for every dimension of `records`
    ///
    /// Dimensions are processed in increasing order. See the module
    /// documentation for how `session` aligns x-axes.
    pub fn generate_with_session<R, T>(
        &self,
        session: &mut FigureSession,
        records: &[R],
        targets: &T,
    ) -> EcdfResult<Vec<DimensionFigures>>
    where
        R: TrialRecord,
        T: TargetValues + ?Sized,
    {
        let mut figures = Vec::new();
        for (dim, group) in group_by_dim(records) {
            let Some(max_evals_factor) = max_evals_per_dim(&group) else {
                continue;
            };
            let ceiling = self.run_length_ceiling(session, max_evals_factor);
            tracing::debug!(
                "{}-D: {} records, max budget {} x dim, ceiling {}",
                dim,
                group.len(),
                max_evals_factor,
                ceiling
            );

            let funcs = func_ids(&group);
            let annotation = functions_annotation(funcs.iter().copied(), Some(dim));

            let mut series = Vec::with_capacity(targets.len());
            for level in 0..targets.len() {
                let spec = TargetSpec::level(targets, level);
                let dist = run_length_distribution(
                    group.iter().copied(),
                    &spec,
                    &targets.legend_label(level),
                    None,
                )?;
                series.push(Series::new(
                    &dist.ecdf,
                    Some(dist.label),
                    StyleRef::run_length(level),
                    None,
                ));
            }

            let reference = if self.draws_reference(targets) {
                reference_overlay(self.reference, dim, &funcs)
            } else {
                Vec::new()
            };
            let run_length = self.finish_run_length_panel(
                dim,
                series,
                reference,
                vec![max_evals_factor],
                annotation.clone(),
                ceiling,
            );

            let final_value =
                self.final_value_panel(session, dim, &group, targets.len(), ceiling, annotation)?;

            figures.push(DimensionFigures {
                dim,
                max_evals_factor,
                ceiling,
                run_length,
                final_value,
            });
        }
        Ok(figures)
    }

    /// Run-length panels comparing two collections, with a fresh session
    pub fn compare<R, T>(
        &self,
        records0: &[R],
        records1: &[R],
        targets: &T,
    ) -> EcdfResult<Vec<ComparisonFigure>>
    where
        R: TrialRecord,
        T: TargetValues + ?Sized,
    {
        let mut session = FigureSession::new();
        self.compare_with_session(&mut session, records0, records1, targets)
    }

    /// Run-length panels comparing two collections
    ///
    /// Only dimensions present in both collections are drawn. Both
    /// algorithms share the style of a level and are drawn with markers;
    /// only the second one carries a legend label.
    pub fn compare_with_session<R, T>(
        &self,
        session: &mut FigureSession,
        records0: &[R],
        records1: &[R],
        targets: &T,
    ) -> EcdfResult<Vec<ComparisonFigure>>
    where
        R: TrialRecord,
        T: TargetValues + ?Sized,
    {
        let groups1 = group_by_dim(records1);
        let mut figures = Vec::new();

        for (dim, group0) in group_by_dim(records0) {
            let Some(group1) = groups1.get(&dim) else {
                continue;
            };
            let (Some(max0), Some(max1)) = (max_evals_per_dim(&group0), max_evals_per_dim(group1))
            else {
                continue;
            };
            let max_evals_factor = max0.max(max1);
            let ceiling = self.run_length_ceiling(session, max_evals_factor);

            let algorithm0 = group0.first().map(|r| r.algorithm().to_string());
            let algorithm1 = group1.first().map(|r| r.algorithm().to_string());
            let markers = Some(self.config.nbperdecade);

            let mut series = Vec::with_capacity(2 * targets.len());
            for level in 0..targets.len() {
                let spec = TargetSpec::level(targets, level);
                let label = targets.legend_label(level);
                let style = StyleRef::run_length(level);

                let dist0 = run_length_distribution(group0.iter().copied(), &spec, &label, None)?;
                series.push(
                    Series::new(&dist0.ecdf, None, style, markers)
                        .with_algorithm(algorithm0.clone()),
                );

                let dist1 = run_length_distribution(group1.iter().copied(), &spec, &label, None)?;
                series.push(
                    Series::new(&dist1.ecdf, Some(label), style, markers)
                        .with_algorithm(algorithm1.clone()),
                );
            }

            let funcs: BTreeSet<u32> = func_ids(&group0)
                .union(&func_ids(group1))
                .copied()
                .collect();
            let annotation = functions_annotation(funcs.iter().copied(), None);
            let reference = reference_overlay(self.reference, dim, &funcs);

            let panel = self.finish_run_length_panel(
                dim,
                series,
                reference,
                vec![max0, max1],
                annotation,
                ceiling,
            );
            figures.push(ComparisonFigure {
                dim,
                max_evals_factor,
                ceiling,
                panel,
            });
        }
        Ok(figures)
    }

    fn run_length_ceiling(&self, session: &mut FigureSession, computed: f64) -> f64 {
        let ceiling = freeze(
            &mut session.run_length_xmax,
            computed,
            self.config.store_xmax,
        );
        self.config.runlen_xlimits_max.unwrap_or(ceiling)
    }

    fn draws_reference<T: TargetValues + ?Sized>(&self, targets: &T) -> bool {
        if targets.is_runlength_based() {
            return false;
        }
        targets
            .fixed_values()
            .and_then(|values| values.last())
            .is_some_and(|&tightest| tightest == self.config.reference_target)
    }

    fn finish_run_length_panel(
        &self,
        dim: u32,
        mut series: Vec<Series>,
        mut reference: Vec<ReferenceCurve>,
        budget_lines: Vec<f64>,
        annotation: String,
        ceiling: f64,
    ) -> RunLengthPanel {
        let xmin = self.config.runlen_xlimits_min;
        let xmax = ceiling.powf(self.config.xmax_exponent);
        let nbperdecade = self.config.nbperdecade;

        extend_series(&mut series, xmax, nbperdecade);
        for curve in reference.iter_mut() {
            rldist_stats::extend_element(&mut curve.element, xmax, nbperdecade);
        }

        RunLengthPanel {
            dim,
            series,
            reference,
            budget_lines,
            annotation,
            xmin,
            xmax,
        }
    }

    fn final_value_panel<R: TrialRecord + ?Sized>(
        &self,
        session: &mut FigureSession,
        dim: u32,
        group: &[&R],
        levels: usize,
        ceiling: f64,
        annotation: String,
    ) -> EcdfResult<FinalValuePanel> {
        let target = TargetSpec::Fixed(self.config.final_value_target);
        let mut series = Vec::new();

        let full = final_value_distribution(group.iter().copied(), &target, ceiling)?;
        series.push(Series::new(
            &full.ecdf,
            None,
            StyleRef::run_length(levels.saturating_sub(1)),
            None,
        ));

        // Budgets of 10^k evaluations per dimension, below the ceiling
        let decades = ceiling.log10().floor();
        let decades = if decades.is_finite() && decades > 0.0 {
            decades as i32
        } else {
            0
        };
        for k in 0..decades {
            let dist = final_value_distribution(group.iter().copied(), &target, 10f64.powi(k))?;
            series.push(Series::new(
                &dist.ecdf,
                None,
                StyleRef::unsuccessful(k as usize),
                None,
            ));
        }

        let xmin = 1.0;
        let data_max = series
            .iter()
            .filter_map(|s| s.line().and_then(EcdfCurve::max_x))
            .fold(f64::NEG_INFINITY, f64::max);
        let data_max = if data_max > xmin { data_max } else { xmin * 10.0 };
        let xmax = freeze(
            &mut session.final_value_xmax,
            data_max,
            self.config.store_xmax,
        );
        extend_series(&mut series, xmax, self.config.nbperdecade);

        Ok(FinalValuePanel {
            dim,
            series,
            annotation,
            xmin,
            xmax,
        })
    }
}
