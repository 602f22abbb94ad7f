//! Step-function boundary extension and log-uniform markers
//!
//! ECDF curves end at their largest sample. On a figure whose x-axis runs
//! further right, the final plateau has to be carried to the axis limit:
//!
//! - a **line** element gets one extra point at the limit;
//! - a **marker-only** element gets markers on the log-uniform grid between
//!   its last x and the limit, so marker density stays the same over the
//!   whole axis.
//!
//! Curves are never extended to the left.

use crate::ecdf::EcdfCurve;
use serde::{Deserialize, Serialize};

/// Drawing convention of a plot element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStyle {
    /// Straight segments between points
    Default,
    /// Staircase between points
    Steps,
}

/// Rendering attributes of a plot element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub draw_style: DrawStyle,
    /// Whether a connecting line is drawn
    pub line: bool,
    /// Whether markers are drawn
    pub marker: bool,
}

impl ElementStyle {
    /// Solid staircase without markers
    pub const STEP_LINE: Self = Self {
        draw_style: DrawStyle::Steps,
        line: true,
        marker: false,
    };

    /// Markers only, no connecting line
    pub const STEP_MARKERS: Self = Self {
        draw_style: DrawStyle::Steps,
        line: false,
        marker: true,
    };
}

/// A curve together with the attributes it is rendered with
///
/// Elements coming from a renderer may lack style information; those are
/// left alone by [`extend_to_xmax`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotElement {
    pub curve: EcdfCurve,
    pub style: Option<ElementStyle>,
}

impl PlotElement {
    /// A solid step line
    pub fn line(curve: EcdfCurve) -> Self {
        Self {
            curve,
            style: Some(ElementStyle::STEP_LINE),
        }
    }

    /// A marker-only element
    pub fn markers(curve: EcdfCurve) -> Self {
        Self {
            curve,
            style: Some(ElementStyle::STEP_MARKERS),
        }
    }
}

/// Extend every step element of a panel flat up to `xmax`
pub fn extend_to_xmax(elements: &mut [PlotElement], xmax: f64, nbperdecade: u32) {
    for element in elements.iter_mut() {
        extend_element(element, xmax, nbperdecade);
    }
}

/// Extend one element flat up to `xmax`
///
/// Returns the number of appended points. Empty curves, unstyled elements
/// and elements that already reach `xmax` are left unchanged.
pub fn extend_element(element: &mut PlotElement, xmax: f64, nbperdecade: u32) -> usize {
    let Some(style) = element.style else {
        return 0;
    };
    if style.draw_style != DrawStyle::Steps {
        return 0;
    }

    let curve = &mut element.curve;
    let (Some(max_x), Some(last_x), Some(last_y)) = (curve.max_x(), curve.last_x(), curve.last_y())
    else {
        return 0;
    };
    if xmax <= max_x {
        return 0;
    }

    if style.line {
        curve.push(xmax, last_y);
        1
    } else if style.marker {
        let grid = log_grid(last_x, xmax, nbperdecade);
        for &x in &grid {
            curve.push(x, last_y);
        }
        grid.len()
    } else {
        0
    }
}

/// Bounds closer than this to a grid index count as lying on the grid
const GRID_TOLERANCE: f64 = 1e-9;

/// Log-uniform grid positions within `[lo, hi]`
///
/// Yields `10^(k / nbperdecade)` for every integer `k` from
/// `ceil(log10(lo) * nbperdecade)` to `floor(log10(hi) * nbperdecade)`.
/// Bounds that sit on the grid up to rounding are included. Non-positive
/// bounds or a zero density give no positions.
pub fn log_grid(lo: f64, hi: f64, nbperdecade: u32) -> Vec<f64> {
    if nbperdecade == 0 || !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || hi <= 0.0 {
        return Vec::new();
    }
    let per_decade = nbperdecade as f64;
    let min_idx = (lo.log10() * per_decade - GRID_TOLERANCE).ceil() as i64;
    let max_idx = (hi.log10() * per_decade + GRID_TOLERANCE).floor() as i64;

    (min_idx..=max_idx)
        .map(|k| 10f64.powf(k as f64 / per_decade))
        .collect()
}

/// Markers of a step curve placed on the log-uniform grid
///
/// Each marker sits on the curve: its y is the step value at its x. The
/// grid spans the smallest to the largest x of the curve.
pub fn log_uniform_markers(curve: &EcdfCurve, nbperdecade: u32) -> EcdfCurve {
    let (Some(lo), Some(hi)) = (curve.min_x(), curve.max_x()) else {
        return EcdfCurve::default();
    };

    let mut markers = EcdfCurve::default();
    for x in log_grid(lo, hi, nbperdecade) {
        // grid ends may round just outside the curve
        let x = x.clamp(lo, hi);
        if let Some(y) = curve.value_at(x) {
            markers.push(x, y);
        }
    }
    markers
}
