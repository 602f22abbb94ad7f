//! rldist-core - Run-length and final-value distributions of benchmark trials
//!
//! This crate turns the raw trials of stochastic optimization algorithms
//! into empirical cumulative distribution functions ready for plotting.
//!
//! # Key Components
//!
//! - **TrialRecord**: read access to the runs of one algorithm on one
//!   function in one dimension, with the in-memory [`DataSet`]
//! - **Targets**: target precision providers and resolved [`TargetSpec`]s
//! - **Run lengths**: evaluations per dimension needed to reach a target,
//!   with unsuccessful runs right-censored
//! - **Final values**: precision gaps reached within an evaluation budget
//! - **Reference**: optional background curves of previously benchmarked
//!   algorithms
//! - **Figures**: per-dimension panels built from all of the above, with
//!   x-axes optionally aligned through a [`FigureSession`]
//!
//! # Units
//!
//! Run lengths and budgets are in function evaluations divided by the
//! search space dimension. Final gaps are divided by the target precision.

pub mod config;
pub mod error;
pub mod figure;
pub mod finalvalue;
pub mod format;
pub mod record;
pub mod reference;
pub mod runlength;
pub mod target;

pub use config::EcdfConfig;
pub use error::*;
pub use figure::*;
pub use finalvalue::*;
pub use format::*;
pub use record::*;
pub use reference::*;
pub use runlength::*;
pub use target::*;

pub use rldist_stats::{ecdf_curve, Ecdf, EcdfCurve, ElementStyle, PlotElement};
