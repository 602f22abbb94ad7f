//! rldist-stats - Statistical primitives for benchmark distributions
//!
//! This crate provides the numeric building blocks used to summarize
//! optimization-benchmark trials:
//!
//! - **ECDF**: Empirical Cumulative Distribution Function with an explicit
//!   sample total, so that censored samples lower the plateau of the curve
//! - **Step**: boundary extension of rendered step curves and log-uniform
//!   marker placement
//!
//! # Conventions
//!
//! Curves are right-continuous and meant to be drawn with a "step after"
//! convention. The last point of a non-empty curve duplicates the largest
//! sample so the final plateau is visible.

pub mod ecdf;
pub mod step;

pub use ecdf::*;
pub use step::*;
