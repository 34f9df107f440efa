//! Residential radon risk scoring.
//!
//! [`risk::RiskEngine`] turns a set of home characteristics into a bounded
//! radon level, a risk category, a confidence band and an explainable factor
//! breakdown. The figures are illustrative and not a measurement substitute.

pub mod assessment;
pub mod config;
pub mod error;
pub mod risk;
pub mod survey;
pub mod telemetry;
