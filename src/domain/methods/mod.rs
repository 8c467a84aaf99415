//! Decision methods built on the analysis engine.
//!
//! - `AhpSession` - Analytic Hierarchy Process over pairwise judgments
//! - `SawMethod` - Simple Additive Weighting
//! - `WeightedProduct` - Weighted Product (S and V scores)
//! - `MautMethod` - Multi-Attribute Utility Theory (S and V scores)
//!
//! SAW, WP and MAUT share a `PerformanceTable` of raw values.

mod ahp;
mod criterion;
mod maut;
mod saw;
mod wp;

pub use ahp::{AhpReport, AhpSession, CriterionPriorities};
pub use criterion::{Criterion, OrientedColumns, PerformanceTable};
pub use maut::{MautMethod, MautReport};
pub use saw::{SawMethod, SawReport};
pub use wp::{WeightedProduct, WeightedProductReport};
