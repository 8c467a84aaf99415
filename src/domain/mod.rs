//! Domain layer containing the decision-analysis logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `analysis` - Pure services: comparison matrices, priorities, consistency,
//!   normalization and rank aggregation
//! - `methods` - AHP, SAW, WP and MAUT built on `analysis`

pub mod analysis;
pub mod foundation;
pub mod methods;
