//! MCDA Engine - Multi-Criteria Decision Analysis
//!
//! This crate turns pairwise judgments and performance tables into ranked
//! alternatives using AHP, SAW, Weighted Product and MAUT.

pub mod application;
pub mod config;
pub mod domain;
