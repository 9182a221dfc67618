//! Malta Wage library crate.
//!
//! This crate estimates a Maltese employee's net monthly salary from a
//! base wage, overtime, table-work bonuses and a commitment tier, using
//! simplified SSC rules and the 2026 single-filer income tax table.
//! External applications may call [`engine::PayrollEngine`] directly
//! or embed the HTTP API via [`api::build_router`].

pub mod api;
pub mod contribution;
pub mod engine;
pub mod error;
pub mod models;
pub mod money;
pub mod policy;
pub mod report;
pub mod tax;

pub use engine::PayrollEngine;
pub use error::{PolicyError, ValidationError};
pub use models::{CommitmentTier, PayrollBreakdown, PayrollInput, RateLevel};
pub use policy::PayrollPolicy;
