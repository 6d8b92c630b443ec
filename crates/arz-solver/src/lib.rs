//! arz-solver: junction coupling for the ARZ traffic model.
//!
//! Where two lane segments meet, the upstream boundary density is not
//! carried by the scheme; it is the root of a flow-continuity residual.
//! This crate provides the derivative-free scalar root finder and the
//! junction-specific residual driving it.

pub mod capacity;
pub mod junction;
pub mod secant;

pub use capacity::{inv_demand, inv_supply};
pub use junction::{JunctionResidual, solve_left_density, solve_left_density_checked};
pub use secant::{SecantConfig, SecantResult, secant_solve};
