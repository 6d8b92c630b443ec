//! arz-model: data model and closed-form relations of the ARZ traffic model.
//!
//! The Aw-Rascle-Zhang model carries a conserved pair per cell: density rho
//! (normalized occupancy in [0,1]) and relative flow y. The primitive
//! velocity u is recovered from (rho, y) through the equilibrium velocity
//! curve u_eq(rho) = u_max * (1 - rho^gamma).
//!
//! Everything in this crate is a pure function over value parameters: no
//! state is retained between calls and nothing here raises.

pub mod equilibrium;
pub mod params;
pub mod state;

pub use equilibrium::{
    BoundaryPolicy, RHO_EPSILON, critical_density, demand, fundamental_diagram, inv_u_eq,
    max_flow, supply, u_eq, u_eq_prime, u_from, y_from,
};
pub use params::LaneParams;
pub use state::{CellState, FullState};
