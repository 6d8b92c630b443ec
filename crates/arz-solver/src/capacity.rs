//! Demand and supply inversion.
//!
//! The demand an upstream cell offers and the supply a downstream cell
//! can absorb both plateau at the lane's capacity flow. Off the plateau,
//! recovering the density that carries a given flow means inverting the
//! fundamental diagram on one branch, which is a scalar root find with
//! the secant solver; the two branches differ only in which side of the
//! critical density they bracket.

use crate::secant::{SecantConfig, secant_solve};
use arz_core::Real;
use arz_model::equilibrium::{critical_density, fundamental_diagram};

/// Flows within this margin of capacity snap to the critical density
/// instead of chasing a root tangent to the plateau.
const CAPACITY_MARGIN: Real = 1e-3;

/// Vacuum floor for the free-flow branch search.
const RHO_BOTTOM: Real = 1e-4;

const INV_FD_CONFIG: SecantConfig = SecantConfig {
    tol: 5e-8,
    max_iterations: 500,
};

/// Density on the free-flow branch carrying `flow`, or the critical
/// density when the flow is at or above capacity.
pub fn inv_demand(flow: Real, relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    let crit = critical_density(relv, u_max, gamma, inv_gamma);
    let cap = fundamental_diagram(crit, relv, u_max, gamma);
    if flow + CAPACITY_MARGIN >= cap {
        return crit;
    }
    secant_solve(crit * 0.3, crit, RHO_BOTTOM, crit, &INV_FD_CONFIG, |rho| {
        fundamental_diagram(rho, relv, u_max, gamma) - flow
    })
    .x
}

/// Density on the congested branch carrying `flow`, or the critical
/// density when the flow is at or above capacity.
pub fn inv_supply(flow: Real, relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    let crit = critical_density(relv, u_max, gamma, inv_gamma);
    let cap = fundamental_diagram(crit, relv, u_max, gamma);
    if flow + CAPACITY_MARGIN >= cap {
        return crit;
    }
    secant_solve(crit * 1.3, 1.0, crit, 1.0, &INV_FD_CONFIG, |rho| {
        fundamental_diagram(rho, relv, u_max, gamma) - flow
    })
    .x
}
