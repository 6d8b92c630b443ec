//! Junction density coupling.
//!
//! At a junction the downstream segment imposes a flow and the upstream
//! segment must carry it: the boundary density on the upstream (left) side
//! is the root of an equilibrium-continuity residual. The residual is
//! scalar and smooth away from vacuum, so the derivative-free secant
//! solver handles it.

use crate::secant::{SecantConfig, SecantResult, secant_solve};
use arz_core::Real;
use arz_model::equilibrium;

/// Admissible density interval for the junction root. The lower end stays
/// above vacuum so flow/rho is well defined; the upper end is full jam.
const RHO_BOTTOM: Real = 1e-4;
const RHO_TOP: Real = 1.0;

/// Fixed starting guesses straddling the usual operating range.
const RHO_START_LO: Real = 0.3;
const RHO_START_HI: Real = 0.7;

const JUNCTION_CONFIG: SecantConfig = SecantConfig {
    tol: 5e-6,
    max_iterations: 100,
};

/// Equilibrium-continuity residual for the upstream boundary density.
///
/// An immutable capture of the junction parameters; building one per
/// junction per step keeps the solver reentrant with no shared state.
#[derive(Debug, Clone, Copy)]
pub struct JunctionResidual {
    /// Flow imposed by the downstream segment
    pub flow: Real,
    /// Target relative-velocity offset across the junction
    pub relative_velocity: Real,
    /// Upstream lane free-flow speed
    pub u_max: Real,
    /// Upstream lane concavity exponent
    pub gamma: Real,
}

impl JunctionResidual {
    pub fn new(flow: Real, relative_velocity: Real, u_max: Real, gamma: Real) -> Self {
        Self {
            flow,
            relative_velocity,
            u_max,
            gamma,
        }
    }

    /// flow/rho - u_eq(rho) - relative_velocity; zero where the upstream
    /// density carries the downstream flow at the target offset.
    pub fn eval(&self, rho: Real) -> Real {
        self.flow / rho - equilibrium::u_eq(rho, self.u_max, self.gamma) - self.relative_velocity
    }

    /// Run the secant solver over this residual with the fixed junction
    /// interval, starting points, and budget.
    pub fn solve(&self) -> SecantResult {
        secant_solve(
            RHO_START_LO,
            RHO_START_HI,
            RHO_BOTTOM,
            RHO_TOP,
            &JUNCTION_CONFIG,
            |rho| self.eval(rho),
        )
    }
}

/// Upstream boundary density consistent with the downstream flow.
///
/// Returns the solver's last iterate unconditionally; if no root lies in
/// (1e-4, 1.0), or the budget runs out first, the returned density is
/// simply the best iterate found. Callers needing a guarantee use
/// [`solve_left_density_checked`] and inspect the result.
pub fn solve_left_density(
    flow_right: Real,
    relative_velocity: Real,
    u_max_left: Real,
    gamma: Real,
) -> Real {
    solve_left_density_checked(flow_right, relative_velocity, u_max_left, gamma).x
}

/// Same computation as [`solve_left_density`], returning the full
/// [`SecantResult`] so the caller can see the converged flag and the
/// final residual.
pub fn solve_left_density_checked(
    flow_right: Real,
    relative_velocity: Real,
    u_max_left: Real,
    gamma: Real,
) -> SecantResult {
    JunctionResidual::new(flow_right, relative_velocity, u_max_left, gamma).solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_downstream_flow() {
        let rho = solve_left_density(0.2, 0.0, 1.0, 2.0);
        assert!(rho > RHO_BOTTOM && rho < RHO_TOP);
        // Re-check the continuity relation at the returned density.
        assert!((0.2 / rho - (1.0 - rho * rho)).abs() < 1e-4);
    }

    #[test]
    fn checked_variant_reports_convergence() {
        let result = solve_left_density_checked(0.2, 0.0, 1.0, 2.0);
        assert!(result.converged);
        assert!(result.residual.abs() <= 5e-6);
        assert_eq!(result.x, solve_left_density(0.2, 0.0, 1.0, 2.0));
    }

    #[test]
    fn deterministic_across_calls() {
        let a = solve_left_density(0.17, 0.05, 1.2, 1.5);
        let b = solve_left_density(0.17, 0.05, 1.2, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn residual_matches_relation_terms() {
        let g = JunctionResidual::new(0.3, 0.1, 2.0, 2.0);
        let rho = 0.5;
        let by_hand = 0.3 / rho - arz_model::u_eq(rho, 2.0, 2.0) - 0.1;
        assert_eq!(g.eval(rho), by_hand);
    }

    #[test]
    fn result_stays_inside_interval() {
        // A flow above the lane's capacity has no root; the solver still
        // hands back its last iterate, inside the admissible interval.
        let result = solve_left_density_checked(5.0, 0.0, 1.0, 2.0);
        assert!(result.x > RHO_BOTTOM && result.x < RHO_TOP);
        assert!(!result.converged);
    }
}
