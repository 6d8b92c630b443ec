//! Equilibrium relations between density, relative flow, and velocity.
//!
//! The relations:
//!
//! ```text
//! u_eq(rho)    = u_max * (1 - rho^gamma)
//! rho(u_eq)    = (1 - u_eq/u_max)^(1/gamma)
//! u_eq'(rho)   = -u_max * gamma * rho^(gamma-1)
//! u(rho, y)    = y/rho + u_eq(rho)
//! y(rho, u)    = rho * (u - u_eq(rho))
//! ```
//!
//! All functions are total for rho >= 0 and gamma > 0 except the unguarded
//! `u_from`, which divides by rho and is undefined at rho = 0.

use arz_core::Real;

/// Densities below this floor are treated as vacuum by the guarded
/// relations: the cell is empty enough that y/rho is numerically
/// meaningless and the free-flow speed is the only sensible velocity.
pub const RHO_EPSILON: Real = 1e-3;

/// How `u_from` behaves at the edges of the physical range.
///
/// The pure macroscopic solver never evaluates near vacuum and wants the
/// raw relation; the hybrid coupling layer feeds in averaged states that
/// can sit arbitrarily close to rho = 0 and needs the floor and the
/// non-negativity clamp. Callers pick explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Raw y/rho + u_eq(rho). Undefined at rho = 0; the caller must keep
    /// rho away from vacuum.
    Unguarded,

    /// Returns u_max outright below [`RHO_EPSILON`] and clamps the result
    /// non-negative. Reverse flow has no meaning in this model.
    #[default]
    Guarded,
}

/// Equilibrium velocity u_max * (1 - rho^gamma).
///
/// Monotonically non-increasing on [0,1]; u_eq(0) = u_max, u_eq(1) = 0.
#[inline]
pub fn u_eq(rho: Real, u_max: Real, gamma: Real) -> Real {
    u_max * (1.0 - rho.powf(gamma))
}

/// Relative flow y from density and velocity: rho * (u - u_eq(rho)).
#[inline]
pub fn y_from(rho: Real, u: Real, u_max: Real, gamma: Real) -> Real {
    rho * (u - u_eq(rho, u_max, gamma))
}

/// Velocity from density and relative flow, under the given policy.
#[inline]
pub fn u_from(rho: Real, y: Real, u_max: Real, gamma: Real, policy: BoundaryPolicy) -> Real {
    match policy {
        BoundaryPolicy::Unguarded => y / rho + u_eq(rho, u_max, gamma),
        BoundaryPolicy::Guarded => {
            if rho < RHO_EPSILON {
                u_max
            } else {
                (y / rho + u_eq(rho, u_max, gamma)).max(0.0)
            }
        }
    }
}

/// Density attaining a given equilibrium velocity:
/// (1 - u_eq_value/u_max)^(1/gamma).
///
/// Takes pre-inverted constants; per-lane callers compute 1/u_max and
/// 1/gamma once and reuse them every cell.
#[inline]
pub fn inv_u_eq(u_eq_value: Real, inv_u_max: Real, inv_gamma: Real) -> Real {
    (1.0 - u_eq_value * inv_u_max).powf(inv_gamma)
}

/// Derivative of the equilibrium velocity: -u_max * gamma * rho^(gamma-1).
///
/// Exposed for linearization by the surrounding scheme; nothing in this
/// workspace differentiates through it.
#[inline]
pub fn u_eq_prime(rho: Real, u_max: Real, gamma: Real) -> Real {
    -u_max * gamma * rho.powf(gamma - 1.0)
}

/// Equilibrium flow at a density, shifted by a relative velocity:
/// rho * (u_eq(rho) + relv).
#[inline]
pub fn fundamental_diagram(rho: Real, relv: Real, u_max: Real, gamma: Real) -> Real {
    rho * (u_eq(rho, u_max, gamma) + relv)
}

/// Density maximizing the shifted fundamental diagram.
#[inline]
pub fn critical_density(relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    ((u_max + relv) / (u_max * (1.0 + gamma))).powf(inv_gamma)
}

/// Capacity flow: the fundamental diagram at the critical density.
#[inline]
pub fn max_flow(relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    let crit = critical_density(relv, u_max, gamma, inv_gamma);
    fundamental_diagram(crit, relv, u_max, gamma)
}

/// Flow an upstream cell offers across a junction: rises with density up
/// to the critical density, then holds at capacity.
#[inline]
pub fn demand(rho: Real, relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    let crit = critical_density(relv, u_max, gamma, inv_gamma);
    fundamental_diagram(rho.min(crit), relv, u_max, gamma)
}

/// Flow a downstream cell can absorb: capacity below the critical
/// density, falling off with congestion beyond it.
#[inline]
pub fn supply(rho: Real, relv: Real, u_max: Real, gamma: Real, inv_gamma: Real) -> Real {
    let crit = critical_density(relv, u_max, gamma, inv_gamma);
    fundamental_diagram(rho.max(crit), relv, u_max, gamma)
}
