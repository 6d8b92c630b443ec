//! Conserved and primitive per-cell state.

use crate::equilibrium::{self, BoundaryPolicy, RHO_EPSILON};
use crate::params::LaneParams;
use arz_core::{ArzResult, Real, ensure_finite, ensure_unit_interval};

/// Conserved pair integrated by the finite-volume scheme.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellState {
    /// Normalized occupancy in [0,1].
    pub rho: Real,
    /// Relative flow rho * (u - u_eq(rho)).
    pub y: Real,
}

impl CellState {
    pub fn new(rho: Real, y: Real) -> Self {
        Self { rho, y }
    }

    /// Verify the pair is physically meaningful: finite values, rho in
    /// [0,1]. A finite-volume update can only drift out of the band
    /// through a bug or an unstable step, so this is a diagnostic for
    /// the caller rather than something the relations enforce.
    pub fn check(&self) -> ArzResult<()> {
        ensure_unit_interval(self.rho, "rho")?;
        ensure_finite(self.y, "y")?;
        Ok(())
    }

    /// Pull a state drifting out of the physical band back inside: cells
    /// below the vacuum floor are emptied outright, and rho is capped
    /// strictly below full so the relations stay well conditioned.
    pub fn clamped(self) -> Self {
        if self.rho <= RHO_EPSILON {
            Self { rho: 0.0, y: 0.0 }
        } else if self.rho > 1.0 - RHO_EPSILON {
            Self {
                rho: 1.0 - RHO_EPSILON,
                y: self.y,
            }
        } else {
            self
        }
    }
}

/// Conserved state with the derived primitive quantities alongside.
///
/// The flux and junction code reads u and u_eq over and over for the same
/// cell, so both are derived once per cell per step and carried along.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FullState {
    pub rho: Real,
    pub y: Real,
    pub u: Real,
    pub u_eq: Real,
}

impl FullState {
    /// Derive the primitive quantities from a conserved pair.
    pub fn from_conserved(q: CellState, lane: &LaneParams, policy: BoundaryPolicy) -> Self {
        let u_eq = equilibrium::u_eq(q.rho, lane.u_max, lane.gamma);
        let u = equilibrium::u_from(q.rho, q.y, lane.u_max, lane.gamma, policy);
        Self {
            rho: q.rho,
            y: q.y,
            u,
            u_eq,
        }
    }

    /// Build from density and velocity, deriving the relative flow.
    pub fn from_primitive(rho: Real, u: Real, lane: &LaneParams) -> Self {
        let u_eq = equilibrium::u_eq(rho, lane.u_max, lane.gamma);
        Self {
            rho,
            y: rho * (u - u_eq),
            u,
            u_eq,
        }
    }

    pub fn conserved(&self) -> CellState {
        CellState {
            rho: self.rho,
            y: self.y,
        }
    }

    /// First characteristic speed u + rho * u_eq'(rho).
    pub fn lambda0(&self, lane: &LaneParams) -> Real {
        self.u + self.rho * equilibrium::u_eq_prime(self.rho, lane.u_max, lane.gamma)
    }

    /// Second characteristic speed; the contact wave moves with the flow.
    pub fn lambda1(&self) -> Real {
        self.u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arz_core::{Tolerances, nearly_equal};

    fn lane() -> LaneParams {
        LaneParams::new(1.0, 2.0).unwrap()
    }

    #[test]
    fn conserved_primitive_agree() {
        let lane = lane();
        let full = FullState::from_primitive(0.4, 0.9, &lane);
        let back = FullState::from_conserved(full.conserved(), &lane, BoundaryPolicy::Guarded);
        assert!(nearly_equal(back.u, 0.9, Tolerances::default()));
        assert_eq!(back.rho, 0.4);
    }

    #[test]
    fn vacuum_cell_reads_free_flow_speed() {
        let lane = lane();
        let full =
            FullState::from_conserved(CellState::new(0.0, 0.0), &lane, BoundaryPolicy::Guarded);
        assert_eq!(full.u, lane.u_max);
    }

    #[test]
    fn clamped_empties_vacuum_and_caps_jam() {
        let near_vacuum = CellState::new(5e-4, -0.1).clamped();
        assert_eq!(near_vacuum, CellState::new(0.0, 0.0));

        let jammed = CellState::new(1.2, -0.1).clamped();
        assert_eq!(jammed.rho, 1.0 - RHO_EPSILON);
        assert_eq!(jammed.y, -0.1);

        let interior = CellState::new(0.5, 0.2);
        assert_eq!(interior.clamped(), interior);
    }

    #[test]
    fn check_flags_unphysical_states() {
        assert!(CellState::new(0.5, -0.2).check().is_ok());
        assert!(CellState::new(1.0, 0.0).check().is_ok());
        assert!(CellState::new(1.3, 0.0).check().is_err());
        assert!(CellState::new(-0.2, 0.0).check().is_err());
        assert!(CellState::new(0.5, Real::NAN).check().is_err());
    }

    #[test]
    fn characteristic_ordering() {
        // lambda0 trails lambda1 wherever the curve has negative slope.
        let lane = lane();
        for i in 1..=10 {
            let rho = i as Real / 10.0;
            let full = FullState::from_primitive(rho, 0.5, &lane);
            assert!(full.lambda0(&lane) <= full.lambda1());
        }
    }
}
