//! Per-lane model constants.

use arz_core::{ArzError, ArzResult, Real, ensure_finite};

/// Per-lane constants of the ARZ model: free-flow speed and concavity
/// exponent, with their inverses cached.
///
/// These are not part of the cell state; the simulator holds one per lane
/// and passes it into every relation evaluation. The inverses exist because
/// `inv_u_eq` and `critical_density` want 1/u_max and 1/gamma on every
/// cell of every step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneParams {
    pub u_max: Real,
    pub gamma: Real,
    pub inv_u_max: Real,
    pub inv_gamma: Real,
}

impl LaneParams {
    /// Validate u_max > 0 and gamma > 0 and cache the inverses.
    pub fn new(u_max: Real, gamma: Real) -> ArzResult<Self> {
        ensure_finite(u_max, "u_max")?;
        ensure_finite(gamma, "gamma")?;
        if u_max <= 0.0 {
            return Err(ArzError::InvalidArg { what: "u_max" });
        }
        if gamma <= 0.0 {
            return Err(ArzError::InvalidArg { what: "gamma" });
        }
        Ok(Self {
            u_max,
            gamma,
            inv_u_max: 1.0 / u_max,
            inv_gamma: 1.0 / gamma,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_constants() {
        let p = LaneParams::new(30.0, 0.5).unwrap();
        assert_eq!(p.u_max, 30.0);
        assert_eq!(p.inv_gamma, 2.0);
    }

    #[test]
    fn rejects_non_positive() {
        assert!(LaneParams::new(0.0, 0.5).is_err());
        assert!(LaneParams::new(-1.0, 0.5).is_err());
        assert!(LaneParams::new(30.0, 0.0).is_err());
        assert!(LaneParams::new(Real::NAN, 0.5).is_err());
    }
}
