use crate::{ArzError, ArzResult};

/// Floating point type used throughout the system.
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing derived quantities.
///
/// The defaults suit the magnitudes this model works in: densities and
/// flows of order one, velocities of order u_max. Comparisons against
/// solver output use explicit, looser pairs.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-10,
            rel: 1e-8,
        }
    }
}

/// Whether two values agree within the tolerance pair, whichever of the
/// absolute and scaled-relative bounds is wider.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= tol.abs.max(tol.rel * scale)
}

pub fn ensure_finite(v: Real, what: &'static str) -> ArzResult<Real> {
    if !v.is_finite() {
        return Err(ArzError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Validate a normalized occupancy: finite and inside [0,1].
pub fn ensure_unit_interval(v: Real, what: &'static str) -> ArzResult<Real> {
    let v = ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(ArzError::Invariant { what })
    }
}
