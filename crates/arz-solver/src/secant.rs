//! Secant root finder with a bisection safeguard.

use arz_core::Real;
use tracing::trace;

/// Secant solver configuration.
///
/// `tol` is dual-purpose: it bounds both the accepted residual and the
/// secant denominator below which the residual is considered flat.
#[derive(Debug, Clone, Copy)]
pub struct SecantConfig {
    /// Residual and flatness tolerance
    pub tol: Real,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for SecantConfig {
    fn default() -> Self {
        Self {
            tol: 5e-6,
            max_iterations: 100,
        }
    }
}

/// Secant iteration result.
///
/// The last iterate is always carried, converged or not; callers that
/// need a guarantee check `converged` (or re-check `residual`) and decide
/// policy themselves.
#[derive(Debug, Clone, Copy)]
pub struct SecantResult {
    /// Last iterate
    pub x: Real,
    /// Residual at the last iterate
    pub residual: Real,
    /// Number of iterations taken
    pub iterations: usize,
    /// Whether |residual| <= tol
    pub converged: bool,
}

/// Find x in (bottom, top) with f(x) ~ 0 by secant iteration, without
/// derivatives.
///
/// Keeps the two most recent (x, f(x)) pairs and proposes the next point
/// on the line through them. A proposal at or past `bottom`/`top` is
/// pulled halfway back toward the current iterate until it is strictly
/// inside, so `f` is only ever evaluated inside the interval; each
/// halving strictly shrinks the distance, so the fallback re-enters in
/// finitely many steps. The same halving tames a near-degenerate
/// denominator by shrinking the step instead of taking an unbounded jump.
///
/// Stops when |f(x)| <= tol, when the residual goes flat
/// (|f(x_n) - f(x_n-1)| <= tol), or when the iteration budget runs out.
/// Preconditions (x0 != x1, both inside the interval, a root plausibly
/// bracketed) are the caller's to uphold and are not validated.
pub fn secant_solve<F>(
    x0: Real,
    x1: Real,
    bottom: Real,
    top: Real,
    config: &SecantConfig,
    f: F,
) -> SecantResult
where
    F: Fn(Real) -> Real,
{
    let mut x_prev = x0;
    let mut x = x1;
    let mut f_prev = f(x_prev);
    let mut fx = f(x);
    let mut iterations = 0;

    while fx.abs() > config.tol
        && (fx - f_prev).abs() > config.tol
        && iterations < config.max_iterations
    {
        let denom = fx - f_prev;
        let mut next = x - (x - x_prev) / denom * fx;

        // Safeguard: halve toward the accepted iterate until strictly
        // inside. The `next != x` guard ends the loop once the halving
        // has collapsed onto x.
        while next <= bottom && next != x {
            next = 0.5 * (next + x);
        }
        while next >= top && next != x {
            next = 0.5 * (next + x);
        }

        x_prev = x;
        x = next;
        f_prev = fx;
        fx = f(x);
        iterations += 1;

        trace!(iteration = iterations, x, residual = fx, "secant step");
    }

    SecantResult {
        x,
        residual: fx,
        iterations,
        converged: fx.abs() <= config.tol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_residual_converges() {
        let config = SecantConfig {
            tol: 1e-9,
            max_iterations: 50,
        };
        let result = secant_solve(0.3, 0.7, 0.0, 1.0, &config, |x| x - 0.5);
        assert!(result.converged);
        assert!((result.x - 0.5).abs() <= 1e-9);
    }

    #[test]
    fn overshoot_stays_strictly_inside() {
        // x^10 - 0.5 is almost flat between the starting points, so the
        // first secant proposal lands far past `top`; the safeguard must
        // pull every such proposal back strictly inside.
        let config = SecantConfig {
            tol: 1e-9,
            max_iterations: 100,
        };
        let result = secant_solve(0.1, 0.2, 0.0, 1.0, &config, |x: Real| x.powi(10) - 0.5);
        assert!(result.x > 0.0 && result.x < 1.0);
        assert!(result.converged);
        assert!((result.x - 0.5_f64.powf(0.1)).abs() < 1e-6);
    }

    #[test]
    fn flat_residual_stops_early() {
        let config = SecantConfig {
            tol: 1e-6,
            max_iterations: 50,
        };
        // Constant residual: the very first flatness test fires.
        let result = secant_solve(0.3, 0.7, 0.0, 1.0, &config, |_| 1.0);
        assert_eq!(result.iterations, 0);
        assert!(!result.converged);
        assert_eq!(result.x, 0.7);
        assert_eq!(result.residual, 1.0);
    }

    #[test]
    fn budget_exhaustion_returns_last_iterate() {
        let config = SecantConfig {
            tol: 1e-15,
            max_iterations: 3,
        };
        // Root at sqrt(0.5); three iterations cannot hit 1e-15.
        let result = secant_solve(0.3, 0.7, 0.0, 1.0, &config, |x| x * x - 0.5);
        assert_eq!(result.iterations, 3);
        assert!(result.x > 0.0 && result.x < 1.0);
    }

    #[test]
    fn quadratic_root() {
        let config = SecantConfig::default();
        let result = secant_solve(0.3, 0.7, 0.0, 1.0, &config, |x| x * x - 0.25);
        assert!(result.converged);
        assert!((result.x - 0.5).abs() < 1e-4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn linear_roots_found_inside_interval(
                slope in 0.1_f64..10.0,
                root in 0.1_f64..0.9,
            ) {
                let config = SecantConfig {
                    tol: 1e-9,
                    max_iterations: 50,
                };
                let result =
                    secant_solve(0.05, 0.95, 0.0, 1.0, &config, |x| slope * (x - root));
                prop_assert!(result.converged);
                prop_assert!(result.x > 0.0 && result.x < 1.0);
                prop_assert!((result.x - root).abs() < 1e-6);
            }
        }
    }
}
