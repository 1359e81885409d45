use crate::{CoreError, CoreResult};

/// Scalar type for every physical quantity in the workspace.
pub type Real = f64;

/// Smallest mass used when a finite acceleration must be derived from
/// a possibly zero mass.
pub const MASS_FLOOR: Real = 1e-6;

/// Absolute and relative slack for float comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    pub fn absolute(abs: Real) -> Self {
        Self { abs, rel: 0.0 }
    }
}

/// `|a - b|` within `abs`, or within `rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= tol.abs || diff <= tol.rel * scale
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if !v.is_finite() {
        return Err(CoreError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: Real::INFINITY,
        });
    }
    Ok(v)
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(CoreError::InvalidArg { what });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_tolerance_scales_with_magnitude() {
        let tol = Tolerances::default();
        assert!(nearly_equal(15.0, 15.0 * (1.0 + 1e-10), tol));
        assert!(!nearly_equal(15.0, 15.001, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
    }

    #[test]
    fn absolute_only_ignores_scale() {
        let tol = Tolerances::absolute(1e-3);
        assert!(nearly_equal(1000.0, 1000.0005, tol));
        assert!(!nearly_equal(1000.0, 1000.01, tol));
    }

    #[test]
    fn nan_is_not_finite() {
        let err = ensure_finite(Real::NAN, "displacement").unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { what: "displacement", .. }));
        assert!(err.to_string().contains("displacement"));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative(0.0, "damping"), Ok(0.0));
        assert!(ensure_non_negative(-0.1, "damping").is_err());
        assert!(ensure_non_negative(Real::INFINITY, "damping").is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ensure_positive(0.0, "mass").is_err());
        assert_eq!(ensure_positive(2.5, "mass"), Ok(2.5));
    }
}
