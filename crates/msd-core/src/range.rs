//! Closed numeric ranges.

use crate::numeric::Real;

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Real,
    pub max: Real,
}

impl Range {
    pub const fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Clamp `v` into the range. NaN maps to `min`.
    pub fn clamp(&self, v: Real) -> Real {
        if v.is_nan() {
            return self.min;
        }
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: Real) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamp_always_lands_inside(lo in -10.0_f64..10.0, width in 0.0_f64..10.0, v in -100.0_f64..100.0) {
            let r = Range::new(lo, lo + width);
            prop_assert!(r.contains(r.clamp(v)));
        }
    }
}
