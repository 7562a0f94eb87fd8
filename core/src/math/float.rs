//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the ones the renderer needs using either the `libm` or
//! `micromath` crate, depending on which feature is enabled. Call them as
//! `f32::sqrt(x)` after importing [`f32`] from here and the right backend
//! is picked at compile time.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::fabsf as abs;
    pub use libm::floorf as floor;
    pub use libm::sqrtf as sqrt;

    pub use libm::cosf as cos;
    pub use libm::sinf as sin;
    pub use libm::tanf as tan;

    pub use super::fallback::rem_euclid;
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    #[inline]
    pub fn abs(x: f32) -> f32 {
        mm::abs(x)
    }
    #[inline]
    pub fn floor(x: f32) -> f32 {
        mm::floor(x)
    }
    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        mm::rem_euclid(x, m)
    }
    /// Returns the approximate square root of `x`.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        let y = mm::sqrt(x);
        // Two rounds of Newton's method
        let y = 0.5 * (y + (x / y));
        0.5 * (y + (x / y))
    }
    #[inline]
    pub fn sin(x: f32) -> f32 {
        mm::sin(x)
    }
    #[inline]
    pub fn cos(x: f32) -> f32 {
        mm::cos(x)
    }
    #[inline]
    pub fn tan(x: f32) -> f32 {
        mm::tan(x)
    }
}

pub mod fallback {
    /// Returns the absolute value of `x`.
    #[inline]
    pub fn abs(x: f32) -> f32 {
        f32::from_bits(x.to_bits() & !(1 << 31))
    }
    /// Returns the largest integer less than or equal to `x`.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        (x as i64 - (x < (x as i64) as f32) as i64) as f32
    }
    /// Returns the least non-negative remainder of `x` (mod `m`).
    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        let r = x % m;
        r + if r < 0.0 { abs(m) } else { 0.0 }
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use core::f32::consts::*;

    use super::{f32, *};
    use crate::assert_approx_eq;

    #[test]
    fn fallback_functions() {
        use fallback as fb;
        assert_eq!(fb::abs(-2.5), 2.5);
        assert_eq!(fb::abs(2.5), 2.5);

        assert_eq!(fb::floor(1.5), 1.0);
        assert_eq!(fb::floor(0.99), 0.0);
        assert_eq!(fb::floor(-1.1), -2.0);
        assert_eq!(fb::floor(-3.0), -3.0);

        assert_approx_eq!(fb::rem_euclid(1.6, 0.5), 0.1);
        assert_approx_eq!(fb::rem_euclid(-1.6, 0.5), 0.4);
        assert_approx_eq!(fb::rem_euclid(-1.6, -0.5), 0.4);
    }

    #[cfg(feature = "libm")]
    #[test]
    fn libm_functions() {
        assert_eq!(libm::floor(-1.1), -2.0);
        assert_eq!(libm::sqrt(9.0), 3.0);
        assert_approx_eq!(libm::sin(FRAC_PI_6), 0.5);
        assert_eq!(libm::cos(PI), -1.0);
        assert_approx_eq!(libm::tan(FRAC_PI_4), 1.0);
    }

    #[cfg(feature = "mm")]
    #[test]
    fn mm_functions() {
        assert_eq!(mm::floor(-1.1), -2.0);
        assert_approx_eq!(mm::sqrt(9.0), 3.0);
        assert_approx_eq!(mm::sin(FRAC_PI_6), 0.5);
        assert_approx_eq!(mm::tan(FRAC_PI_4), 1.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_functions() {
        assert_eq!(f32::floor(-0.5), -1.0);
        assert_approx_eq!(f32::rem_euclid(-1.6, 0.5), 0.4);
        assert_eq!(f32::sqrt(9.0), 3.0);
        assert!(f32::sqrt(-1.0).is_nan());
        assert_eq!(f32::cos(PI), -1.0);
    }
}
