//! Angular quantities.

use core::f32::consts::{PI, TAU};
use core::fmt::{self, Debug, Display};
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::math::approx::ApproxEq;
use crate::math::float;

//
// Types
//

/// A scalar angular quantity.
///
/// Prevents confusion between degrees and radians by requiring the use of
/// one of the named constructors to create an `Angle`, as well as one of
/// the named getter methods to obtain the angle as a raw `f32` value.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Angle(f32);

//
// Free fns and consts
//

/// Returns an angle of `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * RADS_PER_DEG)
}

/// Returns an angle of `a` turns.
pub const fn turns(a: f32) -> Angle {
    Angle(a * RADS_PER_TURN)
}

const RADS_PER_DEG: f32 = PI / 180.0;
const RADS_PER_TURN: f32 = TAU;

//
// Inherent impls
//

impl Angle {
    /// A zero degree angle.
    pub const ZERO: Self = Self(0.0);
    /// A 90 degree angle.
    pub const RIGHT: Self = Self(RADS_PER_TURN / 4.0);
    /// A 180 degree angle.
    pub const STRAIGHT: Self = Self(RADS_PER_TURN / 2.0);
    /// A 360 degree angle.
    pub const FULL: Self = Self(RADS_PER_TURN);

    /// Returns the value of `self` in radians.
    /// # Examples
    /// ```
    /// # use painter_core::math::turns;
    /// assert_eq!(turns(0.5).to_rads(), core::f32::consts::PI);
    /// ```
    pub const fn to_rads(self) -> f32 {
        self.0
    }
    /// Returns the value of `self` in degrees.
    pub fn to_degs(self) -> f32 {
        self.0 / RADS_PER_DEG
    }
    /// Returns the value of `self` in turns.
    pub fn to_turns(self) -> f32 {
        self.0 / RADS_PER_TURN
    }

    /// Returns the sine of `self`.
    pub fn sin(self) -> f32 {
        float::f32::sin(self.0)
    }
    /// Returns the cosine of `self`.
    pub fn cos(self) -> f32 {
        float::f32::cos(self.0)
    }
    /// Returns the tangent of `self`.
    pub fn tan(self) -> f32 {
        float::f32::tan(self.0)
    }

    /// Returns `self` "wrapped around" to the range `min..max`.
    ///
    /// # Examples
    /// ```
    /// # use painter_core::assert_approx_eq;
    /// # use painter_core::math::angle::*;
    /// let a = degs(400.0).wrap(Angle::ZERO, Angle::FULL);
    /// assert_approx_eq!(a.to_degs(), 40.0, eps = 1e-5);
    ///
    /// let b = degs(190.0).wrap(-Angle::STRAIGHT, Angle::STRAIGHT);
    /// assert_approx_eq!(b.to_degs(), -170.0, eps = 1e-5);
    /// ```
    #[must_use]
    pub fn wrap(self, min: Self, max: Self) -> Self {
        Self(min.0 + float::f32::rem_euclid(self.0 - min.0, max.0 - min.0))
    }
}

//
// Local trait impls
//

impl ApproxEq for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: &Self) -> bool {
        self.0.approx_eq_eps(&other.0, &eps.0)
    }
    fn relative_epsilon() -> Self {
        Self(f32::relative_epsilon())
    }
}

//
// Foreign trait impls
//

impl Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_degs(), f)?;
        f.write_str("°")
    }
}

impl Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({self})")
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
impl Mul<f32> for Angle {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}
impl Div<f32> for Angle {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{FRAC_PI_2, PI};

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn units() {
        assert_approx_eq!(degs(90.0).to_rads(), FRAC_PI_2);
        assert_eq!(turns(0.5).to_rads(), PI);
        assert_approx_eq!(rads(PI).to_degs(), 180.0);
        assert_approx_eq!(degs(720.0).to_turns(), 2.0);
    }

    #[test]
    fn trig() {
        assert_approx_eq!(degs(30.0).sin(), 0.5);
        assert_approx_eq!(degs(60.0).cos(), 0.5);
        assert_approx_eq!(degs(45.0).tan(), 1.0);
    }

    #[test]
    fn wrapping() {
        let (lo, hi) = (-Angle::STRAIGHT, Angle::STRAIGHT);
        assert_approx_eq!(degs(0.0).wrap(lo, hi), degs(0.0));
        let wrap = |a: f32| degs(a).wrap(lo, hi).to_degs();
        assert_approx_eq!(wrap(370.0), 10.0, eps = 1e-5);
        assert_approx_eq!(wrap(-190.0), 170.0, eps = 1e-5);
        assert_approx_eq!(wrap(350.0), -10.0, eps = 1e-5);
    }

    #[test]
    fn arithmetic() {
        let mut a = degs(30.0);
        a += degs(60.0);
        assert_approx_eq!(a, degs(90.0));
        a -= degs(100.0);
        assert_approx_eq!(a, degs(-10.0));
        assert_approx_eq!(-a * 2.0, degs(20.0));
        assert_approx_eq!(a / 2.0, degs(-5.0));
    }

    #[test]
    fn display() {
        assert_eq!(alloc::format!("{:.1}", degs(45.0)), "45.0°");
    }
}
